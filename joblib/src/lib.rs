mod actors;
pub mod config;
pub mod error;
mod events;
mod job;
mod priority;
pub mod types;

// re-export the queue handle as if it is the queue itself.
pub use actors::queue::JobQueueHandle as JobQueue;
pub use config::QueueConfig;
pub use events::Status;
pub use job::Job;
pub use priority::PriorityMethod;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    fn queue(cores: usize) -> JobQueue {
        let mut config = QueueConfig::new(cores);
        config.interval = Duration::from_millis(50);
        JobQueue::spawn(config, 32).expect("queue spawn")
    }

    async fn wait_for(queue: &JobQueue, job_id: types::JobId, wanted: Status) -> Job {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let job = queue
                .get_job_with_id(job_id)
                .await
                .expect("queue exited")
                .expect("job missing");
            if job.status == wanted {
                return job;
            }
            assert!(
                Instant::now() < deadline,
                "job {} stuck in {} waiting for {}",
                job_id,
                job.status,
                wanted
            );
            sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(2);
        let job_id = queue
            .add("echo -n hello world!", 1, dir.path(), None, None)
            .await
            .expect("job add err");

        let job = wait_for(&queue, job_id, Status::Completed).await;
        assert_eq!(job.return_code, Some(0));
        assert_eq!(job.stdout, dir.path().join(format!("job-{}.out", job_id)));
        let output = std::fs::read_to_string(&job.stdout).unwrap();
        assert_eq!(output, "hello world!");
        assert_eq!(queue.get_status(job_id).await.unwrap(), Status::Completed);
    }

    #[tokio::test]
    async fn non_zero_exit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(1);
        let stderr = dir.path().join("err.log");
        let job_id = queue
            .add("echo oops >&2; exit 8", 1, dir.path(), None, Some(stderr.clone()))
            .await
            .unwrap();

        let job = wait_for(&queue, job_id, Status::Failed).await;
        assert_eq!(job.return_code, Some(8));
        assert_eq!(std::fs::read_to_string(stderr).unwrap(), "oops\n");
    }

    #[tokio::test]
    async fn runs_in_run_dir() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(1);
        let job_id = queue
            .add("touch marker", 1, dir.path(), None, None)
            .await
            .unwrap();
        wait_for(&queue, job_id, Status::Completed).await;
        assert!(dir.path().join("marker").is_file());
    }

    #[tokio::test]
    async fn launch_failure_marks_failed() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(1);
        let unwritable = dir.path().join("missing").join("out.log");
        let job_id = queue
            .add("true", 1, dir.path(), Some(unwritable), None)
            .await
            .unwrap();
        let job = wait_for(&queue, job_id, Status::Failed).await;
        assert_eq!(job.return_code, None);
    }

    #[tokio::test]
    async fn rejects_bad_requests() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(2);
        assert!(matches!(
            queue.add("true", 3, dir.path(), None, None).await,
            Err(error::Error::InvalidCores { requested: 3, budget: 2 })
        ));
        assert!(matches!(
            queue.add("true", 0, dir.path(), None, None).await,
            Err(error::Error::InvalidCores { .. })
        ));
        assert!(matches!(
            queue
                .add("true", 1, Path::new("/definitely/not/here"), None, None)
                .await,
            Err(error::Error::InvalidRunDir(_))
        ));
        assert!(queue.get_status_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn core_budget_holds_jobs_back() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(1);
        let first = queue.add("sleep 30", 1, dir.path(), None, None).await.unwrap();
        let second = queue.add("true", 1, dir.path(), None, None).await.unwrap();
        assert!(second > first);

        wait_for(&queue, first, Status::Running).await;
        assert_eq!(queue.get_status(second).await.unwrap(), Status::Pending);

        assert_eq!(queue.stop_job_with_id(first).await.unwrap(), Some(first));
        wait_for(&queue, first, Status::Cancelled).await;
        wait_for(&queue, second, Status::Completed).await;
    }

    #[tokio::test]
    async fn stop_pending_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(1);
        let running = queue.add("sleep 30", 1, dir.path(), None, None).await.unwrap();
        let pending = queue.add("sleep 30", 1, dir.path(), None, None).await.unwrap();
        wait_for(&queue, running, Status::Running).await;

        assert_eq!(queue.stop_job_with_id(pending).await.unwrap(), Some(pending));
        assert_eq!(queue.get_status(pending).await.unwrap(), Status::Cancelled);

        assert_eq!(queue.stop_job_with_id(999).await.unwrap(), None);
        assert_eq!(queue.get_status(999).await.unwrap(), Status::NotFound);
        assert!(queue.get_job_with_id(999).await.unwrap().is_none());

        queue.stop_job_with_id(running).await.unwrap();
        wait_for(&queue, running, Status::Cancelled).await;
    }

    #[tokio::test]
    async fn stop_all_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(2);
        let mut ids = vec![];
        for _ in 0..3 {
            ids.push(queue.add("sleep 30", 1, dir.path(), None, None).await.unwrap());
        }
        let done = queue.add("true", 1, dir.path(), None, None).await.unwrap();
        wait_for(&queue, ids[0], Status::Running).await;

        queue.stop_all_jobs().await.unwrap();
        for id in &ids {
            wait_for(&queue, *id, Status::Cancelled).await;
        }
        // queued behind the sleepers, so it was cancelled before it ever ran
        assert_eq!(queue.get_status(done).await.unwrap(), Status::Cancelled);

        let all = queue.get_status_all().await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.values().all(|status| *status == Status::Cancelled));
    }

    #[tokio::test]
    async fn finished_jobs_stay_finished() {
        let dir = tempfile::tempdir().unwrap();
        let queue = queue(1);
        let job_id = queue.add("true", 1, dir.path(), None, None).await.unwrap();
        wait_for(&queue, job_id, Status::Completed).await;
        assert_eq!(queue.stop_job_with_id(job_id).await.unwrap(), Some(job_id));
        assert_eq!(queue.get_status(job_id).await.unwrap(), Status::Completed);
    }

    #[tokio::test]
    async fn spawn_validates_config() {
        assert!(matches!(
            JobQueue::spawn(QueueConfig::new(0), 8),
            Err(error::Error::NoCores)
        ));
    }
}
