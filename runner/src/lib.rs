pub mod adapter;
pub mod config;
pub mod dsmc;
pub mod local;
pub mod state;

pub use adapter::JobRunnerAdapter;
pub use async_trait::async_trait;
pub use config::{ConfigError, RunnerConfig};
pub use joblib::types::{Cores, JobId};
pub use local::LocalQueueAdapter;
pub use state::State;
