pub type Cmd = String;
pub type Cores = usize;
pub type JobId = u64;
