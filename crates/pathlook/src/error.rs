use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("command not found: {cmd}")]
    CommandNotFound { cmd: String },

    #[error("search path entry contains the path separator: {0}")]
    JoinPaths(#[from] std::env::JoinPathsError),
}
