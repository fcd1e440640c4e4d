use std::error::Error as StdError;
use thiserror::Error;

pub type Error = Box<dyn StdError + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// [ConfigError] is returned when the arguments can't describe a valid run
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required argument --{0}")]
    Missing(&'static str),

    /// the target url can't be parsed, or isn't http(s)
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// [RunError] is returned when a run can't produce a trustworthy report
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("task has already been started")]
    AlreadyStarted,

    /// a worker died, so some tokens never produced a result
    #[error("worker task failed: {0}")]
    WorkerFailed(String),

    #[error("collector task failed: {0}")]
    CollectorFailed(String),
}
