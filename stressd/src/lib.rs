//! stressd is a http load testing tool.
//!
//! A [Task] sends a fixed number of GET requests through a pool of workers
//! and folds every result into a [Report].

pub mod arg;
pub mod collector;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod statistics;
pub mod task;
pub mod transport;
pub mod worker;

pub use self::arg::Arg;
pub use self::config::Config;
pub use self::statistics::{Report, RequestResult};
pub use self::task::{RunState, Task};
pub use self::transport::{HttpTransport, Transport};
