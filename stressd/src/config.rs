//! config module turns validated arguments into the run [Config]

use crate::error::ConfigError;
use crate::Arg;
use reqwest::Url;
use std::time::Duration;

/// default timeout applied to every single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [Config] describes a single load test run
#[derive(Debug, Clone)]
pub struct Config {
    /// target every worker sends its GET request to
    pub url: Url,

    /// total requests number will send to server
    pub requests: u64,

    /// number of workers, and the maximum number of requests in flight
    pub concurrency: u32,

    /// per request timeout
    pub timeout: Duration,
}

impl Config {
    /// give url, requests and concurrency, return a [Config] using the
    /// default request timeout
    pub fn new(
        url: &str,
        requests: u64,
        concurrency: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            url: parse_url(url)?,
            requests,
            concurrency,
            timeout: DEFAULT_TIMEOUT,
        };
        config.validate()?;
        Ok(config)
    }

    /// override the per request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        self.timeout = timeout;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn parse_url(url: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidUrl(format!(
            "unsupported scheme {}",
            scheme
        ))),
    }
}

impl TryFrom<&Arg> for Config {
    type Error = ConfigError;

    fn try_from(arg: &Arg) -> Result<Self, Self::Error> {
        let url = arg.url.as_deref().ok_or(ConfigError::Missing("url"))?;
        let requests = arg.requests.ok_or(ConfigError::Missing("requests"))?;
        Config::new(url, requests, arg.concurrency)?.with_timeout(arg.timeout)
    }
}
