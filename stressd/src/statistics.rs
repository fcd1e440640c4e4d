//! mod statistics defines the result of a single request and the [Report]
//! summarising a whole run

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// status code recorded when the request never got an http response
pub const TRANSPORT_FAILURE: u16 = 0;

/// starting value for the minimum, any recorded duration lowers it
pub(crate) const MIN_DURATION_SENTINEL: Duration = Duration::MAX;

/// [RequestResult] is produced once for every request attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestResult {
    /// server status code, or [TRANSPORT_FAILURE]
    pub status_code: u16,

    /// time between sending the request and receiving the response or error
    pub duration: Duration,
}

impl RequestResult {
    pub fn new(status_code: u16, duration: Duration) -> Self {
        Self {
            status_code,
            duration,
        }
    }

    /// only an exact 200 counts as a success
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// [StatusClass] groups status codes by their hundred
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusClass {
    /// codes outside 100..=599 belong to no class
    pub fn of(status_code: u16) -> Option<StatusClass> {
        match status_code {
            100..=199 => Some(StatusClass::Informational),
            200..=299 => Some(StatusClass::Success),
            300..=399 => Some(StatusClass::Redirection),
            400..=499 => Some(StatusClass::ClientError),
            500..=599 => Some(StatusClass::ServerError),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StatusClass::Informational => "1xx",
            StatusClass::Success => "2xx",
            StatusClass::Redirection => "3xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
        }
    }
}

/// [Report] aggregates every [RequestResult] of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total_requests: u64,
    pub success_requests: u64,
    pub failed_requests: u64,

    /// wall clock time of the whole run
    pub total_time: Duration,

    pub status_code_count: BTreeMap<u16, u64>,

    pub average_duration: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
}

impl Report {
    pub fn new() -> Report {
        Self {
            total_requests: 0,
            success_requests: 0,
            failed_requests: 0,
            total_time: Duration::ZERO,
            status_code_count: BTreeMap::new(),
            average_duration: Duration::ZERO,
            min_duration: MIN_DURATION_SENTINEL,
            max_duration: Duration::ZERO,
        }
    }

    /// number of results that have been recorded so far
    pub fn recorded(&self) -> u64 {
        self.success_requests + self.failed_requests
    }

    /// share of 200 responses, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.success_requests as f64 / self.total_requests as f64 * 100.0
    }

    pub fn requests_per_second(&self) -> f64 {
        let seconds = self.total_time.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.total_requests as f64 / seconds
    }

    /// requests that failed before any response arrived
    pub fn transport_failures(&self) -> u64 {
        self.status_code_count
            .get(&TRANSPORT_FAILURE)
            .copied()
            .unwrap_or(0)
    }

    /// nonzero counts of 1xx..5xx status codes grouped by class
    pub fn status_classes(&self) -> BTreeMap<StatusClass, Vec<(u16, u64)>> {
        let mut classes: BTreeMap<StatusClass, Vec<(u16, u64)>> =
            BTreeMap::new();
        for (&code, &count) in &self.status_code_count {
            if count == 0 {
                continue;
            }
            if let Some(class) = StatusClass::of(code) {
                classes.entry(class).or_default().push((code, count));
            }
        }
        classes
    }
}

impl Default for Report {
    fn default() -> Self {
        Report::new()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "LOAD TEST REPORT")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;

        writeln!(f, "Total time:        {:?}", self.total_time)?;
        writeln!(f, "Total requests:    {}", self.total_requests)?;
        writeln!(
            f,
            "Status 200:        {} ({:.2}%)",
            self.success_requests,
            self.success_rate()
        )?;
        writeln!(f, "Failed requests:   {}", self.failed_requests)?;
        writeln!(f)?;

        writeln!(f, "Duration:")?;
        writeln!(f, "  Min:   {:?}", self.min_duration)?;
        writeln!(f, "  Avg:   {:?}", self.average_duration)?;
        writeln!(f, "  Max:   {:?}", self.max_duration)?;
        writeln!(f)?;

        writeln!(f, "Status code distribution:")?;
        for (class, codes) in self.status_classes() {
            for (code, count) in codes {
                writeln!(f, "  [{}] {}: {} requests", class.label(), code, count)?;
            }
        }
        let failures = self.transport_failures();
        if failures > 0 {
            writeln!(f, "  transport errors: {} requests", failures)?;
        }
        writeln!(f)?;

        writeln!(f, "Requests/sec:      {:.2}", self.requests_per_second())?;
        writeln!(f, "{}", rule)
    }
}
