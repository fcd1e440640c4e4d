//! collector module folds every [RequestResult] into the [Report]

use crate::statistics::{Report, RequestResult};
use indicatif::ProgressBar;
use log::trace;
use std::time::Duration;
use tokio::sync::mpsc;

/// [Collector] owns the report while a run is in progress
pub struct Collector {
    report: Report,

    /// sum of every recorded duration, used for the average
    total_duration: Duration,

    progress: Option<ProgressBar>,
}

impl Collector {
    pub fn new() -> Collector {
        Self {
            report: Report::new(),
            total_duration: Duration::ZERO,
            progress: None,
        }
    }

    /// advance `progress` for every recorded result
    pub fn with_progress(mut self, progress: ProgressBar) -> Collector {
        self.progress = Some(progress);
        self
    }

    pub fn record(&mut self, result: RequestResult) {
        let report = &mut self.report;
        *report.status_code_count.entry(result.status_code).or_insert(0) += 1;
        if result.is_success() {
            report.success_requests += 1;
        } else {
            report.failed_requests += 1;
        }

        if result.duration < report.min_duration {
            report.min_duration = result.duration;
        }
        if result.duration > report.max_duration {
            report.max_duration = result.duration;
        }
        self.total_duration += result.duration;

        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
        trace!(
            "recorded status {} in {:?}",
            result.status_code,
            result.duration
        );
    }

    /// drain `results` until every sender is dropped, then hand back the
    /// accumulated report and duration sum
    pub async fn run(
        mut self,
        mut results: mpsc::UnboundedReceiver<RequestResult>,
    ) -> (Report, Duration) {
        while let Some(result) = results.recv().await {
            self.record(result);
        }
        if let Some(progress) = &self.progress {
            progress.finish();
        }
        (self.report, self.total_duration)
    }
}

impl Default for Collector {
    fn default() -> Self {
        Collector::new()
    }
}
