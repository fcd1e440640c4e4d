//! task module runs a whole load test: it wires the dispatcher, the worker
//! pool and the collector together and produces the final [Report]

use crate::collector::Collector;
use crate::config::Config;
use crate::dispatcher::CountDispatcher;
use crate::error::RunError;
use crate::statistics::Report;
use crate::transport::{HttpTransport, Transport};
use crate::worker::Worker;
use indicatif::ProgressBar;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};

/// [RunState] tracks where a [Task] is in its single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Draining,
    Complete,
}

pub struct Task<T: Transport = HttpTransport> {
    config: Config,
    transport: Arc<T>,
    state: RunState,
    progress: Option<ProgressBar>,
}

impl Task<HttpTransport> {
    pub fn new(config: Config) -> crate::error::Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Task<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            state: RunState::Idle,
            progress: None,
        }
    }

    /// show run progress on `progress`, its length is set when the run starts
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, state: RunState) {
        debug!("task state {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// send every configured request and return the finalized report. A task
    /// can only run once, and a run in which a worker dies is an error since
    /// some of its tokens never produced a result.
    pub async fn run(&mut self) -> Result<Report, RunError> {
        if self.state != RunState::Idle {
            return Err(RunError::AlreadyStarted);
        }
        let start = Instant::now();
        self.transition(RunState::Running);

        let requests = self.config.requests;
        let concurrency = self.config.concurrency.max(1);
        info!(
            "sending {} requests to {} with {} workers",
            requests, self.config.url, concurrency
        );

        let dispatcher = Arc::new(CountDispatcher::new(requests));
        let (token_tx, token_rx) = mpsc::channel(concurrency as usize);
        let token_rx = Arc::new(Mutex::new(token_rx));
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let mut collector = Collector::new();
        if let Some(progress) = &self.progress {
            progress.set_length(requests);
            collector = collector.with_progress(progress.clone());
        }
        let collector = tokio::spawn(collector.run(result_rx));

        let url = Arc::new(self.config.url.clone());
        let workers: Vec<_> = (0..concurrency)
            .map(|id| {
                let worker = Worker::new(
                    id,
                    url.clone(),
                    self.transport.clone(),
                    token_rx.clone(),
                    result_tx.clone(),
                    dispatcher.clone(),
                );
                tokio::spawn(worker.run())
            })
            .collect();
        // only workers hold the receiver, if they all die the dispatcher stops
        drop(token_rx);
        drop(result_tx);

        let feeder = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.dispatch(token_tx).await })
        };
        if let Err(e) = feeder.await {
            error!("dispatcher task failed: {}", e);
        }
        self.transition(RunState::Draining);

        // workers exit once the closed token channel is empty
        let mut failure = None;
        for worker in workers {
            if let Err(e) = worker.await {
                error!("worker task failed: {}", e);
                failure.get_or_insert_with(|| e.to_string());
            }
        }

        let accumulated = collector.await;
        self.transition(RunState::Complete);
        if let Some(reason) = failure {
            return Err(RunError::WorkerFailed(reason));
        }
        let (mut report, total_duration) = accumulated.map_err(|e| {
            error!("collector task failed: {}", e);
            RunError::CollectorFailed(e.to_string())
        })?;
        if !dispatcher.is_done() {
            return Err(RunError::WorkerFailed(format!(
                "{} of {} requests completed",
                dispatcher.completed(),
                requests
            )));
        }

        finalize(&mut report, requests, total_duration);
        report.total_time = start.elapsed();

        info!(
            "finished {} requests in {:?}",
            report.total_requests, report.total_time
        );
        Ok(report)
    }
}

/// stamp totals and the average once every result has been recorded
fn finalize(report: &mut Report, requests: u64, total_duration: Duration) {
    report.total_requests = requests;
    if requests > 0 {
        let average = total_duration.as_nanos() / requests as u128;
        report.average_duration = Duration::from_nanos(average as u64);
    }
    if report.recorded() == 0 {
        report.min_duration = Duration::ZERO;
    }
}
