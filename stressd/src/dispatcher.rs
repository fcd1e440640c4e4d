//! dispatcher module hands out a fixed number of work tokens and tracks how
//! many of them have been completed

use log::{debug, error};
use std::sync::atomic::{AtomicU64, Ordering::*};
use tokio::sync::mpsc;

/// [Token] is the permission, and the obligation, to send one request
#[derive(Debug)]
pub struct Token;

/// [CountDispatcher] is a count based task dispatcher
pub struct CountDispatcher {
    /// total requests number will send to server
    total: u64,

    /// the amount of work done
    completed: AtomicU64,
}

impl CountDispatcher {
    /// give total, return [CountDispatcher]
    pub fn new(total: u64) -> Self {
        Self {
            total,
            completed: AtomicU64::new(0),
        }
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Acquire)
    }

    pub fn is_done(&self) -> bool {
        self.completed() >= self.total
    }

    /// push exactly `total` tokens into the work channel, waiting whenever it
    /// is full. The channel closes once `tokens` is dropped on return.
    /// Returns how many tokens were handed out, fewer than `total` only when
    /// every worker is gone.
    pub async fn dispatch(&self, tokens: mpsc::Sender<Token>) -> u64 {
        for sent in 0..self.total {
            if tokens.send(Token).await.is_err() {
                error!(
                    "work channel closed after {} of {} tokens",
                    sent, self.total
                );
                return sent;
            }
        }
        debug!("dispatched all {} tokens", self.total);
        self.total
    }

    /// when worker complete job, it will notify the dispatcher
    pub fn complete_job(&self) {
        self.completed.fetch_add(1, SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_dispatch_exact_count() {
        let dispatcher = CountDispatcher::new(7);
        let (tx, mut rx) = mpsc::channel(7);
        assert_eq!(dispatcher.dispatch(tx).await, 7);

        let mut received = 0;
        while rx.recv().await.is_some() {
            received += 1;
        }
        assert_eq!(received, 7);
    }

    #[tokio::test]
    async fn test_dispatch_blocks_on_full_channel() {
        let dispatcher = Arc::new(CountDispatcher::new(5));
        let (tx, mut rx) = mpsc::channel(2);

        let handle = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.dispatch(tx).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        let mut received = 0;
        while rx.recv().await.is_some() {
            received += 1;
        }
        assert_eq!(handle.await.unwrap(), 5);
        assert_eq!(received, 5);
    }

    #[tokio::test]
    async fn test_dispatch_stops_when_receiver_dropped() {
        let dispatcher = CountDispatcher::new(10);
        let (tx, rx) = mpsc::channel(3);
        drop(rx);
        assert_eq!(dispatcher.dispatch(tx).await, 0);
    }

    #[test]
    fn test_complete_job_counts_to_total() {
        let dispatcher = CountDispatcher::new(3);
        dispatcher.complete_job();
        dispatcher.complete_job();
        assert!(!dispatcher.is_done());
        dispatcher.complete_job();
        assert!(dispatcher.is_done());
        assert_eq!(dispatcher.completed(), 3);
    }

    #[test]
    fn test_zero_total_is_done_immediately() {
        assert!(CountDispatcher::new(0).is_done());
    }
}
