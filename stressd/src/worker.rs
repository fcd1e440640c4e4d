//! worker module sends one request for every token it receives

use crate::dispatcher::{CountDispatcher, Token};
use crate::statistics::{RequestResult, TRANSPORT_FAILURE};
use crate::transport::Transport;
use log::{debug, error};
use reqwest::Url;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};

/// tokens are shared by every worker, whoever locks first receives next
pub type TokenReceiver = Arc<Mutex<mpsc::Receiver<Token>>>;

pub struct Worker<T: Transport> {
    id: u32,
    url: Arc<Url>,
    transport: Arc<T>,
    tokens: TokenReceiver,
    results: mpsc::UnboundedSender<RequestResult>,
    dispatcher: Arc<CountDispatcher>,
}

impl<T: Transport> Worker<T> {
    pub fn new(
        id: u32,
        url: Arc<Url>,
        transport: Arc<T>,
        tokens: TokenReceiver,
        results: mpsc::UnboundedSender<RequestResult>,
        dispatcher: Arc<CountDispatcher>,
    ) -> Self {
        Self {
            id,
            url,
            transport,
            tokens,
            results,
            dispatcher,
        }
    }

    async fn next_token(&self) -> Option<Token> {
        self.tokens.lock().await.recv().await
    }

    /// send a single request and measure it, the body is released after the
    /// clock stops
    pub async fn send(&self) -> RequestResult {
        let req_at = Instant::now();
        let response = self.transport.get(&self.url).await;
        let duration = req_at.elapsed();

        match response {
            Ok(response) => {
                let status_code = self.transport.status_code(&response);
                self.transport.release(response).await;
                RequestResult::new(status_code, duration)
            },
            Err(e) => {
                debug!("worker {} request failed: {}", self.id, e);
                RequestResult::new(TRANSPORT_FAILURE, duration)
            },
        }
    }

    /// keep handling tokens until the work channel is closed and empty,
    /// returns the number of requests sent
    pub async fn run(self) -> u64 {
        let mut handled = 0;
        while let Some(Token) = self.next_token().await {
            let result = self.send().await;
            if self.results.send(result).is_err() {
                error!("worker {} lost the result channel", self.id);
            }
            handled += 1;
            self.dispatcher.complete_job();
        }
        debug!("worker {} exits after {} requests", self.id, handled);
        handled
    }
}
