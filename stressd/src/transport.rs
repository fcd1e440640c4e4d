//! transport module abstracts how a single GET request reaches the server

use crate::config::Config;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, Url};

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// what a completed exchange hands back before its body is released
    type Response: Send;

    /// issue one GET request, resolving once the response head arrives or
    /// the request fails
    async fn get(&self, url: &Url) -> crate::error::Result<Self::Response>;

    /// the status code the server answered with
    fn status_code(&self, response: &Self::Response) -> u16;

    /// read and drop whatever is left of the response so the connection can
    /// be reused
    async fn release(&self, response: Self::Response);
}

/// [HttpTransport] sends requests with a shared [reqwest::Client]
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        Ok(Self {
            client: Self::build_client(config)?,
        })
    }

    fn build_client(config: &Config) -> crate::error::Result<Client> {
        let builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .pool_max_idle_per_host(config.concurrency as usize);

        match builder.build() {
            Ok(client) => Ok(client),
            Err(e) => Err(Box::new(e)),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Response = Response;

    async fn get(&self, url: &Url) -> crate::error::Result<Response> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(response)
    }

    fn status_code(&self, response: &Response) -> u16 {
        response.status().as_u16()
    }

    async fn release(&self, response: Response) {
        if let Err(e) = response.bytes().await {
            debug!("failed to drain response body: {}", e);
        }
    }
}
