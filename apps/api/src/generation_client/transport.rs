//! HTTP transport seam for the generation client.
//!
//! The client only needs one operation: POST a JSON body and read back the
//! status line and body. Keeping that behind a trait lets tests substitute a
//! scripted transport without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// A fault raised before a complete HTTP response was available.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportFault(pub String);

impl From<reqwest::Error> for TransportFault {
    fn from(e: reqwest::Error) -> Self {
        TransportFault(e.to_string())
    }
}

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Reason phrase for `status`, when one is known.
    pub reason: Option<String>,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportFault>;
}

/// Production transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// `timeout: None` leaves reqwest's default (no overall timeout) in place.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportFault> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportFault> {
        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}
