/// Generation Client: the single point of entry for calls to the remote
/// text-generation service.
///
/// One request per call, no retries. Every outcome, including network
/// faults and unparseable bodies, resolves to a classified `GenerationResult`.
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::models::generation::{GeneratedText, GenerationRequest};

pub mod transport;

pub use transport::{RawResponse, ReqwestTransport, Transport};

pub const GENERATE_PATH: &str = "/api/blog/generate";
/// Status recorded for faults that never produced an HTTP status.
pub const TRANSPORT_FAULT_STATUS: u16 = 500;
const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Network failure or an unparseable response.
    #[error("transport fault: {message}")]
    Transport { message: String },

    /// Non-2xx status from the generation service.
    #[error("generation service error (status {status}): {message}")]
    Service { status: u16, message: String },
}

impl GenerationError {
    pub fn status_code(&self) -> u16 {
        match self {
            GenerationError::Transport { .. } => TRANSPORT_FAULT_STATUS,
            GenerationError::Service { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GenerationError::Transport { message } | GenerationError::Service { message, .. } => {
                message
            }
        }
    }
}

pub type GenerationResult = Result<GeneratedText, GenerationError>;

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl GenerationClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: &str) -> Self {
        Self {
            transport,
            endpoint: format!("{}{GENERATE_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the draft to the generation service and classifies the outcome.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let body = match serde_json::to_value(request) {
            Ok(body) => body,
            Err(e) => return Err(transport_fault(e.to_string())),
        };

        let response = match self.transport.post_json(&self.endpoint, &body).await {
            Ok(response) => response,
            Err(fault) => return Err(transport_fault(fault.to_string())),
        };

        if !(200..300).contains(&response.status) {
            let message = service_message(&response);
            warn!(
                "Generation service returned {}: {}",
                response.status, response.body
            );
            return Err(GenerationError::Service {
                status: response.status,
                message,
            });
        }

        match serde_json::from_str::<GeneratedText>(&response.body) {
            Ok(generated) => {
                debug!(
                    "Generation succeeded: status={}, chars={}",
                    generated.status,
                    generated.text.chars().count()
                );
                Ok(generated)
            }
            Err(e) => Err(transport_fault(format!("malformed response body: {e}"))),
        }
    }
}

fn transport_fault(message: String) -> GenerationError {
    error!("Generation transport fault: {message}");
    let message = if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    };
    GenerationError::Transport { message }
}

/// Body `message`, else the reason phrase, else a generic fallback.
fn service_message(response: &RawResponse) -> String {
    serde_json::from_str::<ServiceErrorBody>(&response.body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .or_else(|| response.reason.clone().filter(|r| !r.is_empty()))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
