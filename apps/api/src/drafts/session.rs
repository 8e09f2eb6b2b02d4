//! Per-editor draft sessions: the most recent submission wins.
//!
//! Each submit takes a ticket from a monotonically increasing counter and
//! aborts whatever generation is still in flight for the same session. A
//! result is only reported as `Completed` if its ticket is still the latest
//! when it resolves, so a stale response can never overwrite a newer one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, error};
use uuid::Uuid;

use crate::generation_client::{GenerationClient, GenerationError, GenerationResult};
use crate::models::generation::GenerationRequest;

#[derive(Debug)]
pub enum Submission {
    Completed(GenerationResult),
    /// A newer submission on the same session replaced this one.
    Superseded,
}

#[derive(Default)]
struct InFlight {
    ticket: u64,
    handle: Option<AbortHandle>,
}

#[derive(Default)]
pub struct DraftSession {
    in_flight: Mutex<InFlight>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&self, client: GenerationClient, request: GenerationRequest) -> Submission {
        // Ticket, spawn and handle swap happen under one lock so two racing
        // submits cannot abort each other out of order.
        let (ticket, task) = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.ticket += 1;
            let task = tokio::spawn(async move { client.generate(&request).await });
            if let Some(previous) = in_flight.handle.replace(task.abort_handle()) {
                previous.abort();
            }
            (in_flight.ticket, task)
        };

        let outcome = task.await;

        let mut in_flight = self.in_flight.lock().await;
        if in_flight.ticket != ticket {
            debug!("Draft submission {ticket} superseded by {}", in_flight.ticket);
            return Submission::Superseded;
        }
        in_flight.handle = None;

        match outcome {
            Ok(result) => Submission::Completed(result),
            Err(e) if e.is_cancelled() => Submission::Superseded,
            Err(e) => {
                error!("Generation task failed: {e}");
                Submission::Completed(Err(GenerationError::Transport {
                    message: format!("generation task failed: {e}"),
                }))
            }
        }
    }

    #[cfg(test)]
    async fn latest_ticket(&self) -> u64 {
        self.in_flight.lock().await.ticket
    }
}

struct SessionEntry {
    session: Arc<DraftSession>,
    last_used: DateTime<Utc>,
}

/// Maps editor session ids to their `DraftSession`.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Returns the session for `id`, creating it if needed. Sessions idle
    /// for longer than the TTL are dropped on the way.
    pub async fn session(&self, id: Uuid) -> Arc<DraftSession> {
        let now = Utc::now();

        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, entry| {
            (now - entry.last_used)
                .to_std()
                .map_or(true, |idle| idle <= self.idle_ttl)
        });

        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            session: Arc::new(DraftSession::new()),
            last_used: now,
        });
        entry.last_used = now;
        entry.session.clone()
    }

    #[cfg(test)]
    async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
