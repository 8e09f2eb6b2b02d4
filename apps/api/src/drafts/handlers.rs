//! Axum route handlers for the Drafts API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::drafts::session::Submission;
use crate::errors::AppError;
use crate::formatter::handlers::FormatResponse;
use crate::formatter::Block;
use crate::models::generation::{Category, ContentType, GenerationRequest, StyleTag};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/v1/drafts/expand`.
///
/// The category arrives as either `"type"` or `"contentType"`, exactly as it
/// is forwarded to the generation service. Both are captured so a body
/// carrying both can be rejected.
#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub draft: String,
    #[serde(rename = "type")]
    pub style: Option<StyleTag>,
    #[serde(rename = "contentType")]
    pub content_type: Option<ContentType>,
    /// Editor session; a newer request in the same session supersedes this one.
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub text: String,
    pub status: String,
    pub blocks: Vec<Block>,
    pub html: String,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/drafts/expand
///
/// Sends the draft to the generation service and returns the generated text
/// together with its formatted blocks and HTML.
pub async fn handle_expand(
    State(state): State<AppState>,
    Json(request): Json<ExpandRequest>,
) -> Result<Json<ExpandResponse>, AppError> {
    let category = Category::from_fields(request.style, request.content_type)?;
    let generation_request =
        GenerationRequest::for_scheme(&request.draft, category, state.config.category_scheme)?;

    let generated = match request.session_id {
        Some(session_id) => {
            let session = state.sessions.session(session_id).await;
            match session
                .submit(state.generation.clone(), generation_request)
                .await
            {
                Submission::Completed(result) => result?,
                Submission::Superseded => {
                    info!("Expand request superseded in session {session_id}");
                    return Err(AppError::Superseded);
                }
            }
        }
        None => state.generation.generate(&generation_request).await?,
    };

    let formatted = FormatResponse::from_text(&generated.text);
    info!(
        "Draft expanded: {} chars into {} blocks",
        generated.text.chars().count(),
        formatted.blocks.len()
    );

    Ok(Json(ExpandResponse {
        text: generated.text,
        status: generated.status,
        blocks: formatted.blocks,
        html: formatted.html,
        generated_at: Utc::now(),
    }))
}
