//! Axum route handlers for the Format API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::formatter::html::render_html;
use crate::formatter::{format, Block};

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub blocks: Vec<Block>,
    pub html: String,
}

impl FormatResponse {
    pub fn from_text(text: &str) -> Self {
        let blocks = format(text);
        let html = render_html(&blocks);
        Self { blocks, html }
    }
}

/// POST /api/v1/format
///
/// Formats text the editor already holds (e.g. after a local edit).
/// Never fails: empty text returns no blocks.
pub async fn handle_format(Json(request): Json<FormatRequest>) -> Json<FormatResponse> {
    Json(FormatResponse::from_text(&request.text))
}
