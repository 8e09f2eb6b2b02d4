pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::drafts::handlers::handle_expand;
use crate::formatter::handlers::handle_format;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/drafts/expand", post(handle_expand))
        .route("/api/v1/format", post(handle_format))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tokio::sync::Notify;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::generation_client::tests::{GatedTransport, MockTransport};
    use crate::generation_client::{GenerationClient, Transport};

    fn app(transport: MockTransport) -> Router {
        app_with(Arc::new(transport))
    }

    fn app_with(transport: Arc<dyn Transport>) -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let client = GenerationClient::new(transport, &config.generation_api_url);
        build_router(AppState::new(client, config))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app(MockTransport::failing("unused"))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_expand_returns_formatted_blocks() {
        let transport = MockTransport::replying(
            200,
            Some("OK"),
            r##"{"text": "# 스프링 부트\n\n- 자동 설정\n- 내장 서버", "status": "success"}"##,
        );
        let (status, body) = post_json(
            app(transport),
            "/api/v1/drafts/expand",
            json!({"draft": "Spring Boot", "type": "detailed"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["blocks"][0]["kind"], "heading");
        assert_eq!(body["blocks"][0]["text"], "스프링 부트");
        assert_eq!(body["blocks"][1]["kind"], "list");
        assert_eq!(body["blocks"][1]["items"][1], "내장 서버");
        assert!(body["html"].as_str().unwrap().starts_with("<h1>"));
    }

    #[tokio::test]
    async fn test_expand_within_session_completes() {
        let transport = MockTransport::replying(200, Some("OK"), r#"{"text": "done", "status": "ok"}"#);
        let (status, body) = post_json(
            app(transport),
            "/api/v1/drafts/expand",
            json!({
                "draft": "Spring Boot",
                "type": "creative",
                "session_id": "6f1c1f5e-8a55-4c34-9d0e-3c2f5a4e7b10"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocks"][0]["kind"], "paragraph");
    }

    #[tokio::test]
    async fn test_expand_rejects_blank_draft() {
        let (status, body) = post_json(
            app(MockTransport::failing("unused")),
            "/api/v1/drafts/expand",
            json!({"draft": "   ", "type": "concise"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_expand_rejects_inactive_category_scheme() {
        let (status, body) = post_json(
            app(MockTransport::failing("unused")),
            "/api/v1/drafts/expand",
            json!({"draft": "ramen", "contentType": 0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_expand_rejects_both_category_fields() {
        let (status, body) = post_json(
            app(MockTransport::failing("unused")),
            "/api/v1/drafts/expand",
            json!({"draft": "x", "type": "concise", "contentType": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_expand_rejects_missing_category() {
        let (status, body) = post_json(
            app(MockTransport::failing("unused")),
            "/api/v1/drafts/expand",
            json!({"draft": "x"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_expand_superseded_in_same_session_returns_conflict() {
        let entered = Arc::new(Notify::new());
        let app = app_with(Arc::new(GatedTransport {
            entered: entered.clone(),
        }));
        let session_id = Uuid::new_v4();

        let first = tokio::spawn(post_json(
            app.clone(),
            "/api/v1/drafts/expand",
            json!({"draft": "slow", "type": "concise", "session_id": session_id}),
        ));
        entered.notified().await;

        let (status, body) = post_json(
            app,
            "/api/v1/drafts/expand",
            json!({"draft": "fast", "type": "concise", "session_id": session_id}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "fast");

        let (status, body) = first.await.unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SUPERSEDED");
    }

    #[tokio::test]
    async fn test_expand_reports_upstream_failure() {
        let transport =
            MockTransport::replying(404, Some("Not Found"), r#"{"message":"not found"}"#);
        let (status, body) = post_json(
            app(transport),
            "/api/v1/drafts/expand",
            json!({"draft": "Spring Boot", "type": "detailed"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
        assert_eq!(body["error"]["status_code"], 404);
        assert_eq!(body["error"]["message"], "not found");
    }

    #[tokio::test]
    async fn test_expand_reports_transport_fault() {
        let (status, body) = post_json(
            app(MockTransport::failing("connection refused")),
            "/api/v1/drafts/expand",
            json!({"draft": "Spring Boot", "type": "detailed"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["status_code"], 500);
        assert_eq!(body["error"]["message"], "connection refused");
    }

    #[tokio::test]
    async fn test_format_endpoint() {
        let (status, body) = post_json(
            app(MockTransport::failing("unused")),
            "/api/v1/format",
            json!({"text": "**bold** and *italic*\n\n#태그"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocks"][0]["kind"], "styled_paragraph");
        assert_eq!(body["blocks"][0]["spans"][0]["kind"], "bold");
        assert_eq!(body["blocks"][1]["tags"][0], "#태그");
    }

    #[tokio::test]
    async fn test_format_endpoint_empty_text() {
        let (status, body) = post_json(
            app(MockTransport::failing("unused")),
            "/api/v1/format",
            json!({"text": "   "}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocks"], json!([]));
        assert_eq!(body["html"], "");
    }
}
