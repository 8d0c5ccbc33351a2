pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::errors::AppError;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match/score", post(scoring::handle_match_score))
        // ATS API
        .route("/api/v1/ats/checks", post(ats::handle_ats_checks))
        .fallback(not_found)
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
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::embedding::HashEmbedder;
    use crate::scoring::hybrid::HybridScorer;
    use crate::scoring::keyword::KeywordMatcher;
    use crate::text::{DefaultTokenizer, NoSynonyms, Tokenizer};

    fn test_router() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(DefaultTokenizer);
        let scorer = HybridScorer::new(
            Some(KeywordMatcher::new(tokenizer.clone(), Arc::new(NoSynonyms))),
            Some(Arc::new(HashEmbedder::new(config.embedding_dim, tokenizer))),
        );
        build_router(AppState {
            config,
            scorer: Arc::new(scorer),
        })
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = test_router()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resumatch");
    }

    #[tokio::test]
    async fn test_match_score_identical_texts() {
        let text = "Senior Rust engineer building distributed storage";
        let (status, body) = send(
            "POST",
            "/api/v1/match/score",
            Some(json!({ "job_description": text, "resume_text": text })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"]["keyword_score"], 100.0);
        assert_eq!(body["score"]["alpha"], 0.6);
        assert_eq!(body["score"]["keyword_status"], "computed");
        assert_eq!(body["overall_match"], 100);
        assert!(body["summary"].as_str().unwrap().starts_with("100.00"));
        assert!(body["scored_at"].is_string());
    }

    #[tokio::test]
    async fn test_match_score_empty_inputs_are_not_errors() {
        let (status, body) = send("POST", "/api/v1/match/score", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"]["hybrid_score"], 0.0);
        assert_eq!(body["score"]["semantic_status"], "empty_input");
    }

    #[tokio::test]
    async fn test_match_score_rejects_bad_alpha() {
        let (status, body) = send(
            "POST",
            "/api/v1/match/score",
            Some(json!({ "job_description": "rust", "resume_text": "rust", "alpha": 1.5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ats_checks() {
        let (status, body) = send(
            "POST",
            "/api/v1/ats/checks",
            Some(json!({ "resume_text": "Jane Doe\nSkills\nRust\nExperience\n- Shipped 3 services" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bullets"]["total"], 1);
        assert_eq!(body["sections"]["found"], json!(["Skills", "Experience"]));
        assert_eq!(body["formatting_score"], 55);
    }

    #[tokio::test]
    async fn test_ats_checks_rejects_empty_text() {
        let (status, body) = send(
            "POST",
            "/api/v1/ats/checks",
            Some(json!({ "resume_text": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = send("GET", "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
