//! HTTP server for the bridge transaction builder.
//!
//! Exposes `POST /builder`, which turns a JSON build request into a signed
//! base64 envelope, and `GET /health`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::BridgeServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use bridge_horizon::StaticAccountLoader;
    use bridge_types::AccountId;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        let loader = StaticAccountLoader::new()
            .with_account(AccountId::parse("GSOURCE").unwrap(), "42");
        BridgeServer::with_loader(ServerConfig::default(), Arc::new(loader)).router()
    }

    async fn post_builder(body: impl Into<Body>) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/builder")
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn payment_request(sequence: &str) -> String {
        json!({
            "source": "GSOURCE",
            "sequence_number": sequence,
            "operations": [{
                "type": "payment",
                "body": {"destination": "GDEST", "amount": "12.5", "asset": "native"}
            }],
            "signers": ["0707070707070707070707070707070707070707070707070707070707070707"],
        })
        .to_string()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn builds_envelope() {
        let (status, body) = post_builder(payment_request("5")).await;
        assert_eq!(status, StatusCode::OK);
        let encoded = body["transaction_envelope"].as_str().unwrap();
        let envelope = bridge_tx::TransactionEnvelope::from_base64(encoded).unwrap();
        assert_eq!(envelope.tx.sequence.value(), 5);
        assert_eq!(envelope.signatures.len(), 1);
    }

    #[tokio::test]
    async fn looks_up_missing_sequence() {
        let (status, body) = post_builder(payment_request("")).await;
        assert_eq!(status, StatusCode::OK);
        let encoded = body["transaction_envelope"].as_str().unwrap();
        let envelope = bridge_tx::TransactionEnvelope::from_base64(encoded).unwrap();
        assert_eq!(envelope.tx.sequence.value(), 42);
    }

    #[tokio::test]
    async fn zero_sequence_is_bad_request() {
        let (status, body) = post_builder(payment_request("0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "code": "invalid_parameter",
                "message": "Sequence number is invalid",
                "data": {"name": "sequence_number", "value": "0"}
            })
        );
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = post_builder("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "malformed_request");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn missing_parameter_names_field() {
        let (status, body) = post_builder(json!({"operations": []}).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "missing_parameter");
        assert_eq!(body["data"]["name"], "source");
    }

    #[tokio::test]
    async fn composition_failure_is_opaque() {
        let request = json!({
            "source": "GSOURCE",
            "sequence_number": "3",
            "operations": [
                {"type": "account_merge", "body": {"destination": "GDEST"}},
                {"type": "inflation"},
            ],
        });
        let (status, body) = post_builder(request.to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "internal_server_error");
        assert!(!body.to_string().contains("GSOURCE"));
    }

    #[tokio::test]
    async fn builder_rejects_get() {
        let response = app()
            .oneshot(Request::builder().uri("/builder").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
