use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;

use bridge_builder::TransactionBuilder;
use bridge_protocol::{BuilderResponse, HealthResponse};

use crate::error::ApiError;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Build handler. The body is taken raw so decoding failures are reported
/// in the same error shape as every other failure.
pub async fn builder_handler(
    State(builder): State<Arc<TransactionBuilder>>,
    body: Bytes,
) -> Result<Json<BuilderResponse>, ApiError> {
    Ok(Json(builder.build_json(&body).await?))
}
