use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bridge_builder::TransactionBuilder;
use bridge_protocol::endpoints;

use crate::config::ServerConfig;
use crate::handler;

/// Build the axum router with all bridge endpoints.
pub fn build_router(builder: Arc<TransactionBuilder>, config: &ServerConfig) -> Router {
    Router::new()
        .route(endpoints::BUILDER, post(handler::builder_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .with_state(builder)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
}
