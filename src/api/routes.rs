use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the add-on router with all resource routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/catalog/:type/:catalog_id/:extra", get(handlers::catalog))
        .route("/meta/:type/:id", get(handlers::meta))
        .route("/stream/:type/:id", get(handlers::stream))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                // Add-on hosts call from arbitrary origins
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
