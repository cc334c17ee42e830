//! Route definitions
//!
//! Builds the application router and applies the middleware stack. Handlers
//! translate typed service outcomes into HTTP; they hold no business logic.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Largest accepted request body. The biggest legitimate payload is a
/// registration request; anything near this size is garbage.
const MAX_BODY_BYTES: usize = 64 * 1024;

mod auth;
mod exercise;
mod health;
mod relax;
mod relax_type;
mod user;

pub use auth::auth_routes;
pub use exercise::exercise_routes;
pub use relax::relax_routes;
pub use relax_type::relax_type_routes;
pub use user::user_routes;

/// Pagination query parameters shared by the listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/auth", auth_routes())
        .nest("/exercises", exercise_routes())
        .nest("/relax", relax_routes())
        .nest("/relax-types", relax_type_routes())
        .nest("/users", user_routes())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
