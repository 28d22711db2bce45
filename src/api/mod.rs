pub mod public;
pub mod user;

use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::entities::AppState;
use crate::middleware::logging::logging_middleware;
use public::public_api_router;
use user::user_api_router;

pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", public_api_router(state.clone()))
        .nest("/api", user_api_router(state.clone()))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
