pub mod cart;
pub mod checkout;

use axum::{middleware::from_fn, Router};
use std::sync::Arc;

use crate::entities::AppState;
use crate::middleware::session::session_middleware;
use cart::cart_router;
use checkout::checkout_router;

pub fn user_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/", cart_router(state.clone()))
        .nest("/", checkout_router(state.clone()))
        .layer(from_fn(session_middleware))
}
