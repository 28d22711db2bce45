use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::entities::AppState;

pub fn payment_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/payment-method", get(get_payment_methods))
        .route("/payment-method/:id", get(get_payment_method))
        .layer(Extension(state))
}

async fn get_payment_methods(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.payment_methods.clone())).into_response()
}

async fn get_payment_method(
    Path(id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    match state.payment_method(&id) {
        Some(method) => (StatusCode::OK, Json(method.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No payment method with {} id was found.", id)
            })),
        )
            .into_response(),
    }
}
