use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use uuid::Uuid;

pub fn session_router() -> Router {
    Router::new().route("/session", post(new_session))
}

//hands the storefront an opaque id to present as X-Session-Id
async fn new_session() -> impl IntoResponse {
    let session_id = Uuid::new_v4().to_string();
    (
        StatusCode::CREATED,
        Json(json!({
            "session_id": session_id
        })),
    )
}
