use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Opaque per-browser cart identity. Carts and checkout sessions are keyed
/// by whatever value the client presents, a UUID from `POST /api/session`
/// in practice.
#[derive(Clone, Debug)]
pub struct SessionId(pub String);

pub async fn session_middleware(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let session_id = req
        .headers()
        .get("X-Session-Id")
        .and_then(|header| header.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(|value| value.to_owned());

    let session_id = match session_id {
        Some(value) => value,
        None => return Err(StatusCode::UNAUTHORIZED),
    };

    req.extensions_mut().insert(SessionId(session_id));
    Ok(next.run(req).await)
}
