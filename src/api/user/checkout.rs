use axum::{
    extract::Extension,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::entities::order::{
    compose_order_message, messenger_link, CheckoutSession, CheckoutStep, OrderDetails, PickupTime,
    ServiceType,
};
use crate::entities::AppState;
use crate::middleware::logging::{to_response, ApiError};
use crate::middleware::session::SessionId;

//ROUTERS
pub fn checkout_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/checkout", get(get_checkout))
        .route("/checkout/details", post(submit_details))
        .route("/checkout/back", post(back_to_details))
        .route("/checkout/place", post(place_order))
        .layer(Extension(state))
}

async fn get_checkout(
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Response {
    let checkouts = match state.checkouts.lock() {
        Ok(checkouts) => checkouts,
        Err(_) => {
            return to_response(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error"
                    })),
                ),
                Err(ApiError::LockPoisoned),
            );
        }
    };

    let session = checkouts
        .get(&session_id)
        .cloned()
        .unwrap_or_else(CheckoutSession::new);

    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "step": session.step,
                "details": session.details
            })),
        ),
        Ok(()),
    )
}

async fn submit_details(
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(payload): Json<DetailsPayload>,
) -> Response {
    tracing::debug!("Called `submit_details` with payload: {:?}", payload);

    if let Err(errors) = payload.validate() {
        return to_response(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Name and contact number are required"
                })),
            ),
            Err(ApiError::ValidationFail(errors.to_string())),
        );
    }

    let dine_in_time = match parse_dine_in_time(&payload.dine_in_time) {
        Ok(value) => value,
        Err(_) => {
            return to_response(
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!("Invalid dine-in time: {}", payload.dine_in_time)
                    })),
                ),
                Err(ApiError::ValidationFail(format!(
                    "dine-in time {}",
                    payload.dine_in_time
                ))),
            );
        }
    };

    let details = OrderDetails {
        customer_name: payload.customer_name,
        contact_number: payload.contact_number,
        service_type: payload.service_type,
        address: payload.address,
        landmark: payload.landmark,
        pickup_time: payload.pickup_time,
        custom_time: payload.custom_time,
        //the form clamps, the predicate only requires > 0
        party_size: payload.party_size.clamp(1, 20),
        dine_in_time,
        notes: payload.notes,
    };

    let mut checkouts = match state.checkouts.lock() {
        Ok(checkouts) => checkouts,
        Err(_) => {
            return to_response(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error"
                    })),
                ),
                Err(ApiError::LockPoisoned),
            );
        }
    };

    let session = checkouts
        .entry(session_id)
        .or_insert_with(CheckoutSession::new);

    if session.submit_details(details) {
        to_response(
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Proceed to payment",
                    "step": CheckoutStep::Payment
                })),
            ),
            Ok(()),
        )
    } else {
        to_response(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Please complete the required order details"
                })),
            ),
            Err(ApiError::ValidationFail("order details incomplete".into())),
        )
    }
}

async fn back_to_details(
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Response {
    let mut checkouts = match state.checkouts.lock() {
        Ok(checkouts) => checkouts,
        Err(_) => {
            return to_response(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error"
                    })),
                ),
                Err(ApiError::LockPoisoned),
            );
        }
    };

    //payment -> details is always allowed
    let session = checkouts
        .entry(session_id)
        .or_insert_with(CheckoutSession::new);
    session.back_to_details();

    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "step": CheckoutStep::Details
            })),
        ),
        Ok(()),
    )
}

async fn place_order(
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(payload): Json<PlaceOrder>,
) -> Response {
    let details = {
        let checkouts = match state.checkouts.lock() {
            Ok(checkouts) => checkouts,
            Err(_) => {
                return to_response(
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "Internal server error"
                        })),
                    ),
                    Err(ApiError::LockPoisoned),
                );
            }
        };

        match checkouts.get(&session_id) {
            Some(session) if session.step == CheckoutStep::Payment => session.details.clone(),
            _ => None,
        }
    };

    let details = match details {
        Some(details) => details,
        None => {
            return to_response(
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Order details must be completed first"
                    })),
                ),
                Err(ApiError::CheckoutStep("place before payment step".into())),
            );
        }
    };

    let (items, total_price) = {
        let carts = match state.carts.lock() {
            Ok(carts) => carts,
            Err(_) => {
                return to_response(
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "Internal server error"
                        })),
                    ),
                    Err(ApiError::LockPoisoned),
                );
            }
        };

        match carts.get(&session_id) {
            Some(cart) if !cart.is_empty() => (cart.items().to_vec(), cart.get_total_price()),
            _ => {
                return to_response(
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "Cart is empty"
                        })),
                    ),
                    Err(ApiError::General("place with an empty cart".into())),
                );
            }
        }
    };

    //unknown ids fall back to the raw id, the storefront did the same
    let payment_method_name = state
        .payment_method(&payload.payment_method_id)
        .map(|method| method.name.clone())
        .unwrap_or_else(|| payload.payment_method_id.clone());

    let message = compose_order_message(
        &state.store.name,
        &items,
        &details,
        total_price,
        &payment_method_name,
    );
    let messenger_url = messenger_link(&state.store.messenger_handle, &message);

    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "message": message,
                "messenger_url": messenger_url
            })),
        ),
        Ok(()),
    )
}

fn parse_dine_in_time(raw: &str) -> Result<Option<NaiveDateTime>, chrono::ParseError> {
    if raw.is_empty() {
        return Ok(None);
    }
    //datetime-local inputs come without seconds
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(Some)
}

//Structs
#[derive(Deserialize, Debug, Validate)]
struct DetailsPayload {
    #[validate(length(min = 1))]
    customer_name: String,
    #[validate(length(min = 1))]
    contact_number: String,
    service_type: ServiceType,
    #[serde(default)]
    address: String,
    #[serde(default)]
    landmark: String,
    #[serde(default)]
    pickup_time: PickupTime,
    #[serde(default)]
    custom_time: String,
    #[serde(default = "default_party_size")]
    party_size: u32,
    #[serde(default)]
    dine_in_time: String,
    #[serde(default)]
    notes: String,
}

fn default_party_size() -> u32 {
    1
}

#[derive(Deserialize, Debug)]
struct PlaceOrder {
    payment_method_id: String,
}
