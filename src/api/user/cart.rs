use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::entities::cart::Cart;
use crate::entities::customization::AddOnSelection;
use crate::entities::menu_item::{MenuItem, Variation};
use crate::entities::AppState;
use crate::middleware::logging::{to_response, ApiError};
use crate::middleware::session::SessionId;

//ROUTERS
pub fn cart_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_item).delete(clear_cart))
        .route("/cart/quote", post(quote_price))
        .route("/cart/:id", patch(patch_line).delete(remove_line))
        .layer(Extension(state))
}

async fn get_cart(
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Response {
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

    let (items, total_price) = match carts.get(&session_id) {
        Some(cart) => (cart.items().to_vec(), cart.get_total_price()),
        None => (Vec::new(), 0.0),
    };

    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "items": items,
                "total_price": total_price
            })),
        ),
        Ok(()),
    )
}

async fn add_item(
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(payload): Json<AddToCart>,
) -> Response {
    tracing::debug!("Called `add_item` with payload: {:?}", payload);

    if let Err(errors) = payload.validate() {
        return to_response(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Quantity should be greater than 0"
                })),
            ),
            Err(ApiError::ValidationFail(errors.to_string())),
        );
    }

    let (item, variation, selection) =
        match resolve_customization(&state, &payload.item_id, &payload.variation_id, &payload.add_ons)
        {
            Ok(resolved) => resolved,
            Err(response) => return response,
        };

    if !item.available {
        return to_response(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("{} is currently unavailable", item.name)
                })),
            ),
            Err(ApiError::ValidationFail(format!(
                "item {} unavailable",
                item.id
            ))),
        );
    }

    let mut carts = match state.carts.lock() {
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

    let cart = carts.entry(session_id).or_insert_with(Cart::new);
    let line = cart.add_to_cart(&item, payload.quantity, variation, selection.into_picks());

    to_response(
        (
            StatusCode::CREATED,
            Json(json!({
                "message": "Added successfully",
                "item": line
            })),
        ),
        Ok(()),
    )
}

async fn patch_line(
    Path(id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(payload): Json<PatchCart>,
) -> Response {
    let mut carts = match state.carts.lock() {
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

    //quantity 0 removes the line, negative values are unrepresentable
    let patched = carts
        .get_mut(&session_id)
        .map(|cart| cart.update_quantity(&id, payload.quantity))
        .unwrap_or(false);

    if patched {
        to_response(
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Resource patched successfully"
                })),
            ),
            Ok(()),
        )
    } else {
        to_response(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("No related entry with {} id was found.", id)
                })),
            ),
            Err(ApiError::UnknownResource(format!("cart line {id}"))),
        )
    }
}

async fn remove_line(
    Path(id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Response {
    let mut carts = match state.carts.lock() {
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

    //removal is unconditional, absent ids are a no-op
    if let Some(cart) = carts.get_mut(&session_id) {
        cart.remove_from_cart(&id);
    }

    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "message": "Resource deleted successfully"
            })),
        ),
        Ok(()),
    )
}

async fn clear_cart(
    Extension(state): Extension<Arc<AppState>>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Response {
    let mut carts = match state.carts.lock() {
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

    if let Some(cart) = carts.get_mut(&session_id) {
        cart.clear_cart();
    }

    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "message": "Cart cleared"
            })),
        ),
        Ok(()),
    )
}

async fn quote_price(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<QuoteRequest>,
) -> Response {
    let (item, variation, selection) =
        match resolve_customization(&state, &payload.item_id, &payload.variation_id, &payload.add_ons)
        {
            Ok(resolved) => resolved,
            Err(response) => return response,
        };

    let total_price = selection.calculate_price(&item, variation.as_ref());

    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "total_price": total_price
            })),
        ),
        Ok(()),
    )
}

/// Looks up the item, the chosen variation and the add-on picks against the
/// catalog. With no explicit variation the first one is preselected, the
/// way the storefront's customization dialog does it.
fn resolve_customization(
    state: &AppState,
    item_id: &str,
    variation_id: &Option<String>,
    add_ons: &[AddOnPick],
) -> Result<(MenuItem, Option<Variation>, AddOnSelection), Response> {
    let item = match state.menu_item(item_id) {
        Some(item) => item.clone(),
        None => {
            return Err(to_response(
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!("No menu item with {} id was found", item_id)
                    })),
                ),
                Err(ApiError::UnknownResource(format!("menu item {item_id}"))),
            ));
        }
    };

    let variation = match variation_id {
        Some(variation_id) => match item.variation(variation_id) {
            Some(variation) => Some(variation.clone()),
            None => {
                return Err(to_response(
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": format!("No variation with {} id was found", variation_id)
                        })),
                    ),
                    Err(ApiError::UnknownResource(format!(
                        "variation {variation_id}"
                    ))),
                ));
            }
        },
        None => item.variations.first().cloned(),
    };

    let mut selection = AddOnSelection::new();
    for pick in add_ons {
        match item.add_on(&pick.id) {
            Some(add_on) => selection.set_quantity(add_on, pick.quantity),
            None => {
                return Err(to_response(
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": format!("No add-on with {} id was found", pick.id)
                        })),
                    ),
                    Err(ApiError::UnknownResource(format!("add-on {}", pick.id))),
                ));
            }
        }
    }

    Ok((item, variation, selection))
}

//Structs
#[derive(Deserialize, Debug, Validate)]
struct AddToCart {
    item_id: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    quantity: u32,
    variation_id: Option<String>,
    #[serde(default)]
    add_ons: Vec<AddOnPick>,
}

#[derive(Deserialize, Debug)]
struct QuoteRequest {
    item_id: String,
    variation_id: Option<String>,
    #[serde(default)]
    add_ons: Vec<AddOnPick>,
}

#[derive(Deserialize, Debug)]
struct AddOnPick {
    id: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Deserialize)]
struct PatchCart {
    quantity: u32,
}
