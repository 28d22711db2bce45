use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::entities::menu_item::{AddOn, MenuItem};
use crate::entities::AppState;

pub fn menu_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/menu", get(get_menu))
        .route("/menu/:id", get(get_menu_item))
        .layer(Extension(state))
}

async fn get_menu(
    Query(params): Query<GetMenuQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    let mut items: Vec<MenuItem> = state.menu.clone();

    //unavailable items stay listed, the storefront greys them out
    if let Some(category) = &params.category {
        items.retain(|item| item.category == *category);
    }

    if Some(true) == params.popular {
        items.retain(|item| item.popular);
    }

    if Some(true) == params.available {
        items.retain(|item| item.available);
    }

    if let Some(min) = params.min {
        items.retain(|item| item.effective_price() >= min);
    }

    if let Some(max) = params.max {
        items.retain(|item| item.effective_price() <= max);
    }

    (StatusCode::OK, Json(items)).into_response()
}

async fn get_menu_item(
    Path(id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    match state.menu_item(&id) {
        Some(item) => (
            StatusCode::OK,
            Json(MenuItemResponse::new(item.clone())),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No menu item with {} id was found.", id)
            })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct GetMenuQuery {
    category: Option<String>,
    popular: Option<bool>,
    available: Option<bool>,
    min: Option<f32>,
    max: Option<f32>,
}

#[derive(Serialize)]
struct MenuItemResponse {
    #[serde(flatten)]
    item: MenuItem,
    effective_price: f32,
    add_on_groups: Vec<AddOnGroup>,
}

#[derive(Serialize)]
struct AddOnGroup {
    category: String,
    add_ons: Vec<AddOn>,
}

impl MenuItemResponse {
    fn new(item: MenuItem) -> MenuItemResponse {
        let effective_price = item.effective_price();
        let add_on_groups = item
            .grouped_add_ons()
            .into_iter()
            .map(|(category, add_ons)| AddOnGroup {
                category,
                add_ons: add_ons.into_iter().cloned().collect(),
            })
            .collect();
        MenuItemResponse {
            item,
            effective_price,
            add_on_groups,
        }
    }
}
