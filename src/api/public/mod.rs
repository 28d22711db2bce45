pub mod category;
pub mod menu;
pub mod payment;
pub mod session;

use axum::Router;
use std::sync::Arc;

use crate::entities::AppState;

use category::category_router;
use menu::menu_router;
use payment::payment_router;
use session::session_router;

pub fn public_api_router(state: Arc<AppState>) -> Router {
    let menu_router = menu_router(state.clone());
    let category_router = category_router(state.clone());
    let payment_router = payment_router(state.clone());
    let session_router = session_router();

    Router::new()
        .nest("/", menu_router)
        .nest("/", category_router)
        .nest("/", payment_router)
        .nest("/", session_router)
}
