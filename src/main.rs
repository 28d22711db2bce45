use std::sync::Arc;

use messy_bite::api::create_api_router;
use messy_bite::entities::{load_store_data, AppState, StoreConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let menu_path = std::env::var("MENU_PATH").unwrap_or_else(|_| "./data/menu.json".to_owned());
    let categories_path =
        std::env::var("CATEGORIES_PATH").unwrap_or_else(|_| "./data/categories.json".to_owned());
    let payment_methods_path = std::env::var("PAYMENT_METHODS_PATH")
        .unwrap_or_else(|_| "./data/payment_methods.json".to_owned());

    //the external store owns this data, we only load a snapshot at startup
    let (menu, categories, payment_methods) =
        load_store_data(&menu_path, &categories_path, &payment_methods_path)
            .expect("Failed to load store data");

    let store = StoreConfig {
        name: std::env::var("STORE_NAME").unwrap_or_else(|_| "Messy Bite".to_owned()),
        messenger_handle: std::env::var("MESSENGER_HANDLE")
            .unwrap_or_else(|_| "messybiteph".to_owned()),
    };

    let state = Arc::new(AppState::new(store, menu, categories, payment_methods));

    let app = create_api_router(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    println!("Running at {:?}", listener);
    axum::serve(listener, app).await.unwrap();
}
