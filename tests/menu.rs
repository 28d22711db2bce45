use reqwest::{Client, StatusCode};
use std::sync::Arc;

use messy_bite::api::create_api_router;
use messy_bite::entities::{load_store_data, AppState, StoreConfig};

async fn spawn_app() -> String {
    let (menu, categories, payment_methods) = load_store_data(
        "./data/menu.json",
        "./data/categories.json",
        "./data/payment_methods.json",
    )
    .expect("Failed to load store data");

    let state = Arc::new(AppState::new(
        StoreConfig {
            name: "Messy Bite".to_owned(),
            messenger_handle: "messybiteph".to_owned(),
        },
        menu,
        categories,
        payment_methods,
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, create_api_router(state))
            .await
            .expect("Server stopped");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_get_menu() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/menu", base))
        .send()
        .await
        .expect("Failed to send get menu request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse menu response JSON");

    let items = body.as_array().expect("Menu response is not an array");
    assert_eq!(items.len(), 5);
    assert!(items
        .iter()
        .any(|item| item["id"] == "siomai-rice" && item["is_on_discount"] == true));
    //unavailable items stay listed
    assert!(items.iter().any(|item| item["id"] == "xiao-long-bao"));
}

#[tokio::test]
async fn test_filter_menu_by_category() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/menu?category=dim-sum", base))
        .send()
        .await
        .expect("Failed to send get menu request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse menu response JSON");

    let items = body.as_array().expect("Menu response is not an array");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["category"] == "dim-sum"));
}

#[tokio::test]
async fn test_filter_menu_by_popular_and_availability() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/menu?popular=true", base))
        .send()
        .await
        .expect("Failed to send get menu request");

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse menu response JSON");
    let items = body.as_array().expect("Menu response is not an array");
    assert!(!items.is_empty());
    assert!(items.iter().all(|item| item["popular"] == true));

    let response = client
        .get(format!("{}/api/menu?available=true", base))
        .send()
        .await
        .expect("Failed to send get menu request");

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse menu response JSON");
    let items = body.as_array().expect("Menu response is not an array");
    assert!(items.iter().all(|item| item["id"] != "xiao-long-bao"));
}

#[tokio::test]
async fn test_filter_menu_by_effective_price() {
    let base = spawn_app().await;
    let client = Client::new();

    //siomai-rice is 150 base but 120 on discount, so max=120 keeps it
    let response = client
        .get(format!("{}/api/menu?max=120", base))
        .send()
        .await
        .expect("Failed to send get menu request");

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse menu response JSON");
    let items = body.as_array().expect("Menu response is not an array");
    assert!(items.iter().any(|item| item["id"] == "siomai-rice"));
}

#[tokio::test]
async fn test_get_menu_item_with_add_on_groups() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/menu/siomai-rice", base))
        .send()
        .await
        .expect("Failed to send get menu item request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse menu item response JSON");

    assert_eq!(body["name"], "Siomai Rice");
    assert_eq!(body["effective_price"], 120.0);

    let groups = body["add_on_groups"]
        .as_array()
        .expect("add_on_groups is not an array");
    //first-seen category order: sauces before sides
    assert_eq!(groups[0]["category"], "sauces");
    assert_eq!(groups[1]["category"], "sides");
    assert_eq!(groups[1]["add_ons"].as_array().map(|a| a.len()), Some(2));
}

#[tokio::test]
async fn test_get_unknown_menu_item() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/menu/balut", base))
        .send()
        .await
        .expect("Failed to send get menu item request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
