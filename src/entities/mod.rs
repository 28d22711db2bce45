pub mod cart;
pub mod category;
pub mod customization;
pub mod menu_item;
pub mod order;
pub mod payment_method;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::entities::cart::Cart;
use crate::entities::category::Category;
use crate::entities::menu_item::MenuItem;
use crate::entities::order::CheckoutSession;
use crate::entities::payment_method::PaymentMethod;

/// Ambient store settings the cart engine and the order composer are
/// injected with, instead of fetching them from anywhere themselves.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub name: String,
    pub messenger_handle: String,
}

/// Shared application state: the read-only store data loaded at startup
/// plus the per-session carts and checkout sessions.
pub struct AppState {
    pub store: StoreConfig,
    pub menu: Vec<MenuItem>,
    pub categories: Vec<Category>,
    pub payment_methods: Vec<PaymentMethod>,
    pub carts: Mutex<HashMap<String, Cart>>,
    pub checkouts: Mutex<HashMap<String, CheckoutSession>>,
}

impl AppState {
    pub fn new(
        store: StoreConfig,
        menu: Vec<MenuItem>,
        categories: Vec<Category>,
        payment_methods: Vec<PaymentMethod>,
    ) -> AppState {
        AppState {
            store,
            menu,
            categories,
            payment_methods,
            carts: Mutex::new(HashMap::new()),
            checkouts: Mutex::new(HashMap::new()),
        }
    }

    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|item| item.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|method| method.id == id)
    }
}

#[derive(Error, Debug)]
pub enum StoreDataError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

fn load_json<T: DeserializeOwned>(path: &str) -> Result<T, StoreDataError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StoreDataError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreDataError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// The external store hands us plain record sequences, the service never
/// fetches catalog data itself.
pub fn load_store_data(
    menu_path: &str,
    categories_path: &str,
    payment_methods_path: &str,
) -> Result<(Vec<MenuItem>, Vec<Category>, Vec<PaymentMethod>), StoreDataError> {
    let menu: Vec<MenuItem> = load_json(menu_path)?;
    let categories: Vec<Category> = load_json(categories_path)?;
    let payment_methods: Vec<PaymentMethod> = load_json(payment_methods_path)?;
    Ok((menu, categories, payment_methods))
}
