//! Shared fixtures for controller and router tests.

#![allow(dead_code)]

use std::sync::Arc;

use mockrest_api::FrontController;
use mockrest_core::{MockConfig, Store};
use serde_json::{json, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn contacts() -> Value {
    json!([
        {"id": 1, "name": "Link", "address_ids": [1]},
        {"id": 2, "name": "Zelda", "address_ids": [2]}
    ])
}

pub fn addresses() -> Value {
    json!([
        {"id": 1, "name": "123 Hyrule Way", "contact_id": 1},
        {"id": 2, "name": "456 Hyrule Way", "contact_id": 2}
    ])
}

/// Store and controller for one test. Loads fixtures on creation and
/// empties the store when dropped.
pub struct Harness {
    pub store: Arc<Store>,
    pub controller: FrontController,
}

impl Harness {
    pub fn setup() -> Self {
        Self::setup_on(Arc::new(Store::new()), MockConfig::default())
    }

    pub fn with_config(config: MockConfig) -> Self {
        Self::setup_on(Arc::new(Store::new()), config)
    }

    /// Loads fixtures into an existing store, so tests can check isolation
    /// across setup/teardown cycles.
    pub fn setup_on(store: Arc<Store>, config: MockConfig) -> Self {
        init_tracing();
        store
            .load_data(json!({
                "contacts": contacts(),
                "addresses": addresses(),
            }))
            .expect("fixtures load");
        Self {
            store,
            controller: FrontController::new(Arc::new(config)),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = self.store.empty_data();
    }
}
