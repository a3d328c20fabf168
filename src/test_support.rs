//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::{ApiError, PractitionersApi, ProductsApi, Transport};
use crate::core::config::{TangerineConfig, resolve};
use crate::core::state::App;

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub params: Vec<(&'static str, String)>,
}

/// A [`Transport`] that replays queued responses in call order and records
/// every request. An exhausted queue answers with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_ok(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    pub fn respond_err(&self, err: ApiError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            params: params.to_vec(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

pub fn practitioner_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "specialty": "Panchakarma",
        "rating": 4.8,
        "experience": "12 years",
        "location": "Kochi",
        "nextAvailable": "Today 4:00 PM",
        "image": "https://example.com/p.jpg"
    })
}

pub fn product_json(id: u32, name: &str, in_stock: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Traditional formulation",
        "price": 18.0,
        "originalPrice": 24.0,
        "rating": 4.6,
        "reviews": 87,
        "image": "https://example.com/i.jpg",
        "category": "herbs",
        "inStock": in_stock
    })
}

pub fn products_page(items: &[(u32, &str, bool)], total: u64) -> Value {
    let products: Vec<Value> = items
        .iter()
        .map(|(id, name, in_stock)| product_json(*id, name, *in_stock))
        .collect();
    json!({ "products": products, "total": total })
}

pub fn practitioners_page(items: &[(u32, &str)], total: u64) -> Value {
    let practitioners: Vec<Value> = items
        .iter()
        .map(|(id, name)| practitioner_json(*id, name))
        .collect();
    json!({ "practitioners": practitioners, "total": total })
}

/// Creates a mounted App over a scripted transport, discarding the mount fetches.
pub fn test_app(transport: Arc<ScriptedTransport>) -> App {
    let config = resolve(&TangerineConfig::default(), None);
    let (app, _mount) = App::mount(
        PractitionersApi::new(transport.clone()),
        ProductsApi::new(transport),
        &config,
    );
    app
}
