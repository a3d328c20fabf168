//! Product operations.
//!
//! `in_stock_only` is the only parameter whose wire name differs from the
//! Rust field; everything else passes through under its own name.

use std::sync::Arc;

use super::client::{QueryParams, Transport, decode, push_param};
use super::error::ApiError;
use super::types::{Product, ProductCategory, ProductResponse};

/// Filters for `GET /api/products`. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub query: Option<String>,
    pub in_stock_only: Option<bool>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_param(&mut params, "category", self.category.as_deref());
        push_param(&mut params, "query", self.query.as_deref());
        push_param(&mut params, "in_stock_only", self.in_stock_only);
        push_param(&mut params, "limit", self.limit);
        params
    }
}

/// Arguments for `GET /api/products/search`; `q` is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearchQuery {
    pub q: String,
    pub category: Option<String>,
    pub in_stock_only: Option<bool>,
    pub limit: Option<u32>,
}

impl ProductSearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut params = vec![("q", self.q.clone())];
        push_param(&mut params, "category", self.category.as_deref());
        push_param(&mut params, "in_stock_only", self.in_stock_only);
        push_param(&mut params, "limit", self.limit);
        params
    }
}

#[derive(Clone)]
pub struct ProductsApi {
    transport: Arc<dyn Transport>,
}

impl ProductsApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_all(&self, query: &ProductQuery) -> Result<ProductResponse, ApiError> {
        let body = self.transport.get("/api/products", &query.to_params()).await?;
        decode(body)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Product, ApiError> {
        let body = self.transport.get(&format!("/api/products/{id}"), &[]).await?;
        decode(body)
    }

    pub async fn search(&self, query: &ProductSearchQuery) -> Result<ProductResponse, ApiError> {
        let body = self
            .transport
            .get("/api/products/search", &query.to_params())
            .await?;
        decode(body)
    }

    pub async fn get_categories(&self) -> Result<Vec<ProductCategory>, ApiError> {
        let body = self.transport.get("/api/categories", &[]).await?;
        decode(body)
    }
}
