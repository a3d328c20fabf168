//! Practitioner operations.
//!
//! Pure parameter shaping over [`Transport`]; nothing here holds state.

use std::sync::Arc;

use super::client::{QueryParams, Transport, decode, push_param};
use super::error::ApiError;
use super::types::{HealthStatus, Practitioner, PractitionerResponse};

/// Filters for `GET /api/practitioners`. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PractitionerQuery {
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub limit: Option<u32>,
}

impl PractitionerQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_param(&mut params, "specialty", self.specialty.as_deref());
        push_param(&mut params, "location", self.location.as_deref());
        push_param(&mut params, "limit", self.limit);
        params
    }
}

#[derive(Clone)]
pub struct PractitionersApi {
    transport: Arc<dyn Transport>,
}

impl PractitionersApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_all(
        &self,
        query: &PractitionerQuery,
    ) -> Result<PractitionerResponse, ApiError> {
        let body = self.transport.get("/api/practitioners", &query.to_params()).await?;
        decode(body)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Practitioner, ApiError> {
        let body = self
            .transport
            .get(&format!("/api/practitioners/{id}"), &[])
            .await?;
        decode(body)
    }

    /// Name/specialty search. No screen calls this yet.
    pub async fn search(
        &self,
        q: &str,
        limit: Option<u32>,
    ) -> Result<PractitionerResponse, ApiError> {
        let mut params = vec![("q", q.to_string())];
        push_param(&mut params, "limit", limit);
        let body = self.transport.get("/api/practitioners/search", &params).await?;
        decode(body)
    }

    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let body = self.transport.get("/health", &[]).await?;
        decode(body)
    }
}
