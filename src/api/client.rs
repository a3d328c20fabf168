//! The HTTP boundary.
//!
//! [`Transport`] is the seam the resource APIs are written against, so tests
//! and alternative backends can stand in for the network. [`HttpClient`] is
//! the production implementation on top of `reqwest`: one base URL, one
//! timeout, JSON headers, and the request/response logging that used to be
//! interceptors.
//!
//! Every call is independent. There is no retry, no backoff, no caching and
//! no cancellation here; a request runs until it settles or times out.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::error::ApiError;

/// Query parameters in the order they go on the wire.
pub type QueryParams = Vec<(&'static str, String)>;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues `GET {base}{path}?{params}` and returns the decoded JSON body.
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<serde_json::Value, ApiError>;
}

/// `reqwest`-backed [`Transport`], constructed once at startup and shared
/// behind an `Arc` by every API module.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
    log_requests: bool,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        log_requests: bool,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            log_requests,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        if self.log_requests {
            debug!("API Request: GET {} {:?}", path, params);
        }

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| {
            warn!("API Request Error: GET {} - {}", path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if self.log_requests {
            debug!("API Response: {} {}", status.as_u16(), path);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!("API Response Error: unreadable body of {} - {}", path, e);
                String::new()
            });
            warn!("API Response Error: {} {} - {}", status.as_u16(), path, body);
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let body = response.bytes().await.map_err(|e| {
            warn!("API Response Error: body of {} - {}", path, e);
            ApiError::from(e)
        })?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Appends `key=value` only when the value is present; absent parameters
/// are left off the query string entirely rather than sent empty.
pub(crate) fn push_param<T: ToString>(
    params: &mut QueryParams,
    key: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, ApiError> {
    Ok(serde_json::from_value(value)?)
}
