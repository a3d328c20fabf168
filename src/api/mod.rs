//! # Remote API
//!
//! Everything that talks to the wellness marketplace server.
//!
//! ```text
//! PractitionersApi / ProductsApi   typed operations, parameter shaping
//!            │
//!            ▼
//!      Arc<dyn Transport>          GET + JSON, error normalization
//!            │
//!            ▼
//!        HttpClient (reqwest)      base URL, 10s timeout, JSON headers
//! ```
//!
//! The surface is read-only: no request bodies, no mutations.

pub mod client;
pub mod error;
pub mod practitioners;
pub mod products;
pub mod types;

pub use client::{HttpClient, QueryParams, Transport};
pub use error::ApiError;
pub use practitioners::{PractitionerQuery, PractitionersApi};
pub use products::{ProductQuery, ProductSearchQuery, ProductsApi};
pub use types::{
    HealthStatus, Practitioner, PractitionerResponse, Product, ProductCategory, ProductResponse,
};
