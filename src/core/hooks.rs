//! # Data-Fetching Hooks
//!
//! Per-resource state containers. Each one pairs a [`Query`] with the API
//! call that feeds it and the parameters the call depends on.
//!
//! - [`Resource`] fetches on mount, again whenever its parameters change by
//!   value, and on every explicit `refetch()`.
//! - [`ProductSearch`] never fetches on its own; it waits for `search()` and
//!   can be cleared without touching the network.
//!
//! Methods that start a request return a [`Pending`]. Nothing goes over the
//! wire until that is resolved, and its [`Settled`] result must be handed
//! back through `settle()`.

use std::fmt::Debug;

use crate::api::{
    PractitionerQuery, PractitionersApi, Practitioner, Product, ProductCategory, ProductQuery,
    ProductSearchQuery, ProductsApi,
};
use crate::core::fetch::{
    FetchFuture, FetchState, Loaded, Pending, Query, Settled, SettleOrder, fetch_with,
};

/// One fetchable resource: what it depends on, what it yields, and how to
/// get it.
pub trait Source: Send + Sync + 'static {
    type Params: Clone + PartialEq + Debug + Send + 'static;
    type Data: Default + Send + 'static;

    /// Error text used when a failure has no message of its own.
    const FALLBACK: &'static str;

    /// Builds the request for `params`, or `None` when there is nothing to
    /// fetch (a by-id hook without an id).
    fn fetch(&self, params: &Self::Params) -> Option<FetchFuture<Self::Data>>;
}

pub struct Resource<S: Source> {
    source: S,
    params: S::Params,
    query: Query<S::Data>,
}

impl<S: Source> Resource<S> {
    /// Creates the hook and issues its first request, if it has one.
    pub fn mount(
        source: S,
        params: S::Params,
        order: SettleOrder,
    ) -> (Self, Option<Pending<S::Data>>) {
        let future = source.fetch(&params);
        let initial = if future.is_some() {
            FetchState::loading()
        } else {
            FetchState::idle()
        };
        let mut query = Query::new(initial, order, S::FALLBACK);
        let pending = future.map(|f| query.issue(f));
        (Self { source, params, query }, pending)
    }

    pub fn state(&self) -> &FetchState<S::Data> {
        self.query.state()
    }

    pub fn params(&self) -> &S::Params {
        &self.params
    }

    /// Replaces the tracked parameters. Fetches only when they differ from
    /// the current ones.
    pub fn set_params(&mut self, params: S::Params) -> Option<Pending<S::Data>> {
        if params == self.params {
            return None;
        }
        self.params = params;
        self.refetch()
    }

    /// Re-issues the request for the current parameters. Overlapping calls
    /// are not deduplicated.
    pub fn refetch(&mut self) -> Option<Pending<S::Data>> {
        let future = self.source.fetch(&self.params)?;
        Some(self.query.issue(future))
    }

    pub fn settle(&mut self, settled: Settled<S::Data>) -> bool {
        self.query.settle(settled)
    }

    /// `refetch()`, run to completion, and settled.
    pub async fn reload(&mut self) {
        if let Some(pending) = self.refetch() {
            let settled = pending.resolve().await;
            self.settle(settled);
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

#[derive(Clone)]
pub struct PractitionerListing {
    pub api: PractitionersApi,
}

impl Source for PractitionerListing {
    type Params = PractitionerQuery;
    type Data = Vec<Practitioner>;
    const FALLBACK: &'static str = "Failed to fetch practitioners";

    fn fetch(&self, params: &PractitionerQuery) -> Option<FetchFuture<Vec<Practitioner>>> {
        let api = self.api.clone();
        let params = params.clone();
        Some(fetch_with(async move {
            let resp = api.get_all(&params).await?;
            Ok(Loaded {
                data: resp.practitioners,
                total: resp.total,
            })
        }))
    }
}

/// Single practitioner by id; `None` means there is nothing to show yet.
#[derive(Clone)]
pub struct PractitionerDetail {
    pub api: PractitionersApi,
}

impl Source for PractitionerDetail {
    type Params = Option<u32>;
    type Data = Option<Practitioner>;
    const FALLBACK: &'static str = "Failed to fetch practitioner";

    fn fetch(&self, params: &Option<u32>) -> Option<FetchFuture<Option<Practitioner>>> {
        let id = (*params)?;
        let api = self.api.clone();
        Some(fetch_with(async move {
            let practitioner = api.get_by_id(id).await?;
            Ok(Loaded {
                data: Some(practitioner),
                total: 1,
            })
        }))
    }
}

#[derive(Clone)]
pub struct ProductListing {
    pub api: ProductsApi,
}

impl Source for ProductListing {
    type Params = ProductQuery;
    type Data = Vec<Product>;
    const FALLBACK: &'static str = "Failed to fetch products";

    fn fetch(&self, params: &ProductQuery) -> Option<FetchFuture<Vec<Product>>> {
        let api = self.api.clone();
        let params = params.clone();
        Some(fetch_with(async move {
            let resp = api.get_all(&params).await?;
            Ok(Loaded {
                data: resp.products,
                total: resp.total,
            })
        }))
    }
}

#[derive(Clone)]
pub struct ProductDetail {
    pub api: ProductsApi,
}

impl Source for ProductDetail {
    type Params = Option<u32>;
    type Data = Option<Product>;
    const FALLBACK: &'static str = "Failed to fetch product";

    fn fetch(&self, params: &Option<u32>) -> Option<FetchFuture<Option<Product>>> {
        let id = (*params)?;
        let api = self.api.clone();
        Some(fetch_with(async move {
            let product = api.get_by_id(id).await?;
            Ok(Loaded {
                data: Some(product),
                total: 1,
            })
        }))
    }
}

#[derive(Clone)]
pub struct CategoryListing {
    pub api: ProductsApi,
}

impl Source for CategoryListing {
    type Params = ();
    type Data = Vec<ProductCategory>;
    const FALLBACK: &'static str = "Failed to fetch categories";

    fn fetch(&self, _params: &()) -> Option<FetchFuture<Vec<ProductCategory>>> {
        let api = self.api.clone();
        Some(fetch_with(async move {
            let categories = api.get_categories().await?;
            let total = categories.len() as u64;
            Ok(Loaded {
                data: categories,
                total,
            })
        }))
    }
}

// ============================================================================
// On-demand search
// ============================================================================

pub struct ProductSearch {
    api: ProductsApi,
    query: Query<Vec<Product>>,
    last: Option<ProductSearchQuery>,
}

impl ProductSearch {
    pub const FALLBACK: &'static str = "Failed to search products";

    pub fn new(api: ProductsApi, order: SettleOrder) -> Self {
        Self {
            api,
            query: Query::new(FetchState::idle(), order, Self::FALLBACK),
            last: None,
        }
    }

    pub fn state(&self) -> &FetchState<Vec<Product>> {
        self.query.state()
    }

    /// The most recent search, until `clear()`.
    pub fn active(&self) -> Option<&ProductSearchQuery> {
        self.last.as_ref()
    }

    pub fn search(&mut self, search: ProductSearchQuery) -> Pending<Vec<Product>> {
        let api = self.api.clone();
        let params = search.clone();
        self.last = Some(search);
        self.query.issue(fetch_with(async move {
            let resp = api.search(&params).await?;
            Ok(Loaded {
                data: resp.products,
                total: resp.total,
            })
        }))
    }

    /// Back to the empty idle shape, without a network call.
    pub fn clear(&mut self) {
        self.last = None;
        self.query.reset(Vec::new());
    }

    pub fn settle(&mut self, settled: Settled<Vec<Product>>) -> bool {
        self.query.settle(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::test_support::{
        ScriptedTransport, practitioner_json, practitioners_page, products_page,
    };
    use serde_json::json;

    fn products(transport: &std::sync::Arc<ScriptedTransport>) -> ProductListing {
        ProductListing {
            api: ProductsApi::new(transport.clone()),
        }
    }

    fn names(state: &FetchState<Vec<Product>>) -> Vec<&str> {
        state.data.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_mount_loads_product_list() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(products_page(&[(1, "P1", true), (2, "P2", false)], 2));

        let (mut hook, pending) =
            Resource::mount(products(&transport), ProductQuery::default(), SettleOrder::Latest);
        assert!(hook.state().loading);
        assert!(hook.state().error.is_none());
        assert!(hook.state().data.is_empty());

        let settled = pending.unwrap().resolve().await;
        hook.settle(settled);

        assert_eq!(names(hook.state()), vec!["P1", "P2"]);
        assert_eq!(hook.state().total, 2);
        assert!(!hook.state().loading);
        assert!(hook.state().error.is_none());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_refetch_failure_keeps_previous_list() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(products_page(&[(1, "P1", true)], 1));
        transport.respond_err(ApiError::Server { status: 500 });

        let (mut hook, pending) =
            Resource::mount(products(&transport), ProductQuery::default(), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);
        hook.reload().await;

        assert_eq!(names(hook.state()), vec!["P1"]);
        assert_eq!(
            hook.state().error.as_deref(),
            Some("Server error. Please try again later.")
        );
        assert!(!hook.state().loading);
    }

    #[tokio::test]
    async fn test_first_load_failure_leaves_empty_list() {
        let transport = ScriptedTransport::new();
        transport.respond_err(ApiError::Network("timed out".to_string()));

        let (mut hook, pending) =
            Resource::mount(products(&transport), ProductQuery::default(), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);

        assert!(hook.state().data.is_empty());
        assert_eq!(
            hook.state().error.as_deref(),
            Some("Network error. Please check your connection.")
        );
    }

    #[tokio::test]
    async fn test_refetch_twice_matches_once() {
        let transport = ScriptedTransport::new();
        for _ in 0..3 {
            transport.respond_ok(products_page(&[(1, "P1", true)], 1));
        }
        let (mut hook, pending) =
            Resource::mount(products(&transport), ProductQuery::default(), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);

        hook.reload().await;
        let once = hook.state().clone();
        hook.reload().await;

        assert_eq!(*hook.state(), once);
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_set_params_fetches_only_on_change() {
        let transport = ScriptedTransport::new();
        let (mut hook, _mount) = Resource::mount(
            products(&transport),
            ProductQuery::with_limit(20),
            SettleOrder::Latest,
        );

        assert!(hook.set_params(ProductQuery::with_limit(20)).is_none());

        let herbs = ProductQuery {
            category: Some("herbs".to_string()),
            ..ProductQuery::with_limit(20)
        };
        assert!(hook.set_params(herbs.clone()).is_some());
        assert!(hook.set_params(herbs.clone()).is_none());
        assert_eq!(hook.params(), &herbs);
    }

    #[tokio::test]
    async fn test_overlapping_refetch_latest_wins() {
        let transport = ScriptedTransport::new();
        // Responses are handed out in the order requests hit the transport.
        transport.respond_ok(products_page(&[(2, "fresh", true)], 1));
        transport.respond_ok(products_page(&[(1, "stale", true)], 1));

        let (mut hook, _mount) =
            Resource::mount(products(&transport), ProductQuery::default(), SettleOrder::Latest);
        let older = hook.refetch().unwrap();
        let newer = hook.refetch().unwrap();

        let newer = newer.resolve().await;
        let older = older.resolve().await;
        assert!(hook.settle(newer));
        assert!(!hook.settle(older));

        assert_eq!(names(hook.state()), vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_overlapping_refetch_legacy_order_overwrites() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(products_page(&[(2, "fresh", true)], 1));
        transport.respond_ok(products_page(&[(1, "stale", true)], 1));

        let (mut hook, _mount) =
            Resource::mount(products(&transport), ProductQuery::default(), SettleOrder::Settled);
        let older = hook.refetch().unwrap();
        let newer = hook.refetch().unwrap();

        let newer = newer.resolve().await;
        let older = older.resolve().await;
        hook.settle(newer);
        hook.settle(older);

        assert_eq!(names(hook.state()), vec!["stale"]);
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let transport = ScriptedTransport::new();
        transport.respond_err(ApiError::NotFound);
        let source = PractitionerDetail {
            api: PractitionersApi::new(transport.clone()),
        };

        let (mut hook, pending) = Resource::mount(source, Some(999), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);

        assert_eq!(hook.state().error.as_deref(), Some("Resource not found"));
        assert!(hook.state().data.is_none());
        assert_eq!(transport.calls()[0].path, "/api/practitioners/999");
    }

    #[tokio::test]
    async fn test_detail_without_id_stays_idle() {
        let transport = ScriptedTransport::new();
        let source = ProductDetail {
            api: ProductsApi::new(transport.clone()),
        };

        let (mut hook, pending) = Resource::mount(source, None, SettleOrder::Latest);

        assert!(pending.is_none());
        assert_eq!(*hook.state(), FetchState::idle());
        assert!(hook.refetch().is_none());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_detail_id_change_fetches_new_entity() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(practitioner_json(1, "Asha"));
        transport.respond_ok(practitioner_json(2, "Vikram"));
        let source = PractitionerDetail {
            api: PractitionersApi::new(transport.clone()),
        };

        let (mut hook, pending) = Resource::mount(source, Some(1), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);
        let next = hook.set_params(Some(2)).unwrap();
        hook.settle(next.resolve().await);

        assert_eq!(hook.state().data.as_ref().map(|p| p.name.as_str()), Some("Vikram"));
    }

    #[tokio::test]
    async fn test_practitioner_list_total_from_response() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(practitioners_page(&[(1, "Asha"), (2, "Vikram")], 14));
        let source = PractitionerListing {
            api: PractitionersApi::new(transport.clone()),
        };

        let (mut hook, pending) =
            Resource::mount(source, PractitionerQuery::with_limit(2), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);

        assert_eq!(hook.state().data.len(), 2);
        assert_eq!(hook.state().total, 14);
    }

    #[tokio::test]
    async fn test_categories_total_is_count_of_entries() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(json!([{"name": "herbs", "count": 3}]));
        let source = CategoryListing {
            api: ProductsApi::new(transport.clone()),
        };

        let (mut hook, pending) = Resource::mount(source, (), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);

        assert_eq!(hook.state().total, 1);
        assert_eq!(hook.state().data[0].count, 3);
    }

    #[tokio::test]
    async fn test_categories_decode_failure_uses_fallback() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(json!({"unexpected": true}));
        let source = CategoryListing {
            api: ProductsApi::new(transport.clone()),
        };

        let (mut hook, pending) = Resource::mount(source, (), SettleOrder::Latest);
        hook.settle(pending.unwrap().resolve().await);

        assert_eq!(hook.state().error.as_deref(), Some("Failed to fetch categories"));
    }

    #[tokio::test]
    async fn test_search_populates_and_clear_resets() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(products_page(&[(5, "Ginger Tea", true)], 1));
        let mut search =
            ProductSearch::new(ProductsApi::new(transport.clone()), SettleOrder::Latest);
        assert_eq!(*search.state(), FetchState::idle());
        assert_eq!(transport.call_count(), 0);

        let pending = search.search(ProductSearchQuery {
            q: "ginger".to_string(),
            category: Some("herbs".to_string()),
            in_stock_only: Some(true),
            limit: Some(5),
        });
        assert!(search.state().loading);
        search.settle(pending.resolve().await);

        assert_eq!(names(search.state()), vec!["Ginger Tea"]);
        assert_eq!(search.state().total, 1);
        assert_eq!(search.active().map(|q| q.q.as_str()), Some("ginger"));

        search.clear();
        assert_eq!(*search.state(), FetchState::idle());
        assert!(search.active().is_none());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_clear_drops_in_flight_search_in_settled_order() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(products_page(&[(5, "Ginger Tea", true)], 1));
        let mut search =
            ProductSearch::new(ProductsApi::new(transport.clone()), SettleOrder::Settled);

        let pending = search.search(ProductSearchQuery::new("ginger"));
        search.clear();

        assert!(!search.settle(pending.resolve().await));
        assert_eq!(*search.state(), FetchState::idle());
    }

    #[tokio::test]
    async fn test_search_after_clear_still_applies_in_settled_order() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(products_page(&[(5, "Ginger Tea", true)], 1));
        transport.respond_ok(products_page(&[(6, "Tulsi Drops", true)], 1));
        let mut search =
            ProductSearch::new(ProductsApi::new(transport.clone()), SettleOrder::Settled);

        let stale = search.search(ProductSearchQuery::new("ginger"));
        search.clear();
        let fresh = search.search(ProductSearchQuery::new("tulsi"));

        assert!(!search.settle(stale.resolve().await));
        assert!(search.settle(fresh.resolve().await));
        assert_eq!(names(search.state()), vec!["Tulsi Drops"]);
    }

    #[tokio::test]
    async fn test_search_failure_message() {
        let transport = ScriptedTransport::new();
        transport.respond_err(ApiError::Unknown("q must not be empty".to_string()));
        let mut search = ProductSearch::new(ProductsApi::new(transport), SettleOrder::Latest);

        let pending = search.search(ProductSearchQuery::new(""));
        search.settle(pending.resolve().await);

        assert_eq!(search.state().error.as_deref(), Some("q must not be empty"));
    }

    #[test]
    fn test_nothing_is_sent_until_pending_is_polled() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(products_page(&[(1, "P1", true)], 1));

        let (mut hook, pending) =
            Resource::mount(products(&transport), ProductQuery::default(), SettleOrder::Latest);
        let mut task = tokio_test::task::spawn(pending.unwrap().resolve());
        assert_eq!(transport.call_count(), 0);

        let settled = tokio_test::assert_ready!(task.poll());
        assert_eq!(transport.call_count(), 1);
        assert!(hook.settle(settled));
        assert_eq!(names(hook.state()), vec!["P1"]);
    }
}
