//! # Application State
//!
//! Every hook instance and every piece of screen-local state, in one place.
//! No terminal types live here; presentation state belongs to the `tui`
//! module.
//!
//! ```text
//! App
//! ├── tab: Tab                                  // visible tab
//! ├── practitioners: Resource<PractitionerListing>
//! ├── products: Resource<ProductListing>
//! ├── categories: Resource<CategoryListing>
//! ├── search: ProductSearch                     // on-demand, idle until used
//! ├── booking: Option<Resource<PractitionerDetail>>  // mounted while open
//! ├── practitioner_cursor / product_cursor      // highlighted card
//! ├── selection: Selection                      // favorites + cart, ephemeral
//! ├── search_input: Option<String>              // search prompt, when open
//! ├── alert: Option<Alert>                      // retry confirmation
//! └── status_message: String                    // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{
    PractitionerQuery, PractitionersApi, Practitioner, Product, ProductQuery, ProductsApi,
};
use crate::core::action::Fetch;
use crate::core::config::ResolvedConfig;
use crate::core::fetch::{FetchState, SettleOrder};
use crate::core::hooks::{
    CategoryListing, PractitionerDetail, PractitionerListing, ProductListing, ProductSearch,
    Resource,
};
use crate::core::screen::{ListCursor, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Practitioners,
    Products,
}

impl Tab {
    pub fn next(self) -> Tab {
        match self {
            Tab::Practitioners => Tab::Products,
            Tab::Products => Tab::Practitioners,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Practitioners => "Practitioners",
            Tab::Products => "Products",
        }
    }
}

/// The "Connection Error" confirmation shown from an error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
    /// Which screen's hook Retry will refetch.
    pub target: Tab,
}

pub struct App {
    pub tab: Tab,
    pub practitioners: Resource<PractitionerListing>,
    pub products: Resource<ProductListing>,
    pub categories: Resource<CategoryListing>,
    pub search: ProductSearch,
    pub booking: Option<Resource<PractitionerDetail>>,
    pub practitioner_cursor: ListCursor,
    pub product_cursor: ListCursor,
    pub selection: Selection,
    pub search_input: Option<String>,
    pub alert: Option<Alert>,
    pub status_message: String,
    practitioners_api: PractitionersApi,
    settle_order: SettleOrder,
}

impl App {
    /// Mounts every screen's hooks. The returned fetches are the on-mount
    /// requests; the caller runs them.
    pub fn mount(
        practitioners_api: PractitionersApi,
        products_api: ProductsApi,
        config: &ResolvedConfig,
    ) -> (Self, Vec<Fetch>) {
        let order = config.settle_order;
        let (practitioners, p) = Resource::mount(
            PractitionerListing {
                api: practitioners_api.clone(),
            },
            PractitionerQuery::with_limit(config.practitioner_limit),
            order,
        );
        let (products, q) = Resource::mount(
            ProductListing {
                api: products_api.clone(),
            },
            ProductQuery::with_limit(config.product_limit),
            order,
        );
        let (categories, c) = Resource::mount(
            CategoryListing {
                api: products_api.clone(),
            },
            (),
            order,
        );

        let fetches = [
            p.map(Fetch::Practitioners),
            q.map(Fetch::Products),
            c.map(Fetch::Categories),
        ]
        .into_iter()
        .flatten()
        .collect();

        let app = Self {
            tab: Tab::Practitioners,
            practitioners,
            products,
            categories,
            search: ProductSearch::new(products_api, order),
            booking: None,
            practitioner_cursor: ListCursor::default(),
            product_cursor: ListCursor::default(),
            selection: Selection::default(),
            search_input: None,
            alert: None,
            status_message: String::from("Welcome to Tangerine"),
            practitioners_api,
            settle_order: order,
        };
        (app, fetches)
    }

    /// Mounts the booking screen for one practitioner, replacing any open one.
    pub fn open_booking(&mut self, id: u32) -> Option<Fetch> {
        let (booking, pending) = Resource::mount(
            PractitionerDetail {
                api: self.practitioners_api.clone(),
            },
            Some(id),
            self.settle_order,
        );
        self.booking = Some(booking);
        pending.map(Fetch::Booking)
    }

    /// Unmounts the booking screen. Its in-flight request, if any, will be
    /// dropped when it settles.
    pub fn close_booking(&mut self) {
        self.booking = None;
    }

    /// What the products screen lists: search results while a search is
    /// active, the catalogue otherwise.
    pub fn product_list(&self) -> &FetchState<Vec<Product>> {
        if self.search.active().is_some() {
            self.search.state()
        } else {
            self.products.state()
        }
    }

    pub fn selected_practitioner(&self) -> Option<&Practitioner> {
        let list = &self.practitioners.state().data;
        self.practitioner_cursor
            .selected(list.len())
            .and_then(|i| list.get(i))
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let list = &self.product_list().data;
        self.product_cursor.selected(list.len()).and_then(|i| list.get(i))
    }

    /// The error text for a tab's list, if it is showing one.
    pub fn tab_error(&self, tab: Tab) -> Option<&str> {
        let state_error = match tab {
            Tab::Practitioners => self.practitioners.state().error.as_deref(),
            Tab::Products => self.product_list().error.as_deref(),
        };
        let loading = match tab {
            Tab::Practitioners => self.practitioners.state().loading,
            Tab::Products => self.product_list().loading,
        };
        if loading { None } else { state_error }
    }
}
