//! # Actions
//!
//! Everything that can happen in Tangerine becomes an `Action`.
//! User presses `R`? That's `Action::Refresh`.
//! A request settles? That's `Action::Settled(settlement)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O to perform next.
//! Requests are never run here; they are handed back as [`Fetch`] values.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::{Practitioner, Product, ProductCategory, ProductSearchQuery};
use crate::core::fetch::{Pending, Settled};
use crate::core::screen::{ListView, list_view};
use crate::core::state::{Alert, App, Tab};

/// A request issued by a hook, tagged with the hook it belongs to.
#[derive(Debug)]
pub enum Fetch {
    Practitioners(Pending<Vec<Practitioner>>),
    Products(Pending<Vec<Product>>),
    Categories(Pending<Vec<ProductCategory>>),
    Booking(Pending<Option<Practitioner>>),
    Search(Pending<Vec<Product>>),
}

impl Fetch {
    /// Runs the request and wraps its result as the action that settles it.
    pub async fn run(self) -> Action {
        let settlement = match self {
            Fetch::Practitioners(p) => Settlement::Practitioners(p.resolve().await),
            Fetch::Products(p) => Settlement::Products(p.resolve().await),
            Fetch::Categories(p) => Settlement::Categories(p.resolve().await),
            Fetch::Booking(p) => Settlement::Booking(p.resolve().await),
            Fetch::Search(p) => Settlement::Search(p.resolve().await),
        };
        Action::Settled(settlement)
    }
}

#[derive(Debug)]
pub enum Settlement {
    Practitioners(Settled<Vec<Practitioner>>),
    Products(Settled<Vec<Product>>),
    Categories(Settled<Vec<ProductCategory>>),
    Booking(Settled<Option<Practitioner>>),
    Search(Settled<Vec<Product>>),
}

#[derive(Debug)]
pub enum Action {
    NextTab,
    SelectTab(Tab),
    CursorUp,
    CursorDown,
    /// Enter on a card: practitioners open their booking screen.
    Open,
    /// Esc: leave booking, clear an active search.
    Back,
    /// Refetch whatever the visible screen shows.
    Refresh,
    /// "Tap to retry" on an error panel: ask before refetching.
    Retry,
    ConfirmAlert,
    DismissAlert,
    ToggleFavorite,
    AddToCart,
    OpenSearch,
    SearchChar(char),
    SearchBackspace,
    SubmitSearch,
    CancelSearch,
    Settled(Settlement),
    Quit,
}

#[derive(Debug)]
pub enum Effect {
    None,
    Quit,
    Fetch(Vec<Fetch>),
}

impl Effect {
    fn fetch(fetch: Option<Fetch>) -> Effect {
        match fetch {
            Some(f) => Effect::Fetch(vec![f]),
            None => Effect::None,
        }
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::NextTab => {
            app.tab = app.tab.next();
            app.close_booking();
            Effect::None
        }
        Action::SelectTab(tab) => {
            app.tab = tab;
            app.close_booking();
            Effect::None
        }
        Action::CursorUp => {
            match app.tab {
                Tab::Practitioners => app.practitioner_cursor.up(),
                Tab::Products => app.product_cursor.up(),
            }
            Effect::None
        }
        Action::CursorDown => {
            match app.tab {
                Tab::Practitioners => {
                    let len = app.practitioners.state().data.len();
                    app.practitioner_cursor.down(len);
                }
                Tab::Products => {
                    let len = app.product_list().data.len();
                    app.product_cursor.down(len);
                }
            }
            Effect::None
        }
        Action::Open => {
            if app.tab != Tab::Practitioners || app.booking.is_some() {
                return Effect::None;
            }
            if !matches!(list_view(app.practitioners.state()), ListView::Populated(_)) {
                return Effect::None;
            }
            match app.selected_practitioner().map(|p| p.id) {
                Some(id) => {
                    info!("Navigating to /book/{}", id);
                    Effect::fetch(app.open_booking(id))
                }
                None => Effect::None,
            }
        }
        Action::Back => {
            if app.booking.is_some() {
                app.close_booking();
            } else if app.tab == Tab::Products && app.search.active().is_some() {
                app.search.clear();
                app.product_cursor.reset();
                app.status_message = String::from("Search cleared");
            }
            Effect::None
        }
        Action::Refresh => refresh(app, app.tab),
        Action::Retry => {
            // The booking screen has no alert; its retry refetches directly.
            if let Some(booking) = &app.booking {
                let state = booking.state();
                if state.error.is_some() && !state.loading {
                    return refresh(app, app.tab);
                }
                return Effect::None;
            }
            if let Some(error) = app.tab_error(app.tab) {
                let message = if error.is_empty() {
                    fallback_alert(app.tab).to_string()
                } else {
                    error.to_string()
                };
                app.alert = Some(Alert {
                    title: "Connection Error",
                    message,
                    target: app.tab,
                });
            }
            Effect::None
        }
        Action::ConfirmAlert => match app.alert.take() {
            Some(alert) => refresh(app, alert.target),
            None => Effect::None,
        },
        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }
        Action::ToggleFavorite => {
            if app.tab != Tab::Products {
                return Effect::None;
            }
            if let Some((id, name)) = app.selected_product().map(|p| (p.id, p.name.clone())) {
                let now = app.selection.toggle_favorite(id);
                app.status_message = if now {
                    format!("Saved {name} to favorites")
                } else {
                    format!("Removed {name} from favorites")
                };
            }
            Effect::None
        }
        Action::AddToCart => {
            if app.tab != Tab::Products {
                return Effect::None;
            }
            let Some(product) = app.selected_product().cloned() else {
                return Effect::None;
            };
            let button = app.selection.cart_button(&product);
            if button.enabled() && app.selection.add_to_cart(&product) {
                app.status_message = format!(
                    "Added {} to cart ({} items)",
                    product.name,
                    app.selection.cart_len()
                );
            } else {
                app.status_message = format!("{}: {}", product.name, button.label());
            }
            Effect::None
        }
        Action::OpenSearch => {
            if app.tab == Tab::Products && app.booking.is_none() {
                let current = app.search.active().map(|q| q.q.clone()).unwrap_or_default();
                app.search_input = Some(current);
            }
            Effect::None
        }
        Action::SearchChar(c) => {
            if let Some(input) = app.search_input.as_mut() {
                input.push(c);
            }
            Effect::None
        }
        Action::SearchBackspace => {
            if let Some(input) = app.search_input.as_mut() {
                input.pop();
            }
            Effect::None
        }
        Action::CancelSearch => {
            app.search_input = None;
            Effect::None
        }
        Action::SubmitSearch => {
            let Some(input) = app.search_input.take() else {
                return Effect::None;
            };
            let q = input.trim().to_string();
            app.product_cursor.reset();
            if q.is_empty() {
                app.search.clear();
                return Effect::None;
            }
            app.status_message = format!("Searching for \"{q}\"");
            let query = ProductSearchQuery {
                q,
                limit: app.products.params().limit,
                ..Default::default()
            };
            Effect::Fetch(vec![Fetch::Search(app.search.search(query))])
        }
        Action::Settled(settlement) => {
            settle(app, settlement);
            Effect::None
        }
    }
}

/// Refetches the hooks behind one screen.
fn refresh(app: &mut App, tab: Tab) -> Effect {
    if let Some(booking) = app.booking.as_mut() {
        return Effect::fetch(booking.refetch().map(Fetch::Booking));
    }
    match tab {
        Tab::Practitioners => Effect::fetch(app.practitioners.refetch().map(Fetch::Practitioners)),
        Tab::Products => {
            let mut fetches = Vec::new();
            if let Some(active) = app.search.active().cloned() {
                fetches.push(Fetch::Search(app.search.search(active)));
            } else if let Some(p) = app.products.refetch() {
                fetches.push(Fetch::Products(p));
            }
            if app.categories.state().error.is_some()
                && let Some(c) = app.categories.refetch()
            {
                fetches.push(Fetch::Categories(c));
            }
            Effect::Fetch(fetches)
        }
    }
}

fn settle(app: &mut App, settlement: Settlement) {
    let applied = match settlement {
        Settlement::Practitioners(s) => app.practitioners.settle(s),
        Settlement::Products(s) => app.products.settle(s),
        Settlement::Categories(s) => app.categories.settle(s),
        Settlement::Search(s) => app.search.settle(s),
        Settlement::Booking(s) => match app.booking.as_mut() {
            Some(booking) => booking.settle(s),
            None => false,
        },
    };
    debug!("settlement applied: {}", applied);
}

fn fallback_alert(tab: Tab) -> &'static str {
    match tab {
        Tab::Practitioners => {
            "Unable to load practitioners. Please check your connection and try again."
        }
        Tab::Products => "Unable to load products. Please check your connection and try again.",
    }
}
