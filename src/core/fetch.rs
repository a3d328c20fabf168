//! # Fetch State Machine
//!
//! One [`Query`] per data-fetching hook instance. It owns a [`FetchState`]
//! and decides which settled results are allowed to write into it.
//!
//! ```text
//!            begin()                 settle(Ok)
//!   idle ───────────▶ loading ─────────────────▶ success
//!    ▲                  ▲  │                        │
//!    │ reset()          │  │ settle(Err)            │ begin()
//!    │                  │  ▼                        │
//!    └───────────────── failure ◀───────────────────┘
//!                         begin()
//! ```
//!
//! `begin()` hands out a [`Ticket`]. The network work itself lives in a
//! [`Pending`], a boxed `'static` future, so the caller decides where it
//! runs (the TUI spawns it on tokio, tests just await it). Whatever comes
//! back is a [`Settled`] that goes through `settle()`.
//!
//! ## Overlapping requests
//!
//! Nothing is cancelled, so two requests on the same query can settle in
//! either order. [`SettleOrder`] chooses what happens then:
//!
//! - `Latest`: only the ticket of the newest `begin()` may write. Older
//!   results are dropped and `loading` stays on until the newest settles.
//! - `Settled`: every result writes in the order it arrives. A slow old
//!   response can overwrite a newer one. Kept for parity with the legacy
//!   client.
//!
//! In both modes a ticket from a different query instance never applies,
//! so results for an unmounted hook are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);

/// Everything a screen needs to render one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    pub total: u64,
}

impl<T: Default> FetchState<T> {
    /// Shape of a hook that fetches on mount.
    pub fn loading() -> Self {
        Self {
            data: T::default(),
            loading: true,
            error: None,
            total: 0,
        }
    }

    /// Shape of a hook with nothing to fetch yet.
    pub fn idle() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
            total: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettleOrder {
    /// Newest request wins; stale responses are discarded.
    #[default]
    Latest,
    /// Last response to arrive wins, whichever request it belongs to.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    query: u64,
    generation: u64,
}

/// A successful fetch before it is written into state.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub total: u64,
}

pub type FetchFuture<T> = BoxFuture<'static, Result<Loaded<T>, ApiError>>;

/// An issued request that has not been run yet.
pub struct Pending<T> {
    ticket: Ticket,
    future: FetchFuture<T>,
}

impl<T> Pending<T> {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Runs the request to completion.
    pub async fn resolve(self) -> Settled<T> {
        Settled {
            ticket: self.ticket,
            outcome: self.future.await,
        }
    }
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending").field("ticket", &self.ticket).finish()
    }
}

/// The outcome of a [`Pending`], tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct Settled<T> {
    pub ticket: Ticket,
    pub outcome: Result<Loaded<T>, ApiError>,
}

pub struct Query<T> {
    id: u64,
    generation: u64,
    /// Tickets at or below this generation were issued before the last reset.
    reset_floor: u64,
    order: SettleOrder,
    /// Shown when an error carries no readable message of its own.
    fallback: &'static str,
    state: FetchState<T>,
}

impl<T: Send + 'static> Query<T> {
    pub fn new(initial: FetchState<T>, order: SettleOrder, fallback: &'static str) -> Self {
        Self {
            id: NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            reset_floor: 0,
            order,
            fallback,
            state: initial,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn order(&self) -> SettleOrder {
        self.order
    }

    /// Enters `loading`, clears any previous error, and issues a ticket.
    /// Data from the previous settle stays visible until this one lands.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;
        debug!("query {} begin generation {}", self.id, self.generation);
        Ticket {
            query: self.id,
            generation: self.generation,
        }
    }

    /// Pairs a fresh ticket with the future that will answer it.
    pub fn issue(&mut self, future: FetchFuture<T>) -> Pending<T> {
        Pending {
            ticket: self.begin(),
            future,
        }
    }

    /// Writes a settled result into state. Returns `false` when the result
    /// was discarded.
    pub fn settle(&mut self, settled: Settled<T>) -> bool {
        let Settled { ticket, outcome } = settled;

        if ticket.query != self.id {
            info!(
                "query {} discarding result for query {} (unmounted)",
                self.id, ticket.query
            );
            return false;
        }
        if ticket.generation <= self.reset_floor {
            info!(
                "query {} discarding generation {} issued before reset",
                self.id, ticket.generation
            );
            return false;
        }
        if self.order == SettleOrder::Latest && ticket.generation != self.generation {
            info!(
                "query {} discarding stale generation {} (latest is {})",
                self.id, ticket.generation, self.generation
            );
            return false;
        }

        match outcome {
            Ok(Loaded { data, total }) => {
                debug!("query {} settled generation {} ok", self.id, ticket.generation);
                self.state = FetchState {
                    data,
                    loading: false,
                    error: None,
                    total,
                };
            }
            Err(e) => {
                debug!(
                    "query {} settled generation {} with error: {}",
                    self.id, ticket.generation, e
                );
                self.state.loading = false;
                self.state.error =
                    Some(e.user_message().unwrap_or_else(|| self.fallback.to_string()));
            }
        }
        true
    }

    /// Synchronously returns to the idle shape. Requests already in flight
    /// become stale.
    pub fn reset(&mut self, data: T) {
        self.generation += 1;
        self.reset_floor = self.generation;
        self.state = FetchState {
            data,
            loading: false,
            error: None,
            total: 0,
        };
    }
}

/// Wraps an async API call into a [`FetchFuture`].
pub fn fetch_with<T, F>(future: F) -> FetchFuture<T>
where
    T: Send + 'static,
    F: std::future::Future<Output = Result<Loaded<T>, ApiError>> + Send + 'static,
{
    future.boxed()
}
