//! # Core Application Logic
//!
//! Tangerine's fetch machinery and screen state.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Hooks (fetch state)  │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Layered configuration (defaults, file, env, CLI)
//! - [`fetch`]: The per-hook loading/error/data state machine
//! - [`hooks`]: One state container per remote resource
//! - [`screen`]: View precedence, favorites and cart sets
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer

pub mod action;
pub mod config;
pub mod fetch;
pub mod hooks;
pub mod screen;
pub mod state;
