//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screens,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Requests
//!
//! `update()` never performs I/O. When it returns `Effect::Fetch`, each
//! [`Fetch`] is spawned on the tokio runtime and its settlement comes back
//! through a channel as `Action::Settled`, which the loop feeds to
//! `update()` like any key press.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (any visible request in flight): draws every ~80ms so the
//!   spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events, settlements or
//!   terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use tui_scrollview::ScrollViewState;

use crate::core::action::{Action, Effect, Fetch, update};
use crate::core::state::{App, Tab};
use crate::tui::event::{TuiEvent, action_for, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    pub practitioner_scroll: ScrollViewState,
    pub product_scroll: ScrollViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (cursor hidden)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Whether anything on the visible screen is waiting on the network.
fn is_animating(app: &App) -> bool {
    if let Some(booking) = &app.booking {
        return booking.state().loading;
    }
    match app.tab {
        Tab::Practitioners => app.practitioners.state().loading,
        Tab::Products => app.product_list().loading || app.categories.state().loading,
    }
}

/// Runs the terminal UI until the user quits. `mount` holds the requests
/// issued when `app` was mounted.
pub fn run(mut app: App, mount: Vec<Fetch>) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for settlements from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_fetches(mount, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = is_animating(&app);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let Some(action) = action_for(&app, &event) else {
                continue;
            };
            debug!("Key action: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::Fetch(fetches) => spawn_fetches(fetches, &tx),
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle settlements from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if let Effect::Fetch(fetches) = update(&mut app, action) {
                spawn_fetches(fetches, &tx);
            }
        }
    }

    info!("Tangerine shutting down");
    ratatui::restore();
    Ok(())
}

fn spawn_fetches(fetches: Vec<Fetch>, tx: &mpsc::Sender<Action>) {
    for fetch in fetches {
        debug!("Spawning request: {:?}", fetch);
        let tx = tx.clone();
        tokio::spawn(async move {
            let action = fetch.run().await;
            if tx.send(action).is_err() {
                warn!("Failed to deliver settlement: receiver dropped");
            }
        });
    }
}
