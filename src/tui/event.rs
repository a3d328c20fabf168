use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::action::Action;
use crate::core::state::{App, Tab};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C: quits from any mode
    Resize,
    InputChar(char),
    Backspace,
    Submit,
    Escape,
    NextTab,
    CursorUp,
    CursorDown,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) if key_event.kind != KeyEventKind::Release => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Tab) => Some(TuiEvent::NextTab),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                _ => None,
            }
        }
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Translates a key into a core action. The open overlay (alert, then
/// search prompt) takes every key before the screen does.
pub fn action_for(app: &App, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if app.alert.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::InputChar('y') => Some(Action::ConfirmAlert),
            TuiEvent::Escape | TuiEvent::InputChar('n') => Some(Action::DismissAlert),
            _ => None,
        };
    }

    if app.search_input.is_some() {
        return match event {
            TuiEvent::InputChar(c) => Some(Action::SearchChar(*c)),
            TuiEvent::Backspace => Some(Action::SearchBackspace),
            TuiEvent::Submit => Some(Action::SubmitSearch),
            TuiEvent::Escape => Some(Action::CancelSearch),
            _ => None,
        };
    }

    match event {
        TuiEvent::NextTab => Some(Action::NextTab),
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => Some(Action::CursorUp),
        TuiEvent::CursorDown | TuiEvent::InputChar('j') => Some(Action::CursorDown),
        TuiEvent::Submit => Some(Action::Open),
        TuiEvent::Escape => Some(Action::Back),
        TuiEvent::InputChar('1') => Some(Action::SelectTab(Tab::Practitioners)),
        TuiEvent::InputChar('2') => Some(Action::SelectTab(Tab::Products)),
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('R') => Some(Action::Refresh),
        TuiEvent::InputChar('r') => Some(Action::Retry),
        TuiEvent::InputChar('f') => Some(Action::ToggleFavorite),
        TuiEvent::InputChar('c') => Some(Action::AddToCart),
        TuiEvent::InputChar('/') => Some(Action::OpenSearch),
        _ => None,
    }
}
