//! # TUI Components
//!
//! Every widget the terminal front-end draws.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as fields and render it:
//! - `TitleBar`: Top line with tabs, favorites/cart counts and status
//! - `StatusPanel`: Loading, error and empty placeholders for a list
//! - `PractitionerCard` / `ProductCard`: One card in a list
//! - `BookingView`: Practitioner detail behind the booking screen
//! - `AlertDialog`: The "Connection Error" retry confirmation
//!
//! ### Scrolling Lists
//!
//! `PractitionerList` and `ProductList` borrow a `ScrollViewState` from
//! `TuiState` and keep the highlighted card on screen.
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! TitleBar::new(app.tab, &app.status_message, counts).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! title_bar.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs                (this file, shared text helpers)
//! ├── title_bar.rs          (Top status bar)
//! ├── status_panel.rs       (Loading / error / empty)
//! ├── practitioner_list.rs  (Practitioner cards)
//! ├── product_list.rs       (Product cards, category header)
//! ├── booking.rs            (Booking screen)
//! └── alert.rs              (Retry confirmation overlay)
//! ```

pub mod alert;
pub mod booking;
pub mod practitioner_list;
pub mod product_list;
pub mod status_panel;
pub mod title_bar;

pub use alert::AlertDialog;
pub use booking::BookingView;
pub use practitioner_list::PractitionerList;
pub use product_list::{CategoryHeader, ProductList};
pub use status_panel::StatusPanel;
pub use title_bar::TitleBar;

use ratatui::layout::{Constraint, Layout, Position, Rect};
use tui_scrollview::ScrollViewState;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to fit within `max_width` terminal columns, adding
/// "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Wrap text the way `Paragraph` with `Wrap { trim: true }` does, so card
/// heights can be computed before rendering.
pub(crate) fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    textwrap::wrap(text.trim(), options)
        .into_iter()
        .map(|l| l.into_owned())
        .collect()
}

/// Adjust the scroll offset so rows `top..top + height` are inside a
/// viewport of `viewport` rows.
pub(crate) fn scroll_into_view(state: &mut ScrollViewState, top: u16, height: u16, viewport: u16) {
    let offset = state.offset().y;
    let y = if top < offset {
        top
    } else if top.saturating_add(height) > offset.saturating_add(viewport) {
        top.saturating_add(height).saturating_sub(viewport)
    } else {
        return;
    };
    state.set_offset(Position { x: 0, y });
}

/// Top row of each card stacked from y = 0. Cards that would run past the
/// `u16` canvas are left out, so the result can be shorter than `heights`.
pub(crate) fn stack_cards(heights: &[u16]) -> Vec<u16> {
    let mut tops = Vec::with_capacity(heights.len());
    let mut y: u16 = 0;
    for &height in heights {
        let Some(bottom) = y.checked_add(height) else {
            break;
        };
        tops.push(y);
        y = bottom;
    }
    tops
}

/// Canvas height needed for the cards `stack_cards` placed.
pub(crate) fn stacked_height(tops: &[u16], heights: &[u16]) -> u16 {
    match tops.last() {
        Some(&top) => top.saturating_add(heights[tops.len() - 1]),
        None => 0,
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_fits() {
        assert_eq!(truncate_str("Ashwagandha", 20), "Ashwagandha");
    }

    #[test]
    fn test_truncate_str_adds_ellipsis() {
        assert_eq!(truncate_str("Ashwagandha Root Powder", 10), "Ashwag...");
    }

    #[test]
    fn test_truncate_str_counts_wide_chars() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate_str("生姜生姜生姜", 7), "生姜...");
    }

    #[test]
    fn test_truncate_str_tiny_width() {
        assert_eq!(truncate_str("Tulsi", 2), "..");
    }

    #[test]
    fn test_scroll_into_view() {
        let mut state = ScrollViewState::default();
        scroll_into_view(&mut state, 20, 5, 10);
        assert_eq!(state.offset().y, 15);
        scroll_into_view(&mut state, 17, 5, 10);
        assert_eq!(state.offset().y, 15);
        scroll_into_view(&mut state, 5, 5, 10);
        assert_eq!(state.offset().y, 5);
    }

    #[test]
    fn test_stack_cards_stops_at_canvas_limit() {
        assert_eq!(stack_cards(&[5, 7, 5]), vec![0, 5, 12]);
        assert_eq!(stacked_height(&[0, 5, 12], &[5, 7, 5]), 17);

        let heights = vec![7u16; 10_000];
        let tops = stack_cards(&heights);
        assert_eq!(tops.len(), usize::from(u16::MAX / 7));
        assert_eq!(stacked_height(&tops, &heights), u16::MAX / 7 * 7);
        assert_eq!(stacked_height(&[], &[]), 0);
    }

    #[test]
    fn test_scroll_into_view_near_canvas_limit() {
        let mut state = ScrollViewState::default();
        scroll_into_view(&mut state, u16::MAX - 3, 7, 10);
        assert_eq!(state.offset().y, u16::MAX - 10);
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("calming herbal blend for sleep", 12);
        assert_eq!(lines, vec!["calming", "herbal blend", "for sleep"]);
        assert!(wrap_lines("anything", 0).is_empty());
    }
}
