//! # TitleBar Component
//!
//! Top line of the screen: app name, the two tabs, selection counts and the
//! current status message.
//!
//! ```text
//!  Tangerine  1 Practitioners  2 Products   ♥ 2  Cart 1 | Added Ghee to cart (1 items)
//! ```
//!
//! Stateless: every field is a prop, so the same bar renders for any App.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::Tab;
use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub active: Tab,
    pub status_message: &'a str,
    pub favorites: usize,
    pub cart: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(active: Tab, status_message: &'a str, favorites: usize, cart: usize) -> Self {
        Self {
            active,
            status_message,
            favorites,
            cart,
        }
    }

    fn tab_span(&self, tab: Tab, key: char) -> Span<'static> {
        let label = format!(" {} {} ", key, tab.title());
        if tab == self.active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " Tangerine ",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            self.tab_span(Tab::Practitioners, '1'),
            Span::raw(" "),
            self.tab_span(Tab::Products, '2'),
            Span::raw("  "),
            Span::styled(
                format!("♥ {}  Cart {}", self.favorites, self.cart),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
