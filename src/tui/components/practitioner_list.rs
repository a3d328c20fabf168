//! # Practitioner List
//!
//! "Featured Practitioners": one bordered card per practitioner inside a
//! vertical `ScrollView`. The highlighted card is kept on screen.
//!
//! ```text
//! ╭──────────────────────────────────────────╮
//! │ Dr. Asha Menon                     ★ 4.8 │
//! │ Panchakarma · 12 years                   │
//! │ Kochi · Next: Today 4:00 PM              │
//! ╰──────────────────────────────────────────╯
//! ```

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::api::Practitioner;
use crate::tui::component::Component;
use crate::tui::components::{scroll_into_view, stack_cards, stacked_height, truncate_str};

/// Borders (2) + three content lines.
pub const CARD_HEIGHT: u16 = 5;
/// Borders (2) + padding (2).
const HORIZONTAL_OVERHEAD: u16 = 4;

pub struct PractitionerCard<'a> {
    pub practitioner: &'a Practitioner,
    pub is_selected: bool,
}

impl Widget for PractitionerCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.practitioner;
        let inner = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let rating = format!("★ {:.1}", p.rating);
        let name = truncate_str(&p.name, inner.saturating_sub(rating.width() + 1));
        let gap = inner.saturating_sub(name.width() + rating.width());

        let border_style = if self.is_selected {
            Style::default().fg(Color::LightYellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" ".repeat(gap)),
                Span::styled(rating, Style::default().fg(Color::Yellow)),
            ]),
            Line::from(truncate_str(
                &format!("{} · {}", p.specialty, p.experience),
                inner,
            )),
            Line::from(Span::styled(
                truncate_str(&format!("{} · Next: {}", p.location, p.next_available), inner),
                Style::default().fg(Color::Green),
            )),
        ];

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .padding(Padding::horizontal(1)),
            )
            .render(area, buf);
    }
}

pub struct PractitionerList<'a> {
    pub practitioners: &'a [Practitioner],
    pub selected: Option<usize>,
    pub scroll_state: &'a mut ScrollViewState,
}

impl Component for PractitionerList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1);
        let heights = vec![CARD_HEIGHT; self.practitioners.len()];
        let tops = stack_cards(&heights);
        let total_height = stacked_height(&tops, &heights);

        if let Some(&top) = self.selected.and_then(|i| tops.get(i)) {
            scroll_into_view(self.scroll_state, top, CARD_HEIGHT, area.height);
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (i, (practitioner, &top)) in self.practitioners.iter().zip(&tops).enumerate() {
            let rect = Rect::new(0, top, content_width, CARD_HEIGHT);
            scroll_view.render_widget(
                PractitionerCard {
                    practitioner,
                    is_selected: self.selected == Some(i),
                },
                rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, self.scroll_state);
    }
}
