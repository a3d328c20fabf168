//! # StatusPanel Component
//!
//! What a list shows when it has nothing to list: a spinner while loading,
//! an inline error with the retry hint, or the empty state.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind<'a> {
    Loading,
    Error(&'a str),
    Empty,
}

pub struct StatusPanel<'a> {
    pub kind: PanelKind<'a>,
    /// Plural resource name, e.g. "practitioners".
    pub noun: &'a str,
    pub spinner_frame: usize,
}

impl<'a> StatusPanel<'a> {
    pub fn new(kind: PanelKind<'a>, noun: &'a str, spinner_frame: usize) -> Self {
        Self {
            kind,
            noun,
            spinner_frame,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let hint = Style::default().fg(Color::DarkGray);
        match self.kind {
            PanelKind::Loading => vec![Line::from(vec![
                Span::styled(
                    SPINNER[self.spinner_frame % SPINNER.len()],
                    Style::default().fg(Color::LightYellow),
                ),
                Span::raw(format!(" Loading {}...", self.noun)),
            ])],
            PanelKind::Error(message) => vec![
                Line::from(Span::styled(
                    format!("Unable to load {}", self.noun),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(message),
                Line::default(),
                Line::from(Span::styled("Press r to retry", hint)),
            ],
            PanelKind::Empty => vec![
                Line::from(format!("No {} found", self.noun)),
                Line::default(),
                Line::from(Span::styled("Press R to refresh", hint)),
            ],
        }
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let inner = Rect::new(area.x, area.y + top, area.width, area.height - top);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
