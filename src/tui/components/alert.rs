//! # Alert Dialog
//!
//! Centered confirmation drawn over the current screen, used for the
//! "Connection Error" retry prompt. `Enter`/`y` retries, `Esc`/`n` cancels.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::state::Alert;
use crate::tui::component::Component;
use crate::tui::components::centered_rect;

pub struct AlertDialog<'a> {
    pub alert: &'a Alert,
}

impl Component for AlertDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.alert.title))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(" Enter Retry  Esc Cancel ").centered())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(self.alert.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Tab;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_alert_renders_title_and_actions() {
        let alert = Alert {
            title: "Connection Error",
            message: "Network error. Please check your connection.".to_string(),
            target: Tab::Products,
        };
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| AlertDialog { alert: &alert }.render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("Connection Error"));
        assert!(text.contains("Network error."));
        assert!(text.contains("Enter Retry"));
    }
}
