//! # Booking View
//!
//! Detail screen opened from a practitioner card. Backed by its own
//! `PractitionerDetail` hook, so it has the same loading/error states as the
//! lists.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::api::Practitioner;
use crate::core::fetch::FetchState;
use crate::tui::component::Component;
use crate::tui::components::StatusPanel;
use crate::tui::components::status_panel::PanelKind;

pub struct BookingView<'a> {
    pub state: &'a FetchState<Option<Practitioner>>,
    pub spinner_frame: usize,
}

fn detail_lines(p: &Practitioner) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::DarkGray);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name:<12}"), label), Span::raw(value)])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            p.name.as_str(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(p.specialty.as_str()),
        Line::default(),
        field("Rating", format!("★ {:.1}", p.rating)),
        field("Experience", p.experience.clone()),
        field("Location", p.location.clone()),
        field("Next slot", p.next_available.clone()),
    ];

    if let Some(languages) = p.languages.as_ref().filter(|l| !l.is_empty()) {
        lines.push(field("Languages", languages.join(", ")));
    }
    if let Some(description) = &p.description {
        lines.push(Line::default());
        lines.push(Line::from(description.as_str()));
    }
    if let Some(qualifications) = p.qualifications.as_ref().filter(|q| !q.is_empty()) {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Qualifications", label)));
        lines.extend(
            qualifications
                .iter()
                .map(|q| Line::from(format!("  • {q}"))),
        );
    }
    lines
}

impl Component for BookingView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Book an Appointment ")
            .title_bottom(Line::from(" Esc Back  R Refresh ").centered())
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let kind = if self.state.loading {
            PanelKind::Loading
        } else if let Some(error) = &self.state.error {
            PanelKind::Error(error)
        } else if let Some(p) = &self.state.data {
            let details = Paragraph::new(detail_lines(p)).wrap(Wrap { trim: true });
            frame.render_widget(details, inner);
            return;
        } else {
            PanelKind::Empty
        };
        frame.render_widget(StatusPanel::new(kind, "practitioner", self.spinner_frame), inner);
    }
}
