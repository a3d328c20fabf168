use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::screen::{ListView, list_view};
use crate::core::state::{App, Tab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::status_panel::PanelKind;
use crate::tui::components::{
    AlertDialog, BookingView, CategoryHeader, PractitionerList, ProductList, StatusPanel,
    TitleBar,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1)]);
    let [title_area, heading_area, main_area, footer_area] = layout.areas(frame.area());

    TitleBar::new(
        app.tab,
        &app.status_message,
        app.selection.favorites_len(),
        app.selection.cart_len(),
    )
    .render(frame, title_area);

    if let Some(booking) = &app.booking {
        BookingView {
            state: booking.state(),
            spinner_frame,
        }
        .render(frame, heading_area.union(main_area));
    } else {
        match app.tab {
            Tab::Practitioners => {
                draw_practitioners(frame, heading_area, main_area, app, tui, spinner_frame)
            }
            Tab::Products => {
                draw_products(frame, heading_area, main_area, app, tui, spinner_frame)
            }
        }
    }

    draw_footer(frame, footer_area, app);

    if let Some(alert) = &app.alert {
        AlertDialog { alert }.render(frame, frame.area());
    }
}

fn heading(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Span::styled(text.to_string(), Style::default().fg(Color::LightYellow)),
        area,
    );
}

fn draw_practitioners(
    frame: &mut Frame,
    heading_area: Rect,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    heading(frame, heading_area, "Featured Practitioners");
    let kind = match list_view(app.practitioners.state()) {
        ListView::Populated(practitioners) => {
            PractitionerList {
                practitioners,
                selected: app.practitioner_cursor.selected(practitioners.len()),
                scroll_state: &mut tui.practitioner_scroll,
            }
            .render(frame, area);
            return;
        }
        ListView::Loading => PanelKind::Loading,
        ListView::Error(message) => PanelKind::Error(message),
        ListView::Empty => PanelKind::Empty,
    };
    frame.render_widget(StatusPanel::new(kind, "practitioners", spinner_frame), area);
}

fn draw_products(
    frame: &mut Frame,
    heading_area: Rect,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    let list = app.product_list();
    CategoryHeader {
        categories: app.categories.state(),
        search: app.search.active(),
        shown: list.data.len(),
        total: list.total,
    }
    .render(frame, heading_area);

    let kind = match list_view(list) {
        ListView::Populated(products) => {
            ProductList {
                products,
                selected: app.product_cursor.selected(products.len()),
                selection: &app.selection,
                scroll_state: &mut tui.product_scroll,
            }
            .render(frame, area);
            return;
        }
        ListView::Loading => PanelKind::Loading,
        ListView::Error(message) => PanelKind::Error(message),
        ListView::Empty => PanelKind::Empty,
    };
    frame.render_widget(StatusPanel::new(kind, "products", spinner_frame), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(input) = &app.search_input {
        let line = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::LightYellow)),
            Span::raw(input.as_str()),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(line, area);
        return;
    }

    let help = match (app.booking.is_some(), app.tab) {
        (true, _) => "Esc Back  R Refresh  q Quit",
        (false, Tab::Practitioners) => "↑↓ Move  Enter Book  R Refresh  Tab Switch  q Quit",
        (false, Tab::Products) => {
            "↑↓ Move  f Favorite  c Cart  / Search  R Refresh  Tab Switch  q Quit"
        }
    };
    frame.render_widget(
        Span::styled(help, Style::default().fg(Color::DarkGray)),
        area,
    );
}
