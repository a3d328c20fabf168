//! # Product List
//!
//! "Wellness Products": a category header line plus one card per product.
//! Card heights depend on how the description wraps, so they are measured
//! with the same wrapping rules before the `ScrollView` canvas is sized.
//!
//! ```text
//! ╭──────────────────────────────────────────╮
//! │ HERBS                                  ♥ │
//! │ Ashwagandha Root Powder                  │
//! │ Traditional formulation                  │
//! │ ★ 4.6 (87 reviews)                       │
//! │ $18.00  $24.00  -25%                     │
//! │ [ Add to Cart ]                          │
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

use crate::api::{Product, ProductCategory, ProductSearchQuery};
use crate::core::fetch::FetchState;
use crate::core::screen::{CartButton, Selection};
use crate::tui::component::Component;
use crate::tui::components::{
    scroll_into_view, stack_cards, stacked_height, truncate_str, wrap_lines,
};

/// Borders (2) + padding (2).
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Borders (2) + category, name, rating, price, button.
const FIXED_HEIGHT: u16 = 7;
const MAX_DESCRIPTION_LINES: usize = 2;

pub struct ProductCard<'a> {
    pub product: &'a Product,
    pub is_selected: bool,
    pub is_favorite: bool,
    pub button: CartButton,
}

impl ProductCard<'_> {
    pub fn calculate_height(product: &Product, width: u16) -> u16 {
        FIXED_HEIGHT + description(product, width).len() as u16
    }
}

fn description(product: &Product, width: u16) -> Vec<String> {
    let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
    let mut lines = wrap_lines(&product.description, inner);
    if lines.len() > MAX_DESCRIPTION_LINES {
        lines.truncate(MAX_DESCRIPTION_LINES);
        if let Some(last) = lines.last_mut() {
            *last = truncate_str(&format!("{last}..."), inner as usize);
        }
    }
    lines
}

impl Widget for ProductCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.product;
        let inner = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let dim = Style::default().fg(Color::DarkGray);

        let category = truncate_str(&p.category.to_uppercase(), inner.saturating_sub(2));
        let heart = if self.is_favorite { "♥" } else { "♡" };
        let gap = inner.saturating_sub(category.width() + heart.width());
        let mut lines = vec![
            Line::from(vec![
                Span::styled(category, dim),
                Span::raw(" ".repeat(gap)),
                Span::styled(heart, Style::default().fg(Color::LightRed)),
            ]),
            Line::from(Span::styled(
                truncate_str(&p.name, inner),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(description(p, area.width).into_iter().map(Line::from));
        lines.push(Line::from(vec![
            Span::styled(format!("★ {:.1}", p.rating), Style::default().fg(Color::Yellow)),
            Span::styled(format!(" ({} reviews)", p.reviews), dim),
        ]));

        let mut price = vec![Span::styled(
            format!("${:.2}", p.price),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )];
        if let Some(original) = p.original_price {
            price.push(Span::raw("  "));
            price.push(Span::styled(
                format!("${:.2}", original),
                dim.add_modifier(Modifier::CROSSED_OUT),
            ));
        }
        if let Some(discount) = p.discount_percent() {
            price.push(Span::styled(
                format!("  -{}%", discount),
                Style::default().fg(Color::LightRed),
            ));
        }
        lines.push(Line::from(price));

        let button_style = match self.button {
            CartButton::Add => Style::default().fg(Color::Black).bg(Color::LightYellow),
            CartButton::Added => Style::default().fg(Color::Green),
            CartButton::OutOfStock => dim.add_modifier(Modifier::DIM),
        };
        lines.push(Line::from(Span::styled(
            format!("[ {} ]", self.button.label()),
            button_style,
        )));

        let border_style = if self.is_selected {
            Style::default().fg(Color::LightYellow)
        } else {
            dim
        };
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .padding(Padding::horizontal(1)),
            )
            .render(area, buf);
    }
}

pub struct ProductList<'a> {
    pub products: &'a [Product],
    pub selected: Option<usize>,
    pub selection: &'a Selection,
    pub scroll_state: &'a mut ScrollViewState,
}

impl Component for ProductList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1);
        let heights: Vec<u16> = self
            .products
            .iter()
            .map(|p| ProductCard::calculate_height(p, content_width))
            .collect();
        let tops = stack_cards(&heights);
        let total_height = stacked_height(&tops, &heights);

        if let Some(i) = self.selected {
            if let (Some(&top), Some(&height)) = (tops.get(i), heights.get(i)) {
                scroll_into_view(self.scroll_state, top, height, area.height);
            }
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (i, ((product, &top), &height)) in
            self.products.iter().zip(&tops).zip(&heights).enumerate()
        {
            let rect = Rect::new(0, top, content_width, height);
            scroll_view.render_widget(
                ProductCard {
                    product,
                    is_selected: self.selected == Some(i),
                    is_favorite: self.selection.is_favorite(product.id),
                    button: self.selection.cart_button(product),
                },
                rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, self.scroll_state);
    }
}

/// One line above the product cards: category counts, or what the active
/// search matched.
pub struct CategoryHeader<'a> {
    pub categories: &'a FetchState<Vec<ProductCategory>>,
    pub search: Option<&'a ProductSearchQuery>,
    pub shown: usize,
    pub total: u64,
}

impl CategoryHeader<'_> {
    fn text(&self) -> String {
        if let Some(search) = self.search {
            return format!(
                "Results for \"{}\" · {} of {} · Esc to clear",
                search.q, self.shown, self.total
            );
        }
        let c = self.categories;
        if c.loading {
            String::from("Categories: loading...")
        } else if let Some(error) = &c.error {
            format!("Categories unavailable: {}", error)
        } else if c.data.is_empty() {
            String::from("Categories: none")
        } else {
            let names: Vec<String> = c
                .data
                .iter()
                .map(|cat| format!("{} ({})", cat.name, cat.count))
                .collect();
            format!("Categories: {}", names.join(" · "))
        }
    }
}

impl Component for CategoryHeader<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = truncate_str(&self.text(), area.width as usize);
        frame.render_widget(
            Span::styled(text, Style::default().fg(Color::Cyan)),
            area,
        );
    }
}
