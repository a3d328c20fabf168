//! # Screen Models
//!
//! The parts of a screen that are logic rather than drawing: which panel to
//! show for a given fetch state, the favorites/cart sets, and list cursors.
//! Nothing here touches the network or outlives the screen that owns it.

use std::collections::HashSet;

use crate::api::Product;
use crate::core::fetch::FetchState;

/// What a list screen shows, in precedence order.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(&'a [T]),
}

/// Loading beats error, error beats empty, empty beats the list.
pub fn list_view<T>(state: &FetchState<Vec<T>>) -> ListView<'_, T> {
    if state.loading {
        ListView::Loading
    } else if let Some(error) = state.error.as_deref() {
        ListView::Error(error)
    } else if state.data.is_empty() {
        ListView::Empty
    } else {
        ListView::Populated(&state.data)
    }
}

/// What the add-to-cart button on a product card says and whether it works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartButton {
    Add,
    Added,
    OutOfStock,
}

impl CartButton {
    pub fn label(self) -> &'static str {
        match self {
            CartButton::Add => "Add to Cart",
            CartButton::Added => "Added to Cart",
            CartButton::OutOfStock => "Out of Stock",
        }
    }

    pub fn enabled(self) -> bool {
        self == CartButton::Add
    }
}

/// Favorites and cart membership, keyed by product id. Screen-local and
/// never persisted or sent anywhere.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    favorites: HashSet<u32>,
    cart: HashSet<u32>,
}

impl Selection {
    /// Flips favorite membership and returns the new value.
    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        }
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    /// Marks a product as in the cart. Out-of-stock products are refused;
    /// returns whether the cart changed.
    pub fn add_to_cart(&mut self, product: &Product) -> bool {
        if !product.in_stock {
            return false;
        }
        self.cart.insert(product.id)
    }

    pub fn in_cart(&self, id: u32) -> bool {
        self.cart.contains(&id)
    }

    pub fn favorites_len(&self) -> usize {
        self.favorites.len()
    }

    pub fn cart_len(&self) -> usize {
        self.cart.len()
    }

    pub fn cart_button(&self, product: &Product) -> CartButton {
        if !product.in_stock {
            CartButton::OutOfStock
        } else if self.in_cart(product.id) {
            CartButton::Added
        } else {
            CartButton::Add
        }
    }
}

/// Highlighted row in a card list, kept inside `0..len`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    selected: usize,
}

impl ListCursor {
    pub fn selected(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.selected.min(len - 1))
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(data: Vec<u32>, loading: bool, error: Option<&str>) -> FetchState<Vec<u32>> {
        FetchState {
            total: data.len() as u64,
            data,
            loading,
            error: error.map(str::to_string),
        }
    }

    fn product(id: u32, in_stock: bool) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: String::new(),
            price: 10.0,
            original_price: None,
            rating: 4.0,
            reviews: 1,
            image: String::new(),
            category: "herbs".to_string(),
            in_stock,
        }
    }

    #[test]
    fn test_loading_takes_precedence_over_error() {
        let s = state(vec![1], true, Some("boom"));
        assert_eq!(list_view(&s), ListView::Loading);
    }

    #[test]
    fn test_error_takes_precedence_over_data() {
        let s = state(vec![1], false, Some("boom"));
        assert_eq!(list_view(&s), ListView::Error("boom"));
        let empty = state(vec![], false, Some("boom"));
        assert_eq!(list_view(&empty), ListView::Error("boom"));
    }

    #[test]
    fn test_empty_then_populated() {
        assert_eq!(list_view(&state(vec![], false, None)), ListView::Empty);
        let s = state(vec![4, 5], false, None);
        assert_eq!(list_view(&s), ListView::Populated(&[4, 5][..]));
    }

    #[test]
    fn test_toggle_favorite() {
        let mut sel = Selection::default();
        assert!(sel.toggle_favorite(3));
        assert!(sel.is_favorite(3));
        assert!(!sel.toggle_favorite(3));
        assert!(!sel.is_favorite(3));
    }

    #[test]
    fn test_cart_refuses_out_of_stock() {
        let mut sel = Selection::default();
        let sold_out = product(1, false);
        assert!(!sel.add_to_cart(&sold_out));
        assert!(!sel.in_cart(1));
        assert_eq!(sel.cart_button(&sold_out), CartButton::OutOfStock);
        assert!(!sel.cart_button(&sold_out).enabled());
    }

    #[test]
    fn test_cart_add_is_one_way() {
        let mut sel = Selection::default();
        let p = product(2, true);
        assert_eq!(sel.cart_button(&p).label(), "Add to Cart");
        assert!(sel.add_to_cart(&p));
        assert!(!sel.add_to_cart(&p));
        assert_eq!(sel.cart_button(&p), CartButton::Added);
        assert_eq!(sel.cart_button(&p).label(), "Added to Cart");
        assert_eq!(sel.cart_len(), 1);
    }

    #[test]
    fn test_cursor_clamps() {
        let mut cursor = ListCursor::default();
        assert_eq!(cursor.selected(0), None);
        cursor.down(3);
        cursor.down(3);
        cursor.down(3);
        assert_eq!(cursor.selected(3), Some(2));
        // The list shrank after a refetch.
        assert_eq!(cursor.selected(1), Some(0));
        cursor.up();
        cursor.up();
        cursor.up();
        assert_eq!(cursor.selected(3), Some(0));
    }
}
