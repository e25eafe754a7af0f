use crate::domain::{CartItem, Product, WishlistItem};

use super::search::filter_products;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Loaded,
}

/// Everything the shell holds between page renders.
#[derive(Debug, Clone, Default)]
pub struct ShellState {
    pub phase: LoadPhase,
    pub products: Vec<Product>,
    pub filtered_products: Vec<Product>,
    pub cart_items: Vec<CartItem>,
    pub wishlist: Vec<WishlistItem>,
    pub search_term: String,
}

impl ShellState {
    /// Units across all lines, not the number of lines. Saturates at `u32::MAX`.
    pub fn cart_item_count(&self) -> u32 {
        self.cart_items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    pub fn cart_subtotal(&self) -> f64 {
        self.cart_items.iter().map(CartItem::line_total).sum()
    }

    /// Re-filters from `products`, which is never touched.
    pub fn apply_search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filtered_products = filter_products(&self.products, term);
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.filtered_products = filter_products(&self.products, &self.search_term);
    }

    /// Replaces the line with the same id, or appends it.
    pub fn upsert_cart_item(&mut self, item: CartItem) {
        match self.cart_items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => *line = item,
            None => self.cart_items.push(item),
        }
    }
}
