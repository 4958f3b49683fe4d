//! Shopping cart
//!
//! A cart is an ordered list of line items. Each line holds a shared handle
//! to a catalog product and a positive quantity.

use thiserror::Error;

use super::product::SharedProduct;
use super::sort::{self, SortAlgorithm, SortKey, SortOrder};

#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("Cart line for '{0}' has zero quantity")]
    ZeroQuantity(String),
}

/// A (product, quantity) pair in the cart
#[derive(Debug, Clone)]
pub struct CartLineItem {
    /// Shared handle to the catalog product
    pub product: SharedProduct,

    /// Number of units, always at least 1 inside a cart
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product: SharedProduct, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Name of the referenced product
    pub fn name(&self) -> String {
        self.product.borrow().name.clone()
    }

    /// Price multiplied by quantity
    pub fn line_cost(&self) -> f64 {
        self.product.borrow().price * f64::from(self.quantity)
    }

    /// Weight multiplied by quantity
    pub fn line_weight(&self) -> f64 {
        self.product.borrow().weight * f64::from(self.quantity)
    }

    fn is_for(&self, name: &str) -> bool {
        self.product.borrow().is_named(name)
    }
}

/// Ordered collection of cart lines
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds units of a product
    ///
    /// Merges into the existing line with the same product name, otherwise
    /// appends a new line. A zero quantity is ignored; a merged quantity
    /// saturates at `u32::MAX`.
    pub fn add_item(&mut self, product: SharedProduct, quantity: u32) {
        if quantity == 0 {
            return;
        }

        let name = product.borrow().name.clone();
        match self.lines.iter_mut().find(|line| line.is_for(&name)) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLineItem::new(product, quantity)),
        }
    }

    /// Removes units of the named product
    ///
    /// The line is deleted when `quantity` reaches or exceeds what is in the
    /// cart. Returns false when no line has that name.
    pub fn remove_item(&mut self, name: &str, quantity: u32) -> bool {
        let Some(index) = self.lines.iter().position(|line| line.is_for(name)) else {
            return false;
        };

        if self.lines[index].quantity <= quantity {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity -= quantity;
        }
        true
    }

    /// Removes every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over all lines
    pub fn total_cost(&self) -> f64 {
        self.lines.iter().map(CartLineItem::line_cost).sum()
    }

    /// Sum of weight times quantity over all lines
    pub fn total_weight(&self) -> f64 {
        self.lines.iter().map(CartLineItem::line_weight).sum()
    }

    /// Read-only view of the lines in cart order
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Takes the lines out, leaving the cart empty
    pub fn take_lines(&mut self) -> Vec<CartLineItem> {
        std::mem::take(&mut self.lines)
    }

    /// Replaces the lines with a reordered sequence
    ///
    /// Rejects the whole sequence if any line has a zero quantity.
    pub fn replace_lines(&mut self, lines: Vec<CartLineItem>) -> Result<(), CartError> {
        if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
            return Err(CartError::ZeroQuantity(line.name()));
        }
        self.lines = lines;
        Ok(())
    }

    /// Reorders the lines in place
    pub fn sort(&mut self, key: SortKey, order: SortOrder, algorithm: SortAlgorithm) {
        let lines = self.take_lines();
        self.lines = sort::sort(lines, key, order, algorithm);
    }

    /// Returns the number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, Product, ProductUpdate};
    use std::rc::Rc;

    fn lamp() -> SharedProduct {
        Product::new("Lamp", "Home", 25.0, 900.0).into_shared()
    }

    #[test]
    fn add_same_product_merges() {
        let mut cart = Cart::new();
        let product = lamp();

        cart.add_item(Rc::clone(&product), 1);
        cart.add_item(Rc::clone(&product), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn add_merges_by_name_not_handle() {
        let mut cart = Cart::new();

        cart.add_item(lamp(), 1);
        cart.add_item(lamp(), 4);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn add_zero_is_ignored() {
        let mut cart = Cart::new();
        cart.add_item(lamp(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn merged_quantity_saturates_instead_of_wrapping() {
        let mut cart = Cart::new();
        let product = lamp();

        cart.add_item(Rc::clone(&product), u32::MAX);
        cart.add_item(Rc::clone(&product), 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert!(cart.lines().iter().all(|line| line.quantity > 0));
    }

    #[test]
    fn remove_decrements() {
        let mut cart = Cart::new();
        cart.add_item(lamp(), 3);

        assert!(cart.remove_item("Lamp", 1));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn remove_more_than_present_deletes_line() {
        let mut cart = Cart::new();
        cart.add_item(lamp(), 2);

        assert!(cart.remove_item("Lamp", 5));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_exact_quantity_deletes_line() {
        let mut cart = Cart::new();
        cart.add_item(lamp(), 2);

        assert!(cart.remove_item("Lamp", 2));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_unknown_name() {
        let mut cart = Cart::new();
        cart.add_item(lamp(), 1);

        assert!(!cart.remove_item("Chair", 1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn totals() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("A", "X", 2.5, 100.0).into_shared(), 2);
        cart.add_item(Product::new("B", "X", 10.0, 50.0).into_shared(), 3);

        assert_eq!(cart.total_cost(), 35.0);
        assert_eq!(cart.total_weight(), 350.0);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(lamp(), 1);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_cost(), 0.0);
    }

    #[test]
    fn catalog_edit_visible_in_cart() {
        let mut catalog = Catalog::from_products([Product::new("Lamp", "Home", 25.0, 900.0)]);
        let mut cart = Cart::new();
        cart.add_item(Rc::clone(catalog.find("Lamp").unwrap()), 2);

        catalog.edit("Lamp", &[ProductUpdate::Price(40.0)]).unwrap();

        assert_eq!(cart.total_cost(), 80.0);
    }

    #[test]
    fn replace_lines_rejects_zero_quantity() {
        let mut cart = Cart::new();
        cart.add_item(lamp(), 1);

        let result = cart.replace_lines(vec![CartLineItem::new(lamp(), 0)]);

        assert_eq!(result, Err(CartError::ZeroQuantity("Lamp".into())));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn sort_keeps_membership_and_quantities() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("A", "X", 3.0, 1.0).into_shared(), 1);
        cart.add_item(Product::new("B", "X", 1.0, 1.0).into_shared(), 7);
        cart.add_item(Product::new("C", "X", 2.0, 1.0).into_shared(), 4);

        cart.sort(SortKey::Price, SortOrder::Ascending, SortAlgorithm::Partition);

        let got: Vec<_> = cart.lines().iter().map(|l| (l.name(), l.quantity)).collect();
        assert_eq!(
            got,
            vec![("B".to_string(), 7), ("C".to_string(), 4), ("A".to_string(), 1)]
        );
    }
}
