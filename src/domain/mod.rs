//! Domain models for the shop
//!
//! Catalog, cart and the cart sorting engine, without any I/O concerns.

mod product;
mod catalog;
mod cart;
pub mod sort;

pub use product::{seed_products, Product, SharedProduct};
pub use catalog::{Catalog, CatalogError, ProductUpdate};
pub use cart::{Cart, CartError, CartLineItem};
pub use sort::{SortAlgorithm, SortError, SortKey, SortOrder};
