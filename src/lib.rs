//! Shop CLI - A console storefront with a catalog, a cart and cart sorting
//!
//! The cart can be reordered by price, weight or category with one of four
//! classical algorithms (exchange, insertion, partition, merge), each keeping
//! its own stability and complexity characteristics.

pub mod domain;
pub mod config;
pub mod cli;

pub use domain::{Cart, CartLineItem, Catalog, Product, SortAlgorithm, SortKey, SortOrder};
