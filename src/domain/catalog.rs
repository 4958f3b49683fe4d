//! Product catalog
//!
//! An ordered list of shared products. Lookups are linear by name; names are
//! unique by convention only.

use std::rc::Rc;
use thiserror::Error;

use super::product::{seed_products, Product, SharedProduct};

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Unknown product field: '{0}' (expected name, category, price, weight or description)")]
    UnknownField(String),

    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Malformed field update: expected 'field=value', got '{0}'")]
    MalformedUpdate(String),
}

/// A single field assignment applied by [`Catalog::edit`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProductUpdate {
    Name(String),
    Category(String),
    Price(f64),
    Weight(f64),
    Description(String),
}

impl ProductUpdate {
    /// Builds an update from a field name and its textual value
    pub fn parse_field(field: &str, value: &str) -> Result<Self, CatalogError> {
        let value = value.trim();
        match field.trim() {
            "name" => Ok(Self::Name(value.to_string())),
            "category" => Ok(Self::Category(value.to_string())),
            "price" => parse_number("price", value).map(Self::Price),
            "weight" => parse_number("weight", value).map(Self::Weight),
            "description" => Ok(Self::Description(value.to_string())),
            other => Err(CatalogError::UnknownField(other.to_string())),
        }
    }

    /// Splits a `;`-separated list of `field=value` pairs
    ///
    /// Empty parts are skipped. The pairs feed [`Catalog::edit_fields`].
    pub fn split_pairs(input: &str) -> Result<Vec<(&str, &str)>, CatalogError> {
        input
            .split(';')
            .filter(|part| !part.trim().is_empty())
            .map(|part| {
                part.split_once('=')
                    .ok_or_else(|| CatalogError::MalformedUpdate(part.trim().to_string()))
            })
            .collect()
    }

    /// Writes this update into the product
    pub fn apply(&self, product: &mut Product) {
        match self {
            Self::Name(name) => product.name = name.clone(),
            Self::Category(category) => product.category = category.clone(),
            Self::Price(price) => product.price = *price,
            Self::Weight(weight) => product.weight = *weight,
            Self::Description(description) => product.description = description.clone(),
        }
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, CatalogError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| CatalogError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

/// Ordered collection of shared products
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<SharedProduct>,
}

impl Catalog {
    /// Creates a catalog holding the given products, in order
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(Product::into_shared).collect(),
        }
    }

    /// Creates a catalog with the built-in seed products
    pub fn seeded() -> Self {
        Self::from_products(seed_products())
    }

    /// Appends a product and returns its shared handle
    pub fn add(&mut self, product: Product) -> SharedProduct {
        let shared = product.into_shared();
        self.products.push(Rc::clone(&shared));
        shared
    }

    /// Removes every product with the given name
    ///
    /// Returns false when no product matched.
    pub fn remove(&mut self, name: &str) -> bool {
        let len_before = self.products.len();
        self.products.retain(|p| !p.borrow().is_named(name));
        self.products.len() != len_before
    }

    /// Applies field updates in place to the first product with the given name
    ///
    /// Returns `Ok(false)` when no product has that name. Cart lines holding
    /// the same handle observe the change.
    pub fn edit(&mut self, name: &str, updates: &[ProductUpdate]) -> Result<bool, CatalogError> {
        match self.find(name) {
            Some(product) => {
                let mut product = product.borrow_mut();
                for update in updates {
                    update.apply(&mut product);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Parses `field=value` pairs and applies them to the named product
    ///
    /// All pairs are parsed before anything is written, so a bad pair leaves
    /// the product untouched.
    pub fn edit_fields<'a>(
        &mut self,
        name: &str,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<bool, CatalogError> {
        let updates = fields
            .into_iter()
            .map(|(field, value)| ProductUpdate::parse_field(field, value))
            .collect::<Result<Vec<_>, _>>()?;
        self.edit(name, &updates)
    }

    /// Finds the first product with exactly this name
    pub fn find(&self, name: &str) -> Option<&SharedProduct> {
        self.products.iter().find(|p| p.borrow().is_named(name))
    }

    /// Finds the first product whose name matches ignoring case
    pub fn find_ignore_case(&self, name: &str) -> Option<&SharedProduct> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.borrow().name.to_lowercase() == wanted)
    }

    /// Read-only view of the products in insertion order
    pub fn list(&self) -> &[SharedProduct] {
        &self.products
    }

    /// Returns the number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
