//! Product domain model
//!
//! Products live in the catalog and are shared with cart lines through
//! [`SharedProduct`] handles, so an edit made through the catalog is visible
//! from every line that references the same product.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable handle to a catalog product
pub type SharedProduct = Rc<RefCell<Product>>;

/// A product offered by the shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also used as the lookup key in catalog and cart
    pub name: String,

    /// Category label (compared lexicographically when sorting)
    pub category: String,

    /// Unit price
    pub price: f64,

    /// Unit weight in grams
    pub weight: f64,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Creates a product with an empty description
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            weight,
            description: String::new(),
        }
    }

    /// Sets the description (builder style)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Wraps the product in a shared handle
    pub fn into_shared(self) -> SharedProduct {
        Rc::new(RefCell::new(self))
    }

    /// Returns true if `name` matches this product's name exactly
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): ${}, {}g\n{}",
            self.name, self.category, self.price, self.weight, self.description
        )
    }
}

/// The products the shop starts with when no catalog is configured
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new("Ноутбук", "Электроника", 999.99, 1500.0)
            .with_description("Мощный ноутбук для работы и игр"),
        Product::new("Смартфон", "Электроника", 699.99, 200.0)
            .with_description("Флагманский смартфон"),
        Product::new("Наушники", "Электроника", 199.99, 300.0)
            .with_description("Беспроводные наушники"),
        Product::new("Книга", "Книги", 19.99, 500.0).with_description("Бестселлер этого года"),
        Product::new("Футболка", "Одежда", 29.99, 200.0).with_description("Хлопковая футболка"),
        Product::new("Кофе", "Продукты", 9.99, 250.0).with_description("Арабика 100%"),
        Product::new("Чай", "Продукты", 7.99, 100.0).with_description("Зеленый чай"),
        Product::new("Мышь", "Электроника", 49.99, 100.0).with_description("Беспроводная мышь"),
    ]
}
