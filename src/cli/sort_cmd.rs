//! One-shot cart sorting
//!
//! Builds a cart from `NAME[=QTY]` arguments, sorts it and prints it.

use std::io;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};

use super::output::Output;
use super::render;
use crate::config::SortDefaults;
use crate::domain::{Cart, Catalog, SortAlgorithm, SortKey, SortOrder};

/// Selectors given on the command line; `None` falls back to config
#[derive(Debug, Clone, Copy, Default)]
pub struct SortArgs {
    pub key: Option<SortKey>,
    pub algorithm: Option<SortAlgorithm>,
    pub order: Option<SortOrder>,
}

impl SortArgs {
    fn resolve(self, defaults: &SortDefaults) -> (SortKey, SortAlgorithm, SortOrder) {
        (
            self.key.unwrap_or(defaults.key),
            self.algorithm.unwrap_or(defaults.algorithm),
            self.order.unwrap_or(defaults.order),
        )
    }
}

/// Splits `NAME[=QTY]`; a missing quantity means 1
pub fn parse_item(spec: &str) -> Result<(&str, u32)> {
    match spec.rsplit_once('=') {
        Some((name, quantity)) => {
            let quantity: u32 = quantity
                .trim()
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", spec))?;
            if quantity == 0 {
                anyhow::bail!("Quantity must be at least 1 in '{}'", spec);
            }
            Ok((name.trim(), quantity))
        }
        None => Ok((spec.trim(), 1)),
    }
}

/// Fills a cart from item specs, resolving names against the catalog
pub fn build_cart(catalog: &Catalog, items: &[String]) -> Result<Cart> {
    let mut cart = Cart::new();
    for spec in items {
        let (name, quantity) = parse_item(spec)?;
        let product = catalog
            .find_ignore_case(name)
            .ok_or_else(|| anyhow::anyhow!("Product not found: {}", name))?;
        cart.add_item(Rc::clone(product), quantity);
    }
    Ok(cart)
}

pub fn run(
    catalog: &Catalog,
    output: &Output,
    items: &[String],
    args: SortArgs,
    defaults: &SortDefaults,
) -> Result<()> {
    let (key, algorithm, order) = args.resolve(defaults);
    output.verbose_ctx(
        "sort",
        &format!("key={}, algorithm={}, order={}", key, algorithm, order),
    );

    let mut cart = build_cart(catalog, items)?;

    let started = Instant::now();
    cart.sort(key, order, algorithm);
    output.verbose_ctx(
        "sort",
        &format!("Sorted {} lines in {:?}", cart.len(), started.elapsed()),
    );

    if output.is_json() {
        let mut value = render::cart_json(&cart);
        value["sort"] = serde_json::json!({
            "key": key,
            "algorithm": algorithm,
            "order": order,
            "stable": algorithm.is_stable(),
        });
        output.data(&value);
    } else {
        render::write_cart(&mut io::stdout().lock(), &cart)?;
    }

    Ok(())
}
