//! Catalog CLI commands

use std::io;

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::render;
use crate::domain::Catalog;

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all products
    List,

    /// Show one product
    Show {
        /// Product name (case-insensitive)
        name: String,
    },
}

pub fn run(cmd: CatalogCommands, catalog: &Catalog, output: &Output) -> Result<()> {
    match cmd {
        CatalogCommands::List => list_products(catalog, output),
        CatalogCommands::Show { name } => show_product(catalog, output, &name),
    }
}

fn list_products(catalog: &Catalog, output: &Output) -> Result<()> {
    output.verbose_ctx("catalog", &format!("Listing {} products", catalog.len()));

    if output.is_json() {
        output.data(&render::catalog_json(catalog.list()));
    } else if catalog.is_empty() {
        println!("Catalog is empty");
    } else {
        render::write_catalog(&mut io::stdout().lock(), catalog.list())?;
    }

    Ok(())
}

fn show_product(catalog: &Catalog, output: &Output, name: &str) -> Result<()> {
    let product = catalog
        .find_ignore_case(name)
        .ok_or_else(|| anyhow::anyhow!("Product not found: {}", name))?;
    let product = product.borrow();

    if output.is_json() {
        output.data(&render::product_json(&product));
    } else {
        println!("{}", product);
    }

    Ok(())
}
