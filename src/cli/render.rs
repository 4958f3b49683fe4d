//! Text and JSON renderings of catalog and cart

use std::io::{self, Write};

use serde_json::{json, Value};

use crate::domain::{Cart, CartLineItem, Product, SharedProduct};

const SEPARATOR_WIDTH: usize = 40;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Writes every product followed by a separator line
pub fn write_catalog(out: &mut impl Write, products: &[SharedProduct]) -> io::Result<()> {
    for product in products {
        writeln!(out, "{}", product.borrow())?;
        writeln!(out, "{}", separator())?;
    }
    Ok(())
}

/// Writes numbered cart lines and the totals footer
pub fn write_cart(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    for (i, line) in cart.lines().iter().enumerate() {
        write_line(out, i + 1, line)?;
    }

    writeln!(
        out,
        "Total: ${}, Total weight: {}g",
        cart.total_cost(),
        cart.total_weight()
    )
}

fn write_line(out: &mut impl Write, number: usize, line: &CartLineItem) -> io::Result<()> {
    let product = line.product.borrow();
    writeln!(out, "{}. {} ({})", number, product.name, product.category)?;
    writeln!(
        out,
        "   Price: ${} x {} = ${}",
        product.price,
        line.quantity,
        line.line_cost()
    )?;
    writeln!(
        out,
        "   Weight: {}g x {} = {}g",
        product.weight,
        line.quantity,
        line.line_weight()
    )?;
    writeln!(out, "{}", separator())
}

pub fn product_json(product: &Product) -> Value {
    json!({
        "name": product.name,
        "category": product.category,
        "price": product.price,
        "weight": product.weight,
        "description": product.description,
    })
}

pub fn catalog_json(products: &[SharedProduct]) -> Value {
    Value::Array(products.iter().map(|p| product_json(&p.borrow())).collect())
}

pub fn cart_json(cart: &Cart) -> Value {
    let lines: Vec<_> = cart
        .lines()
        .iter()
        .map(|line| {
            let product = line.product.borrow();
            json!({
                "name": product.name,
                "category": product.category,
                "price": product.price,
                "weight": product.weight,
                "quantity": line.quantity,
                "cost": line.line_cost(),
                "line_weight": line.line_weight(),
            })
        })
        .collect();

    json!({
        "lines": lines,
        "total_cost": cart.total_cost(),
        "total_weight": cart.total_weight(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_cart(cart: &Cart) -> String {
        let mut buf = Vec::new();
        write_cart(&mut buf, cart).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_cart_text() {
        assert_eq!(render_cart(&Cart::new()), "Cart is empty\n");
    }

    #[test]
    fn cart_text_lines_and_footer() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("Tea", "Food", 2.5, 100.0).into_shared(), 2);

        let text = render_cart(&cart);

        assert!(text.starts_with("1. Tea (Food)\n"));
        assert!(text.contains("   Price: $2.5 x 2 = $5\n"));
        assert!(text.contains("   Weight: 100g x 2 = 200g\n"));
        assert!(text.ends_with("Total: $5, Total weight: 200g\n"));
    }

    #[test]
    fn cart_json_totals() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("Tea", "Food", 2.5, 100.0).into_shared(), 2);

        let value = cart_json(&cart);

        assert_eq!(value["total_cost"], 5.0);
        assert_eq!(value["lines"][0]["quantity"], 2);
        assert_eq!(value["lines"][0]["name"], "Tea");
    }
}
