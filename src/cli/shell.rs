//! Interactive menu shell
//!
//! A request/response loop over any line reader and writer. Each menu choice
//! is mapped onto a catalog, cart or sort call; no business rules live here
//! beyond validating what the user typed.

use std::io::{BufRead, Write};
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};

use super::output::Output;
use super::render;
use crate::domain::{Cart, Catalog, ProductUpdate, SortAlgorithm, SortKey, SortOrder};

const MENU: &str = "\
=== SHOP ===
1. Show catalog
2. Add product to cart
3. Remove product from cart
4. Show cart
5. Sort cart
6. Clear cart
7. Edit catalog product
8. Remove catalog product
0. Exit";

/// What the loop does after handling a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Top-level menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ShowCatalog,
    AddToCart,
    RemoveFromCart,
    ShowCart,
    SortCart,
    ClearCart,
    EditProduct,
    RemoveProduct,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ShowCatalog),
            "2" => Some(Self::AddToCart),
            "3" => Some(Self::RemoveFromCart),
            "4" => Some(Self::ShowCart),
            "5" => Some(Self::SortCart),
            "6" => Some(Self::ClearCart),
            "7" => Some(Self::EditProduct),
            "8" => Some(Self::RemoveProduct),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn key_from_choice(input: &str) -> Option<SortKey> {
    match input.trim() {
        "1" => Some(SortKey::Price),
        "2" => Some(SortKey::Weight),
        "3" => Some(SortKey::Category),
        _ => None,
    }
}

fn algorithm_from_choice(input: &str) -> Option<SortAlgorithm> {
    match input.trim() {
        "1" => Some(SortAlgorithm::Exchange),
        "2" => Some(SortAlgorithm::Insertion),
        "3" => Some(SortAlgorithm::Partition),
        "4" => Some(SortAlgorithm::Merge),
        _ => None,
    }
}

/// Anything other than "2" means ascending
fn order_from_choice(input: &str) -> SortOrder {
    SortOrder::from_descending(input.trim() == "2")
}

/// Blank means 1; zero and non-numbers are rejected
fn parse_quantity(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() {
        return Some(1);
    }
    input.parse::<u32>().ok().filter(|q| *q > 0)
}

/// Interactive shop session owning its catalog and cart
pub struct Shell<R, W> {
    catalog: Catalog,
    cart: Cart,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a session with an empty cart
    pub fn new(catalog: Catalog, input: R, out: W) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            input,
            out,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Runs the menu loop until the user exits or input ends
    pub fn run(&mut self, output: &Output) -> Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{}", MENU)?;

            let Some(line) = self.prompt("Choose an action: ")? else {
                output.verbose_ctx("shell", "End of input");
                break;
            };

            let flow = match MenuChoice::parse(&line) {
                Some(choice) => {
                    output.verbose_ctx("shell", &format!("Menu choice: {:?}", choice));
                    self.handle(choice, output)?
                }
                None => {
                    writeln!(self.out, "Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "Thanks for visiting!")?;
        self.out.flush().context("Failed to flush output")
    }

    fn handle(&mut self, choice: MenuChoice, output: &Output) -> Result<Flow> {
        match choice {
            MenuChoice::ShowCatalog => self.show_catalog(),
            MenuChoice::AddToCart => self.add_to_cart(output),
            MenuChoice::RemoveFromCart => self.remove_from_cart(),
            MenuChoice::ShowCart => self.show_cart(),
            MenuChoice::SortCart => self.sort_cart(output),
            MenuChoice::ClearCart => {
                self.cart.clear();
                writeln!(self.out, "Cart cleared")?;
                Ok(Flow::Continue)
            }
            MenuChoice::EditProduct => self.edit_product(),
            MenuChoice::RemoveProduct => self.remove_product(),
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    /// Writes a prompt and reads one line; `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn show_catalog(&mut self) -> Result<Flow> {
        writeln!(self.out)?;
        writeln!(self.out, "=== CATALOG ===")?;
        render::write_catalog(&mut self.out, self.catalog.list())?;
        Ok(Flow::Continue)
    }

    fn show_cart(&mut self) -> Result<Flow> {
        writeln!(self.out)?;
        writeln!(self.out, "=== YOUR CART ===")?;
        render::write_cart(&mut self.out, &self.cart)?;
        Ok(Flow::Continue)
    }

    fn add_to_cart(&mut self, output: &Output) -> Result<Flow> {
        self.show_catalog()?;

        let Some(name) = self.prompt("Product name to add: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Quantity: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = parse_quantity(&quantity) else {
            writeln!(self.out, "Invalid quantity")?;
            return Ok(Flow::Continue);
        };

        match self.catalog.find_ignore_case(&name) {
            Some(product) => {
                let product = Rc::clone(product);
                let product_name = product.borrow().name.clone();
                output.verbose_ctx("cart", &format!("Adding {} x {}", quantity, product_name));
                self.cart.add_item(product, quantity);
                writeln!(self.out, "Added '{}' to cart", product_name)?;
            }
            None => writeln!(self.out, "Product not found")?,
        }
        Ok(Flow::Continue)
    }

    fn remove_from_cart(&mut self) -> Result<Flow> {
        if self.cart.is_empty() {
            writeln!(self.out, "Cart is empty")?;
            return Ok(Flow::Continue);
        }
        self.show_cart()?;

        let Some(name) = self.prompt("Product name to remove: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Quantity to remove: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = parse_quantity(&quantity) else {
            writeln!(self.out, "Invalid quantity")?;
            return Ok(Flow::Continue);
        };

        let name = name.trim();
        if self.cart.remove_item(name, quantity) {
            writeln!(self.out, "Removed '{}' from cart", name)?;
        } else {
            writeln!(self.out, "Product not in cart")?;
        }
        Ok(Flow::Continue)
    }

    fn sort_cart(&mut self, output: &Output) -> Result<Flow> {
        if self.cart.is_empty() {
            writeln!(self.out, "Cart is empty")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.out)?;
        writeln!(self.out, "=== SORT CART ===")?;
        writeln!(self.out, "Sort by:")?;
        writeln!(self.out, "1. Price")?;
        writeln!(self.out, "2. Weight")?;
        writeln!(self.out, "3. Category")?;
        let Some(key) = self.prompt("Your choice: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(key) = key_from_choice(&key) else {
            writeln!(self.out, "Invalid choice")?;
            return Ok(Flow::Continue);
        };

        writeln!(self.out)?;
        writeln!(self.out, "Algorithm:")?;
        writeln!(self.out, "1. Exchange (bubble) sort")?;
        writeln!(self.out, "2. Insertion sort")?;
        writeln!(self.out, "3. Partition (quick) sort")?;
        writeln!(self.out, "4. Merge sort")?;
        let Some(algorithm) = self.prompt("Your choice: ")? else {
            return Ok(Flow::Exit);
        };

        writeln!(self.out)?;
        writeln!(self.out, "Order:")?;
        writeln!(self.out, "1. Ascending")?;
        writeln!(self.out, "2. Descending")?;
        let Some(order) = self.prompt("Your choice: ")? else {
            return Ok(Flow::Exit);
        };
        let order = order_from_choice(&order);

        let Some(algorithm) = algorithm_from_choice(&algorithm) else {
            writeln!(self.out, "Invalid algorithm choice")?;
            return Ok(Flow::Continue);
        };

        let started = Instant::now();
        self.cart.sort(key, order, algorithm);
        output.verbose_ctx(
            "sort",
            &format!(
                "Sorted {} lines by {} ({}, {}) in {:?}",
                self.cart.len(),
                key,
                algorithm,
                order,
                started.elapsed()
            ),
        );

        writeln!(self.out, "Cart sorted")?;
        self.show_cart()
    }

    fn edit_product(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Product name to edit: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(fields) = self.prompt("Fields (field=value; ...): ")? else {
            return Ok(Flow::Exit);
        };

        let edited = ProductUpdate::split_pairs(&fields)
            .and_then(|pairs| self.catalog.edit_fields(name.trim(), pairs));

        match edited {
            Ok(true) => writeln!(self.out, "Product '{}' updated", name.trim())?,
            Ok(false) => writeln!(self.out, "Product not found")?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn remove_product(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Product name to remove from catalog: ")? else {
            return Ok(Flow::Exit);
        };

        if self.catalog.remove(name.trim()) {
            writeln!(self.out, "Product '{}' removed from catalog", name.trim())?;
        } else {
            writeln!(self.out, "Product not found")?;
        }
        Ok(Flow::Continue)
    }
}
