//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `shell` (default) | Interactive menu over catalog and cart |
//! | `catalog list`, `catalog show` | Browse the catalog |
//! | `sort` | Build a cart from arguments and print it sorted |
//! | `config show`, `config path` | Inspect configuration |
//!
//! ## Output Formats
//!
//! One-shot commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The interactive shell always writes text.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! shop --verbose sort --by weight Ноутбук Чай
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod render;
mod shell;
mod catalog_cmd;
mod sort_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use shell::Shell;
