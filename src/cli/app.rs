//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::catalog_cmd::{self, CatalogCommands};
use super::output::{Output, OutputFormat};
use super::shell::Shell;
use super::sort_cmd::{self, SortArgs};
use crate::config::Config;
use crate::domain::{SortAlgorithm, SortKey, SortOrder};

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "A console storefront with cart sorting")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, global = true, env = "SHOP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shop (default)
    Shell,

    /// Browse the catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Build a cart from products and print it sorted
    ///
    /// Examples:
    ///   shop sort --by price Ноутбук Чай=3
    ///   shop sort --by category --algorithm insertion --desc Книга Мышь
    Sort {
        /// Product attribute to sort by (price, weight, category)
        #[arg(long)]
        by: Option<SortKey>,

        /// Sorting algorithm (exchange, insertion, partition, merge)
        #[arg(long, short)]
        algorithm: Option<SortAlgorithm>,

        /// Sort in descending order
        #[arg(long, conflicts_with = "asc")]
        desc: bool,

        /// Sort in ascending order
        #[arg(long)]
        asc: bool,

        /// Items as NAME or NAME=QTY
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the default config file location
    Path,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.shop.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("Shop CLI starting");
    match &config.path {
        Some(path) => output.verbose_ctx("config", &format!("Loaded {}", path.display())),
        None => output.verbose_ctx("config", "Using built-in defaults"),
    }

    let catalog = config.catalog();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(catalog, stdin.lock(), io::stdout());
            shell.run(&output)?
        }

        Commands::Catalog(cmd) => catalog_cmd::run(cmd, &catalog, &output)?,

        Commands::Sort { by, algorithm, desc, asc, items } => {
            let order = match (desc, asc) {
                (true, _) => Some(SortOrder::Descending),
                (_, true) => Some(SortOrder::Ascending),
                _ => None,
            };
            let args = SortArgs { key: by, algorithm, order };
            sort_cmd::run(&catalog, &output, &items, args, &config.shop.sort)?
        }

        Commands::Config(ConfigCommands::Show) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": config.path.as_ref().map(|p| p.display().to_string()),
                    "config": config.shop,
                }));
            } else {
                match &config.path {
                    Some(path) => println!("# Loaded from {}", path.display()),
                    None => println!("# Built-in defaults"),
                }
                print!("{}", config.to_toml()?);
            }
        }

        Commands::Config(ConfigCommands::Path) => match Config::default_path() {
            Some(path) => output.success(&path.display().to_string()),
            None => anyhow::bail!("Could not determine config directory"),
        },
    }

    output.verbose("Command completed successfully");
    Ok(())
}
