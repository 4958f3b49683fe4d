//! Configuration handling for the shop
//!
//! Configuration is read from the first of:
//! - the `--config <path>` flag (or `SHOP_CONFIG`)
//! - `~/.config/shop/config.toml` (platform equivalent)
//!
//! A missing file means built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::domain::{Catalog, Product, SortAlgorithm, SortKey, SortOrder};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Sort selection used when a command does not name one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortDefaults {
    pub key: SortKey,
    pub algorithm: SortAlgorithm,
    pub order: SortOrder,
}

impl Default for SortDefaults {
    fn default() -> Self {
        Self {
            key: SortKey::Price,
            algorithm: SortAlgorithm::Merge,
            order: SortOrder::Ascending,
        }
    }
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Default sort selection
    pub sort: SortDefaults,

    /// Catalog products; empty means the built-in seed list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

impl ShopConfig {
    /// Parses and validates TOML configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ShopConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for product in &self.products {
            if product.name.trim().is_empty() {
                return Err(ConfigError::Invalid("product with an empty name".to_string()));
            }
            if !(product.price >= 0.0 && product.weight >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "product '{}' must have a non-negative price and weight",
                    product.name
                )));
            }
        }
        Ok(())
    }
}

/// Effective configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub shop: ShopConfig,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from an explicit path or the default location
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let shop = ShopConfig::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        Ok(Self {
            shop,
            path: Some(path.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "shop", "shop-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Builds the starting catalog
    pub fn catalog(&self) -> Catalog {
        if self.shop.products.is_empty() {
            Catalog::seeded()
        } else {
            Catalog::from_products(self.shop.products.clone())
        }
    }

    /// Renders the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.shop).context("Failed to serialize config")
    }
}
