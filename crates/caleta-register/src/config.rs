//! Configuration for the register binary (`caleta.toml`).
//!
//! Every field has a default, so a missing config file simply means the
//! stock layout: ledgers and catalogs under `./data`, reports under
//! `./reportes`, amounts in soles.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::constants;

/// Configuration loaded from caleta.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub files: FilesConfig,
    pub report: ReportConfig,
}

/// Where the persisted stores live
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Directory holding the ledgers and catalog documents
    pub data_dir: PathBuf,
    /// Order ledger filename
    pub orders: String,
    /// Expense ledger filename
    pub expenses: String,
    /// Dish menu filename
    pub menu: String,
    /// Supplies price-list filename
    pub supplies: String,
}

/// Report rendering options
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for generated artifacts
    pub output_dir: PathBuf,
    /// Currency prefix shown before amounts
    pub currency: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            orders: constants::ORDERS_FILENAME.to_string(),
            expenses: constants::EXPENSES_FILENAME.to_string(),
            menu: constants::MENU_FILENAME.to_string(),
            supplies: constants::SUPPLIES_FILENAME.to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            currency: constants::DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl FileConfig {
    /// Load configuration, falling back to the defaults when the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse {}. Check for:\n\
                 - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
                 - Unknown sections (expected [files] and [report])\n\
                 - Incorrect data types (strings vs numbers)",
                path.display()
            )
        })
    }

    pub fn orders_path(&self) -> PathBuf {
        self.files.data_dir.join(&self.files.orders)
    }

    pub fn expenses_path(&self) -> PathBuf {
        self.files.data_dir.join(&self.files.expenses)
    }

    pub fn menu_path(&self) -> PathBuf {
        self.files.data_dir.join(&self.files.menu)
    }

    pub fn supplies_path(&self) -> PathBuf {
        self.files.data_dir.join(&self.files.supplies)
    }
}
