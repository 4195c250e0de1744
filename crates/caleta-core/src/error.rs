//! Error taxonomy for the catalog and ledger stores.
//!
//! Three things can go wrong when a caller mutates a store: the backing
//! file is unreadable or unwritable (`Persistence`), the caller supplied a
//! malformed value (`Validation`), or a record references a catalog name
//! that no longer exists (`CatalogMiss`). Row-level problems found while
//! loading a ledger are not errors at all; they become [`SkippedRow`]
//! diagnostics carried by the loaded ledger.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Store-level failure surfaced to callers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written (locked by another
    /// program, missing permissions, malformed document).
    #[error("cannot {action} {}: {message}", .path.display())]
    Persistence {
        action: &'static str,
        path: PathBuf,
        message: String,
    },

    /// A caller-supplied value was rejected before any state changed.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The referenced name is not in the catalog, so no record was created.
    #[error("\"{name}\" is not in the {catalog}")]
    CatalogMiss {
        name: String,
        catalog: &'static str,
    },
}

impl StoreError {
    /// Persistence failure while performing `action` on `path`.
    pub fn persistence(action: &'static str, path: &Path, err: impl fmt::Display) -> Self {
        StoreError::Persistence {
            action,
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Validation failure for a named input field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Missing catalog reference.
    pub fn catalog_miss(name: impl Into<String>, catalog: &'static str) -> Self {
        StoreError::CatalogMiss {
            name: name.into(),
            catalog,
        }
    }
}

/// One data row discarded during a ledger load.
///
/// `line` is the 1-based row number in the file, counting the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} skipped: {}", self.line, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::persistence("rewrite", Path::new("pedidos.csv"), "file is locked");
        assert_eq!(err.to_string(), "cannot rewrite pedidos.csv: file is locked");

        let err = StoreError::validation("price", "must be a non-negative number");
        assert_eq!(err.to_string(), "invalid price: must be a non-negative number");

        let err = StoreError::catalog_miss("Tiradito", "menu");
        assert_eq!(err.to_string(), "\"Tiradito\" is not in the menu");
    }

    #[test]
    fn test_skipped_row_display() {
        let skipped = SkippedRow {
            line: 4,
            reason: "quantity \"abc\" is not a number".to_string(),
        };
        assert_eq!(
            skipped.to_string(),
            "row 4 skipped: quantity \"abc\" is not a number"
        );
    }
}
