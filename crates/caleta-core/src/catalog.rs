//! Name→price catalogs: the dish menu and the supplies dictionary.
//!
//! Each catalog is persisted as a human-editable JSON object
//! (`"Ceviche": 12.0`). Insertion order is preserved both in memory and on
//! disk so listings stay deterministic. Deleting an entry is destructive;
//! ledger records keep their own captured price snapshot and are never
//! touched by catalog edits.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};

use crate::error::StoreError;

/// One catalog line.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub price: f64,
}

/// Insertion-ordered name→price store backed by one JSON document.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    label: &'static str,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load the catalog, seeding and persisting `seed` on first run.
    ///
    /// A present-but-unreadable document is a `Persistence` error; the
    /// caller decides whether to abort or continue with [`Catalog::empty`].
    pub fn open_or_seed(
        path: impl Into<PathBuf>,
        label: &'static str,
        seed: &[(&str, f64)],
    ) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            let catalog = Catalog {
                entries: seed
                    .iter()
                    .map(|(name, price)| CatalogEntry {
                        name: (*name).to_string(),
                        price: *price,
                    })
                    .collect(),
                path,
                label,
            };
            catalog.save()?;
            return Ok(catalog);
        }

        let text = fs::read_to_string(&path)
            .map_err(|err| StoreError::persistence("read", &path, err))?;
        let document: Map<String, Value> = serde_json::from_str(&text)
            .map_err(|err| StoreError::persistence("parse", &path, err))?;

        let mut entries = Vec::with_capacity(document.len());
        for (name, value) in document {
            let price = value.as_f64().ok_or_else(|| {
                StoreError::persistence(
                    "parse",
                    &path,
                    format!("price of \"{name}\" is not a number"),
                )
            })?;
            entries.push(CatalogEntry { name, price });
        }

        Ok(Catalog {
            path,
            label,
            entries,
        })
    }

    /// Empty catalog for degraded operation after a failed load.
    pub fn empty(path: impl Into<PathBuf>, label: &'static str) -> Self {
        Catalog {
            path: path.into(),
            label,
            entries: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Current price for `name`, if the entry exists.
    pub fn price_of(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.price)
    }

    /// Set or overwrite the price for `name` and persist.
    ///
    /// The in-memory entry set is restored if the rewrite fails.
    pub fn upsert(&mut self, name: &str, price: f64) -> Result<(), StoreError> {
        if !price.is_finite() || price < 0.0 {
            return Err(StoreError::validation(
                "price",
                format!("{price} must be a non-negative number"),
            ));
        }

        let previous = match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => Some(std::mem::replace(&mut entry.price, price)),
            None => {
                self.entries.push(CatalogEntry {
                    name: name.to_string(),
                    price,
                });
                None
            }
        };

        if let Err(err) = self.save() {
            match previous {
                Some(old_price) => {
                    if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
                        entry.price = old_price;
                    }
                }
                None => {
                    self.entries.pop();
                }
            }
            return Err(err);
        }
        Ok(())
    }

    /// Delete `name` and persist. `Ok(false)` when the entry was absent.
    pub fn remove(&mut self, name: &str) -> Result<bool, StoreError> {
        let Some(index) = self.entries.iter().position(|entry| entry.name == name) else {
            return Ok(false);
        };

        let removed = self.entries.remove(index);
        if let Err(err) = self.save() {
            self.entries.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    fn save(&self) -> Result<(), StoreError> {
        let mut document = Map::new();
        for entry in &self.entries {
            let price = Number::from_f64(entry.price).unwrap_or_else(|| Number::from(0));
            document.insert(entry.name.clone(), Value::Number(price));
        }

        let text = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|err| StoreError::persistence("serialize", &self.path, err))?;
        fs::write(&self.path, text)
            .map_err(|err| StoreError::persistence("write", &self.path, err))
    }
}

/// Parse operator-typed price text into a non-negative amount.
pub fn parse_price(text: &str) -> Result<f64, StoreError> {
    let price: f64 = text
        .trim()
        .parse()
        .map_err(|_| StoreError::validation("price", format!("\"{text}\" is not a number")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(StoreError::validation(
            "price",
            format!("{price} must be a non-negative number"),
        ));
    }
    Ok(price)
}
