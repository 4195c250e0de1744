//! Expense records: purchases of kitchen supplies and other cost items.

use serde::{Deserialize, Serialize};

use crate::order::{parse_amount, parse_id};
use crate::record::{TabularRecord, normalize_timestamp};

/// One purchased cost item.
///
/// Quantities are decimal: half a kilo of fish is a normal purchase.
/// `unit_price` is the supplies-catalog price captured at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub timestamp: String,
    pub item: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl ExpenseRecord {
    /// Build a not-yet-persisted expense. The ledger assigns the id.
    pub fn new(timestamp: String, item: &str, quantity: f64, unit_price: f64) -> Self {
        ExpenseRecord {
            id: 0,
            timestamp,
            item: item.to_string(),
            quantity,
            unit_price,
            total: quantity * unit_price,
        }
    }
}

impl TabularRecord for ExpenseRecord {
    const HEADERS: &'static [&'static str] =
        &["ID", "Date", "Item", "Qty", "UnitPrice", "Total"];

    const KIND: &'static str = "expense";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn set_timestamp(&mut self, timestamp: String) {
        self.timestamp = timestamp;
    }

    fn from_row(row: &[Option<String>]) -> Result<Self, String> {
        let id = parse_id(row[0].as_deref())?;
        let timestamp = normalize_timestamp(row[1].as_deref().unwrap_or(""));
        let item = row[2].clone().unwrap_or_default();
        let quantity = parse_amount(row[3].as_deref(), "quantity")?;
        if quantity <= 0.0 {
            return Err(format!("quantity {quantity} is not positive"));
        }
        let unit_price = parse_amount(row[4].as_deref(), "unit price")?;
        let total = match row[5].as_deref() {
            Some(cell) => parse_amount(Some(cell), "total")?,
            None => quantity * unit_price,
        };

        Ok(ExpenseRecord {
            id,
            timestamp,
            item,
            quantity,
            unit_price,
            total,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.timestamp.clone(),
            self.item.clone(),
            trim_quantity(self.quantity),
            format!("{:.2}", self.unit_price),
            format!("{:.2}", self.total),
        ]
    }
}

/// Quantity cell without a trailing `.0` for whole amounts.
fn trim_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        quantity.to_string()
    }
}
