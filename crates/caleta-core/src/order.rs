//! Order records: one line per dish sold at the register.

use serde::{Deserialize, Serialize};

use crate::record::{TabularRecord, normalize_timestamp};

/// Payment methods the register seeds its dropdown with. The stored value
/// is an open set; anything the operator typed is kept as-is.
pub const PAYMENT_METHODS: &[&str] = &["Efectivo", "Yape", "Plin"];

/// Payment method assumed when an older row predates the column.
pub const DEFAULT_PAYMENT_METHOD: &str = "Efectivo";

/// One sold order line.
///
/// `unit_price` is the menu price captured at creation time; later menu
/// edits never touch existing orders. `subtotal` is stored redundantly and
/// recomputed only when an older file lacks the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    pub timestamp: String,
    pub client: String,
    pub dish: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
    pub payment_method: String,
    pub delivered: bool,
    pub paid: bool,
}

impl OrderRecord {
    /// Build a not-yet-persisted order. The ledger assigns the id.
    pub fn new(
        timestamp: String,
        client: &str,
        dish: &str,
        quantity: u32,
        unit_price: f64,
        payment_method: &str,
    ) -> Self {
        OrderRecord {
            id: 0,
            timestamp,
            client: client.to_string(),
            dish: dish.to_string(),
            quantity,
            unit_price,
            subtotal: f64::from(quantity) * unit_price,
            payment_method: payment_method.to_string(),
            delivered: false,
            paid: false,
        }
    }
}

impl TabularRecord for OrderRecord {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Date",
        "Client",
        "Dish",
        "Qty",
        "UnitPrice",
        "Total",
        "PaymentMethod",
        "Delivered",
        "Paid",
    ];

    const KIND: &'static str = "order";

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
        let client = row[2].clone().unwrap_or_default();
        let dish = row[3].clone().unwrap_or_default();
        let quantity = parse_quantity(row[4].as_deref())?;
        let unit_price = parse_amount(row[5].as_deref(), "unit price")?;
        let subtotal = match row[6].as_deref() {
            Some(cell) => parse_amount(Some(cell), "total")?,
            None => f64::from(quantity) * unit_price,
        };
        let payment_method = row[7]
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

        Ok(OrderRecord {
            id,
            timestamp,
            client,
            dish,
            quantity,
            unit_price,
            subtotal,
            payment_method,
            delivered: parse_flag(row[8].as_deref()),
            paid: parse_flag(row[9].as_deref()),
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.timestamp.clone(),
            self.client.clone(),
            self.dish.clone(),
            self.quantity.to_string(),
            format!("{:.2}", self.unit_price),
            format!("{:.2}", self.subtotal),
            self.payment_method.clone(),
            flag_cell(self.delivered).to_string(),
            flag_cell(self.paid).to_string(),
        ]
    }
}

/// `Si`/`No` cell for a boolean flag.
pub(crate) fn flag_cell(value: bool) -> &'static str {
    if value { "Si" } else { "No" }
}

fn parse_flag(cell: Option<&str>) -> bool {
    cell == Some("Si")
}

pub(crate) fn parse_id(cell: Option<&str>) -> Result<i64, String> {
    let text = cell.ok_or("id cell is empty")?;
    text.trim()
        .parse::<i64>()
        .map_err(|_| format!("id \"{text}\" is not an integer"))
}

pub(crate) fn parse_amount(cell: Option<&str>, field: &str) -> Result<f64, String> {
    let text = cell.ok_or_else(|| format!("{field} cell is empty"))?;
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("{field} \"{text}\" is not a number"))
}

fn parse_quantity(cell: Option<&str>) -> Result<u32, String> {
    let value = parse_amount(cell, "quantity")?;
    if value < 1.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(format!("quantity {value} is not a positive whole number"));
    }
    Ok(value as u32)
}
