//! In-memory ledger collections with whole-file CSV persistence.
//!
//! A ledger owns every record of one kind (orders or expenses), loaded in
//! full at startup and rewritten in full after every mutation. There is
//! exactly one in-process writer; the only shared resource is the backing
//! file itself, and a rewrite that fails (file locked by a spreadsheet
//! program, permissions) surfaces as a `Persistence` error after the
//! in-memory state has been rolled back to what it was before the call.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::Catalog;
use crate::error::{SkippedRow, StoreError};
use crate::expense::ExpenseRecord;
use crate::order::OrderRecord;
use crate::record::{TabularRecord, format_timestamp, with_date};

/// Boolean order flags that can be flipped after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFlag {
    Delivered,
    Paid,
}

/// One ledger kind: the full record set plus its backing file.
#[derive(Debug)]
pub struct Ledger<R: TabularRecord> {
    path: PathBuf,
    records: Vec<R>,
    skipped: Vec<SkippedRow>,
}

impl<R: TabularRecord> Ledger<R> {
    /// Load the ledger file, tolerating older and partially damaged rows.
    ///
    /// A missing file is an empty ledger. The header row is skipped, rows
    /// without an id cell are ignored, short rows are padded to the current
    /// schema width, and a row whose fields still fail to parse is dropped
    /// and recorded in [`Ledger::skipped_rows`]. One bad row never aborts
    /// the load.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut ledger = Ledger {
            path,
            records: Vec::new(),
            skipped: Vec::new(),
        };

        if !ledger.path.exists() {
            return Ok(ledger);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&ledger.path)
            .map_err(|err| StoreError::persistence("read", &ledger.path, err))?;

        for (index, row) in reader.records().enumerate() {
            // Header is line 1.
            let line = index as u64 + 2;
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    ledger.skipped.push(SkippedRow {
                        line,
                        reason: format!("unreadable {} row: {err}", R::KIND),
                    });
                    continue;
                }
            };

            let mut cells: Vec<Option<String>> = row
                .iter()
                .map(|cell| {
                    let cell = cell.trim();
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            cells.resize(R::HEADERS.len(), None);

            // Filler rows without an id are not data.
            if cells[0].is_none() {
                continue;
            }

            match R::from_row(&cells) {
                Ok(record) => ledger.records.push(record),
                Err(reason) => ledger.skipped.push(SkippedRow { line, reason }),
            }
        }

        ledger.sort_newest_first();
        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Rows discarded by the last load, for operator diagnostics.
    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Next free id: 1 for an empty ledger, max + 1 otherwise.
    pub fn next_id(&self) -> i64 {
        self.records
            .iter()
            .map(|record| record.id())
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Assign an id, insert newest-first, persist. The append is rolled
    /// back if the rewrite fails.
    pub fn append(&mut self, mut record: R) -> Result<R, StoreError> {
        let id = self.next_id();
        record.assign_id(id);
        let result = record.clone();

        self.records.push(record);
        self.sort_newest_first();

        if let Err(err) = self.save() {
            self.records.retain(|existing| existing.id() != id);
            return Err(err);
        }
        Ok(result)
    }

    /// Remove the record with `id` and persist. `Ok(false)` when absent.
    pub fn delete(&mut self, id: i64) -> Result<bool, StoreError> {
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            return Ok(false);
        };

        let removed = self.records.remove(index);
        if let Err(err) = self.save() {
            self.records.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    /// Replace the date portion of a record's timestamp, keeping its
    /// time-of-day fragment, then re-sort and persist.
    pub fn update_date(&mut self, id: i64, date: NaiveDate) -> Result<Option<R>, StoreError> {
        let Some(record) = self.records.iter_mut().find(|record| record.id() == id) else {
            return Ok(None);
        };

        let previous = record.timestamp().to_string();
        let edited = with_date(&previous, date);
        record.set_timestamp(edited);
        self.sort_newest_first();

        if let Err(err) = self.save() {
            if let Some(record) = self.records.iter_mut().find(|record| record.id() == id) {
                record.set_timestamp(previous);
            }
            self.sort_newest_first();
            return Err(err);
        }
        Ok(self.get(id).cloned())
    }

    fn sort_newest_first(&mut self) {
        self.records
            .sort_by(|a, b| b.timestamp().cmp(a.timestamp()));
    }

    /// Rewrite the whole backing file: fixed header row, then one row per
    /// record in current in-memory order.
    fn save(&self) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|err| StoreError::persistence("rewrite", &self.path, err))?;

        writer
            .write_record(R::HEADERS)
            .map_err(|err| StoreError::persistence("rewrite", &self.path, err))?;
        for record in &self.records {
            writer
                .write_record(record.to_row())
                .map_err(|err| StoreError::persistence("rewrite", &self.path, err))?;
        }
        writer
            .flush()
            .map_err(|err| StoreError::persistence("rewrite", &self.path, err))
    }
}

impl Ledger<OrderRecord> {
    /// Record a sale of `dish` at its current menu price.
    pub fn add_order(
        &mut self,
        menu: &Catalog,
        client: &str,
        dish: &str,
        quantity: u32,
        payment_method: &str,
        now: NaiveDateTime,
    ) -> Result<OrderRecord, StoreError> {
        if quantity == 0 {
            return Err(StoreError::validation("quantity", "must be at least 1"));
        }
        let unit_price = menu
            .price_of(dish)
            .ok_or_else(|| StoreError::catalog_miss(dish, menu.label()))?;

        self.append(OrderRecord::new(
            format_timestamp(now),
            client,
            dish,
            quantity,
            unit_price,
            payment_method,
        ))
    }

    /// Flip `delivered` or `paid` on an order, persist, and return the
    /// updated record. `Ok(None)` when the id is unknown.
    pub fn toggle(&mut self, id: i64, flag: OrderFlag) -> Result<Option<OrderRecord>, StoreError> {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };

        match flag {
            OrderFlag::Delivered => record.delivered = !record.delivered,
            OrderFlag::Paid => record.paid = !record.paid,
        }

        if let Err(err) = self.save() {
            if let Some(record) = self.records.iter_mut().find(|record| record.id == id) {
                match flag {
                    OrderFlag::Delivered => record.delivered = !record.delivered,
                    OrderFlag::Paid => record.paid = !record.paid,
                }
            }
            return Err(err);
        }
        Ok(self.get(id).cloned())
    }
}

impl Ledger<ExpenseRecord> {
    /// Record a supplies purchase at its current catalog price.
    pub fn add_expense(
        &mut self,
        supplies: &Catalog,
        item: &str,
        quantity: f64,
        now: NaiveDateTime,
    ) -> Result<ExpenseRecord, StoreError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(StoreError::validation("quantity", "must be positive"));
        }
        let unit_price = supplies
            .price_of(item)
            .ok_or_else(|| StoreError::catalog_miss(item, supplies.label()))?;

        self.append(ExpenseRecord::new(
            format_timestamp(now),
            item,
            quantity,
            unit_price,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(dir: &Path) -> Catalog {
        Catalog::open_or_seed(
            dir.join("menu.json"),
            "menu",
            &[("Ceviche", 12.0), ("Trio Marino", 20.0)],
        )
        .unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_ids_are_max_plus_one() {
        let dir = tempfile::tempdir().unwrap();
        let menu = menu(dir.path());
        let mut orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("pedidos.csv")).unwrap();

        let first = orders
            .add_order(&menu, "Marta", "Ceviche", 1, "Efectivo", at(10, 13))
            .unwrap();
        let second = orders
            .add_order(&menu, "Raúl", "Ceviche", 2, "Yape", at(10, 14))
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        // Deleting the newest id frees it for reuse; deleting an older one
        // does not change the maximum.
        orders.delete(2).unwrap();
        let third = orders
            .add_order(&menu, "Ana", "Trio Marino", 1, "Plin", at(10, 15))
            .unwrap();
        assert_eq!(third.id, 2);

        orders.delete(1).unwrap();
        let fourth = orders
            .add_order(&menu, "Ana", "Trio Marino", 1, "Plin", at(10, 16))
            .unwrap();
        assert_eq!(fourth.id, 3);
    }

    #[test]
    fn test_add_order_requires_menu_entry() {
        let dir = tempfile::tempdir().unwrap();
        let menu = menu(dir.path());
        let mut orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("pedidos.csv")).unwrap();

        let err = orders
            .add_order(&menu, "Marta", "Tiradito", 1, "Efectivo", at(10, 13))
            .unwrap_err();
        assert!(matches!(err, StoreError::CatalogMiss { .. }));
        assert!(orders.is_empty());
    }

    #[test]
    fn test_add_order_snapshots_current_price() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(dir.path());
        let mut orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("pedidos.csv")).unwrap();

        let order = orders
            .add_order(&menu, "Marta", "Ceviche", 2, "Efectivo", at(10, 13))
            .unwrap();
        assert_eq!(order.unit_price, 12.0);
        assert_eq!(order.subtotal, 24.0);

        // A later menu edit leaves the stored order untouched.
        menu.upsert("Ceviche", 14.0).unwrap();
        assert_eq!(orders.get(order.id).unwrap().unit_price, 12.0);
    }

    #[test]
    fn test_records_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let menu = menu(dir.path());
        let mut orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("pedidos.csv")).unwrap();

        orders
            .add_order(&menu, "Marta", "Ceviche", 1, "Efectivo", at(12, 13))
            .unwrap();
        orders
            .add_order(&menu, "Raúl", "Ceviche", 1, "Yape", at(14, 9))
            .unwrap();
        orders
            .add_order(&menu, "Ana", "Ceviche", 1, "Plin", at(13, 20))
            .unwrap();

        let days: Vec<&str> = orders
            .records()
            .iter()
            .map(|order| &order.timestamp[..10])
            .collect();
        assert_eq!(days, vec!["2024-03-14", "2024-03-13", "2024-03-12"]);
    }

    #[test]
    fn test_toggle_flags() {
        let dir = tempfile::tempdir().unwrap();
        let menu = menu(dir.path());
        let mut orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("pedidos.csv")).unwrap();

        let order = orders
            .add_order(&menu, "Marta", "Ceviche", 1, "Efectivo", at(10, 13))
            .unwrap();

        let toggled = orders.toggle(order.id, OrderFlag::Paid).unwrap().unwrap();
        assert!(toggled.paid);
        let toggled = orders.toggle(order.id, OrderFlag::Paid).unwrap().unwrap();
        assert!(!toggled.paid);

        assert!(orders.toggle(99, OrderFlag::Delivered).unwrap().is_none());
    }

    #[test]
    fn test_update_date_keeps_time_of_day() {
        let dir = tempfile::tempdir().unwrap();
        let menu = menu(dir.path());
        let mut orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("pedidos.csv")).unwrap();

        let order = orders
            .add_order(
                &menu,
                "Marta",
                "Ceviche",
                1,
                "Efectivo",
                NaiveDate::from_ymd_opt(2024, 3, 10)
                    .unwrap()
                    .and_hms_opt(14, 22, 5)
                    .unwrap(),
            )
            .unwrap();

        let updated = orders
            .update_date(order.id, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(updated.timestamp, "2024-03-15 14:22:05");
    }

    #[test]
    fn test_delete_unknown_id_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("pedidos.csv")).unwrap();
        assert!(!orders.delete(42).unwrap());
    }

    #[test]
    fn test_add_expense_fractional_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let supplies = Catalog::open_or_seed(
            dir.path().join("insumos.json"),
            "supplies catalog",
            &[("Pescado fresco", 18.0)],
        )
        .unwrap();
        let mut expenses: Ledger<ExpenseRecord> =
            Ledger::open(dir.path().join("gastos.csv")).unwrap();

        let expense = expenses
            .add_expense(&supplies, "Pescado fresco", 2.5, at(10, 8))
            .unwrap();
        assert_eq!(expense.total, 45.0);

        let err = expenses
            .add_expense(&supplies, "Pescado fresco", 0.0, at(10, 8))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
    }
}
