//! Caleta core: the ledger and analytics engine behind the register.
//!
//! Owns the persisted state of a small restaurant's back office (two
//! name→price catalogs, an order ledger, an expense ledger) and the pure
//! analytics computed over it. Everything is single-process and
//! single-writer: stores load fully into memory at startup and rewrite
//! their backing file synchronously on every mutation.
//!
//! The operator-facing surface (CLI, rendering, artifacts) lives in the
//! `caleta-register` binary and only ever calls into this crate.

pub mod analytics;
pub mod catalog;
pub mod error;
pub mod expense;
pub mod ledger;
pub mod order;
pub mod record;

pub use analytics::{
    DailySales, DateRange, ExpenseSummary, ProfitSummary, RankEntry, SalesSummary,
    daily_sales_breakdown, expense_summary, profit_summary, sales_summary,
};
pub use catalog::{Catalog, CatalogEntry, parse_price};
pub use error::{SkippedRow, StoreError};
pub use expense::ExpenseRecord;
pub use ledger::{Ledger, OrderFlag};
pub use order::{DEFAULT_PAYMENT_METHOD, OrderRecord, PAYMENT_METHODS};
pub use record::TabularRecord;
