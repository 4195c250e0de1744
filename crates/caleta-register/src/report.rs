//! Generated artifacts: the closing report and the daily sales export.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use caleta_core::{DailySales, DateRange, ExpenseRecord, OrderRecord, ProfitSummary};

/// Write the per-date sales summary as a CSV spreadsheet.
pub fn write_daily_sales(path: &Path, rows: &[DailySales]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(["Date", "Orders", "Total"])?;
    for row in rows {
        writer.write_record([
            row.date.clone(),
            row.orders.to_string(),
            format!("{:.2}", row.total),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the printable closing report for one date range.
pub fn closing_report_text(
    range: DateRange,
    orders: &[&OrderRecord],
    expenses: &[&ExpenseRecord],
    profit: &ProfitSummary,
    currency: &str,
) -> String {
    let mut text = String::new();
    let line = "=".repeat(60);

    let _ = writeln!(text, "{line}");
    let _ = writeln!(text, "CIERRE DE CAJA  {} .. {}", range.start, range.end);
    let _ = writeln!(text, "{line}");
    let _ = writeln!(text, "Income:    {} {:.2}", currency, profit.income);
    let _ = writeln!(text, "Expenses:  {} {:.2}", currency, profit.expenses);
    let result = if profit.profitable() { "PROFIT" } else { "LOSS" };
    let _ = writeln!(text, "Net:       {} {:.2}  ({result})", currency, profit.net);

    let _ = writeln!(text, "\nOrders ({}):", orders.len());
    let _ = writeln!(text, "{}", "-".repeat(60));
    for order in orders {
        let _ = writeln!(
            text,
            "#{:<4} {}  {:<14} {:<22} x{:<3} {} {:>8.2}  {}",
            order.id,
            order.timestamp,
            order.client,
            order.dish,
            order.quantity,
            currency,
            order.subtotal,
            order.payment_method,
        );
    }

    let _ = writeln!(text, "\nExpenses ({}):", expenses.len());
    let _ = writeln!(text, "{}", "-".repeat(60));
    for expense in expenses {
        let _ = writeln!(
            text,
            "#{:<4} {}  {:<24} x{:<6} {} {:>8.2}",
            expense.id, expense.timestamp, expense.item, expense.quantity, currency, expense.total,
        );
    }

    text
}

/// Persist the closing report next to the other artifacts.
pub fn write_closing_report(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
