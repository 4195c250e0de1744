//! Console rendering: listings, summaries, and load warnings.

use caleta_core::{
    Catalog, DateRange, ExpenseRecord, ExpenseSummary, OrderRecord, ProfitSummary, RankEntry,
    SalesSummary, SkippedRow,
};

/// Render a catalog as a two-column price list.
pub fn print_catalog(catalog: &Catalog, currency: &str) {
    if catalog.is_empty() {
        println!("The {} is empty.", catalog.label());
        return;
    }

    println!("{:<28} {:>10}", "Name", "Price");
    println!("{}", "-".repeat(39));
    for entry in catalog.entries() {
        println!(
            "{:<28} {:>10}",
            entry.name,
            format!("{} {:.2}", currency, entry.price)
        );
    }
    println!("{}", "-".repeat(39));
    println!("{} entrie(s)", catalog.len());
}

/// Render an order listing, newest first, with a totals footer.
pub fn print_orders(orders: &[OrderRecord], currency: &str) {
    if orders.is_empty() {
        println!("No orders in this range.");
        return;
    }

    println!(
        "{:<5} {:<20} {:<14} {:<22} {:>4} {:>10} {:>10}  {:<9} {:^6} {:^6}",
        "ID", "Date", "Client", "Dish", "Qty", "Unit", "Total", "Payment", "Deliv", "Paid"
    );
    println!("{}", "-".repeat(118));

    let mut total = 0.0;
    for order in orders {
        println!(
            "{:<5} {:<20} {:<14} {:<22} {:>4} {:>10} {:>10}  {:<9} {:^6} {:^6}",
            order.id,
            order.timestamp,
            order.client,
            order.dish,
            order.quantity,
            format!("{:.2}", order.unit_price),
            format!("{:.2}", order.subtotal),
            order.payment_method,
            si_no(order.delivered),
            si_no(order.paid),
        );
        total += order.subtotal;
    }

    println!("{}", "-".repeat(118));
    println!("{} order(s), total {} {:.2}", orders.len(), currency, total);
}

/// Render an expense listing, newest first, with a totals footer.
pub fn print_expenses(expenses: &[ExpenseRecord], currency: &str) {
    if expenses.is_empty() {
        println!("No expenses in this range.");
        return;
    }

    println!(
        "{:<5} {:<20} {:<24} {:>8} {:>10} {:>10}",
        "ID", "Date", "Item", "Qty", "Unit", "Total"
    );
    println!("{}", "-".repeat(82));

    let mut total = 0.0;
    for expense in expenses {
        println!(
            "{:<5} {:<20} {:<24} {:>8} {:>10} {:>10}",
            expense.id,
            expense.timestamp,
            expense.item,
            expense.quantity,
            format!("{:.2}", expense.unit_price),
            format!("{:.2}", expense.total),
        );
        total += expense.total;
    }

    println!("{}", "-".repeat(82));
    println!(
        "{} expense(s), total {} {:.2}",
        expenses.len(),
        currency,
        total
    );
}

/// Render the full statistics block for one date range.
pub fn print_summary(
    range: DateRange,
    sales: &SalesSummary,
    costs: &ExpenseSummary,
    profit: &ProfitSummary,
    currency: &str,
) {
    println!("=============================================");
    println!("Sales {} .. {}", range.start, range.end);
    println!("=============================================");
    println!("  Orders:          {}", sales.order_count);
    println!("  Income:          {} {:.2}", currency, sales.total);
    println!(
        "  Average ticket:  {} {:.2}",
        currency, sales.average_ticket
    );
    println!(
        "  Average dish:    {} {:.2}",
        currency, sales.average_unit_value
    );

    print_ranking("Top dishes", &sales.top_dishes);
    print_ranking("Least sold dishes", &sales.bottom_dishes);
    print_ranking("Top clients", &sales.top_clients);

    if !sales.payment_mix.is_empty() {
        println!("\nPayment methods:");
        for (method, count) in &sales.payment_mix {
            println!("  {:<12} {:>4}", method, count);
        }
    }

    if !sales.daily_totals.is_empty() {
        println!("\nDaily totals:");
        for (date, total) in &sales.daily_totals {
            println!("  {}  {} {:>10.2}", date, currency, total);
        }
    }

    print_rush_hours(&sales.hourly_orders);

    println!("\n---------------------------------------------");
    println!(
        "  Expenses:        {} {:.2} ({} record(s))",
        currency, costs.total, costs.expense_count
    );
    let label = if profit.profitable() { "NET PROFIT" } else { "NET LOSS" };
    println!("  {}:      {} {:.2}", label, currency, profit.net);
}

fn print_ranking(title: &str, entries: &[RankEntry]) {
    if entries.is_empty() {
        return;
    }
    println!("\n{}:", title);
    for (position, entry) in entries.iter().enumerate() {
        println!(
            "  {}. {:<24} {:>4}  ({:.1}%)",
            position + 1,
            entry.name,
            entry.count,
            entry.share
        );
    }
}

fn print_rush_hours(hourly: &[u32; 24]) {
    if hourly.iter().all(|count| *count == 0) {
        return;
    }
    println!("\nOrders per hour:");
    for (hour, count) in hourly.iter().enumerate() {
        if *count > 0 {
            println!("  {:>2}:00  {:>4}  {}", hour, count, "#".repeat(*count as usize));
        }
    }
}

/// Warn about rows the loader had to discard.
pub fn print_skipped(kind: &str, skipped: &[SkippedRow]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!(
        "WARNING: {} {} row(s) discarded while loading:",
        skipped.len(),
        kind
    );
    for row in skipped {
        eprintln!("  {}", row);
    }
}

fn si_no(value: bool) -> &'static str {
    if value { "Si" } else { "No" }
}
