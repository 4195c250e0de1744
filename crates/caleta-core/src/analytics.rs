//! Date-filtered sales and expense analytics.
//!
//! Pure computation over ledger snapshots. Every call recomputes from the
//! records it is given; nothing here mutates a ledger or reads ambient
//! process time. The reference day is an explicit parameter, so "today"
//! queries are reproducible in tests.
//!
//! Empty input (or an empty filtered subset) yields a fully zeroed
//! summary: totals 0, rankings empty, all 24 hour buckets present.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::expense::ExpenseRecord;
use crate::order::OrderRecord;
use crate::record::{DATE_FORMAT, date_portion, hour_portion};

/// How many entries the top/bottom rankings keep.
const RANKING_SIZE: usize = 3;

/// Inclusive calendar-date window. The end bound covers its whole day, so
/// a record at `end 23:59:59` is still inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolve optional bounds against an explicit reference day. With no
    /// bounds at all the range is just that day.
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        DateRange {
            start: start.unwrap_or(today),
            end: end.unwrap_or(today),
        }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    /// Whether a stored timestamp falls inside the window. Timestamps
    /// whose date portion does not parse never match.
    pub fn covers(&self, timestamp: &str) -> bool {
        match NaiveDate::parse_from_str(date_portion(timestamp), DATE_FORMAT) {
            Ok(date) => self.start <= date && date <= self.end,
            Err(_) => false,
        }
    }
}

/// One ranking line: a name, how often it appeared, and its percentage
/// share of the grouped total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub name: String,
    pub count: usize,
    pub share: f64,
}

/// Everything the register shows about sales in a date window.
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub order_count: usize,
    pub total: f64,
    /// Mean subtotal per order, 0 when there are no orders.
    pub average_ticket: f64,
    /// Total money divided by total dishes sold, 0 when nothing sold.
    pub average_unit_value: f64,
    pub top_dishes: Vec<RankEntry>,
    pub bottom_dishes: Vec<RankEntry>,
    pub top_clients: Vec<RankEntry>,
    pub bottom_clients: Vec<RankEntry>,
    /// Orders per payment method, first-seen order.
    pub payment_mix: Vec<(String, usize)>,
    /// Subtotal summed per calendar date, ascending.
    pub daily_totals: Vec<(String, f64)>,
    /// Orders per hour of day, all 24 buckets always present.
    pub hourly_orders: [u32; 24],
}

/// Expense side of the same window.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseSummary {
    pub expense_count: usize,
    pub total: f64,
    /// Mean total per expense record, 0 when there are none.
    pub average: f64,
    /// Total summed per calendar date, ascending.
    pub daily_totals: Vec<(String, f64)>,
}

/// Income minus expenses over one shared window. Thin composition; both
/// summaries must have been computed over the same range by the caller.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProfitSummary {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl ProfitSummary {
    /// Flips exactly at 0.00: breaking even still counts as profitable.
    pub fn profitable(&self) -> bool {
        self.net >= 0.0
    }
}

/// One export row of the per-date sales breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySales {
    pub date: String,
    pub orders: usize,
    pub total: f64,
}

/// Compute the sales summary for orders inside `range`.
pub fn sales_summary(orders: &[OrderRecord], range: DateRange) -> SalesSummary {
    let selected: Vec<&OrderRecord> = orders
        .iter()
        .filter(|order| range.covers(&order.timestamp))
        .collect();

    let order_count = selected.len();
    let total: f64 = selected.iter().map(|order| order.subtotal).sum();
    let quantity_sum: f64 = selected
        .iter()
        .map(|order| f64::from(order.quantity))
        .sum();

    let dish_ranking = ranked(count_by_name(
        selected.iter().map(|order| order.dish.as_str()),
    ));
    let client_ranking = ranked(count_by_name(
        selected.iter().map(|order| order.client.as_str()),
    ));

    let mut hourly_orders = [0u32; 24];
    for order in &selected {
        if let Some(hour) = hour_portion(&order.timestamp) {
            hourly_orders[hour as usize] += 1;
        }
    }

    SalesSummary {
        order_count,
        total,
        average_ticket: mean(total, order_count as f64),
        average_unit_value: mean(total, quantity_sum),
        top_dishes: dish_ranking.iter().take(RANKING_SIZE).cloned().collect(),
        bottom_dishes: dish_ranking.iter().rev().take(RANKING_SIZE).cloned().collect(),
        top_clients: client_ranking.iter().take(RANKING_SIZE).cloned().collect(),
        bottom_clients: client_ranking
            .iter()
            .rev()
            .take(RANKING_SIZE)
            .cloned()
            .collect(),
        payment_mix: count_by_name(selected.iter().map(|order| order.payment_method.as_str())),
        daily_totals: daily_series(selected.iter().map(|order| (&order.timestamp, order.subtotal))),
        hourly_orders,
    }
}

/// Compute the expense summary for expenses inside `range`.
pub fn expense_summary(expenses: &[ExpenseRecord], range: DateRange) -> ExpenseSummary {
    let selected: Vec<&ExpenseRecord> = expenses
        .iter()
        .filter(|expense| range.covers(&expense.timestamp))
        .collect();

    let total: f64 = selected.iter().map(|expense| expense.total).sum();
    ExpenseSummary {
        expense_count: selected.len(),
        total,
        average: mean(total, selected.len() as f64),
        daily_totals: daily_series(
            selected
                .iter()
                .map(|expense| (&expense.timestamp, expense.total)),
        ),
    }
}

/// Combine both sides of one window into the financial bottom line.
pub fn profit_summary(sales: &SalesSummary, expenses: &ExpenseSummary) -> ProfitSummary {
    ProfitSummary {
        income: sales.total,
        expenses: expenses.total,
        net: sales.total - expenses.total,
    }
}

/// Per-date breakdown of the whole order ledger, newest date first. This
/// is the row contract of the exported sales spreadsheet.
pub fn daily_sales_breakdown(orders: &[OrderRecord]) -> Vec<DailySales> {
    let mut by_date: HashMap<String, (usize, f64)> = HashMap::new();
    for order in orders {
        let slot = by_date
            .entry(date_portion(&order.timestamp).to_string())
            .or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += order.subtotal;
    }

    let mut rows: Vec<DailySales> = by_date
        .into_iter()
        .map(|(date, (orders, total))| DailySales {
            date,
            orders,
            total,
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

fn mean(total: f64, divisor: f64) -> f64 {
    if divisor == 0.0 { 0.0 } else { total / divisor }
}

/// Occurrence counts grouped by name, first-seen order preserved.
fn count_by_name<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|(seen, _)| seen.as_str() == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name.to_string(), 1)),
        }
    }
    counts
}

/// Full descending ranking with percentage shares. The sort is stable, so
/// tied names keep their first-seen order.
fn ranked(counts: Vec<(String, usize)>) -> Vec<RankEntry> {
    let grouped_total: usize = counts.iter().map(|(_, count)| count).sum();
    let mut sorted = counts;
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    sorted
        .into_iter()
        .map(|(name, count)| RankEntry {
            name,
            count,
            share: if grouped_total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / grouped_total as f64
            },
        })
        .collect()
}

/// Amounts summed per calendar date, ascending date order.
fn daily_series<'a>(values: impl Iterator<Item = (&'a String, f64)>) -> Vec<(String, f64)> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for (timestamp, amount) in values {
        *totals
            .entry(date_portion(timestamp).to_string())
            .or_insert(0.0) += amount;
    }

    let mut series: Vec<(String, f64)> = totals.into_iter().collect();
    series.sort_by(|a, b| a.0.cmp(&b.0));
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn order(id: i64, timestamp: &str, client: &str, dish: &str, quantity: u32, unit_price: f64) -> OrderRecord {
        OrderRecord {
            id,
            timestamp: timestamp.to_string(),
            client: client.to_string(),
            dish: dish.to_string(),
            quantity,
            unit_price,
            subtotal: f64::from(quantity) * unit_price,
            payment_method: "Efectivo".to_string(),
            delivered: false,
            paid: false,
        }
    }

    fn expense(id: i64, timestamp: &str, item: &str, total: f64) -> ExpenseRecord {
        ExpenseRecord {
            id,
            timestamp: timestamp.to_string(),
            item: item.to_string(),
            quantity: 1.0,
            unit_price: total,
            total,
        }
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = sales_summary(&[], DateRange::single_day(day(10)));

        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.average_ticket, 0.0);
        assert_eq!(summary.average_unit_value, 0.0);
        assert!(summary.top_dishes.is_empty());
        assert!(summary.bottom_dishes.is_empty());
        assert!(summary.top_clients.is_empty());
        assert!(summary.bottom_clients.is_empty());
        assert!(summary.payment_mix.is_empty());
        assert!(summary.daily_totals.is_empty());
        assert_eq!(summary.hourly_orders, [0u32; 24]);
    }

    #[test]
    fn test_ranking_order_and_shares() {
        // Dish counts A:5, B:3, C:3, D:1, with B seen before C.
        let mut orders = Vec::new();
        let dishes = ["A", "B", "C", "D", "A", "A", "B", "C", "A", "B", "C", "A"];
        for (index, dish) in dishes.iter().enumerate() {
            orders.push(order(
                index as i64 + 1,
                "2024-03-10 12:00:00",
                "Marta",
                dish,
                1,
                10.0,
            ));
        }

        let summary = sales_summary(&orders, DateRange::single_day(day(10)));

        let top: Vec<&str> = summary
            .top_dishes
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(top, vec!["A", "B", "C"]);
        assert!((summary.top_dishes[0].share - 100.0 * 5.0 / 12.0).abs() < 1e-9);

        // Bottom list is the mirrored ranking: D first, then the tie in
        // reverse of its top order.
        let bottom: Vec<&str> = summary
            .bottom_dishes
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(bottom, vec!["D", "C", "B"]);
        assert!((summary.bottom_dishes[0].share - 100.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_end_of_day_boundary_is_inclusive() {
        let orders = vec![
            order(1, "2024-03-15 23:59:59", "Marta", "Ceviche", 1, 12.0),
            order(2, "2024-03-16 00:00:00", "Raúl", "Ceviche", 1, 12.0),
        ];

        let range = DateRange::resolve(Some(day(10)), Some(day(15)), day(20));
        let summary = sales_summary(&orders, range);

        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.total, 12.0);
    }

    #[test]
    fn test_default_range_is_the_reference_day() {
        let orders = vec![
            order(1, "2024-03-10 13:00:00", "Marta", "Ceviche", 1, 12.0),
            order(2, "2024-03-09 13:00:00", "Raúl", "Ceviche", 1, 12.0),
        ];

        let range = DateRange::resolve(None, None, day(10));
        let summary = sales_summary(&orders, range);
        assert_eq!(summary.order_count, 1);
    }

    #[test]
    fn test_average_unit_value() {
        let orders = vec![
            order(1, "2024-03-10 13:00:00", "Marta", "Ceviche", 2, 10.0),
            order(2, "2024-03-10 14:00:00", "Raúl", "Causa", 3, 4.0),
        ];

        let summary = sales_summary(&orders, DateRange::single_day(day(10)));
        assert!((summary.average_unit_value - 32.0 / 5.0).abs() < 1e-9);
        assert!((summary.average_ticket - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_payment_mix_and_hourly_buckets() {
        let mut orders = vec![
            order(1, "2024-03-10 13:05:00", "Marta", "Ceviche", 1, 12.0),
            order(2, "2024-03-10 13:40:00", "Raúl", "Ceviche", 1, 12.0),
            order(3, "2024-03-10 20:10:00", "Ana", "Ceviche", 1, 12.0),
        ];
        orders[1].payment_method = "Yape".to_string();

        let summary = sales_summary(&orders, DateRange::single_day(day(10)));

        assert_eq!(
            summary.payment_mix,
            vec![("Efectivo".to_string(), 2), ("Yape".to_string(), 1)]
        );
        assert_eq!(summary.hourly_orders[13], 2);
        assert_eq!(summary.hourly_orders[20], 1);
        assert_eq!(summary.hourly_orders.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_daily_series_ascending() {
        let orders = vec![
            order(1, "2024-03-12 13:00:00", "Marta", "Ceviche", 1, 12.0),
            order(2, "2024-03-10 13:00:00", "Raúl", "Ceviche", 1, 12.0),
            order(3, "2024-03-12 14:00:00", "Ana", "Ceviche", 1, 12.0),
        ];

        let range = DateRange::resolve(Some(day(1)), Some(day(31)), day(31));
        let summary = sales_summary(&orders, range);
        assert_eq!(
            summary.daily_totals,
            vec![
                ("2024-03-10".to_string(), 12.0),
                ("2024-03-12".to_string(), 24.0),
            ]
        );
    }

    #[test]
    fn test_profit_summary_and_sign_flip() {
        let orders = vec![order(1, "2024-03-10 13:00:00", "Marta", "Ceviche", 1, 500.0)];
        let expenses = vec![expense(1, "2024-03-10 09:00:00", "Pescado fresco", 180.0)];

        let range = DateRange::single_day(day(10));
        let sales = sales_summary(&orders, range);
        let costs = expense_summary(&expenses, range);
        let profit = profit_summary(&sales, &costs);

        assert!((profit.net - 320.0).abs() < 1e-9);
        assert!((costs.average - 180.0).abs() < 1e-9);
        assert!(profit.profitable());

        let break_even = ProfitSummary {
            income: 180.0,
            expenses: 180.0,
            net: 0.0,
        };
        assert!(break_even.profitable());

        let in_the_red = ProfitSummary {
            income: 100.0,
            expenses: 180.0,
            net: -80.0,
        };
        assert!(!in_the_red.profitable());
    }

    #[test]
    fn test_daily_sales_breakdown_newest_first() {
        let orders = vec![
            order(1, "2024-03-10 13:00:00", "Marta", "Ceviche", 1, 12.0),
            order(2, "2024-03-12 13:00:00", "Raúl", "Ceviche", 2, 12.0),
            order(3, "2024-03-10 19:00:00", "Ana", "Ceviche", 1, 12.0),
        ];

        let rows = daily_sales_breakdown(&orders);
        assert_eq!(
            rows,
            vec![
                DailySales {
                    date: "2024-03-12".to_string(),
                    orders: 1,
                    total: 24.0,
                },
                DailySales {
                    date: "2024-03-10".to_string(),
                    orders: 2,
                    total: 24.0,
                },
            ]
        );
    }
}
