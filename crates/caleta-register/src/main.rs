//! Caleta: command-line register for a small cevichería.
//!
//! Records orders and supply expenses in CSV ledgers, keeps the dish menu
//! and supplies price list in JSON documents, and derives the day-to-day
//! sales statistics (totals, rankings, payment mix, rush hours, income vs
//! expenses) with optional date filtering.

mod config;
mod constants;
mod display;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use caleta_core::{
    Catalog, DEFAULT_PAYMENT_METHOD, DateRange, ExpenseRecord, Ledger, OrderFlag, OrderRecord,
    daily_sales_breakdown, expense_summary, parse_price, profit_summary, sales_summary,
};
use config::FileConfig;

/// Default config file path
const CONFIG_FILE: &str = "caleta.toml";

#[derive(Parser, Debug)]
#[command(name = "caleta")]
#[command(about = "Order and expense register for the cevichería till")]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the dish menu
    Menu {
        #[command(subcommand)]
        action: CatalogCommand,
    },

    /// Manage the supplies price list
    Supplies {
        #[command(subcommand)]
        action: CatalogCommand,
    },

    /// Record and manage orders
    Order {
        #[command(subcommand)]
        action: OrderCommand,
    },

    /// Record and manage expenses
    Expense {
        #[command(subcommand)]
        action: ExpenseCommand,
    },

    /// Sales and expense statistics (today unless a range is given)
    Stats {
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Closing report: financial summary plus the in-range records
    Close {
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Also write the report into the output directory
        #[arg(long)]
        save: bool,
    },

    /// Export the per-date sales summary as CSV
    Export {
        /// Output file (default: the configured output directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List all entries
    List,

    /// Set or update a price
    Set {
        /// Entry name
        name: String,

        /// Unit price, non-negative
        price: String,
    },

    /// Remove an entry
    Remove {
        /// Entry name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    /// Record a new order at the current menu price
    Add {
        /// Client name
        #[arg(long)]
        client: String,

        /// Dish name, as written in the menu
        #[arg(long)]
        dish: String,

        /// Number of portions
        #[arg(long, default_value_t = 1)]
        qty: u32,

        /// Payment method (Efectivo, Yape, Plin, ...)
        #[arg(long, default_value = DEFAULT_PAYMENT_METHOD)]
        pay: String,
    },

    /// List orders (today unless a range is given)
    List {
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// List the whole ledger
        #[arg(long)]
        all: bool,
    },

    /// Delete an order by id
    Delete {
        /// Order id
        id: i64,
    },

    /// Flip the delivered flag of an order
    Delivered {
        /// Order id
        id: i64,
    },

    /// Flip the paid flag of an order
    Paid {
        /// Order id
        id: i64,
    },

    /// Move an order to another date, keeping its time of day
    SetDate {
        /// Order id
        id: i64,

        /// New date (YYYY-MM-DD)
        date: NaiveDate,
    },
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// Record a supplies purchase at the current list price
    Add {
        /// Item name, as written in the supplies list
        #[arg(long)]
        item: String,

        /// Quantity, fractional allowed
        #[arg(long, default_value_t = 1.0)]
        qty: f64,
    },

    /// List expenses (today unless a range is given)
    List {
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// List the whole ledger
        #[arg(long)]
        all: bool,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id
        id: i64,
    },

    /// Move an expense to another date, keeping its time of day
    SetDate {
        /// Expense id
        id: i64,

        /// New date (YYYY-MM-DD)
        date: NaiveDate,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = FileConfig::load(&args.config)?;

    std::fs::create_dir_all(&config.files.data_dir)?;

    match args.command {
        Some(Command::Menu { action }) => handle_catalog_command(
            action,
            open_catalog(config.menu_path(), "menu", constants::MENU_SEED),
            &config,
        ),
        Some(Command::Supplies { action }) => handle_catalog_command(
            action,
            open_catalog(
                config.supplies_path(),
                "supplies list",
                constants::SUPPLIES_SEED,
            ),
            &config,
        ),
        Some(Command::Order { action }) => handle_order_command(action, &config),
        Some(Command::Expense { action }) => handle_expense_command(action, &config),
        Some(Command::Stats { from, to }) => handle_stats(&config, from, to),
        Some(Command::Close { from, to, save }) => handle_close(&config, from, to, save),
        Some(Command::Export { out }) => handle_export(&config, out),
        // No subcommand: today's numbers at a glance.
        None => handle_stats(&config, None, None),
    }
}

/// Open a catalog, continuing with an empty one if the document is
/// damaged. A fresh install seeds and persists the defaults.
fn open_catalog(path: PathBuf, label: &'static str, seed: &[(&str, f64)]) -> Catalog {
    match Catalog::open_or_seed(path.clone(), label, seed) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("WARNING: {err}");
            eprintln!("Continuing with an empty {label}; fix or delete the file to recover.");
            Catalog::empty(path, label)
        }
    }
}

fn open_orders(config: &FileConfig) -> Result<Ledger<OrderRecord>> {
    let ledger = Ledger::open(config.orders_path())?;
    display::print_skipped("order", ledger.skipped_rows());
    Ok(ledger)
}

fn open_expenses(config: &FileConfig) -> Result<Ledger<ExpenseRecord>> {
    let ledger = Ledger::open(config.expenses_path())?;
    display::print_skipped("expense", ledger.skipped_rows());
    Ok(ledger)
}

/// Handle menu/supplies subcommands
fn handle_catalog_command(
    action: CatalogCommand,
    mut catalog: Catalog,
    config: &FileConfig,
) -> Result<()> {
    match action {
        CatalogCommand::List => {
            display::print_catalog(&catalog, &config.report.currency);
            Ok(())
        }

        CatalogCommand::Set { name, price } => {
            let price = parse_price(&price)?;
            catalog.upsert(&name, price)?;
            println!(
                "\"{}\" now at {} {:.2} in the {}.",
                name,
                config.report.currency,
                price,
                catalog.label()
            );
            Ok(())
        }

        CatalogCommand::Remove { name } => {
            if catalog.remove(&name)? {
                println!("Removed \"{}\" from the {}.", name, catalog.label());
            } else {
                println!("\"{}\" is not in the {}.", name, catalog.label());
            }
            Ok(())
        }
    }
}

/// Handle order subcommands
fn handle_order_command(action: OrderCommand, config: &FileConfig) -> Result<()> {
    match action {
        OrderCommand::Add {
            client,
            dish,
            qty,
            pay,
        } => {
            let menu = open_catalog(config.menu_path(), "menu", constants::MENU_SEED);
            let mut orders = open_orders(config)?;

            let order =
                orders.add_order(&menu, &client, &dish, qty, &pay, Local::now().naive_local())?;
            println!(
                "Order #{} recorded: {} x{} for {} ({} {:.2}, {}).",
                order.id,
                order.dish,
                order.quantity,
                order.client,
                config.report.currency,
                order.subtotal,
                order.payment_method
            );
            Ok(())
        }

        OrderCommand::List { from, to, all } => {
            let orders = open_orders(config)?;
            if all {
                display::print_orders(orders.records(), &config.report.currency);
            } else {
                let range = DateRange::resolve(from, to, Local::now().date_naive());
                let selected: Vec<OrderRecord> = orders
                    .records()
                    .iter()
                    .filter(|order| range.covers(&order.timestamp))
                    .cloned()
                    .collect();
                display::print_orders(&selected, &config.report.currency);
            }
            Ok(())
        }

        OrderCommand::Delete { id } => {
            let mut orders = open_orders(config)?;
            if orders.delete(id)? {
                println!("Order #{id} deleted.");
            } else {
                println!("No order with id {id}.");
            }
            Ok(())
        }

        OrderCommand::Delivered { id } => toggle_order(config, id, OrderFlag::Delivered),
        OrderCommand::Paid { id } => toggle_order(config, id, OrderFlag::Paid),

        OrderCommand::SetDate { id, date } => {
            let mut orders = open_orders(config)?;
            match orders.update_date(id, date)? {
                Some(order) => println!("Order #{} moved to {}.", order.id, order.timestamp),
                None => println!("No order with id {id}."),
            }
            Ok(())
        }
    }
}

fn toggle_order(config: &FileConfig, id: i64, flag: OrderFlag) -> Result<()> {
    let mut orders = open_orders(config)?;
    match orders.toggle(id, flag)? {
        Some(order) => {
            let (label, value) = match flag {
                OrderFlag::Delivered => ("delivered", order.delivered),
                OrderFlag::Paid => ("paid", order.paid),
            };
            println!(
                "Order #{} is now {}: {}.",
                order.id,
                label,
                if value { "Si" } else { "No" }
            );
        }
        None => println!("No order with id {id}."),
    }
    Ok(())
}

/// Handle expense subcommands
fn handle_expense_command(action: ExpenseCommand, config: &FileConfig) -> Result<()> {
    match action {
        ExpenseCommand::Add { item, qty } => {
            let supplies = open_catalog(
                config.supplies_path(),
                "supplies list",
                constants::SUPPLIES_SEED,
            );
            let mut expenses = open_expenses(config)?;

            let expense =
                expenses.add_expense(&supplies, &item, qty, Local::now().naive_local())?;
            println!(
                "Expense #{} recorded: {} x{} ({} {:.2}).",
                expense.id,
                expense.item,
                expense.quantity,
                config.report.currency,
                expense.total
            );
            Ok(())
        }

        ExpenseCommand::List { from, to, all } => {
            let expenses = open_expenses(config)?;
            if all {
                display::print_expenses(expenses.records(), &config.report.currency);
            } else {
                let range = DateRange::resolve(from, to, Local::now().date_naive());
                let selected: Vec<ExpenseRecord> = expenses
                    .records()
                    .iter()
                    .filter(|expense| range.covers(&expense.timestamp))
                    .cloned()
                    .collect();
                display::print_expenses(&selected, &config.report.currency);
            }
            Ok(())
        }

        ExpenseCommand::Delete { id } => {
            let mut expenses = open_expenses(config)?;
            if expenses.delete(id)? {
                println!("Expense #{id} deleted.");
            } else {
                println!("No expense with id {id}.");
            }
            Ok(())
        }

        ExpenseCommand::SetDate { id, date } => {
            let mut expenses = open_expenses(config)?;
            match expenses.update_date(id, date)? {
                Some(expense) => println!("Expense #{} moved to {}.", expense.id, expense.timestamp),
                None => println!("No expense with id {id}."),
            }
            Ok(())
        }
    }
}

/// Compute and render the statistics block for a range.
fn handle_stats(config: &FileConfig, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let orders = open_orders(config)?;
    let expenses = open_expenses(config)?;

    let range = DateRange::resolve(from, to, Local::now().date_naive());
    let sales = sales_summary(orders.records(), range);
    let costs = expense_summary(expenses.records(), range);
    let profit = profit_summary(&sales, &costs);

    display::print_summary(range, &sales, &costs, &profit, &config.report.currency);
    Ok(())
}

/// Render the closing report, optionally persisting it as a text artifact.
fn handle_close(
    config: &FileConfig,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    save: bool,
) -> Result<()> {
    let orders = open_orders(config)?;
    let expenses = open_expenses(config)?;

    let range = DateRange::resolve(from, to, Local::now().date_naive());
    let sales = sales_summary(orders.records(), range);
    let costs = expense_summary(expenses.records(), range);
    let profit = profit_summary(&sales, &costs);

    let in_range_orders: Vec<&OrderRecord> = orders
        .records()
        .iter()
        .filter(|order| range.covers(&order.timestamp))
        .collect();
    let in_range_expenses: Vec<&ExpenseRecord> = expenses
        .records()
        .iter()
        .filter(|expense| range.covers(&expense.timestamp))
        .collect();

    let text = report::closing_report_text(
        range,
        &in_range_orders,
        &in_range_expenses,
        &profit,
        &config.report.currency,
    );
    print!("{text}");

    if save {
        std::fs::create_dir_all(&config.report.output_dir)?;
        let path = config
            .report
            .output_dir
            .join(format!("cierre_{}_{}.txt", range.start, range.end));
        report::write_closing_report(&path, &text)?;
        println!("\nReport written to {}", path.display());
    }
    Ok(())
}

/// Export the per-date sales summary spreadsheet.
fn handle_export(config: &FileConfig, out: Option<PathBuf>) -> Result<()> {
    let orders = open_orders(config)?;
    let rows = daily_sales_breakdown(orders.records());

    let path = match out {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.report.output_dir)?;
            config
                .report
                .output_dir
                .join(constants::DAILY_SALES_FILENAME)
        }
    };

    report::write_daily_sales(&path, &rows)?;
    println!(
        "Report generated: {} ({} date(s))",
        path.display(),
        rows.len()
    );
    Ok(())
}
