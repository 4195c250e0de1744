//! Ledger persistence: round-trips and tolerant loading of real files.

use std::fs;

use chrono::NaiveDate;

use caleta_core::{Catalog, ExpenseRecord, Ledger, OrderFlag, OrderRecord};

fn sample_menu(dir: &std::path::Path) -> Catalog {
    Catalog::open_or_seed(
        dir.join("menu.json"),
        "menu",
        &[("Ceviche", 12.0), ("Sudado de Pescado", 18.0)],
    )
    .expect("seed menu")
}

fn at(day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn order_ledger_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let menu = sample_menu(dir.path());
    let path = dir.path().join("pedidos.csv");

    let mut orders: Ledger<OrderRecord> = Ledger::open(&path).unwrap();
    orders
        .add_order(&menu, "Marta", "Ceviche", 2, "Yape", at(10, 13, 5))
        .unwrap();
    orders
        .add_order(&menu, "Raúl", "Sudado de Pescado", 1, "Efectivo", at(11, 20, 30))
        .unwrap();
    orders.toggle(1, OrderFlag::Paid).unwrap();

    let mut reloaded: Ledger<OrderRecord> = Ledger::open(&path).unwrap();
    assert_eq!(reloaded.records(), orders.records());
    assert!(reloaded.skipped_rows().is_empty());

    // Deleting an unknown id is a no-op and does not rewrite the file.
    let before = fs::read_to_string(&path).unwrap();
    assert!(!reloaded.delete(999).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn expense_ledger_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let supplies = Catalog::open_or_seed(
        dir.path().join("insumos.json"),
        "supplies catalog",
        &[("Pescado fresco", 18.0), ("Limón", 3.5)],
    )
    .unwrap();
    let path = dir.path().join("gastos.csv");

    let mut expenses: Ledger<ExpenseRecord> = Ledger::open(&path).unwrap();
    expenses
        .add_expense(&supplies, "Pescado fresco", 2.5, at(10, 8, 0))
        .unwrap();
    expenses
        .add_expense(&supplies, "Limón", 4.0, at(10, 8, 10))
        .unwrap();

    let reloaded: Ledger<ExpenseRecord> = Ledger::open(&path).unwrap();
    assert_eq!(reloaded.records(), expenses.records());
    assert_eq!(reloaded.records()[0].item, "Limón");
    assert_eq!(reloaded.records()[1].total, 45.0);
}

#[test]
fn load_tolerates_short_and_corrupt_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pedidos.csv");

    // An older install: 7-column rows, one corrupt row in the middle, and
    // a filler row without an id.
    fs::write(
        &path,
        "ID,Date,Client,Dish,Qty,UnitPrice,Total\n\
         1,2024-03-09 12:30:00,Marta,Ceviche,1,12.00,12.00\n\
         2,2024-03-09 13:00:00,Raúl,Sudado de Pescado,muchos,18.00,18.00\n\
         ,,,,,,\n\
         3,2024-03-10,Ana,Ceviche,2,12.00\n",
    )
    .unwrap();

    let orders: Ledger<OrderRecord> = Ledger::open(&path).unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders.skipped_rows().len(), 1);
    assert_eq!(orders.skipped_rows()[0].line, 3);
    assert!(orders.skipped_rows()[0].reason.contains("quantity"));

    // The legacy rows were padded: payment method and flags defaulted, the
    // bare date gained a midnight time, the missing total was recomputed.
    let ana = orders.get(3).expect("row 3 recovered");
    assert_eq!(ana.timestamp, "2024-03-10 00:00:00");
    assert_eq!(ana.payment_method, "Efectivo");
    assert_eq!(ana.subtotal, 24.0);
    assert!(!ana.delivered);

    // Newest first after load.
    assert_eq!(orders.records()[0].id, 3);

    // A full rewrite upgrades the file to the current schema.
    let mut orders = orders;
    orders.delete(1).unwrap();
    let upgraded = fs::read_to_string(&path).unwrap();
    assert!(upgraded.starts_with(
        "ID,Date,Client,Dish,Qty,UnitPrice,Total,PaymentMethod,Delivered,Paid"
    ));
    assert!(upgraded.contains("3,2024-03-10 00:00:00,Ana,Ceviche,2,12.00,24.00,Efectivo,No,No"));
}

#[test]
fn missing_file_is_an_empty_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let orders: Ledger<OrderRecord> = Ledger::open(dir.path().join("no-such.csv")).unwrap();
    assert!(orders.is_empty());
    assert_eq!(orders.next_id(), 1);
}
