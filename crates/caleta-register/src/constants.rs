//! Fixed names and seed data for the register binary.
//!
//! Everything the operator can change lives in `caleta.toml`; this module
//! only holds the defaults and the catalogs a fresh install starts with.

// =============================================================================
// File Names
// =============================================================================

/// Order ledger filename (inside the data directory)
pub const ORDERS_FILENAME: &str = "pedidos.csv";

/// Expense ledger filename (inside the data directory)
pub const EXPENSES_FILENAME: &str = "gastos.csv";

/// Dish menu document filename
pub const MENU_FILENAME: &str = "menu.json";

/// Supplies price-list document filename
pub const SUPPLIES_FILENAME: &str = "insumos.json";

/// Exported per-date sales summary filename
pub const DAILY_SALES_FILENAME: &str = "ventas_diarias.csv";

// =============================================================================
// Defaults
// =============================================================================

/// Default data directory
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default directory for generated reports
pub const DEFAULT_OUTPUT_DIR: &str = "./reportes";

/// Currency prefix used in rendered amounts (Peruvian sol)
pub const DEFAULT_CURRENCY: &str = "S/";

// =============================================================================
// Seed Catalogs
// Written on first run when the catalog documents do not exist yet.
// =============================================================================

/// The menu the register starts with.
pub const MENU_SEED: &[(&str, f64)] = &[
    ("Duo Marino", 15.0),
    ("Causa de Pescado", 10.0),
    ("Causa de Langostinos", 15.0),
    ("Causa acevichada", 18.0),
    ("Ceviche", 12.0),
    ("Ceviche Mixto", 15.0),
    ("Trio Marino", 20.0),
    ("Chicharon de Pescado", 15.0),
    ("Sudado de Pescado", 18.0),
];

/// Starter supplies price list, unit prices in soles.
pub const SUPPLIES_SEED: &[(&str, f64)] = &[
    ("Pescado fresco", 18.0),
    ("Langostinos", 25.0),
    ("Limón", 3.5),
    ("Cebolla roja", 2.5),
    ("Camote", 2.0),
    ("Ají limo", 4.0),
    ("Cancha serrana", 3.0),
    ("Culantro", 1.5),
    ("Gas", 55.0),
    ("Descartables", 12.0),
];
