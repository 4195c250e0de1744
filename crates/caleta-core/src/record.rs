//! Tabular record schema and timestamp conventions.
//!
//! Every ledger file is one header row plus one row per record, with a
//! fixed column order. A record type describes that schema as data
//! (`HEADERS`) and owns the mapping between a defensively padded row and
//! itself (`from_row`), so older files with fewer columns migrate through
//! one well-defined function instead of ad hoc padding at call sites.
//!
//! Timestamps are stored as `YYYY-MM-DD HH:MM:SS` strings. Keeping the
//! format fixed makes the newest-first lexicographic sort chronological,
//! so loaders normalize recognizable variants into it.

use chrono::{NaiveDate, NaiveDateTime};

/// Stored timestamp format, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date portion of the stored timestamp format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A record that lives in a fixed-schema tabular ledger file.
pub trait TabularRecord: Clone {
    /// Header row written at the top of the ledger file. The row width of
    /// the current schema is `HEADERS.len()`.
    const HEADERS: &'static [&'static str];

    /// Singular label used in diagnostics ("order", "expense").
    const KIND: &'static str;

    fn id(&self) -> i64;

    fn assign_id(&mut self, id: i64);

    fn timestamp(&self) -> &str;

    fn set_timestamp(&mut self, timestamp: String);

    /// Map one padded data row onto a record.
    ///
    /// `row` always has `HEADERS.len()` cells; absent or empty cells are
    /// `None`. Returns the reason the row must be discarded on failure.
    fn from_row(row: &[Option<String>]) -> Result<Self, String>;

    /// Serialize the record back into one data row, same column order as
    /// `HEADERS`.
    fn to_row(&self) -> Vec<String>;
}

/// Format a date+time into the stored timestamp representation.
pub fn format_timestamp(moment: NaiveDateTime) -> String {
    moment.format(TIMESTAMP_FORMAT).to_string()
}

/// The `YYYY-MM-DD` prefix of a stored timestamp.
pub fn date_portion(timestamp: &str) -> &str {
    match timestamp.split_once(' ') {
        Some((date, _)) => date,
        None => timestamp,
    }
}

/// Replace the date component of a stored timestamp, preserving the
/// original time-of-day fragment. A timestamp with no time fragment gets
/// midnight so the stored format stays uniform.
pub fn with_date(timestamp: &str, date: NaiveDate) -> String {
    let time = match timestamp.split_once(' ') {
        Some((_, fragment)) if !fragment.trim().is_empty() => fragment.trim(),
        _ => "00:00:00",
    };
    format!("{} {}", date.format(DATE_FORMAT), time)
}

/// Bring a raw timestamp cell into the stored format where recognizable.
///
/// Full timestamps are reformatted, bare dates gain a midnight time, and
/// anything else is kept verbatim rather than discarding the row.
pub fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(moment) = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
        return format_timestamp(moment);
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return format_timestamp(moment);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return format!("{} 00:00:00", date.format(DATE_FORMAT));
    }
    trimmed.to_string()
}

/// Hour-of-day (0-23) of a stored timestamp, when it parses.
pub fn hour_portion(timestamp: &str) -> Option<u32> {
    use chrono::Timelike;
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|moment| moment.hour())
}
