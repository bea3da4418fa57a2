//! Small text helpers shared by the statement parsers: amounts, dates, whitespace.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Column indent (in leading whitespace chars) from which an amount is read as a credit.
pub const INCOME_INDENT: usize = 6;

/// Parse "1,234.56" style amounts (`,` thousands, `.` decimals).
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let raw = s.trim().replace(',', "");
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(&raw).ok()
}

/// Reorder "DD/MM/YYYY" into "YYYY-MM-DD" without calendar validation.
///
/// Anything not made of three `/`-separated fields is returned unchanged.
pub fn reorder_date(s: &str) -> String {
    let parts: Vec<_> = s.trim().split('/').collect();
    match parts.as_slice() {
        [d, m, y] => format!("{y}-{m}-{d}"),
        _ => s.trim().to_string(),
    }
}

/// Number of whitespace characters before the first visible one.
pub fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Collapse runs of whitespace to one space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
