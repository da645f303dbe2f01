use chrono::{DateTime, Datelike, NaiveDate};
use shared::domain::BillStatus;

use crate::error::FormatError;

/// `2004-04-04` (or an RFC 3339 timestamp) to `4 Apr. 04`.
pub fn format_date(raw: &str) -> Result<String, FormatError> {
    let date = parse_date(raw)?;
    Ok(format!(
        "{} {}. {}",
        date.day(),
        date.format("%b"),
        date.format("%y")
    ))
}

fn parse_date(raw: &str) -> Result<NaiveDate, FormatError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|source| FormatError::InvalidDate {
            raw: raw.to_string(),
            source,
        })
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "Pending",
        BillStatus::Accepted => "Accepted",
        BillStatus::Refused => "Refused",
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount} €")
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
