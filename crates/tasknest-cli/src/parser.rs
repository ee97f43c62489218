use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};

/// Parses a due date given as `YYYY-MM-DD` or in plain English
/// ("tomorrow", "next friday", "in 3 days").
pub fn parse_due_date(date_str: &str) -> Result<NaiveDate> {
    let trimmed = date_str.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(trimmed, Local::now(), Dialect::Us)
        .map(|datetime| datetime.date_naive())
        .map_err(|e| anyhow!("Failed to parse due date '{}': {}", date_str, e))
}
