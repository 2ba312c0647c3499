//! Validation of user-supplied conversion inputs.

use crate::core::rates::CurrencySet;
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;

/// Parses a non-negative, finite amount. Blank input yields `default`.
pub fn parse_amount(input: &str, default: f64) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    let amount: f64 = input
        .parse()
        .map_err(|_| anyhow!("Invalid amount: {}", input))?;
    validate_amount(amount)
}

pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("Amount must be a number greater than or equal to 0, got {}", amount);
    }
    Ok(amount)
}

/// Normalizes a code to upper case and checks it is supported.
pub fn parse_currency(input: &str, currencies: &CurrencySet) -> Result<String> {
    let code = input.trim().to_uppercase();
    if !currencies.contains(&code) {
        bail!("Unsupported currency: {}", code);
    }
    Ok(code)
}

pub fn validate_date(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    if date > today {
        bail!("Selected date is in the future. Please choose a valid past date.");
    }
    Ok(date)
}

/// Parses an optional `YYYY-MM-DD` date. Blank input means "latest".
pub fn parse_date(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date: {} (expected YYYY-MM-DD)", input))?;
    validate_date(date, today).map(Some)
}
