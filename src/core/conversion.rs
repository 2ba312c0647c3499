//! Rate rounding, conversion and the human-readable summary.

use chrono::NaiveDate;
use std::fmt;

/// Rounds half to even. Values too large to scale are already exact at
/// `digits` and come back unchanged.
fn round_to(x: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    let scaled = x * factor;
    if !scaled.is_finite() {
        return x;
    }
    scaled.round_ties_even() / factor
}

/// Rounds to 4 decimal digits.
pub fn round4(x: f64) -> f64 {
    round_to(x, 4)
}

/// Inverse rate rounded to 4 digits; a zero rate inverts to exactly 0.
pub fn invert(rate: f64) -> f64 {
    if rate != 0.0 { round4(1.0 / rate) } else { 0.0 }
}

/// Converted amount rounded to 2 digits.
pub fn convert(rate: f64, amount: f64) -> f64 {
    round_to(rate * amount, 2)
}

/// Plain decimal rendering that keeps a trailing `.0` on whole numbers,
/// so `9.0` stays `9.0` rather than `9`.
pub fn display_number(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub date: NaiveDate,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
    pub amount: f64,
    pub converted_amount: f64,
    pub inverse_rate: f64,
}

impl ConversionResult {
    pub fn new(date: NaiveDate, from: &str, to: &str, rate: f64, amount: f64) -> Self {
        Self {
            date,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            amount,
            converted_amount: convert(rate, amount),
            inverse_rate: invert(rate),
        }
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The conversion rate on {} from {} to {} was {}. \
             So {} in {} correspond to {} in {}. \
             The inverse rate was {}.",
            self.date,
            self.from_currency,
            self.to_currency,
            display_number(self.rate),
            display_number(self.amount),
            self.from_currency,
            display_number(self.converted_amount),
            self.to_currency,
            display_number(self.inverse_rate),
        )
    }
}

/// Renders the conversion summary for the given inputs.
pub fn format_conversion(date: NaiveDate, from: &str, to: &str, rate: f64, amount: f64) -> String {
    ConversionResult::new(date, from, to, rate, amount).to_string()
}
