//! Parsing of free-text form fields
//!
//! Storefront form fields arrive as strings. Empty or unreadable input is
//! treated as missing (`None`) and left for the validator to report.

use std::str::FromStr;

use rust_decimal::Decimal;

fn normalize(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "1,234.50" uses commas for thousands; "4,5" uses a decimal comma
    if trimmed.contains('.') {
        Some(trimmed.replace(',', ""))
    } else {
        Some(trimmed.replace(',', "."))
    }
}

/// Parse a numeric form field; empty, non-numeric and non-finite input is missing
pub fn parse_optional_number(input: &str) -> Option<f64> {
    normalize(input)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a whole-number field; fractional values are rejected unless the fraction is zero
pub fn parse_optional_int(input: &str) -> Option<u32> {
    let value = parse_optional_number(input)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Parse a price field; negative prices are treated as not priced
pub fn parse_optional_decimal(input: &str) -> Option<Decimal> {
    Decimal::from_str(&normalize(input)?)
        .ok()
        .filter(|price| !price.is_sign_negative())
}
