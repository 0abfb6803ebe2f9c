//! Parsing of raw primitive inputs
//!
//! The presentation layer hands the ledger plain strings. These helpers turn
//! them into typed values or a [`LedgerError::Validation`] naming the field.

use super::error::LedgerError;
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Calendar date formats accepted on input, tried in order
///
/// ISO first, then the US month/day/year form older exports were written in.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a required, non-empty text field (name, phone)
pub fn parse_required_text(field: &str, raw: &str) -> Result<String, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Parse a monetary amount
///
/// Rejects empty input, non-numeric text and negative values.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(field, "amount is required"));
    }

    let amount = Decimal::from_str(trimmed)
        .map_err(|_| LedgerError::validation(field, format!("'{}' is not a number", raw)))?;
    validate_amount(field, amount)
}

/// Check an already-typed amount is usable as a payment or increment
pub fn validate_amount(field: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::validation(
            field,
            format!("{} must not be negative", amount),
        ));
    }
    Ok(amount)
}

/// Parse a calendar date
///
/// Accepts `YYYY-MM-DD`, `M/D/YYYY` and RFC 3339 timestamps (the time part is
/// dropped).
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(field, "date is required"));
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
        .ok_or_else(|| LedgerError::validation(field, format!("'{}' is not a valid date", raw)))
}

/// Parse a date that may legitimately be left blank
pub fn parse_optional_date(field: &str, raw: &str) -> Result<Option<NaiveDate>, LedgerError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(field, raw).map(Some)
}
