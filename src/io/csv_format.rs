//! CSV format handling for the tenant interchange file
//!
//! This module centralizes all interchange format concerns, providing:
//! - CsvTenantRecord structure holding one row's raw fields
//! - Conversion from raw rows to tenant records
//! - Tenant mapping serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Format
//!
//! ```text
//! Name,Phone,Last Rent Date,Rent Due,Last Rent Increment Date,Payments
//! Alice,555-0100,2024-03-01,500,,250 (2024-03-12); 250 (2024-03-20)
//! ```
//!
//! Fields are separated by `,` with no quoting or escaping. Text containing
//! `,`, `;`, `(` or `)` cannot be represented and will not survive an export
//! followed by an import.

use crate::types::input::{parse_date, parse_optional_date};
use crate::types::{LedgerError, Payment, Tenant, TenantMap};
use csv::{QuoteStyle, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;

/// Interchange header row
pub const HEADERS: [&str; 6] = [
    "Name",
    "Phone",
    "Last Rent Date",
    "Rent Due",
    "Last Rent Increment Date",
    "Payments",
];

/// Calendar date format written on export
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between payment entries inside the Payments field
const PAYMENT_SEPARATOR: &str = "; ";

/// Raw fields of one interchange row
///
/// Missing trailing fields are read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTenantRecord {
    pub name: String,
    pub phone: String,
    pub last_rent_date: String,
    pub rent_due: String,
    pub last_rent_increment_date: String,
    pub payments: String,
}

impl CsvTenantRecord {
    /// Take the first six fields of a row by position
    pub fn from_record(record: &StringRecord) -> Self {
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        CsvTenantRecord {
            name: field(0),
            phone: field(1),
            last_rent_date: field(2),
            rent_due: field(3),
            last_rent_increment_date: field(4),
            payments: field(5),
        }
    }
}

/// Why a row did not produce a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// Name field empty; the row is dropped without complaint
    EmptyName,

    /// Some field could not be understood
    Malformed(String),
}

/// Convert a raw row into a named tenant
///
/// This function:
/// - Rejects rows with an empty name
/// - Parses both date fields, leaving blank ones absent
/// - Parses the rent due leniently (see [`parse_lenient_amount`]), clamping
///   negatives to zero
/// - Splits the Payments field into individual payments
pub fn convert_csv_record(record: CsvTenantRecord) -> Result<(String, Tenant), RowRejection> {
    if record.name.is_empty() {
        return Err(RowRejection::EmptyName);
    }

    let last_rent_date = parse_optional_date("Last Rent Date", &record.last_rent_date)
        .map_err(|e| RowRejection::Malformed(e.to_string()))?;
    let last_rent_increment_date =
        parse_optional_date("Last Rent Increment Date", &record.last_rent_increment_date)
            .map_err(|e| RowRejection::Malformed(e.to_string()))?;
    let rent_due = parse_lenient_amount(&record.rent_due);
    let payments = parse_payments(&record.payments).map_err(RowRejection::Malformed)?;

    let tenant = Tenant::from_parts(
        record.phone,
        last_rent_date,
        rent_due,
        last_rent_increment_date,
        payments,
    );
    Ok((record.name, tenant))
}

/// Read an amount the way a spreadsheet export is read
///
/// Accepts plain and scientific notation (`1e3`). Otherwise the longest
/// leading number is used (`500abc` reads as 500), and text with no leading
/// number reads as zero.
pub fn parse_lenient_amount(raw: &str) -> Decimal {
    let raw = raw.trim();
    if let Ok(amount) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return amount;
    }

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in raw.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    Decimal::from_str(raw[..end].trim_end_matches('.')).unwrap_or(Decimal::ZERO)
}

/// Flatten a payment history into `amount (date); amount (date)`
pub fn format_payments(payments: &[Payment]) -> String {
    payments
        .iter()
        .map(|p| {
            format!(
                "{} ({})",
                p.amount.normalize(),
                p.date_paid.format(EXPORT_DATE_FORMAT)
            )
        })
        .collect::<Vec<_>>()
        .join(PAYMENT_SEPARATOR)
}

/// Split a Payments field back into payments
///
/// Each entry is split on `" ("` and the trailing `)` removed. Blank entries
/// are ignored.
pub fn parse_payments(raw: &str) -> Result<Vec<Payment>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (amount, date) = entry
                .split_once(" (")
                .ok_or_else(|| format!("payment entry '{}' has no date", entry))?;
            let date = date.strip_suffix(')').unwrap_or(date);

            let amount = Decimal::from_str(amount.trim())
                .map_err(|_| format!("payment amount '{}' is not a number", amount))?;
            let date_paid = parse_date("payment date", date).map_err(|e| e.to_string())?;
            Ok(Payment { amount, date_paid })
        })
        .collect()
}

/// Write the tenant mapping in interchange format
///
/// Writes the header row followed by one row per tenant in mapping order.
/// Nothing is quoted, so embedded delimiters corrupt the row.
///
/// # Errors
///
/// Returns [`LedgerError::Io`] if the output cannot be written.
pub fn write_tenants_csv(tenants: &TenantMap, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    writer.write_record(HEADERS)?;

    for (name, tenant) in tenants {
        let format_date = |date: Option<chrono::NaiveDate>| {
            date.map(|d| d.format(EXPORT_DATE_FORMAT).to_string())
                .unwrap_or_default()
        };

        writer.write_record([
            name.clone(),
            tenant.phone.clone(),
            format_date(tenant.last_rent_date),
            tenant.rent_due().normalize().to_string(),
            format_date(tenant.last_rent_increment_date),
            format_payments(tenant.payments()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
