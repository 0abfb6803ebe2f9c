//! I/O module
//!
//! Handles the tenant interchange format.
//!
//! # Components
//!
//! - `csv_format` - Interchange format handling (row conversion, output serialization)
//! - `csv_reader` - Lenient reader yielding one tagged outcome per row

pub mod csv_format;
pub mod csv_reader;

pub use csv_format::{convert_csv_record, write_tenants_csv, CsvTenantRecord, RowRejection};
pub use csv_reader::{open_input, read_tenants_csv, ImportSummary, RowOutcome, TenantCsvReader};
