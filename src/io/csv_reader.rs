//! Lenient reader for the tenant interchange file
//!
//! Yields one tagged [`RowOutcome`] per data row instead of stopping at the
//! first bad row. Delegates field handling to the csv_format module.
//!
//! # Error Handling
//!
//! - I/O failures while reading are returned as `Err` and end the import
//! - Rows that cannot be understood become [`RowOutcome::Skipped`] with their
//!   line number; the rest of the file is still read
//!
//! ```no_run
//! use rent_ledger::io::csv_reader::{open_input, RowOutcome, TenantCsvReader};
//! use std::path::Path;
//!
//! let file = open_input(Path::new("tenants.csv")).unwrap();
//! for outcome in TenantCsvReader::new(file) {
//!     match outcome.unwrap() {
//!         RowOutcome::Record { name, .. } => println!("read {}", name),
//!         RowOutcome::Skipped { line, reason } => eprintln!("line {}: {:?}", line, reason),
//!     }
//! }
//! ```

use crate::io::csv_format::{convert_csv_record, CsvTenantRecord, RowRejection, HEADERS};
use crate::types::{LedgerError, Tenant, TenantMap};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Result of reading one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Row parsed into a tenant
    Record {
        line: u64,
        name: String,
        tenant: Tenant,
    },

    /// Row could not be used
    Skipped { line: u64, reason: RowRejection },
}

/// Counts reported after an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows that produced a tenant (a repeated name counts each time)
    pub imported: usize,

    /// Rows that were dropped
    pub skipped: usize,
}

/// Interchange reader over any byte source
pub struct TenantCsvReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
    checked_header: bool,
}

/// Open an interchange file for reading
///
/// # Errors
///
/// Returns [`LedgerError::Io`] naming the path if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<File, LedgerError> {
    File::open(path).map_err(|e| LedgerError::Io {
        message: format!("Failed to open file '{}': {}", path.display(), e),
    })
}

impl<R: Read> TenantCsvReader<R> {
    /// Wrap a byte source
    ///
    /// The first line is always treated as the header. Rows may have any
    /// number of fields and no quoting is recognized.
    pub fn new(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(source);

        TenantCsvReader {
            reader,
            record: StringRecord::new(),
            checked_header: false,
        }
    }

    /// Read the header line; only I/O failures are errors
    fn check_header(&mut self) -> Result<(), LedgerError> {
        self.checked_header = true;
        match self.reader.headers() {
            Ok(headers) if headers.is_empty() || headers.get(0) == Some(HEADERS[0]) => {}
            Ok(headers) => warn!(
                first_field = headers.get(0).unwrap_or_default(),
                "interchange header not recognized; first line skipped anyway"
            ),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => debug!(error = %e, "could not read interchange header"),
        }
        Ok(())
    }
}

impl<R: Read> Iterator for TenantCsvReader<R> {
    type Item = Result<RowOutcome, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.checked_header {
            if let Err(e) = self.check_header() {
                return Some(Err(e));
            }
        }

        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map_or(0, |pos| pos.line());
                let raw = CsvTenantRecord::from_record(&self.record);
                let outcome = match convert_csv_record(raw) {
                    Ok((name, tenant)) => RowOutcome::Record { line, name, tenant },
                    Err(reason) => RowOutcome::Skipped { line, reason },
                };
                Some(Ok(outcome))
            }
            Err(e) if e.is_io_error() => Some(Err(e.into())),
            Err(e) => {
                let line = e.position().map_or(0, |pos| pos.line());
                Some(Ok(RowOutcome::Skipped {
                    line,
                    reason: RowRejection::Malformed(e.to_string()),
                }))
            }
        }
    }
}

/// Read a whole interchange source into a fresh tenant mapping
///
/// Later rows replace earlier rows with the same name. Skipped rows are
/// logged and counted.
///
/// # Errors
///
/// Returns [`LedgerError::Io`] if the source fails mid-read; no partial
/// mapping is returned in that case.
pub fn read_tenants_csv<R: Read>(source: R) -> Result<(TenantMap, ImportSummary), LedgerError> {
    let mut tenants = TenantMap::new();
    let mut summary = ImportSummary::default();

    for outcome in TenantCsvReader::new(source) {
        match outcome? {
            RowOutcome::Record { line, name, tenant } => {
                if tenants.insert(name.clone(), tenant).is_some() {
                    debug!(line, name = %name, "duplicate tenant row replaces earlier row");
                }
                summary.imported += 1;
            }
            RowOutcome::Skipped {
                line,
                reason: RowRejection::EmptyName,
            } => {
                debug!(line, "skipping row without a name");
                summary.skipped += 1;
            }
            RowOutcome::Skipped {
                line,
                reason: RowRejection::Malformed(reason),
            } => {
                warn!(line, reason = %reason, "skipping malformed interchange row");
                summary.skipped += 1;
            }
        }
    }

    Ok((tenants, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::{self, Write};
    use tempfile::NamedTempFile;

    const HEADER: &str = "Name,Phone,Last Rent Date,Rent Due,Last Rent Increment Date,Payments\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reader_from_opened_file() {
        let content = format!("{}Alice,555,2024-03-01,0,,\n", HEADER);
        let file = create_temp_csv(&content);

        let outcomes: Vec<_> = TenantCsvReader::new(open_input(file.path()).unwrap())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(&outcomes[0], RowOutcome::Record { line: 2, name, .. } if name == "Alice"));
    }

    #[test]
    fn test_reader_missing_file() {
        let result = open_input(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(LedgerError::Io { message }) if message.contains("nonexistent.csv")));
    }

    #[test]
    fn test_reader_tags_each_row() {
        let content = format!(
            "{}Alice,555,2024-03-01,500,,\n,orphan,,,,\nBob,556,not-a-date,0,,\nCarol,557,,0,,\n",
            HEADER
        );
        let outcomes: Vec<_> = TenantCsvReader::new(content.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(outcomes.len(), 4);
        assert!(matches!(outcomes[0], RowOutcome::Record { line: 2, .. }));
        assert_eq!(
            outcomes[1],
            RowOutcome::Skipped {
                line: 3,
                reason: RowRejection::EmptyName
            }
        );
        assert!(matches!(outcomes[2], RowOutcome::Skipped { line: 4, .. }));
        assert!(matches!(outcomes[3], RowOutcome::Record { line: 5, .. }));
    }

    #[test]
    fn test_read_tenants_csv_summary() {
        let content = format!(
            "{}Alice,555,2024-03-01,500,,\nBob,556,bad,0,,\n\nAlice,999,,0,,\n",
            HEADER
        );
        let (tenants, summary) = read_tenants_csv(content.as_bytes()).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                skipped: 1
            }
        );
        assert_eq!(tenants.len(), 1);
        // later row wins
        assert_eq!(tenants["Alice"].phone, "999");
        assert_eq!(tenants["Alice"].rent_due(), Decimal::ZERO);
    }

    #[test]
    fn test_read_handles_crlf_and_no_trailing_newline() {
        let content = "Name,Phone,Last Rent Date,Rent Due,Last Rent Increment Date,Payments\r\n\
                       Alice,555,2024-03-01,500,,100 (2024-03-02)";
        let (tenants, _) = read_tenants_csv(content.as_bytes()).unwrap();
        let alice = &tenants["Alice"];
        assert_eq!(alice.last_rent_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(alice.payments().len(), 1);
    }

    #[test]
    fn test_read_quotes_are_literal() {
        let content = format!("{}\"Alice\",555,,0,,\n", HEADER);
        let (tenants, _) = read_tenants_csv(content.as_bytes()).unwrap();
        assert!(tenants.contains_key("\"Alice\""));
    }

    #[test]
    fn test_read_header_only() {
        let (tenants, summary) = read_tenants_csv(HEADER.as_bytes()).unwrap();
        assert!(tenants.is_empty());
        assert_eq!(summary, ImportSummary::default());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    /// Yields `prefix`, then fails every read
    struct FailsAfter {
        prefix: io::Cursor<Vec<u8>>,
    }

    impl Read for FailsAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.prefix.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "disk on fire")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_io_failure_aborts() {
        let result = read_tenants_csv(FailingReader);
        assert!(matches!(result, Err(LedgerError::Io { .. })));
    }

    #[test]
    fn test_header_io_failure_surfaces_from_iterator() {
        let mut reader = TenantCsvReader::new(FailingReader);
        assert!(matches!(reader.next(), Some(Err(LedgerError::Io { .. }))));
    }

    #[test]
    fn test_read_io_failure_after_rows_aborts() {
        let prefix = format!("{}Alice,555,2024-03-01,500,,\nBob,556", HEADER);
        let reader = FailsAfter {
            prefix: io::Cursor::new(prefix.into_bytes()),
        };
        let result = read_tenants_csv(reader);
        assert!(matches!(result, Err(LedgerError::Io { .. })));
    }
}
