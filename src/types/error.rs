//! Error types for the Rent Ledger
//!
//! This module defines all error types that can occur while operating on the
//! tenant ledger. Errors are designed to be descriptive and user-friendly for
//! CLI output.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Missing or malformed input (amounts, dates, names)
//! - **Lookup Errors**: An operation referenced a tenant that does not exist
//! - **Format Errors**: Stored or interchange data that cannot be understood
//! - **I/O and Configuration Errors**: Storage and config file failures
//! - **Arithmetic Errors**: Overflow in balance calculations

use thiserror::Error;

/// Main error type for the rent ledger
///
/// Every ledger operation reports failures through this enum. None of the
/// variants are fatal: a failed operation leaves the tenant store untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A required input is missing or malformed
    ///
    /// Raised before any state is touched, so the store remains unchanged.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending input field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// The operation referenced a tenant absent from the store
    #[error("Tenant not found: {name}")]
    TenantNotFound {
        /// Tenant name that was looked up
        name: String,
    },

    /// Persisted or interchange data could not be parsed
    ///
    /// Interchange import is lenient and skips malformed rows rather than
    /// raising this; it surfaces for corrupt store payloads and whole-file
    /// problems.
    #[error("Format error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Format {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Configuration could not be loaded or is out of range
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to keep the balance exact.
    #[error("Arithmetic overflow in {operation} for tenant {name}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Tenant whose balance was being computed
        name: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return LedgerError::Io {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());
        LedgerError::Format {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            return LedgerError::Io {
                message: error.to_string(),
            };
        }

        LedgerError::format(Some(error.line() as u64), error.to_string())
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a Validation error
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Create a TenantNotFound error
    pub fn tenant_not_found(name: &str) -> Self {
        LedgerError::TenantNotFound {
            name: name.to_string(),
        }
    }

    /// Create a Format error
    pub fn format(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::Format {
            line,
            message: message.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        LedgerError::Config {
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, name: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            name: name.to_string(),
        }
    }
}
