//! Ledger policy configuration
//!
//! Holds the constants of the rent policies. Values come from defaults, an
//! optional JSON file, and finally CLI flags or environment variables.

use super::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of days after the rent start before accrual begins
pub const DEFAULT_GRACE_PERIOD_DAYS: u32 = 10;

/// Default amount accrued per overdue day
pub const DEFAULT_DAILY_RATE: i64 = 100;

/// Policy constants for accrual and the pending report
///
/// Recognized JSON keys are `gracePeriodDays` and `dailyRate`; missing keys
/// keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Days after the rent start before overdue accrual begins
    pub grace_period_days: u32,

    /// Amount owed per overdue day
    pub daily_rate: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
            daily_rate: Decimal::from(DEFAULT_DAILY_RATE),
        }
    }
}

impl LedgerConfig {
    /// Create a config with explicit values
    pub fn new(grace_period_days: u32, daily_rate: Decimal) -> Self {
        LedgerConfig {
            grace_period_days,
            daily_rate,
        }
    }

    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Config`] if the file cannot be read, is not valid
    /// JSON, or holds out-of-range values.
    pub fn from_json_file(path: &Path) -> Result<Self, LedgerError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            LedgerError::config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let config: LedgerConfig = serde_json::from_str(&raw).map_err(|e| {
            LedgerError::config(format!("failed to parse '{}': {}", path.display(), e))
        })?;
        config.validate()
    }

    /// Override individual values, as CLI flags do
    pub fn with_overrides(
        mut self,
        grace_period_days: Option<u32>,
        daily_rate: Option<Decimal>,
    ) -> Result<Self, LedgerError> {
        if let Some(days) = grace_period_days {
            self.grace_period_days = days;
        }
        if let Some(rate) = daily_rate {
            self.daily_rate = rate;
        }
        self.validate()
    }

    /// Reject values the policies cannot work with
    pub fn validate(self) -> Result<Self, LedgerError> {
        if self.daily_rate.is_sign_negative() && !self.daily_rate.is_zero() {
            return Err(LedgerError::config(format!(
                "dailyRate must not be negative, got {}",
                self.daily_rate
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.grace_period_days, 10);
        assert_eq!(config.daily_rate, Decimal::from(100));
    }

    #[test]
    fn test_from_json_file_partial_keys() {
        let file = write_config(r#"{"dailyRate": "50"}"#);
        let config = LedgerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grace_period_days, 10);
        assert_eq!(config.daily_rate, Decimal::from(50));
    }

    #[test]
    fn test_from_json_file_rejects_unknown_keys() {
        let file = write_config(r#"{"gracePeriod": 5}"#);
        let err = LedgerConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, LedgerError::Config { .. }));
    }

    #[test]
    fn test_from_json_file_missing_file() {
        let err = LedgerConfig::from_json_file(Path::new("does-not-exist.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_overrides_win() {
        let config = LedgerConfig::default()
            .with_overrides(Some(3), Some(Decimal::from(25)))
            .unwrap();
        assert_eq!(config, LedgerConfig::new(3, Decimal::from(25)));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = LedgerConfig::default().with_overrides(None, Some(Decimal::from(-1)));
        assert!(matches!(result, Err(LedgerError::Config { .. })));
    }
}
