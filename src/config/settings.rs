//! User settings for the family ledger
//!
//! Manages display preferences and the UTC offset used to decide which
//! calendar month an instant belongs to.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::Money;
use crate::storage::file_io::{read_optional, write_atomic};

const MAX_OFFSET_MINUTES: i32 = 18 * 60;
const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// User settings for the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Fixed UTC offset in minutes for month boundaries and plain dates.
    /// When unset, the machine's current local offset is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "S/".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn is_valid_date_format(fmt: &str) -> bool {
    StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            utc_offset_minutes: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let Some(contents) = read_optional(paths.settings_file())? else {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        };

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            LedgerError::Config(format!("Failed to parse settings file: {}", e))
        })?;
        settings.offset()?;
        if !is_valid_date_format(&settings.date_format) {
            return Err(LedgerError::Config(format!(
                "Invalid date format: '{}'",
                settings.date_format
            )));
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LedgerError::Config(format!("Failed to serialize settings: {}", e))
        })?;
        write_atomic(paths.settings_file(), &contents)
    }

    /// The UTC offset to use for this session
    pub fn offset(&self) -> Result<FixedOffset, LedgerError> {
        let Some(minutes) = self.utc_offset_minutes else {
            return Ok(Local::now().offset().fix());
        };
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(LedgerError::Config(format!(
                "Invalid UTC offset: {} minutes",
                minutes
            )));
        }
        FixedOffset::east_opt(minutes * 60)
            .ok_or_else(|| LedgerError::Config(format!("Invalid UTC offset: {} minutes", minutes)))
    }

    /// Format a date with the configured format, falling back to dd/mm/YYYY
    /// when the format string has an unknown specifier
    pub fn format_date(&self, date: DateTime<FixedOffset>) -> String {
        let fmt = if is_valid_date_format(&self.date_format) {
            self.date_format.as_str()
        } else {
            DEFAULT_DATE_FORMAT
        };
        date.format(fmt).to_string()
    }

    /// Format an amount with the configured symbol, e.g. "S/ 49.50"
    pub fn format_money(&self, amount: Money) -> String {
        if self.currency_symbol.is_empty() {
            amount.to_string()
        } else {
            amount.format_with_symbol(&format!("{} ", self.currency_symbol))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "S/");
        assert_eq!(settings.utc_offset_minutes, None);
        assert!(settings.offset().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());

        let settings = Settings {
            utc_offset_minutes: Some(-300),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.offset().unwrap().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());
        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_rejects_bad_offset() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"utc_offset_minutes": 5000}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_date_format() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_format_date_falls_back_on_bad_format() {
        let date = DateTime::parse_from_rfc3339("2024-03-10T12:00:00-05:00").unwrap();

        let settings = Settings {
            date_format: "%Y-%m-%d".into(),
            ..Settings::default()
        };
        assert_eq!(settings.format_date(date), "2024-03-10");

        let broken = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };
        assert_eq!(broken.format_date(date), "10/03/2024");
    }

    #[test]
    fn test_format_money() {
        let settings = Settings::default();
        assert_eq!(settings.format_money(Money::from_cents(4950)), "S/ 49.50");
        assert_eq!(settings.format_money(Money::from_cents(-1500)), "-S/ 15.00");
    }
}
