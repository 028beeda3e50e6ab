//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the importer
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{ImportError, ImportResult};

use super::types::{ImportConfig, PartialDayMapping};

/// Loads and provides access to the importer configuration.
///
/// # File layout
///
/// ```text
/// calendar:
///   default_name: "Employee Time Off"
///   product_id: "-//Employee Time Off Calendar//EN"
///   timezone: "America/Chicago"
///   category: "Time Off"
///   default_output: "timeoff_calendar.ics"
/// requests:
///   date_formats: ["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y"]
///   time_formats: ["%I:%M %p", "%H:%M:%S", "%H:%M", "%I:%M:%S %p"]
/// spans:
///   day_start: "00:00:00"
///   partial_day: fraction_of_day
/// ```
///
/// # Example
///
/// ```no_run
/// use timeoff_calendar::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/timeoff.yaml").unwrap();
/// println!("Calendar: {}", loader.config().calendar.default_name);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ImportConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML
    /// - A value is out of range (no date formats, a non-positive business day)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use timeoff_calendar::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/timeoff.yaml")?;
    /// # Ok::<(), timeoff_calendar::error::ImportError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ImportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|message| ImportError::ConfigParseError {
            path: path_str.clone(),
            message,
        })?;

        tracing::debug!(path = %path_str, "Loaded configuration");
        Ok(Self { config })
    }

    /// Loads the file at `path` if one is given, otherwise uses defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> ImportResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parses and checks configuration text.
    fn parse(content: &str) -> Result<ImportConfig, String> {
        let config: ImportConfig = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

        if config.requests.date_formats.is_empty() {
            return Err("requests.date_formats must list at least one format".to_string());
        }

        if let PartialDayMapping::BusinessHours { hours } = config.spans.partial_day
            && (hours <= Decimal::ZERO || hours > Decimal::new(24, 0))
        {
            return Err(format!(
                "spans.partial_day.business_hours.hours must be between 0 and 24, got {}",
                hours
            ));
        }

        Ok(config)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ImportConfig {
        self.config
    }
}
