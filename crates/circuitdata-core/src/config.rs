use std::fs;
use std::path::Path;

use chrono::Duration;
use circuitdata_parser::{DecimalSeparator, TableFormat, TimestampSpec, TIMESTAMP_COLUMN};
use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};

/// File names, column names and formats the loaders read.
///
/// Every field has a default matching the measurement exports, so an empty
/// TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub delimiter: char,
    pub resample_minutes: i64,
    pub circuit: CircuitSources,
    pub power: PowerSource,
    pub temperature: TemperatureSources,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            resample_minutes: 60,
            circuit: CircuitSources::default(),
            power: PowerSource::default(),
            temperature: TemperatureSources::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitSources {
    pub timestamp_column: String,
    pub propagation_file: String,
    pub propagation_column: String,
    pub sensitivity_file: String,
    pub sensitivity_column: String,
    pub pd_file: String,
    pub pd_charge_column: String,
    pub pd_location_column: String,
}

impl Default for CircuitSources {
    fn default() -> Self {
        Self {
            timestamp_column: TIMESTAMP_COLUMN.to_string(),
            propagation_file: "Propagation.csv".to_string(),
            propagation_column: "Propagation time (ns)".to_string(),
            sensitivity_file: "Sensitivity.csv".to_string(),
            sensitivity_column: "PD Detection Sensitivity (pC)".to_string(),
            pd_file: "PD.csv".to_string(),
            pd_charge_column: "Charge (picocoulomb)".to_string(),
            pd_location_column: "Location in meters (m)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSource {
    pub file: String,
    pub date_column: String,
    pub time_column: String,
    pub timestamp_format: String,
    pub decimal: DecimalSeparator,
    /// Columns whose name contains this (case-insensitive) are dropped.
    pub drop_marker: String,
}

impl Default for PowerSource {
    fn default() -> Self {
        Self {
            file: "Power.csv".to_string(),
            date_column: " Datum".to_string(),
            time_column: "Tijd".to_string(),
            timestamp_format: "%Y/%m/%d %H:%M".to_string(),
            decimal: DecimalSeparator::Comma,
            drop_marker: "unnamed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSources {
    pub ambient_file: String,
    pub soil_file: String,
    pub time_column: String,
}

impl Default for TemperatureSources {
    fn default() -> Self {
        Self {
            ambient_file: "Temperature.csv".to_string(),
            soil_file: "SoilTemperature.csv".to_string(),
            time_column: "time".to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LoaderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.resample_minutes <= 0 {
            return Err(LoaderError::Config(format!(
                "resample_minutes must be positive, got {}",
                self.resample_minutes
            )));
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                LoaderError::Config(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ))
            })
    }

    pub fn resample_every(&self) -> Duration {
        Duration::minutes(self.resample_minutes)
    }

    pub(crate) fn table_format(
        &self,
        timestamp: TimestampSpec,
        decimal: DecimalSeparator,
    ) -> Result<TableFormat> {
        Ok(TableFormat {
            delimiter: self.delimiter_byte()?,
            decimal,
            timestamp,
        })
    }
}
