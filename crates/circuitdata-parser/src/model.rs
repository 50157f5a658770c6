use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the join key every parsed table carries as its first column.
pub const TIMESTAMP_COLUMN: &str = "Date/time (UTC)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    #[default]
    Point,
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(&self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

impl fmt::Display for DecimalSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalSeparator::Point => f.write_str("point"),
            DecimalSeparator::Comma => f.write_str("comma"),
        }
    }
}

/// Which source columns make up the timestamp and how to read them.
///
/// Multiple columns (a date and a time field, say) are joined with a single
/// space before parsing. Without an explicit `format` a fixed set of common
/// layouts is tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampSpec {
    pub columns: Vec<String>,
    #[serde(default)]
    pub format: Option<String>,
}

impl TimestampSpec {
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            columns: vec![name.into()],
            format: None,
        }
    }

    pub fn combined<I, S>(columns: I, format: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            format: Some(format.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFormat {
    pub delimiter: u8,
    pub decimal: DecimalSeparator,
    pub timestamp: TimestampSpec,
}

impl TableFormat {
    /// Semicolon-delimited, point-decimal table keyed on a single column.
    pub fn semicolon(timestamp_column: impl Into<String>) -> Self {
        Self {
            delimiter: b';',
            decimal: DecimalSeparator::Point,
            timestamp: TimestampSpec::column(timestamp_column),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_decimal(mut self, decimal: DecimalSeparator) -> Self {
        self.decimal = decimal;
        self
    }

    pub fn with_timestamp(mut self, timestamp: TimestampSpec) -> Self {
        self.timestamp = timestamp;
        self
    }
}
