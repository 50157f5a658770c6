use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name} CSV error: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source_name} is missing column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name} data row {line_index} has invalid timestamp '{value}'")]
    InvalidTimestamp {
        source_name: String,
        line_index: usize,
        value: String,
    },

    #[error("{source_name} validation error: {message}")]
    Validation {
        source_name: String,
        message: String,
    },

    #[error("{source_name} dataframe construction failed: {source}")]
    Polars {
        source_name: String,
        #[source]
        source: PolarsError,
    },
}
