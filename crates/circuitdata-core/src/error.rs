// crates/circuitdata-core/src/error.rs

use std::path::PathBuf;

use circuitdata_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Source parsing failed: {0}")]
    Parser(#[from] ParserError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Invalid loader configuration: {0}")]
    Config(String),

    #[error("Loader configuration could not be parsed: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
