use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::errors::ParserError;
use crate::formats::{build_table, normalise_headers, parse_timestamp, RawColumn};
use crate::model::TableFormat;

/// Reads a delimited file from disk and parses it with [`parse_table`].
///
/// The file name is used as the source name in errors. Bytes that are not
/// valid UTF-8 are replaced rather than rejected; spreadsheet exports are not
/// always clean.
pub fn read_table(path: &Path, format: &TableFormat) -> Result<DataFrame, ParserError> {
    let bytes = fs::read(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let df = parse_table(&content, &source_name, format)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Parsed table"
    );
    Ok(df)
}

/// Parses delimited text into a frame whose first column is the
/// `Date/time (UTC)` key built from `format.timestamp`.
pub fn parse_table(
    content: &str,
    source_name: &str,
    format: &TableFormat,
) -> Result<DataFrame, ParserError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let csv_err = |source: csv::Error| ParserError::Csv {
        source_name: source_name.to_string(),
        source,
    };

    if format.timestamp.columns.is_empty() {
        return Err(ParserError::Validation {
            source_name: source_name.to_string(),
            message: "no timestamp columns configured".to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let header = reader.headers().map_err(csv_err)?.clone();
    let headers = normalise_headers(&header);

    let mut ts_indices = Vec::with_capacity(format.timestamp.columns.len());
    for column in &format.timestamp.columns {
        let idx = headers
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| ParserError::MissingColumn {
                source_name: source_name.to_string(),
                column: column.clone(),
            })?;
        ts_indices.push(idx);
    }

    let value_indices: Vec<usize> = (0..headers.len())
        .filter(|idx| !ts_indices.contains(idx))
        .collect();
    let mut columns: Vec<RawColumn> = value_indices
        .iter()
        .map(|idx| RawColumn::new(headers[*idx].clone()))
        .collect();

    let timestamp_format = format.timestamp.format.as_deref();
    let mut timestamps = Vec::new();
    let mut joined = String::new();

    for (line_index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;

        joined.clear();
        for (n, idx) in ts_indices.iter().enumerate() {
            if n > 0 {
                joined.push(' ');
            }
            joined.push_str(record.get(*idx).unwrap_or_default().trim());
        }
        timestamps.push(parse_timestamp(
            source_name,
            &joined,
            line_index,
            timestamp_format,
        )?);

        for (column, idx) in columns.iter_mut().zip(&value_indices) {
            column
                .cells
                .push(record.get(*idx).unwrap_or_default().to_string());
        }
    }

    build_table(source_name, timestamps, columns, format.decimal)
}
