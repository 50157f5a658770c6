use polars::prelude::*;

use crate::errors::ParserError;
use crate::model::{DecimalSeparator, TIMESTAMP_COLUMN};

use super::{is_missing_marker, parse_optional_f64};

/// Cells of one value column, kept as text until the column type is known.
#[derive(Debug, Clone)]
pub(crate) struct RawColumn {
    pub name: String,
    pub cells: Vec<String>,
}

impl RawColumn {
    pub fn new(name: String) -> Self {
        Self {
            name,
            cells: Vec::new(),
        }
    }

    fn into_column(self, decimal: DecimalSeparator) -> Column {
        let numeric: Result<Vec<Option<f64>>, _> = self
            .cells
            .iter()
            .map(|cell| parse_optional_f64(cell, decimal))
            .collect();

        match numeric {
            Ok(values) => Series::new(self.name.as_str().into(), values).into(),
            Err(_) => {
                let utf8: Vec<Option<&str>> = self
                    .cells
                    .iter()
                    .map(|cell| Some(cell.trim()).filter(|v| !is_missing_marker(v)))
                    .collect();
                Series::new(self.name.as_str().into(), utf8).into()
            }
        }
    }
}

pub(crate) fn build_table(
    source_name: &str,
    timestamps: Vec<i64>,
    columns: Vec<RawColumn>,
    decimal: DecimalSeparator,
) -> Result<DataFrame, ParserError> {
    let polars_err = |source: PolarsError| ParserError::Polars {
        source_name: source_name.to_string(),
        source,
    };

    if let Some(column) = columns.iter().find(|c| c.cells.len() != timestamps.len()) {
        return Err(ParserError::Validation {
            source_name: source_name.to_string(),
            message: format!(
                "column '{}' had {} rows but the timestamp column had {}",
                column.name,
                column.cells.len(),
                timestamps.len()
            ),
        });
    }

    let ts_series = Series::new(TIMESTAMP_COLUMN.into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .map_err(polars_err)?;

    let mut cols: Vec<Column> = Vec::with_capacity(columns.len() + 1);
    cols.push(ts_series.into());
    cols.extend(columns.into_iter().map(|column| column.into_column(decimal)));

    DataFrame::new(cols).map_err(polars_err)
}
