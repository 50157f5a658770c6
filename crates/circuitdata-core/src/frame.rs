//! Table operations shared by the loaders: hourly binning, the keyed left
//! join, and small column edits. Every function returns a new frame.

use chrono::{Duration, NaiveDateTime};
use circuitdata_parser::TIMESTAMP_COLUMN;
use polars::prelude::*;

use crate::error::{LoaderError, Result};

const ROW_ORDER_COLUMN: &str = "__base_row_order";

fn key_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Microseconds, None)
}

fn step_micros(step: Duration) -> Result<i64> {
    step.num_microseconds()
        .filter(|micros| *micros > 0)
        .ok_or_else(|| LoaderError::Validation(format!("step must be positive, got {step}")))
}

/// Builds a base table with one `Date/time (UTC)` row per `step`, from
/// `start` inclusive to `end` exclusive.
pub fn time_axis(start: NaiveDateTime, end: NaiveDateTime, step: Duration) -> Result<DataFrame> {
    let step = step_micros(step)?;
    if end < start {
        return Err(LoaderError::Validation(format!(
            "time axis end {end} is before start {start}"
        )));
    }

    let start = start.and_utc().timestamp_micros();
    let end = end.and_utc().timestamp_micros();
    let mut timestamps = Vec::new();
    let mut current = start;
    while current < end {
        timestamps.push(current);
        current += step;
    }

    let series = Series::new(TIMESTAMP_COLUMN.into(), timestamps).cast(&key_dtype())?;
    Ok(DataFrame::new(vec![series.into()])?)
}

pub(crate) fn ensure_timestamp_key(df: &DataFrame, role: &str) -> Result<()> {
    if df.column(TIMESTAMP_COLUMN).is_err() {
        return Err(LoaderError::Validation(format!(
            "{role} table has no '{TIMESTAMP_COLUMN}' column"
        )));
    }
    Ok(())
}

fn is_summable(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Sums every value column into consecutive `every`-wide bins keyed on the
/// bin start. Bins are anchored at the Unix epoch, so hourly bins start on
/// the hour.
///
/// Only bins holding at least one row are emitted. Empty bins stay absent so
/// that a later left join reports them as missing, not as zero.
pub fn resample_sum(df: &DataFrame, every: Duration) -> Result<DataFrame> {
    let every = step_micros(every)?;
    ensure_timestamp_key(df, "resampled")?;

    let mut value_columns = Vec::new();
    for column in df.get_columns() {
        let name = column.name().as_str();
        if name == TIMESTAMP_COLUMN {
            continue;
        }
        if !is_summable(column.dtype()) {
            return Err(LoaderError::Validation(format!(
                "column '{name}' has non-numeric type {} and cannot be summed",
                column.dtype()
            )));
        }
        value_columns.push(name.to_string());
    }

    let ts_column = df.column(TIMESTAMP_COLUMN)?.cast(&key_dtype())?;
    let ts = ts_column.datetime()?;
    let buckets: Vec<Option<i64>> = (0..df.height())
        .map(|idx| ts.get(idx).map(|micros| micros - micros.rem_euclid(every)))
        .collect();
    let buckets = Series::new(TIMESTAMP_COLUMN.into(), buckets).cast(&key_dtype())?;

    let mut binned = df.clone();
    binned.with_column(buckets)?;

    let aggregations: Vec<Expr> = value_columns
        .iter()
        .map(|name| col(name.as_str()).sum())
        .collect();

    let resampled = binned
        .lazy()
        .group_by([col(TIMESTAMP_COLUMN)])
        .agg(aggregations)
        .sort([TIMESTAMP_COLUMN], SortMultipleOptions::default())
        .collect()?;

    Ok(resampled)
}

/// Joins `other` onto `base` by timestamp, keeping every base row in base
/// order. Base rows without a match get nulls in `other`'s columns.
pub fn left_join_on_timestamp(base: &DataFrame, other: &DataFrame) -> Result<DataFrame> {
    ensure_timestamp_key(base, "base")?;
    ensure_timestamp_key(other, "joined")?;

    let right = other
        .clone()
        .lazy()
        .with_column(col(TIMESTAMP_COLUMN).cast(key_dtype()));

    let joined = base
        .clone()
        .lazy()
        .with_row_index(ROW_ORDER_COLUMN, None)
        .with_column(col(TIMESTAMP_COLUMN).cast(key_dtype()))
        .join(
            right,
            [col(TIMESTAMP_COLUMN)],
            [col(TIMESTAMP_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .sort([ROW_ORDER_COLUMN], SortMultipleOptions::default())
        .collect()?;

    Ok(joined.drop(ROW_ORDER_COLUMN)?)
}

pub fn rename_column(df: &DataFrame, from: &str, to: &str) -> Result<DataFrame> {
    let mut renamed = df.clone();
    renamed.rename(from, to.into())?;
    Ok(renamed)
}

/// Drops every column whose name contains `needle`, ignoring case. The
/// timestamp key is never dropped. Returns the frame and the dropped names.
pub fn drop_columns_matching(df: &DataFrame, needle: &str) -> Result<(DataFrame, Vec<String>)> {
    let needle = needle.to_lowercase();
    let mut kept = Vec::with_capacity(df.width());
    let mut dropped = Vec::new();

    for column in df.get_columns() {
        let name = column.name().as_str();
        if name != TIMESTAMP_COLUMN && name.to_lowercase().contains(&needle) {
            dropped.push(name.to_string());
        } else {
            kept.push(column.clone());
        }
    }

    Ok((DataFrame::new(kept)?, dropped))
}
