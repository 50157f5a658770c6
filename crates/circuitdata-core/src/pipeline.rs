use std::fmt::Display;
use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loaders::{load_circuit_data_with, load_temp_data_with, load_wop_data_with};

/// Runs the circuit, power and temperature loaders in that order, each one
/// feeding the next. The first failure aborts the run.
pub fn load_all<I: Display>(
    config: &LoaderConfig,
    circuit_ids: &[I],
    base: &DataFrame,
    root_path: &Path,
) -> Result<DataFrame> {
    let df = load_circuit_data_with(config, circuit_ids, base, root_path)?;
    let df = load_wop_data_with(config, &df, root_path)?;
    let df = load_temp_data_with(config, &df, root_path)?;

    info!(
        circuits = circuit_ids.len(),
        rows = df.height(),
        columns = df.width(),
        "Assembled measurement table"
    );
    Ok(df)
}
