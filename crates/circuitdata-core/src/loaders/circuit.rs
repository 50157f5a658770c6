use std::fmt::Display;
use std::path::Path;

use circuitdata_parser::{read_table, DecimalSeparator, TimestampSpec};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use crate::frame::{ensure_timestamp_key, left_join_on_timestamp, rename_column, resample_sum};

const PROPAGATION_LABEL: &str = "Propagation time (ns)";
const SENSITIVITY_LABEL: &str = "PD Detection Sensitivity (pC)";
const CHARGE_LABEL: &str = "Total charge (pC)";

struct CircuitFrames {
    propagation: DataFrame,
    sensitivity: DataFrame,
    charge: DataFrame,
}

/// Adds propagation, sensitivity and hourly PD charge columns for every
/// circuit in `circuit_ids`, using the default source layout.
pub fn load_circuit_data<I: Display>(
    circuit_ids: &[I],
    base: &DataFrame,
    root_path: &Path,
) -> Result<DataFrame> {
    load_circuit_data_with(&LoaderConfig::default(), circuit_ids, base, root_path)
}

/// Reads `{root}/{circuit}/` for each circuit in order and left-joins the
/// three series onto the accumulating base. Value columns are suffixed with
/// the circuit identifier. Any unreadable circuit fails the whole call.
pub fn load_circuit_data_with<I: Display>(
    config: &LoaderConfig,
    circuit_ids: &[I],
    base: &DataFrame,
    root_path: &Path,
) -> Result<DataFrame> {
    config.validate()?;
    ensure_timestamp_key(base, "base")?;
    info!(
        circuits = circuit_ids.len(),
        root = %root_path.display(),
        "Loading circuit data"
    );

    let mut df = base.clone();
    for circuit_id in circuit_ids {
        let circuit = circuit_id.to_string();
        let frames = read_circuit(config, &circuit, root_path)?;

        df = left_join_on_timestamp(&df, &frames.propagation)?;
        df = left_join_on_timestamp(&df, &frames.sensitivity)?;
        df = left_join_on_timestamp(&df, &frames.charge)?;
        debug!(circuit = %circuit, columns = df.width(), "Joined circuit series");
    }

    info!(rows = df.height(), columns = df.width(), "Loaded circuit data");
    Ok(df)
}

fn read_circuit(config: &LoaderConfig, circuit: &str, root_path: &Path) -> Result<CircuitFrames> {
    let sources = &config.circuit;
    let dir = root_path.join(circuit);
    if !dir.is_dir() {
        return Err(LoaderError::MissingDirectory(dir));
    }

    let format = config.table_format(
        TimestampSpec::column(sources.timestamp_column.as_str()),
        DecimalSeparator::Point,
    )?;

    let propagation = read_table(&dir.join(&sources.propagation_file), &format)?;
    let propagation = rename_column(
        &propagation,
        &sources.propagation_column,
        &format!("{PROPAGATION_LABEL} {circuit}"),
    )?;

    let sensitivity = read_table(&dir.join(&sources.sensitivity_file), &format)?;
    let sensitivity = rename_column(
        &sensitivity,
        &sources.sensitivity_column,
        &format!("{SENSITIVITY_LABEL} {circuit}"),
    )?;

    let events = read_table(&dir.join(&sources.pd_file), &format)?;
    let events = events.drop(&sources.pd_location_column)?;
    let events = rename_column(
        &events,
        &sources.pd_charge_column,
        &format!("{CHARGE_LABEL} {circuit}"),
    )?;
    let charge = resample_sum(&events, config.resample_every())?;
    debug!(
        circuit,
        events = events.height(),
        bins = charge.height(),
        "Resampled PD charge"
    );

    Ok(CircuitFrames {
        propagation,
        sensitivity,
        charge,
    })
}
