use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use circuitdata_core::frame::time_axis;
use circuitdata_core::{load_circuit_data, LoaderError, TIMESTAMP_COLUMN};
use polars::prelude::*;
use tempfile::TempDir;

const PROPAGATION: &str = "Date/time (UTC);Propagation time (ns)\n\
    2021-03-01 10:00:00;512.5\n\
    2021-03-01 11:00:00;513.0\n\
    2021-03-01 12:00:00;511.5\n";

const SENSITIVITY: &str = "Date/time (UTC);PD Detection Sensitivity (pC)\n\
    2021-03-01 10:00:00;150\n\
    2021-03-01 11:00:00;175\n";

const PD: &str = "Date/time (UTC);Charge (picocoulomb);Location in meters (m)\n\
    2021-03-01 10:05:00;1;120.5\n\
    2021-03-01 10:40:00;2;340\n\
    2021-03-01 10:50:00;3;118\n\
    2021-03-01 12:30:00;5;900\n";

fn hour(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 3, 1)
        .and_then(|date| date.and_hms_opt(h, 0, 0))
        .expect("valid test hour")
}

fn base_table() -> Result<DataFrame> {
    Ok(time_axis(hour(10), hour(13), Duration::hours(1))?)
}

fn write_circuit(root: &Path, circuit: &str, pd: &str) -> Result<()> {
    let dir = root.join(circuit);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("Propagation.csv"), PROPAGATION)?;
    fs::write(dir.join("Sensitivity.csv"), SENSITIVITY)?;
    fs::write(dir.join("PD.csv"), pd)?;
    Ok(())
}

fn values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    Ok(df.column(column)?.f64()?.into_iter().collect())
}

#[test]
fn joins_three_series_per_circuit() -> Result<()> {
    let root = TempDir::new()?;
    write_circuit(root.path(), "7", PD)?;
    let base = base_table()?;

    let df = load_circuit_data(&[7], &base, root.path())?;

    assert_eq!(df.height(), base.height());
    assert_eq!(
        df.get_column_names(),
        &[
            TIMESTAMP_COLUMN,
            "Propagation time (ns) 7",
            "PD Detection Sensitivity (pC) 7",
            "Total charge (pC) 7",
        ]
    );
    assert_eq!(
        values(&df, "Propagation time (ns) 7")?,
        vec![Some(512.5), Some(513.0), Some(511.5)]
    );
    assert_eq!(
        values(&df, "PD Detection Sensitivity (pC) 7")?,
        vec![Some(150.0), Some(175.0), None]
    );
    Ok(())
}

#[test]
fn pd_charge_is_summed_per_hour_and_gaps_stay_missing() -> Result<()> {
    let root = TempDir::new()?;
    write_circuit(root.path(), "7", PD)?;

    let df = load_circuit_data(&["7"], &base_table()?, root.path())?;

    // 10:05 + 10:40 + 10:50 land in the 10:00 bin, nothing happened at 11:00
    assert_eq!(
        values(&df, "Total charge (pC) 7")?,
        vec![Some(6.0), None, Some(5.0)]
    );
    assert!(df.column("Location in meters (m)").is_err());
    Ok(())
}

#[test]
fn unavailable_charge_cells_are_skipped_in_hourly_sum() -> Result<()> {
    let root = TempDir::new()?;
    let pd = "Date/time (UTC);Charge (picocoulomb);Location in meters (m)\n\
        2021-03-01 10:05:00;1;1\n\
        2021-03-01 10:10:00;N/A;2\n\
        2021-03-01 12:20:00;#N/A;3\n";
    write_circuit(root.path(), "7", pd)?;

    let df = load_circuit_data(&[7], &base_table()?, root.path())?;

    // a bin holding only unavailable readings sums to zero, an empty bin stays missing
    assert_eq!(
        values(&df, "Total charge (pC) 7")?,
        vec![Some(1.0), None, Some(0.0)]
    );
    Ok(())
}

#[test]
fn circuits_accumulate_side_by_side_in_order() -> Result<()> {
    let root = TempDir::new()?;
    write_circuit(root.path(), "3", PD)?;
    write_circuit(root.path(), "12", PD)?;

    let df = load_circuit_data(&["3", "12"], &base_table()?, root.path())?;

    assert_eq!(df.height(), 3);
    assert_eq!(
        df.get_column_names(),
        &[
            TIMESTAMP_COLUMN,
            "Propagation time (ns) 3",
            "PD Detection Sensitivity (pC) 3",
            "Total charge (pC) 3",
            "Propagation time (ns) 12",
            "PD Detection Sensitivity (pC) 12",
            "Total charge (pC) 12",
        ]
    );
    Ok(())
}

#[test]
fn missing_circuit_directory_fails_whole_call() -> Result<()> {
    let root = TempDir::new()?;
    write_circuit(root.path(), "3", PD)?;

    let err = load_circuit_data(&["3", "4"], &base_table()?, root.path())
        .expect_err("circuit 4 has no directory");

    match err {
        LoaderError::MissingDirectory(path) => assert_eq!(path, root.path().join("4")),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn missing_location_column_is_fatal() -> Result<()> {
    let root = TempDir::new()?;
    let pd = "Date/time (UTC);Charge (picocoulomb)\n2021-03-01 10:05:00;1\n";
    write_circuit(root.path(), "7", pd)?;

    let result = load_circuit_data(&[7], &base_table()?, root.path());
    assert!(matches!(result, Err(LoaderError::Polars(_))));
    Ok(())
}

#[test]
fn repeated_loads_are_identical_and_leave_base_untouched() -> Result<()> {
    let root = TempDir::new()?;
    write_circuit(root.path(), "7", PD)?;
    let base = base_table()?;
    let snapshot = base.clone();

    let first = load_circuit_data(&[7], &base, root.path())?;
    let second = load_circuit_data(&[7], &base, root.path())?;

    assert!(first.equals_missing(&second));
    assert!(base.equals_missing(&snapshot));
    Ok(())
}
