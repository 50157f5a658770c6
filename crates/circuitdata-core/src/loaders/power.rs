use std::path::Path;

use circuitdata_parser::{read_table, TimestampSpec};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::frame::{drop_columns_matching, ensure_timestamp_key, left_join_on_timestamp, resample_sum};

pub fn load_wop_data(base: &DataFrame, root_path: &Path) -> Result<DataFrame> {
    load_wop_data_with(&LoaderConfig::default(), base, root_path)
}

/// Reads the WOP power/current/voltage dump, drops spreadsheet artefact
/// columns, sums it into hourly bins and left-joins it onto `base`.
pub fn load_wop_data_with(
    config: &LoaderConfig,
    base: &DataFrame,
    root_path: &Path,
) -> Result<DataFrame> {
    config.validate()?;
    ensure_timestamp_key(base, "base")?;
    let source = &config.power;
    let path = root_path.join(&source.file);
    info!(path = %path.display(), "Loading WOP power data");

    let format = config.table_format(
        TimestampSpec::combined(
            [source.date_column.as_str(), source.time_column.as_str()],
            source.timestamp_format.as_str(),
        ),
        source.decimal,
    )?;
    let power = read_table(&path, &format)?;

    let (power, dropped) = drop_columns_matching(&power, &source.drop_marker)?;
    if !dropped.is_empty() {
        debug!(?dropped, "Dropped artefact columns");
    }

    let hourly = resample_sum(&power, config.resample_every())?;
    let df = left_join_on_timestamp(base, &hourly)?;

    info!(
        bins = hourly.height(),
        rows = df.height(),
        columns = df.width(),
        "Loaded WOP power data"
    );
    Ok(df)
}
