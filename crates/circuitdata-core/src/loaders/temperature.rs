use std::path::Path;

use circuitdata_parser::{read_table, DecimalSeparator, TimestampSpec};
use polars::prelude::DataFrame;
use tracing::info;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::frame::{ensure_timestamp_key, left_join_on_timestamp};

pub fn load_temp_data(base: &DataFrame, root_path: &Path) -> Result<DataFrame> {
    load_temp_data_with(&LoaderConfig::default(), base, root_path)
}

/// Joins soil temperature onto ambient temperature, then the pair onto
/// `base`. Neither series is resampled.
pub fn load_temp_data_with(
    config: &LoaderConfig,
    base: &DataFrame,
    root_path: &Path,
) -> Result<DataFrame> {
    config.validate()?;
    ensure_timestamp_key(base, "base")?;
    let sources = &config.temperature;
    info!(root = %root_path.display(), "Loading temperature data");

    let format = config.table_format(
        TimestampSpec::column(sources.time_column.as_str()),
        DecimalSeparator::Point,
    )?;
    let ambient = read_table(&root_path.join(&sources.ambient_file), &format)?;
    let soil = read_table(&root_path.join(&sources.soil_file), &format)?;

    let temperatures = left_join_on_timestamp(&ambient, &soil)?;
    let df = left_join_on_timestamp(base, &temperatures)?;

    info!(rows = df.height(), columns = df.width(), "Loaded temperature data");
    Ok(df)
}
