mod columns;
mod common;
mod header;

pub(crate) use columns::{build_table, RawColumn};
pub use common::{is_missing_marker, parse_optional_f64, parse_timestamp, MISSING_VALUE_MARKERS};
pub use header::normalise_headers;
