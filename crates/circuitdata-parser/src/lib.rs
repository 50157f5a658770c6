pub mod errors;
pub mod formats;
pub mod model;
mod reader;

pub use errors::ParserError;
pub use model::{DecimalSeparator, TableFormat, TimestampSpec, TIMESTAMP_COLUMN};
pub use reader::{parse_table, read_table};
