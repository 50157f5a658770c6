pub mod config;
pub mod error;
pub mod frame;
pub mod loaders;
pub mod pipeline;

pub use circuitdata_parser::TIMESTAMP_COLUMN;
pub use config::LoaderConfig;
pub use error::{LoaderError, Result};
pub use loaders::{
    load_circuit_data, load_circuit_data_with, load_temp_data, load_temp_data_with,
    load_wop_data, load_wop_data_with,
};
pub use pipeline::load_all;
