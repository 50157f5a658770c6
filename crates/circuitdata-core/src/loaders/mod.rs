mod circuit;
mod power;
mod temperature;

pub use circuit::{load_circuit_data, load_circuit_data_with};
pub use power::{load_wop_data, load_wop_data_with};
pub use temperature::{load_temp_data, load_temp_data_with};
