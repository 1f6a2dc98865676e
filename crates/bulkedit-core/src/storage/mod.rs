//! Storage module for CSV sheets and JSON cell selections

mod csv;
mod json;

pub use csv::{parse_csv, parse_csv_str, to_csv_string, write_csv};
pub use json::{parse_cells_json, read_cells_json};
