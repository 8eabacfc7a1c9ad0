//! Flattened-field CSV building for export endpoints.

mod csv;

pub use csv::{CsvBuilder, escape_field};
