#![deny(missing_docs)]
#![doc = "Deuteron Wigner-function table: loading from JSON or CSV and bilinear interpolation over (radius, momentum)."]

/// Grid storage and interpolation.
pub mod grid;
/// Dataset readers.
pub mod load;

pub use grid::{DeuteronGrid, GridDocument};
pub use load::{grid_from_csv_reader, grid_from_json_slice};
