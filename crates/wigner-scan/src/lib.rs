#![deny(missing_docs)]
#![doc = "Drivers for the Wigner coalescence engine: parameter-file loading, momentum scans and CSV/JSON export."]

/// CSV and JSON writers for scan results.
pub mod export;
/// Plain-text parameter files.
pub mod params;
/// Momentum scans and the final-state estimate.
pub mod scan;

pub use export::{write_csv, write_csv_to, write_json};
pub use params::{parse_parameter_values, read_parameter_values, SourceSettings, SETTINGS_LEN};
pub use scan::{run_scan, FinalState, ScanPlan, ScanReport, ScanRow};
