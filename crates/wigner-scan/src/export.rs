use std::fs;
use std::io::Write;
use std::path::Path;

use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::to_canonical_json_bytes;

use crate::scan::{ScanReport, ScanRow};

const CSV_HEADER: [&str; 9] = ["k", "radius", "k_star", "norm", "wxw", "wk", "wv", "wh", "coal"];

fn export_error(code: &str, err: impl ToString) -> WignerError {
    WignerError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Writes one CSV line per row. A missing coalescence value is left empty.
pub fn write_csv_to<W: Write>(writer: W, rows: &[ScanRow]) -> Result<(), WignerError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)
        .map_err(|err| export_error("csv-write", err))?;
    for row in rows {
        wtr.write_record([
            row.k.to_string(),
            row.radius.to_string(),
            row.k_star.to_string(),
            row.norm.to_string(),
            row.self_overlap.to_string(),
            row.kinetic.to_string(),
            row.potential.to_string(),
            row.hamiltonian.to_string(),
            row.coalescence.map(|value| value.to_string()).unwrap_or_default(),
        ])
        .map_err(|err| export_error("csv-write", err))?;
    }
    wtr.flush().map_err(|err| export_error("csv-write", err))
}

/// Writes the scan rows as CSV to `out_path`.
pub fn write_csv(out_path: &Path, rows: &[ScanRow]) -> Result<(), WignerError> {
    let file = fs::File::create(out_path).map_err(|err| {
        WignerError::Io(ErrorInfo::new("csv-create", err.to_string()).with_context("path", out_path.display()))
    })?;
    write_csv_to(file, rows).map_err(|err| match err {
        WignerError::Serde(info) => WignerError::Serde(info.with_context("path", out_path.display())),
        other => other,
    })
}

/// Writes the full report as canonical JSON.
pub fn write_json(out_path: &Path, report: &ScanReport) -> Result<(), WignerError> {
    let bytes = to_canonical_json_bytes(report)?;
    fs::write(out_path, bytes).map_err(|err| {
        WignerError::Io(ErrorInfo::new("json-write", err.to_string()).with_context("path", out_path.display()))
    })
}
