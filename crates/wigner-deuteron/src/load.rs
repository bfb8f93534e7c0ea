use std::fs;
use std::path::Path;

use serde::Deserialize;
use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::from_json_slice;

use crate::grid::{empty_table_error, DeuteronGrid};

fn io_error(code: &str, path: &Path, err: impl ToString) -> WignerError {
    WignerError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
}

#[derive(Debug, Deserialize)]
struct TableRecord {
    r: f64,
    p: f64,
    value: f64,
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Parses a JSON grid document.
pub fn grid_from_json_slice(bytes: &[u8]) -> Result<DeuteronGrid, WignerError> {
    from_json_slice(bytes)
}

/// Builds a grid from a long `r,p,value` table in any row order.
///
/// Every combination of the distinct radius and momentum values must appear
/// exactly once.
pub fn grid_from_csv_reader<R: std::io::Read>(reader: R) -> Result<DeuteronGrid, WignerError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<TableRecord>() {
        let record = row.map_err(|err| {
            WignerError::Deuteron(ErrorInfo::new("csv-record", err.to_string()))
        })?;
        records.push(record);
    }
    if records.is_empty() {
        return Err(empty_table_error());
    }

    let r_nodes = sorted_unique(records.iter().map(|rec| rec.r).collect());
    let p_nodes = sorted_unique(records.iter().map(|rec| rec.p).collect());
    let mut cells: Vec<Vec<Option<f64>>> = vec![vec![None; p_nodes.len()]; r_nodes.len()];
    for record in &records {
        let i = r_nodes.partition_point(|&node| node < record.r);
        let j = p_nodes.partition_point(|&node| node < record.p);
        let cell = &mut cells[i][j];
        if cell.is_some() {
            return Err(WignerError::Deuteron(
                ErrorInfo::new("duplicate-node", "grid node listed more than once")
                    .with_context("r", record.r)
                    .with_context("p", record.p),
            ));
        }
        *cell = Some(record.value);
    }

    let mut values = Vec::with_capacity(r_nodes.len());
    for (i, row) in cells.into_iter().enumerate() {
        let mut filled = Vec::with_capacity(row.len());
        for (j, cell) in row.into_iter().enumerate() {
            let value = cell.ok_or_else(|| {
                WignerError::Deuteron(
                    ErrorInfo::new("missing-node", "grid node has no value")
                        .with_context("r", r_nodes[i])
                        .with_context("p", p_nodes[j]),
                )
            })?;
            filled.push(value);
        }
        values.push(filled);
    }
    DeuteronGrid::new(r_nodes, p_nodes, values)
}

impl DeuteronGrid {
    /// Loads a grid from disk, choosing the format from the file extension
    /// (`.csv` for long tables, anything else for JSON documents).
    pub fn load(path: &Path) -> Result<Self, WignerError> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        let parsed = if is_csv {
            let file = fs::File::open(path).map_err(|err| io_error("deuteron-open", path, err))?;
            grid_from_csv_reader(file)
        } else {
            let bytes = fs::read(path).map_err(|err| io_error("deuteron-open", path, err))?;
            grid_from_json_slice(&bytes)
        };
        let grid = parsed.map_err(|err| match err {
            WignerError::Deuteron(info) | WignerError::Serde(info) => {
                WignerError::Deuteron(info.with_context("path", path.display()))
            }
            other => other,
        })?;

        let coverage = grid.coverage();
        log::info!(
            "loaded deuteron grid {} ({} x {} nodes, r=[{}, {}], p=[{}, {}])",
            path.display(),
            grid.r_nodes().len(),
            grid.p_nodes().len(),
            coverage.r_min,
            coverage.r_max,
            coverage.p_min,
            coverage.p_max
        );
        Ok(grid)
    }
}
