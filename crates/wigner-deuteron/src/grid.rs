use serde::{Deserialize, Serialize};
use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::Domain;

fn grid_error(code: &str, message: impl Into<String>) -> WignerError {
    WignerError::Deuteron(ErrorInfo::new(code, message.into()))
}

/// Serialized layout of a deuteron grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDocument {
    /// Radius mesh in fm, strictly increasing.
    pub r_nodes: Vec<f64>,
    /// Momentum mesh in GeV/c, strictly increasing.
    pub p_nodes: Vec<f64>,
    /// `values[i][j]` is the Wigner function at `(r_nodes[i], p_nodes[j])`.
    pub values: Vec<Vec<f64>>,
}

/// Immutable deuteron Wigner-function table over a (radius, momentum) mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridDocument", into = "GridDocument")]
pub struct DeuteronGrid {
    r_nodes: Vec<f64>,
    p_nodes: Vec<f64>,
    values: Vec<Vec<f64>>,
}

fn check_axis(name: &str, nodes: &[f64]) -> Result<(), WignerError> {
    if nodes.len() < 2 {
        return Err(WignerError::Deuteron(
            ErrorInfo::new("axis-too-short", "each axis needs at least two nodes")
                .with_context("axis", name)
                .with_context("nodes", nodes.len()),
        ));
    }
    if nodes.iter().any(|value| !value.is_finite()) {
        return Err(WignerError::Deuteron(
            ErrorInfo::new("axis-non-finite", "axis nodes must be finite").with_context("axis", name),
        ));
    }
    if let Some(idx) = nodes.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(WignerError::Deuteron(
            ErrorInfo::new("axis-not-increasing", "axis nodes must be strictly increasing")
                .with_context("axis", name)
                .with_context("index", idx + 1),
        ));
    }
    Ok(())
}

/// Index `i` of the cell `[nodes[i], nodes[i + 1]]` holding `x`, if any.
fn locate(nodes: &[f64], x: f64) -> Option<usize> {
    let first = *nodes.first()?;
    let last = *nodes.last()?;
    if !(x >= first && x <= last) {
        return None;
    }
    let upper = nodes.partition_point(|&node| node <= x);
    Some(upper.saturating_sub(1).min(nodes.len() - 2))
}

impl DeuteronGrid {
    /// Builds a grid from its mesh and row-major values, validating the shape.
    pub fn new(
        r_nodes: Vec<f64>,
        p_nodes: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, WignerError> {
        check_axis("r", &r_nodes)?;
        check_axis("p", &p_nodes)?;
        if values.len() != r_nodes.len() {
            return Err(WignerError::Deuteron(
                ErrorInfo::new("shape-mismatch", "one row of values is required per radius node")
                    .with_context("rows", values.len())
                    .with_context("r_nodes", r_nodes.len()),
            ));
        }
        for (idx, row) in values.iter().enumerate() {
            if row.len() != p_nodes.len() {
                return Err(WignerError::Deuteron(
                    ErrorInfo::new("shape-mismatch", "row length must equal the momentum node count")
                        .with_context("row", idx)
                        .with_context("len", row.len())
                        .with_context("p_nodes", p_nodes.len()),
                ));
            }
            if row.iter().any(|value| !value.is_finite()) {
                return Err(WignerError::Deuteron(
                    ErrorInfo::new("non-finite-value", "grid values must be finite")
                        .with_context("row", idx),
                ));
            }
        }
        Ok(Self {
            r_nodes,
            p_nodes,
            values,
        })
    }

    /// Samples `f(r, p)` on the given mesh.
    pub fn from_fn<F>(r_nodes: Vec<f64>, p_nodes: Vec<f64>, f: F) -> Result<Self, WignerError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let values = r_nodes
            .iter()
            .map(|&r| p_nodes.iter().map(|&p| f(r, p)).collect())
            .collect();
        Self::new(r_nodes, p_nodes, values)
    }

    /// Radius mesh.
    pub fn r_nodes(&self) -> &[f64] {
        &self.r_nodes
    }

    /// Momentum mesh.
    pub fn p_nodes(&self) -> &[f64] {
        &self.p_nodes
    }

    /// Value stored at node `(i, j)`.
    pub fn node_value(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Rectangle spanned by the mesh.
    pub fn coverage(&self) -> Domain {
        Domain::new(
            self.r_nodes[0],
            self.r_nodes[self.r_nodes.len() - 1],
            self.p_nodes[0],
            self.p_nodes[self.p_nodes.len() - 1],
        )
    }

    /// Returns true when every point of `domain` can be interpolated.
    pub fn covers(&self, domain: &Domain) -> bool {
        self.coverage().contains(domain)
    }

    /// Bilinear interpolation between the four nodes surrounding `(r, p)`.
    pub fn interpolate(&self, r: f64, p: f64) -> Result<f64, WignerError> {
        let (i, j) = match (locate(&self.r_nodes, r), locate(&self.p_nodes, p)) {
            (Some(i), Some(j)) => (i, j),
            _ => {
                let coverage = self.coverage();
                return Err(WignerError::Domain(
                    ErrorInfo::new("outside-grid", "point lies outside the deuteron grid")
                        .with_context("r", r)
                        .with_context("p", p)
                        .with_context("r_range", format!("[{}, {}]", coverage.r_min, coverage.r_max))
                        .with_context("p_range", format!("[{}, {}]", coverage.p_min, coverage.p_max)),
                ));
            }
        };
        let (r0, r1) = (self.r_nodes[i], self.r_nodes[i + 1]);
        let (p0, p1) = (self.p_nodes[j], self.p_nodes[j + 1]);
        let tx = (r - r0) / (r1 - r0);
        let ty = (p - p0) / (p1 - p0);
        let v00 = self.values[i][j];
        let v10 = self.values[i + 1][j];
        let v01 = self.values[i][j + 1];
        let v11 = self.values[i + 1][j + 1];
        Ok((1.0 - tx) * (1.0 - ty) * v00
            + tx * (1.0 - ty) * v10
            + (1.0 - tx) * ty * v01
            + tx * ty * v11)
    }
}

impl TryFrom<GridDocument> for DeuteronGrid {
    type Error = WignerError;

    fn try_from(doc: GridDocument) -> Result<Self, Self::Error> {
        DeuteronGrid::new(doc.r_nodes, doc.p_nodes, doc.values)
    }
}

impl From<DeuteronGrid> for GridDocument {
    fn from(grid: DeuteronGrid) -> Self {
        GridDocument {
            r_nodes: grid.r_nodes,
            p_nodes: grid.p_nodes,
            values: grid.values,
        }
    }
}

pub(crate) fn empty_table_error() -> WignerError {
    grid_error("empty-table", "deuteron table contains no samples")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_picks_enclosing_cell() {
        let nodes = [0.0, 1.0, 2.0, 4.0];
        assert_eq!(locate(&nodes, 0.0), Some(0));
        assert_eq!(locate(&nodes, 1.5), Some(1));
        assert_eq!(locate(&nodes, 4.0), Some(2));
        assert_eq!(locate(&nodes, 4.5), None);
        assert_eq!(locate(&nodes, f64::NAN), None);
    }
}
