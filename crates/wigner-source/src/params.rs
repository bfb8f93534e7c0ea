use serde::{Deserialize, Serialize};
use wigner_core::Domain;

/// Number of entries in the shared parameter vector.
pub const PARAMETER_COUNT: usize = 6;

/// Names of the parameter vector entries, in order.
pub const PARAMETER_NAMES: [&str; PARAMETER_COUNT] = [
    "norm",
    "radius",
    "k_star",
    "reduced_mass",
    "potential_width",
    "potential_depth",
];

/// Authoritative physical state of a function set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// Normalization constant of the source.
    pub norm: f64,
    /// Reference radius `r0` in fm.
    pub reference_radius: f64,
    /// Effective source radius `R` in fm.
    pub radius: f64,
    /// Effective relative momentum `k*` in GeV/c.
    pub k_star: f64,
    /// Last input momentum `k` in GeV/c.
    pub input_momentum: f64,
    /// Reduced mass `μ` in GeV.
    pub reduced_mass: f64,
    /// Square-well width in fm.
    pub potential_width: f64,
    /// Square-well depth in GeV.
    pub potential_depth: f64,
    /// Integration bounds used by the observables.
    pub bounds: Domain,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            norm: 1.0,
            reference_radius: 1.0,
            radius: 1.0,
            k_star: 0.05,
            input_momentum: 0.05,
            reduced_mass: 0.938 / 2.0,
            potential_width: 3.2,
            potential_depth: -0.0174,
            bounds: Domain::default(),
        }
    }
}

impl PhysicalParameters {
    /// The shared vector `[norm, R, k*, μ, width, depth]`.
    pub fn to_vector(&self) -> [f64; PARAMETER_COUNT] {
        [
            self.norm,
            self.radius,
            self.k_star,
            self.reduced_mass,
            self.potential_width,
            self.potential_depth,
        ]
    }
}
