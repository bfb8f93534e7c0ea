#![deny(missing_docs)]
#![doc = "Gaussian Wigner source model: closed-form phase-space formulas, kinematic relations and the synchronized, self-normalizing function set used to compute deuteron coalescence probabilities."]

/// Formula table and dispatch.
pub mod binding;
pub mod formulas;
pub mod kinematics;
/// Physical parameter snapshot.
pub mod params;
pub mod source;

pub use binding::{evaluate, FormulaContext, FormulaKind, FormulaSpec};
pub use kinematics::{
    effective_k_star, effective_radius, try_effective_k_star, wave_k_star, wave_radius,
};
pub use params::{PhysicalParameters, PARAMETER_COUNT, PARAMETER_NAMES};
pub use source::{FormulaBinding, WignerSource};
