//! Closed-form phase-space formulas of the Gaussian source model.
//!
//! Every function reads its physical parameters from a slice laid out as
//! `[norm, radius, k_star, reduced_mass, potential_width, potential_depth]`
//! and only touches the leading entries it needs. Functions panic when the
//! slice is shorter than the documented arity; [`crate::binding::evaluate`]
//! checks the arity before dispatching here.
//!
//! Radii are in fm, momenta in GeV/c, energies in GeV and `hbar_c` in GeV·fm.

use std::f64::consts::PI;

/// Lower bound applied to `k_star·p` inside the Jacobian damping factor.
pub const KSTAR_P_FLOOR: f64 = 1e-16;

const FOUR_PI_SQUARED_TIMES_FOUR: f64 = 16.0 * PI * PI;

/// `(1/(π·ħc))³`.
pub fn gaussian_prefactor(hbar_c: f64) -> f64 {
    (1.0 / (PI * hbar_c)).powi(3)
}

/// Gaussian Wigner source (arity 3).
///
/// `norm · (πħc)⁻³ · exp(−r²/(4R²) − 4(p − k*)²R²/ħc²)`
pub fn source(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    let (norm, radius, k_star) = (pm[0], pm[1], pm[2]);
    let radius_sq = radius * radius;
    let dp = p - k_star;
    let exponent = -r * r * 0.25 / radius_sq - 4.0 * dp * dp * radius_sq / (hbar_c * hbar_c);
    norm * gaussian_prefactor(hbar_c) * exponent.exp()
}

/// Angular phase-space measure `16π²r²p²`.
pub fn geometric_jacobian(r: f64, p: f64) -> f64 {
    FOUR_PI_SQUARED_TIMES_FOUR * (r * p) * (r * p)
}

/// `0.5·(1 − e^(−2α))/α`, evaluated without cancellation for small `α`.
pub fn damping(alpha: f64) -> f64 {
    -0.5 * (-2.0 * alpha).exp_m1() / alpha
}

fn alpha(scale: f64, hbar_c: f64, p: f64, pm: &[f64]) -> f64 {
    let (radius, k_star) = (pm[1], pm[2]);
    scale * (k_star * p).max(KSTAR_P_FLOOR) * radius * radius / (hbar_c * hbar_c)
}

/// Jacobian factor without the source: `16π²r²p² · damping(α)`, `α = 8·k*p·R²/ħc²`.
pub fn jacobian_factor(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    geometric_jacobian(r, p) * damping(alpha(8.0, hbar_c, p, pm))
}

/// Self-overlap Jacobian factor, `α' = 16·k*p·R²/ħc²`.
pub fn jacobian_squared_factor(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    geometric_jacobian(r, p) * damping(alpha(16.0, hbar_c, p, pm))
}

/// Source times the primary Jacobian (arity 3). Its integral fixes `norm`.
pub fn jacobian(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    jacobian_factor(hbar_c, r, p, pm) * source(hbar_c, r, p, pm)
}

/// Source times the self-overlap Jacobian (arity 3).
pub fn jacobian_squared(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    jacobian_squared_factor(hbar_c, r, p, pm) * source(hbar_c, r, p, pm)
}

/// `source · jacobian_squared`, the integrand of the self-overlap check (arity 3).
pub fn source_squared(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    source(hbar_c, r, p, pm) * jacobian_squared(hbar_c, r, p, pm)
}

/// `p²/(2μ)` (arity 4).
pub fn kinetic_energy(p: f64, pm: &[f64]) -> f64 {
    p * p / (2.0 * pm[3])
}

/// Square well: `V₀` inside `potential_width`, zero outside (arity 6).
pub fn potential_energy(r: f64, pm: &[f64]) -> f64 {
    let (width, depth) = (pm[4], pm[5]);
    if r < width {
        depth
    } else {
        0.0
    }
}

/// Kinetic plus potential energy (arity 6).
pub fn hamiltonian(r: f64, p: f64, pm: &[f64]) -> f64 {
    kinetic_energy(p, pm) + potential_energy(r, pm)
}

/// Jacobian-weighted kinetic energy (arity 4).
pub fn weighted_kinetic(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    jacobian(hbar_c, r, p, pm) * kinetic_energy(p, pm)
}

/// Jacobian-weighted potential energy (arity 6).
pub fn weighted_potential(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    jacobian(hbar_c, r, p, pm) * potential_energy(r, pm)
}

/// Jacobian-weighted Hamiltonian (arity 6).
pub fn weighted_hamiltonian(hbar_c: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    jacobian(hbar_c, r, p, pm) * hamiltonian(r, p, pm)
}

/// Deuteron Wigner value times the plain angular measure.
pub fn deuteron_weighted(deuteron: f64, r: f64, p: f64) -> f64 {
    deuteron * geometric_jacobian(r, p)
}

/// Coalescence integrand: deuteron Wigner value times the Jacobian-weighted source (arity 3).
pub fn coalescence(hbar_c: f64, deuteron: f64, r: f64, p: f64, pm: &[f64]) -> f64 {
    deuteron * source(hbar_c, r, p, pm) * jacobian_factor(hbar_c, r, p, pm)
}
