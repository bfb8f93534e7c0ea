//! Mapping from pair momentum to effective source radius and relative momentum.

use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::PhysicsConfig;

/// Relative slack, in units of `k²`, below which a negative `k² − (f/R)²`
/// is treated as rounding and clamped to zero.
pub const K_STAR_ROUNDING_SLACK: f64 = 1e-12;

/// Radius of the wave-packet `f/k` associated with momentum `k`.
pub fn wave_radius(k: f64, config: &PhysicsConfig) -> f64 {
    config.factor() / k
}

/// `sqrt((f/k)² + r0²)`. Infinite for `k = 0`.
pub fn effective_radius(k: f64, r0: f64, config: &PhysicsConfig) -> f64 {
    wave_radius(k, config).hypot(r0)
}

/// Momentum spread `f/R` of a packet of radius `R`.
pub fn wave_k_star(radius: f64, config: &PhysicsConfig) -> f64 {
    config.factor() / radius
}

/// `sqrt(k² − (f/R)²)`. NaN when the wave momentum exceeds `k`.
pub fn effective_k_star(k: f64, radius: f64, config: &PhysicsConfig) -> f64 {
    let wave = wave_k_star(radius, config);
    (k * k - wave * wave).sqrt()
}

/// Checked form of [`effective_k_star`].
///
/// Values of `k² − (f/R)²` in `[−1e-12·k², 0)` clamp to zero; anything
/// further below (or NaN) is a parameter error.
pub fn try_effective_k_star(k: f64, radius: f64, config: &PhysicsConfig) -> Result<f64, WignerError> {
    let wave = wave_k_star(radius, config);
    let k_sq = k * k;
    let diff = k_sq - wave * wave;
    if diff >= 0.0 {
        return Ok(diff.sqrt());
    }
    if diff >= -K_STAR_ROUNDING_SLACK * k_sq {
        return Ok(0.0);
    }
    Err(WignerError::Parameter(
        ErrorInfo::new("k-star-below-wave", "relative momentum would be imaginary")
            .with_context("k", k)
            .with_context("radius", radius)
            .with_context("wave_k_star", wave)
            .with_hint("increase k or the source radius so that k >= factor / radius"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_reference_radius_reduces_to_wave_radius() {
        let config = PhysicsConfig::default();
        assert_eq!(effective_radius(0.2, 0.0, &config), wave_radius(0.2, &config));
    }

    #[test]
    fn rounding_below_zero_clamps() {
        let config = PhysicsConfig::default();
        let k = 0.137;
        let radius = effective_radius(k, 0.0, &config);
        let k_star = try_effective_k_star(k, radius, &config).expect("clamped");
        assert!((0.0..1e-6).contains(&k_star));
    }
}
