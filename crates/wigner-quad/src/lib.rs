#![deny(missing_docs)]
#![doc = "Definite double integrals over (radius, momentum) rectangles, by fixed-step midpoint sums or nested adaptive Simpson quadrature."]

/// Nested adaptive Simpson quadrature.
pub mod adaptive;
/// Fixed-step midpoint summation.
pub mod grid;

use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::{Domain, IntegrationMode, PhysicsConfig};

pub use adaptive::{adaptive_simpson, integrate_reference};
pub use grid::{integrate_grid, midpoints};

/// Integrates `f(r, p)` over `domain` using the strategy selected in `config`.
///
/// Empty rectangles integrate to zero. Inverted or non-finite bounds and
/// non-finite results are reported as errors.
pub fn integrate<F>(f: F, domain: &Domain, config: &PhysicsConfig) -> Result<f64, WignerError>
where
    F: Fn(f64, f64) -> Result<f64, WignerError> + Sync,
{
    domain.validate()?;
    let value = match config.mode {
        IntegrationMode::Grid => integrate_grid(&f, domain, &config.step)?,
        IntegrationMode::Reference => integrate_reference(&f, domain, &config.reference)?,
    };
    if !value.is_finite() {
        log::warn!(
            "non-finite integral over r=[{}, {}] p=[{}, {}]",
            domain.r_min,
            domain.r_max,
            domain.p_min,
            domain.p_max
        );
        return Err(WignerError::Integration(
            ErrorInfo::new("non-finite-integral", "integral did not evaluate to a finite value")
                .with_context("value", value)
                .with_context("mode", format!("{:?}", config.mode)),
        ));
    }
    Ok(value)
}
