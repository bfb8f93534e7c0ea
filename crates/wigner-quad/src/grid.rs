use rayon::prelude::*;
use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::{Domain, GridStep};

fn grid_error(code: &str, message: impl Into<String>) -> WignerError {
    WignerError::Integration(ErrorInfo::new(code, message.into()))
}

/// Midpoints `min + step/2 + i·step` strictly below `max`.
///
/// The upper bound itself is never sampled. A trailing partial cell is kept,
/// with full weight, only when its midpoint falls below `max`.
pub fn midpoints(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut points = Vec::new();
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() {
        return points;
    }
    let mut idx = 0usize;
    loop {
        let value = min + step * (idx as f64 + 0.5);
        if value >= max {
            break;
        }
        points.push(value);
        idx += 1;
    }
    points
}

/// Midpoint-rule double sum of `f` over `domain`.
///
/// Rows of constant radius are evaluated in parallel. Row sums are gathered in
/// order and added sequentially so the result does not depend on the number
/// of worker threads.
pub fn integrate_grid<F>(f: &F, domain: &Domain, step: &GridStep) -> Result<f64, WignerError>
where
    F: Fn(f64, f64) -> Result<f64, WignerError> + Sync,
{
    if !(step.dx > 0.0 && step.dp > 0.0) {
        return Err(grid_error("invalid-step", "grid steps must be positive"));
    }
    let xs = midpoints(domain.r_min, domain.r_max, step.dx);
    let ps = midpoints(domain.p_min, domain.p_max, step.dp);
    log::trace!(
        "grid integration over {} x {} samples",
        xs.len(),
        ps.len()
    );

    let rows: Vec<f64> = xs
        .par_iter()
        .map(|&x| -> Result<f64, WignerError> {
            let mut row = 0.0;
            for &p in &ps {
                row += f(x, p)?;
            }
            Ok(row)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total: f64 = rows.iter().sum();
    Ok(total * step.dx * step.dp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_never_touch_upper_bound() {
        let points = midpoints(0.0, 1.0, 0.25);
        assert_eq!(points, vec![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn partial_cell_is_dropped() {
        assert_eq!(midpoints(0.0, 0.3, 0.25), vec![0.125]);
        assert!(midpoints(1.0, 1.0, 0.01).is_empty());
    }
}
