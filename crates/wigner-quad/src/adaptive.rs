use wigner_core::errors::WignerError;
use wigner_core::{Domain, ReferenceOpts};

// Panels are always bisected this many times before the error estimate is
// trusted; a narrow peak can otherwise hide between the first three samples.
const MIN_DEPTH: u32 = 4;

struct Panel {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

fn refine<F>(f: &mut F, panel: Panel, tol: f64, depth: u32, level: u32) -> Result<f64, WignerError>
where
    F: FnMut(f64) -> Result<f64, WignerError>,
{
    let Panel {
        a,
        b,
        fa,
        fm,
        fb,
        whole,
    } = panel;
    let m = 0.5 * (a + b);
    let flm = f(0.5 * (a + m))?;
    let frm = f(0.5 * (m + b))?;
    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;

    let converged = level >= MIN_DEPTH && delta.abs() <= 15.0 * tol;
    if converged || level >= depth {
        return Ok(left + right + delta / 15.0);
    }
    let lower = refine(
        f,
        Panel {
            a,
            b: m,
            fa,
            fm: flm,
            fb: fm,
            whole: left,
        },
        0.5 * tol,
        depth,
        level + 1,
    )?;
    let upper = refine(
        f,
        Panel {
            a: m,
            b,
            fa: fm,
            fm: frm,
            fb,
            whole: right,
        },
        0.5 * tol,
        depth,
        level + 1,
    )?;
    Ok(lower + upper)
}

/// Adaptive Simpson quadrature of a one-dimensional function on `[a, b]`.
pub fn adaptive_simpson<F>(mut f: F, a: f64, b: f64, opts: &ReferenceOpts) -> Result<f64, WignerError>
where
    F: FnMut(f64) -> Result<f64, WignerError>,
{
    if b <= a {
        return Ok(0.0);
    }
    let fa = f(a)?;
    let fm = f(0.5 * (a + b))?;
    let fb = f(b)?;
    let panel = Panel {
        a,
        b,
        fa,
        fm,
        fb,
        whole: simpson(a, b, fa, fm, fb),
    };
    let depth = opts.max_depth.max(MIN_DEPTH);
    refine(&mut f, panel, opts.tolerance, depth, 0)
}

/// Nested adaptive quadrature: the outer pass integrates over radius the
/// inner momentum integral.
pub fn integrate_reference<F>(f: &F, domain: &Domain, opts: &ReferenceOpts) -> Result<f64, WignerError>
where
    F: Fn(f64, f64) -> Result<f64, WignerError>,
{
    adaptive_simpson(
        |x| adaptive_simpson(|p| f(x, p), domain.p_min, domain.p_max, opts),
        domain.r_min,
        domain.r_max,
        opts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_is_exact() {
        let opts = ReferenceOpts::default();
        let value = adaptive_simpson(|x| Ok(x * x * x), 0.0, 2.0, &opts).expect("integral");
        assert!((value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn narrow_peak_is_resolved() {
        let opts = ReferenceOpts::default();
        let value = adaptive_simpson(
            |x: f64| Ok((-(x - 3.3).powi(2) / (2.0 * 0.01_f64.powi(2))).exp()),
            0.0,
            10.0,
            &opts,
        )
        .expect("integral");
        let exact = 0.01 * (2.0 * std::f64::consts::PI).sqrt();
        assert!((value - exact).abs() / exact < 1e-5);
    }
}
