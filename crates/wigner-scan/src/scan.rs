use serde::{Deserialize, Serialize};
use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::stable_hash_string;
use wigner_source::WignerSource;

/// Momentum grid `start, start + step, ...` strictly below `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanPlan {
    /// First momentum in GeV/c.
    pub start: f64,
    /// Exclusive upper momentum in GeV/c.
    pub end: f64,
    /// Momentum increment in GeV/c.
    pub step: f64,
}

impl ScanPlan {
    /// Creates and validates a plan.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, WignerError> {
        let plan = Self { start, end, step };
        plan.validate()?;
        Ok(plan)
    }

    fn plan_error(&self, code: &str, message: &str) -> WignerError {
        WignerError::Config(
            ErrorInfo::new(code, message)
                .with_context("start", self.start)
                .with_context("end", self.end)
                .with_context("step", self.step),
        )
    }

    /// Checks finiteness, ordering and a positive step.
    pub fn validate(&self) -> Result<(), WignerError> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(self.plan_error("scan-non-finite", "scan bounds must be finite"));
        }
        if self.start < 0.0 || self.end < self.start {
            return Err(self.plan_error("scan-range", "scan requires 0 <= start <= end"));
        }
        if self.step <= 0.0 {
            return Err(self.plan_error("scan-step", "scan step must be positive"));
        }
        Ok(())
    }

    /// Momenta visited by the scan.
    pub fn momenta(&self) -> Vec<f64> {
        (0usize..)
            .map(|i| self.start + i as f64 * self.step)
            .take_while(|&k| k < self.end)
            .collect()
    }
}

/// Naive final-state interaction estimate for a pair entering the well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalState {
    /// Initial kinetic energy `k²/(2μ)` in GeV.
    pub initial_kinetic: f64,
    /// Energy after the interaction, zero when the pair is absorbed.
    pub energy: f64,
    /// Momentum after the interaction, zero when the pair is absorbed.
    pub momentum: f64,
}

impl FinalState {
    /// Adds `⟨V⟩` to the initial kinetic energy when the pair stays unbound.
    pub fn estimate(k: f64, reduced_mass: f64, potential: f64) -> Self {
        let initial_kinetic = k * k / (2.0 * reduced_mass);
        if initial_kinetic > potential {
            let energy = initial_kinetic + potential;
            Self {
                initial_kinetic,
                energy,
                momentum: (2.0 * reduced_mass * energy.max(0.0)).sqrt(),
            }
        } else {
            Self {
                initial_kinetic,
                energy: 0.0,
                momentum: 0.0,
            }
        }
    }
}

/// Observables recorded at one momentum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRow {
    /// Input momentum.
    pub k: f64,
    /// Effective source radius.
    pub radius: f64,
    /// Effective relative momentum.
    pub k_star: f64,
    /// Normalization constant.
    pub norm: f64,
    /// Self-overlap check.
    pub self_overlap: f64,
    /// Weighted kinetic energy.
    pub kinetic: f64,
    /// Weighted potential energy.
    pub potential: f64,
    /// Weighted Hamiltonian.
    pub hamiltonian: f64,
    /// Coalescence probability, when a deuteron grid is attached.
    pub coalescence: Option<f64>,
    /// Final-state estimate from `k`, `μ` and the weighted potential.
    pub final_state: FinalState,
}

/// Complete result of a momentum scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Scanned momenta.
    pub plan: ScanPlan,
    /// Hash of the physics configuration.
    pub config_hash: String,
    /// Angular-weighted deuteron integral, when a grid is attached.
    pub deuteron_total: Option<f64>,
    /// One row per momentum.
    pub rows: Vec<ScanRow>,
    /// Hash of the rows.
    pub scan_hash: String,
}

fn measure(source: &mut WignerSource, k: f64) -> Result<ScanRow, WignerError> {
    source.set_from_momentum(k)?;
    let potential = source.weighted_potential()?;
    let coalescence = match source.deuteron() {
        Some(_) => Some(source.coalescence_probability()?),
        None => None,
    };
    Ok(ScanRow {
        k,
        radius: source.radius(),
        k_star: source.k_star(),
        norm: source.norm(),
        self_overlap: source.self_overlap()?,
        kinetic: source.weighted_kinetic()?,
        potential,
        hamiltonian: source.weighted_hamiltonian()?,
        coalescence,
        final_state: FinalState::estimate(k, source.reduced_mass(), potential),
    })
}

/// Runs `plan` on `source`, leaving it at the last scanned momentum.
///
/// The first rejected momentum aborts the scan.
pub fn run_scan(source: &mut WignerSource, plan: &ScanPlan) -> Result<ScanReport, WignerError> {
    plan.validate()?;
    let momenta = plan.momenta();
    log::info!(
        "scanning {} momenta in [{}, {}) GeV/c with step {}",
        momenta.len(),
        plan.start,
        plan.end,
        plan.step
    );

    let deuteron_total = match source.deuteron() {
        Some(_) => Some(source.deuteron_total()?),
        None => None,
    };
    let mut rows = Vec::with_capacity(momenta.len());
    for k in momenta {
        let row = measure(source, k).map_err(|err| {
            log::error!("scan aborted at k={k}: {err}");
            err
        })?;
        log::info!(
            "k={:.4} R={:.4} k*={:.4} norm={:.6e} wxw={:.6} coal={}",
            row.k,
            row.radius,
            row.k_star,
            row.norm,
            row.self_overlap,
            row.coalescence
                .map(|value| format!("{value:.6e}"))
                .unwrap_or_else(|| "-".to_string())
        );
        rows.push(row);
    }

    Ok(ScanReport {
        plan: *plan,
        config_hash: stable_hash_string(source.config())?,
        deuteron_total,
        scan_hash: stable_hash_string(&rows)?,
        rows,
    })
}
