//! Static table of the named phase-space formulas and their arities.

use serde::{Deserialize, Serialize};
use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_deuteron::DeuteronGrid;

use crate::formulas;

/// One of the thirteen named formulas of a function set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaKind {
    /// Gaussian Wigner source.
    Source,
    /// Source times the self-overlap weighted source.
    SourceSquared,
    /// Source times the primary Jacobian.
    Jacobian,
    /// Source times the self-overlap Jacobian.
    JacobianSquared,
    /// Kinetic energy.
    KineticEnergy,
    /// Square-well potential energy.
    PotentialEnergy,
    /// Kinetic plus potential energy.
    Hamiltonian,
    /// Jacobian-weighted kinetic energy.
    WeightedKinetic,
    /// Jacobian-weighted potential energy.
    WeightedPotential,
    /// Jacobian-weighted Hamiltonian.
    WeightedHamiltonian,
    /// Interpolated deuteron Wigner function.
    Deuteron,
    /// Deuteron Wigner function times the angular measure.
    DeuteronWeighted,
    /// Deuteron Wigner function times the Jacobian-weighted source.
    Coalescence,
}

impl FormulaKind {
    /// Every formula, in table order.
    pub const ALL: [FormulaKind; 13] = [
        FormulaKind::Source,
        FormulaKind::SourceSquared,
        FormulaKind::Jacobian,
        FormulaKind::JacobianSquared,
        FormulaKind::KineticEnergy,
        FormulaKind::PotentialEnergy,
        FormulaKind::Hamiltonian,
        FormulaKind::WeightedKinetic,
        FormulaKind::WeightedPotential,
        FormulaKind::WeightedHamiltonian,
        FormulaKind::Deuteron,
        FormulaKind::DeuteronWeighted,
        FormulaKind::Coalescence,
    ];

    /// Table entry describing this formula.
    pub fn spec(self) -> &'static FormulaSpec {
        &FORMULAS[self as usize]
    }

    /// Number of leading parameters the formula reads.
    pub fn arity(self) -> usize {
        self.spec().arity
    }

    /// Short base name used to build binding names.
    pub fn base_name(self) -> &'static str {
        self.spec().name
    }

    /// Returns true for formulas that sample the deuteron grid.
    pub fn needs_deuteron(self) -> bool {
        matches!(
            self,
            FormulaKind::Deuteron | FormulaKind::DeuteronWeighted | FormulaKind::Coalescence
        )
    }
}

/// Evaluation inputs that are not part of the parameter vector.
#[derive(Debug, Clone, Copy)]
pub struct FormulaContext<'a> {
    /// ħc in GeV·fm.
    pub hbar_c: f64,
    /// Deuteron table, required by the deuteron-dependent formulas.
    pub deuteron: Option<&'a DeuteronGrid>,
}

impl<'a> FormulaContext<'a> {
    /// Context without a deuteron table.
    pub fn new(hbar_c: f64) -> Self {
        Self {
            hbar_c,
            deuteron: None,
        }
    }

    /// Attaches a deuteron table.
    pub fn with_deuteron(mut self, deuteron: &'a DeuteronGrid) -> Self {
        self.deuteron = Some(deuteron);
        self
    }

    fn lookup(&self, r: f64, p: f64) -> Result<f64, WignerError> {
        match self.deuteron {
            Some(grid) => grid.interpolate(r, p),
            None => Err(missing_grid_error()),
        }
    }
}

pub(crate) fn missing_grid_error() -> WignerError {
    WignerError::Deuteron(
        ErrorInfo::new("missing-grid", "formula needs a deuteron grid but none is attached")
            .with_hint("load a deuteron grid and attach it with WignerSource::with_deuteron"),
    )
}

/// Signature shared by every table entry.
pub type FormulaFn = fn(&FormulaContext<'_>, f64, f64, &[f64]) -> Result<f64, WignerError>;

/// One row of the formula table.
#[derive(Clone, Copy)]
pub struct FormulaSpec {
    /// Formula identity.
    pub kind: FormulaKind,
    /// Base name.
    pub name: &'static str,
    /// Parameter count.
    pub arity: usize,
    /// Evaluator.
    pub eval: FormulaFn,
}

impl std::fmt::Debug for FormulaSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaSpec")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

static FORMULAS: [FormulaSpec; 13] = [
    FormulaSpec {
        kind: FormulaKind::Source,
        name: "w",
        arity: 3,
        eval: |ctx, r, p, pm| Ok(formulas::source(ctx.hbar_c, r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::SourceSquared,
        name: "wxw",
        arity: 3,
        eval: |ctx, r, p, pm| Ok(formulas::source_squared(ctx.hbar_c, r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::Jacobian,
        name: "wxj",
        arity: 3,
        eval: |ctx, r, p, pm| Ok(formulas::jacobian(ctx.hbar_c, r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::JacobianSquared,
        name: "wxj2",
        arity: 3,
        eval: |ctx, r, p, pm| Ok(formulas::jacobian_squared(ctx.hbar_c, r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::KineticEnergy,
        name: "k",
        arity: 4,
        eval: |_, _, p, pm| Ok(formulas::kinetic_energy(p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::PotentialEnergy,
        name: "v",
        arity: 6,
        eval: |_, r, _, pm| Ok(formulas::potential_energy(r, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::Hamiltonian,
        name: "h",
        arity: 6,
        eval: |_, r, p, pm| Ok(formulas::hamiltonian(r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::WeightedKinetic,
        name: "wxk",
        arity: 4,
        eval: |ctx, r, p, pm| Ok(formulas::weighted_kinetic(ctx.hbar_c, r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::WeightedPotential,
        name: "wxv",
        arity: 6,
        eval: |ctx, r, p, pm| Ok(formulas::weighted_potential(ctx.hbar_c, r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::WeightedHamiltonian,
        name: "wxh",
        arity: 6,
        eval: |ctx, r, p, pm| Ok(formulas::weighted_hamiltonian(ctx.hbar_c, r, p, pm)),
    },
    FormulaSpec {
        kind: FormulaKind::Deuteron,
        name: "wd",
        arity: 0,
        eval: |ctx, r, p, _| ctx.lookup(r, p),
    },
    FormulaSpec {
        kind: FormulaKind::DeuteronWeighted,
        name: "wd_int",
        arity: 0,
        eval: |ctx, r, p, _| Ok(formulas::deuteron_weighted(ctx.lookup(r, p)?, r, p)),
    },
    FormulaSpec {
        kind: FormulaKind::Coalescence,
        name: "coal",
        arity: 3,
        eval: |ctx, r, p, pm| {
            let deuteron = ctx.lookup(r, p)?;
            Ok(formulas::coalescence(ctx.hbar_c, deuteron, r, p, pm))
        },
    },
];

/// Evaluates `kind` at `(r, p)` after checking the parameter count.
pub fn evaluate(
    kind: FormulaKind,
    ctx: &FormulaContext<'_>,
    r: f64,
    p: f64,
    params: &[f64],
) -> Result<f64, WignerError> {
    let spec = kind.spec();
    if params.len() != spec.arity {
        return Err(WignerError::Parameter(
            ErrorInfo::new("arity-mismatch", "parameter count does not match the formula arity")
                .with_context("formula", spec.name)
                .with_context("expected", spec.arity)
                .with_context("actual", params.len()),
        ));
    }
    (spec.eval)(ctx, r, p, params)
}
