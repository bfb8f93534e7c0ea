//! The synchronized function set: one parameter snapshot, thirteen bindings.
//!
//! Every setter builds a candidate snapshot, renormalizes it when the radius
//! or relative momentum changed, and only then commits and rebroadcasts the
//! parameter vector to all bindings. A rejected update leaves the set as it
//! was.

use std::sync::Arc;

use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::{Domain, IntegrationMode, PhysicsConfig};
use wigner_deuteron::DeuteronGrid;
use wigner_quad::integrate;

use crate::binding::{self, missing_grid_error, FormulaContext, FormulaKind};
use crate::kinematics::{effective_radius, try_effective_k_star};
use crate::params::PhysicalParameters;

fn parameter_error(code: &str, name: &str, value: f64) -> WignerError {
    WignerError::Parameter(
        ErrorInfo::new(code, format!("{name} rejected"))
            .with_context("parameter", name)
            .with_context("value", value),
    )
}

fn check_finite(name: &str, value: f64) -> Result<(), WignerError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(parameter_error("non-finite-parameter", name, value))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), WignerError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(parameter_error("negative-parameter", name, value));
    }
    Ok(())
}

fn check_reduced_mass(mu: f64) -> Result<(), WignerError> {
    check_non_negative("reduced_mass", mu)?;
    if mu == 0.0 {
        return Err(parameter_error("non-positive-parameter", "reduced_mass", mu));
    }
    Ok(())
}

fn check_bounds(admissible: &Domain, candidate: &Domain) -> Result<(), WignerError> {
    candidate.validate()?;
    if !admissible.contains(candidate) {
        return Err(WignerError::Domain(
            ErrorInfo::new("bounds-outside-admissible", "integration bounds leave the admissible domain")
                .with_context("r_range", format!("[{}, {}]", candidate.r_min, candidate.r_max))
                .with_context("p_range", format!("[{}, {}]", candidate.p_min, candidate.p_max))
                .with_hint(format!(
                    "bounds must lie inside r=[{}, {}] p=[{}, {}]",
                    admissible.r_min, admissible.r_max, admissible.p_min, admissible.p_max
                )),
        ));
    }
    Ok(())
}

fn check_snapshot(config: &PhysicsConfig, params: &PhysicalParameters) -> Result<(), WignerError> {
    check_non_negative("reference_radius", params.reference_radius)?;
    check_non_negative("radius", params.radius)?;
    check_non_negative("k_star", params.k_star)?;
    check_non_negative("input_momentum", params.input_momentum)?;
    check_reduced_mass(params.reduced_mass)?;
    check_non_negative("potential_width", params.potential_width)?;
    check_finite("potential_depth", params.potential_depth)?;
    check_bounds(&config.admissible, &params.bounds)
}

/// A named formula together with its current parameter vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaBinding {
    kind: FormulaKind,
    name: String,
    parameters: Vec<f64>,
}

impl FormulaBinding {
    fn new(kind: FormulaKind, label: &str) -> Self {
        Self {
            kind,
            name: binding_name(kind, label),
            parameters: Vec::with_capacity(kind.arity()),
        }
    }

    /// Formula identity.
    pub fn kind(&self) -> FormulaKind {
        self.kind
    }

    /// Binding name, including the set's label suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of parameters the formula reads.
    pub fn arity(&self) -> usize {
        self.kind.arity()
    }

    /// Current parameter vector, truncated to the arity.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }
}

fn binding_name(kind: FormulaKind, label: &str) -> String {
    if label.is_empty() {
        kind.base_name().to_string()
    } else {
        format!("{}_{}", kind.base_name(), label)
    }
}

/// Gaussian Wigner source together with every formula derived from it.
#[derive(Debug, Clone)]
pub struct WignerSource {
    config: PhysicsConfig,
    params: PhysicalParameters,
    bindings: Vec<FormulaBinding>,
    deuteron: Option<Arc<DeuteronGrid>>,
    label: String,
}

impl WignerSource {
    /// Builds a set with default physical parameters, normalized under `config`.
    pub fn new(config: PhysicsConfig) -> Result<Self, WignerError> {
        Self::with_parameters(config, PhysicalParameters::default())
    }

    /// Builds a set from an explicit snapshot. `norm` is recomputed.
    ///
    /// The snapshot goes through the same checks as the setters.
    pub fn with_parameters(
        config: PhysicsConfig,
        params: PhysicalParameters,
    ) -> Result<Self, WignerError> {
        config.validate()?;
        check_snapshot(&config, &params)?;
        let mut set = Self {
            config,
            params,
            bindings: FormulaKind::ALL
                .iter()
                .map(|&kind| FormulaBinding::new(kind, ""))
                .collect(),
            deuteron: None,
            label: String::new(),
        };
        let mut next = set.params.clone();
        next.norm = set.normalization_for(next.radius, next.k_star)?;
        set.commit(next);
        Ok(set)
    }

    /// Appends `label` to every binding name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        for binding in &mut self.bindings {
            binding.name = binding_name(binding.kind, &self.label);
        }
        self
    }

    /// Attaches a shared deuteron table.
    pub fn with_deuteron(mut self, grid: Arc<DeuteronGrid>) -> Self {
        self.attach_deuteron(grid);
        self
    }

    /// Replaces the attached deuteron table.
    pub fn attach_deuteron(&mut self, grid: Arc<DeuteronGrid>) {
        if !grid.covers(&self.params.bounds) {
            log::warn!(
                "deuteron grid does not cover the integration bounds r=[{}, {}] p=[{}, {}]",
                self.params.bounds.r_min,
                self.params.bounds.r_max,
                self.params.bounds.p_min,
                self.params.bounds.p_max
            );
        }
        self.deuteron = Some(grid);
    }

    fn context(&self) -> FormulaContext<'_> {
        FormulaContext {
            hbar_c: self.config.hbar_c,
            deuteron: self.deuteron.as_deref(),
        }
    }

    fn normalization_for(&self, radius: f64, k_star: f64) -> Result<f64, WignerError> {
        let unit = [1.0, radius, k_star];
        let domain = self.config.normalization_domain(radius);
        let ctx = self.context();
        let total = integrate(
            |r, p| binding::evaluate(FormulaKind::Jacobian, &ctx, r, p, &unit),
            &domain,
            &self.config,
        )?;
        if total.is_nan() || total <= 0.0 {
            return Err(WignerError::Integration(
                ErrorInfo::new("degenerate-normalization", "normalization integral is not positive")
                    .with_context("radius", radius)
                    .with_context("k_star", k_star)
                    .with_context("integral", total),
            ));
        }
        let norm = 1.0 / total;
        log::debug!("renormalized source: radius={radius} k_star={k_star} norm={norm}");
        Ok(norm)
    }

    fn renormalized(&self, mut next: PhysicalParameters) -> Result<PhysicalParameters, WignerError> {
        next.norm = self.normalization_for(next.radius, next.k_star)?;
        Ok(next)
    }

    fn commit(&mut self, next: PhysicalParameters) {
        self.params = next;
        let vector = self.params.to_vector();
        for binding in &mut self.bindings {
            binding.parameters.clear();
            binding.parameters.extend_from_slice(&vector[..binding.kind.arity()]);
        }
    }

    fn apply(&mut self, next: Result<PhysicalParameters, WignerError>) -> Result<(), WignerError> {
        match next {
            Ok(next) => {
                self.commit(next);
                Ok(())
            }
            Err(err) => {
                log::error!("rejected update of {}: {err}", self.describe());
                Err(err)
            }
        }
    }

    fn describe(&self) -> String {
        if self.label.is_empty() {
            "wigner source".to_string()
        } else {
            format!("wigner source {}", self.label)
        }
    }

    fn radius_update(&self, radius: f64) -> Result<PhysicalParameters, WignerError> {
        check_non_negative("radius", radius)?;
        let mut next = self.params.clone();
        next.radius = radius;
        self.renormalized(next)
    }

    fn momentum_update(&self, k: f64) -> Result<PhysicalParameters, WignerError> {
        check_non_negative("momentum", k)?;
        let radius = effective_radius(k, self.params.reference_radius, &self.config);
        if !radius.is_finite() {
            return Err(WignerError::Parameter(
                ErrorInfo::new("non-finite-radius", "effective radius is not finite")
                    .with_context("k", k)
                    .with_hint("the momentum must be strictly positive"),
            ));
        }
        let mut next = self.params.clone();
        next.radius = radius;
        next.k_star = try_effective_k_star(k, radius, &self.config)?;
        next.input_momentum = k;
        self.renormalized(next)
    }

    fn k_star_update(&self, k: f64) -> Result<PhysicalParameters, WignerError> {
        check_non_negative("k_star", k)?;
        let mut next = self.params.clone();
        next.k_star = try_effective_k_star(k, next.radius, &self.config)?;
        self.renormalized(next)
    }

    fn bounds_update(&self, candidate: Domain) -> Result<PhysicalParameters, WignerError> {
        check_bounds(&self.config.admissible, &candidate)?;
        let mut next = self.params.clone();
        next.bounds = candidate;
        Ok(next)
    }

    /// Sets the source radius and renormalizes.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), WignerError> {
        let next = self.radius_update(radius);
        self.apply(next)
    }

    /// Sets the reference radius used by [`Self::set_from_momentum`].
    pub fn set_reference_radius(&mut self, r0: f64) -> Result<(), WignerError> {
        let next = check_non_negative("reference_radius", r0).map(|()| {
            let mut next = self.params.clone();
            next.reference_radius = r0;
            next
        });
        self.apply(next)
    }

    /// Derives radius and relative momentum from the pair momentum `k`.
    pub fn set_from_momentum(&mut self, k: f64) -> Result<(), WignerError> {
        let next = self.momentum_update(k);
        self.apply(next)
    }

    /// Derives the relative momentum from `k` at the current radius.
    pub fn set_k_star_direct(&mut self, k: f64) -> Result<(), WignerError> {
        let next = self.k_star_update(k);
        self.apply(next)
    }

    /// Records the input momentum without touching the source shape.
    pub fn set_input_momentum(&mut self, k: f64) -> Result<(), WignerError> {
        let next = check_non_negative("input_momentum", k).map(|()| {
            let mut next = self.params.clone();
            next.input_momentum = k;
            next
        });
        self.apply(next)
    }

    /// Sets the reduced mass. Must be strictly positive.
    pub fn set_reduced_mass(&mut self, mu: f64) -> Result<(), WignerError> {
        let next = check_reduced_mass(mu).map(|()| {
            let mut next = self.params.clone();
            next.reduced_mass = mu;
            next
        });
        self.apply(next)
    }

    /// Sets the square-well width.
    pub fn set_potential_width(&mut self, width: f64) -> Result<(), WignerError> {
        let next = check_non_negative("potential_width", width).map(|()| {
            let mut next = self.params.clone();
            next.potential_width = width;
            next
        });
        self.apply(next)
    }

    /// Sets the square-well depth (either sign).
    pub fn set_potential_depth(&mut self, depth: f64) -> Result<(), WignerError> {
        let next = check_finite("potential_depth", depth).map(|()| {
            let mut next = self.params.clone();
            next.potential_depth = depth;
            next
        });
        self.apply(next)
    }

    /// Sets the integration bounds. Argument order is `(x_min, y_min, x_max, y_max)`.
    pub fn set_domain_bounds(
        &mut self,
        r_min: f64,
        p_min: f64,
        r_max: f64,
        p_max: f64,
    ) -> Result<(), WignerError> {
        let next = self.bounds_update(Domain::new(r_min, r_max, p_min, p_max));
        self.apply(next)
    }

    /// Switches the quadrature strategy and renormalizes under it.
    pub fn set_integration_mode(&mut self, mode: IntegrationMode) -> Result<(), WignerError> {
        let previous = self.config.mode;
        self.config.mode = mode;
        let next = self.renormalized(self.params.clone());
        if next.is_err() {
            self.config.mode = previous;
        }
        self.apply(next)
    }

    /// Active configuration.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Snapshot of the physical parameters.
    pub fn parameters(&self) -> &PhysicalParameters {
        &self.params
    }

    /// Label appended to binding names.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Normalization constant.
    pub fn norm(&self) -> f64 {
        self.params.norm
    }

    /// Source radius `R`.
    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    /// Reference radius `r0`.
    pub fn reference_radius(&self) -> f64 {
        self.params.reference_radius
    }

    /// Relative momentum `k*`.
    pub fn k_star(&self) -> f64 {
        self.params.k_star
    }

    /// Last input momentum.
    pub fn input_momentum(&self) -> f64 {
        self.params.input_momentum
    }

    /// Reduced mass `μ`.
    pub fn reduced_mass(&self) -> f64 {
        self.params.reduced_mass
    }

    /// Square-well width.
    pub fn potential_width(&self) -> f64 {
        self.params.potential_width
    }

    /// Square-well depth.
    pub fn potential_depth(&self) -> f64 {
        self.params.potential_depth
    }

    /// Current integration bounds.
    pub fn bounds(&self) -> Domain {
        self.params.bounds
    }

    /// Attached deuteron table, if any.
    pub fn deuteron(&self) -> Option<&Arc<DeuteronGrid>> {
        self.deuteron.as_ref()
    }

    /// All bindings, in [`FormulaKind::ALL`] order.
    pub fn bindings(&self) -> &[FormulaBinding] {
        &self.bindings
    }

    /// Binding of one formula.
    pub fn binding(&self, kind: FormulaKind) -> &FormulaBinding {
        &self.bindings[kind as usize]
    }

    /// Evaluates a bound formula at `(r, p)`.
    pub fn evaluate(&self, kind: FormulaKind, r: f64, p: f64) -> Result<f64, WignerError> {
        binding::evaluate(kind, &self.context(), r, p, self.binding(kind).parameters())
    }

    /// Integrates a bound formula over the current bounds.
    pub fn integrate(&self, kind: FormulaKind) -> Result<f64, WignerError> {
        self.integrate_within(kind, &self.params.bounds)
    }

    /// Integrates a bound formula over explicit bounds.
    pub fn integrate_within(&self, kind: FormulaKind, domain: &Domain) -> Result<f64, WignerError> {
        if kind.needs_deuteron() && self.deuteron.is_none() {
            return Err(missing_grid_error());
        }
        let ctx = self.context();
        let params = self.binding(kind).parameters();
        integrate(
            |r, p| binding::evaluate(kind, &ctx, r, p, params),
            domain,
            &self.config,
        )
    }

    /// Integral of the bound Jacobian over the normalization domain; one by construction.
    pub fn normalization_check(&self) -> Result<f64, WignerError> {
        let domain = self.config.normalization_domain(self.params.radius);
        self.integrate_within(FormulaKind::Jacobian, &domain)
    }

    /// `⟨K⟩` over the current bounds.
    pub fn weighted_kinetic(&self) -> Result<f64, WignerError> {
        self.integrate(FormulaKind::WeightedKinetic)
    }

    /// `⟨V⟩` over the current bounds.
    pub fn weighted_potential(&self) -> Result<f64, WignerError> {
        self.integrate(FormulaKind::WeightedPotential)
    }

    /// `⟨H⟩` over the current bounds.
    pub fn weighted_hamiltonian(&self) -> Result<f64, WignerError> {
        self.integrate(FormulaKind::WeightedHamiltonian)
    }

    /// Self-overlap `(2πħc)³ ∫ W²`; close to one for a pure Gaussian state.
    pub fn self_overlap(&self) -> Result<f64, WignerError> {
        Ok(self.integrate(FormulaKind::SourceSquared)? * self.config.phase_space_volume())
    }

    /// Coalescence probability `(2πħc)³ ∫ W_d · W`.
    pub fn coalescence_probability(&self) -> Result<f64, WignerError> {
        Ok(self.integrate(FormulaKind::Coalescence)? * self.config.phase_space_volume())
    }

    /// Angular-weighted integral of the deuteron Wigner function.
    pub fn deuteron_total(&self) -> Result<f64, WignerError> {
        self.integrate(FormulaKind::DeuteronWeighted)
    }
}
