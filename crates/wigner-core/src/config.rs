//! Physical constants, admissible domains and integration settings.
//!
//! A [`PhysicsConfig`] is passed explicitly to the integrator, the formula
//! library and the function set. Nothing in the workspace reads global state.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, WignerError};

fn config_error(code: &str, message: impl Into<String>) -> WignerError {
    WignerError::Config(ErrorInfo::new(code, message.into()))
}

fn default_hbar_c() -> f64 {
    0.1973
}

fn default_norm_floor() -> f64 {
    20.0
}

fn default_momentum_ceiling() -> f64 {
    0.6
}

fn default_dx() -> f64 {
    0.01
}

fn default_dp() -> f64 {
    0.001
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_max_depth() -> u32 {
    18
}

/// Rectangle in (radius, momentum) phase space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Lower radius bound in fm.
    pub r_min: f64,
    /// Upper radius bound in fm.
    pub r_max: f64,
    /// Lower momentum bound in GeV/c.
    pub p_min: f64,
    /// Upper momentum bound in GeV/c.
    pub p_max: f64,
}

impl Domain {
    /// Creates a rectangle from its radius and momentum bounds.
    pub const fn new(r_min: f64, r_max: f64, p_min: f64, p_max: f64) -> Self {
        Self {
            r_min,
            r_max,
            p_min,
            p_max,
        }
    }

    /// Returns true when `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Domain) -> bool {
        other.r_min >= self.r_min
            && other.r_max <= self.r_max
            && other.p_min >= self.p_min
            && other.p_max <= self.p_max
    }

    /// Returns true when the point lies inside the closed rectangle.
    pub fn contains_point(&self, r: f64, p: f64) -> bool {
        r >= self.r_min && r <= self.r_max && p >= self.p_min && p <= self.p_max
    }

    /// Phase-space area of the rectangle.
    pub fn area(&self) -> f64 {
        (self.r_max - self.r_min) * (self.p_max - self.p_min)
    }

    /// Checks that all bounds are finite and ordered.
    pub fn validate(&self) -> Result<(), WignerError> {
        let finite = [self.r_min, self.r_max, self.p_min, self.p_max]
            .iter()
            .all(|value| value.is_finite());
        if !finite || self.r_max < self.r_min || self.p_max < self.p_min {
            return Err(WignerError::Domain(
                ErrorInfo::new("invalid-domain", "domain bounds must be finite and ordered")
                    .with_context("r_min", self.r_min)
                    .with_context("r_max", self.r_max)
                    .with_context("p_min", self.p_min)
                    .with_context("p_max", self.p_max),
            ));
        }
        Ok(())
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(0.0, 20.0, 0.0, 0.6)
    }
}

/// Midpoint-rule step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStep {
    /// Radius step in fm.
    #[serde(default = "default_dx")]
    pub dx: f64,
    /// Momentum step in GeV/c.
    #[serde(default = "default_dp")]
    pub dp: f64,
}

impl Default for GridStep {
    fn default() -> Self {
        Self {
            dx: default_dx(),
            dp: default_dp(),
        }
    }
}

/// Integration strategy used by the quadrature engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMode {
    /// Fixed-step midpoint sum, the production mode.
    #[default]
    Grid,
    /// Adaptive quadrature used to cross-check grid results.
    Reference,
}

/// Settings of the adaptive reference quadrature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceOpts {
    /// Absolute tolerance requested from each one-dimensional pass.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum bisection depth of each one-dimensional pass.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for ReferenceOpts {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_depth: default_max_depth(),
        }
    }
}

/// Explicit physics and quadrature configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// ħc in GeV·fm.
    #[serde(default = "default_hbar_c")]
    pub hbar_c: f64,
    /// Rectangle every user supplied integration range must fit in.
    #[serde(default)]
    pub admissible: Domain,
    /// Midpoint-rule step sizes.
    #[serde(default)]
    pub step: GridStep,
    /// Active integration strategy.
    #[serde(default)]
    pub mode: IntegrationMode,
    /// Smallest upper radius bound of the normalization integral.
    #[serde(default = "default_norm_floor")]
    pub norm_floor: f64,
    /// Upper momentum bound of the normalization integral.
    #[serde(default = "default_momentum_ceiling")]
    pub momentum_ceiling: f64,
    /// Adaptive quadrature settings for [`IntegrationMode::Reference`].
    #[serde(default)]
    pub reference: ReferenceOpts,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            hbar_c: default_hbar_c(),
            admissible: Domain::default(),
            step: GridStep::default(),
            mode: IntegrationMode::Grid,
            norm_floor: default_norm_floor(),
            momentum_ceiling: default_momentum_ceiling(),
            reference: ReferenceOpts::default(),
        }
    }
}

impl PhysicsConfig {
    /// Returns a copy using the requested integration mode.
    pub fn with_mode(mut self, mode: IntegrationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy using the requested grid step.
    pub fn with_step(mut self, dx: f64, dp: f64) -> Self {
        self.step = GridStep { dx, dp };
        self
    }

    /// `sqrt(3/8)·ħc`, the scale of the wave-packet radius and momentum.
    pub fn factor(&self) -> f64 {
        (3.0_f64 / 8.0).sqrt() * self.hbar_c
    }

    /// `(2π·ħc)³`, converting phase-space integrals to dimensionless numbers.
    pub fn phase_space_volume(&self) -> f64 {
        (2.0 * PI * self.hbar_c).powi(3)
    }

    /// Rectangle of the normalization integral for a given source radius.
    pub fn normalization_domain(&self, radius: f64) -> Domain {
        Domain::new(
            0.0,
            (5.0 * radius).max(self.norm_floor),
            0.0,
            self.momentum_ceiling,
        )
    }

    /// Checks that constants and steps are usable.
    pub fn validate(&self) -> Result<(), WignerError> {
        if !self.hbar_c.is_finite() || self.hbar_c <= 0.0 {
            return Err(WignerError::Config(
                ErrorInfo::new("invalid-hbar-c", "hbar_c must be positive")
                    .with_context("hbar_c", self.hbar_c),
            ));
        }
        if !(self.step.dx > 0.0 && self.step.dp > 0.0)
            || !self.step.dx.is_finite()
            || !self.step.dp.is_finite()
        {
            return Err(WignerError::Config(
                ErrorInfo::new("invalid-step", "grid steps must be positive and finite")
                    .with_context("dx", self.step.dx)
                    .with_context("dp", self.step.dp),
            ));
        }
        if !(self.norm_floor > 0.0 && self.momentum_ceiling > 0.0) {
            return Err(config_error(
                "invalid-normalization-domain",
                "normalization floor and momentum ceiling must be positive",
            ));
        }
        if self.reference.tolerance <= 0.0 {
            return Err(config_error(
                "invalid-tolerance",
                "reference tolerance must be positive",
            ));
        }
        self.admissible.validate()
    }

    /// Parses and validates a TOML configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self, WignerError> {
        let config: PhysicsConfig = toml::from_str(text).map_err(|err| {
            WignerError::Config(ErrorInfo::new("toml-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, WignerError> {
        let text = fs::read_to_string(path).map_err(|err| {
            WignerError::Io(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_toml_str(&text)
    }
}
