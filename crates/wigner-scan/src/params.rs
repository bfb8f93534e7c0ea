use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wigner_core::errors::{ErrorInfo, WignerError};
use wigner_core::Domain;
use wigner_source::WignerSource;

/// Number of values a parameter file must provide.
pub const SETTINGS_LEN: usize = 8;

/// Longest finite numeric prefix of `token`, so `1.5fm` reads as 1.5.
fn leading_number(token: &str) -> Option<f64> {
    if !token.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    (1..=token.len())
        .rev()
        .filter(|&end| token.is_char_boundary(end))
        .find_map(|end| token[..end].parse::<f64>().ok().filter(|value| value.is_finite()))
}

/// Parses one number per line from the start of its first whitespace
/// separated token. Trailing units such as `fm` are ignored.
///
/// Blank lines are skipped; lines whose first token does not start with a
/// number are skipped with a warning.
pub fn parse_parameter_values(text: &str) -> Vec<f64> {
    let mut values = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        match leading_number(token) {
            Some(value) => values.push(value),
            None => log::warn!("skipping parameter line {}: {token:?} is not a number", idx + 1),
        }
    }
    values
}

/// Reads a parameter file from disk.
pub fn read_parameter_values(path: &Path) -> Result<Vec<f64>, WignerError> {
    let text = fs::read_to_string(path).map_err(|err| {
        WignerError::Io(
            ErrorInfo::new("parameter-file-open", err.to_string()).with_context("path", path.display()),
        )
    })?;
    Ok(parse_parameter_values(&text))
}

/// Source settings stored in a parameter file, in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Reference radius `r0` in fm.
    pub reference_radius: f64,
    /// Reduced mass in GeV.
    pub reduced_mass: f64,
    /// Square-well width in fm.
    pub potential_width: f64,
    /// Square-well depth in GeV.
    pub potential_depth: f64,
    /// Integration bounds.
    pub bounds: Domain,
}

impl SourceSettings {
    /// Builds settings from `[r0, μ, width, depth, x_min, y_min, x_max, y_max]`.
    /// Values past the eighth are ignored.
    pub fn from_values(values: &[f64]) -> Result<Self, WignerError> {
        if values.len() < SETTINGS_LEN {
            return Err(WignerError::Config(
                ErrorInfo::new("parameter-file-short", "parameter file holds too few values")
                    .with_context("expected", SETTINGS_LEN)
                    .with_context("found", values.len())
                    .with_hint("list r0, mu, width, depth, x_min, y_min, x_max, y_max one per line"),
            ));
        }
        Ok(Self {
            reference_radius: values[0],
            reduced_mass: values[1],
            potential_width: values[2],
            potential_depth: values[3],
            bounds: Domain::new(values[4], values[6], values[5], values[7]),
        })
    }

    /// Reads and parses a parameter file.
    pub fn load(path: &Path) -> Result<Self, WignerError> {
        let values = read_parameter_values(path)?;
        Self::from_values(&values).map_err(|err| match err {
            WignerError::Config(info) => WignerError::Config(info.with_context("path", path.display())),
            other => other,
        })
    }

    /// Pushes the settings into a function set.
    ///
    /// Each setter is attempted in file order. A rejected value is logged by
    /// the setter, keeps its prior value and is returned; the remaining
    /// settings are still applied.
    pub fn apply(&self, source: &mut WignerSource) -> Vec<WignerError> {
        let outcomes = [
            source.set_reference_radius(self.reference_radius),
            source.set_reduced_mass(self.reduced_mass),
            source.set_potential_width(self.potential_width),
            source.set_potential_depth(self.potential_depth),
            source.set_domain_bounds(
                self.bounds.r_min,
                self.bounds.p_min,
                self.bounds.r_max,
                self.bounds.p_max,
            ),
        ];
        let rejected: Vec<WignerError> = outcomes.into_iter().filter_map(Result::err).collect();

        let bounds = source.bounds();
        log::info!(
            "source settings: r0={} fm, mu={} GeV, V0={} GeV within {} fm, r=[{}, {}] fm, p=[{}, {}] GeV/c",
            source.reference_radius(),
            source.reduced_mass(),
            source.potential_depth(),
            source.potential_width(),
            bounds.r_min,
            bounds.r_max,
            bounds.p_min,
            bounds.p_max
        );
        if !rejected.is_empty() {
            log::warn!("{} parameter-file value(s) rejected, prior values kept", rejected.len());
        }
        rejected
    }
}
