use std::io::Write;

use tempfile::NamedTempFile;
use wigner_core::{Domain, IntegrationMode, PhysicsConfig};

#[test]
fn defaults_match_documented_constants() {
    let config = PhysicsConfig::default();
    assert_eq!(config.hbar_c, 0.1973);
    assert_eq!(config.admissible, Domain::new(0.0, 20.0, 0.0, 0.6));
    assert_eq!(config.step.dx, 0.01);
    assert_eq!(config.step.dp, 0.001);
    assert_eq!(config.mode, IntegrationMode::Grid);
    assert!((config.factor() - (3.0_f64 / 8.0).sqrt() * 0.1973).abs() < 1e-15);
    config.validate().expect("defaults are valid");
}

#[test]
fn partial_toml_falls_back_to_defaults() {
    let config = PhysicsConfig::from_toml_str(
        r#"
mode = "reference"

[step]
dx = 0.02
"#,
    )
    .expect("parse");
    assert_eq!(config.mode, IntegrationMode::Reference);
    assert_eq!(config.step.dx, 0.02);
    assert_eq!(config.step.dp, 0.001);
    assert_eq!(config.hbar_c, 0.1973);
}

#[test]
fn invalid_step_is_rejected() {
    let err = PhysicsConfig::from_toml_str("[step]\ndx = 0.0\n").expect_err("zero step");
    assert_eq!(err.code(), "invalid-step");
}

#[test]
fn config_loads_from_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "hbar_c = 0.19733").expect("write");
    writeln!(file, "[admissible]").expect("write");
    writeln!(file, "r_min = 0.0\nr_max = 30.0\np_min = 0.0\np_max = 1.0").expect("write");
    let config = PhysicsConfig::load(file.path()).expect("load");
    assert_eq!(config.hbar_c, 0.19733);
    assert_eq!(config.admissible.r_max, 30.0);
}

#[test]
fn missing_file_is_io_error() {
    let err = PhysicsConfig::load(std::path::Path::new("/nonexistent/physics.toml"))
        .expect_err("missing");
    assert_eq!(err.code(), "config-read");
}
