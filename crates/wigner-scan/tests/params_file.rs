use std::fs;

use wigner_core::errors::WignerError;
use wigner_core::{Domain, PhysicsConfig};
use wigner_scan::{parse_parameter_values, read_parameter_values, SourceSettings};
use wigner_source::WignerSource;

const SAMPLE: &str = "1.2  # r0\n0.47\n\n3.0 width\nnot-a-number\n-0.02\n0\n0\n15\n0.5\n";

#[test]
fn malformed_and_blank_lines_are_skipped() {
    let values = parse_parameter_values(SAMPLE);
    assert_eq!(values, vec![1.2, 0.47, 3.0, -0.02, 0.0, 0.0, 15.0, 0.5]);
}

#[test]
fn settings_follow_file_order() {
    let settings = SourceSettings::from_values(&parse_parameter_values(SAMPLE)).unwrap();
    assert_eq!(settings.reference_radius, 1.2);
    assert_eq!(settings.reduced_mass, 0.47);
    assert_eq!(settings.potential_width, 3.0);
    assert_eq!(settings.potential_depth, -0.02);
    assert_eq!(settings.bounds, Domain::new(0.0, 15.0, 0.0, 0.5));
}

#[test]
fn short_files_are_fatal() {
    let err = SourceSettings::from_values(&[1.0, 0.469, 3.2]).unwrap_err();
    assert!(matches!(err, WignerError::Config(ref info) if info.code == "parameter-file-short"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_parameter_values(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, WignerError::Io(ref info) if info.code == "parameter-file-open"));
}

#[test]
fn loaded_settings_apply_to_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.txt");
    fs::write(&path, SAMPLE).unwrap();

    let settings = SourceSettings::load(&path).unwrap();
    let mut source = WignerSource::new(PhysicsConfig::default().with_step(0.02, 0.002)).unwrap();
    assert!(settings.apply(&mut source).is_empty());

    assert_eq!(source.reference_radius(), 1.2);
    assert_eq!(source.reduced_mass(), 0.47);
    assert_eq!(source.potential_width(), 3.0);
    assert_eq!(source.potential_depth(), -0.02);
    assert_eq!(source.bounds(), Domain::new(0.0, 15.0, 0.0, 0.5));
}

#[test]
fn rejected_values_keep_prior_state_and_the_rest_applies() {
    let values = [2.5, 0.3, 1.0, -0.05, 0.0, 0.0, 30.0, 0.6];
    let settings = SourceSettings::from_values(&values).unwrap();
    let mut source = WignerSource::new(PhysicsConfig::default().with_step(0.02, 0.002)).unwrap();
    let rejected = settings.apply(&mut source);

    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].code(), "bounds-outside-admissible");
    assert_eq!(source.bounds(), Domain::default());
    assert_eq!(source.reference_radius(), 2.5);
    assert_eq!(source.reduced_mass(), 0.3);
    assert_eq!(source.potential_width(), 1.0);
    assert_eq!(source.potential_depth(), -0.05);
}

#[test]
fn every_rejection_is_reported() {
    let values = [-1.0, -0.3, 2.0, -0.02, 0.0, 0.0, 10.0, 0.4];
    let settings = SourceSettings::from_values(&values).unwrap();
    let mut source = WignerSource::new(PhysicsConfig::default().with_step(0.02, 0.002)).unwrap();
    let rejected = settings.apply(&mut source);

    let codes: Vec<&str> = rejected.iter().map(|err| err.code()).collect();
    assert_eq!(codes, vec!["negative-parameter", "negative-parameter"]);
    assert_eq!(source.reference_radius(), 1.0);
    assert_eq!(source.reduced_mass(), 0.469);
    assert_eq!(source.potential_width(), 2.0);
    assert_eq!(source.bounds(), Domain::new(0.0, 10.0, 0.0, 0.4));
}

#[test]
fn trailing_units_are_ignored() {
    let values = parse_parameter_values("1.5fm\n0.469GeV\n-3.2e-2x\ninfile\n1e999\n.5\n");
    assert_eq!(values, vec![1.5, 0.469, -3.2e-2, 0.5]);
}
