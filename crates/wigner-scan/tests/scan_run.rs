use std::sync::Arc;

use wigner_core::errors::WignerError;
use wigner_core::PhysicsConfig;
use wigner_deuteron::DeuteronGrid;
use wigner_scan::{run_scan, FinalState, ScanPlan};
use wigner_source::WignerSource;

fn coarse_source() -> WignerSource {
    WignerSource::new(PhysicsConfig::default().with_step(0.04, 0.004)).unwrap()
}

fn synthetic_deuteron() -> Arc<DeuteronGrid> {
    let r_nodes: Vec<f64> = (0..=40).map(|i| i as f64 * 0.5).collect();
    let p_nodes: Vec<f64> = (0..=30).map(|j| j as f64 / 50.0).collect();
    let grid = DeuteronGrid::from_fn(r_nodes, p_nodes, |r, p| {
        (-r * r / 14.0 - p * p / 0.004).exp()
    })
    .unwrap();
    Arc::new(grid)
}

#[test]
fn plan_visits_momenta_below_end() {
    let plan = ScanPlan::new(0.1, 0.4, 0.1).unwrap();
    let momenta = plan.momenta();
    assert_eq!(momenta.len(), 3);
    assert!((momenta[2] - 0.3).abs() < 1e-12);
    assert!(ScanPlan::new(0.2, 0.2, 0.1).unwrap().momenta().is_empty());
}

#[test]
fn invalid_plans_are_rejected() {
    assert!(matches!(ScanPlan::new(-0.1, 0.4, 0.1), Err(WignerError::Config(_))));
    assert!(ScanPlan::new(0.4, 0.1, 0.1).is_err());
    assert!(ScanPlan::new(0.1, 0.4, 0.0).is_err());
    assert!(ScanPlan::new(0.1, f64::NAN, 0.1).is_err());
}

#[test]
fn final_state_adds_potential_when_unbound() {
    let state = FinalState::estimate(0.2, 0.5, -0.01);
    assert!((state.initial_kinetic - 0.04).abs() < 1e-15);
    assert!((state.energy - 0.03).abs() < 1e-15);
    assert!((state.momentum - 0.03_f64.sqrt()).abs() < 1e-12);

    let absorbed = FinalState::estimate(0.01, 0.5, 0.2);
    assert_eq!(absorbed.energy, 0.0);
    assert_eq!(absorbed.momentum, 0.0);
}

#[test]
fn scan_records_one_row_per_momentum() {
    let mut source = coarse_source();
    let plan = ScanPlan::new(0.1, 0.3, 0.1).unwrap();
    let report = run_scan(&mut source, &plan).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert!(report.deuteron_total.is_none());
    for row in &report.rows {
        assert!(row.radius >= source.reference_radius());
        assert!(row.k_star >= 0.0 && row.k_star <= row.k);
        assert!(row.norm > 0.0);
        assert!(row.coalescence.is_none());
        assert!((row.hamiltonian - (row.kinetic + row.potential)).abs() < 1e-9);
    }
    assert_eq!(source.input_momentum(), report.rows[1].k);
    assert_eq!(report.config_hash.len(), 64);
}

#[test]
fn scan_with_deuteron_reports_coalescence() {
    let mut source = coarse_source().with_deuteron(synthetic_deuteron());
    let plan = ScanPlan::new(0.1, 0.25, 0.05).unwrap();
    let report = run_scan(&mut source, &plan).unwrap();
    assert!(report.deuteron_total.unwrap() > 0.0);
    for row in &report.rows {
        assert!(row.coalescence.unwrap() >= 0.0);
    }
}

#[test]
fn zero_start_aborts_the_scan() {
    let mut source = coarse_source();
    let plan = ScanPlan::new(0.0, 0.2, 0.1).unwrap();
    let err = run_scan(&mut source, &plan).unwrap_err();
    assert_eq!(err.code(), "non-finite-radius");
}

#[test]
fn repeated_scans_share_hashes() {
    let plan = ScanPlan::new(0.1, 0.3, 0.1).unwrap();
    let first = run_scan(&mut coarse_source(), &plan).unwrap();
    let second = run_scan(&mut coarse_source(), &plan).unwrap();
    assert_eq!(first.scan_hash, second.scan_hash);
    assert_eq!(first, second);
}
