use wigner_core::Domain;
use wigner_deuteron::DeuteronGrid;

fn plane_grid() -> DeuteronGrid {
    // Bilinear interpolation reproduces any function of the form a + b·r + c·p + d·r·p.
    DeuteronGrid::from_fn(
        vec![0.0, 1.0, 2.5, 5.0],
        vec![0.0, 0.2, 0.4, 0.6],
        |r, p| 1.0 + 2.0 * r - 3.0 * p + 0.5 * r * p,
    )
    .expect("grid")
}

#[test]
fn nodes_are_reproduced_exactly() {
    let grid = plane_grid();
    assert_eq!(grid.interpolate(1.0, 0.2).expect("node"), grid.node_value(1, 1).expect("value"));
    assert_eq!(grid.interpolate(0.0, 0.0).expect("corner"), 1.0);
}

#[test]
fn bilinear_surface_is_exact_between_nodes() {
    let grid = plane_grid();
    for &(r, p) in &[(0.3, 0.05), (1.7, 0.33), (4.99, 0.59), (2.5, 0.1)] {
        let expected = 1.0 + 2.0 * r - 3.0 * p + 0.5 * r * p;
        let value = grid.interpolate(r, p).expect("inside");
        assert!((value - expected).abs() < 1e-12, "r={r} p={p}");
    }
}

#[test]
fn upper_edges_are_inside() {
    let grid = plane_grid();
    let expected = 1.0 + 10.0 - 1.8 + 1.5;
    assert!((grid.interpolate(5.0, 0.6).expect("edge") - expected).abs() < 1e-12);
}

#[test]
fn points_outside_are_domain_errors() {
    let grid = plane_grid();
    for &(r, p) in &[(-0.1, 0.1), (5.1, 0.1), (1.0, 0.61), (f64::NAN, 0.1)] {
        let err = grid.interpolate(r, p).expect_err("outside");
        assert_eq!(err.code(), "outside-grid");
    }
}

#[test]
fn coverage_reports_mesh_rectangle() {
    let grid = plane_grid();
    assert_eq!(grid.coverage(), Domain::new(0.0, 5.0, 0.0, 0.6));
    assert!(grid.covers(&Domain::new(0.5, 4.0, 0.1, 0.5)));
    assert!(!grid.covers(&Domain::new(0.0, 20.0, 0.0, 0.6)));
}

#[test]
fn malformed_meshes_are_rejected() {
    let err = DeuteronGrid::new(vec![0.0], vec![0.0, 1.0], vec![vec![0.0, 0.0]]).expect_err("short");
    assert_eq!(err.code(), "axis-too-short");
    let err = DeuteronGrid::new(vec![0.0, 0.0], vec![0.0, 1.0], vec![vec![0.0; 2]; 2])
        .expect_err("flat axis");
    assert_eq!(err.code(), "axis-not-increasing");
    let err = DeuteronGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![vec![0.0; 2]]).expect_err("rows");
    assert_eq!(err.code(), "shape-mismatch");
    let err = DeuteronGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![vec![0.0, f64::NAN], vec![0.0; 2]])
        .expect_err("nan");
    assert_eq!(err.code(), "non-finite-value");
}
