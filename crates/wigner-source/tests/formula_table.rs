use wigner_deuteron::DeuteronGrid;
use wigner_source::formulas;
use wigner_source::{evaluate, FormulaContext, FormulaKind};

const HBAR_C: f64 = 0.1973;

fn flat_grid(value: f64) -> DeuteronGrid {
    DeuteronGrid::from_fn(vec![0.0, 20.0], vec![0.0, 0.6], |_, _| value).unwrap()
}

#[test]
fn arities_follow_parameter_layout() {
    let expected = [
        (FormulaKind::Source, 3),
        (FormulaKind::SourceSquared, 3),
        (FormulaKind::Jacobian, 3),
        (FormulaKind::JacobianSquared, 3),
        (FormulaKind::KineticEnergy, 4),
        (FormulaKind::PotentialEnergy, 6),
        (FormulaKind::Hamiltonian, 6),
        (FormulaKind::WeightedKinetic, 4),
        (FormulaKind::WeightedPotential, 6),
        (FormulaKind::WeightedHamiltonian, 6),
        (FormulaKind::Deuteron, 0),
        (FormulaKind::DeuteronWeighted, 0),
        (FormulaKind::Coalescence, 3),
    ];
    for (kind, arity) in expected {
        assert_eq!(kind.arity(), arity, "{kind:?}");
    }
    assert_eq!(FormulaKind::ALL.len(), expected.len());
}

#[test]
fn base_names_are_unique() {
    let mut names: Vec<_> = FormulaKind::ALL.iter().map(|kind| kind.base_name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), FormulaKind::ALL.len());
}

#[test]
fn dispatch_matches_library() {
    let ctx = FormulaContext::new(HBAR_C);
    let pm = [0.9, 1.4, 0.12, 0.469, 3.2, -0.0174];
    let (r, p) = (1.1, 0.15);
    let jacobian = evaluate(FormulaKind::Jacobian, &ctx, r, p, &pm[..3]).unwrap();
    assert_eq!(jacobian, formulas::jacobian(HBAR_C, r, p, &pm));
    let squared = evaluate(FormulaKind::SourceSquared, &ctx, r, p, &pm[..3]).unwrap();
    assert_eq!(squared, formulas::source_squared(HBAR_C, r, p, &pm));
    let kinetic = evaluate(FormulaKind::WeightedKinetic, &ctx, r, p, &pm[..4]).unwrap();
    assert_eq!(kinetic, formulas::weighted_kinetic(HBAR_C, r, p, &pm));
    let hamiltonian = evaluate(FormulaKind::Hamiltonian, &ctx, r, p, &pm).unwrap();
    assert_eq!(hamiltonian, formulas::hamiltonian(r, p, &pm));
}

#[test]
fn deuteron_formulas_use_the_grid() {
    let grid = flat_grid(2.0);
    let ctx = FormulaContext::new(HBAR_C).with_deuteron(&grid);
    let (r, p) = (2.0, 0.2);
    assert_eq!(evaluate(FormulaKind::Deuteron, &ctx, r, p, &[]).unwrap(), 2.0);
    let weighted = evaluate(FormulaKind::DeuteronWeighted, &ctx, r, p, &[]).unwrap();
    assert_eq!(weighted, 2.0 * formulas::geometric_jacobian(r, p));

    let pm = [1.0, 1.5, 0.1];
    let coalescence = evaluate(FormulaKind::Coalescence, &ctx, r, p, &pm).unwrap();
    let expected = 2.0 * formulas::jacobian(HBAR_C, r, p, &pm);
    assert!((coalescence - expected).abs() <= 1e-14 * expected);
}

#[test]
fn zero_k_star_uses_the_floor() {
    let pm = [1.0, 1.0, 0.0];
    let factor = formulas::jacobian_factor(HBAR_C, 1.0, 0.3, &pm);
    assert!(factor.is_finite());
    assert!((factor - formulas::geometric_jacobian(1.0, 0.3)).abs() < 1e-12 * factor);
}
