//! Mixing end-members evaluated by the modified Tait equation of state.

use rt_core::units::{gpa, k};
use rt_eos::{EndMemberParameters, HeatCapacity, evaluate};
use rt_solution::{
    Composition, EntropyConvention, Interaction, InteractionMatrix, SolidSolution, SolutionError,
    mix,
};

fn pyrope() -> EndMemberParameters {
    EndMemberParameters::builder("py", "Mg3Al2Si3O12")
        .h0(-6_281_770.0)
        .s0(269.5)
        .v0(1.1313e-4)
        .cp(HeatCapacity::new(633.5, 0.0, -5_196_100.0, -4315.2))
        .alpha0(2.37e-5)
        .bulk_modulus(1.743e11, 4.05, -2.3e-11)
        .formula_units(20.0, 0.403_127_3)
        .build()
        .unwrap()
}

fn grossular() -> EndMemberParameters {
    EndMemberParameters::builder("gr", "Ca3Al2Si3O12")
        .h0(-6_643_050.0)
        .s0(255.0)
        .v0(1.2535e-4)
        .cp(HeatCapacity::new(626.0, 0.0, -5_779_200.0, -4002.9))
        .alpha0(2.2e-5)
        .bulk_modulus(1.72e11, 5.53, -3.2e-11)
        .formula_units(20.0, 0.450_446_1)
        .build()
        .unwrap()
}

#[test]
fn excess_entropy_convention_end_to_end() {
    let (p, t) = (gpa(3.0), k(1000.0));
    let states = vec![
        evaluate(&pyrope(), p, t).unwrap(),
        evaluate(&grossular(), p, t).unwrap(),
    ];
    let x = Composition::new(vec![0.5, 0.5]).unwrap();

    let excess = InteractionMatrix::symmetric(
        2,
        vec![Interaction::new(0.0, 10.0, 0.0)],
        EntropyConvention::ExcessEntropy,
    )
    .unwrap();
    let r = mix(&states, &x, &excess).unwrap();
    assert!((r.excess_gibbs_j_per_mol - -2500.0).abs() < 1e-9);

    let correction = InteractionMatrix::symmetric(
        2,
        vec![Interaction::new(0.0, -10.0, 0.0)],
        EntropyConvention::ThermalCorrection,
    )
    .unwrap();
    let r2 = mix(&states, &x, &correction).unwrap();
    assert_eq!(r.gibbs_j_per_mol, r2.gibbs_j_per_mol);
}

#[test]
fn zero_interactions_give_ideal_solution() {
    let gt = SolidSolution::new(
        "garnet",
        vec![pyrope(), grossular()],
        InteractionMatrix::ideal(2),
    )
    .unwrap();
    let x = Composition::new(vec![0.3, 0.7]).unwrap();
    let r = gt.evaluate(gpa(2.0), k(1200.0), &x).unwrap();
    assert_eq!(r.excess_gibbs_j_per_mol, 0.0);
    assert_eq!(r.excess_volume_m3_per_mol, 0.0);
    assert_eq!(r.is_locally_stable(), Some(true));
}

#[test]
fn bad_compositions_rejected_before_mixing() {
    assert!(matches!(
        Composition::new(vec![0.3, 0.3, 0.3]),
        Err(SolutionError::InvalidComposition { .. })
    ));
    assert!(Composition::new(vec![0.5, 0.5]).is_ok());
}

#[test]
fn volume_excess_follows_pressure() {
    let gt = SolidSolution::new(
        "garnet",
        vec![pyrope(), grossular()],
        InteractionMatrix::symmetric(
            2,
            vec![Interaction::new(30_000.0, 0.0, 1.0e-6)],
            EntropyConvention::ExcessEntropy,
        )
        .unwrap(),
    )
    .unwrap();
    let x = Composition::new(vec![0.5, 0.5]).unwrap();
    let low = gt.evaluate(gpa(1.0), k(1000.0), &x).unwrap();
    let high = gt.evaluate(gpa(5.0), k(1000.0), &x).unwrap();
    let w_low = 30_000.0 + 1.0e9 * 1.0e-6;
    let w_high = 30_000.0 + 5.0e9 * 1.0e-6;
    assert!((low.excess_gibbs_j_per_mol - 0.25 * w_low).abs() < 1e-6);
    assert!((high.excess_gibbs_j_per_mol - 0.25 * w_high).abs() < 1e-6);
    assert!((low.excess_volume_m3_per_mol - 0.25e-6).abs() < 1e-18);
}
