//! Tests for subproblem construction.

use wavepick_config::{SearchConfig, WaveSizeRule};
use wavepick_core::WaveSelection;

use super::*;
use crate::adapter::{SolveStatus, SolverAdapter};
use crate::test_utils::scenario_instance;
use crate::GoodLpAdapter;

#[test]
fn test_aisle_count_model() {
    let instance = scenario_instance();
    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
    let subproblem = builder.build(Parameter::AisleCount(1)).unwrap();

    assert_eq!(subproblem.sense(), Sense::Maximize);
    assert_eq!(subproblem.variable_count(), 5);
    // wave size (2) + stock per demanded item (2) + aisle count (1)
    assert_eq!(subproblem.constraints().len(), 5);
    assert_eq!(
        subproblem.objective().terms(),
        &[
            (DecisionVar::Order(0), 2.0),
            (DecisionVar::Order(1), 2.0),
            (DecisionVar::Order(2), 1.0),
        ]
    );
}

#[test]
fn test_ratio_threshold_model() {
    let instance = scenario_instance();
    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
    let subproblem = builder.build(Parameter::RatioThreshold(3.0)).unwrap();

    assert_eq!(subproblem.sense(), Sense::Minimize);
    // wave size (2) + stock (2) + at least one aisle + ratio band
    assert_eq!(subproblem.constraints().len(), 6);

    let objective = subproblem.objective();
    assert!(objective
        .terms()
        .contains(&(DecisionVar::Aisle(0), 3.0)));
    assert!(objective
        .terms()
        .contains(&(DecisionVar::Order(0), -2.0)));
}

#[test]
fn test_ratio_band_admits_certificate() {
    let instance = scenario_instance();
    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
    let best = WaveSelection::new([0, 1], [0]);

    let at_optimum = builder.build(Parameter::RatioThreshold(4.0)).unwrap();
    assert!(at_optimum.is_satisfied_by(&best));

    let above = builder.build(Parameter::RatioThreshold(4.5)).unwrap();
    assert!(!above.is_satisfied_by(&best));
}

#[test]
fn test_stock_constraint() {
    let instance = scenario_instance();
    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
    let subproblem = builder.build(Parameter::AisleCount(1)).unwrap();

    assert!(subproblem.is_satisfied_by(&WaveSelection::new([0, 1], [0])));
    // order 2 needs item 1, which aisle 0 does not stock
    assert!(!subproblem.is_satisfied_by(&WaveSelection::new([0, 2], [0])));
}

#[test]
fn test_parameter_domain() {
    let instance = scenario_instance();
    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();

    for parameter in [
        Parameter::AisleCount(0),
        Parameter::AisleCount(3),
        Parameter::RatioThreshold(0.1),
        Parameter::RatioThreshold(5.5),
        Parameter::RatioThreshold(f64::NAN),
    ] {
        assert!(
            matches!(builder.build(parameter), Err(SearchError::InvalidParameter(_))),
            "{} should be rejected",
            parameter
        );
    }

    // both ends of the ratio domain [0.5, 5] are admissible
    assert!(builder.build(Parameter::RatioThreshold(0.5)).is_ok());
    assert!(builder.build(Parameter::RatioThreshold(5.0)).is_ok());
}

#[test]
fn test_per_order_gating() {
    let instance = scenario_instance();
    let config = SearchConfig::new().with_wave_size_rule(WaveSizeRule::PerOrder);
    let builder = SubproblemBuilder::new(&instance, &config).unwrap();
    let subproblem = builder.build(Parameter::AisleCount(1)).unwrap();

    // two gating rows per order on top of the total rule
    assert_eq!(subproblem.constraints().len(), 5 + 2 * 3);
    assert!(subproblem.is_satisfied_by(&WaveSelection::new([0, 1], [0])));
}

#[test]
fn test_big_m_defaults() {
    let instance = scenario_instance();

    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
    assert_eq!(builder.big_m(), 5.0);

    // never below the largest order
    let config = SearchConfig::new().with_big_m(1.0);
    let builder = SubproblemBuilder::new(&instance, &config).unwrap();
    assert_eq!(builder.big_m(), 2.0);
}

#[test]
fn test_install_and_read_selection() {
    let instance = scenario_instance();
    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
    let subproblem = builder.build(Parameter::AisleCount(1)).unwrap();

    let mut lp = GoodLpAdapter::new();
    let installed = subproblem.install(&mut lp);
    assert_eq!(lp.variable_count(), 5);
    assert_eq!(lp.constraint_count(), 5);
    assert_eq!(installed.parameter(), Parameter::AisleCount(1));

    assert_eq!(lp.solve(0.0).unwrap(), SolveStatus::Optimal);
    assert_eq!(lp.objective_value(), Some(4.0));
    assert_eq!(
        installed.read_selection(&lp).unwrap(),
        WaveSelection::new([0, 1], [0])
    );
}

#[test]
fn test_read_selection_without_solution() {
    let instance = scenario_instance();
    let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
    let subproblem = builder.build(Parameter::AisleCount(2)).unwrap();

    let mut lp = GoodLpAdapter::new();
    let installed = subproblem.install(&mut lp);
    assert!(matches!(
        installed.read_selection(&lp),
        Err(SolverError::MissingSolution)
    ));
}
