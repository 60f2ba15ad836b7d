//! Tests for search configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        epsilon = 0.005
        gap_tolerance = 0.0
        big_m = 50.0
        wave_size_rule = "per_order"
        strategy = "enumerate_aisles"

        [termination]
        seconds_spent_limit = 30
        subproblem_count_limit = 12
    "#;

    let config = SearchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.epsilon, 0.005);
    assert_eq!(config.gap_tolerance, 0.0);
    assert_eq!(config.big_m, Some(50.0));
    assert_eq!(config.wave_size_rule, WaveSizeRule::PerOrder);
    assert_eq!(config.strategy, StrategyConfig::EnumerateAisles);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    assert_eq!(config.subproblem_limit(), Some(12));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        epsilon: 0.01
        strategy: exact_count
        termination:
          minutes_spent_limit: 10
    "#;

    let config = SearchConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.epsilon, 0.01);
    assert_eq!(config.strategy, StrategyConfig::ExactCount);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(600)));
}

#[test]
fn test_empty_toml_gives_defaults() {
    let config = SearchConfig::from_toml_str("").unwrap();
    assert_eq!(config, SearchConfig::default());
    assert_eq!(config.epsilon, DEFAULT_EPSILON);
    assert!((config.gap_tolerance - (-6.0f64).exp()).abs() < 1e-15);
    assert_eq!(config.strategy, StrategyConfig::Auto);
    assert_eq!(config.wave_size_rule, WaveSizeRule::Total);
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_builder() {
    let config = SearchConfig::new()
        .with_epsilon(0.1)
        .with_gap_tolerance(0.0)
        .with_strategy(StrategyConfig::BisectRatio)
        .with_wave_size_rule(WaveSizeRule::PerOrder)
        .with_big_m(99.0)
        .with_termination_seconds(60)
        .with_subproblem_limit(5);

    assert_eq!(config.epsilon, 0.1);
    assert_eq!(config.big_m, Some(99.0));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.subproblem_limit(), Some(5));
}

#[test]
fn test_invalid_epsilon_rejected() {
    let result = SearchConfig::from_toml_str("epsilon = 0.0");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let result = SearchConfig::from_toml_str("epsilon = -1.0");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_invalid_big_m_rejected() {
    let result = SearchConfig::from_yaml_str("big_m: 0.0");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_unknown_strategy_is_parse_error() {
    let result = SearchConfig::from_toml_str(r#"strategy = "simplex""#);
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let config = SearchConfig::load("/nonexistent/wavepick.toml").unwrap_or_default();
    assert_eq!(config, SearchConfig::default());
}

#[test]
fn test_from_file_dispatches_on_extension() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(yaml, "epsilon: 0.25").unwrap();
    assert_eq!(SearchConfig::from_file(yaml.path()).unwrap().epsilon, 0.25);

    let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(toml, "epsilon = 0.5").unwrap();
    assert_eq!(SearchConfig::from_file(toml.path()).unwrap().epsilon, 0.5);
}

#[test]
fn test_termination_time_limit_sum() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(30),
        minutes_spent_limit: Some(1),
        subproblem_count_limit: None,
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_secs(90)));
    assert_eq!(TerminationConfig::default().time_limit(), None);
}
