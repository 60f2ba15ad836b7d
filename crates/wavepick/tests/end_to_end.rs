//! End-to-end runs through the public facade: text in, wave out.

use std::io::Write;

use tempfile::NamedTempFile;
use wavepick::{Error, SearchConfig, SearchError, Strategy, StrategyConfig};
use wavepick_test::{brute_force_best, mixed_instance, SCENARIO_TEXT};

fn scenario_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SCENARIO_TEXT.as_bytes()).unwrap();
    file
}

#[test]
fn test_solve_file_in_both_modes() {
    let file = scenario_file();

    for (strategy, expected) in [
        (StrategyConfig::EnumerateAisles, Strategy::EnumerateAisles),
        (StrategyConfig::BisectRatio, Strategy::BisectRatio),
    ] {
        let config = SearchConfig::default().with_strategy(strategy);
        let (instance, outcome) = wavepick::solve_file(file.path(), &config).unwrap();

        assert_eq!(instance.order_count(), 3);
        assert_eq!(outcome.strategy, expected);
        assert_eq!(outcome.ratio, 4.0);
        assert_eq!(outcome.selection.orders(), &[0, 1]);
        assert_eq!(outcome.selection.aisles(), &[0]);
    }
}

#[test]
fn test_missing_file_is_instance_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let result = wavepick::solve_file(path, &SearchConfig::default());

    assert!(matches!(result, Err(Error::Instance(_))));
}

#[test]
fn test_infeasible_bounds_report_no_wave() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"1 1 1\n1 0 2\n1 0 2\n10 20\n").unwrap();

    let config = SearchConfig::default().with_strategy(StrategyConfig::EnumerateAisles);
    let result = wavepick::solve_file(file.path(), &config);

    assert!(matches!(
        result,
        Err(Error::Search(SearchError::NoFeasibleWave { subproblems: 1 }))
    ));
}

#[test]
fn test_solution_file_round_trip() {
    let file = scenario_file();
    let config = SearchConfig::default();
    let (_, outcome) = wavepick::solve_file(file.path(), &config).unwrap();

    let out = NamedTempFile::new().unwrap();
    wavepick::console::save_solution(out.path(), &outcome.selection).unwrap();

    let written = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "2\n0\n1\n1\n0\n");
}

#[test]
fn test_config_file_drives_strategy() {
    let mut config_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    config_file
        .write_all(b"strategy = \"bisect_ratio\"\nepsilon = 0.0001\n")
        .unwrap();
    let config = SearchConfig::from_file(config_file.path()).unwrap();

    let (_, outcome) = wavepick::solve_file(scenario_file().path(), &config).unwrap();
    assert_eq!(outcome.strategy, Strategy::BisectRatio);
    assert!(outcome.ratio_bounds.is_some());
}

#[test]
fn test_matches_brute_force_on_mixed_instance() {
    let instance = mixed_instance();
    let best = brute_force_best(&instance).unwrap();

    for strategy in [StrategyConfig::EnumerateAisles, StrategyConfig::BisectRatio] {
        let config = SearchConfig::default().with_strategy(strategy);
        let outcome = wavepick::solve_instance(&instance, &config).unwrap();
        assert!(
            (outcome.ratio - best.ratio).abs() < 1e-6,
            "{:?}: {} vs brute force {}",
            strategy,
            outcome.ratio,
            best.ratio
        );
    }
}
