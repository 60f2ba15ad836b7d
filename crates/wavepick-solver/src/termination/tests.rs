//! Tests for termination conditions.

use std::time::Duration;

use wavepick_config::SearchConfig;

use super::*;

fn stats_with(subproblems: u64) -> SearchStats {
    let mut stats = SearchStats::default();
    stats.start();
    for _ in 0..subproblems {
        stats.record_subproblem(true, Duration::ZERO);
    }
    stats
}

#[test]
fn test_subproblem_count_termination() {
    let term = SubproblemCountTermination::new(3);

    assert!(!term.is_terminated(&stats_with(0)));
    assert!(!term.is_terminated(&stats_with(2)));
    assert!(term.is_terminated(&stats_with(3)));
}

#[test]
fn test_time_termination() {
    let stats = stats_with(0);

    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&stats));
    assert!(!TimeTermination::seconds(3600).is_terminated(&stats));
}

#[test]
fn test_no_termination() {
    assert!(!NoTermination.is_terminated(&stats_with(1000)));
}

#[test]
fn test_none_never_terminates() {
    let term: Option<SubproblemCountTermination> = None;
    assert!(!term.is_terminated(&stats_with(1000)));
}

#[test]
fn test_or_termination() {
    let term = OrTermination((
        TimeTermination::seconds(3600),
        SubproblemCountTermination::new(2),
    ));

    assert!(!term.is_terminated(&stats_with(1)));
    assert!(term.is_terminated(&stats_with(2)));
}

#[test]
fn test_from_config() {
    let unlimited = termination_from_config(&SearchConfig::default());
    assert!(!unlimited.is_terminated(&stats_with(10_000)));

    let limited = termination_from_config(&SearchConfig::new().with_subproblem_limit(4));
    assert!(!limited.is_terminated(&stats_with(3)));
    assert!(limited.is_terminated(&stats_with(4)));
}
