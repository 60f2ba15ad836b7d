//! Rendering the final wave.
//!
//! [`write_solution`] produces the challenge output format:
//!
//! ```text
//! <number of selected orders>
//! <order index>            # one per line
//! <number of visited aisles>
//! <aisle index>            # one per line
//! ```
//!
//! [`format_summary`] renders a boxed summary for the console.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use owo_colors::OwoColorize;
use tracing::debug;
use wavepick_core::{ProblemInstance, WaveSelection};
use wavepick_solver::SearchOutcome;

use crate::grouped;

/// Writes `selection` in the challenge output format.
///
/// # Example
///
/// ```
/// use wavepick_core::WaveSelection;
/// use wavepick_console::write_solution;
///
/// let mut out = Vec::new();
/// write_solution(&mut out, &WaveSelection::new([0, 1], [0])).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "2\n0\n1\n1\n0\n");
/// ```
pub fn write_solution<W: Write>(out: &mut W, selection: &WaveSelection) -> io::Result<()> {
    writeln!(out, "{}", selection.orders().len())?;
    for order in selection.orders() {
        writeln!(out, "{}", order)?;
    }
    writeln!(out, "{}", selection.aisles().len())?;
    for aisle in selection.aisles() {
        writeln!(out, "{}", aisle)?;
    }
    Ok(())
}

/// Writes `selection` to a file, replacing any previous content.
pub fn save_solution(path: impl AsRef<Path>, selection: &WaveSelection) -> io::Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_solution(&mut out, selection)?;
    out.flush()?;
    debug!(path = %path.display(), "solution written");
    Ok(())
}

const INNER_WIDTH: usize = 58;

fn row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<20}{:>34}  {}",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn rule(left: &str, right: &str) -> String {
    format!("{}{}{}", left, "═".repeat(INNER_WIDTH), right)
        .bright_cyan()
        .to_string()
}

/// Renders a boxed summary of a finished search.
pub fn format_summary(instance: &ProblemInstance, outcome: &SearchOutcome) -> String {
    let status_text = if outcome.terminated_early {
        "WAVE FOUND (terminated early)"
    } else {
        "WAVE FOUND"
    };
    let total_pad = INNER_WIDTH.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;

    let mut lines = vec![
        rule("╔", "╗"),
        format!(
            "{}{}{}{}{}",
            "║".bright_cyan(),
            " ".repeat(left_pad),
            status_text.bright_green().bold(),
            " ".repeat(right_pad),
            "║".bright_cyan()
        ),
        rule("╠", "╣"),
        row("Ratio:", &format!("{:.3}", outcome.ratio)),
        row("Units picked:", &grouped(outcome.evaluation.units_picked)),
        row(
            "Orders:",
            &format!(
                "{} / {}",
                grouped(outcome.selection.orders().len()),
                grouped(instance.order_count())
            ),
        ),
        row(
            "Aisles:",
            &format!(
                "{} / {}",
                grouped(outcome.selection.aisles().len()),
                grouped(instance.aisle_count())
            ),
        ),
        row(
            "Wave size range:",
            &format!("[{}, {}]", instance.lower_bound(), instance.upper_bound()),
        ),
        row("Strategy:", &outcome.strategy.to_string()),
        row(
            "Subproblems:",
            &format!(
                "{} ({} infeasible)",
                outcome.stats.subproblem_count(),
                outcome.stats.infeasible_subproblems
            ),
        ),
        row(
            "Time spent:",
            &format!(
                "{:.3}s ({:.1}/s)",
                outcome.stats.elapsed().as_secs_f64(),
                outcome.stats.subproblems_per_second()
            ),
        ),
    ];
    if let Some(bounds) = outcome.ratio_bounds {
        lines.push(row(
            "Ratio interval:",
            &format!("[{:.4}, {:.4}]", bounds.low, bounds.high),
        ));
    }
    lines.push(rule("╚", "╝"));
    lines.join("\n")
}

/// Prints [`format_summary`] to stderr.
pub fn print_summary(instance: &ProblemInstance, outcome: &SearchOutcome) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "\n{}\n", format_summary(instance, outcome));
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use std::fs;

    use wavepick_solver::{GoodLpAdapter, ParametricSearch};
    use wavepick_test::scenario_instance;

    use super::*;

    #[test]
    fn test_write_solution_format() {
        let mut out = Vec::new();
        write_solution(&mut out, &WaveSelection::new([4, 2, 9], [1, 3])).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3\n2\n4\n9\n2\n1\n3\n");
    }

    #[test]
    fn test_save_solution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.txt");
        save_solution(&path, &WaveSelection::new([0], [1])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n0\n1\n1\n");
    }

    #[test]
    fn test_summary_mentions_ratio() {
        let instance = scenario_instance();
        let outcome = ParametricSearch::new(&instance, GoodLpAdapter::new())
            .solve()
            .unwrap();

        let summary = format_summary(&instance, &outcome);
        assert!(summary.contains("WAVE FOUND"));
        assert!(summary.contains("4.000"));
        assert!(summary.contains("enumerate-aisles"));
        assert!(summary.contains("/s)"));
    }
}
