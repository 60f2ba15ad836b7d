//! Colorful console output for search progress.
//!
//! Provides a custom `tracing` layer that formats search events with colors,
//! and the [`report`] module that renders the final wave.
//!
//! Everything here writes to stderr so stdout stays free for the solution.
//!
//! ## Log Levels
//!
//! - **INFO**: Instance loading, search start/end and every improvement of
//!   the best wave
//! - **DEBUG**: One line per subproblem

pub mod report;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use report::{format_summary, print_summary, save_solution, write_solution};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "wavepick_solver=info,wavepick=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(WaveConsoleLayer)
            .try_init();
    });
}

fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
                                    _      _
 __      ____ ___   _____ _ __ (_) ___| | __
 \ \ /\ / / _` \ \ / / _ \ '_ \| |/ __| |/ /
  \ V  V / (_| |\ V /  __/ |_) | | (__|   <
   \_/\_/ \__,_| \_/ \___| .__/|_|\___|_|\_\
                         |_|
"#;

    let version_line = format!("        v{} - Order Wave Selection\n", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats search events with colors.
pub struct WaveConsoleLayer;

impl<S: Subscriber> Layer<S> for WaveConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        if !target.starts_with("wavepick_solver")
            && target != "wavepick"
            && !target.starts_with("wavepick::")
        {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    backend: Option<String>,
    parameter: Option<String>,
    path: Option<String>,
    order_count: Option<u64>,
    item_count: Option<u64>,
    aisle_count: Option<u64>,
    lower_bound: Option<u64>,
    upper_bound: Option<u64>,
    epsilon: Option<f64>,
    index: Option<u64>,
    feasible: Option<bool>,
    objective: Option<f64>,
    duration_ms: Option<u64>,
    ratio: Option<f64>,
    units: Option<u64>,
    aisles: Option<u64>,
    orders: Option<u64>,
    subproblems: Option<u64>,
    infeasible: Option<u64>,
    terminated_early: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "strategy" => self.strategy = Some(s),
            "backend" => self.backend = Some(s),
            "parameter" => self.parameter = Some(s),
            "path" => self.path = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "order_count" => self.order_count = Some(value),
            "item_count" => self.item_count = Some(value),
            "aisle_count" => self.aisle_count = Some(value),
            "lower_bound" => self.lower_bound = Some(value),
            "upper_bound" => self.upper_bound = Some(value),
            "index" => self.index = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "units" => self.units = Some(value),
            "aisles" => self.aisles = Some(value),
            "orders" => self.orders = Some(value),
            "subproblems" => self.subproblems = Some(value),
            "infeasible" => self.infeasible = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "epsilon" => self.epsilon = Some(value),
            "objective" => self.objective = Some(value),
            "ratio" => self.ratio = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "feasible" => self.feasible = Some(value),
            "terminated_early" => self.terminated_early = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            "parameter" => self.parameter = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "instance_loaded" => format_instance_loaded(v),
        "search_start" => format_search_start(v),
        "subproblem" => format_subproblem(v),
        "best_improved" => format_best_improved(v),
        "search_end" => format_search_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_instance_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Loaded {} │ {} orders │ {} items │ {} aisles",
        format_elapsed(),
        "●".bright_blue(),
        v.path.as_deref().unwrap_or("instance").white(),
        grouped(v.order_count.unwrap_or(0)),
        grouped(v.item_count.unwrap_or(0)),
        grouped(v.aisle_count.unwrap_or(0))
    )
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let orders = v.order_count.unwrap_or(0);
    let aisles = v.aisle_count.unwrap_or(0);

    let mut output = format!(
        "{} {} Searching │ {} orders │ {} aisles │ wave [{}, {}] │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        grouped(orders).bright_yellow(),
        grouped(aisles).bright_yellow(),
        grouped(v.lower_bound.unwrap_or(0)),
        grouped(v.upper_bound.unwrap_or(0)),
        v.strategy.as_deref().unwrap_or("unknown").bright_magenta()
    );

    if let Some(backend) = &v.backend {
        output.push_str(&format!(" │ {}", backend.white()));
    }
    if let Some(epsilon) = v.epsilon {
        output.push_str(&format!(" │ ε {}", epsilon));
    }

    output
}

fn format_subproblem(v: &EventVisitor) -> String {
    let feasible = v.feasible.unwrap_or(false);
    let icon = if feasible {
        "✓".bright_green().to_string()
    } else {
        "✗".bright_red().to_string()
    };
    let objective = match v.objective {
        Some(o) if feasible && o.is_finite() => format!("{:.4}", o),
        _ => "infeasible".to_string(),
    };

    format!(
        "{} {} Subproblem {:>5} │ {:<14} │ {:>12} │ {}",
        format_elapsed(),
        icon,
        grouped(v.index.unwrap_or(0)).bright_black(),
        v.parameter.as_deref().unwrap_or("?"),
        objective.white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_best_improved(v: &EventVisitor) -> String {
    format!(
        "    {} ratio {} │ {} units │ {} aisles │ {} orders │ {}",
        "->".bright_blue(),
        format_ratio(v.ratio.unwrap_or(0.0)),
        grouped(v.units.unwrap_or(0)).white(),
        grouped(v.aisles.unwrap_or(0)).white(),
        grouped(v.orders.unwrap_or(0)).white(),
        v.parameter.as_deref().unwrap_or("").bright_black()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let ratio = v.ratio.unwrap_or(f64::NEG_INFINITY);
    let status = if ratio.is_finite() {
        "WAVE FOUND".bright_green().bold().to_string()
    } else {
        "NO FEASIBLE WAVE".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Search complete │ {} │ {} subproblems ({} infeasible) │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        grouped(v.subproblems.unwrap_or(0)).white(),
        grouped(v.infeasible.unwrap_or(0)),
        status
    );
    if v.terminated_early.unwrap_or(false) {
        output.push_str(&format!(" │ {}", "terminated early".yellow()));
    }
    output
}

/// Formats a count with thousands separators.
pub(crate) fn grouped(n: impl ToFormattedString) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.4}", ratio).bright_green().bold().to_string()
    } else {
        "n/a".bright_red().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let v = EventVisitor {
            event: Some("heartbeat".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v).is_empty());
    }

    #[test]
    fn test_instance_loaded_line() {
        let v = EventVisitor {
            event: Some("instance_loaded".to_string()),
            path: Some("instance_0001.txt".to_string()),
            order_count: Some(1_200),
            item_count: Some(40),
            aisle_count: Some(7),
            ..EventVisitor::default()
        };
        let line = format_event(&v);
        assert!(line.contains("instance_0001.txt"));
        assert!(line.contains("1,200"));
    }

    #[test]
    fn test_search_end_without_wave() {
        let v = EventVisitor {
            event: Some("search_end".to_string()),
            ratio: Some(f64::NEG_INFINITY),
            subproblems: Some(3),
            infeasible: Some(3),
            terminated_early: Some(true),
            ..EventVisitor::default()
        };
        let line = format_event(&v);
        assert!(line.contains("NO FEASIBLE WAVE"));
        assert!(line.contains("terminated early"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
