use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wavepick::{console, ConfigError, Error, SearchConfig, StrategyConfig};

/// Read from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "wavepick.toml";

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
enum StrategyArg {
    Auto,
    ExactCount,
    EnumerateAisles,
    BisectRatio,
}

impl From<StrategyArg> for StrategyConfig {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => StrategyConfig::Auto,
            StrategyArg::ExactCount => StrategyConfig::ExactCount,
            StrategyArg::EnumerateAisles => StrategyConfig::EnumerateAisles,
            StrategyArg::BisectRatio => StrategyConfig::BisectRatio,
        }
    }
}

/// Selects an order wave that maximizes units picked per aisle visited.
#[derive(Parser, Debug)]
#[command(name = "wavepick", version)]
struct Cli {
    /// Instance file in the challenge text format.
    instance: PathBuf,

    /// Search configuration (TOML or YAML).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write the selected wave here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Override the configured strategy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Stop after this many seconds and keep the best wave so far.
    #[arg(long)]
    time_limit: Option<u64>,
}

fn load_config(cli: &Cli) -> Result<SearchConfig, Error> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_file(path)?,
        None => match SearchConfig::load(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                SearchConfig::default()
            }
            Err(e) => return Err(e.into()),
        },
    };
    if let Some(strategy) = cli.strategy {
        config = config.with_strategy(strategy.into());
    }
    if let Some(seconds) = cli.time_limit {
        config = config.with_termination_seconds(seconds);
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = load_config(cli)?;
    let (instance, outcome) = wavepick::solve_file(&cli.instance, &config)?;

    console::print_summary(&instance, &outcome);
    match &cli.output {
        Some(path) => console::save_solution(path, &outcome.selection)?,
        None => console::write_solution(&mut io::stdout().lock(), &outcome.selection)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    console::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
