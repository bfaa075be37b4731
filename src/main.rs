//! Flight Traffic - Monthly Aviation Statistics Explorer
//!
//! Loads the traffic CSV once and serves the comparison menu on stdin.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flight_traffic::analysis::Analyst;
use flight_traffic::charts::TrendPlotter;
use flight_traffic::config::AppConfig;
use flight_traffic::data::DataLoader;
use flight_traffic::menu::MenuController;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "flight-traffic",
    version,
    about = "Compare monthly civil-aviation traffic trends from a CSV file",
    long_about = None
)]
struct Cli {
    /// CSV file with monthly statistics (overrides the config file)
    csv: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for rendered charts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Do not open charts after rendering
    #[arg(long)]
    no_open: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.log_format, cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(csv) = cli.csv {
        config.data_path = csv;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.no_open {
        config.open_plots = false;
    }

    let table = DataLoader::new()
        .with_lenient_months(config.lenient_months)
        .load_csv(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    match table.month_span() {
        Some((first, last)) => tracing::info!(
            rows = table.len(),
            fields = table.fields().len(),
            %first,
            %last,
            "Flight data loaded"
        ),
        None => tracing::warn!("No complete rows in {}", config.data_path.display()),
    }

    let plotter = TrendPlotter::new(&config.output_dir, config.chart_width, config.chart_height)
        .with_open_plots(config.open_plots);
    let mut analyst = Analyst::new(&table, plotter).with_delay_column(config.delay_column.clone());

    let stdin = std::io::stdin();
    let mut menu = MenuController::new(stdin.lock(), std::io::stdout());
    menu.run(&mut analyst).context("Menu I/O failed")?;

    Ok(())
}

fn setup_tracing(format: LogFormat, verbose: bool) {
    // RUST_LOG wins over the built-in defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("flight_traffic=debug,info")
        } else {
            tracing_subscriber::EnvFilter::new("flight_traffic=info,warn")
        }
    });

    // Logs go to stderr so the menu on stdout stays readable.
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
