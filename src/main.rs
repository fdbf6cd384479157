//! `icemon` — prints an ice risk report for an hourly forecast file.
//!
//! Without a path argument the `report.input` setting from the config file
//! is used. The report is the only thing written to stdout; log lines go to
//! stderr.

use clap::Parser;
use icemon_service::config::{self, OutputFormat};
use icemon_service::ingest::open_meteo;
use icemon_service::logging::{self, Component, LogLevel};
use icemon_service::model::IceDataError;
use icemon_service::report;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "icemon")]
#[command(about = "Ice formation risk report for an hourly weather series")]
struct Cli {
    /// Hourly series as Open-Meteo JSON or a list of readings
    input: Option<PathBuf>,

    /// Print the report as JSON instead of the configured format
    #[arg(long)]
    json: bool,

    /// Keep only the most severe event per hour boundary
    #[arg(long)]
    worst: bool,
}

fn run(cli: Cli) -> Result<(), IceDataError> {
    // Console-only logger until the config says otherwise, so config
    // errors are reported the same way as everything else.
    logging::init_logger(LogLevel::Info, None, false);

    let (config_path, config) = config::load_from_env()?;
    logging::init_logger(
        config.logging.min_level()?,
        config.logging.file.as_deref(),
        config.logging.timestamps,
    );
    logging::debug(
        Component::Config,
        Some(&config_path.display().to_string()),
        "configuration loaded",
    );

    let input = cli
        .input
        .or(config.report.input.clone())
        .ok_or_else(|| IceDataError::Config("no hourly series file given".to_string()))?;
    let text = std::fs::read_to_string(&input)
        .map_err(|e| IceDataError::Io(format!("{}: {}", input.display(), e)))?;
    let series = open_meteo::parse_series(&text)?;

    let mut ice_report = icemon_service::analyze(&series);
    if cli.worst || config.report.worst_per_transition {
        ice_report = ice_report.with_worst_per_transition();
    }

    let format = if cli.json { OutputFormat::Json } else { config.report.format };
    match format {
        OutputFormat::Json => println!("{}", ice_report.to_json()?),
        OutputFormat::Text => print!("{}", report::render_text(&ice_report)),
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(Component::System, None, &e.to_string());
            ExitCode::FAILURE
        }
    }
}
