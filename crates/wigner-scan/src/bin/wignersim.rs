use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use wigner_core::{IntegrationMode, PhysicsConfig};
use wigner_deuteron::DeuteronGrid;
use wigner_scan::{run_scan, write_csv, write_json, ScanPlan, SourceSettings};
use wigner_source::WignerSource;

#[derive(Parser, Debug)]
#[command(name = "wignersim", about = "Scan deuteron coalescence over pair momentum")]
struct Cli {
    /// First pair momentum in GeV/c.
    #[arg(long, default_value_t = 0.05)]
    start: f64,
    /// Exclusive upper pair momentum in GeV/c.
    #[arg(long, default_value_t = 0.6)]
    end: f64,
    /// Momentum increment in GeV/c.
    #[arg(long, default_value_t = 0.05)]
    step: f64,
    /// Parameter file: r0, mu, width, depth, x_min, y_min, x_max, y_max.
    #[arg(long)]
    params: Option<PathBuf>,
    /// Deuteron Wigner-function grid (.json or .csv).
    #[arg(long)]
    deuteron: Option<PathBuf>,
    /// TOML physics configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// CSV output path.
    #[arg(long, default_value = "wignersim.csv")]
    out: PathBuf,
    /// Optional canonical JSON report.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Use adaptive reference quadrature instead of the fixed grid.
    #[arg(long)]
    reference: bool,
    /// Label appended to formula binding names and to rejected-update log messages.
    #[arg(long)]
    label: Option<String>,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => PhysicsConfig::load(path)?,
        None => PhysicsConfig::default(),
    };
    if cli.reference {
        config = config.with_mode(IntegrationMode::Reference);
    }
    let plan = ScanPlan::new(cli.start, cli.end, cli.step)?;

    let mut source = WignerSource::new(config)?;
    if let Some(label) = cli.label {
        source = source.with_label(label);
    }
    if let Some(path) = &cli.params {
        let rejected = SourceSettings::load(path)?.apply(&mut source);
        for err in &rejected {
            log::warn!("keeping prior value: {err}");
        }
    }
    if let Some(path) = &cli.deuteron {
        source = source.with_deuteron(Arc::new(DeuteronGrid::load(path)?));
    }

    let report = run_scan(&mut source, &plan)?;
    write_csv(&cli.out, &report.rows)?;
    log::info!("wrote {} rows to {}", report.rows.len(), cli.out.display());
    if let Some(path) = &cli.json {
        write_json(path, &report)?;
        log::info!("wrote report {} (scan hash {})", path.display(), report.scan_hash);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wignersim: {err}");
            ExitCode::FAILURE
        }
    }
}
