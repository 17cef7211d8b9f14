//! # PSU Panel Binary
//!
//! Runs the bench power supply operator panel against a configured I/O driver.
//!
//! # Usage
//!
//! ```bash
//! # Simulation driver, default config
//! psu_panel
//!
//! # Real card
//! psu_panel --config /etc/psu/power_supply.toml --driver pcidas1602_16
//!
//! # Verbose logging, JSON output, no stdin commands
//! psu_panel -v --json --no-console
//! ```

#![deny(warnings)]

use clap::Parser;
use psu_common::config::ConfigLoader;
use psu_common::consts::DEFAULT_CONFIG_PATH;
use psu_common::panel::config::PanelConfig;
use psu_hal::DriverRegistry;
use psu_panel::console::{ConsolePresenter, spawn_stdin_reader};
use psu_panel::event::{PanelEvent, spawn_ticker};
use psu_panel::panel::Panel;
use std::path::PathBuf;
use std::sync::mpsc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// PSU Panel - operator panel for a programmable bench power supply
#[derive(Parser, Debug)]
#[command(name = "psu_panel")]
#[command(version)]
#[command(about = "Operator panel for a programmable bench power supply")]
#[command(long_about = None)]
struct Args {
    /// Path to the panel configuration (power_supply.toml)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Driver to load, overriding the configured one
    #[arg(short, long)]
    driver: Option<String>,

    /// Do not read commands from stdin
    #[arg(long)]
    no_console: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs and panel state in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("Panel startup failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_tracing(&args);

    info!("PSU panel v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = PanelConfig::load(&args.config)?;
    if let Some(ref driver) = args.driver {
        info!("Driver from CLI: {}", driver);
        config.driver = driver.clone();
    }
    info!("Loaded configuration from {}", args.config.display());

    let registry = DriverRegistry::with_builtin_drivers();
    info!("Available drivers: {:?}", registry.list_drivers());
    let mut panel = Panel::start(config, &registry)?;

    let (tx, mut rx) = mpsc::channel();

    let shutdown = tx.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        let _ = shutdown.send(PanelEvent::Shutdown);
    })?;

    let _ticker = spawn_ticker(tx.clone(), panel.tick_period());
    let _console = (!args.no_console).then(|| spawn_stdin_reader(tx.clone()));
    drop(tx);

    let mut presenter = ConsolePresenter::new(std::io::stdout(), args.json);
    let summary = panel.run(&mut rx, &mut presenter);
    info!(
        "Handled {} events: {} rotations, {} presses, {} ticks, {} failures",
        summary.events, summary.rotations, summary.presses, summary.ticks, summary.failures
    );

    if let Err(e) = panel.persist(&args.config) {
        warn!("Failed to persist knob settings: {}", e);
    }
    if let Err(e) = panel.shutdown() {
        warn!("Driver shutdown failed: {}", e);
    }

    info!("PSU panel shutdown complete");
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
///
/// Logs go to stderr; stdout carries panel state.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
