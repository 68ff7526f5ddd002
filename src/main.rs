use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sysdash::config::{Config, DashboardSettings, load_config, load_config_from_path};
use sysdash::error::DashboardError;
use sysdash::event::{InputController, notice_channel};
use sysdash::lifecycle::{Cancellation, TerminalGuard, watch_signals};
use sysdash::rank::{RankedView, rank_by_cpu, rank_by_ram};
use sysdash::scheduler::FrameScheduler;
use sysdash::system::collector::Collector;
use sysdash::system::snapshot::{MetricsSnapshot, SnapshotBuilder};
use sysdash::ui::theme::{Theme, resolve_color_support};

#[derive(Parser)]
#[command(
    name = "sysdash",
    about = "Live terminal dashboard for CPU, memory, network and top processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Hide the frames-per-second counter
    #[arg(long, default_value_t = false)]
    no_fps: bool,

    /// Rows shown in each process table (1-10)
    #[arg(long)]
    max_rows: Option<usize>,

    /// Interfaces to list: all, up
    #[arg(long)]
    interfaces: Option<String>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `sysdash=trace`. Defaults to RUST_LOG, then `info`.
    #[arg(long)]
    log_level: Option<String>,

    /// Print one snapshot with both rankings as JSON and exit.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    snapshot: &'a MetricsSnapshot,
    top_ram: RankedView,
    top_cpu: RankedView,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(&cli)?;
    let config = load_config_for_cli(&cli);
    let settings = config.settings();

    if cli.json {
        return print_json(settings).await;
    }

    let support = resolve_color_support(&config.colors.color_support);
    let theme = Theme::from_config(&config.colors.theme, support);

    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(err) => {
            ratatui::restore();
            return Err(DashboardError::TerminalInit(err).into());
        }
    };
    let _restore = TerminalGuard::new(ratatui::restore);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let cancel = Cancellation::new();
    let (notice_tx, mut notice_rx) = notice_channel();
    let input = InputController::new(cancel.clone(), settings.quit_key, notice_tx).spawn();
    let signals = tokio::spawn(watch_signals(cancel.clone()));

    let builder = SnapshotBuilder::new(Collector::new(), settings.interface_filter);
    let mut scheduler = FrameScheduler::new(builder, settings, theme, cancel);
    let result = scheduler.run(&mut terminal, &mut notice_rx).await;

    input.abort();
    signals.abort();
    result
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ms) = cli.tick_ms {
        config.general.tick_interval_ms = ms;
    }
    if cli.no_fps {
        config.general.show_fps = false;
    }
    if let Some(rows) = cli.max_rows {
        config.general.max_table_rows = rows;
    }
    if let Some(ref interfaces) = cli.interfaces {
        config.general.interfaces = interfaces.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }
    if let Some(ref support) = cli.color {
        config.colors.color_support = support.clone();
    }

    config
}

/// Two samples one tick apart so CPU usage has a baseline.
async fn print_json(settings: DashboardSettings) -> Result<()> {
    let mut builder = SnapshotBuilder::new(Collector::new(), settings.interface_filter);
    builder.capture();
    tokio::time::sleep(settings.tick_interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;
    let snapshot = builder.capture();

    let report = JsonReport {
        snapshot: &snapshot,
        top_ram: rank_by_ram(&snapshot.processes),
        top_cpu: rank_by_cpu(&snapshot.processes),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
