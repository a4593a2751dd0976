use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use netwatch::config::{Overrides, Settings};
use netwatch::data::duration::format_duration;
use netwatch::data::parse_panels;
use netwatch::probe::{ProbeContext, ProbeRegistry};
use netwatch::ui::{terminal, CanvasSurface};
use netwatch::{events, lifecycle, scheduler, App};

#[derive(Parser, Debug)]
#[command(name = "netwatch")]
#[command(about = "Live telemetry strip charts for a handful of probes")]
struct Args {
    /// Panels to show, as <type:target> (e.g. sine:localhost)
    targets: Vec<String>,

    /// Stretch the window to the full terminal width
    #[arg(long = "fs")]
    full_screen: bool,

    /// Background colour as RRGGBB
    #[arg(long, value_name = "RRGGBB")]
    bg: Option<String>,

    /// Foreground colour as RRGGBB
    #[arg(long, value_name = "RRGGBB")]
    fg: Option<String>,

    /// Run the dashboard in this process instead of relaunching
    #[arg(short, long)]
    foreground: bool,

    /// Optional TOML settings file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the available probe types and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let registry = ProbeRegistry::with_defaults();
    if args.list {
        for (name, about) in registry.describe() {
            println!("{:<10} {}", name, about);
        }
        return Ok(());
    }

    if !args.foreground {
        let code = lifecycle::supervise(std::env::args_os().skip(1).collect())?;
        std::process::exit(code);
    }

    run_worker(&args, &registry)
}

/// Route tracing output to `path`, or discard it so the chart is not overwritten.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}

/// Build the dashboard and run it until the user quits.
fn run_worker(args: &Args, registry: &ProbeRegistry) -> Result<()> {
    let settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    let overrides = Overrides {
        foreground: args.fg.clone().filter(|s| !s.is_empty()),
        background: args.bg.clone().filter(|s| !s.is_empty()),
        full_screen: args.full_screen,
    };
    let (term_width, term_height) = terminal::pixel_size().context("Failed to query terminal size")?;
    let config = settings.resolve(&overrides, term_width)?;

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let (stop_tx, stop_rx) = watch::channel(false);
    let ctx = ProbeContext::new(config.tick_interval, stop_rx.clone());
    let panels = parse_panels(&args.targets, registry, &ctx, config.layout.ring_capacity())?;

    let layout = config.layout;
    let targets: Vec<String> = panels.iter().map(|p| format!("{}:{}", p.kind, p.target)).collect();
    info!(
        "Starting {} panels [{}] at {}x{} px, {} slots each, every {}",
        panels.len(),
        targets.join(", "),
        layout.window_width,
        layout.window_height(panels.len()),
        layout.ring_capacity(),
        format_duration(config.tick_interval)
    );
    if layout.window_height(panels.len()) > term_height {
        warn!(
            "Window needs {} px but the terminal has {}; lower panels are cut off",
            layout.window_height(panels.len()),
            term_height
        );
    }

    let app = App::new(panels, config);
    let surface = CanvasSurface::new(terminal::enter()?);
    let handle = rt.spawn(scheduler::run(app, surface, stop_rx));

    let waited = events::wait_for_quit(|| handle.is_finished());
    let _ = stop_tx.send(true);
    let finished = rt.block_on(handle);

    terminal::restore()?;
    info!("Dashboard closed");

    waited?;
    finished
        .context("Scheduler task failed")?
        .context("Failed to draw to the terminal")?;
    Ok(())
}
