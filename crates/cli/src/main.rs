//! stickygrid CLI
//!
//! Command-line driver for the sticky grid layout engine.
//!
//! Builds a uniform grid from the configuration, runs layout cycles at the
//! requested scroll offsets and prints the resulting geometry as JSON.

mod config;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::Config;
use serde::Serialize;
use std::cell::Cell;
use std::path::PathBuf;
use std::time::Instant;
use stickygrid_core_layout::{
    CellCoord, EdgeInsets, Point, Rect, RefreshPolicy, ScrollState, Size, SizeProvider,
    StickyGridLayout, UniformSizes,
};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "stickygrid")]
#[command(author, version, about = "Inspect sticky grid layouts")]
struct Cli {
    /// Config file to use instead of the standard locations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured refresh policy
    #[arg(long, value_enum, global = true)]
    policy: Option<PolicyArg>,

    /// Override the configured number of sticky rows
    #[arg(long, global = true)]
    sticky_rows: Option<usize>,

    /// Override the configured number of sticky columns
    #[arg(long, global = true)]
    sticky_columns: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the total content size of the grid
    Extent,
    /// Print the frame and layer of one cell
    Frame {
        /// Row index
        #[arg(short, long)]
        row: usize,
        /// Column index
        #[arg(long)]
        column: usize,
        #[command(flatten)]
        scroll: ScrollArgs,
    },
    /// List every cell intersecting the viewport
    Visible {
        #[command(flatten)]
        scroll: ScrollArgs,
    },
    /// Scroll step by step and report how much work each policy does
    Simulate {
        /// Number of scroll ticks
        #[arg(short, long, default_value = "100")]
        steps: usize,
        /// Vertical scroll per tick in pixels
        #[arg(short, long, default_value = "250", allow_hyphen_values = true)]
        delta: f64,
    },
}

#[derive(Args)]
struct ScrollArgs {
    /// Horizontal scroll offset in pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    scroll_x: f64,
    /// Vertical scroll offset in pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    scroll_y: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Recompute every frame on every cycle
    Eager,
    /// Recompute only sticky cells near the viewport
    VisibleWindow,
}

impl From<PolicyArg> for RefreshPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Eager => RefreshPolicy::Eager,
            PolicyArg::VisibleWindow => RefreshPolicy::VisibleWindow,
        }
    }
}

/// Uniform sizes that count the queries made by the layout.
struct CountingSizes {
    inner: UniformSizes,
    queries: Cell<u64>,
}

impl CountingSizes {
    fn new(inner: UniformSizes) -> Self {
        Self {
            inner,
            queries: Cell::new(0),
        }
    }
}

impl SizeProvider for CountingSizes {
    fn size(&self, row: usize, column: usize) -> Size {
        self.queries.set(self.queries.get() + 1);
        self.inner.size(row, column)
    }

    fn insets(&self, row: usize) -> EdgeInsets {
        self.inner.insets(row)
    }

    fn interitem_spacing(&self, row: usize) -> f64 {
        self.inner.interitem_spacing(row)
    }
}

#[derive(Serialize)]
struct SimulationReport {
    policy: RefreshPolicy,
    steps: usize,
    full_passes: u64,
    size_queries: u64,
    final_offset: Point,
    content_extent: Size,
    elapsed_ms: f64,
}

/// Settings resolved from the config file and command-line overrides.
struct Settings {
    config: Config,
    policy: RefreshPolicy,
}

impl Settings {
    fn layout<S: SizeProvider>(&self, sizes: S) -> StickyGridLayout<S> {
        let mut layout =
            StickyGridLayout::with_policy(sizes, self.config.grid_shape(), self.policy);
        layout.set_sticky(self.config.sticky_config());
        layout
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for log level)
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load().unwrap_or_else(|e| {
            // Can't use tracing yet, fall back to eprintln
            eprintln!("Failed to load configuration: {}. Using defaults.", e);
            Config::default()
        }),
    };

    let log_level = match config.behavior.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // default fallback for invalid values
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Validate and clamp config values
    let config_warnings = config.validate();
    for w in &config_warnings {
        warn!("Config: {} - {}", w.field, w.message);
    }

    if let Some(rows) = cli.sticky_rows {
        config.sticky.rows = i64::try_from(rows)?;
    }
    if let Some(columns) = cli.sticky_columns {
        config.sticky.columns = i64::try_from(columns)?;
    }
    let policy = cli
        .policy
        .map(RefreshPolicy::from)
        .unwrap_or_else(|| config.layout.policy.into());

    debug!(
        rows = config.grid.rows,
        columns = config.grid.columns,
        ?policy,
        "grid configured"
    );
    let settings = Settings { config, policy };

    match cli.command {
        Commands::Extent => {
            let mut layout = settings.layout(settings.config.sizes());
            print_json(&layout.content_extent())?;
        }
        Commands::Frame {
            row,
            column,
            scroll,
        } => {
            let mut layout = settings.layout(settings.config.sizes());
            let viewport = scrolled(&settings.config, &scroll);
            layout.prepare(&viewport);
            let attrs = layout.attributes(CellCoord::new(row, column))?;
            print_json(&attrs)?;
        }
        Commands::Visible { scroll } => {
            let mut layout = settings.layout(settings.config.sizes());
            let viewport = scrolled(&settings.config, &scroll);
            layout.prepare(&viewport);
            let visible = Rect::from_origin_size(viewport.offset, viewport.size);
            print_json(&layout.frames_intersecting(visible))?;
        }
        Commands::Simulate { steps, delta } => {
            if !delta.is_finite() {
                bail!("scroll delta must be a finite number, got {}", delta);
            }
            let report = simulate(&settings, steps, delta);
            print_json(&report)?;
        }
    }

    Ok(())
}

fn scrolled(config: &Config, scroll: &ScrollArgs) -> ScrollState {
    let mut viewport = config.scroll_state();
    viewport.scroll_to(scroll.scroll_x, scroll.scroll_y);
    viewport
}

/// Scroll down `steps` times by `delta`, wrapping at the end of the content.
fn simulate(settings: &Settings, steps: usize, delta: f64) -> SimulationReport {
    let sizes = CountingSizes::new(settings.config.sizes());
    let mut layout = settings.layout(&sizes);
    let mut viewport = settings.config.scroll_state();

    let started = Instant::now();
    layout.prepare(&viewport);
    let max_scroll = (layout.content_extent().height - viewport.size.height).max(0.0);

    for _ in 0..steps {
        viewport.scroll_by(0.0, delta);
        if viewport.offset.y > max_scroll || viewport.offset.y < 0.0 {
            viewport.offset.y = 0.0;
        }
        layout.prepare(&viewport);
    }
    let elapsed = started.elapsed();

    info!(
        steps,
        full_passes = layout.generation(),
        size_queries = sizes.queries.get(),
        "simulation finished in {:?}",
        elapsed
    );

    SimulationReport {
        policy: settings.policy,
        steps,
        full_passes: layout.generation(),
        size_queries: sizes.queries.get(),
        final_offset: viewport.offset,
        content_extent: layout.content_extent(),
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
