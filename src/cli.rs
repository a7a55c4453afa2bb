// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::LayoutMode;

/// Command-line arguments for `dagit-layout`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dagit-layout",
    version,
    about = "Filter a pipeline plan with a graph query and lay it out as a Gaant chart.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    #[arg(long, value_name = "PATH", default_value = "plan.toml")]
    pub plan: String,

    /// Graph query selecting the steps to show (e.g. "++load, clean+*").
    #[arg(long, value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Chart mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Waterfall)]
    pub mode: ModeArg,

    /// Run metadata file (TOML) with step timings, attempts and markers.
    #[arg(long, value_name = "PATH")]
    pub metadata: Option<String>,

    /// Zoom level for the timed chart, 0 (fit) to 100.
    #[arg(long, default_value_t = 0.0)]
    pub zoom: f64,

    /// Viewport width used to zoom-to-fit at zoom 0.
    #[arg(long, value_name = "PX")]
    pub viewport_width: Option<f64>,

    /// Current time in epoch ms. Defaults to the run's exit time, else the
    /// wall clock.
    #[arg(long, value_name = "MS")]
    pub now_ms: Option<i64>,

    /// Hide steps that have not started (timed mode only).
    #[arg(long)]
    pub hide_waiting: bool,

    /// Print step name completions for a partially typed query and exit.
    #[arg(long, value_name = "PARTIAL")]
    pub suggest: Option<String>,

    /// Print query presets derived from the run metadata.
    #[arg(long)]
    pub presets: bool,

    /// Parse + validate, print the plan, but don't lay anything out.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DAGIT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Chart mode as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Flat,
    Waterfall,
    WaterfallTimed,
}

impl From<ModeArg> for LayoutMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Flat => LayoutMode::Flat,
            ModeArg::Waterfall => LayoutMode::Waterfall,
            ModeArg::WaterfallTimed => LayoutMode::WaterfallTimed,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
