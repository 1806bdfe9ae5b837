//! Command-line parsing for the least-squares explorer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::DEFAULT_MAX_DEGREE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lsq", version, about = "Interactive polynomial least-squares explorer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one degree, print the formula, per-point errors and a plot.
    Fit(FitArgs),
    /// Print the total squared error for every degree up to `--max-degree`.
    Sweep(DataArgs),
    /// Launch the interactive TUI.
    ///
    /// ←/→ change the degree, ↑/↓ move between points, Space selects a point.
    Tui(DataArgs),
}

/// Where the points come from and how the session is set up.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// CSV file with `x` and `y` columns. Defaults to the built-in reference points.
    #[arg(short = 'f', long, value_name = "CSV", conflicts_with = "synthetic")]
    pub file: Option<PathBuf>,

    /// Generate this many noisy points instead of loading data.
    #[arg(long, value_name = "N")]
    pub synthetic: Option<usize>,

    /// Random seed for synthetic points.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of the synthetic noise.
    #[arg(long, default_value_t = 1.0)]
    pub noise: f64,

    /// Lower x bound for synthetic points.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper x bound for synthetic points.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Generating polynomial for synthetic points, highest power first.
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = [0.3, -2.0, 1.0, 4.0]
    )]
    pub true_coeffs: Vec<f64>,

    /// Highest selectable polynomial degree.
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_DEGREE)]
    pub max_degree: usize,

    /// Number of curve samples.
    #[arg(long, default_value_t = 100)]
    pub samples: usize,

    /// Left end of the curve sampling domain (defaults to the data range plus margin).
    #[arg(long, requires = "domain_max", allow_hyphen_values = true)]
    pub domain_min: Option<f64>,

    /// Right end of the curve sampling domain.
    #[arg(long, requires = "domain_min", allow_hyphen_values = true)]
    pub domain_max: Option<f64>,

    /// Render zero coefficients in the formula (`2x + 0` instead of `2x`).
    #[arg(long)]
    pub keep_zero_terms: bool,

    /// Write logs to this file (the TUI logs nowhere else).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Options for a one-shot fit.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Polynomial degree to fit.
    #[arg(short = 'd', long, default_value_t = 1)]
    pub degree: usize,

    /// Point indices to select, comma separated.
    #[arg(short = 's', long, value_delimiter = ',')]
    pub select: Vec<usize>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the session snapshot (points, selection, display state) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export per-point fitted values and errors to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}
