//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads or generates the point set
//! - drives a `FitSession` for the chosen command
//! - prints reports/plots and writes optional exports

use clap::Parser;
use tracing::warn;

use crate::cli::{Command, DataArgs, FitArgs};
use crate::domain::{DataSource, SampleDomain, SessionConfig, SyntheticSpec};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `lsq` binary.
pub fn run() -> Result<(), AppError> {
    // We want `lsq` and `lsq -f points.csv` to behave like `lsq tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    init_line_logging(&args.data)?;
    let config = session_config_from_args(&args.data)?;
    let mut opened = pipeline::open_session(&config)?;
    warn_skipped_rows(&opened);

    let session = &mut opened.session;
    session.set_degree(args.degree)?;
    if !args.select.is_empty() {
        session.set_selection(args.select.iter().copied())?;
    }

    println!(
        "{}",
        crate::report::format_session_summary(session, &opened.stats, &opened.source_label)
    );
    println!("{}", crate::report::format_point_table(session));

    if !args.no_plot {
        println!("{}", crate::plot::render_ascii_plot(session, args.width, args.height));
    }

    // Optional exports.
    if let Some(path) = &args.export_json {
        crate::io::export::write_snapshot_json(path, session)?;
    }
    if let Some(path) = &args.export_csv {
        crate::io::export::write_errors_csv(path, session)?;
    }

    Ok(())
}

fn handle_sweep(args: DataArgs) -> Result<(), AppError> {
    init_line_logging(&args)?;
    let config = session_config_from_args(&args)?;
    let opened = pipeline::open_session(&config)?;
    warn_skipped_rows(&opened);

    let scores = crate::fit::sweep_degrees(opened.session.points(), opened.session.max_degree());
    println!("Data: {} (n={})", opened.source_label, opened.stats.n_points);
    println!("{}", crate::report::format_sweep(&scores, opened.session.formatter()));
    Ok(())
}

fn handle_tui(args: DataArgs) -> Result<(), AppError> {
    if let Some(path) = &args.log_file {
        crate::logging::init_file(path)?;
    }
    let config = session_config_from_args(&args)?;
    crate::tui::run(&config)
}

fn init_line_logging(args: &DataArgs) -> Result<(), AppError> {
    match &args.log_file {
        Some(path) => crate::logging::init_file(path),
        None => {
            crate::logging::init_stderr();
            Ok(())
        }
    }
}

fn warn_skipped_rows(opened: &pipeline::OpenedSession) {
    if opened.skipped_rows > 0 {
        warn!(skipped = opened.skipped_rows, "some input rows were skipped");
        eprintln!("Skipped {} unusable input row(s).", opened.skipped_rows);
    }
}

pub fn session_config_from_args(args: &DataArgs) -> Result<SessionConfig, AppError> {
    let source = match (&args.file, args.synthetic) {
        (Some(path), _) => DataSource::Csv(path.clone()),
        (None, Some(count)) => DataSource::Synthetic(SyntheticSpec {
            count,
            seed: args.seed,
            x_min: args.x_min,
            x_max: args.x_max,
            true_coefficients: args.true_coeffs.clone(),
            noise: args.noise,
        }),
        (None, None) => DataSource::Reference,
    };

    let domain = match (args.domain_min, args.domain_max) {
        (Some(lo), Some(hi)) => {
            if !(lo.is_finite() && hi.is_finite() && hi > lo) {
                return Err(AppError::new(3, "Sampling domain must satisfy domain-min < domain-max."));
            }
            Some(SampleDomain::new(lo, hi, args.samples))
        }
        _ => None,
    };

    Ok(SessionConfig {
        source,
        max_degree: args.max_degree,
        domain,
        samples: args.samples,
        keep_zero_terms: args.keep_zero_terms,
    })
}

/// Rewrite argv so `lsq` defaults to `lsq tui`.
///
/// Rules:
/// - `lsq`                      -> `lsq tui`
/// - `lsq -f points.csv ...`    -> `lsq tui -f points.csv ...`
/// - `lsq --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "sweep" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_means_tui() {
        assert_eq!(rewrite_args(argv(&["lsq"])), argv(&["lsq", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["lsq", "-f", "p.csv"])),
            argv(&["lsq", "tui", "-f", "p.csv"])
        );
        assert_eq!(rewrite_args(argv(&["lsq", "--help"])), argv(&["lsq", "--help"]));
        assert_eq!(rewrite_args(argv(&["lsq", "sweep"])), argv(&["lsq", "sweep"]));
    }

    #[test]
    fn config_resolves_sources() {
        let parse = |args: &[&str]| {
            let cli = Cli::try_parse_from(args).unwrap();
            let Command::Sweep(data) = cli.command else {
                panic!("expected sweep");
            };
            session_config_from_args(&data).unwrap()
        };

        assert_eq!(parse(&["lsq", "sweep"]).source, DataSource::Reference);
        assert!(matches!(parse(&["lsq", "sweep", "-f", "p.csv"]).source, DataSource::Csv(_)));

        let synthetic = parse(&["lsq", "sweep", "--synthetic", "12", "--seed", "3", "--keep-zero-terms"]);
        let DataSource::Synthetic(spec) = synthetic.source else {
            panic!("expected synthetic");
        };
        assert_eq!((spec.count, spec.seed), (12, 3));
        assert!(synthetic.keep_zero_terms);
        assert!(synthetic.domain.is_none());
    }

    #[test]
    fn inverted_domain_is_rejected() {
        let cli = Cli::try_parse_from(["lsq", "sweep", "--domain-min", "5", "--domain-max", "1"]).unwrap();
        let Command::Sweep(data) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(session_config_from_args(&data).unwrap_err().exit_code(), 3);
    }
}
