//! Shared "open a session" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load or generate points -> resolve sampling domain -> start the session
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::info;

use crate::data::{generate_points, reference_points};
use crate::domain::{DataSource, PlotBounds, SampleDomain, SessionConfig};
use crate::error::AppError;
use crate::io::ingest::{DatasetStats, load_points};
use crate::report::formula::ZeroTerms;
use crate::session::FitSession;

/// A started session plus what the front-ends show about its data.
#[derive(Debug, Clone)]
pub struct OpenedSession {
    pub session: FitSession,
    pub stats: DatasetStats,
    /// Human-readable data source, e.g. `reference` or `points.csv`.
    pub source_label: String,
    /// Input rows that were skipped during ingest.
    pub skipped_rows: usize,
}

/// Load the configured points and start a session at degree 1.
pub fn open_session(config: &SessionConfig) -> Result<OpenedSession, AppError> {
    let (points, source_label, skipped_rows) = match &config.source {
        DataSource::Reference => (reference_points(), "reference".to_string(), 0),
        DataSource::Csv(path) => {
            let ingested = load_points(path)?;
            (ingested.points, path.display().to_string(), ingested.row_errors.len())
        }
        DataSource::Synthetic(spec) => (
            generate_points(spec)?,
            format!("synthetic (n={}, seed={})", spec.count, spec.seed),
            0,
        ),
    };

    let domain = config.domain.unwrap_or_else(|| {
        PlotBounds::from_points(&points)
            .map(|b| b.sample_domain(config.samples))
            .unwrap_or(SampleDomain::default())
    });
    let zero_terms = if config.keep_zero_terms {
        ZeroTerms::Keep
    } else {
        ZeroTerms::Skip
    };

    let stats = DatasetStats::from_points(&points);
    let session = FitSession::with_options(points, config.max_degree, domain, zero_terms)?;
    info!(source = %source_label, n_points = stats.n_points, "session opened");

    Ok(OpenedSession {
        session,
        stats,
        source_label,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SyntheticSpec;

    #[test]
    fn reference_session_samples_the_plot_window() {
        let opened = open_session(&SessionConfig::default()).unwrap();
        assert_eq!(opened.source_label, "reference");
        assert_eq!(opened.stats.n_points, 5);

        // Reference x spans [1, 9]; the window adds 1 on each side.
        let domain = opened.session.domain();
        assert_eq!((domain.x_min, domain.x_max, domain.count), (0.0, 10.0, 100));
    }

    #[test]
    fn synthetic_session_uses_explicit_domain() {
        let config = SessionConfig {
            source: DataSource::Synthetic(SyntheticSpec {
                count: 25,
                seed: 9,
                x_min: -2.0,
                x_max: 2.0,
                true_coefficients: vec![1.0, 0.0, -1.0],
                noise: 0.1,
            }),
            max_degree: 6,
            domain: Some(SampleDomain::new(-3.0, 3.0, 7)),
            samples: 7,
            keep_zero_terms: true,
        };
        let opened = open_session(&config).unwrap();
        assert_eq!(opened.session.points().len(), 25);
        assert_eq!(opened.session.max_degree(), 6);
        assert_eq!(opened.session.display_state().curve_samples.len(), 7);
        assert!(opened.source_label.starts_with("synthetic"));
    }

    #[test]
    fn zero_max_degree_is_rejected() {
        let config = SessionConfig {
            max_degree: 0,
            ..SessionConfig::default()
        };
        let err = open_session(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
