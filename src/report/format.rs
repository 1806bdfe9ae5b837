//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting/session code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::error::FitError;
use crate::fit::sweep::{DegreeScore, best_degree};
use crate::io::ingest::DatasetStats;
use crate::report::formula::FormulaFormatter;
use crate::session::FitSession;

/// Format the session summary (dataset stats + current fit + error split).
pub fn format_session_summary(session: &FitSession, stats: &DatasetStats, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== lsq - Least Squares Fit ===\n");
    out.push_str(&format!("Data: {source}\n"));
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
    ));

    out.push_str(&format!("\nDegree: {} (max {})\n", session.degree(), session.max_degree()));
    out.push_str(&format!("Formula: {}\n", session.formula()));
    out.push_str(&format!("Coefficients: {}\n", fmt_vec(session.coefficients())));

    out.push_str(&format!("\nTotal squared error: {:.6}\n", session.total_error()));
    let selected = if session.selection().is_empty() {
        "none".to_string()
    } else {
        let ids: Vec<String> = session.selection().iter().map(|i| i.to_string()).collect();
        ids.join(", ")
    };
    out.push_str(&format!(
        "Selected ({selected}) squared error: {:.6}\n",
        session.selected_error()
    ));

    out
}

/// Format the per-point table. Selected rows are marked with `*`.
pub fn format_point_table(session: &FitSession) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<3} {:>6} {:>12} {:>12} {:>12} {:>14}\n",
            "", "index", "x", "y", "fitted", "squared_error"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<3} {:-<6} {:-<12} {:-<12} {:-<12} {:-<14}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (i, (p, err)) in session.points().iter().zip(session.errors()).enumerate() {
        let mark = if session.is_selected(i) { "*" } else { "" };
        out.push_str(
            format!(
                "{mark:<3} {i:>6} {:>12.4} {:>12.4} {:>12.4} {:>14.6}\n",
                p.x,
                p.y,
                session.predict(p.x),
                err,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format a degree sweep. The lowest-error degree is marked with `*`.
///
/// A trailing entry for a degree at or above the point count stands for every
/// higher degree and is labelled `d+`.
pub fn format_sweep(scores: &[DegreeScore], formatter: &FormulaFormatter) -> String {
    let best = best_degree(scores);
    let mut out = String::new();

    out.push_str("Degree sweep:\n");
    for score in scores {
        let chosen = if Some(score.degree) == best { "*" } else { " " };
        match &score.outcome {
            Ok((coefficients, sse)) => out.push_str(&format!(
                "{chosen} degree {:<3} SSE={:<14.6} {}\n",
                score.degree,
                sse,
                formatter.format(coefficients)
            )),
            Err(err) => {
                let label = match err {
                    FitError::DegenerateFit { degree, n_points, .. } if degree >= n_points => {
                        format!("{degree}+")
                    }
                    _ => score.degree.to_string(),
                };
                out.push_str(&format!("  degree {label:<3} (skipped) {err}\n"));
            }
        }
    }

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_points;
    use crate::domain::{Point, SampleDomain};
    use crate::report::formula::ZeroTerms;

    fn session() -> FitSession {
        FitSession::new(reference_points(), 4).unwrap()
    }

    #[test]
    fn summary_mentions_formula_and_errors() {
        let mut s = session();
        s.set_selection([0, 2]).unwrap();
        let stats = DatasetStats::from_points(s.points());

        let txt = format_session_summary(&s, &stats, "reference");
        assert!(txt.contains("Data: reference\n"));
        assert!(txt.contains("Points: n=5 | x=[1.000, 9.000] | y=[1.000, 20.000]\n"));
        assert!(txt.contains("Degree: 1 (max 4)\n"));
        assert!(txt.contains("Formula: 2.11x - 2.94\n"));
        assert!(txt.contains("Selected (0, 2) squared error: "));
    }

    #[test]
    fn summary_reports_empty_selection() {
        let s = session();
        let stats = DatasetStats::from_points(s.points());
        let txt = format_session_summary(&s, &stats, "reference");
        assert!(txt.contains("Selected (none) squared error: "));
    }

    #[test]
    fn point_table_marks_selection() {
        let mut s = session();
        s.set_selection([1]).unwrap();
        let txt = format_point_table(&s);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[2].starts_with("         0"));
        assert!(lines[3].starts_with("*        1"));
    }

    #[test]
    fn sweep_marks_best_and_skipped() {
        let scores = vec![
            DegreeScore { degree: 1, outcome: Ok((vec![2.0, 0.0], 5.0)) },
            DegreeScore { degree: 2, outcome: Ok((vec![1.0, -3.0, 0.5], 1.0)) },
            DegreeScore {
                degree: 3,
                outcome: Err(FitError::DegenerateFit {
                    degree: 3,
                    n_points: 3,
                    reason: "degree must be below the number of points",
                }),
            },
        ];
        let txt = format_sweep(&scores, &FormulaFormatter::new());
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "Degree sweep:");
        assert!(lines[1].starts_with("  degree 1"));
        assert!(lines[1].ends_with("2x"));
        assert!(lines[2].starts_with("* degree 2"));
        assert!(lines[2].ends_with("x^2 - 3x + 0.5"));
        assert!(lines[3].starts_with("  degree 3+"));
        assert!(lines[3].contains("(skipped)"));
    }

    #[test]
    fn sweep_follows_the_zero_term_policy() {
        let scores = vec![DegreeScore { degree: 2, outcome: Ok((vec![1.0, 0.0, 0.0], 0.0)) }];

        let kept = format_sweep(&scores, &FormulaFormatter::new().zero_terms(ZeroTerms::Keep));
        assert!(kept.lines().nth(1).unwrap().ends_with("x^2 + 0x + 0"));

        let skipped = format_sweep(&scores, &FormulaFormatter::new());
        assert!(skipped.lines().nth(1).unwrap().ends_with("x^2"));
    }

    #[test]
    fn sweep_uses_the_session_formatter() {
        let points: Vec<Point> = (0..6).map(|i| Point::new(i as f64, (i * i) as f64)).collect();
        let session = FitSession::with_options(points, 2, SampleDomain::default(), ZeroTerms::Keep).unwrap();
        let scores = crate::fit::sweep_degrees(session.points(), session.max_degree());

        let txt = format_sweep(&scores, session.formatter());
        assert!(txt.lines().nth(2).unwrap().ends_with("x^2 + 0x + 0"), "got {txt}");
    }
}
