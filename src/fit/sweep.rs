//! Degree sweep: fit every admissible degree and report its total error.
//!
//! Each degree is an independent least-squares problem, so the sweep is
//! evaluated in parallel and then put back in degree order.

use rayon::prelude::*;

use crate::domain::Point;
use crate::error::FitError;
use crate::fit::fitter::{MIN_DEGREE, fit, squared_errors};

/// Outcome of fitting one degree.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeScore {
    pub degree: usize,
    /// Coefficients and total squared error, or why the degree could not be fit.
    pub outcome: Result<(Vec<f64>, f64), FitError>,
}

impl DegreeScore {
    pub fn total_error(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|(_, sse)| *sse)
    }
}

/// Fit degrees `1..=max_degree`, ordered by degree.
///
/// Degrees at or above the point count are all degenerate; only the first of
/// them is fit and reported, standing for the rest.
pub fn sweep_degrees(points: &[Point], max_degree: usize) -> Vec<DegreeScore> {
    let n = points.len();
    let last_fittable = max_degree.min(n.saturating_sub(1));

    let mut scores: Vec<DegreeScore> = (MIN_DEGREE..=last_fittable)
        .into_par_iter()
        .map(|degree| score_degree(points, degree))
        .collect();

    let first_degenerate = n.max(MIN_DEGREE);
    if first_degenerate <= max_degree {
        scores.push(score_degree(points, first_degenerate));
    }
    scores
}

fn score_degree(points: &[Point], degree: usize) -> DegreeScore {
    let outcome = fit(points, degree).map(|coefficients| {
        let sse: f64 = squared_errors(points, &coefficients).iter().sum();
        (coefficients, sse)
    });
    DegreeScore { degree, outcome }
}

/// Lowest-error degree among the successful fits, ties broken by lower degree.
pub fn best_degree(scores: &[DegreeScore]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for score in scores {
        let Some(sse) = score.total_error() else {
            continue;
        };
        match best {
            Some((_, best_sse)) if sse >= best_sse => {}
            _ => best = Some((score.degree, sse)),
        }
    }
    best.map(|(degree, _)| degree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Vec<Point> {
        [(1.0, 1.0), (3.0, 6.0), (4.0, 1.0), (7.0, 8.0), (9.0, 20.0)]
            .into_iter()
            .map(Point::from)
            .collect()
    }

    #[test]
    fn sweep_is_ordered_and_non_increasing() {
        let scores = sweep_degrees(&reference(), 4);
        let degrees: Vec<usize> = scores.iter().map(|s| s.degree).collect();
        assert_eq!(degrees, vec![1, 2, 3, 4]);

        let errors: Vec<f64> = scores.iter().map(|s| s.total_error().unwrap()).collect();
        for pair in errors.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-9, "error increased: {pair:?}");
        }
    }

    #[test]
    fn sweep_reports_degenerate_degrees() {
        let scores = sweep_degrees(&reference(), 6);
        assert_eq!(scores.len(), 5);
        assert!(scores[3].outcome.is_ok());
        assert!(matches!(scores[4].outcome, Err(FitError::DegenerateFit { degree: 5, n_points: 5, .. })));
    }

    #[test]
    fn huge_max_degree_stops_at_the_point_count() {
        let scores = sweep_degrees(&reference(), usize::MAX);
        let degrees: Vec<usize> = scores.iter().map(|s| s.degree).collect();
        assert_eq!(degrees, vec![1, 2, 3, 4, 5]);
        assert_eq!(best_degree(&scores), Some(4));

        let empty = sweep_degrees(&[], 3);
        assert_eq!(empty.len(), 1);
        assert!(matches!(empty[0].outcome, Err(FitError::DegenerateFit { degree: 1, n_points: 0, .. })));
    }

    #[test]
    fn best_degree_skips_failures() {
        let scores = vec![
            DegreeScore { degree: 1, outcome: Ok((vec![1.0, 0.0], 4.0)) },
            DegreeScore { degree: 2, outcome: Ok((vec![1.0, 0.0, 0.0], 2.0)) },
            DegreeScore { degree: 3, outcome: Ok((vec![0.0, 1.0, 0.0, 0.0], 2.0)) },
            DegreeScore {
                degree: 4,
                outcome: Err(FitError::DegenerateFit { degree: 4, n_points: 4, reason: "x" }),
            },
        ];
        assert_eq!(best_degree(&scores), Some(2));
        assert_eq!(best_degree(&[]), None);
    }
}
