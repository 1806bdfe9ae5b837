//! Least-squares polynomial fit for a single degree.
//!
//! Given points `(x_i, y_i)` and a degree `d`, we build the Vandermonde design
//! matrix with columns `x^d … x^0` and solve
//!
//! ```text
//! minimize Σ (y_i - p(x_i))^2
//! ```
//!
//! The returned coefficients are highest power first, matching `math::poly`.

use nalgebra::{DMatrix, DVector};

use crate::domain::Point;
use crate::error::FitError;
use crate::math::{SolveFailure, evaluate, fill_vandermonde_row, solve_least_squares};

/// Lowest degree the fitter accepts.
pub const MIN_DEGREE: usize = 1;

/// Fit a polynomial of `degree` to `points`.
///
/// Fails with `InvalidDegree` for degree 0 and with `DegenerateFit` when the
/// points cannot determine a unique polynomial (degree ≥ N, or too few distinct
/// x values).
pub fn fit(points: &[Point], degree: usize) -> Result<Vec<f64>, FitError> {
    let n = points.len();
    if degree < MIN_DEGREE {
        return Err(FitError::InvalidDegree {
            degree,
            max_degree: n.saturating_sub(1).max(MIN_DEGREE),
        });
    }
    if degree >= n {
        return Err(FitError::DegenerateFit {
            degree,
            n_points: n,
            reason: "degree must be below the number of points",
        });
    }

    let p = degree + 1;
    let mut x = DMatrix::<f64>::zeros(n, p);
    let mut y = DVector::<f64>::zeros(n);
    let mut row = vec![0.0; p];

    for (i, point) in points.iter().enumerate() {
        fill_vandermonde_row(point.x, degree, &mut row);
        for (j, &v) in row.iter().enumerate() {
            x[(i, j)] = v;
        }
        y[i] = point.y;
    }

    let beta = solve_least_squares(&x, &y).map_err(|failure| FitError::DegenerateFit {
        degree,
        n_points: n,
        reason: match failure {
            SolveFailure::RankDeficient { .. } => "not enough distinct x values",
            SolveFailure::NonFinite => "solution is not finite",
        },
    })?;

    Ok(beta.iter().copied().collect())
}

/// Squared residual `(p(x_i) - y_i)^2` for every point.
pub fn squared_errors(points: &[Point], coefficients: &[f64]) -> Vec<f64> {
    points
        .iter()
        .map(|p| {
            let r = evaluate(coefficients, p.x) - p.y;
            r * r
        })
        .collect()
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
    fn linear_fit_matches_closed_form() {
        let points = reference();
        let coeffs = fit(&points, 1).unwrap();

        // Closed-form OLS line: slope = Sxy / Sxx, intercept = ȳ - slope·x̄.
        let slope = 86.2 / 40.8;
        let intercept = 7.2 - slope * 4.8;
        assert_eq!(coeffs.len(), 2);
        assert!((coeffs[0] - slope).abs() < 1e-9);
        assert!((coeffs[1] - intercept).abs() < 1e-9);
    }

    #[test]
    fn recovers_exact_quadratic() {
        let points: Vec<Point> = (0..8)
            .map(|i| {
                let x = i as f64 * 0.5 - 1.0;
                Point::new(x, 3.0 * x * x - 2.0 * x + 0.25)
            })
            .collect();
        let coeffs = fit(&points, 2).unwrap();
        for (got, want) in coeffs.iter().zip([3.0, -2.0, 0.25]) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn full_degree_interpolates() {
        let points = reference();
        let coeffs = fit(&points, 4).unwrap();
        assert_eq!(coeffs.len(), 5);
        let sse: f64 = squared_errors(&points, &coeffs).iter().sum();
        assert!(sse < 1e-12, "interpolating fit should have ~0 error, got {sse}");
    }

    #[test]
    fn rejects_degree_zero() {
        let err = fit(&reference(), 0).unwrap_err();
        assert!(matches!(err, FitError::InvalidDegree { degree: 0, .. }));
    }

    #[test]
    fn degree_at_or_above_point_count_is_degenerate() {
        let points = reference();
        assert!(matches!(
            fit(&points, 5),
            Err(FitError::DegenerateFit { degree: 5, n_points: 5, .. })
        ));
        assert!(matches!(fit(&[], 1), Err(FitError::DegenerateFit { .. })));
    }

    #[test]
    fn identical_x_values_are_degenerate() {
        let points = vec![Point::new(2.0, 1.0), Point::new(2.0, 3.0), Point::new(2.0, 5.0)];
        assert!(matches!(fit(&points, 1), Err(FitError::DegenerateFit { .. })));
    }

    #[test]
    fn too_few_distinct_x_values_are_degenerate() {
        // Two distinct x values cannot pin down a quadratic.
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 1.0),
        ];
        assert!(fit(&points, 1).is_ok());
        assert!(matches!(fit(&points, 2), Err(FitError::DegenerateFit { .. })));
    }

    #[test]
    fn squared_errors_are_per_point() {
        let points = vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0), Point::new(2.0, 7.0)];
        // y = 2x + 1 -> residuals 0, 2, -2
        let errors = squared_errors(&points, &[2.0, 1.0]);
        assert_eq!(errors, vec![0.0, 4.0, 4.0]);
    }
}
