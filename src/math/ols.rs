//! Ordinary least squares solver.
//!
//! We solve small, tall problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - Columns are scaled to unit norm before factorizing. Polynomial design
//!   matrices mix `x^0` and `x^d` columns whose magnitudes differ by orders of
//!   magnitude; equilibrating them keeps the singular values comparable.
//! - We use SVD rather than QR. Nalgebra's `QR::solve` is intended for square
//!   systems and will panic for non-square matrices.
//! - Rank is measured against `10 · max(n, p) · ε · σ_max` (the usual
//!   matrix-rank threshold with a little headroom for rounding in the
//!   factorization), and a rank-deficient system is reported instead of solved.

use nalgebra::{DMatrix, DVector};

/// Headroom applied on top of the `max(n, p) · ε · σ_max` rank threshold.
const RANK_TOL_FACTOR: f64 = 10.0;

/// Why a least-squares system could not be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveFailure {
    /// Fewer independent columns than unknowns.
    RankDeficient { rank: usize, columns: usize },
    /// The factorization succeeded but produced non-finite coefficients.
    NonFinite,
}

/// Solve a least squares problem using SVD on a column-equilibrated copy of `x`.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, SolveFailure> {
    let (n, p) = x.shape();

    let mut scaled = x.clone();
    let mut scales = Vec::with_capacity(p);
    for j in 0..p {
        let norm = x.column(j).norm();
        // A zero column stays zero and shows up as a missing rank below.
        let s = if norm > 0.0 && norm.is_finite() { norm } else { 1.0 };
        scaled.column_mut(j).scale_mut(1.0 / s);
        scales.push(s);
    }

    let svd = scaled.svd(true, true);
    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let tol = RANK_TOL_FACTOR * n.max(p) as f64 * f64::EPSILON * sigma_max;

    let rank = if sigma_max > 0.0 { svd.rank(tol) } else { 0 };
    if rank < p {
        return Err(SolveFailure::RankDeficient { rank, columns: p });
    }

    let beta_scaled = svd.solve(y, tol).map_err(|_| SolveFailure::NonFinite)?;
    let beta = DVector::from_iterator(
        p,
        beta_scaled.iter().zip(scales.iter()).map(|(b, s)| b / s),
    );

    if beta.iter().all(|v| v.is_finite()) {
        Ok(beta)
    } else {
        Err(SolveFailure::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_handles_badly_scaled_columns() {
        // y = 1e-6 * t + 4 with t in the millions.
        let ts = [1.0e6, 2.0e6, 3.0e6, 5.0e6];
        let mut data = Vec::new();
        let mut ys = Vec::new();
        for &t in &ts {
            data.push(t);
            data.push(1.0);
            ys.push(1e-6 * t + 4.0);
        }
        let x = DMatrix::from_row_slice(ts.len(), 2, &data);
        let y = DVector::from_row_slice(&ys);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 1e-6).abs() < 1e-12);
        assert!((beta[1] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn least_squares_reports_collinear_columns() {
        // Second column is exactly twice the first.
        let x = DMatrix::from_row_slice(3, 2, &[3.0, 6.0, 4.0, 8.0, 0.0, 0.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);

        let err = solve_least_squares(&x, &y).unwrap_err();
        assert_eq!(err, SolveFailure::RankDeficient { rank: 1, columns: 2 });
    }

    #[test]
    fn least_squares_reports_zero_matrix() {
        let x = DMatrix::<f64>::zeros(3, 2);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);

        let err = solve_least_squares(&x, &y).unwrap_err();
        assert_eq!(err, SolveFailure::RankDeficient { rank: 0, columns: 2 });
    }
}
