//! Synthetic point sets: noisy samples of a known polynomial.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::info;

use crate::domain::{Point, SyntheticSpec};
use crate::error::AppError;
use crate::math::evaluate;

/// Draw `spec.count` points with x uniform in `[x_min, x_max]` and
/// `y = p(x) + N(0, noise²)`, sorted by x.
///
/// The same `SyntheticSpec` (seed included) always yields the same points.
pub fn generate_points(spec: &SyntheticSpec) -> Result<Vec<Point>, AppError> {
    if spec.count == 0 {
        return Err(AppError::new(2, "Synthetic point count must be > 0."));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite() && spec.x_max > spec.x_min) {
        return Err(AppError::new(2, "Invalid x range for synthetic points."));
    }
    if spec.true_coefficients.is_empty() {
        return Err(AppError::new(2, "Synthetic generator needs at least one coefficient."));
    }

    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, "Synthetic noise must be a finite value >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, spec.noise)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let mut points: Vec<Point> = (0..spec.count)
        .map(|_| {
            let x = rng.gen_range(spec.x_min..=spec.x_max);
            let y = evaluate(&spec.true_coefficients, x) + normal.sample(&mut rng);
            Point::new(x, y)
        })
        .collect();
    points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    info!(count = points.len(), seed = spec.seed, "generated synthetic points");
    Ok(points)
}
