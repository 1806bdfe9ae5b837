//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the fitting session
//! - exported to JSON/CSV
//! - handed to the terminal front-ends without copying fitting state

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default upper bound for the polynomial degree slider.
pub const DEFAULT_MAX_DEGREE: usize = 4;

/// One observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Evenly spaced x positions at which the fitted curve is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleDomain {
    pub x_min: f64,
    pub x_max: f64,
    pub count: usize,
}

impl SampleDomain {
    pub fn new(x_min: f64, x_max: f64, count: usize) -> Self {
        Self { x_min, x_max, count }
    }

    /// The sample positions, endpoints included. At least two positions are produced.
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.count.max(2);
        (0..n).map(move |i| {
            let u = i as f64 / (n as f64 - 1.0);
            self.x_min + u * (self.x_max - self.x_min)
        })
    }
}

impl Default for SampleDomain {
    /// `linspace(0, 10, 100)`.
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 10.0,
            count: 100,
        }
    }
}

/// Axis window for plotting a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl PlotBounds {
    /// Horizontal margin around the data.
    pub const X_MARGIN: f64 = 1.0;
    /// Vertical margin around the data.
    pub const Y_MARGIN: f64 = 5.0;

    /// Window covering every point plus fixed margins; `None` for an empty or
    /// non-finite point set.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
        if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
            return None;
        }
        Some(Self {
            x: [x_min - Self::X_MARGIN, x_max + Self::X_MARGIN],
            y: [y_min - Self::Y_MARGIN, y_max + Self::Y_MARGIN],
        })
    }

    /// A sampling domain spanning the horizontal extent of the window.
    pub fn sample_domain(&self, count: usize) -> SampleDomain {
        SampleDomain::new(self.x[0], self.x[1], count)
    }
}

/// Everything a display surface needs after an event.
///
/// Always derived from session state; holding one never keeps the session in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub degree: usize,
    pub coefficients: Vec<f64>,
    pub curve_samples: Vec<(f64, f64)>,
    pub formula: String,
    pub total_error: f64,
    pub selected_error: f64,
}

/// Where the point set comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// The five-point dataset the tool has always shipped with.
    Reference,
    /// A CSV file with `x` and `y` columns.
    Csv(PathBuf),
    /// Seeded noisy samples of a known polynomial.
    Synthetic(SyntheticSpec),
}

/// Parameters for generated data.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    pub count: usize,
    pub seed: u64,
    pub x_min: f64,
    pub x_max: f64,
    /// Generating polynomial, highest power first.
    pub true_coefficients: Vec<f64>,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
}

/// Session configuration resolved from CLI arguments.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub source: DataSource,
    pub max_degree: usize,
    /// Curve sampling domain; `None` derives it from the data's plot bounds.
    pub domain: Option<SampleDomain>,
    pub samples: usize,
    pub keep_zero_terms: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Reference,
            max_degree: DEFAULT_MAX_DEGREE,
            domain: None,
            samples: SampleDomain::default().count,
            keep_zero_terms: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domain_is_zero_to_ten() {
        let xs: Vec<f64> = SampleDomain::default().xs().collect();
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert!((xs[99] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn domain_clamps_to_two_samples() {
        let xs: Vec<f64> = SampleDomain::new(1.0, 3.0, 0).xs().collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }

    #[test]
    fn plot_bounds_add_margins() {
        let points = [Point::new(1.0, 1.0), Point::new(9.0, 20.0), Point::new(4.0, -2.0)];
        let bounds = PlotBounds::from_points(&points).unwrap();
        assert_eq!(bounds.x, [0.0, 10.0]);
        assert_eq!(bounds.y, [-7.0, 25.0]);
        assert!(PlotBounds::from_points(&[]).is_none());
    }
}
