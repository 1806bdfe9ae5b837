//! Interactive fitting session.
//!
//! `FitSession` owns a fixed point set and reacts to two events:
//!
//! - `set_degree(d)`: refit, recompute the per-point squared errors and the formula
//! - `set_selection(S)`: re-aggregate the cached errors over `S`
//!
//! Every event either commits completely or leaves the session untouched, and
//! returns a fresh `DisplayState`. Front-ends never hold fitting state of their own.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{DisplayState, Point, SampleDomain};
use crate::error::FitError;
use crate::fit::{MIN_DEGREE, fit, squared_errors};
use crate::math::evaluate;
use crate::report::formula::{FormulaFormatter, ZeroTerms};

/// Padding added to the degree-1 total error to size an error axis.
const ERROR_SCALE_HEADROOM: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct FitSession {
    points: Vec<Point>,
    max_degree: usize,
    domain: SampleDomain,
    formatter: FormulaFormatter,

    degree: usize,
    coefficients: Vec<f64>,
    errors: Vec<f64>,
    formula: String,
    selection: BTreeSet<usize>,

    linear_total_error: f64,
}

impl FitSession {
    /// Start a session at degree 1 with an empty selection.
    ///
    /// Fails if `max_degree` is 0 or the initial linear fit is degenerate.
    pub fn new(points: Vec<Point>, max_degree: usize) -> Result<Self, FitError> {
        Self::with_options(points, max_degree, SampleDomain::default(), ZeroTerms::default())
    }

    pub fn with_options(
        points: Vec<Point>,
        max_degree: usize,
        domain: SampleDomain,
        zero_terms: ZeroTerms,
    ) -> Result<Self, FitError> {
        if max_degree < MIN_DEGREE {
            return Err(FitError::InvalidDegree {
                degree: MIN_DEGREE,
                max_degree,
            });
        }

        let formatter = FormulaFormatter::new().zero_terms(zero_terms);
        let coefficients = fit(&points, MIN_DEGREE)?;
        let errors = squared_errors(&points, &coefficients);
        let formula = formatter.format(&coefficients);
        let linear_total_error: f64 = errors.iter().sum();

        debug!(n_points = points.len(), max_degree, %formula, "session started");

        Ok(Self {
            points,
            max_degree,
            domain,
            formatter,
            degree: MIN_DEGREE,
            coefficients,
            errors,
            formula,
            selection: BTreeSet::new(),
            linear_total_error,
        })
    }

    /// Refit at `degree`.
    ///
    /// Out-of-range degrees and degenerate fits leave the session unchanged.
    pub fn set_degree(&mut self, degree: usize) -> Result<DisplayState, FitError> {
        if !(MIN_DEGREE..=self.max_degree).contains(&degree) {
            return Err(FitError::InvalidDegree {
                degree,
                max_degree: self.max_degree,
            });
        }

        let coefficients = fit(&self.points, degree)?;
        let errors = squared_errors(&self.points, &coefficients);
        let formula = self.formatter.format(&coefficients);

        self.degree = degree;
        self.coefficients = coefficients;
        self.errors = errors;
        self.formula = formula;

        debug!(
            degree,
            formula = %self.formula,
            total_error = self.total_error(),
            selected_error = self.selected_error(),
            "degree changed"
        );
        Ok(self.display_state())
    }

    /// Move the degree by `delta`, clamped to `[1, max_degree]`.
    pub fn step_degree(&mut self, delta: isize) -> Result<DisplayState, FitError> {
        let target = self
            .degree
            .saturating_add_signed(delta)
            .clamp(MIN_DEGREE, self.max_degree);
        self.set_degree(target)
    }

    /// Replace the selection.
    ///
    /// Any out-of-range index rejects the whole selection.
    pub fn set_selection<I>(&mut self, indices: I) -> Result<DisplayState, FitError>
    where
        I: IntoIterator<Item = usize>,
    {
        let n_points = self.points.len();
        let mut selection = BTreeSet::new();
        for index in indices {
            if index >= n_points {
                return Err(FitError::InvalidSelection { index, n_points });
            }
            selection.insert(index);
        }

        self.selection = selection;
        debug!(
            selected = self.selection.len(),
            selected_error = self.selected_error(),
            "selection changed"
        );
        Ok(self.display_state())
    }

    /// Add `index` to the selection, or remove it if already selected.
    pub fn toggle_point(&mut self, index: usize) -> Result<DisplayState, FitError> {
        let mut next = self.selection.clone();
        if !next.remove(&index) {
            next.insert(index);
        }
        self.set_selection(next)
    }

    pub fn select_all(&mut self) -> Result<DisplayState, FitError> {
        self.set_selection(0..self.points.len())
    }

    pub fn clear_selection(&mut self) -> Result<DisplayState, FitError> {
        self.set_selection(std::iter::empty())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Squared error per point, in point order.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// The formatter behind `formula`, for rendering other coefficient sets the same way.
    pub fn formatter(&self) -> &FormulaFormatter {
        &self.formatter
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    pub fn domain(&self) -> SampleDomain {
        self.domain
    }

    pub fn total_error(&self) -> f64 {
        self.errors.iter().sum()
    }

    /// Error over the selection; an empty or complete selection means the whole dataset.
    pub fn selected_error(&self) -> f64 {
        if self.selection.is_empty() || self.selection.len() == self.points.len() {
            return self.total_error();
        }
        self.selection.iter().map(|&i| self.errors[i]).sum()
    }

    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        evaluate(&self.coefficients, x)
    }

    /// Sample the current curve over `domain`.
    pub fn curve_samples(&self, domain: SampleDomain) -> Vec<(f64, f64)> {
        domain.xs().map(|x| (x, self.predict(x))).collect()
    }

    /// Upper limit for an error axis: the degree-1 total error plus fixed headroom.
    ///
    /// Higher degrees never exceed the linear fit's error, so this bound holds for the
    /// whole session.
    pub fn error_scale(&self) -> f64 {
        self.linear_total_error + ERROR_SCALE_HEADROOM
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            degree: self.degree,
            coefficients: self.coefficients.clone(),
            curve_samples: self.curve_samples(self.domain),
            formula: self.formula.clone(),
            total_error: self.total_error(),
            selected_error: self.selected_error(),
        }
    }
}
