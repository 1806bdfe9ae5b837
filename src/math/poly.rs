//! Polynomial primitives.
//!
//! Coefficients are always stored highest power first, so a degree-`d`
//! polynomial is `c[0]·x^d + c[1]·x^(d-1) + … + c[d]`.

/// Fill a Vandermonde design row `[x^d, x^(d-1), …, x, 1]`.
///
/// # Panics
/// Panics if `out` does not have length `degree + 1`.
pub fn fill_vandermonde_row(x: f64, degree: usize, out: &mut [f64]) {
    assert_eq!(out.len(), degree + 1, "design row must hold degree + 1 powers");

    // Fill from the constant term upwards to avoid `powi` per cell.
    let mut power = 1.0;
    for slot in out.iter_mut().rev() {
        *slot = power;
        power *= x;
    }
}

/// Evaluate a polynomial with Horner's scheme.
///
/// An empty coefficient slice is the zero polynomial.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Round half away from zero to `decimals` places, mapping `-0.0` to `0.0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // Magnitudes this large carry no fractional digits.
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}
