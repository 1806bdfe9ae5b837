//! Human-readable polynomial formulas.
//!
//! Coefficients (highest power first) are rendered term by term:
//!
//! - every coefficient is rounded to 2 decimal places first
//! - a negative term folds its sign into the joiner (`x - 3`, never `x + -3`)
//! - the leading term has no `+`; a negative leading term starts with `-`
//! - a unit multiplier is dropped for `x` powers (`x^2`, not `1x^2`)
//! - power 1 renders as `x` and power 0 as the bare constant
//!
//! `[1.0, -2.0, 0.5]` renders as `x^2 - 2x + 0.5`.

use crate::math::round_to;

/// Decimal places kept in rendered coefficients.
pub const FORMULA_DECIMALS: i32 = 2;

/// What to do with terms whose coefficient rounds to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroTerms {
    /// Leave them out (`2x`). An all-zero polynomial renders as `0`.
    #[default]
    Skip,
    /// Render every power (`2x + 0`).
    Keep,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaFormatter {
    zero_terms: ZeroTerms,
}

impl FormulaFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zero_terms(mut self, policy: ZeroTerms) -> Self {
        self.zero_terms = policy;
        self
    }

    pub fn format(&self, coefficients: &[f64]) -> String {
        let Some(degree) = coefficients.len().checked_sub(1) else {
            return "0".to_string();
        };

        let mut out = String::new();
        for (i, &raw) in coefficients.iter().enumerate() {
            let power = degree - i;
            let c = round_to(raw, FORMULA_DECIMALS);
            if c == 0.0 && self.zero_terms == ZeroTerms::Skip {
                continue;
            }

            let body = term_body(c.abs(), power);
            match (out.is_empty(), c < 0.0) {
                (true, true) => {
                    out.push('-');
                    out.push_str(&body);
                }
                (true, false) => out.push_str(&body),
                (false, true) => {
                    out.push_str(" - ");
                    out.push_str(&body);
                }
                (false, false) => {
                    out.push_str(" + ");
                    out.push_str(&body);
                }
            }
        }

        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

/// Format with the default policy.
pub fn format_formula(coefficients: &[f64]) -> String {
    FormulaFormatter::new().format(coefficients)
}

fn term_body(magnitude: f64, power: usize) -> String {
    let number = format!("{magnitude}");
    match power {
        0 => number,
        1 if magnitude == 1.0 => "x".to_string(),
        1 => format!("{number}x"),
        _ if magnitude == 1.0 => format!("x^{power}"),
        _ => format!("{number}x^{power}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_literal_cases() {
        assert_eq!(format_formula(&[2.0, 0.0]), "2x");
        assert_eq!(format_formula(&[1.0, -3.0]), "x - 3");
        assert_eq!(format_formula(&[-1.0, 0.0, 5.0]), "-x^2 + 5");
        assert_eq!(format_formula(&[0.5]), "0.5");
        assert_eq!(format_formula(&[1.0, -2.0, 0.5]), "x^2 - 2x + 0.5");
    }

    #[test]
    fn rounds_before_rendering() {
        assert_eq!(format_formula(&[2.112_745, -2.941_176]), "2.11x - 2.94");
        // Rounds to exactly one, so the multiplier disappears.
        assert_eq!(format_formula(&[0.999, 0.0, 1.004]), "x^2 + 1");
        // Rounds to zero, so the term disappears.
        assert_eq!(format_formula(&[3.0, 0.004, -7.25]), "3x^2 - 7.25");
    }

    #[test]
    fn negative_leading_term_has_no_space() {
        assert_eq!(format_formula(&[-2.5, 1.0]), "-2.5x + 1");
        assert_eq!(format_formula(&[-1.0, -1.0]), "-x - 1");
    }

    #[test]
    fn unit_constant_keeps_its_digit() {
        assert_eq!(format_formula(&[4.0, 1.0]), "4x + 1");
        assert_eq!(format_formula(&[4.0, -1.0]), "4x - 1");
    }

    #[test]
    fn higher_powers_keep_exponents() {
        assert_eq!(format_formula(&[0.01, -1.0, 2.0, 0.0, 3.5]), "0.01x^4 - x^3 + 2x^2 + 3.5");
    }

    #[test]
    fn all_zero_and_empty_render_zero() {
        assert_eq!(format_formula(&[0.0, 0.001, -0.002]), "0");
        assert_eq!(format_formula(&[]), "0");
    }

    #[test]
    fn huge_coefficients_stay_finite() {
        let txt = format_formula(&[1.0e307, 2.0]);
        assert!(!txt.contains("inf"), "got {txt}");
        assert!(txt.ends_with("x + 2"));
        assert_eq!(txt, format!("{}x + 2", 1.0e307));
    }

    #[test]
    fn keep_policy_renders_every_power() {
        let f = FormulaFormatter::new().zero_terms(ZeroTerms::Keep);
        assert_eq!(f.format(&[2.0, 0.0]), "2x + 0");
        assert_eq!(f.format(&[-1.0, 0.0, 5.0]), "-x^2 + 0x + 5");
        assert_eq!(f.format(&[0.0, -0.001]), "0x + 0");
    }
}
