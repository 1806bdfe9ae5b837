//! Error types.
//!
//! Two layers:
//!
//! - `FitError`: the fitting engine's contract violations and numeric failures.
//!   Every variant is recoverable; a session that returned one stays usable.
//! - `AppError`: what the `lsq` binary reports, carrying a process exit code.

/// Failures reported by the fitter and by `FitSession` events.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Requested degree is outside `[1, max_degree]`.
    #[error("Polynomial degree {degree} is outside the allowed range [1, {max_degree}].")]
    InvalidDegree { degree: usize, max_degree: usize },

    /// The point set cannot determine a unique polynomial of this degree.
    #[error("Degree {degree} fit over {n_points} point(s) is degenerate: {reason}.")]
    DegenerateFit {
        degree: usize,
        n_points: usize,
        reason: &'static str,
    },

    /// A selected index does not refer to a point.
    #[error("Selected index {index} is out of range for {n_points} point(s).")]
    InvalidSelection { index: usize, n_points: usize },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::InvalidDegree { .. } | FitError::InvalidSelection { .. } => 3,
            FitError::DegenerateFit { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        let degree: AppError = FitError::InvalidDegree { degree: 9, max_degree: 4 }.into();
        assert_eq!(degree.exit_code(), 3);
        assert!(degree.to_string().contains("[1, 4]"));

        let degenerate: AppError = FitError::DegenerateFit {
            degree: 3,
            n_points: 2,
            reason: "degree must be below the number of points",
        }
        .into();
        assert_eq!(degenerate.exit_code(), 4);

        let selection: AppError = FitError::InvalidSelection { index: 7, n_points: 5 }.into();
        assert_eq!(selection.exit_code(), 3);
        assert!(selection.to_string().contains("index 7"));
    }
}
