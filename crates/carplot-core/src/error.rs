use crate::types::Scalar;

/// Caller contract violations. Detected at the boundary of the operation,
/// before any state is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// A per-tire (or per-wheel) sequence has the wrong length.
    ShapeMismatch { what: &'static str, expected: usize, found: usize },
    /// A length/force/velocity ratio that is not a finite positive number.
    InvalidScale { what: &'static str, value: Scalar },
    /// An axis convention flag outside `{1, -1}`.
    UnknownConvention(i32),
}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotError::ShapeMismatch { what, expected, found } => {
                write!(f, "{what}: expected {expected} entries, got {found}")
            }
            PlotError::InvalidScale { what, value } => {
                write!(f, "{what} must be a finite positive number (got {value})")
            }
            PlotError::UnknownConvention(sign) => {
                write!(f, "unknown axis convention {sign} (expected 1 for z-up or -1 for z-down)")
            }
        }
    }
}

impl std::error::Error for PlotError {}

pub fn check_ratio(what: &'static str, value: Scalar) -> Result<Scalar, PlotError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlotError::InvalidScale { what, value })
    }
}

pub fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), PlotError> {
    if expected == found {
        Ok(())
    } else {
        Err(PlotError::ShapeMismatch { what, expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_must_be_positive_and_finite() {
        assert_eq!(check_ratio("r", 2000.0), Ok(2000.0));
        assert!(matches!(check_ratio("r", 0.0), Err(PlotError::InvalidScale { .. })));
        assert!(matches!(check_ratio("r", -1.0), Err(PlotError::InvalidScale { .. })));
        assert!(check_ratio("r", Scalar::NAN).is_err());
        assert!(check_ratio("r", Scalar::INFINITY).is_err());
    }

    #[test]
    fn display_names_the_offender() {
        let e = PlotError::ShapeMismatch { what: "tire forces", expected: 4, found: 3 };
        assert_eq!(e.to_string(), "tire forces: expected 4 entries, got 3");
    }
}
