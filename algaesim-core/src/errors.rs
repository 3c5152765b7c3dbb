use thiserror::Error;

/// Error type for invalid operations.
///
/// Only static configuration problems are surfaced. Numeric edge cases inside the model
/// (non-positive irradiance, vanishing attenuation, cardinal-temperature boundaries) are
/// clamped where they occur and never reach the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgaeSimError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: String, reason: String },
    #[error("Simulation has already completed after {0} days")]
    AlreadyCompleted(usize),
}

impl AlgaeSimError {
    /// Shorthand for an [`AlgaeSimError::InvalidConfiguration`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AlgaeSimError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if the error refers to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            AlgaeSimError::InvalidConfiguration { field, .. } => Some(field),
            AlgaeSimError::AlreadyCompleted(_) => None,
        }
    }
}

/// Convenience type for `Result<T, AlgaeSimError>`.
pub type AlgaeSimResult<T> = Result<T, AlgaeSimError>;

/// Fail with an [`AlgaeSimError::InvalidConfiguration`] unless `value` is finite and positive.
pub(crate) fn ensure_positive(field: &str, value: f64) -> AlgaeSimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AlgaeSimError::invalid(
            field,
            format!("must be a finite value greater than zero, got {}", value),
        ))
    }
}

/// Fail unless `value` is finite and within `[min, max]`.
pub(crate) fn ensure_within(field: &str, value: f64, min: f64, max: f64) -> AlgaeSimResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(AlgaeSimError::invalid(
            field,
            format!("must be within [{}, {}], got {}", min, max, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert!(ensure_positive("depth", 0.3).is_ok());
        assert!(ensure_positive("depth", 0.0).is_err());
        assert!(ensure_positive("depth", -1.0).is_err());
        assert!(ensure_positive("depth", f64::NAN).is_err());
    }

    #[test]
    fn error_reports_offending_field() {
        let err = ensure_within("discount_factor", 1.5, 0.0, 1.0).unwrap_err();
        assert_eq!(err.field(), Some("discount_factor"));
        assert!(err.to_string().contains("discount_factor"));
        assert!(err.to_string().contains("1.5"));
    }
}
