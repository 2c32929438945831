//! Error type shared by the library

use thiserror::Error;

/// Errors raised while loading configuration or validating a projection run
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("{field} is invalid (got {value}): {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Interpolating across the interest band needs `upper > lower`
    #[error("interest band is degenerate: upper threshold {upper:.2} must exceed lower threshold {lower:.2}")]
    DegenerateInterestBand { lower: f64, upper: f64 },

    #[error("unknown repayment plan '{0}'")]
    UnknownPlan(String),

    #[error("unknown career track '{0}'")]
    UnknownCareerTrack(String),

    #[error("unknown interest basis '{0}'")]
    UnknownInterestBasis(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        ProjectionError::InvalidParameter { field, value, reason }
    }
}

/// Reject non-finite or negative money amounts
pub(crate) fn check_money(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ProjectionError::invalid(field, value, "must be a finite amount"));
    }
    if value < 0.0 {
        return Err(ProjectionError::invalid(field, value, "must not be negative"));
    }
    Ok(())
}

/// Rates are fractions (0.035 = 3.5%) and must sit in [0, 1]
pub(crate) fn check_rate(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ProjectionError::invalid(field, value, "must be a fraction between 0 and 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_checks() {
        assert!(check_money("balance", 0.0).is_ok());
        assert!(check_money("balance", -1.0).is_err());
        assert!(check_money("balance", f64::NAN).is_err());
        assert!(check_money("balance", f64::INFINITY).is_err());
    }

    #[test]
    fn test_rate_checks() {
        assert!(check_rate("base_rate", 0.0).is_ok());
        assert!(check_rate("base_rate", 1.0).is_ok());
        assert!(check_rate("base_rate", 1.5).is_err());
        assert!(check_rate("base_rate", -0.01).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = check_money("initial_balance", -5.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("initial_balance"), "got: {}", msg);
    }
}
