//! Error types for curve calibration.
//!
//! The taxonomy separates construction-time failures
//! ([`CreditError::InvalidSpecification`]), lifecycle misuse
//! ([`CreditError::NotReady`]), and the two solver failure modes
//! ([`CreditError::BracketingFailure`], [`CreditError::NonConvergence`]).
//! None of these are retried; a single node failure aborts the bootstrap.

use credo_core::{CredoError, Date};
use thiserror::Error;

/// A specialized Result type for credit curve operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// Error types for credit curve calibration.
#[derive(Error, Debug, Clone)]
pub enum CreditError {
    /// Malformed construction inputs - fatal, surfaced immediately.
    #[error("Invalid specification: {reason}")]
    InvalidSpecification {
        /// Description of what is inconsistent.
        reason: String,
    },

    /// Method called before required initialization - programming error.
    #[error("Not ready: {reason}")]
    NotReady {
        /// Which initialization step is missing.
        reason: String,
    },

    /// The observed quote is not achievable within the search bracket.
    #[error(
        "Bracketing failure for maturity {maturity}: quote not attainable with hazard rate in [{lower}, {upper}]"
    )]
    BracketingFailure {
        /// Maturity of the offending helper.
        maturity: Date,
        /// Lower bracket bound.
        lower: f64,
        /// Upper bracket bound.
        upper: f64,
    },

    /// The root-finder exhausted its iterations without meeting tolerance.
    #[error(
        "No convergence for maturity {maturity} after {iterations} iterations (best hazard: {best:.6e}, residual: {residual:.2e})"
    )]
    NonConvergence {
        /// Maturity of the offending helper.
        maturity: Date,
        /// Number of iterations attempted.
        iterations: u32,
        /// Best hazard-rate estimate reached.
        best: f64,
        /// Quote error at the best estimate.
        residual: f64,
    },

    /// Valuation failed (degenerate inputs at pricing time).
    #[error("Pricing error: {reason}")]
    Pricing {
        /// Description of what went wrong.
        reason: String,
    },

    /// Underlying date, calendar, or schedule error.
    #[error(transparent)]
    Core(#[from] CredoError),
}

impl CreditError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_specification(reason: impl Into<String>) -> Self {
        Self::InvalidSpecification {
            reason: reason.into(),
        }
    }

    /// Creates a not-ready error.
    #[must_use]
    pub fn not_ready(reason: impl Into<String>) -> Self {
        Self::NotReady {
            reason: reason.into(),
        }
    }

    /// Creates a bracketing failure error.
    #[must_use]
    pub fn bracketing_failure(maturity: Date, lower: f64, upper: f64) -> Self {
        Self::BracketingFailure {
            maturity,
            lower,
            upper,
        }
    }

    /// Creates a non-convergence error.
    #[must_use]
    pub fn non_convergence(maturity: Date, iterations: u32, best: f64, residual: f64) -> Self {
        Self::NonConvergence {
            maturity,
            iterations,
            best,
            residual,
        }
    }

    /// Creates a pricing error.
    #[must_use]
    pub fn pricing(reason: impl Into<String>) -> Self {
        Self::Pricing {
            reason: reason.into(),
        }
    }
}
