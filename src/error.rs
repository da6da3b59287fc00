//! Error types for conformal algebra operations.
//!
//! Errors are split by who is at fault:
//!
//! - [`AlgebraError`]: structural misuse of the algebra (a bad blade mask, a
//!   blade name from the wrong basis). These indicate a bug in the caller.
//! - [`MappingError`]: geometric degeneracies that are a property of the
//!   input, such as a point sent to infinity. Callers are expected to branch
//!   on these.
//!
//! [`CgaError`] wraps both, together with parameter and configuration
//! validation failures.

use thiserror::Error;

/// Structural errors in the blade algebra.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// Blade mask outside the 32-blade range.
    #[error("Invalid blade index {index}: masks must be below 32")]
    InvalidBladeIndex { index: usize },

    /// A blade name mixed in a generator from the null basis.
    #[error("Signature mismatch: generator '{symbol}' belongs to the null basis, blades use e+/e-")]
    SignatureMismatch { symbol: char },

    /// A blade name that could not be parsed.
    #[error("Invalid blade name: {name}")]
    InvalidBladeName { name: String },

    /// The bivector does not square to a scalar, so no closed-form exponential exists.
    #[error("Bivector is not simple: its square has non-scalar part {residual}")]
    NonSimpleBivector { residual: f64 },

    /// Two versors of different parity were combined coefficient-wise.
    #[error("Parity mismatch: versors must both be even or both be odd")]
    ParityMismatch,
}

/// Degenerate geometric outcomes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// A finite point was required but the mapping produced the point at infinity.
    #[error("Point is at infinity")]
    PointAtInfinity,

    /// The scalar self-product is negative, so the magnitude is not real.
    #[error("Non-real magnitude: scalar part of A*~A is {squared}")]
    NonRealMagnitude { squared: f64 },

    /// The versor has (near) zero norm and cannot be inverted.
    #[error("Versor is not invertible: norm squared is {norm_squared}")]
    NonInvertible { norm_squared: f64 },
}

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum CgaError {
    /// Structural algebra misuse.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    /// Degenerate geometric outcome.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A versor constructor was given an unusable parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem failure while building the directory index.
    #[cfg(feature = "index")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON failure while building the directory index.
    #[cfg(feature = "index")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for conformal algebra operations.
pub type Result<T> = std::result::Result<T, CgaError>;

impl CgaError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this error is a recoverable geometric degeneracy.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }
}
