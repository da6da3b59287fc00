//! Numerical tolerances for conformal algebra computations.
//!
//! This module provides the [`CgaConfig`] struct which centralizes the
//! thresholds used when projecting null vectors back to Euclidean space,
//! validating unit parameters and verifying transformation properties.
//!
//! # Example
//!
//! ```
//! use conformal_versors::CgaConfig;
//!
//! // Use default tolerances
//! let config = CgaConfig::default();
//!
//! // Tighter thresholds for verification runs
//! let strict = CgaConfig::strict().with_verification_eps(1e-12);
//! assert!(strict.validate().is_ok());
//! ```

use crate::error::{CgaError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numerical tolerances for the algebra.
///
/// # Thresholds
///
/// - `infinity_eps`: below this homogeneous weight a null vector may be the point at infinity.
/// - `weight_ratio_eps`: the weight must also be below this fraction of the
///   largest grade-1 coefficient, so that a small but well-resolved weight
///   still projects to a finite point.
/// - `unit_eps`: allowed deviation when checking `B² = -1` for rotation planes.
/// - `verification_eps`: default tolerance of the verification harness.
/// - `prune_eps`: coefficients below this are treated as zero when classifying.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CgaConfig {
    /// Threshold on `|w| = |N·∞|` for [`ConformalPoint::Infinity`](crate::ConformalPoint::Infinity).
    pub infinity_eps: f64,

    /// Threshold on `|w| / max|Nᵢ|` over the grade-1 coefficients.
    pub weight_ratio_eps: f64,

    /// Tolerance when validating unit vectors and unit planes.
    pub unit_eps: f64,

    /// Default tolerance for fixed point and order checks.
    pub verification_eps: f64,

    /// Coefficients below this magnitude are considered zero.
    pub prune_eps: f64,
}

impl Default for CgaConfig {
    fn default() -> Self {
        Self {
            infinity_eps: 1e-9,
            weight_ratio_eps: 1e-12,
            unit_eps: 1e-9,
            verification_eps: 1e-9,
            prune_eps: 1e-12,
        }
    }
}

impl CgaConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold is not a finite positive number.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("infinity_eps", self.infinity_eps),
            ("weight_ratio_eps", self.weight_ratio_eps),
            ("unit_eps", self.unit_eps),
            ("verification_eps", self.verification_eps),
            ("prune_eps", self.prune_eps),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CgaError::invalid_config(format!(
                    "{name} must be finite and positive"
                )));
            }
        }
        if self.prune_eps > self.infinity_eps {
            return Err(CgaError::invalid_config(
                "prune_eps must not exceed infinity_eps",
            ));
        }
        Ok(())
    }

    /// Preset for verification of exact constructions.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            infinity_eps: 1e-12,
            weight_ratio_eps: 1e-15,
            unit_eps: 1e-12,
            verification_eps: 1e-12,
            prune_eps: 1e-15,
        }
    }

    /// Preset for long chains of composed versors where rounding accumulates.
    #[must_use]
    pub fn loose() -> Self {
        Self {
            infinity_eps: 1e-6,
            weight_ratio_eps: 1e-10,
            unit_eps: 1e-6,
            verification_eps: 1e-6,
            prune_eps: 1e-10,
        }
    }

    /// Set the point-at-infinity threshold.
    #[must_use]
    pub const fn with_infinity_eps(mut self, eps: f64) -> Self {
        self.infinity_eps = eps;
        self
    }

    /// Set the relative point-at-infinity threshold.
    #[must_use]
    pub const fn with_weight_ratio_eps(mut self, eps: f64) -> Self {
        self.weight_ratio_eps = eps;
        self
    }

    /// Set the unit-parameter tolerance.
    #[must_use]
    pub const fn with_unit_eps(mut self, eps: f64) -> Self {
        self.unit_eps = eps;
        self
    }

    /// Set the verification tolerance.
    #[must_use]
    pub const fn with_verification_eps(mut self, eps: f64) -> Self {
        self.verification_eps = eps;
        self
    }
}
