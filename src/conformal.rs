//! Conformal embedding of Euclidean points as null vectors.
//!
//! A point `p` is lifted to `up(p) = p + ½|p|² ∞ + o`, which squares to zero.
//! Projection back divides the Euclidean part by the homogeneous weight
//! `w = −(N·∞)`. Multivectors are stored over the null basis, so `w` is the
//! `o` coefficient of `N` and is read exactly even when `½|p|²` is huge.
//!
//! A weight of zero marks the point at infinity, which is returned as
//! [`ConformalPoint::Infinity`] rather than as NaN coordinates. The weight
//! only counts as zero when it is negligible both in absolute terms and
//! next to the other grade-1 coefficients: the inverse of a point close to
//! the origin has a tiny weight but a well-defined position.
//!
//! # Example
//!
//! ```
//! use conformal_versors::{down, up, ConformalPoint, Point};
//!
//! let p = Point::new(1.0, -2.0, 0.5);
//! assert_eq!(down(&up(&p)), ConformalPoint::Finite(p));
//! ```

use approx::AbsDiffEq;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::algebra::Multivector;
use crate::config::CgaConfig;
use crate::error::MappingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Euclidean point.
pub type Point = Point3<f64>;

/// A Euclidean direction or displacement.
pub type Direction = Vector3<f64>;

/// Result of projecting a null vector back to Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConformalPoint {
    /// An ordinary point.
    Finite(Point),
    /// The single point at infinity of the conformal model.
    Infinity,
}

impl ConformalPoint {
    /// The origin.
    #[must_use]
    pub fn origin() -> Self {
        Self::Finite(Point::origin())
    }

    /// Whether this is the point at infinity.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    /// The finite point.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::PointAtInfinity`] for [`ConformalPoint::Infinity`].
    pub fn finite(self) -> Result<Point, MappingError> {
        match self {
            Self::Finite(p) => Ok(p),
            Self::Infinity => Err(MappingError::PointAtInfinity),
        }
    }

    /// Largest component-wise distance to another point.
    ///
    /// Two points at infinity are at distance zero; a finite point is
    /// infinitely far from the point at infinity.
    #[must_use]
    pub fn deviation(&self, other: &Self) -> f64 {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => (a - b).amax(),
            (Self::Infinity, Self::Infinity) => 0.0,
            _ => f64::INFINITY,
        }
    }
}

impl From<Point> for ConformalPoint {
    fn from(p: Point) -> Self {
        Self::Finite(p)
    }
}

impl AbsDiffEq for ConformalPoint {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.deviation(other) <= epsilon
    }
}

/// Lift a Euclidean point to its null vector `p + ½|p|² ∞ + o`.
#[must_use]
pub fn up(p: &Point) -> Multivector {
    let v = p.coords;
    Multivector::vector(&v) + Multivector::infinity().scale(0.5 * v.norm_squared())
        + Multivector::origin()
}

/// Conformal vector of a point, including the point at infinity (`∞`).
#[must_use]
pub fn embed(point: &ConformalPoint) -> Multivector {
    match point {
        ConformalPoint::Finite(p) => up(p),
        ConformalPoint::Infinity => Multivector::infinity(),
    }
}

/// Homogeneous weight `w = −(N·∞)`, the `o` coefficient of `N`; equals 1 for
/// a freshly lifted point.
#[must_use]
pub fn homogeneous_weight(n: &Multivector) -> f64 {
    -n.grade(1).scalar_product(&Multivector::infinity())
}

/// Project a conformal vector back to Euclidean space with default tolerances.
#[must_use]
pub fn down(n: &Multivector) -> ConformalPoint {
    down_with(n, &CgaConfig::default())
}

/// Project a conformal vector back to Euclidean space.
///
/// Returns [`ConformalPoint::Infinity`] when `|w|` is below
/// `config.infinity_eps` and at most `config.weight_ratio_eps` times the
/// largest grade-1 coefficient of `n`.
#[must_use]
pub fn down_with(n: &Multivector, config: &CgaConfig) -> ConformalPoint {
    let w = homogeneous_weight(n);
    let scale = n
        .grade(1)
        .coefficients()
        .iter()
        .fold(0.0, |acc: f64, c| acc.max(c.abs()));
    if w.abs() < config.infinity_eps && w.abs() <= config.weight_ratio_eps * scale {
        debug!(weight = w, scale, "null vector projects to the point at infinity");
        return ConformalPoint::Infinity;
    }
    ConformalPoint::Finite(Point::from(n.euclidean_part() / w))
}
