//! Construction of transformation versors from semantic parameters.
//!
//! Every conformal transformation of 3D space is represented by a versor `V`
//! acting on points through the sandwich product `V X ~V`.
//!
//! | Constructor | Versor | Action on points |
//! |-------------|--------|------------------|
//! | [`Versor::identity`] | `1` | none |
//! | [`Versor::inversion`] | `e+ = ½∞ − o` | inversion in the unit sphere |
//! | [`Versor::involution`] | `E0 = ∞∧o` | `p ↦ −p` |
//! | [`Versor::dilation`] | `exp(−½ ln k · E0)` | `p ↦ k p` |
//! | [`Versor::translation`] | `exp(½ ∞d)` | `p ↦ p + d` |
//! | [`Versor::reflection`] | `m` | mirror in the plane through the origin with normal `m` |
//! | [`Versor::rotation`] | `exp(−θ/2 · B)` | rotation by `θ` in the plane `B` |
//! | [`Versor::poloidal`] | see below | order-4 cycle `d → 0 → −d → ∞ → d` |
//!
//! # Poloidal transform
//!
//! The 3D analogue of the Möbius map `(z − 1)/(z + 1)`. It is built as
//! `T(d) · S(2) · (inversion · reflection(d)) · T(d)`, which applied
//! right to left translates by `d`, mirrors in the plane orthogonal to `d`,
//! inverts in the unit sphere, doubles and translates by `d` again. The
//! two anti-conformal steps cancel, the unit circle orthogonal to `d` stays
//! fixed and the fourth power acts as the identity.

use std::ops::Mul;

use nalgebra::Vector3;

use crate::algebra::{exp_elliptic, exp_hyperbolic, exp_parabolic, Multivector, Parity};
use crate::config::CgaConfig;
use crate::conformal::Direction;
use crate::error::{AlgebraError, CgaError, MappingError, Result};
use crate::sandwich::compose;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A multivector in the role of a transformation.
///
/// Only produced by the constructors below, by products of versors and by
/// [`Versor::reverse`], [`Versor::inverse`] and [`Versor::lerp`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Versor(Multivector);

impl Versor {
    /// The identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self(Multivector::one())
    }

    /// Inversion in the unit sphere, `e+ = ½∞ − o`.
    ///
    /// Swaps the origin and the point at infinity; fixes the unit sphere.
    #[must_use]
    pub fn inversion() -> Self {
        Self(Multivector::infinity().scale(0.5) - Multivector::origin())
    }

    /// Point reflection through the origin, `E0 = ∞∧o`.
    #[must_use]
    pub fn involution() -> Self {
        Self(Multivector::origin_infinity_plane())
    }

    /// Uniform scaling about the origin by `k`.
    ///
    /// # Errors
    ///
    /// Returns [`CgaError::InvalidParameter`] unless `k` is finite and positive.
    pub fn dilation(k: f64) -> Result<Self> {
        if !k.is_finite() || k <= 0.0 {
            return Err(CgaError::invalid_parameter(format!(
                "dilation factor must be finite and positive, got {k}"
            )));
        }
        Ok(Self(exp_hyperbolic(
            &Multivector::origin_infinity_plane(),
            -0.5 * k.ln(),
        )))
    }

    /// Translation by `d`.
    #[must_use]
    pub fn translation(d: &Direction) -> Self {
        let generator = Multivector::infinity() * Multivector::vector(d);
        Self(exp_parabolic(&generator.scale(0.5)))
    }

    /// Reflection in the plane through the origin with normal `m`.
    ///
    /// `m` is normalized before use.
    ///
    /// # Errors
    ///
    /// Returns [`CgaError::InvalidParameter`] for a zero or non-finite normal.
    pub fn reflection(m: &Direction) -> Result<Self> {
        let m = unit_direction(m, "reflection normal")?;
        Ok(Self(Multivector::vector(&m)))
    }

    /// Rotation by `angle` in `plane`, which must be a bivector with `plane² = −1`.
    ///
    /// # Errors
    ///
    /// Returns [`CgaError::InvalidParameter`] if `plane` is not such a bivector.
    pub fn rotation(plane: &Multivector, angle: f64) -> Result<Self> {
        Self::rotation_with(plane, angle, &CgaConfig::default())
    }

    /// [`Versor::rotation`] with an explicit tolerance for the plane check.
    ///
    /// # Errors
    ///
    /// Returns [`CgaError::InvalidParameter`] if `plane` is not a bivector
    /// squaring to `−1` within `config.unit_eps`.
    pub fn rotation_with(plane: &Multivector, angle: f64, config: &CgaConfig) -> Result<Self> {
        if !(*plane - plane.grade(2)).is_zero(config.unit_eps) {
            return Err(CgaError::invalid_parameter(
                "rotation plane must be a pure bivector",
            ));
        }
        if !(*plane * *plane + Multivector::one()).is_zero(config.unit_eps) {
            return Err(CgaError::invalid_parameter(
                "rotation plane must square to -1",
            ));
        }
        Ok(Self(exp_elliptic(plane, -0.5 * angle)))
    }

    /// Right-handed rotation by `angle` about `axis`.
    ///
    /// The plane is the Euclidean dual `axis · e123`.
    ///
    /// # Errors
    ///
    /// Returns [`CgaError::InvalidParameter`] for a zero or non-finite axis.
    pub fn rotation_about_axis(axis: &Direction, angle: f64) -> Result<Self> {
        let axis = unit_direction(axis, "rotation axis")?;
        let plane = Multivector::vector(&axis) * Multivector::euclidean_pseudoscalar();
        Self::rotation(&plane, angle)
    }

    /// The order-4 poloidal transform about the unit axis `direction`.
    ///
    /// Cycles `d → 0 → −d → ∞ → d` and fixes the unit circle orthogonal to `d`.
    ///
    /// # Errors
    ///
    /// Returns [`CgaError::InvalidParameter`] for a zero or non-finite direction.
    pub fn poloidal(direction: &Direction) -> Result<Self> {
        let d = unit_direction(direction, "poloidal axis")?;
        let translate = Self::translation(&d);
        let flip = compose(&[Self::inversion(), Self::reflection(&d)?]);
        Ok(compose(&[translate, Self::dilation(2.0)?, flip, translate]))
    }

    /// Rotation by `angle` in the mixed plane `d∧e+`.
    ///
    /// At `angle = π/2` this cycles `0 → d → ∞ → −d → 0`, the inverse cycle of
    /// [`Versor::poloidal`]; at `angle = π/4` it has order 8.
    ///
    /// # Errors
    ///
    /// Returns [`CgaError::InvalidParameter`] for a zero or non-finite direction.
    pub fn poloidal_rotor(direction: &Direction, angle: f64) -> Result<Self> {
        let d = unit_direction(direction, "poloidal axis")?;
        let plane = Multivector::vector(&d).outer(&Versor::inversion().0);
        Self::rotation(&plane, angle)
    }

    /// The underlying multivector.
    #[must_use]
    pub const fn as_multivector(&self) -> &Multivector {
        &self.0
    }

    /// Unwrap into the underlying multivector.
    #[must_use]
    pub const fn into_multivector(self) -> Multivector {
        self.0
    }

    /// Grade parity: even versors are conformal, odd ones anti-conformal.
    ///
    /// Coefficients below [`CgaConfig::prune_eps`] are ignored.
    #[must_use]
    pub fn parity(&self) -> Option<Parity> {
        self.0.parity_with(CgaConfig::default().prune_eps)
    }

    /// Reversion `~V`.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self(self.0.reverse())
    }

    /// Inverse `~V / (V ~V)`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NonInvertible`] when `V ~V` is numerically zero.
    pub fn inverse(&self) -> Result<Self> {
        let norm_squared = self.0.norm_squared();
        if norm_squared.abs() < CgaConfig::default().prune_eps {
            return Err(MappingError::NonInvertible { norm_squared }.into());
        }
        Ok(Self(self.0.reverse().scale(1.0 / norm_squared)))
    }

    /// Coefficient-wise interpolation `(1 − t) a + t b`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::ParityMismatch`] unless both versors have the
    /// same parity.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> std::result::Result<Self, AlgebraError> {
        match (a.parity(), b.parity()) {
            (Some(pa), Some(pb)) if pa == pb => Ok(Self(a.0.scale(1.0 - t) + b.0.scale(t))),
            _ => Err(AlgebraError::ParityMismatch),
        }
    }
}

impl Default for Versor {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Versor {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0.product(&rhs.0))
    }
}

impl AsRef<Multivector> for Versor {
    fn as_ref(&self) -> &Multivector {
        &self.0
    }
}

impl From<Versor> for Multivector {
    fn from(v: Versor) -> Self {
        v.0
    }
}

/// Normalize a direction, rejecting zero and non-finite input.
pub(crate) fn unit_direction(d: &Direction, what: &str) -> Result<Direction> {
    let norm = d.norm();
    if !norm.is_finite() || norm < CgaConfig::default().unit_eps {
        return Err(CgaError::invalid_parameter(format!(
            "{what} must be a finite nonzero vector"
        )));
    }
    Ok(Vector3::new(d.x / norm, d.y / norm, d.z / norm))
}
