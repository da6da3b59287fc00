//! General multivectors of the 5D conformal algebra.
//!
//! A [`Multivector`] stores one coefficient per null-basis blade in a fixed
//! 32-slot array indexed by blade mask. All operations return fresh values.
//!
//! Keeping `o` and `∞` as stored generators means the homogeneous weight of
//! a conformal point is a single coefficient. It is never recovered as the
//! difference of two large numbers.
//!
//! # Operators
//!
//! | Operator | Method |
//! |----------|--------|
//! | `a + b` | coefficient-wise sum |
//! | `a - b` | coefficient-wise difference |
//! | `-a` | `a.scale(-1.0)` |
//! | `a * s`, `s * a` | [`Multivector::scale`] |
//! | `a * b` | [`Multivector::product`] |
//! | `a ^ b` | [`Multivector::outer`] |

use std::ops::{Add, BitXor, Index, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::Vector3;

use super::blade::{swap_sign, BasisBlade, BLADE_COUNT, PRODUCT_TABLE};
use crate::error::MappingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grade parity of a homogeneous-parity multivector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    /// Only grades 0, 2, 4.
    Even,
    /// Only grades 1, 3, 5.
    Odd,
}

/// A weighted sum of basis blades.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Multivector {
    /// Coefficients indexed by blade mask.
    coefficients: [f64; BLADE_COUNT],
}

impl Default for Multivector {
    fn default() -> Self {
        Self::zero()
    }
}

impl Multivector {
    /// Create a multivector from its coefficients in mask order.
    #[must_use]
    pub const fn from_coefficients(coefficients: [f64; BLADE_COUNT]) -> Self {
        Self { coefficients }
    }

    /// The zero multivector.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            coefficients: [0.0; BLADE_COUNT],
        }
    }

    /// The scalar `1`.
    #[must_use]
    pub const fn one() -> Self {
        Self::scalar(1.0)
    }

    /// A pure scalar.
    #[must_use]
    pub const fn scalar(s: f64) -> Self {
        let mut coefficients = [0.0; BLADE_COUNT];
        coefficients[0] = s;
        Self { coefficients }
    }

    /// A single basis blade with unit coefficient.
    #[must_use]
    pub const fn basis(blade: BasisBlade) -> Self {
        let mut coefficients = [0.0; BLADE_COUNT];
        coefficients[blade.index()] = 1.0;
        Self { coefficients }
    }

    /// A Euclidean vector `x e1 + y e2 + z e3`.
    #[must_use]
    pub fn vector(v: &Vector3<f64>) -> Self {
        let mut coefficients = [0.0; BLADE_COUNT];
        for (blade, &c) in BasisBlade::EUCLIDEAN.iter().zip(v.iter()) {
            coefficients[blade.index()] = c;
        }
        Self { coefficients }
    }

    /// The null vector at the origin, `o`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::basis(BasisBlade::ORIGIN)
    }

    /// The null vector at infinity, `∞`.
    #[must_use]
    pub const fn infinity() -> Self {
        Self::basis(BasisBlade::INFINITY)
    }

    /// The Minkowski plane `E0 = ∞∧o = −(o∧∞)`, which squares to `+1`.
    #[must_use]
    pub fn origin_infinity_plane() -> Self {
        Self::infinity().outer(&Self::origin())
    }

    /// The Euclidean pseudoscalar `e123`.
    #[must_use]
    pub const fn euclidean_pseudoscalar() -> Self {
        Self::basis(BasisBlade::E123)
    }

    /// All coefficients in mask order.
    #[must_use]
    pub const fn coefficients(&self) -> &[f64; BLADE_COUNT] {
        &self.coefficients
    }

    /// Coefficient of a single blade.
    #[must_use]
    #[inline]
    pub const fn coefficient(&self, blade: BasisBlade) -> f64 {
        self.coefficients[blade.index()]
    }

    /// Scalar (grade 0) coefficient.
    #[must_use]
    #[inline]
    pub const fn scalar_part(&self) -> f64 {
        self.coefficients[0]
    }

    /// Euclidean grade-1 coefficients `(e1, e2, e3)`.
    #[must_use]
    pub fn euclidean_part(&self) -> Vector3<f64> {
        Vector3::new(
            self.coefficient(BasisBlade::E1),
            self.coefficient(BasisBlade::E2),
            self.coefficient(BasisBlade::E3),
        )
    }

    /// Nonzero terms as `(blade, coefficient)` pairs.
    pub fn terms(&self) -> impl Iterator<Item = (BasisBlade, f64)> + '_ {
        BasisBlade::all()
            .zip(self.coefficients.iter().copied())
            .filter(|&(_, c)| c != 0.0)
    }

    /// Multiply every coefficient by `s`.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self {
            coefficients: self.coefficients.map(|c| c * s),
        }
    }

    /// Geometric product `self * other`.
    ///
    /// Sums `sign · aᵢ · bⱼ` into every blade of the expansion of `i * j`
    /// over all nonzero blade pairs, using the precomputed product table.
    #[must_use]
    pub fn product(&self, other: &Self) -> Self {
        let table = &*PRODUCT_TABLE;
        let mut coefficients = [0.0; BLADE_COUNT];
        for (a, ca) in self.terms() {
            for (b, cb) in other.terms() {
                for &(sign, blade) in table.get(a, b) {
                    coefficients[blade.index()] += sign * ca * cb;
                }
            }
        }
        Self { coefficients }
    }

    /// Outer (wedge) product `self ∧ other`.
    ///
    /// Blades are outer products of their generators, so this only reorders
    /// generators and never touches the metric. Blade pairs with a shared
    /// generator vanish.
    #[must_use]
    pub fn outer(&self, other: &Self) -> Self {
        let mut coefficients = [0.0; BLADE_COUNT];
        for (a, ca) in self.terms() {
            for (b, cb) in other.terms() {
                if a.mask() & b.mask() != 0 {
                    continue;
                }
                coefficients[usize::from(a.mask() | b.mask())] +=
                    swap_sign(a.mask(), b.mask()) * ca * cb;
            }
        }
        Self { coefficients }
    }

    /// Scalar part of the geometric product, `⟨self * other⟩₀`.
    ///
    /// Each blade has a single scalar partner, so this is one pass over the
    /// coefficients.
    #[must_use]
    pub fn scalar_product(&self, other: &Self) -> f64 {
        let table = &*PRODUCT_TABLE;
        BasisBlade::all()
            .map(|a| (a, a.scalar_partner()))
            .map(|(a, b)| (a, b, self.coefficients[a.index()], other.coefficients[b.index()]))
            .filter(|&(_, _, ca, cb)| ca != 0.0 && cb != 0.0)
            .map(|(a, b, ca, cb)| {
                table
                    .get(a, b)
                    .iter()
                    .find(|&&(_, blade)| blade == BasisBlade::SCALAR)
                    .map_or(0.0, |&(sign, _)| sign * ca * cb)
            })
            .sum()
    }

    /// Reversion `~self`: each blade of grade `k` picks up `(−1)^(k(k−1)/2)`.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut coefficients = self.coefficients;
        for (blade, c) in BasisBlade::all().zip(coefficients.iter_mut()) {
            *c *= blade.reversion_sign();
        }
        Self { coefficients }
    }

    /// Projection onto a single grade.
    #[must_use]
    pub fn grade(&self, k: u32) -> Self {
        let mut coefficients = self.coefficients;
        for (blade, c) in BasisBlade::all().zip(coefficients.iter_mut()) {
            if blade.grade() != k {
                *c = 0.0;
            }
        }
        Self { coefficients }
    }

    /// Parity of the multivector, or `None` if it is zero or mixes even and odd grades.
    #[must_use]
    pub fn parity(&self) -> Option<Parity> {
        self.parity_with(0.0)
    }

    /// Parity ignoring coefficients with magnitude at most `eps`.
    #[must_use]
    pub fn parity_with(&self, eps: f64) -> Option<Parity> {
        let mut even = false;
        let mut odd = false;
        for (blade, _) in self.terms().filter(|&(_, c)| c.abs() > eps) {
            if blade.grade() % 2 == 0 {
                even = true;
            } else {
                odd = true;
            }
        }
        match (even, odd) {
            (true, false) => Some(Parity::Even),
            (false, true) => Some(Parity::Odd),
            _ => None,
        }
    }

    /// Whether every coefficient is within `eps` of zero.
    #[must_use]
    pub fn is_zero(&self, eps: f64) -> bool {
        self.coefficients.iter().all(|c| c.abs() <= eps)
    }

    /// Largest absolute coefficient outside the scalar slot.
    #[must_use]
    pub fn non_scalar_residual(&self) -> f64 {
        self.coefficients[1..]
            .iter()
            .fold(0.0, |acc: f64, c| acc.max(c.abs()))
    }

    /// Signed squared norm `⟨self * ~self⟩₀`.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.scalar_product(&self.reverse())
    }

    /// Magnitude `sqrt(⟨self * ~self⟩₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NonRealMagnitude`] when the scalar self-product
    /// is negative, as it is for the Minkowski plane.
    pub fn magnitude(&self) -> Result<f64, MappingError> {
        let squared = self.norm_squared();
        if squared < 0.0 {
            return Err(MappingError::NonRealMagnitude { squared });
        }
        Ok(squared.sqrt())
    }
}

impl Index<BasisBlade> for Multivector {
    type Output = f64;

    fn index(&self, blade: BasisBlade) -> &Self::Output {
        &self.coefficients[blade.index()]
    }
}

impl From<BasisBlade> for Multivector {
    fn from(blade: BasisBlade) -> Self {
        Self::basis(blade)
    }
}

impl Add for Multivector {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (c, o) in self.coefficients.iter_mut().zip(rhs.coefficients.iter()) {
            *c += o;
        }
        self
    }
}

impl Sub for Multivector {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        for (c, o) in self.coefficients.iter_mut().zip(rhs.coefficients.iter()) {
            *c -= o;
        }
        self
    }
}

impl Neg for Multivector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Multivector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Multivector> for f64 {
    type Output = Multivector;

    fn mul(self, rhs: Multivector) -> Self::Output {
        rhs.scale(self)
    }
}

impl Mul for Multivector {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.product(&rhs)
    }
}

impl BitXor for Multivector {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.outer(&rhs)
    }
}

impl AbsDiffEq for Multivector {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.coefficients
            .iter()
            .zip(other.coefficients.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Multivector {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.coefficients
            .iter()
            .zip(other.coefficients.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
