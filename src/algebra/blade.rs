//! Basis blades of the 5D conformal algebra.
//!
//! Multivectors are stored over the null basis `{e1, e2, e3, o, ∞}`. A blade
//! is identified by a 5-bit mask and stands for the outer product of its
//! generators in increasing bit order:
//!
//! | Bit | Generator | Products |
//! |-----|-----------|----------|
//! | 0   | `e1`      | `e1² = 1` |
//! | 1   | `e2`      | `e2² = 1` |
//! | 2   | `e3`      | `e3² = 1` |
//! | 3   | `o`       | `o² = 0`, `o·∞ = −1 + o∧∞` |
//! | 4   | `∞`       | `∞² = 0`, `∞·o = −1 − o∧∞` |
//!
//! The null pair is not orthogonal, so the product of two null-basis blades
//! can expand to two blades. Those expansions are derived from the
//! orthogonal basis `{e1, e2, e3, e+, e-}` with `e+² = 1` and `e-² = −1`,
//! where every blade product is a single signed blade ([`blade_product`]).
//! The two bases are related by `o = ½(e- − e+)` and `∞ = e- + e+`.
//!
//! The null-basis expansions of all blade pairs are tabulated once on first
//! use.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::error::AlgebraError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of generating vectors.
pub const GENERATOR_COUNT: usize = 5;

/// Number of basis blades (2^5).
pub const BLADE_COUNT: usize = 1 << GENERATOR_COUNT;

/// Square of each orthogonal generator `e1, e2, e3, e+, e-`.
const SIGNATURE: [f64; GENERATOR_COUNT] = [1.0, 1.0, 1.0, 1.0, -1.0];

/// Name symbol of each null-basis generator, indexed by bit position.
const SYMBOLS: [char; GENERATOR_COUNT] = ['1', '2', '3', 'o', '∞'];

/// Symbols of the orthogonal basis, which blade names may not use.
const ORTHOGONAL_SYMBOLS: [char; 2] = ['+', '-'];

/// A generator written as a combination of at most two generators of the
/// other basis, as `(weight, mask)` pairs.
type GeneratorImage = [(f64, u8); 2];

/// `e1, e2, e3, o, ∞` in the orthogonal basis.
const NULL_IN_ORTHOGONAL: [GeneratorImage; GENERATOR_COUNT] = [
    [(1.0, 0b00001), (0.0, 0)],
    [(1.0, 0b00010), (0.0, 0)],
    [(1.0, 0b00100), (0.0, 0)],
    [(0.5, 0b10000), (-0.5, 0b01000)],
    [(1.0, 0b10000), (1.0, 0b01000)],
];

/// `e1, e2, e3, e+, e-` in the null basis.
const ORTHOGONAL_IN_NULL: [GeneratorImage; GENERATOR_COUNT] = [
    [(1.0, 0b00001), (0.0, 0)],
    [(1.0, 0b00010), (0.0, 0)],
    [(1.0, 0b00100), (0.0, 0)],
    [(0.5, 0b10000), (-1.0, 0b01000)],
    [(0.5, 0b10000), (1.0, 0b01000)],
];

/// One signed blade of a product expansion.
pub type Term = (f64, BasisBlade);

/// A basis blade of the null basis, identified by its generator mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasisBlade(u8);

impl BasisBlade {
    /// The scalar blade `1`.
    pub const SCALAR: Self = Self(0);
    /// `e1`.
    pub const E1: Self = Self(0b00001);
    /// `e2`.
    pub const E2: Self = Self(0b00010);
    /// `e3`.
    pub const E3: Self = Self(0b00100);
    /// `o`, the null vector at the origin.
    pub const ORIGIN: Self = Self(0b01000);
    /// `∞`, the null vector at infinity.
    pub const INFINITY: Self = Self(0b10000);
    /// `e12`.
    pub const E12: Self = Self(0b00011);
    /// `e13`.
    pub const E13: Self = Self(0b00101);
    /// `e23`.
    pub const E23: Self = Self(0b00110);
    /// `e123`, the Euclidean pseudoscalar.
    pub const E123: Self = Self(0b00111);
    /// `o∧∞`, the negated Minkowski plane `−E0`.
    pub const ORIGIN_INFINITY: Self = Self(0b11000);
    /// `e123o∞`, the conformal pseudoscalar.
    pub const PSEUDOSCALAR: Self = Self(0b11111);

    /// Euclidean vector blades in `x, y, z` order.
    pub const EUCLIDEAN: [Self; 3] = [Self::E1, Self::E2, Self::E3];

    /// Create a blade from a raw mask.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidBladeIndex`] if `mask >= 32`.
    pub fn new(mask: usize) -> Result<Self, AlgebraError> {
        u8::try_from(mask)
            .ok()
            .filter(|&m| usize::from(m) < BLADE_COUNT)
            .map(Self)
            .ok_or(AlgebraError::InvalidBladeIndex { index: mask })
    }

    /// Generator mask of the blade.
    #[must_use]
    #[inline]
    pub const fn mask(self) -> u8 {
        self.0
    }

    /// Slot of the blade in a multivector's coefficient array.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of generators in the blade.
    #[must_use]
    #[inline]
    pub const fn grade(self) -> u32 {
        self.0.count_ones()
    }

    /// Sign picked up under reversion: `(−1)^(k(k−1)/2)` for grade `k`.
    #[must_use]
    pub const fn reversion_sign(self) -> f64 {
        let k = self.grade();
        if (k * k.saturating_sub(1) / 2) % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    /// The only blade whose product with `self` has a scalar part.
    ///
    /// Euclidean generators pair with themselves, `o` pairs with `∞`.
    #[must_use]
    #[inline]
    pub const fn scalar_partner(self) -> Self {
        let m = self.0;
        Self((m & 0b00111) | ((m & 0b01000) << 1) | ((m & 0b10000) >> 1))
    }

    /// Geometric product with another blade as a list of signed blades,
    /// read from the precomputed table.
    #[must_use]
    #[inline]
    pub fn product(self, other: Self) -> &'static [Term] {
        PRODUCT_TABLE.get(self, other)
    }

    /// All 32 blades in mask order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BLADE_COUNT as u8).map(Self)
    }
}

/// Geometric product of two blades of the orthogonal basis
/// `{e1, e2, e3, e+, e-}`, given as raw masks.
///
/// Returns the sign and the mask of the resulting blade.
///
/// # Errors
///
/// Returns [`AlgebraError::InvalidBladeIndex`] if either mask is outside the
/// 32-blade range.
pub fn blade_product(a: usize, b: usize) -> Result<(f64, usize), AlgebraError> {
    let a = BasisBlade::new(a)?;
    let b = BasisBlade::new(b)?;
    let (sign, mask) = orthogonal_product(a.mask(), b.mask());
    Ok((sign, usize::from(mask)))
}

/// Reversion sign of a blade.
#[must_use]
pub const fn reversion(blade: BasisBlade) -> f64 {
    blade.reversion_sign()
}

/// Sign of reordering `a ∧ b` into increasing generator order.
///
/// Each generator of `b` has to move left past every generator of `a` with a
/// higher index; each swap anticommutes.
pub(crate) fn swap_sign(a: u8, b: u8) -> f64 {
    let mut swaps = 0;
    let mut shifted = a >> 1;
    while shifted != 0 {
        swaps += (shifted & b).count_ones();
        shifted >>= 1;
    }
    if swaps % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Sign and mask of `a * b` over the orthogonal generators. Shared
/// generators square out with their signature.
fn orthogonal_product(a: u8, b: u8) -> (f64, u8) {
    let mut sign = swap_sign(a, b);
    let shared = a & b;
    for (bit, square) in SIGNATURE.iter().enumerate() {
        if shared & (1 << bit) != 0 {
            sign *= square;
        }
    }
    (sign, a ^ b)
}

/// Expand a blade into the other basis by wedging the images of its
/// generators in bit order.
fn change_basis(mask: u8, images: &[GeneratorImage; GENERATOR_COUNT]) -> [f64; BLADE_COUNT] {
    let mut acc = [0.0; BLADE_COUNT];
    acc[0] = 1.0;
    for (bit, image) in images.iter().enumerate() {
        if mask & (1 << bit) == 0 {
            continue;
        }
        let mut next = [0.0; BLADE_COUNT];
        for (m, &c) in acc.iter().enumerate().filter(|&(_, &c)| c != 0.0) {
            let m = m as u8;
            for &(weight, g) in image.iter().filter(|&&(w, _)| w != 0.0) {
                if m & g == 0 {
                    next[usize::from(m | g)] += swap_sign(m, g) * c * weight;
                }
            }
        }
        acc = next;
    }
    acc
}

/// Null-basis expansion of `a * b` for every ordered blade pair.
pub(crate) struct ProductTable {
    entries: Vec<Box<[Term]>>,
}

impl ProductTable {
    fn build() -> Self {
        let to_orthogonal: Vec<[f64; BLADE_COUNT]> = BasisBlade::all()
            .map(|b| change_basis(b.mask(), &NULL_IN_ORTHOGONAL))
            .collect();
        let to_null: Vec<[f64; BLADE_COUNT]> = BasisBlade::all()
            .map(|b| change_basis(b.mask(), &ORTHOGONAL_IN_NULL))
            .collect();

        let mut entries = Vec::with_capacity(BLADE_COUNT * BLADE_COUNT);
        for left in &to_orthogonal {
            for right in &to_orthogonal {
                let mut orthogonal = [0.0; BLADE_COUNT];
                for (i, &ci) in left.iter().enumerate().filter(|&(_, &c)| c != 0.0) {
                    for (j, &cj) in right.iter().enumerate().filter(|&(_, &c)| c != 0.0) {
                        let (sign, k) = orthogonal_product(i as u8, j as u8);
                        orthogonal[usize::from(k)] += sign * ci * cj;
                    }
                }

                let mut null = [0.0; BLADE_COUNT];
                for (k, &ck) in orthogonal.iter().enumerate().filter(|&(_, &c)| c != 0.0) {
                    for (slot, &cm) in null.iter_mut().zip(to_null[k].iter()) {
                        *slot += ck * cm;
                    }
                }

                entries.push(
                    BasisBlade::all()
                        .zip(null)
                        .filter(|&(_, c)| c != 0.0)
                        .map(|(blade, c)| (c, blade))
                        .collect(),
                );
            }
        }

        trace!(blades = BLADE_COUNT, "built null-basis product table");
        Self { entries }
    }

    #[inline]
    pub(crate) fn get(&self, a: BasisBlade, b: BasisBlade) -> &[Term] {
        &self.entries[a.index() * BLADE_COUNT + b.index()]
    }
}

pub(crate) static PRODUCT_TABLE: Lazy<ProductTable> = Lazy::new(ProductTable::build);

impl fmt::Display for BasisBlade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "1");
        }
        write!(f, "e")?;
        for (bit, symbol) in SYMBOLS.iter().enumerate() {
            if self.0 & (1 << bit) != 0 {
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for BasisBlade {
    type Err = AlgebraError;

    /// Parse a canonical blade name such as `1`, `e2`, `e13`, `e3o` or `e123o∞`.
    ///
    /// `i` is accepted in place of `∞`. Generators must appear in canonical
    /// order (`1 2 3 o ∞`) so that the name carries no hidden sign.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AlgebraError::InvalidBladeName { name: s.to_string() };

        if s == "1" {
            return Ok(Self::SCALAR);
        }
        let body = s.strip_prefix('e').ok_or_else(invalid)?;
        if body.is_empty() {
            return Err(invalid());
        }

        let mut mask = 0u8;
        let mut last_bit = None;
        for symbol in body.chars() {
            if ORTHOGONAL_SYMBOLS.contains(&symbol) {
                return Err(AlgebraError::SignatureMismatch { symbol });
            }
            let symbol = if symbol == 'i' { '∞' } else { symbol };
            let bit = SYMBOLS
                .iter()
                .position(|&c| c == symbol)
                .ok_or_else(invalid)?;
            if last_bit.is_some_and(|last| bit <= last) {
                return Err(invalid());
            }
            last_bit = Some(bit);
            mask |= 1 << bit;
        }

        Ok(Self(mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(blade: BasisBlade, sign: f64) -> Vec<Term> {
        vec![(sign, blade)]
    }

    #[test]
    fn test_generator_squares() {
        assert_eq!(
            BasisBlade::E1.product(BasisBlade::E1),
            single(BasisBlade::SCALAR, 1.0).as_slice()
        );
        assert_eq!(
            BasisBlade::E3.product(BasisBlade::E3),
            single(BasisBlade::SCALAR, 1.0).as_slice()
        );
        assert!(BasisBlade::ORIGIN.product(BasisBlade::ORIGIN).is_empty());
        assert!(BasisBlade::INFINITY.product(BasisBlade::INFINITY).is_empty());
    }

    #[test]
    fn test_null_pair_products() {
        assert_eq!(
            BasisBlade::ORIGIN.product(BasisBlade::INFINITY),
            &[(-1.0, BasisBlade::SCALAR), (1.0, BasisBlade::ORIGIN_INFINITY)]
        );
        assert_eq!(
            BasisBlade::INFINITY.product(BasisBlade::ORIGIN),
            &[(-1.0, BasisBlade::SCALAR), (-1.0, BasisBlade::ORIGIN_INFINITY)]
        );
        // o∧∞ squares to +1 like E0
        assert_eq!(
            BasisBlade::ORIGIN_INFINITY.product(BasisBlade::ORIGIN_INFINITY),
            single(BasisBlade::SCALAR, 1.0).as_slice()
        );
    }

    #[test]
    fn test_expansions_have_at_most_two_terms() {
        for a in BasisBlade::all() {
            for b in BasisBlade::all() {
                assert!(a.product(b).len() <= 2, "{a} * {b} = {:?}", a.product(b));
            }
        }
    }

    #[test]
    fn test_anticommutation() {
        assert_eq!(
            BasisBlade::E1.product(BasisBlade::E2),
            single(BasisBlade::E12, 1.0).as_slice()
        );
        assert_eq!(
            BasisBlade::E2.product(BasisBlade::E1),
            single(BasisBlade::E12, -1.0).as_slice()
        );
        assert_eq!(
            BasisBlade::ORIGIN.product(BasisBlade::E2),
            single(BasisBlade(0b01010), -1.0).as_slice()
        );
    }

    #[test]
    fn test_orthogonal_products() {
        // e+ squares to +1, e- to -1, and e+- to +1
        assert_eq!(blade_product(0b01000, 0b01000), Ok((1.0, 0)));
        assert_eq!(blade_product(0b10000, 0b10000), Ok((-1.0, 0)));
        assert_eq!(blade_product(0b11000, 0b11000), Ok((1.0, 0)));
        assert_eq!(blade_product(0b00011, 0b00011), Ok((-1.0, 0)));
        assert_eq!(blade_product(0b00010, 0b00001), Ok((-1.0, 0b00011)));
    }

    #[test]
    fn test_scalar_partner_holds_every_scalar() {
        for a in BasisBlade::all() {
            for b in BasisBlade::all() {
                let has_scalar = a
                    .product(b)
                    .iter()
                    .any(|&(_, blade)| blade == BasisBlade::SCALAR);
                assert_eq!(has_scalar, b == a.scalar_partner(), "{a} * {b}");
            }
        }
    }

    #[test]
    fn test_table_is_associative() {
        fn expand(terms: &[Term], right: BasisBlade) -> [f64; BLADE_COUNT] {
            let mut out = [0.0; BLADE_COUNT];
            for &(s, blade) in terms {
                for &(t, result) in blade.product(right) {
                    out[result.index()] += s * t;
                }
            }
            out
        }

        for a in BasisBlade::all() {
            for b in BasisBlade::all() {
                for c in BasisBlade::all() {
                    let left = expand(a.product(b), c);

                    let mut right = [0.0; BLADE_COUNT];
                    for &(s, bc) in b.product(c) {
                        for &(t, result) in a.product(bc) {
                            right[result.index()] += s * t;
                        }
                    }
                    assert_eq!(left, right, "({a} {b}) {c}");
                }
            }
        }
    }

    #[test]
    fn test_reversion_signs() {
        let signs: Vec<f64> = (0..=5)
            .map(|k| BasisBlade((1u8 << k) - 1).reversion_sign())
            .collect();
        assert_eq!(signs, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0]);
        assert_eq!(reversion(BasisBlade::E123), -1.0);
    }

    #[test]
    fn test_blade_product_rejects_invalid_masks() {
        assert!(blade_product(3, 5).is_ok());
        assert_eq!(
            blade_product(32, 1),
            Err(AlgebraError::InvalidBladeIndex { index: 32 })
        );
        assert_eq!(
            blade_product(0, 300),
            Err(AlgebraError::InvalidBladeIndex { index: 300 })
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(BasisBlade::SCALAR.to_string(), "1");
        assert_eq!(BasisBlade::E13.to_string(), "e13");
        assert_eq!(BasisBlade::ORIGIN_INFINITY.to_string(), "eo∞");
        assert_eq!(BasisBlade::PSEUDOSCALAR.to_string(), "e123o∞");
        assert_eq!("e3i".parse::<BasisBlade>(), Ok(BasisBlade(0b10100)));

        for blade in BasisBlade::all() {
            assert_eq!(blade.to_string().parse::<BasisBlade>(), Ok(blade));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "e1+".parse::<BasisBlade>(),
            Err(AlgebraError::SignatureMismatch { symbol: '+' })
        );
        assert_eq!(
            "e-".parse::<BasisBlade>(),
            Err(AlgebraError::SignatureMismatch { symbol: '-' })
        );
        assert!(matches!(
            "e21".parse::<BasisBlade>(),
            Err(AlgebraError::InvalidBladeName { .. })
        ));
        assert!(matches!(
            "e∞o".parse::<BasisBlade>(),
            Err(AlgebraError::InvalidBladeName { .. })
        ));
        assert!(matches!(
            "e11".parse::<BasisBlade>(),
            Err(AlgebraError::InvalidBladeName { .. })
        ));
        assert!(matches!(
            "e4".parse::<BasisBlade>(),
            Err(AlgebraError::InvalidBladeName { .. })
        ));
        assert!("e".parse::<BasisBlade>().is_err());
        assert!("x1".parse::<BasisBlade>().is_err());
    }
}
