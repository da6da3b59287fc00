//! Applying, composing and powering versors.
//!
//! # Composition order
//!
//! [`compose`] multiplies left to right, so `compose(&[a, b])` is the product
//! `a * b`. Under the sandwich product the rightmost factor acts first:
//! `compose(&[a, b])` applies `b`, then `a`, like function composition `a ∘ b`.
//!
//! ```
//! use conformal_versors::{apply, compose, ConformalPoint, Point, Versor};
//! use nalgebra::Vector3;
//!
//! let shift = Versor::translation(&Vector3::new(1.0, 0.0, 0.0));
//! let double = Versor::dilation(2.0)?;
//!
//! // double first, then shift: 1 -> 2 -> 3
//! let p = apply(&compose(&[shift, double]), &Point::new(1.0, 0.0, 0.0));
//! assert!(p.deviation(&ConformalPoint::Finite(Point::new(3.0, 0.0, 0.0))) < 1e-12);
//! # Ok::<(), conformal_versors::CgaError>(())
//! ```

use crate::algebra::Multivector;
use crate::config::CgaConfig;
use crate::conformal::{down_with, embed, up, ConformalPoint, Point};
use crate::versor::Versor;

/// Sandwich product `V X ~V`.
#[must_use]
pub fn sandwich(versor: &Versor, x: &Multivector) -> Multivector {
    let v = versor.as_multivector();
    v.product(x).product(&v.reverse())
}

/// Apply a versor to a point with default tolerances.
///
/// Returns [`ConformalPoint::Infinity`] if the point is sent to infinity.
#[must_use]
pub fn apply(versor: &Versor, p: &Point) -> ConformalPoint {
    apply_with(versor, p, &CgaConfig::default())
}

/// Apply a versor to a point: `down(V · up(p) · ~V)`.
#[must_use]
pub fn apply_with(versor: &Versor, p: &Point, config: &CgaConfig) -> ConformalPoint {
    down_with(&sandwich(versor, &up(p)), config)
}

/// Apply a versor to a point that may be the point at infinity.
#[must_use]
pub fn apply_conformal(versor: &Versor, point: &ConformalPoint) -> ConformalPoint {
    down_with(&sandwich(versor, &embed(point)), &CgaConfig::default())
}

/// Left-to-right geometric product of versors.
///
/// The last versor in the slice acts first. An empty slice yields the identity.
#[must_use]
pub fn compose(versors: &[Versor]) -> Versor {
    versors
        .iter()
        .fold(Versor::identity(), |acc, &v| acc * v)
}

/// `versor` multiplied by itself `n` times; `n = 0` yields the identity.
#[must_use]
pub fn power(versor: &Versor, n: u32) -> Versor {
    (0..n).fold(Versor::identity(), |acc, _| acc * *versor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformal::Direction;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn finite(x: f64, y: f64, z: f64) -> ConformalPoint {
        ConformalPoint::Finite(Point::new(x, y, z))
    }

    #[test]
    fn test_compose_order() {
        let shift = Versor::translation(&Direction::new(1.0, 0.0, 0.0));
        let double = Versor::dilation(2.0).unwrap();
        let p = Point::new(1.0, 0.0, 0.0);

        // compose(a, b) applies b first
        assert_abs_diff_eq!(apply(&compose(&[shift, double]), &p), finite(3.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(apply(&compose(&[double, shift]), &p), finite(4.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let a = Versor::rotation_about_axis(&Direction::new(0.0, 1.0, 1.0), 0.7).unwrap();
        let b = Versor::translation(&Direction::new(-1.0, 0.5, 2.0));
        let c = Versor::dilation(0.25).unwrap();
        let p = Point::new(0.3, 0.2, -0.9);

        let step = apply(&c, &p).finite().unwrap();
        let step = apply(&b, &step).finite().unwrap();
        let expected = apply(&a, &step);

        assert_abs_diff_eq!(apply(&compose(&[a, b, c]), &p), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_empty_is_identity() {
        assert_eq!(compose(&[]), Versor::identity());
    }

    #[test]
    fn test_power() {
        let quarter = Versor::rotation_about_axis(&Direction::z(), PI / 2.0).unwrap();
        let p = Point::new(1.0, 0.0, 0.0);

        assert_eq!(power(&quarter, 0), Versor::identity());
        assert_eq!(power(&quarter, 1), quarter);
        assert_abs_diff_eq!(apply(&power(&quarter, 2), &p), finite(-1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(apply(&power(&quarter, 4), &p), finite(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_apply_propagates_infinity() {
        let inversion = Versor::inversion();
        let shift = Versor::translation(&Direction::new(0.0, 0.0, 1.0));

        // Shifting the origin first keeps it away from the inversion centre
        assert!(!apply(&compose(&[inversion, shift]), &Point::origin()).is_infinite());
        assert!(apply(&compose(&[shift, inversion]), &Point::origin()).is_infinite());
    }

    #[test]
    fn test_sandwich_preserves_nullity() {
        let v = compose(&[
            Versor::poloidal(&Direction::new(1.0, 2.0, 2.0)).unwrap(),
            Versor::dilation(3.0).unwrap(),
        ]);
        let image = sandwich(&v, &up(&Point::new(0.4, -0.1, 0.7)));
        assert!((image * image).is_zero(1e-10));
    }
}
