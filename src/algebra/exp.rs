//! Closed-form exponentials of simple bivectors.
//!
//! A simple bivector `B` squares to a scalar, which splits the exponential
//! into three families:
//!
//! | `B²` | Family | `exp(φB)` | Used by |
//! |------|--------|-----------|---------|
//! | `-1` | elliptic | `cos φ + sin φ B` | rotation |
//! | `+1` | hyperbolic | `cosh φ + sinh φ B` | dilation |
//! | `0` | parabolic | `1 + φB` | translation |
//!
//! No truncated series is used anywhere: the parabolic generator is nilpotent,
//! so its series terminates after two terms.

use super::multivector::Multivector;
use crate::error::AlgebraError;

/// `exp(angle · plane)` for a plane with `plane² = -1`.
#[must_use]
pub fn exp_elliptic(plane: &Multivector, angle: f64) -> Multivector {
    Multivector::scalar(angle.cos()) + plane.scale(angle.sin())
}

/// `exp(amount · plane)` for a plane with `plane² = +1`.
#[must_use]
pub fn exp_hyperbolic(plane: &Multivector, amount: f64) -> Multivector {
    Multivector::scalar(amount.cosh()) + plane.scale(amount.sinh())
}

/// `exp(generator)` for a generator with `generator² = 0`.
#[must_use]
pub fn exp_parabolic(generator: &Multivector) -> Multivector {
    Multivector::one() + *generator
}

/// Exponential of any simple bivector, dispatching on the sign of its square.
///
/// Squares within `eps` of zero are treated as nilpotent.
///
/// # Errors
///
/// Returns [`AlgebraError::NonSimpleBivector`] if `bivector²` has a
/// non-scalar part larger than `eps`.
pub fn exp_simple(bivector: &Multivector, eps: f64) -> Result<Multivector, AlgebraError> {
    let square = bivector.product(bivector);
    let residual = square.non_scalar_residual();
    if residual > eps {
        return Err(AlgebraError::NonSimpleBivector { residual });
    }

    let s = square.scalar_part();
    let result = if s < -eps {
        let theta = (-s).sqrt();
        exp_elliptic(&bivector.scale(1.0 / theta), theta)
    } else if s > eps {
        let theta = s.sqrt();
        exp_hyperbolic(&bivector.scale(1.0 / theta), theta)
    } else {
        exp_parabolic(bivector)
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::BasisBlade;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    #[test]
    fn test_elliptic_quarter_turns() {
        let e12 = Multivector::basis(BasisBlade::E12);
        assert_abs_diff_eq!(exp_elliptic(&e12, PI / 2.0), e12, epsilon = 1e-15);
        assert_abs_diff_eq!(
            exp_elliptic(&e12, PI),
            Multivector::scalar(-1.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_hyperbolic_addition_law() {
        let e0 = Multivector::origin_infinity_plane();
        let a = exp_hyperbolic(&e0, 0.3);
        let b = exp_hyperbolic(&e0, 0.9);
        assert_abs_diff_eq!(a * b, exp_hyperbolic(&e0, 1.2), epsilon = 1e-12);
    }

    #[test]
    fn test_parabolic_is_exact() {
        let generator = Multivector::vector(&Vector3::new(1.0, -2.0, 0.5)) * Multivector::infinity();
        assert!((generator * generator).is_zero(1e-15));

        let t = exp_parabolic(&generator.scale(0.5));
        let inverse = exp_parabolic(&generator.scale(-0.5));
        assert_abs_diff_eq!(t * inverse, Multivector::one(), epsilon = 1e-15);
    }

    #[test]
    fn test_exp_simple_dispatch() {
        let e12 = Multivector::basis(BasisBlade::E12);
        let e0 = Multivector::origin_infinity_plane();
        let null = Multivector::basis(BasisBlade::E1) * Multivector::infinity();

        assert_abs_diff_eq!(
            exp_simple(&e12.scale(0.7), 1e-12).unwrap(),
            exp_elliptic(&e12, 0.7),
            epsilon = 1e-14
        );
        assert_abs_diff_eq!(
            exp_simple(&e0.scale(-0.4), 1e-12).unwrap(),
            exp_hyperbolic(&e0, -0.4),
            epsilon = 1e-14
        );
        assert_abs_diff_eq!(
            exp_simple(&null, 1e-12).unwrap(),
            exp_parabolic(&null),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_exp_simple_rejects_non_simple() {
        // with e+ = ½∞ - o, e12 + e3 e+ squares to -2 + 2 e123 e+, which is not a scalar
        let e_plus = Multivector::infinity() * 0.5 - Multivector::origin();
        let b = Multivector::basis(BasisBlade::E12) + Multivector::basis(BasisBlade::E3) * e_plus;
        assert!(matches!(
            exp_simple(&b, 1e-12),
            Err(AlgebraError::NonSimpleBivector { .. })
        ));
    }
}
