//! Tolerance-based verification of transformation properties.
//!
//! Every check returns a [`Verdict`] carrying both the pass/fail decision and
//! the measured deviation, so a failing construction shows how far off it is.
//! Checks never return errors for numeric mismatch.

use tracing::debug;

use crate::config::CgaConfig;
use crate::conformal::{ConformalPoint, Direction, Point};
use crate::error::Result;
use crate::sandwich::{apply, apply_conformal, power};
use crate::versor::{unit_direction, Versor};

/// Outcome of a verification check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Whether the deviation is within tolerance.
    pub passed: bool,
    /// Largest component-wise deviation observed; `+∞` when a finite point
    /// was compared against the point at infinity.
    pub deviation: f64,
}

impl Verdict {
    /// Judge a deviation against a tolerance.
    #[must_use]
    pub fn from_deviation(deviation: f64, tol: f64) -> Self {
        Self {
            passed: deviation <= tol,
            deviation,
        }
    }

    /// Combine two verdicts, keeping the worst deviation. A NaN deviation
    /// on either side is kept.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let deviation = if self.deviation.is_nan() || other.deviation.is_nan() {
            f64::NAN
        } else {
            self.deviation.max(other.deviation)
        };
        Self {
            passed: self.passed && other.passed,
            deviation,
        }
    }
}

/// Whether `versor` maps `p` to itself within `tol`.
#[must_use]
pub fn check_fixed_point(versor: &Versor, p: &Point, tol: f64) -> Verdict {
    let image = apply(versor, p);
    Verdict::from_deviation(image.deviation(&ConformalPoint::Finite(*p)), tol)
}

/// Whether `versorⁿ` maps `reference` back to itself within `tol`.
#[must_use]
pub fn check_order(versor: &Versor, n: u32, reference: &Point, tol: f64) -> Verdict {
    check_fixed_point(&power(versor, n), reference, tol)
}

/// Whether `versor` maps `from` to `to` within `tol`.
#[must_use]
pub fn check_maps_to(
    versor: &Versor,
    from: &ConformalPoint,
    to: &ConformalPoint,
    tol: f64,
) -> Verdict {
    let image = apply_conformal(versor, from);
    Verdict::from_deviation(image.deviation(to), tol)
}

/// Whether `versor` maps each point to the next and the last back to the first.
///
/// The verdict carries the worst deviation along the cycle. An empty cycle
/// passes trivially.
#[must_use]
pub fn check_cycle(versor: &Versor, points: &[ConformalPoint], tol: f64) -> Verdict {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(from, to)| check_maps_to(versor, from, to, tol))
        .fold(Verdict::from_deviation(0.0, tol), Verdict::and)
}

/// Check every defining property of a poloidal transform about `direction`.
///
/// The versor must cycle `d → 0 → −d → ∞ → d`, fix the unit circle
/// orthogonal to `d` and have order 4, all within `config.verification_eps`.
///
/// # Errors
///
/// Returns [`CgaError::InvalidParameter`](crate::CgaError::InvalidParameter)
/// for a zero or non-finite direction.
pub fn check_poloidal(versor: &Versor, direction: &Direction, config: &CgaConfig) -> Result<Verdict> {
    let d = unit_direction(direction, "poloidal axis")?;
    let tol = config.verification_eps;
    let (u, v) = orthonormal_pair(&d);

    let cycle = [
        ConformalPoint::Finite(Point::from(d)),
        ConformalPoint::origin(),
        ConformalPoint::Finite(Point::from(-d)),
        ConformalPoint::Infinity,
    ];
    let on_circle = [u, -u, v, -v]
        .into_iter()
        .map(|w| check_fixed_point(versor, &Point::from(w), tol))
        .fold(Verdict::from_deviation(0.0, tol), Verdict::and);
    let generic = Point::from(u * 0.5 + v * 0.25 + d * 0.75);

    let verdict = check_cycle(versor, &cycle, tol)
        .and(on_circle)
        .and(check_order(versor, 4, &generic, tol));
    debug!(passed = verdict.passed, deviation = verdict.deviation, "poloidal check");
    Ok(verdict)
}

/// Two unit vectors orthogonal to the unit vector `d` and to each other.
fn orthonormal_pair(d: &Direction) -> (Direction, Direction) {
    let helper = if d.x.abs() < 0.9 {
        Direction::x()
    } else {
        Direction::y()
    };
    let u = d.cross(&helper).normalize();
    (u, d.cross(&u))
}
