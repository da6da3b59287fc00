//! Conformal Versors Library
//!
//! Conformal geometric algebra over 3D Euclidean space.
//!
//! Points are embedded as null vectors of a 5D algebra with generators
//! `e1, e2, e3, o, ∞`, so that translations, rotations, dilations,
//! reflections and sphere inversions all become invertible multivectors
//! ("versors") acting by the sandwich product `V X ~V`. Versors compose by
//! plain multiplication, which makes chained constructions such as the
//! order-4 poloidal transform easy to build and to verify.
//!
//! # Features
//!
//! - **Null-basis storage**: `o² = ∞² = 0`, `o·∞ = −1 + o∧∞`; the homogeneous weight is a stored coefficient
//! - **Precomputed products**: the 32×32 table of blade expansions is built once on first use
//! - **Closed-form exponentials**: elliptic, hyperbolic and parabolic generators
//! - **Typed degeneracies**: points at infinity and non-real magnitudes are values, not NaN
//!
//! # Quick Start
//!
//! ```
//! use conformal_versors::{apply, check_order, power, ConformalPoint, Point, Versor};
//! use nalgebra::Vector3;
//!
//! let poloidal = Versor::poloidal(&Vector3::new(1.0, 0.0, 0.0))?;
//!
//! // The origin moves to the antipodal axis point
//! let image = apply(&poloidal, &Point::origin());
//! assert!(image.deviation(&ConformalPoint::Finite(Point::new(-1.0, 0.0, 0.0))) < 1e-9);
//!
//! // The fourth power is the identity
//! assert!(check_order(&poloidal, 4, &Point::new(1.0, 0.0, 0.0), 1e-9).passed);
//! assert!(apply(&power(&poloidal, 4), &Point::new(0.2, 0.3, 0.4))
//!     .deviation(&ConformalPoint::Finite(Point::new(0.2, 0.3, 0.4))) < 1e-9);
//! # Ok::<(), conformal_versors::CgaError>(())
//! ```
//!
//! # Composition
//!
//! | Call | Meaning |
//! |------|---------|
//! | `compose(&[a, b])` | `a * b`: apply `b`, then `a` |
//! | `power(&v, n)` | `v * v * … * v` (`n` factors) |
//! | `v.reverse()` | `~v`, the inverse transformation up to scale |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod algebra;
pub mod config;
pub mod conformal;
pub mod error;
#[cfg(feature = "index")]
pub mod index;
pub mod sandwich;
pub mod verify;
pub mod versor;

// Re-exports for convenient access
pub use algebra::{blade_product, reversion, BasisBlade, Multivector, Parity, BLADE_COUNT};
pub use config::CgaConfig;
pub use conformal::{
    down, down_with, embed, homogeneous_weight, up, ConformalPoint, Direction, Point,
};
pub use error::{AlgebraError, CgaError, MappingError, Result};
pub use sandwich::{apply, apply_conformal, apply_with, compose, power, sandwich};
pub use verify::{
    check_cycle, check_fixed_point, check_maps_to, check_order, check_poloidal, Verdict,
};
pub use versor::Versor;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
