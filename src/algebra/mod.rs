//! The conformal algebra itself.
//!
//! This module provides:
//! - [`blade`]: basis blades, the fixed signature and the product table
//! - [`multivector`]: the general multivector value type
//! - [`exp`]: closed-form exponentials of simple bivectors

pub mod blade;
pub mod exp;
pub mod multivector;

pub use blade::{blade_product, reversion, BasisBlade, Term, BLADE_COUNT, GENERATOR_COUNT};
pub use exp::{exp_elliptic, exp_hyperbolic, exp_parabolic, exp_simple};
pub use multivector::{Multivector, Parity};
