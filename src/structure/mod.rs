//! Algebraic structures the solvers operate over.
//!
//! A linear system `lhs * x = rhs` does not care what its entries are, only
//! that they support a handful of operations. [`Structure`] bundles those
//! operations for a pair of domains:
//!
//! - [`Structure::Scalar`] is the coefficient domain of the lhs matrix, and
//! - [`Structure::Value`] is the domain of rhs, result and free-variable
//!   entries.
//!
//! For a plain field the two coincide ([`Gf2kStructure`], [`ZpStructure`],
//! [`Zp64Structure`]). The split exists for the module cases: with
//! [`BitVectorStructure`] the coefficients are single bits while the values
//! are fixed-length bit strings, and with [`EccStructure`] the coefficients
//! are group-order scalars acting on curve points. The solvers run the exact
//! same elimination over all five; only the operation table changes.
//!
//! Methods take `&self` so a structure can carry runtime state such as a
//! modulus or a bit length.

use rand::{CryptoRng, Rng};
use std::fmt::Debug;

pub mod bits;
pub mod ecc;
pub mod gf2k;
pub mod zp;
pub mod zp64;

pub use bits::BitVectorStructure;
pub use ecc::EccStructure;
pub use gf2k::Gf2kStructure;
pub use zp::ZpStructure;
pub use zp64::Zp64Structure;

/// Coefficient/value algebra of a linear system.
///
/// The solvers only ever consume this interface; they never construct
/// scalars or values except through it. `scalar_inv` (and therefore
/// `scalar_div`) is only invoked on scalars that already passed a
/// `scalar_is_zero` check.
pub trait Structure {
    /// Coefficient domain of the lhs matrix.
    type Scalar: Clone + PartialEq + Debug;
    /// Domain of rhs and result entries.
    type Value: Clone + PartialEq + Debug;

    /// Additive identity of the coefficient domain.
    fn scalar_zero(&self) -> Self::Scalar;
    /// Whether `a` is the zero coefficient.
    fn scalar_is_zero(&self, a: &Self::Scalar) -> bool;
    /// `a - b` in the coefficient domain.
    fn scalar_sub(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    /// `a * b` in the coefficient domain.
    fn scalar_mul(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    /// Multiplicative inverse of a nonzero coefficient.
    fn scalar_inv(&self, a: &Self::Scalar) -> Self::Scalar;
    /// `a / b` for nonzero `b`.
    fn scalar_div(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        self.scalar_mul(a, &self.scalar_inv(b))
    }

    /// Additive identity of the value domain.
    fn value_zero(&self) -> Self::Value;
    /// Whether `v` is the zero value.
    fn value_is_zero(&self, v: &Self::Value) -> bool;
    /// `a + b` in the value domain.
    fn value_add(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    /// `a - b` in the value domain.
    fn value_sub(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    /// Action of a coefficient on a value.
    fn scalar_mul_value(&self, a: &Self::Scalar, v: &Self::Value) -> Self::Value;
    /// A value drawn uniformly from the nonzero values.
    fn random_nonzero_value<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> Self::Value;
}
