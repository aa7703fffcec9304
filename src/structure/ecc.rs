//! The Ristretto group as a module over its scalar field.
//!
//! Coefficients are scalars modulo the group order, values are curve points,
//! and the action of a coefficient on a value is scalar multiplication. This
//! is a module rather than a field: values cannot be multiplied with each
//! other, which is exactly why [`Structure`](super::Structure) keeps the two
//! domains apart.

use super::Structure;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use rand::{CryptoRng, Rng};

/// Elliptic-curve structure: Zp scalars acting on Ristretto points.
#[derive(Clone, Copy, Debug, Default)]
pub struct EccStructure;

impl EccStructure {
    /// Create the structure.
    pub fn new() -> Self {
        Self
    }
}

impl Structure for EccStructure {
    type Scalar = Scalar;
    type Value = RistrettoPoint;

    fn scalar_zero(&self) -> Scalar {
        Scalar::ZERO
    }

    fn scalar_is_zero(&self, a: &Scalar) -> bool {
        *a == Scalar::ZERO
    }

    fn scalar_sub(&self, a: &Scalar, b: &Scalar) -> Scalar {
        a - b
    }

    fn scalar_mul(&self, a: &Scalar, b: &Scalar) -> Scalar {
        a * b
    }

    fn scalar_inv(&self, a: &Scalar) -> Scalar {
        a.invert()
    }

    fn value_zero(&self) -> RistrettoPoint {
        RistrettoPoint::identity()
    }

    fn value_is_zero(&self, v: &RistrettoPoint) -> bool {
        *v == RistrettoPoint::identity()
    }

    fn value_add(&self, a: &RistrettoPoint, b: &RistrettoPoint) -> RistrettoPoint {
        a + b
    }

    fn value_sub(&self, a: &RistrettoPoint, b: &RistrettoPoint) -> RistrettoPoint {
        a - b
    }

    fn scalar_mul_value(&self, a: &Scalar, v: &RistrettoPoint) -> RistrettoPoint {
        a * v
    }

    fn random_nonzero_value<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> RistrettoPoint {
        loop {
            let v = RistrettoPoint::random(rng);
            if v != RistrettoPoint::identity() {
                return v;
            }
        }
    }
}
