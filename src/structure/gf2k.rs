//! Binary extension fields GF(2^k), backed by scuttlebutt.

use super::Structure;
use rand::distributions::{Distribution, Standard};
use rand::{CryptoRng, Rng};
use scuttlebutt::field::FiniteField as FF;
use std::marker::PhantomData;

/// GF(2^k) with coefficients and values both field elements.
///
/// `F` picks the concrete field, e.g. `scuttlebutt::field::F128b` for
/// GF(2^128).
#[derive(Clone, Copy, Debug)]
pub struct Gf2kStructure<F: FF>(PhantomData<F>);

impl<F: FF> Gf2kStructure<F> {
    /// Create the structure.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<F: FF> Structure for Gf2kStructure<F>
where
    Standard: Distribution<F>,
{
    type Scalar = F;
    type Value = F;

    fn scalar_zero(&self) -> F {
        F::zero()
    }

    fn scalar_is_zero(&self, a: &F) -> bool {
        *a == F::zero()
    }

    fn scalar_sub(&self, a: &F, b: &F) -> F {
        *a - *b
    }

    fn scalar_mul(&self, a: &F, b: &F) -> F {
        *a * *b
    }

    fn scalar_inv(&self, a: &F) -> F {
        F::one() / *a
    }

    fn value_zero(&self) -> F {
        F::zero()
    }

    fn value_is_zero(&self, v: &F) -> bool {
        *v == F::zero()
    }

    fn value_add(&self, a: &F, b: &F) -> F {
        *a + *b
    }

    fn value_sub(&self, a: &F, b: &F) -> F {
        *a - *b
    }

    fn scalar_mul_value(&self, a: &F, v: &F) -> F {
        *a * *v
    }

    fn random_nonzero_value<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> F {
        loop {
            let v: F = rng.gen();
            if v != F::zero() {
                return v;
            }
        }
    }
}
