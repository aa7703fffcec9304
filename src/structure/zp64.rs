//! A machine-word prime field Zp64.

use super::Structure;
use rand::{CryptoRng, Rng};

/// Zp for a prime that fits in a `u64`; products go through `u128`.
#[derive(Clone, Copy, Debug)]
pub struct Zp64Structure {
    modulus: u64,
}

impl Zp64Structure {
    /// Create the structure for a prime modulus `p`.
    pub fn new(modulus: u64) -> Self {
        assert!(modulus > 2, "modulus must be an odd prime");
        Self { modulus }
    }

    /// The field modulus.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.modulus as u128) as u64
    }

    fn pow_mod(&self, mut base: u64, mut exp: u64) -> u64 {
        let mut acc = 1u64;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = self.mul_mod(acc, base);
            }
            base = self.mul_mod(base, base);
            exp >>= 1;
        }
        acc
    }
}

impl Structure for Zp64Structure {
    type Scalar = u64;
    type Value = u64;

    fn scalar_zero(&self) -> u64 {
        0
    }

    fn scalar_is_zero(&self, a: &u64) -> bool {
        *a == 0
    }

    fn scalar_sub(&self, a: &u64, b: &u64) -> u64 {
        ((self.modulus as u128 + *a as u128 - *b as u128) % self.modulus as u128) as u64
    }

    fn scalar_mul(&self, a: &u64, b: &u64) -> u64 {
        self.mul_mod(*a, *b)
    }

    fn scalar_inv(&self, a: &u64) -> u64 {
        self.pow_mod(*a, self.modulus - 2)
    }

    fn value_zero(&self) -> u64 {
        0
    }

    fn value_is_zero(&self, v: &u64) -> bool {
        *v == 0
    }

    fn value_add(&self, a: &u64, b: &u64) -> u64 {
        ((*a as u128 + *b as u128) % self.modulus as u128) as u64
    }

    fn value_sub(&self, a: &u64, b: &u64) -> u64 {
        self.scalar_sub(a, b)
    }

    fn scalar_mul_value(&self, a: &u64, v: &u64) -> u64 {
        self.mul_mod(*a, *v)
    }

    fn random_nonzero_value<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> u64 {
        rng.gen_range(1..self.modulus)
    }
}
