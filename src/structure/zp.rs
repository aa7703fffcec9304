//! The prime field Zp on arbitrary-precision integers.

use super::Structure;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};

/// Zp with a runtime modulus; coefficients and values are both residues.
///
/// The modulus must be an odd prime: inversion uses Fermat's little theorem,
/// `a^(p-2) mod p`.
#[derive(Clone, Debug)]
pub struct ZpStructure {
    modulus: BigUint,
}

impl ZpStructure {
    /// Create the structure for a prime modulus `p`.
    pub fn new(modulus: BigUint) -> Self {
        assert!(modulus > BigUint::from(2u8), "modulus must be an odd prime");
        Self { modulus }
    }

    /// The field modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }
}

impl Structure for ZpStructure {
    type Scalar = BigUint;
    type Value = BigUint;

    fn scalar_zero(&self) -> BigUint {
        BigUint::zero()
    }

    fn scalar_is_zero(&self, a: &BigUint) -> bool {
        a.is_zero()
    }

    fn scalar_sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        ((&self.modulus + a) - b) % &self.modulus
    }

    fn scalar_mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    fn scalar_inv(&self, a: &BigUint) -> BigUint {
        let exp = &self.modulus - BigUint::from(2u8);
        a.modpow(&exp, &self.modulus)
    }

    fn value_zero(&self) -> BigUint {
        BigUint::zero()
    }

    fn value_is_zero(&self, v: &BigUint) -> bool {
        v.is_zero()
    }

    fn value_add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    fn value_sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        ((&self.modulus + a) - b) % &self.modulus
    }

    fn scalar_mul_value(&self, a: &BigUint, v: &BigUint) -> BigUint {
        (a * v) % &self.modulus
    }

    fn random_nonzero_value<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> BigUint {
        loop {
            let v = rng.gen_biguint_below(&self.modulus);
            if !v.is_zero() {
                return v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scuttlebutt::AesRng;

    fn mersenne_127() -> BigUint {
        (BigUint::one() << 127) - 1u8
    }

    #[test]
    fn test_inverse() {
        let s = ZpStructure::new(mersenne_127());
        let mut rng = AesRng::new();

        for _ in 0..20 {
            let a = s.random_nonzero_value(&mut rng);
            let inv = s.scalar_inv(&a);
            assert!(s.scalar_mul(&a, &inv).is_one());
        }
    }

    #[test]
    fn test_sub_wraps() {
        let s = ZpStructure::new(BigUint::from(17u8));

        let a = BigUint::from(3u8);
        let b = BigUint::from(11u8);
        assert_eq!(s.scalar_sub(&a, &b), BigUint::from(9u8));
        assert_eq!(s.value_add(&s.value_sub(&a, &b), &b), a);
    }
}
