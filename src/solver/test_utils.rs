//! Helpers shared by the solver tests: random systems and reference
//! multiplication against the original (pre-reduction) matrices.

use crate::solver::band::BandRow;
use crate::structure::{
    BitVectorStructure, EccStructure, Gf2kStructure, Structure, Zp64Structure, ZpStructure,
};
use curve25519_dalek::scalar::Scalar;
use itertools::izip;
use num_bigint::RandBigInt;
use rand::distributions::{Distribution, Standard};
use rand::{CryptoRng, Rng};
use scuttlebutt::field::FiniteField as FF;

/// Structures that can additionally sample plain coefficients, so the tests
/// can build random systems. The solvers themselves never need this.
pub(crate) trait SampleScalar: Structure {
    fn random_scalar<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> Self::Scalar;

    fn random_nonzero_scalar<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> Self::Scalar {
        loop {
            let a = self.random_scalar(rng);
            if !self.scalar_is_zero(&a) {
                return a;
            }
        }
    }
}

impl SampleScalar for BitVectorStructure {
    fn random_scalar<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> bool {
        rng.gen()
    }
}

impl<F: FF> SampleScalar for Gf2kStructure<F>
where
    Standard: Distribution<F>,
{
    fn random_scalar<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> F {
        rng.gen()
    }
}

impl SampleScalar for ZpStructure {
    fn random_scalar<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> num_bigint::BigUint {
        rng.gen_biguint_below(self.modulus())
    }
}

impl SampleScalar for Zp64Structure {
    fn random_scalar<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> u64 {
        rng.gen_range(0..self.modulus())
    }
}

impl SampleScalar for EccStructure {
    fn random_scalar<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> Scalar {
        Scalar::random(rng)
    }
}

pub(crate) fn mat_vec_mul<S: Structure>(
    s: &S,
    lhs: &[Vec<S::Scalar>],
    x: &[S::Value],
) -> Vec<S::Value> {
    lhs.iter()
        .map(|row| {
            let mut sum = s.value_zero();
            for (a, v) in izip!(row.iter(), x.iter()) {
                if !s.scalar_is_zero(a) {
                    sum = s.value_add(&sum, &s.scalar_mul_value(a, v));
                }
            }
            sum
        })
        .collect()
}

pub(crate) fn band_mat_vec_mul<S: Structure>(
    s: &S,
    lhs: &[BandRow<S::Scalar>],
    x: &[S::Value],
) -> Vec<S::Value> {
    lhs.iter()
        .map(|band| {
            let mut sum = s.value_zero();
            for (offset, a) in band.window().iter().enumerate() {
                if !s.scalar_is_zero(a) {
                    sum = s.value_add(&sum, &s.scalar_mul_value(a, &x[band.start() + offset]));
                }
            }
            sum
        })
        .collect()
}

pub(crate) fn expand_band<S: Structure>(
    s: &S,
    band: &BandRow<S::Scalar>,
    n_columns: usize,
) -> Vec<S::Scalar> {
    let mut row = vec![s.scalar_zero(); n_columns];
    for (offset, coeff) in band.window().iter().enumerate() {
        row[band.start() + offset] = coeff.clone();
    }
    row
}

/// A random consistent dense system: rhs is `lhs * x` for a random `x`.
pub(crate) fn random_system<S, RNG>(
    s: &S,
    n_rows: usize,
    n_columns: usize,
    rng: &mut RNG,
) -> (Vec<Vec<S::Scalar>>, Vec<S::Value>)
where
    S: SampleScalar,
    RNG: CryptoRng + Rng,
{
    let lhs: Vec<Vec<S::Scalar>> = (0..n_rows)
        .map(|_| (0..n_columns).map(|_| s.random_scalar(rng)).collect())
        .collect();
    let x: Vec<S::Value> = (0..n_columns)
        .map(|_| s.random_nonzero_value(rng))
        .collect();
    let rhs = mat_vec_mul(s, &lhs, &x);
    (lhs, rhs)
}

/// A random consistent band system with uniform window width.
pub(crate) fn random_band_system<S, RNG>(
    s: &S,
    n_rows: usize,
    n_columns: usize,
    width: usize,
    rng: &mut RNG,
) -> (Vec<BandRow<S::Scalar>>, Vec<S::Value>)
where
    S: SampleScalar,
    RNG: CryptoRng + Rng,
{
    let lhs: Vec<BandRow<S::Scalar>> = (0..n_rows)
        .map(|_| {
            let start = rng.gen_range(0..=(n_columns - width));
            let window = (0..width).map(|_| s.random_scalar(rng)).collect();
            BandRow::new(start, window)
        })
        .collect();
    let x: Vec<S::Value> = (0..n_columns)
        .map(|_| s.random_nonzero_value(rng))
        .collect();
    let rhs = band_mat_vec_mul(s, &lhs, &x);
    (lhs, rhs)
}

/// Pivot columns of the row-echelon form of `lhs`, on a scratch copy.
pub(crate) fn pivot_columns<S: Structure>(s: &S, lhs: &[Vec<S::Scalar>]) -> Vec<usize> {
    let mut work: Vec<Vec<S::Scalar>> = lhs.to_vec();
    let n_rows = work.len();
    if n_rows == 0 {
        return Vec::new();
    }
    let n_columns = work[0].len();
    let mut pivots = Vec::new();
    let mut n_zero_columns = 0;
    let mut to = n_rows.min(n_columns);
    let mut i_column = 0;
    while i_column < to {
        let row = i_column - n_zero_columns;
        if s.scalar_is_zero(&work[row][i_column]) {
            let mut max = row;
            for i_row in (row + 1)..n_rows {
                if !s.scalar_is_zero(&work[i_row][i_column]) {
                    max = i_row;
                    break;
                }
            }
            work.swap(row, max);
        }
        if s.scalar_is_zero(&work[row][i_column]) {
            n_zero_columns += 1;
            to = (n_rows + n_zero_columns).min(n_columns);
            i_column += 1;
            continue;
        }
        pivots.push(i_column);
        let (pivot_rows, below_rows) = work.split_at_mut(row + 1);
        let pivot_row = &pivot_rows[row];
        for below in below_rows.iter_mut() {
            if s.scalar_is_zero(&below[i_column]) {
                continue;
            }
            let alpha = s.scalar_div(&below[i_column], &pivot_row[i_column]);
            for j in i_column..n_columns {
                let t = s.scalar_mul(&alpha, &pivot_row[j]);
                let updated = s.scalar_sub(&below[j], &t);
                below[j] = updated;
            }
        }
        i_column += 1;
    }
    pivots
}
