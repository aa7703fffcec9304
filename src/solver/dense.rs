//! Dense Gaussian elimination over any [`Structure`].
//!
//! The matrix is a plain row-of-rows; the reduction mutates `lhs` and `rhs`
//! in place and swaps whole rows, so the caller must keep a copy if it still
//! needs the original system.
//!
//! # Example
//!
//! Solving over GF(2) (bit strings of length 1):
//!
//! ```
//! use okve_linear_solver::solver::{DenseLinearSolver, SystemInfo};
//! use okve_linear_solver::structure::BitVectorStructure;
//! use scuttlebutt::AesRng;
//!
//! let mut solver = DenseLinearSolver::new(BitVectorStructure::new(1), AesRng::new());
//!
//! // x0 + x1 = 1, x1 + x2 = 0
//! let mut lhs = vec![vec![true, true, false], vec![false, true, true]];
//! let mut rhs = vec![vec![1u8], vec![0u8]];
//! let mut result = vec![vec![0u8]; 3];
//!
//! let info = solver.free_solve(&mut lhs, 3, &mut rhs, &mut result).unwrap();
//! assert_eq!(info, SystemInfo::Consistent);
//! // column 2 is free and forced to zero
//! assert_eq!(result, vec![vec![1u8], vec![0u8], vec![0u8]]);
//! ```

use anyhow::{bail, Result};
use rand::{CryptoRng, Rng};

use super::{RowEchelonFormInfo, SolverError, SystemInfo};
use crate::structure::Structure;

/// Dense linear-system solver for `lhs * x = rhs` with `n_rows <= n_columns`.
pub struct DenseLinearSolver<S: Structure, RNG: CryptoRng + Rng> {
    structure: S,
    rng: RNG,
}

impl<S: Structure, RNG: CryptoRng + Rng> DenseLinearSolver<S, RNG> {
    /// Create a solver owning its structure and random generator.
    pub fn new(structure: S, rng: RNG) -> Self {
        Self { structure, rng }
    }

    /// The structure this solver operates over.
    pub fn structure(&self) -> &S {
        &self.structure
    }

    /// Solve with free variables forced to zero.
    ///
    /// `lhs` and `rhs` are reduced in place; `result` (length `n_columns`)
    /// is fully overwritten. On [`SystemInfo::Inconsistent`] the result
    /// content is unspecified.
    pub fn free_solve(
        &mut self,
        lhs: &mut [Vec<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
    ) -> Result<SystemInfo> {
        self.solve(lhs, n_columns, rhs, result, false)
    }

    /// Solve with free variables drawn uniformly from the nonzero values.
    ///
    /// The returned assignment is a uniform sample from the affine solution
    /// space, which is what published encodings need.
    pub fn full_solve(
        &mut self,
        lhs: &mut [Vec<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
    ) -> Result<SystemInfo> {
        self.solve(lhs, n_columns, rhs, result, true)
    }

    fn solve(
        &mut self,
        lhs: &mut [Vec<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
        is_full: bool,
    ) -> Result<SystemInfo> {
        check_inputs(lhs, n_columns, rhs, result)?;

        for entry in result.iter_mut() {
            *entry = self.structure.value_zero();
        }

        let n_rows = lhs.len();
        if n_rows == 0 {
            if is_full {
                for entry in result.iter_mut() {
                    *entry = self.structure.random_nonzero_value(&mut self.rng);
                }
            }
            return Ok(SystemInfo::Consistent);
        }
        if n_rows == 1 {
            return Ok(self.solve_single_row(lhs, n_columns, rhs, result, is_full));
        }

        let info = self.row_echelon_form(lhs, n_columns, rhs);
        if info.zero_column_count() == 0 && n_columns == n_rows {
            self.back_substitute_full_rank(lhs, rhs, result);
            Ok(SystemInfo::Consistent)
        } else {
            Ok(self.back_substitute_under_determined(lhs, n_columns, rhs, result, &info, is_full))
        }
    }

    // A single equation needs no elimination: the first nonzero coefficient
    // is the pivot, everything else is free.
    fn solve_single_row(
        &mut self,
        lhs: &mut [Vec<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
        is_full: bool,
    ) -> SystemInfo {
        let s = &self.structure;
        let row = &lhs[0];
        let Some(pos) = (0..n_columns).find(|&j| !s.scalar_is_zero(&row[j])) else {
            // 0 = rhs: solvable exactly when rhs is zero
            if !s.value_is_zero(&rhs[0]) {
                return SystemInfo::Inconsistent;
            }
            if is_full {
                for entry in result.iter_mut() {
                    *entry = self.structure.random_nonzero_value(&mut self.rng);
                }
            }
            return SystemInfo::Consistent;
        };

        if is_full {
            for j in 0..n_columns {
                if j == pos {
                    continue;
                }
                result[j] = self.structure.random_nonzero_value(&mut self.rng);
                let s = &self.structure;
                if !s.scalar_is_zero(&lhs[0][j]) {
                    let t = s.value_sub(&rhs[0], &s.scalar_mul_value(&lhs[0][j], &result[j]));
                    rhs[0] = t;
                }
            }
        }
        let s = &self.structure;
        let inv = s.scalar_inv(&lhs[0][pos]);
        result[pos] = s.scalar_mul_value(&inv, &rhs[0]);
        SystemInfo::Consistent
    }

    /// Reduce `lhs * x = rhs` to row-echelon form in place.
    ///
    /// Candidate pivot columns are scanned left to right; a column with no
    /// nonzero entry at or below the pivot row is declared free and extends
    /// the scan window by one, since a free column consumes no row.
    fn row_echelon_form(
        &self,
        lhs: &mut [Vec<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
    ) -> RowEchelonFormInfo {
        let s = &self.structure;
        let n_rows = lhs.len();
        let mut max_lis_columns = Vec::with_capacity(n_rows);
        let mut n_zero_columns = 0;
        let mut to = n_rows.min(n_columns);
        let mut i_column = 0;
        while i_column < to {
            let row = i_column - n_zero_columns;
            if s.scalar_is_zero(&lhs[row][i_column]) {
                // pivot search below
                let mut max = row;
                for i_row in (row + 1)..n_rows {
                    if !s.scalar_is_zero(&lhs[i_row][i_column]) {
                        max = i_row;
                        break;
                    }
                }
                lhs.swap(row, max);
                rhs.swap(row, max);
            }
            if s.scalar_is_zero(&lhs[row][i_column]) {
                n_zero_columns += 1;
                to = (n_rows + n_zero_columns).min(n_columns);
                i_column += 1;
                continue;
            }
            max_lis_columns.push(i_column);

            let (pivot_lhs, below_lhs) = lhs.split_at_mut(row + 1);
            let pivot_row = &pivot_lhs[row];
            let (pivot_rhs, below_rhs) = rhs.split_at_mut(row + 1);
            let pivot_rhs = &pivot_rhs[row];
            for (below, below_rhs) in below_lhs.iter_mut().zip(below_rhs.iter_mut()) {
                if s.scalar_is_zero(&below[i_column]) {
                    continue;
                }
                let alpha = s.scalar_div(&below[i_column], &pivot_row[i_column]);
                let updated = s.value_sub(below_rhs, &s.scalar_mul_value(&alpha, pivot_rhs));
                *below_rhs = updated;
                for i_col in i_column..n_columns {
                    let t = s.scalar_mul(&alpha, &pivot_row[i_col]);
                    let updated = s.scalar_sub(&below[i_col], &t);
                    below[i_col] = updated;
                }
            }
            i_column += 1;
        }
        RowEchelonFormInfo::new(n_zero_columns, max_lis_columns)
    }

    // Square full-rank case: every column has its pivot on the diagonal, so
    // plain bottom-up substitution resolves the whole vector.
    fn back_substitute_full_rank(
        &self,
        lhs: &[Vec<S::Scalar>],
        rhs: &[S::Value],
        result: &mut [S::Value],
    ) {
        let s = &self.structure;
        let n = lhs.len();
        for i in (0..n).rev() {
            let mut sum = s.value_zero();
            for j in (i + 1)..n {
                if !s.scalar_is_zero(&lhs[i][j]) {
                    sum = s.value_add(&sum, &s.scalar_mul_value(&lhs[i][j], &result[j]));
                }
            }
            let inv = s.scalar_inv(&lhs[i][i]);
            result[i] = s.scalar_mul_value(&inv, &s.value_sub(&rhs[i], &sum));
        }
    }

    // Under-determined case. Pivot rows are rescaled to a unit pivot and the
    // pivot column is cleared from the rows above, so afterwards each pivot
    // equation only mentions its own pivot and free columns. Free columns are
    // assigned first (zero or uniformly random), pivots by substitution.
    fn back_substitute_under_determined(
        &mut self,
        lhs: &mut [Vec<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
        info: &RowEchelonFormInfo,
        is_full: bool,
    ) -> SystemInfo {
        let n_rows = lhs.len();
        let pivots = info.max_lis_columns();

        // rows that got no pivot are pure "0 = rhs" constraints
        for i_row in pivots.len()..n_rows {
            if !self.structure.value_is_zero(&rhs[i_row]) {
                return SystemInfo::Inconsistent;
            }
        }

        let s = &self.structure;
        for (i_row, &i_column) in pivots.iter().enumerate() {
            let inv = s.scalar_inv(&lhs[i_row][i_column]);
            for j in i_column..n_columns {
                let t = s.scalar_mul(&inv, &lhs[i_row][j]);
                lhs[i_row][j] = t;
            }
            let t = s.scalar_mul_value(&inv, &rhs[i_row]);
            rhs[i_row] = t;

            let (above_lhs, pivot_lhs) = lhs.split_at_mut(i_row);
            let pivot_row = &pivot_lhs[0];
            let (above_rhs, pivot_rhs) = rhs.split_at_mut(i_row);
            let pivot_rhs = &pivot_rhs[0];
            for (above, above_rhs) in above_lhs.iter_mut().zip(above_rhs.iter_mut()) {
                if s.scalar_is_zero(&above[i_column]) {
                    continue;
                }
                let alpha = above[i_column].clone();
                let updated = s.value_sub(above_rhs, &s.scalar_mul_value(&alpha, pivot_rhs));
                *above_rhs = updated;
                for j in i_column..n_columns {
                    let t = s.scalar_mul(&alpha, &pivot_row[j]);
                    let updated = s.scalar_sub(&above[j], &t);
                    above[j] = updated;
                }
            }
        }

        if is_full {
            let mut is_pivot = vec![false; n_columns];
            for &c in pivots {
                is_pivot[c] = true;
            }
            for (c, entry) in result.iter_mut().enumerate() {
                if !is_pivot[c] {
                    *entry = self.structure.random_nonzero_value(&mut self.rng);
                }
            }
        }

        let s = &self.structure;
        for (i_row, &i_column) in pivots.iter().enumerate() {
            let mut sum = s.value_zero();
            for j in (i_column + 1)..n_columns {
                if !s.scalar_is_zero(&lhs[i_row][j]) {
                    sum = s.value_add(&sum, &s.scalar_mul_value(&lhs[i_row][j], &result[j]));
                }
            }
            result[i_column] = s.value_sub(&rhs[i_row], &sum);
        }
        SystemInfo::Consistent
    }
}

fn check_inputs<T, V>(lhs: &[Vec<T>], n_columns: usize, rhs: &[V], result: &[V]) -> Result<()> {
    if lhs.len() != rhs.len() {
        bail!(SolverError::RowCountMismatch {
            lhs_rows: lhs.len(),
            rhs_rows: rhs.len(),
        });
    }
    if lhs.len() > n_columns {
        bail!(SolverError::OverDetermined {
            n_rows: lhs.len(),
            n_columns,
        });
    }
    for (index, row) in lhs.iter().enumerate() {
        if row.len() != n_columns {
            bail!(SolverError::RowLengthMismatch {
                index,
                len: row.len(),
                expected: n_columns,
            });
        }
    }
    if result.len() != n_columns {
        bail!(SolverError::ResultLengthMismatch {
            len: result.len(),
            expected: n_columns,
        });
    }
    Ok(())
}
