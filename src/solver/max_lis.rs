//! Rank-revealing extraction of a maximal linearly independent row subset.

use anyhow::{bail, Result};
use std::collections::BTreeSet;

use super::SolverError;
use crate::structure::Structure;

/// Finds a maximal linearly independent subset of rows without mutating the
/// caller's matrix.
pub struct MaxLisFinder<S: Structure> {
    structure: S,
}

impl<S: Structure> MaxLisFinder<S> {
    /// Create a finder over the given structure.
    pub fn new(structure: S) -> Self {
        Self { structure }
    }

    /// Original indices of a maximal linearly independent subset of the rows
    /// of `lhs`.
    ///
    /// The matrix is copied and reduced to row-echelon form while the
    /// original index of every row is carried through the pivot swaps; the
    /// rows that end up holding a pivot are the answer. A single-row matrix
    /// is returned as-is: callers guarantee no all-zero rows.
    pub fn lis_rows(&self, lhs: &[Vec<S::Scalar>]) -> Result<BTreeSet<usize>> {
        let n_rows = lhs.len();
        if n_rows == 0 {
            return Ok(BTreeSet::new());
        }
        let n_columns = lhs[0].len();
        if n_columns == 0 {
            bail!(SolverError::EmptyRows);
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
        if n_rows == 1 {
            return Ok(BTreeSet::from([0]));
        }

        let s = &self.structure;
        let mut work: Vec<Vec<S::Scalar>> = lhs.to_vec();
        let mut labels: Vec<usize> = (0..n_rows).collect();
        let mut lis_rows = BTreeSet::new();

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
                labels.swap(row, max);
            }
            if s.scalar_is_zero(&work[row][i_column]) {
                n_zero_columns += 1;
                to = (n_rows + n_zero_columns).min(n_columns);
                i_column += 1;
                continue;
            }
            lis_rows.insert(labels[row]);

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
        Ok(lis_rows)
    }
}
