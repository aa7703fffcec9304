//! Band-structured Gaussian elimination.
//!
//! Every row of a band system is nonzero only on a contiguous run of `w`
//! columns starting at a row-specific offset, so a row is stored as its
//! offset plus a window of exactly `w` entries ([`BandRow`]); columns outside
//! the window are implicitly zero. Rows are sorted by offset before
//! reduction, and the offsets stay ascending below the processed prefix for
//! the whole elimination — that is what lets every pivot search and
//! elimination scan stop at the first row whose window starts past the pivot
//! column, turning the per-row cost from `O(n_columns)` into `O(w)`.
//!
//! Unlike the dense solver, the forward sweep never touches rows above the
//! pivot: rescaling a finished row would smear its nonzero run past `w` and
//! break the window representation. All resolution is deferred to a single
//! reverse pass over the recorded pivots.

use anyhow::{bail, Result};
use itertools::Itertools;
use rand::{CryptoRng, Rng};

use super::{RowEchelonFormInfo, SolverError, SystemInfo};
use crate::structure::Structure;

/// One row of a band system: a window of entries covering the columns
/// `[start, start + w)`.
#[derive(Clone, Debug)]
pub struct BandRow<T> {
    start: usize,
    window: Vec<T>,
}

impl<T> BandRow<T> {
    /// Create a row whose window covers `[start, start + window.len())`.
    pub fn new(start: usize, window: Vec<T>) -> Self {
        Self { start, window }
    }

    /// First column covered by the window.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The window entries.
    pub fn window(&self) -> &[T] {
        &self.window
    }

    /// Entry at an absolute column; `None` outside the window (an implicit
    /// zero).
    pub fn get(&self, column: usize) -> Option<&T> {
        if column < self.start || column >= self.start + self.window.len() {
            None
        } else {
            Some(&self.window[column - self.start])
        }
    }
}

/// Band linear-system solver with the same contract as
/// [`DenseLinearSolver`](super::DenseLinearSolver).
pub struct BandLinearSolver<S: Structure, RNG: CryptoRng + Rng> {
    structure: S,
    rng: RNG,
}

impl<S: Structure, RNG: CryptoRng + Rng> BandLinearSolver<S, RNG> {
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
    /// `lhs` and `rhs` are reduced (and reordered) in place; `result`
    /// (length `n_columns`) is fully overwritten. On
    /// [`SystemInfo::Inconsistent`] the result content is unspecified.
    pub fn free_solve(
        &mut self,
        lhs: &mut [BandRow<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
    ) -> Result<SystemInfo> {
        self.solve(lhs, n_columns, rhs, result, false)
    }

    /// Solve with free variables drawn uniformly from the nonzero values.
    pub fn full_solve(
        &mut self,
        lhs: &mut [BandRow<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
    ) -> Result<SystemInfo> {
        self.solve(lhs, n_columns, rhs, result, true)
    }

    fn solve(
        &mut self,
        lhs: &mut [BandRow<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
        result: &mut [S::Value],
        is_full: bool,
    ) -> Result<SystemInfo> {
        check_inputs(lhs, n_columns, rhs, result)?;

        for entry in result.iter_mut() {
            *entry = self.structure.value_zero();
        }

        if lhs.is_empty() {
            if is_full {
                for entry in result.iter_mut() {
                    *entry = self.structure.random_nonzero_value(&mut self.rng);
                }
            }
            return Ok(SystemInfo::Consistent);
        }

        sort_by_start(lhs, rhs);
        let info = self.row_echelon_form(lhs, n_columns, rhs);
        Ok(self.back_substitute(lhs, n_columns, rhs, result, &info, is_full))
    }

    fn row_echelon_form(
        &self,
        lhs: &mut [BandRow<S::Scalar>],
        n_columns: usize,
        rhs: &mut [S::Value],
    ) -> RowEchelonFormInfo {
        let s = &self.structure;
        let n_rows = lhs.len();
        let width = lhs[0].window.len();
        let mut max_lis_columns = Vec::with_capacity(n_rows);
        let mut n_zero_columns = 0;
        let mut to = n_rows.min(n_columns);
        let mut i_column = 0;
        while i_column < to {
            let row = i_column - n_zero_columns;
            let zero_at = |band: &BandRow<S::Scalar>| {
                band.get(i_column).map_or(true, |v| s.scalar_is_zero(v))
            };
            if zero_at(&lhs[row]) {
                // pivot search below; ascending starts end it early
                let mut max = row;
                for i_row in (row + 1)..n_rows {
                    if lhs[i_row].start > i_column {
                        break;
                    }
                    if !zero_at(&lhs[i_row]) {
                        max = i_row;
                        break;
                    }
                }
                if max != row {
                    // the displaced row moves down; align its window to the
                    // incoming row's start so the starts stay ascending. Its
                    // dropped leading entries are already-eliminated zeros.
                    let target = lhs[max].start;
                    shift_start(s, &mut lhs[row], target, width);
                    lhs.swap(row, max);
                    rhs.swap(row, max);
                }
            }
            if zero_at(&lhs[row]) {
                n_zero_columns += 1;
                to = (n_rows + n_zero_columns).min(n_columns);
                i_column += 1;
                continue;
            }
            max_lis_columns.push(i_column);

            let p_start = lhs[row].start;
            let p_end = p_start + width;
            let (pivot_lhs, below_lhs) = lhs.split_at_mut(row + 1);
            let pivot = &pivot_lhs[row];
            let (pivot_rhs, below_rhs) = rhs.split_at_mut(row + 1);
            let pivot_rhs = &pivot_rhs[row];
            for (below, below_rhs) in below_lhs.iter_mut().zip(below_rhs.iter_mut()) {
                if below.start > i_column {
                    break;
                }
                let Some(coeff) = below.get(i_column).cloned() else {
                    continue;
                };
                if s.scalar_is_zero(&coeff) {
                    continue;
                }
                let alpha = s.scalar_div(&coeff, &pivot.window[i_column - p_start]);
                let updated = s.value_sub(below_rhs, &s.scalar_mul_value(&alpha, pivot_rhs));
                *below_rhs = updated;
                for col in i_column..p_end {
                    let t = s.scalar_mul(&alpha, &pivot.window[col - p_start]);
                    let idx = col - below.start;
                    let updated = s.scalar_sub(&below.window[idx], &t);
                    below.window[idx] = updated;
                }
            }
            i_column += 1;
        }
        RowEchelonFormInfo::new(n_zero_columns, max_lis_columns)
    }

    // One reverse pass over the recorded pivots; rows were never rescaled, so
    // each pivot divides once here.
    fn back_substitute(
        &mut self,
        lhs: &[BandRow<S::Scalar>],
        n_columns: usize,
        rhs: &[S::Value],
        result: &mut [S::Value],
        info: &RowEchelonFormInfo,
        is_full: bool,
    ) -> SystemInfo {
        let n_rows = lhs.len();
        let pivots = info.max_lis_columns();

        for i_row in pivots.len()..n_rows {
            if !self.structure.value_is_zero(&rhs[i_row]) {
                return SystemInfo::Inconsistent;
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
        for (i_row, &i_column) in pivots.iter().enumerate().rev() {
            let band = &lhs[i_row];
            let end = band.start + band.window.len();
            let mut sum = s.value_zero();
            for col in (i_column + 1)..end {
                let coeff = &band.window[col - band.start];
                if !s.scalar_is_zero(coeff) {
                    sum = s.value_add(&sum, &s.scalar_mul_value(coeff, &result[col]));
                }
            }
            let inv = s.scalar_inv(&band.window[i_column - band.start]);
            result[i_column] = s.scalar_mul_value(&inv, &s.value_sub(&rhs[i_row], &sum));
        }
        SystemInfo::Consistent
    }
}

// Rewrite `band` so its window starts at `target` (>= its current start).
// Entries left behind must already be zero; entries sliding in are zero.
fn shift_start<S: Structure>(
    s: &S,
    band: &mut BandRow<S::Scalar>,
    target: usize,
    width: usize,
) {
    let delta = target - band.start;
    if delta == 0 {
        return;
    }
    if delta >= width {
        for entry in band.window.iter_mut() {
            *entry = s.scalar_zero();
        }
    } else {
        band.window.rotate_left(delta);
        for entry in band.window[width - delta..].iter_mut() {
            *entry = s.scalar_zero();
        }
    }
    band.start = target;
}

// Stable sort by window start, moving lhs and rhs rows together.
fn sort_by_start<T, V>(lhs: &mut [BandRow<T>], rhs: &mut [V]) {
    let n = lhs.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| lhs[i].start);
    // sorted position of each original row
    let mut pos = vec![0; n];
    for (sorted_i, &orig) in order.iter().enumerate() {
        pos[orig] = sorted_i;
    }
    for i in 0..n {
        while pos[i] != i {
            let j = pos[i];
            lhs.swap(i, j);
            rhs.swap(i, j);
            pos.swap(i, j);
        }
    }
}

fn check_inputs<T, V>(
    lhs: &[BandRow<T>],
    n_columns: usize,
    rhs: &[V],
    result: &[V],
) -> Result<()> {
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
    if result.len() != n_columns {
        bail!(SolverError::ResultLengthMismatch {
            len: result.len(),
            expected: n_columns,
        });
    }
    if !lhs.is_empty() {
        let width = match lhs.iter().map(|band| band.window.len()).all_equal_value() {
            Ok(width) if width > 0 => width,
            _ => bail!(SolverError::BandWidthMismatch),
        };
        for (index, band) in lhs.iter().enumerate() {
            if band.start + width > n_columns {
                bail!(SolverError::BandOutOfRange {
                    index,
                    start: band.start,
                    width,
                    n_columns,
                });
            }
        }
    }
    Ok(())
}
