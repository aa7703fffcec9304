//! Linear-system solvers for OKVE-style encodings.
//!
//! Every solver here reduces a system `lhs * x = rhs` with at least as many
//! columns as rows, so the interesting case is the under-determined one:
//!
//! ```text
//! ⎡1 0 1 0 1 0 ...| y_1 ⎤
//! ⎢0 1 1 0 0 1 ...| y_2 ⎥
//! ⎣0 0 0 1 1 1 ...| y_3 ⎦
//! ```
//!
//! After reduction the pivot columns are determined by the equations while
//! the remaining free columns can be anything. The two entry points differ
//! only in the free-variable policy:
//!
//! - `free_solve` leaves every free column at zero;
//! - `full_solve` draws every free column uniformly at random from the
//!   nonzero values, so the returned vector is a uniform sample from the
//!   solution space. Encodings that are published to another party use this
//!   one, since a fixed zero fill would reveal which positions were
//!   unconstrained.
//!
//! Whether a system is solvable at all is a first-class outcome
//! ([`SystemInfo`]), not an error; errors are reserved for malformed inputs
//! ([`SolverError`]).
//!
//! [`DenseLinearSolver`] works on full-width rows over any
//! [`Structure`](crate::structure::Structure). [`BandLinearSolver`] is the
//! near-linear variant for rows whose nonzero run has a fixed width.
//! [`MaxLisFinder`] reuses the reduction to extract a maximal linearly
//! independent subset of rows without touching the caller's matrix.

use thiserror::Error;

pub mod band;
pub mod dense;
pub mod max_lis;

pub use band::{BandLinearSolver, BandRow};
pub use dense::DenseLinearSolver;
pub use max_lis::MaxLisFinder;

#[cfg(test)]
pub(crate) mod test_utils;

/// Whether a linear system has at least one solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemInfo {
    /// The system is solvable; the result buffer holds a solution.
    Consistent,
    /// The system has no solution; the result buffer is unspecified.
    Inconsistent,
}

/// Immutable descriptor of a finished row-echelon reduction.
///
/// Produced once per reduction and consumed by back-substitution.
#[derive(Clone, Debug)]
pub struct RowEchelonFormInfo {
    zero_column_count: usize,
    max_lis_columns: Vec<usize>,
}

impl RowEchelonFormInfo {
    pub(crate) fn new(zero_column_count: usize, max_lis_columns: Vec<usize>) -> Self {
        Self {
            zero_column_count,
            max_lis_columns,
        }
    }

    /// Number of free columns found while scanning for pivots.
    pub fn zero_column_count(&self) -> usize {
        self.zero_column_count
    }

    /// Pivot columns in ascending order; a maximal linearly independent
    /// column set. Pivot `i` lives in row `i` of the reduced matrix.
    pub fn max_lis_columns(&self) -> &[usize] {
        &self.max_lis_columns
    }
}

/// Malformed-input errors, raised before any reduction work starts.
#[derive(Debug, Error)]
pub enum SolverError {
    /// lhs and rhs disagree on the number of equations.
    #[error("lhs has {lhs_rows} rows but rhs has {rhs_rows} entries")]
    RowCountMismatch {
        /// Rows in the lhs matrix.
        lhs_rows: usize,
        /// Entries in the rhs vector.
        rhs_rows: usize,
    },
    /// More equations than unknowns.
    #[error("over-determined system: {n_rows} rows for {n_columns} columns")]
    OverDetermined {
        /// Rows in the system.
        n_rows: usize,
        /// Columns in the system.
        n_columns: usize,
    },
    /// A dense row does not have exactly `n_columns` entries.
    #[error("row {index} has {len} entries, expected {expected}")]
    RowLengthMismatch {
        /// Offending row.
        index: usize,
        /// Its length.
        len: usize,
        /// The expected length.
        expected: usize,
    },
    /// The result buffer is not `n_columns` long.
    #[error("result has {len} entries, expected {expected}")]
    ResultLengthMismatch {
        /// Length of the supplied buffer.
        len: usize,
        /// The expected length.
        expected: usize,
    },
    /// A matrix with zero-width rows.
    #[error("matrix rows are empty")]
    EmptyRows,
    /// Band windows disagree on their width, or the width is zero.
    #[error("band windows must all have the same nonzero width")]
    BandWidthMismatch,
    /// A band window sticks out of the matrix.
    #[error("band row {index} starts at {start} with width {width}, but there are {n_columns} columns")]
    BandOutOfRange {
        /// Offending row.
        index: usize,
        /// Its start offset.
        start: usize,
        /// The common window width.
        width: usize,
        /// Columns in the system.
        n_columns: usize,
    },
}
