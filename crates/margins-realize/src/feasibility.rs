// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The Gale–Ryser realizability test.
//!
//! Let `R'` be the row sums sorted non-increasingly and `c_j` the column sums.
//! A binary matrix with these margins exists if and only if the totals agree and
//! for every `k` in `1..=R`
//!
//! ```text
//! L(k) = R'_1 + ... + R'_k  <=  U(k) = sum_j min(c_j, k)
//! ```
//!
//! `U(k)` is the number of ones the columns can place into any `k` rows. It is
//! accumulated from the conjugate of the column sums, `c*_t = #{ j : c_j >= t }`,
//! since `U(k) = c*_1 + ... + c*_k`. The conjugate is built from a histogram
//! of the column sums, so the whole test costs `O(R log R + C)`.
//!
//! The row permutation is produced by a stable sort, so equal row sums keep the
//! caller's relative order.

use margins_model::{index::RowIndex, margins::Margins};
use std::cmp::Reverse;

use crate::error::GenerationError;

/// The verdict of the Gale–Ryser test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeasibilityReport {
    /// A realization exists.
    Feasible {
        /// Number of prefix inequalities evaluated.
        prefix_checks: usize,
    },
    /// The totals of row and column sums differ.
    SumMismatch {
        row_total: usize,
        column_total: usize,
    },
    /// The prefix inequality fails for the first time at `k` (1-based).
    PrefixViolation {
        k: usize,
        row_prefix: usize,
        column_capacity: usize,
    },
}

impl FeasibilityReport {
    /// Returns `true` if a realization exists.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, FeasibilityReport::Feasible { .. })
    }

    /// Returns the number of prefix inequalities evaluated before the verdict.
    #[inline]
    pub fn prefix_checks(&self) -> usize {
        match *self {
            FeasibilityReport::Feasible { prefix_checks } => prefix_checks,
            FeasibilityReport::SumMismatch { .. } => 0,
            FeasibilityReport::PrefixViolation { k, .. } => k,
        }
    }

    /// Converts the report into a `Result`.
    pub fn into_result(self) -> Result<(), GenerationError> {
        match self {
            FeasibilityReport::Feasible { .. } => Ok(()),
            FeasibilityReport::SumMismatch {
                row_total,
                column_total,
            } => Err(GenerationError::SumMismatch {
                row_total,
                column_total,
            }),
            FeasibilityReport::PrefixViolation {
                k,
                row_prefix,
                column_capacity,
            } => Err(GenerationError::Infeasible {
                k,
                row_prefix,
                column_capacity,
            }),
        }
    }
}

impl std::fmt::Display for FeasibilityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeasibilityReport::Feasible { prefix_checks } => {
                write!(f, "Feasible(prefix_checks={})", prefix_checks)
            }
            FeasibilityReport::SumMismatch {
                row_total,
                column_total,
            } => write!(f, "SumMismatch({} != {})", row_total, column_total),
            FeasibilityReport::PrefixViolation {
                k,
                row_prefix,
                column_capacity,
            } => write!(
                f,
                "PrefixViolation(k={}, {} > {})",
                k, row_prefix, column_capacity
            ),
        }
    }
}

/// Returns the rows ordered by non-increasing sum, ties in original order.
///
/// # Examples
///
/// ```rust
/// # use margins_model::margins::Margins;
/// # use margins_realize::feasibility::sorted_row_order;
///
/// let margins = Margins::new(vec![1i64, 2, 1, 2], vec![2, 2, 2]).unwrap();
/// let order: Vec<usize> = sorted_row_order(&margins).iter().map(|r| r.get()).collect();
/// assert_eq!(order, vec![1, 3, 0, 2]);
/// ```
pub fn sorted_row_order<T>(margins: &Margins<T>) -> Vec<RowIndex> {
    let counts = margins.row_counts();
    let mut order: Vec<RowIndex> = RowIndex::range(counts.len()).collect();
    order.sort_by_key(|row| Reverse(counts[row.get()]));
    order
}

/// Returns the conjugate of the column sums: entry `t - 1` holds the number
/// of columns whose sum is at least `t`, for `t` in `1..=num_rows`.
pub fn column_conjugate<T>(margins: &Margins<T>) -> Vec<usize> {
    let num_rows = margins.num_rows();

    // Validation bounds every column sum by the row count.
    let mut histogram = vec![0usize; num_rows + 1];
    for &count in margins.column_counts() {
        histogram[count] += 1;
    }

    let mut conjugate = vec![0usize; num_rows];
    let mut at_least = 0;
    for t in (1..=num_rows).rev() {
        at_least += histogram[t];
        conjugate[t - 1] = at_least;
    }
    conjugate
}

/// Runs the Gale–Ryser test and reports the verdict in detail.
pub fn gale_ryser<T>(margins: &Margins<T>) -> FeasibilityReport {
    let row_total = margins.row_total();
    let column_total = margins.column_total();
    if row_total != column_total {
        return FeasibilityReport::SumMismatch {
            row_total,
            column_total,
        };
    }

    let counts = margins.row_counts();
    let order = sorted_row_order(margins);
    let conjugate = column_conjugate(margins);

    let mut row_prefix = 0usize;
    let mut column_capacity = 0usize;
    for (i, row) in order.iter().enumerate() {
        let k = i + 1;
        row_prefix += counts[row.get()];
        column_capacity += conjugate[i];
        if row_prefix > column_capacity {
            return FeasibilityReport::PrefixViolation {
                k,
                row_prefix,
                column_capacity,
            };
        }
    }

    FeasibilityReport::Feasible {
        prefix_checks: order.len(),
    }
}

/// Returns `Ok(())` if the margins are realizable.
///
/// # Errors
///
/// `GenerationError::SumMismatch` if the totals differ, otherwise
/// `GenerationError::Infeasible` for the first violated prefix.
#[inline]
pub fn check_feasibility<T>(margins: &Margins<T>) -> Result<(), GenerationError> {
    gale_ryser(margins).into_result()
}
