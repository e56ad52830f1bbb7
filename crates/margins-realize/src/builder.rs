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

//! Greedy construction of a realization.
//!
//! Columns are processed in order of non-increasing sum (stable on the column
//! index). Each column `j` with sum `d` places its ones into the `d` rows with
//! the largest remaining demand, ties going to the smaller row index, and then
//! decrements those demands. When the margins pass the Gale–Ryser test this
//! never runs out of rows, and every demand reaches zero after the last column.
//!
//! The sort orders are bookkeeping only: the returned matrix is indexed by the
//! caller's row and column positions. Identical margins always produce the
//! identical matrix.
//!
//! The row order is sorted once and then repaired after every column by merging
//! the decremented prefix back into the untouched rows, so construction costs
//! `O(R log R + R * C)`.

use crate::error::{GenerationError, InvariantViolation};
use margins_model::{
    index::{ColumnIndex, RowIndex},
    margins::Margins,
    matrix::BinaryMatrix,
};
use std::cmp::Reverse;

/// Returns the columns ordered by non-increasing sum, ties in original order.
pub fn column_order<T>(margins: &Margins<T>) -> Vec<ColumnIndex> {
    let counts = margins.column_counts();
    let mut order: Vec<ColumnIndex> = ColumnIndex::range(counts.len()).collect();
    order.sort_by_key(|column| Reverse(counts[column.get()]));
    order
}

/// Merges two runs ordered by `(Reverse(remaining), row)` into `out`.
fn merge_by_demand(
    left: &[RowIndex],
    right: &[RowIndex],
    remaining: &[usize],
    out: &mut Vec<RowIndex>,
) {
    let key = |row: RowIndex| (Reverse(remaining[row.get()]), row);

    out.clear();
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if key(left[i]) < key(right[j]) {
            out.push(left[i]);
            i += 1;
        } else {
            out.push(right[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
}

/// Builds a binary matrix realizing `margins`.
///
/// The margins must have passed `feasibility::check_feasibility`. For margins
/// that did not, the construction either stumbles on an
/// `InternalInvariantViolation` or, should it happen to finish, produces a
/// matrix the caller must not rely on.
///
/// # Errors
///
/// `GenerationError::InternalInvariantViolation` if a column cannot be filled
/// or a row keeps unplaced demand.
///
/// # Examples
///
/// ```rust
/// # use margins_model::margins::Margins;
/// # use margins_realize::builder::build_matrix;
///
/// let margins = Margins::new(vec![1i64, 2], vec![0, 1, 2]).unwrap();
/// let matrix = build_matrix(&margins).unwrap();
/// assert_eq!(matrix.to_rows(), vec![vec![0, 0, 1], vec![0, 1, 1]]);
/// ```
pub fn build_matrix<T>(margins: &Margins<T>) -> Result<BinaryMatrix, GenerationError> {
    let num_rows = margins.num_rows();
    let num_cols = margins.num_cols();
    let column_counts = margins.column_counts();

    let mut matrix = BinaryMatrix::new(num_rows, num_cols);
    let mut remaining: Vec<usize> = margins.row_counts().to_vec();

    // Invariant: ordered by (Reverse(remaining), row).
    let mut candidates: Vec<RowIndex> = RowIndex::range(num_rows).collect();
    candidates.sort_by_key(|&row| Reverse(remaining[row.get()]));
    let mut merged: Vec<RowIndex> = Vec::with_capacity(num_rows);

    for column in column_order(margins) {
        let needed = column_counts[column.get()];
        if needed == 0 {
            // Sorted order: every later column is empty as well.
            break;
        }

        let available = candidates
            .iter()
            .take_while(|row| remaining[row.get()] > 0)
            .count();
        if available < needed {
            return Err(InvariantViolation::ColumnUnderfilled {
                column,
                needed,
                available,
            }
            .into());
        }

        let (taken, untouched) = candidates.split_at(needed);
        let mut exhausted = 0;
        for &row in taken {
            matrix.set(row, column, true);
            remaining[row.get()] -= 1;
            if remaining[row.get()] == 0 {
                exhausted += 1;
            }
        }

        // Decrementing a sorted prefix by one keeps it sorted.
        merge_by_demand(taken, untouched, &remaining, &mut merged);
        std::mem::swap(&mut candidates, &mut merged);

        log::trace!(
            "placed {} ones in {}, {} rows still have demand",
            needed,
            column,
            available - exhausted
        );
    }

    if let Some(row) = RowIndex::range(num_rows).find(|row| remaining[row.get()] != 0) {
        return Err(InvariantViolation::ResidualDemand {
            row,
            residual: remaining[row.get()],
        }
        .into());
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, feasibility::check_feasibility};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn margins(rows: &[i64], cols: &[i64]) -> Margins<i64> {
        Margins::from_slices(rows, cols).unwrap()
    }

    fn build(rows: &[i64], cols: &[i64]) -> Vec<Vec<u8>> {
        build_matrix(&margins(rows, cols)).unwrap().to_rows()
    }

    #[test]
    fn test_regular_three_by_three() {
        let rows = build(&[2, 2, 2], &[2, 2, 2]);
        assert_eq!(rows, vec![vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn test_single_full_row() {
        let rows = build(&[3, 0], &[1, 1, 1]);
        assert_eq!(rows, vec![vec![1, 1, 1], vec![0, 0, 0]]);
    }

    #[test]
    fn test_ties_go_to_smaller_row_index() {
        let rows = build(&[1, 1, 1], &[1, 1, 1]);
        assert_eq!(rows, vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn test_output_uses_original_column_positions() {
        let rows = build(&[1, 2], &[0, 1, 2]);
        assert_eq!(rows, vec![vec![0, 0, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn test_all_zero_margins() {
        let rows = build(&[0, 0], &[0, 0, 0]);
        assert_eq!(rows, vec![vec![0, 0, 0], vec![0, 0, 0]]);
    }

    #[test]
    fn test_column_order_is_stable() {
        let m = margins(&[1, 1, 1], &[1, 3, 1, 3]);
        let order: Vec<usize> = column_order(&m).iter().map(|c| c.get()).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_underfilled_column_is_an_internal_error() {
        // Not realizable; the builder must not be trusted with it, but it has to
        // fail loudly rather than return a wrong matrix.
        let err = build_matrix(&margins(&[3, 1], &[2, 2, 0])).unwrap_err();
        assert_eq!(
            err,
            GenerationError::InternalInvariantViolation(InvariantViolation::ColumnUnderfilled {
                column: ColumnIndex::new(1),
                needed: 2,
                available: 1,
            })
        );
        assert_eq!(err.kind(), ErrorKind::InternalInvariantViolation);
    }

    #[test]
    fn test_residual_demand_is_an_internal_error() {
        let err = build_matrix(&margins(&[1, 1], &[1, 0])).unwrap_err();
        assert_eq!(
            err,
            GenerationError::InternalInvariantViolation(InvariantViolation::ResidualDemand {
                row: RowIndex::new(1),
                residual: 1,
            })
        );
    }

    /// Straightforward construction that re-sorts every row for every column.
    fn build_by_full_sort(m: &Margins<i64>) -> BinaryMatrix {
        let mut matrix = BinaryMatrix::new(m.num_rows(), m.num_cols());
        let mut remaining = m.row_counts().to_vec();
        for column in column_order(m) {
            let mut rows: Vec<RowIndex> = RowIndex::range(m.num_rows()).collect();
            rows.sort_by_key(|&row| (Reverse(remaining[row.get()]), row));
            for &row in &rows[..m.column_counts()[column.get()]] {
                matrix.set(row, column, true);
                remaining[row.get()] -= 1;
            }
        }
        matrix
    }

    #[test]
    fn test_merge_by_demand_orders_by_demand_then_index() {
        let remaining = vec![1, 3, 1, 2];
        let left = [RowIndex::new(1), RowIndex::new(2)];
        let right = [RowIndex::new(3), RowIndex::new(0)];
        let mut out = Vec::new();
        merge_by_demand(&left, &right, &remaining, &mut out);
        let order: Vec<usize> = out.iter().map(|r| r.get()).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_matches_per_column_full_sort() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x6275_636b);

        for _ in 0..300 {
            let num_rows: usize = rng.random_range(1..=16);
            let num_cols: usize = rng.random_range(1..=16);
            let density: f64 = rng.random_range(0.0..=1.0);

            let source: Vec<Vec<u8>> = (0..num_rows)
                .map(|_| {
                    (0..num_cols)
                        .map(|_| u8::from(rng.random_bool(density)))
                        .collect()
                })
                .collect();
            let source = BinaryMatrix::from_rows(&source);

            let rows: Vec<i64> = source.row_sums().iter().map(|&v| v as i64).collect();
            let cols: Vec<i64> = source.column_sums().iter().map(|&v| v as i64).collect();
            let m = margins(&rows, &cols);

            assert_eq!(
                build_matrix(&m).unwrap(),
                build_by_full_sort(&m),
                "rows={:?} cols={:?}",
                rows,
                cols
            );
        }
    }

    #[test]
    fn test_realizes_margins_of_random_matrices() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x6d61_7267);

        for _ in 0..500 {
            let num_rows: usize = rng.random_range(1..=12);
            let num_cols: usize = rng.random_range(1..=12);
            let density: f64 = rng.random_range(0.0..=1.0);

            let source: Vec<Vec<u8>> = (0..num_rows)
                .map(|_| {
                    (0..num_cols)
                        .map(|_| u8::from(rng.random_bool(density)))
                        .collect()
                })
                .collect();
            let source = BinaryMatrix::from_rows(&source);

            let rows: Vec<i64> = source.row_sums().iter().map(|&v| v as i64).collect();
            let cols: Vec<i64> = source.column_sums().iter().map(|&v| v as i64).collect();
            let m = margins(&rows, &cols);

            assert!(check_feasibility(&m).is_ok());

            let built = build_matrix(&m).unwrap();
            assert!(
                built.realizes(&m),
                "construction does not realize rows={:?} cols={:?}:\n{}",
                rows,
                cols,
                built
            );
            assert_eq!(built, build_matrix(&m).unwrap());
        }
    }
}
