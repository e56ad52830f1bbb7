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

//! Bit-packed binary matrices.
//!
//! `BinaryMatrix` stores an `R x C` grid of bits in a single `FixedBitSet`,
//! row-major: entry `(r, c)` lives at bit `r * C + c`. Row sums are a popcount
//! over a contiguous bit range; column sums walk the column with stride `C`.

use crate::{
    index::{ColumnIndex, RowIndex},
    margins::Margins,
};
use fixedbitset::FixedBitSet;

#[inline(always)]
fn flatten_index(num_cols: usize, row: RowIndex, column: ColumnIndex) -> usize {
    row.get() * num_cols + column.get()
}

/// A rectangular grid of 0/1 entries, indexed by the caller's original
/// row and column positions.
///
/// # Examples
///
/// ```rust
/// # use margins_model::matrix::BinaryMatrix;
/// # use margins_model::index::{RowIndex, ColumnIndex};
///
/// let mut m = BinaryMatrix::new(2, 3);
/// m.set(RowIndex::new(0), ColumnIndex::new(2), true);
/// assert!(m.get(RowIndex::new(0), ColumnIndex::new(2)));
/// assert_eq!(m.row_sums(), vec![1, 0]);
/// assert_eq!(m.column_sums(), vec![0, 0, 1]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    num_rows: usize,
    num_cols: usize,
    bits: FixedBitSet, // len = num_rows * num_cols
}

impl BinaryMatrix {
    /// Creates an all-zero matrix with the given dimensions.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            bits: FixedBitSet::with_capacity(num_rows * num_cols),
        }
    }

    /// Creates a matrix from nested rows, treating every non-zero entry as a one.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[u8]>,
    {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut matrix = Self::new(num_rows, num_cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(
                row.len(),
                num_cols,
                "called `BinaryMatrix::from_rows` with ragged rows: row 0 has {} entries but row {} has {}",
                num_cols,
                r,
                row.len()
            );
            for (c, &value) in row.iter().enumerate() {
                if value != 0 {
                    matrix.bits.insert(r * num_cols + c);
                }
            }
        }
        matrix
    }

    /// Returns the number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline(always)]
    fn check_bounds(&self, row: RowIndex, column: ColumnIndex, caller: &str) {
        assert!(
            row.get() < self.num_rows && column.get() < self.num_cols,
            "called `BinaryMatrix::{}` with index out of bounds: the shape is {}x{} but the index is ({}, {})",
            caller,
            self.num_rows,
            self.num_cols,
            row.get(),
            column.get()
        );
    }

    /// Returns `true` if entry `(row, column)` is one.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: RowIndex, column: ColumnIndex) -> bool {
        self.check_bounds(row, column, "get");
        self.bits
            .contains(flatten_index(self.num_cols, row, column))
    }

    /// Sets entry `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, row: RowIndex, column: ColumnIndex, value: bool) {
        self.check_bounds(row, column, "set");
        self.bits
            .set(flatten_index(self.num_cols, row, column), value);
    }

    /// Returns the number of ones in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row_sum(&self, row: RowIndex) -> usize {
        assert!(
            row.get() < self.num_rows,
            "called `BinaryMatrix::row_sum` with row index out of bounds: the len is {} but the index is {}",
            self.num_rows,
            row.get()
        );
        let start = row.get() * self.num_cols;
        self.bits.count_ones(start..start + self.num_cols)
    }

    /// Returns the number of ones in `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of bounds.
    pub fn column_sum(&self, column: ColumnIndex) -> usize {
        assert!(
            column.get() < self.num_cols,
            "called `BinaryMatrix::column_sum` with column index out of bounds: the len is {} but the index is {}",
            self.num_cols,
            column.get()
        );
        RowIndex::range(self.num_rows)
            .filter(|&row| self.bits.contains(flatten_index(self.num_cols, row, column)))
            .count()
    }

    /// Returns the sum of every row, in row order.
    pub fn row_sums(&self) -> Vec<usize> {
        RowIndex::range(self.num_rows)
            .map(|row| self.row_sum(row))
            .collect()
    }

    /// Returns the sum of every column, in column order.
    pub fn column_sums(&self) -> Vec<usize> {
        let mut sums = vec![0; self.num_cols];
        for bit in self.bits.ones() {
            sums[bit % self.num_cols] += 1;
        }
        sums
    }

    /// Returns the total number of ones.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterates over the positions of all ones in row-major order.
    pub fn ones(&self) -> impl Iterator<Item = (RowIndex, ColumnIndex)> + '_ {
        let num_cols = self.num_cols;
        self.bits
            .ones()
            .map(move |bit| (RowIndex::new(bit / num_cols), ColumnIndex::new(bit % num_cols)))
    }

    /// Returns the matrix as nested rows of `0`/`1` bytes.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        RowIndex::range(self.num_rows)
            .map(|row| {
                ColumnIndex::range(self.num_cols)
                    .map(|column| u8::from(self.get(row, column)))
                    .collect()
            })
            .collect()
    }

    /// Returns `true` if the shape and every row and column sum match `margins`.
    pub fn realizes<T>(&self, margins: &Margins<T>) -> bool {
        self.num_rows == margins.num_rows()
            && self.num_cols == margins.num_cols()
            && self.row_sums() == margins.row_counts()
            && self.column_sums() == margins.column_counts()
    }
}

impl std::fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in RowIndex::range(self.num_rows) {
            for column in ColumnIndex::range(self.num_cols) {
                if column.get() > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", u8::from(self.get(row, column)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BinaryMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinaryMatrix({}x{}, {:?})", self.num_rows, self.num_cols, self.to_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ri(i: usize) -> RowIndex {
        RowIndex::new(i)
    }

    fn ci(i: usize) -> ColumnIndex {
        ColumnIndex::new(i)
    }

    #[test]
    fn test_new_is_all_zero() {
        let m = BinaryMatrix::new(3, 4);
        assert_eq!(m.num_rows(), 3);
        assert_eq!(m.num_cols(), 4);
        assert_eq!(m.count_ones(), 0);
        assert_eq!(m.row_sums(), vec![0, 0, 0]);
        assert_eq!(m.column_sums(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_set_get_and_clear() {
        let mut m = BinaryMatrix::new(2, 2);
        m.set(ri(1), ci(0), true);
        assert!(m.get(ri(1), ci(0)));
        assert!(!m.get(ri(0), ci(1)));
        m.set(ri(1), ci(0), false);
        assert!(!m.get(ri(1), ci(0)));
    }

    #[test]
    fn test_sums_follow_original_positions() {
        let m = BinaryMatrix::from_rows(&[[1u8, 0, 1], [0, 0, 1]]);
        assert_eq!(m.row_sums(), vec![2, 1]);
        assert_eq!(m.column_sums(), vec![1, 0, 2]);
        assert_eq!(m.row_sum(ri(0)), 2);
        assert_eq!(m.column_sum(ci(2)), 2);
        assert_eq!(m.count_ones(), 3);
    }

    #[test]
    fn test_ones_are_row_major() {
        let m = BinaryMatrix::from_rows(&[[0u8, 1], [1, 1]]);
        let ones: Vec<(usize, usize)> = m.ones().map(|(r, c)| (r.get(), c.get())).collect();
        assert_eq!(ones, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_to_rows_round_trip() {
        let rows = vec![vec![1u8, 1, 1], vec![0, 0, 0]];
        let m = BinaryMatrix::from_rows(&rows);
        assert_eq!(m.to_rows(), rows);
    }

    #[test]
    fn test_realizes_checks_shape_and_margins() {
        let m = BinaryMatrix::from_rows(&[[1u8, 1, 1], [0, 0, 0]]);
        let good = Margins::new(vec![3i64, 0], vec![1, 1, 1]).unwrap();
        let wrong_sums = Margins::new(vec![2i64, 1], vec![1, 1, 1]).unwrap();
        let wrong_shape = Margins::new(vec![3i64], vec![1, 1, 1]).unwrap();
        assert!(m.realizes(&good));
        assert!(!m.realizes(&wrong_sums));
        assert!(!m.realizes(&wrong_shape));
    }

    #[test]
    fn test_display() {
        let m = BinaryMatrix::from_rows(&[[0u8, 1], [1, 0]]);
        assert_eq!(m.to_string(), "0 1\n1 0\n");
    }

    #[test]
    #[should_panic(expected = "called `BinaryMatrix::get` with index out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let m = BinaryMatrix::new(2, 2);
        let _ = m.get(ri(0), ci(2));
    }

    #[test]
    #[should_panic(expected = "called `BinaryMatrix::from_rows` with ragged rows")]
    fn test_ragged_rows_panic() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 0], vec![1]];
        let _ = BinaryMatrix::from_rows(&rows);
    }

    #[test]
    fn test_empty_matrix() {
        let m = BinaryMatrix::new(0, 0);
        assert!(m.to_rows().is_empty());
        assert!(m.column_sums().is_empty());
        assert_eq!(m.to_string(), "");
    }
}
