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

//! Validated margin sequences.
//!
//! `Margins` is the only way row and column sums enter the engine. Construction
//! performs the input checks in a fixed order and stops at the first failure:
//!
//! 1. Either sequence empty: `MarginsError::EmptyDimension` (rows are checked first).
//! 2. Any value negative: `MarginsError::NegativeValue`, reporting the first offending
//!    position, scanning all row sums before the column sums.
//! 3. A row sum larger than the number of columns, or a column sum larger than the
//!    number of rows: `MarginsError::OutOfRange`, again rows before columns.
//!
//! The caller's values are kept exactly as supplied. Alongside them the validated
//! sums are stored as `usize` counts, which is what the feasibility check and the
//! construction work with.

use crate::index::{Axis, ColumnIndex, RowIndex};
use margins_core::num::{MarginValue, to_count};

/// The error type for margin validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarginsError {
    /// One of the two sequences has no values.
    #[error("{axis} sums must contain at least one value")]
    EmptyDimension { axis: Axis },
    /// A sum is below zero.
    #[error("{axis} sum at position {index} is negative ({value})")]
    NegativeValue { axis: Axis, index: usize, value: i128 },
    /// A sum exceeds the number of slots offered by the opposite dimension.
    #[error(
        "{axis} sum at position {index} is {value} but can be at most {limit}, the {} count",
        .axis.opposite()
    )]
    OutOfRange {
        axis: Axis,
        index: usize,
        value: i128,
        limit: usize,
    },
}

#[inline]
fn widen<T>(value: T) -> i128
where
    T: MarginValue,
{
    match value.to_i128() {
        Some(v) => v,
        None if value.is_negative() => i128::MIN,
        None => i128::MAX,
    }
}

fn reject_negative<T>(values: &[T], axis: Axis) -> Result<(), MarginsError>
where
    T: MarginValue,
{
    match values.iter().position(|v| v.is_negative()) {
        Some(index) => Err(MarginsError::NegativeValue {
            axis,
            index,
            value: widen(values[index]),
        }),
        None => Ok(()),
    }
}

fn bounded_counts<T>(values: &[T], axis: Axis, limit: usize) -> Result<Vec<usize>, MarginsError>
where
    T: MarginValue,
{
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| match to_count(value) {
            Some(count) if count <= limit => Ok(count),
            _ => Err(MarginsError::OutOfRange {
                axis,
                index,
                value: widen(value),
                limit,
            }),
        })
        .collect()
}

/// A validated pair of row sums and column sums.
///
/// Every row sum is a count in `0..=num_cols()` and every column sum a count in
/// `0..=num_rows()`. Whether the pair can actually be realized is a separate
/// question answered by the feasibility check.
///
/// # Examples
///
/// ```rust
/// # use margins_model::margins::Margins;
///
/// let margins = Margins::new(vec![3i64, 0], vec![1, 1, 1]).unwrap();
/// assert_eq!(margins.num_rows(), 2);
/// assert_eq!(margins.num_cols(), 3);
/// assert_eq!(margins.row_total(), 3);
/// assert_eq!(margins.column_total(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Margins<T> {
    row_sums: Vec<T>,
    column_sums: Vec<T>,
    row_counts: Vec<usize>,    // len = num_rows
    column_counts: Vec<usize>, // len = num_cols
}

impl<T> Margins<T>
where
    T: MarginValue,
{
    /// Validates the given sequences and wraps them.
    pub fn new(row_sums: Vec<T>, column_sums: Vec<T>) -> Result<Self, MarginsError> {
        if row_sums.is_empty() {
            return Err(MarginsError::EmptyDimension { axis: Axis::Row });
        }
        if column_sums.is_empty() {
            return Err(MarginsError::EmptyDimension { axis: Axis::Column });
        }

        reject_negative(&row_sums, Axis::Row)?;
        reject_negative(&column_sums, Axis::Column)?;

        let row_counts = bounded_counts(&row_sums, Axis::Row, column_sums.len())?;
        let column_counts = bounded_counts(&column_sums, Axis::Column, row_sums.len())?;

        Ok(Self {
            row_sums,
            column_sums,
            row_counts,
            column_counts,
        })
    }

    /// Validates copies of the given slices.
    #[inline]
    pub fn from_slices(row_sums: &[T], column_sums: &[T]) -> Result<Self, MarginsError> {
        Self::new(row_sums.to_vec(), column_sums.to_vec())
    }
}

impl<T> Margins<T> {
    /// Returns the number of rows `R`.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.row_counts.len()
    }

    /// Returns the number of columns `C`.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.column_counts.len()
    }

    /// Returns the row sums exactly as supplied.
    #[inline]
    pub fn row_sums(&self) -> &[T] {
        &self.row_sums
    }

    /// Returns the column sums exactly as supplied.
    #[inline]
    pub fn column_sums(&self) -> &[T] {
        &self.column_sums
    }

    /// Returns the row sums as counts.
    #[inline]
    pub fn row_counts(&self) -> &[usize] {
        &self.row_counts
    }

    /// Returns the column sums as counts.
    #[inline]
    pub fn column_counts(&self) -> &[usize] {
        &self.column_counts
    }

    /// Returns the required number of ones in the given row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in `0..num_rows()`.
    #[inline]
    pub fn row_sum(&self, row: RowIndex) -> usize {
        let index = row.get();
        assert!(
            index < self.num_rows(),
            "called `Margins::row_sum` with row index out of bounds: the len is {} but the index is {}",
            self.num_rows(),
            index
        );

        self.row_counts[index]
    }

    /// Returns the required number of ones in the given column.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not in `0..num_cols()`.
    #[inline]
    pub fn column_sum(&self, column: ColumnIndex) -> usize {
        let index = column.get();
        assert!(
            index < self.num_cols(),
            "called `Margins::column_sum` with column index out of bounds: the len is {} but the index is {}",
            self.num_cols(),
            index
        );

        self.column_counts[index]
    }

    /// Returns the total of all row sums.
    #[inline]
    pub fn row_total(&self) -> usize {
        self.row_counts.iter().sum()
    }

    /// Returns the total of all column sums.
    #[inline]
    pub fn column_total(&self) -> usize {
        self.column_counts.iter().sum()
    }
}

impl<T> std::fmt::Display for Margins<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |values: &[T]| {
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "Margins(rows: [{}], columns: [{}])",
            join(&self.row_sums),
            join(&self.column_sums)
        )
    }
}
