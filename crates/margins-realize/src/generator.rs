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

//! # Matrix Generator
//!
//! The single entry point for turning a pair of margin sequences into a binary
//! matrix. A request is validated, tested for feasibility and constructed, in
//! that order, and the first failure is returned as a `GenerationError`. No
//! partially built matrix ever leaves this module.
//!
//! ## Configuration
//!
//! `GeneratorBuilder` controls two knobs:
//!
//! - `with_max_dimension`: the largest admitted row or column count
//!   (`DEFAULT_MAX_DIMENSION` unless set). Larger inputs are rejected with
//!   `GenerationError::DimensionTooLarge` after validation and before any
//!   feasibility work, which keeps the cost of a request bounded.
//! - `with_verification`: whether the finished matrix is checked against the
//!   margins once more (on by default). A mismatch is reported as an
//!   `InternalInvariantViolation`.
//!
//! A `Generator` only holds this configuration, so one instance can serve any
//! number of threads.
//!
//! ## Usage
//!
//! ```rust
//! use margins_realize::{error::ErrorKind, generator::Generator};
//!
//! let generator = Generator::builder().with_max_dimension(64).build();
//!
//! let matrix = generator.generate(&[2i64, 2, 2], &[2, 2, 2]).unwrap();
//! assert_eq!(matrix.row_sums(), vec![2, 2, 2]);
//! assert_eq!(matrix.column_sums(), vec![2, 2, 2]);
//!
//! let err = generator.generate(&[5i64], &[1, 1, 1]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::OutOfRange);
//! ```

use crate::{
    builder::build_matrix,
    error::{GenerationError, InvariantViolation},
    feasibility::gale_ryser,
    stats::GenerationStatistics,
};
use margins_core::num::MarginValue;
use margins_model::{index::Axis, margins::Margins, matrix::BinaryMatrix};
use std::time::Instant;

/// The default cap on the number of rows and on the number of columns.
pub const DEFAULT_MAX_DIMENSION: usize = 512;

/// A successfully generated matrix together with the statistics of its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    matrix: BinaryMatrix,
    statistics: GenerationStatistics,
}

impl GenerationOutcome {
    /// Returns the generated matrix.
    #[inline]
    pub fn matrix(&self) -> &BinaryMatrix {
        &self.matrix
    }

    /// Returns the statistics of the request.
    #[inline]
    pub fn statistics(&self) -> &GenerationStatistics {
        &self.statistics
    }

    /// Consumes the outcome and returns the matrix.
    #[inline]
    pub fn into_matrix(self) -> BinaryMatrix {
        self.matrix
    }
}

/// Generates binary matrices with prescribed margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    max_dimension: usize,
    verify: bool,
}

impl Default for Generator {
    fn default() -> Self {
        GeneratorBuilder::new().build()
    }
}

impl Generator {
    /// Creates a generator with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder to configure a generator.
    #[inline]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the largest admitted row or column count.
    #[inline]
    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// Returns `true` if produced matrices are checked against their margins.
    #[inline]
    pub fn verifies_output(&self) -> bool {
        self.verify
    }

    /// Generates a matrix whose row sums are `row_sums` and whose column sums
    /// are `column_sums`, both in the caller's order.
    ///
    /// # Errors
    ///
    /// See `GenerationError`; validation errors come first, then
    /// `DimensionTooLarge`, `SumMismatch`, `Infeasible` and finally
    /// `InternalInvariantViolation`.
    #[inline]
    pub fn generate<T>(
        &self,
        row_sums: &[T],
        column_sums: &[T],
    ) -> Result<BinaryMatrix, GenerationError>
    where
        T: MarginValue,
    {
        self.generate_with_statistics(row_sums, column_sums)
            .map(GenerationOutcome::into_matrix)
    }

    /// Like `generate`, but also returns the statistics of the request.
    pub fn generate_with_statistics<T>(
        &self,
        row_sums: &[T],
        column_sums: &[T],
    ) -> Result<GenerationOutcome, GenerationError>
    where
        T: MarginValue,
    {
        let start_time = Instant::now();
        let mut statistics = GenerationStatistics::default();

        let margins = Margins::from_slices(row_sums, column_sums).inspect_err(|e| {
            log::warn!("rejected margins: {e}");
        })?;
        statistics.rows = margins.num_rows();
        statistics.columns = margins.num_cols();
        statistics.time_validation = start_time.elapsed();

        self.check_dimensions(&margins)?;

        let result = self.realize(&margins, &mut statistics);
        statistics.time_total = start_time.elapsed();

        let matrix = result?;
        log::debug!(
            "generated {}x{} matrix with {} ones in {:.2?}",
            statistics.rows,
            statistics.columns,
            statistics.ones,
            statistics.time_total
        );

        Ok(GenerationOutcome { matrix, statistics })
    }

    /// Generates a matrix for margins that have already been validated.
    ///
    /// The dimension cap still applies.
    pub fn generate_from_margins<T>(
        &self,
        margins: &Margins<T>,
    ) -> Result<BinaryMatrix, GenerationError> {
        self.check_dimensions(margins)?;
        let mut statistics = GenerationStatistics::default();
        self.realize(margins, &mut statistics)
    }

    fn check_dimensions<T>(&self, margins: &Margins<T>) -> Result<(), GenerationError> {
        for (axis, len) in [
            (Axis::Row, margins.num_rows()),
            (Axis::Column, margins.num_cols()),
        ] {
            if len > self.max_dimension {
                log::warn!(
                    "rejected margins: {} count {} exceeds the cap of {}",
                    axis,
                    len,
                    self.max_dimension
                );
                return Err(GenerationError::DimensionTooLarge {
                    axis,
                    len,
                    max: self.max_dimension,
                });
            }
        }
        Ok(())
    }

    fn realize<T>(
        &self,
        margins: &Margins<T>,
        statistics: &mut GenerationStatistics,
    ) -> Result<BinaryMatrix, GenerationError> {
        let feasibility_start = Instant::now();
        let report = gale_ryser(margins);
        statistics.prefix_checks = report.prefix_checks();
        statistics.time_feasibility = feasibility_start.elapsed();
        log::debug!(
            "feasibility of {}x{} margins: {}",
            margins.num_rows(),
            margins.num_cols(),
            report
        );
        report.into_result()?;

        let construction_start = Instant::now();
        let matrix = build_matrix(margins)?;
        if self.verify && !matrix.realizes(margins) {
            return Err(InvariantViolation::MarginMismatch.into());
        }
        statistics.ones = matrix.count_ones();
        statistics.time_construction = construction_start.elapsed();

        Ok(matrix)
    }
}

/// Builder for `Generator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorBuilder {
    max_dimension: usize,
    verify: bool,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            verify: true,
        }
    }
}

impl GeneratorBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest admitted row or column count.
    ///
    /// # Panics
    ///
    /// Panics if `max_dimension` is zero.
    #[inline]
    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        assert!(
            max_dimension > 0,
            "called `GeneratorBuilder::with_max_dimension` with zero"
        );
        self.max_dimension = max_dimension;
        self
    }

    /// Enables or disables the final check of the produced matrix.
    #[inline]
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    #[inline]
    pub fn build(self) -> Generator {
        Generator {
            max_dimension: self.max_dimension,
            verify: self.verify,
        }
    }
}

/// Generates a matrix with the default `Generator`.
///
/// # Examples
///
/// ```rust
/// # use margins_realize::generator::generate_matrix;
///
/// let matrix = generate_matrix(&[1i32, 1], &[1, 1]).unwrap();
/// assert_eq!(matrix.to_rows(), vec![vec![1, 0], vec![0, 1]]);
/// ```
#[inline]
pub fn generate_matrix<T>(row_sums: &[T], column_sums: &[T]) -> Result<BinaryMatrix, GenerationError>
where
    T: MarginValue,
{
    Generator::default().generate(row_sums, column_sums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use margins_model::margins::MarginsError;

    #[test]
    fn test_scenario_regular_three_by_three() {
        let matrix = generate_matrix(&[2i64, 2, 2], &[2, 2, 2]).unwrap();
        assert_eq!(matrix.row_sums(), vec![2, 2, 2]);
        assert_eq!(matrix.column_sums(), vec![2, 2, 2]);
        assert_eq!(matrix.count_ones(), 6);
    }

    #[test]
    fn test_scenario_unique_realization() {
        let matrix = generate_matrix(&[3i64, 0], &[1, 1, 1]).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![1, 1, 1], vec![0, 0, 0]]);
    }

    #[test]
    fn test_scenario_sum_mismatch() {
        let err = generate_matrix(&[3i64, 3], &[1, 1, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            GenerationError::SumMismatch {
                row_total: 6,
                column_total: 4
            }
        );
        assert_eq!(err.kind(), ErrorKind::SumMismatch);
    }

    #[test]
    fn test_scenario_out_of_range() {
        let err = generate_matrix(&[5i64], &[1, 1, 1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(matches!(
            err,
            GenerationError::InvalidMargins(MarginsError::OutOfRange {
                axis: Axis::Row,
                index: 0,
                value: 5,
                limit: 3
            })
        ));
    }

    #[test]
    fn test_scenario_empty_dimension() {
        let err = generate_matrix::<i64>(&[], &[1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDimension);
    }

    #[test]
    fn test_scenario_negative_value() {
        let err = generate_matrix(&[-1i64, 2], &[1, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);
    }

    #[test]
    fn test_infeasible_despite_matching_totals() {
        let err = generate_matrix(&[3i64, 1], &[2, 2, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infeasible);
        assert!(!err.is_internal());
    }

    #[test]
    fn test_out_of_range_column_never_reaches_construction() {
        let err = generate_matrix(&[1i64, 1], &[3, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_dimension_cap() {
        let generator = Generator::builder().with_max_dimension(3).build();
        let err = generator.generate(&[0i64; 4], &[0, 0]).unwrap_err();
        assert_eq!(
            err,
            GenerationError::DimensionTooLarge {
                axis: Axis::Row,
                len: 4,
                max: 3
            }
        );

        let err = generator.generate(&[0i64, 0], &[0; 5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionTooLarge);

        assert!(generator.generate(&[0i64; 3], &[0; 3]).is_ok());
    }

    #[test]
    fn test_validation_precedes_dimension_cap() {
        let generator = Generator::builder().with_max_dimension(1).build();
        let err = generator.generate::<i64>(&[], &[0, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDimension);
    }

    #[test]
    fn test_default_configuration() {
        let generator = Generator::new();
        assert_eq!(generator.max_dimension(), DEFAULT_MAX_DIMENSION);
        assert!(generator.verifies_output());

        let generator = Generator::builder().with_verification(false).build();
        assert!(!generator.verifies_output());
    }

    #[test]
    #[should_panic(expected = "called `GeneratorBuilder::with_max_dimension` with zero")]
    fn test_zero_cap_panics() {
        let _ = Generator::builder().with_max_dimension(0);
    }

    #[test]
    fn test_deterministic() {
        let rows = [3i64, 1, 2, 2, 0, 4];
        let cols = [2i64, 3, 1, 3, 2, 1];
        let first = generate_matrix(&rows, &cols).unwrap();
        let second = generate_matrix(&rows, &cols).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_statistics() {
        let outcome = Generator::new()
            .generate_with_statistics(&[2i32, 1, 0], &[1, 1, 1])
            .unwrap();
        let stats = outcome.statistics();
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.columns, 3);
        assert_eq!(stats.ones, 3);
        assert_eq!(stats.prefix_checks, 3);
        assert!(stats.time_total >= stats.time_construction);
        assert!(outcome.matrix().realizes(
            &Margins::new(vec![2i32, 1, 0], vec![1, 1, 1]).unwrap()
        ));
    }

    #[test]
    fn test_generate_from_margins() {
        let margins = Margins::new(vec![1i8, 1], vec![2, 0]).unwrap();
        let matrix = Generator::new().generate_from_margins(&margins).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![1, 0], vec![1, 0]]);
    }

    #[test]
    fn test_independent_requests_in_parallel() {
        let generator = Generator::new();
        let inputs: Vec<(Vec<i64>, Vec<i64>)> = (1..=8)
            .map(|n| (vec![1; n], vec![1; n]))
            .chain(std::iter::once((vec![3, 3], vec![1, 1, 1, 1])))
            .collect();

        let results: Vec<Result<BinaryMatrix, GenerationError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|(rows, cols)| {
                    let generator = &generator;
                    scope.spawn(move || generator.generate(rows, cols))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("generation thread panicked"))
                .collect()
        });

        for ((rows, cols), result) in inputs.iter().zip(&results) {
            assert_eq!(result, &generate_matrix(rows, cols));
        }
        assert_eq!(
            results.last().map(|r| r.as_ref().map_err(|e| e.kind())),
            Some(Err(ErrorKind::SumMismatch))
        );
    }
}
