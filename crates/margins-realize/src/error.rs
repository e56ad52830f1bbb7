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

use margins_model::{
    index::{Axis, ColumnIndex, RowIndex},
    margins::MarginsError,
};

/// Classification of a `GenerationError`.
///
/// The discriminants are stable and used as error codes at the FFI boundary.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyDimension = 1,
    NegativeValue = 2,
    OutOfRange = 3,
    DimensionTooLarge = 4,
    SumMismatch = 5,
    Infeasible = 6,
    InternalInvariantViolation = 7,
}

impl ErrorKind {
    /// Returns the stable numeric code of this kind.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::EmptyDimension => "EmptyDimension",
            ErrorKind::NegativeValue => "NegativeValue",
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::DimensionTooLarge => "DimensionTooLarge",
            ErrorKind::SumMismatch => "SumMismatch",
            ErrorKind::Infeasible => "Infeasible",
            ErrorKind::InternalInvariantViolation => "InternalInvariantViolation",
        };
        write!(f, "{}", name)
    }
}

/// A broken construction invariant.
///
/// These can only be observed if the feasibility test and the construction
/// disagree, which is a defect in this crate rather than a problem with the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// A column needed more rows with open demand than were left.
    #[error("{column} needs {needed} ones but only {available} rows have demand left")]
    ColumnUnderfilled {
        column: ColumnIndex,
        needed: usize,
        available: usize,
    },
    /// A row still had demand after all columns were processed.
    #[error("{row} has {residual} unplaced ones after all columns were processed")]
    ResidualDemand { row: RowIndex, residual: usize },
    /// The finished matrix does not reproduce the requested margins.
    #[error("the constructed matrix does not reproduce the requested margins")]
    MarginMismatch,
}

/// The error type of a generation request.
///
/// Every variant is a definitive verdict on the input pair; retrying with the
/// same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The margins failed validation.
    #[error(transparent)]
    InvalidMargins(#[from] MarginsError),
    /// A dimension exceeds the configured cap.
    #[error("{axis} count {len} exceeds the supported maximum of {max}")]
    DimensionTooLarge { axis: Axis, len: usize, max: usize },
    /// The totals differ, so no matrix can satisfy both sequences.
    #[error("row sums total {row_total} but column sums total {column_total}")]
    SumMismatch {
        row_total: usize,
        column_total: usize,
    },
    /// The Gale–Ryser prefix condition fails at `k`.
    #[error(
        "no binary matrix has these margins: the {k} largest row sums need {row_prefix} ones \
         but the columns can hold at most {column_capacity} of them"
    )]
    Infeasible {
        k: usize,
        row_prefix: usize,
        column_capacity: usize,
    },
    /// Construction failed after feasibility passed.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(InvariantViolation),
}

impl GenerationError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::InvalidMargins(MarginsError::EmptyDimension { .. }) => {
                ErrorKind::EmptyDimension
            }
            GenerationError::InvalidMargins(MarginsError::NegativeValue { .. }) => {
                ErrorKind::NegativeValue
            }
            GenerationError::InvalidMargins(MarginsError::OutOfRange { .. }) => {
                ErrorKind::OutOfRange
            }
            GenerationError::DimensionTooLarge { .. } => ErrorKind::DimensionTooLarge,
            GenerationError::SumMismatch { .. } => ErrorKind::SumMismatch,
            GenerationError::Infeasible { .. } => ErrorKind::Infeasible,
            GenerationError::InternalInvariantViolation(_) => {
                ErrorKind::InternalInvariantViolation
            }
        }
    }

    /// Returns `true` if this error signals a defect rather than bad input.
    #[inline]
    pub fn is_internal(&self) -> bool {
        matches!(self, GenerationError::InternalInvariantViolation(_))
    }
}

impl From<InvariantViolation> for GenerationError {
    fn from(violation: InvariantViolation) -> Self {
        log::error!("matrix construction broke an invariant: {violation}");
        GenerationError::InternalInvariantViolation(violation)
    }
}
