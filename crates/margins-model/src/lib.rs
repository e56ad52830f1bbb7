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

//! # Margins Model
//!
//! **Data model for binary matrices with prescribed row and column sums.**
//!
//! This crate holds the values that flow into and out of the realization
//! engine (`margins_realize`):
//!
//! * **`index`**: Strongly typed `RowIndex` and `ColumnIndex`, plus the `Axis` tag used in diagnostics.
//! * **`margins`**: `Margins`, the validated pair of row and column sums. Construction is the only
//!   place where empty, negative or out-of-range margins are rejected.
//! * **`matrix`**: `BinaryMatrix`, a bit-packed, row-major 0/1 grid with margin queries.
//! * **`parsing`**: Comma-separated text to margin sequences, permissive and strict.
//! * **`render`**: LaTeX `bmatrix` output and the bipartite row/column graph of a matrix.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: A `RowIndex` cannot address a column.
//! 2.  **Fail-Fast**: `Margins::new` validates eagerly, so downstream code only ever sees
//!     sums that are counts bounded by the opposite dimension.
//! 3.  **Original Order**: Every structure is indexed by the positions the caller supplied.
//!     Any sorting done by the engine is internal bookkeeping.

pub mod index;
pub mod margins;
pub mod matrix;
pub mod parsing;
pub mod render;
