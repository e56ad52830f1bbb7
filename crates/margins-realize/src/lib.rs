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

//! # Margins Realize
//!
//! Feasibility and construction of binary matrices with prescribed row and
//! column sums (realizations of a bipartite degree sequence).
//!
//! A request flows through four stages, each short-circuiting on failure:
//!
//! 1. **Validation** (`margins_model::margins::Margins`): empty, negative and
//!    out-of-range sums are rejected.
//! 2. **Feasibility** (`feasibility`): the Gale–Ryser test decides, without
//!    building anything, whether any realization exists.
//! 3. **Construction** (`builder`): a deterministic greedy procedure places the
//!    ones column by column into the rows with the largest remaining demand.
//! 4. **Orchestration** (`generator`): `Generator` and `generate_matrix` run the
//!    stages and return either a `BinaryMatrix` or a `GenerationError`.
//!
//! ## Modules
//!
//! - `builder`: Greedy realization of feasible margins.
//! - `error`: The error taxonomy (`GenerationError`, `ErrorKind`, `InvariantViolation`).
//! - `feasibility`: The Gale–Ryser prefix test and its report.
//! - `generator`: Configurable entry point with dimension caps and output verification.
//! - `stats`: Counters and timings collected per generation.
//!
//! ## Usage
//!
//! ```rust
//! use margins_realize::generator::generate_matrix;
//!
//! let matrix = generate_matrix(&[3i64, 0], &[1, 1, 1]).unwrap();
//! assert_eq!(matrix.to_rows(), vec![vec![1, 1, 1], vec![0, 0, 0]]);
//!
//! let err = generate_matrix(&[3i64, 3], &[1, 1, 1, 1]).unwrap_err();
//! assert_eq!(err.to_string(), "row sums total 6 but column sums total 4");
//! ```
//!
//! Every stage is a pure function of its input. Nothing is shared between
//! calls, so independent requests may run on as many threads as desired.

pub mod builder;
pub mod error;
pub mod feasibility;
pub mod generator;
pub mod stats;
