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

//! # Margins FFI
//!
//! **C-compatible bindings for the margins matrix generator.**
//!
//! The host passes two `int64_t` arrays (row sums and column sums) and gets back
//! an opaque `MarginsResult` handle holding either the generated matrix or the
//! error. The handle is inspected through accessor functions and released with
//! `margins_result_free`.
//!
//! ## Core Design Principles
//!
//! 1.  **Opaque Handles**: `MarginsResult` is never accessed field by field from
//!     the host side.
//! 2.  **Explicit Lifecycle**: Every result returned by `margins_generate*` must be
//!     passed to `margins_result_free` exactly once.
//! 3.  **Fail-Fast Safety**: Passing `NULL` handles, a `NULL` array with a non-zero
//!     length, or out-of-range indices results in an immediate process abort (panic)
//!     rather than undefined behavior or stack unwinding.
//! 4.  **Whole Answers**: A result holds a complete matrix or an error message, never both
//!     and never a partial grid.
//!
//! ## Exported API
//!
//! * `margins_generate`, `margins_generate_capped`
//! * `margins_result_free`
//! * `margins_result_is_ok`, `margins_result_is_internal_error`
//! * `margins_result_error_kind`, `margins_result_error_message`
//! * `margins_result_num_rows`, `margins_result_num_cols`
//! * `margins_result_get`, `margins_result_copy_matrix`

pub mod result;
