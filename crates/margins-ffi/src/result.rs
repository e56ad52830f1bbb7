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
    index::{ColumnIndex, RowIndex},
    matrix::BinaryMatrix,
};
use margins_realize::{
    error::GenerationError,
    generator::{Generator, DEFAULT_MAX_DIMENSION},
};
use std::ffi::{c_char, CString};

/// The outcome of one generation request, owned by the host until freed.
#[derive(Debug)]
pub struct MarginsResult {
    outcome: Result<BinaryMatrix, GenerationError>,
    message: Option<CString>,
}

impl MarginsResult {
    fn new(outcome: Result<BinaryMatrix, GenerationError>) -> Self {
        let message = outcome.as_ref().err().map(|e| {
            // Messages are built from numbers and fixed text and carry no NUL bytes.
            CString::new(e.to_string()).unwrap_or_default()
        });
        Self { outcome, message }
    }

    fn matrix(&self, caller: &str) -> &BinaryMatrix {
        match &self.outcome {
            Ok(matrix) => matrix,
            Err(_) => panic!("called `{}` on a result without a matrix", caller),
        }
    }
}

unsafe fn margins_from_raw<'a>(ptr: *const i64, len: usize, caller: &str) -> &'a [i64] {
    if len == 0 {
        return &[];
    }
    assert!(
        !ptr.is_null(),
        "called `{}` with null pointer and length {}",
        caller,
        len
    );
    std::slice::from_raw_parts(ptr, len)
}

unsafe fn generate_with(
    generator: &Generator,
    rows: *const i64,
    num_rows: usize,
    cols: *const i64,
    num_cols: usize,
    caller: &str,
) -> *mut MarginsResult {
    let row_sums = margins_from_raw(rows, num_rows, caller);
    let column_sums = margins_from_raw(cols, num_cols, caller);
    let result = MarginsResult::new(generator.generate(row_sums, column_sums));
    Box::into_raw(Box::new(result))
}

/// Generates a binary matrix with the given row and column sums using the
/// default dimension cap.
///
/// The returned handle must be released with `margins_result_free`.
///
/// # Panics
///
/// Panics if an array pointer is null while its length is non-zero.
///
/// # Safety
///
/// `rows` must point to `num_rows` readable `i64` values and `cols` to
/// `num_cols` readable `i64` values for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn margins_generate(
    rows: *const i64,
    num_rows: usize,
    cols: *const i64,
    num_cols: usize,
) -> *mut MarginsResult {
    generate_with(
        &Generator::new(),
        rows,
        num_rows,
        cols,
        num_cols,
        "margins_generate",
    )
}

/// Like `margins_generate`, with a custom cap on the number of rows and columns.
/// A cap of zero selects the default.
///
/// # Panics
///
/// Panics if an array pointer is null while its length is non-zero.
///
/// # Safety
///
/// `rows` must point to `num_rows` readable `i64` values and `cols` to
/// `num_cols` readable `i64` values for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn margins_generate_capped(
    rows: *const i64,
    num_rows: usize,
    cols: *const i64,
    num_cols: usize,
    max_dimension: usize,
) -> *mut MarginsResult {
    let cap = if max_dimension == 0 {
        DEFAULT_MAX_DIMENSION
    } else {
        max_dimension
    };
    let generator = Generator::builder().with_max_dimension(cap).build();
    generate_with(
        &generator,
        rows,
        num_rows,
        cols,
        num_cols,
        "margins_generate_capped",
    )
}

/// Frees a result returned by `margins_generate` or `margins_generate_capped`.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library, and that it is not used afterwards.
#[no_mangle]
pub unsafe extern "C" fn margins_result_free(ptr: *mut MarginsResult) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Returns `true` if the result holds a matrix.
///
/// # Panics
///
/// This function will panic if called with a null pointer.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library.
#[no_mangle]
pub unsafe extern "C" fn margins_result_is_ok(ptr: *const MarginsResult) -> bool {
    assert!(
        !ptr.is_null(),
        "called `margins_result_is_ok` with null pointer"
    );

    let result = &*ptr;
    result.outcome.is_ok()
}

/// Returns `true` if the result holds an internal invariant violation, which
/// indicates a defect in the generator rather than bad input.
///
/// # Panics
///
/// This function will panic if called with a null pointer.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library.
#[no_mangle]
pub unsafe extern "C" fn margins_result_is_internal_error(ptr: *const MarginsResult) -> bool {
    assert!(
        !ptr.is_null(),
        "called `margins_result_is_internal_error` with null pointer"
    );

    let result = &*ptr;
    matches!(&result.outcome, Err(e) if e.is_internal())
}

/// Returns the error code of the result, or `0` if it holds a matrix.
///
/// | Code | Kind |
/// | :--- | :--- |
/// | 1 | EmptyDimension |
/// | 2 | NegativeValue |
/// | 3 | OutOfRange |
/// | 4 | DimensionTooLarge |
/// | 5 | SumMismatch |
/// | 6 | Infeasible |
/// | 7 | InternalInvariantViolation |
///
/// # Panics
///
/// This function will panic if called with a null pointer.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library.
#[no_mangle]
pub unsafe extern "C" fn margins_result_error_kind(ptr: *const MarginsResult) -> u32 {
    assert!(
        !ptr.is_null(),
        "called `margins_result_error_kind` with null pointer"
    );

    let result = &*ptr;
    match &result.outcome {
        Ok(_) => 0,
        Err(e) => e.kind().code(),
    }
}

/// Returns the NUL-terminated error message, or null if the result holds a matrix.
///
/// The string is owned by the result and stays valid until `margins_result_free`.
///
/// # Panics
///
/// This function will panic if called with a null pointer.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library.
#[no_mangle]
pub unsafe extern "C" fn margins_result_error_message(ptr: *const MarginsResult) -> *const c_char {
    assert!(
        !ptr.is_null(),
        "called `margins_result_error_message` with null pointer"
    );

    let result = &*ptr;
    match &result.message {
        Some(message) => message.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Returns the number of rows of the generated matrix.
///
/// # Panics
///
/// This function will panic if called with a null pointer or
/// on a result without a matrix.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library.
#[no_mangle]
pub unsafe extern "C" fn margins_result_num_rows(ptr: *const MarginsResult) -> usize {
    assert!(
        !ptr.is_null(),
        "called `margins_result_num_rows` with null pointer"
    );

    let result = &*ptr;
    result.matrix("margins_result_num_rows").num_rows()
}

/// Returns the number of columns of the generated matrix.
///
/// # Panics
///
/// This function will panic if called with a null pointer or
/// on a result without a matrix.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library.
#[no_mangle]
pub unsafe extern "C" fn margins_result_num_cols(ptr: *const MarginsResult) -> usize {
    assert!(
        !ptr.is_null(),
        "called `margins_result_num_cols` with null pointer"
    );

    let result = &*ptr;
    result.matrix("margins_result_num_cols").num_cols()
}

/// Returns entry `(row, col)` of the generated matrix.
///
/// # Panics
///
/// This function will panic if called with a null pointer,
/// on a result without a matrix, or with an index out of bounds.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by this library.
#[no_mangle]
pub unsafe extern "C" fn margins_result_get(
    ptr: *const MarginsResult,
    row: usize,
    col: usize,
) -> bool {
    assert!(
        !ptr.is_null(),
        "called `margins_result_get` with null pointer"
    );

    let result = &*ptr;
    let matrix = result.matrix("margins_result_get");
    assert!(
        row < matrix.num_rows() && col < matrix.num_cols(),
        "called `margins_result_get` with index out of bounds: the shape is {}x{} but the index is ({}, {})",
        matrix.num_rows(),
        matrix.num_cols(),
        row,
        col
    );

    matrix.get(RowIndex::new(row), ColumnIndex::new(col))
}

/// Copies the generated matrix row-major into `out` as `0`/`1` bytes.
///
/// # Panics
///
/// This function will panic if called with a null pointer,
/// on a result without a matrix, or if `len` is not `rows * cols`.
///
/// # Safety
///
/// `ptr` must be a valid result allocated by this library and `out` must
/// point to `len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn margins_result_copy_matrix(
    ptr: *const MarginsResult,
    out: *mut u8,
    len: usize,
) {
    assert!(
        !ptr.is_null(),
        "called `margins_result_copy_matrix` with null pointer"
    );

    let result = &*ptr;
    let matrix = result.matrix("margins_result_copy_matrix");
    let cells = matrix.num_rows() * matrix.num_cols();
    assert_eq!(
        len, cells,
        "called `margins_result_copy_matrix` with a buffer of {} bytes for {} cells",
        len, cells
    );
    if cells == 0 {
        return;
    }
    assert!(
        !out.is_null(),
        "called `margins_result_copy_matrix` with null output buffer"
    );

    let out = std::slice::from_raw_parts_mut(out, len);
    for (slot, value) in out.iter_mut().zip(matrix.to_rows().into_iter().flatten()) {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    unsafe fn generate(rows: &[i64], cols: &[i64]) -> *mut MarginsResult {
        margins_generate(rows.as_ptr(), rows.len(), cols.as_ptr(), cols.len())
    }

    #[test]
    fn test_success_exposes_matrix() {
        unsafe {
            let ptr = generate(&[3, 0], &[1, 1, 1]);
            assert!(margins_result_is_ok(ptr));
            assert!(!margins_result_is_internal_error(ptr));
            assert_eq!(margins_result_error_kind(ptr), 0);
            assert!(margins_result_error_message(ptr).is_null());
            assert_eq!(margins_result_num_rows(ptr), 2);
            assert_eq!(margins_result_num_cols(ptr), 3);
            assert!(margins_result_get(ptr, 0, 2));
            assert!(!margins_result_get(ptr, 1, 0));

            let mut buffer = [9u8; 6];
            margins_result_copy_matrix(ptr, buffer.as_mut_ptr(), buffer.len());
            assert_eq!(buffer, [1, 1, 1, 0, 0, 0]);

            margins_result_free(ptr);
        }
    }

    #[test]
    fn test_failure_exposes_kind_and_message() {
        unsafe {
            let ptr = generate(&[3, 3], &[1, 1, 1, 1]);
            assert!(!margins_result_is_ok(ptr));
            assert_eq!(margins_result_error_kind(ptr), 5);

            let message = CStr::from_ptr(margins_result_error_message(ptr));
            assert_eq!(
                message.to_str().unwrap(),
                "row sums total 6 but column sums total 4"
            );

            margins_result_free(ptr);
        }
    }

    #[test]
    fn test_empty_input_with_null_pointer() {
        unsafe {
            let cols = [1i64];
            let ptr = margins_generate(std::ptr::null(), 0, cols.as_ptr(), cols.len());
            assert_eq!(margins_result_error_kind(ptr), 1);
            margins_result_free(ptr);
        }
    }

    #[test]
    fn test_capped_generation() {
        unsafe {
            let rows = [0i64; 3];
            let cols = [0i64; 2];
            let ptr = margins_generate_capped(rows.as_ptr(), 3, cols.as_ptr(), 2, 2);
            assert_eq!(margins_result_error_kind(ptr), 4);
            margins_result_free(ptr);

            let ptr = margins_generate_capped(rows.as_ptr(), 3, cols.as_ptr(), 2, 0);
            assert!(margins_result_is_ok(ptr));
            margins_result_free(ptr);
        }
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe {
            margins_result_free(std::ptr::null_mut());
        }
    }

    // Panics inside the exported functions abort at the `extern "C"` boundary,
    // so the fail-fast checks are exercised through the Rust helpers.
    #[test]
    #[should_panic(expected = "called `margins_result_num_rows` on a result without a matrix")]
    fn test_matrix_access_on_error_panics() {
        let result = MarginsResult::new(Generator::new().generate(&[5i64], &[1, 1, 1]));
        let _ = result.matrix("margins_result_num_rows");
    }

    #[test]
    #[should_panic(expected = "called `margins_generate` with null pointer and length 2")]
    fn test_null_array_with_length_panics() {
        unsafe {
            let _ = margins_from_raw(std::ptr::null(), 2, "margins_generate");
        }
    }
}
