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

//! # Margin Numeric Trait
//!
//! Margins arrive from user input and may be negative, so they are carried as
//! signed integers until validation has proven them usable as counts. The
//! `MarginValue` alias bundles the bounds the validator and the generator need:
//! primitive integer arithmetic, a sign, conversion to `usize` (through
//! `num_traits::ToPrimitive`), formatting for error messages, and thread safety
//! so independent generations can run in parallel.
//!
//! Any of `i8`, `i16`, `i32`, `i64`, `i128` and `isize` qualifies.

use num_traits::{PrimInt, Signed};

/// A trait alias for integer types that can be used as row or column sums.
///
/// # Examples
///
/// ```rust
/// # use margins_core::num::{MarginValue, to_count};
///
/// fn total<T: MarginValue>(values: &[T]) -> Option<usize> {
///     values.iter().map(|&v| to_count(v)).sum()
/// }
///
/// assert_eq!(total(&[1i32, 2, 3]), Some(6));
/// assert_eq!(total(&[1i64, -2]), None);
/// ```
pub trait MarginValue:
    PrimInt + Signed + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

impl<T> MarginValue for T where
    T: PrimInt + Signed + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

/// Converts a margin value into a count.
///
/// Returns `None` for negative values and for values that do not fit into `usize`.
#[inline]
pub fn to_count<T>(value: T) -> Option<usize>
where
    T: MarginValue,
{
    if value.is_negative() {
        return None;
    }
    value.to_usize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_count_accepts_non_negative() {
        assert_eq!(to_count(0i8), Some(0));
        assert_eq!(to_count(17i32), Some(17));
        assert_eq!(to_count(i64::MAX), usize::try_from(i64::MAX).ok());
    }

    #[test]
    fn test_to_count_rejects_negative() {
        assert_eq!(to_count(-1i16), None);
        assert_eq!(to_count(isize::MIN), None);
    }

    #[test]
    fn test_to_count_rejects_values_beyond_usize() {
        if (usize::MAX as u128) < (i128::MAX as u128) {
            assert_eq!(to_count(i128::MAX), None);
        }
    }
}
