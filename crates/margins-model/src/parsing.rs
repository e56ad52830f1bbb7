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

//! Comma-separated margin input.
//!
//! Two flavors are offered for turning text like `"3, 1, 2"` into a margin
//! sequence:
//!
//! * `parse_margins` is permissive: each token contributes its leading integer
//!   (an optional sign followed by digits), so `"2.5"` reads as `2` and `"3abc"`
//!   as `3`. Tokens without a leading integer are dropped and reported at
//!   `debug` level, so `"1, x, 2"` yields `[1, 2]`.
//! * `parse_margins_strict` stops at the first token that is not an integer and
//!   returns a `ParseMarginsError` pointing at it.
//!
//! In both, tokens are trimmed and empty tokens (`"1,,2"`, a trailing comma)
//! are skipped. Range checks are not done here; `Margins::new` owns those.

use std::str::FromStr;

/// Details about a token that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse token '{token}' at position {position} as type {type_name}")]
pub struct ParseMarginsError {
    /// The trimmed token.
    pub token: String,
    /// The zero-based position of the token among the comma-separated fields.
    pub position: usize,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

fn tokens(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .split(',')
        .map(str::trim)
        .enumerate()
        .filter(|(_, token)| !token.is_empty())
}

/// Returns the longest prefix of `token` made of an optional sign and digits,
/// or `None` if no digit follows the sign.
fn leading_integer(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (digits > 0).then(|| &token[..sign + digits])
}

/// Parses comma-separated integers, reading the leading integer of every token
/// and silently dropping tokens that have none.
///
/// A leading integer that does not fit into `T` drops the token as well.
///
/// # Examples
///
/// ```rust
/// # use margins_model::parsing::parse_margins;
///
/// let values: Vec<i64> = parse_margins(" 3, 1 ,two, -2, 4.5, 7kg,");
/// assert_eq!(values, vec![3, 1, -2, 4, 7]);
/// ```
pub fn parse_margins<T>(input: &str) -> Vec<T>
where
    T: FromStr,
{
    tokens(input)
        .filter_map(|(position, token)| {
            match leading_integer(token).map(str::parse::<T>) {
                Some(Ok(value)) => Some(value),
                _ => {
                    log::debug!(
                        "dropping non-numeric margin token '{token}' at position {position}"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Parses comma-separated integers, failing on the first token that does not parse.
///
/// # Examples
///
/// ```rust
/// # use margins_model::parsing::parse_margins_strict;
///
/// let values: Vec<i32> = parse_margins_strict("2, 2, 2").unwrap();
/// assert_eq!(values, vec![2, 2, 2]);
///
/// let err = parse_margins_strict::<i32>("2, x").unwrap_err();
/// assert_eq!(err.token, "x");
/// assert_eq!(err.position, 1);
/// ```
pub fn parse_margins_strict<T>(input: &str) -> Result<Vec<T>, ParseMarginsError>
where
    T: FromStr,
{
    tokens(input)
        .map(|(position, token)| {
            token.parse::<T>().map_err(|_| ParseMarginsError {
                token: token.to_owned(),
                position,
                type_name: std::any::type_name::<T>(),
            })
        })
        .collect()
}
