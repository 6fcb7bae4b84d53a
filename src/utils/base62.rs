//! Base62 numeral codec for short link names.
//!
//! Maps a non-negative row id to a compact token over `[0-9A-Za-z]` and back.
//! Digit values follow the alphabet order: `0-9` are 0–9, `A-Z` are 10–35 and
//! `a-z` are 36–61. Tokens are written most significant digit first.
//!
//! # Examples
//!
//! ```
//! use shortr::utils::base62::{decode, encode};
//!
//! assert_eq!(encode(0).unwrap(), "0");
//! assert_eq!(encode(62).unwrap(), "10");
//! assert_eq!(decode("Z").unwrap(), 35);
//! ```

use thiserror::Error;

/// Number of symbols in the alphabet.
pub const BASE: i64 = 62;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Errors produced by [`encode`] and [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base62Error {
    /// The input cannot be represented (negative number, or a token whose
    /// value does not fit in an `i64`).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A digit value outside `0..62` reached the symbol table.
    #[error("{0} is not a valid base62 digit")]
    InvalidDigit(i64),

    /// The token contains a character outside `[0-9A-Za-z]`.
    #[error("'{character}' at position {position} is not a valid base62 character")]
    InvalidCharacter { character: char, position: usize },
}

/// Encodes a non-negative integer as a base62 token.
///
/// # Errors
///
/// Returns [`Base62Error::InvalidInput`] for negative numbers.
pub fn encode(number: i64) -> Result<String, Base62Error> {
    if number < 0 {
        return Err(Base62Error::InvalidInput(format!(
            "cannot encode negative number {number}"
        )));
    }

    if number == 0 {
        return Ok("0".to_string());
    }

    // i64::MAX needs 11 digits
    let mut digits = Vec::with_capacity(11);
    let mut rest = number;
    while rest > 0 {
        digits.push(symbol(rest % BASE)?);
        rest /= BASE;
    }

    Ok(digits.iter().rev().copied().map(char::from).collect())
}

/// Decodes a base62 token back into its integer value.
///
/// The empty token decodes to `0`.
///
/// # Errors
///
/// Returns [`Base62Error::InvalidCharacter`] for characters outside the
/// alphabet and [`Base62Error::InvalidInput`] when the value overflows `i64`.
pub fn decode(token: &str) -> Result<i64, Base62Error> {
    token
        .chars()
        .enumerate()
        .try_fold(0i64, |number, (position, character)| {
            let digit = value(character).ok_or(Base62Error::InvalidCharacter {
                character,
                position,
            })?;

            number
                .checked_mul(BASE)
                .and_then(|shifted| shifted.checked_add(digit))
                .ok_or_else(|| {
                    Base62Error::InvalidInput(format!(
                        "'{token}' does not fit in a 64-bit integer"
                    ))
                })
        })
}

/// Maps a digit value to its alphabet symbol.
fn symbol(digit: i64) -> Result<u8, Base62Error> {
    usize::try_from(digit)
        .ok()
        .and_then(|index| ALPHABET.get(index).copied())
        .ok_or(Base62Error::InvalidDigit(digit))
}

/// Maps an alphabet symbol to its digit value.
fn value(character: char) -> Option<i64> {
    let digit = match character {
        '0'..='9' => character as u32 - '0' as u32,
        'A'..='Z' => character as u32 - 'A' as u32 + 10,
        'a'..='z' => character as u32 - 'a' as u32 + 36,
        _ => return None,
    };
    Some(i64::from(digit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode(0).unwrap(), "0");
    }

    #[test]
    fn test_encode_literals() {
        assert_eq!(encode(9).unwrap(), "9");
        assert_eq!(encode(10).unwrap(), "A");
        assert_eq!(encode(35).unwrap(), "Z");
        assert_eq!(encode(36).unwrap(), "a");
        assert_eq!(encode(61).unwrap(), "z");
        assert_eq!(encode(62).unwrap(), "10");
        assert_eq!(encode(3843).unwrap(), "zz");
        assert_eq!(encode(3844).unwrap(), "100");
    }

    #[test]
    fn test_encode_negative_is_rejected() {
        let result = encode(-1);
        assert!(matches!(result, Err(Base62Error::InvalidInput(_))));
    }

    #[test]
    fn test_encode_max() {
        let token = encode(i64::MAX).unwrap();
        assert_eq!(token, "AzL8n0Y58m7");
        assert_eq!(decode(&token).unwrap(), i64::MAX);
    }

    #[test]
    fn test_decode_literals() {
        assert_eq!(decode("0").unwrap(), 0);
        assert_eq!(decode("Z").unwrap(), 35);
        assert_eq!(decode("z").unwrap(), 61);
        assert_eq!(decode("10").unwrap(), 62);
        assert_eq!(decode("zz").unwrap(), 3843);
    }

    #[test]
    fn test_decode_empty_is_zero() {
        assert_eq!(decode("").unwrap(), 0);
    }

    #[test]
    fn test_decode_leading_zeros() {
        assert_eq!(decode("0010").unwrap(), 62);
    }

    #[test]
    fn test_decode_invalid_character() {
        let err = decode("ab-c").unwrap_err();
        assert_eq!(
            err,
            Base62Error::InvalidCharacter {
                character: '-',
                position: 2
            }
        );
        assert!(err.to_string().contains("not a valid base62 character"));
    }

    #[test]
    fn test_decode_non_ascii_character() {
        let err = decode("aé").unwrap_err();
        assert!(matches!(
            err,
            Base62Error::InvalidCharacter {
                character: 'é',
                position: 1
            }
        ));
    }

    #[test]
    fn test_decode_overflow() {
        // One past i64::MAX
        assert!(matches!(
            decode("AzL8n0Y58m8"),
            Err(Base62Error::InvalidInput(_))
        ));
        assert!(matches!(
            decode("zzzzzzzzzzzz"),
            Err(Base62Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_max_with_leading_zeros() {
        assert_eq!(decode("0000AzL8n0Y58m7").unwrap(), i64::MAX);
    }

    #[test]
    fn test_symbol_rejects_out_of_range_digit() {
        assert_eq!(symbol(62), Err(Base62Error::InvalidDigit(62)));
        assert_eq!(symbol(-1), Err(Base62Error::InvalidDigit(-1)));
    }

    #[test]
    fn test_round_trip_first_ten_million() {
        for n in 0..=10_000_000 {
            let token = encode(n).unwrap();
            assert_eq!(decode(&token).unwrap(), n, "round trip failed for {n}");
        }
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(n in 0i64..=i64::MAX) {
            let token = encode(n).unwrap();
            prop_assert_eq!(decode(&token).unwrap(), n);
        }

        #[test]
        fn prop_encode_inverts_decode(token in "[1-9A-Za-z][0-9A-Za-z]{0,9}") {
            let n = decode(&token).unwrap();
            prop_assert_eq!(encode(n).unwrap(), token);
        }
    }
}
