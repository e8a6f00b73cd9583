use std::num::{IntErrorKind, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

use crate::prelude::Convertible;

/// The reason a token could not be converted into a value.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The token is not a well formed value of the target type.
    #[error("invalid format")]
    InvalidFormat,
    /// The token is well formed, but outside the range of the target type.
    #[error("value out of range")]
    OutOfRange,
}

impl From<ParseIntError> for ConversionError {
    fn from(error: ParseIntError) -> Self {
        match error.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConversionError::OutOfRange,
            _ => ConversionError::InvalidFormat,
        }
    }
}

// `0x..` is hexadecimal, `0..` (with at least one more digit) is octal, otherwise decimal.
fn split_radix(token: &str) -> (&str, u32) {
    if let Some(digits) = token.strip_prefix("0x") {
        (digits, 16)
    } else if token.len() > 1 && token.starts_with('0') {
        (&token[1..], 8)
    } else {
        (token, 10)
    }
}

macro_rules! impl_on_integer {
    ($($ty:ty),*) => {
        $(
            impl Convertible for $ty {
                fn from_token(token: &str) -> Result<Self, ConversionError> {
                    let (digits, radix) = split_radix(token);

                    // `from_str_radix` accepts an explicit '+' sign, which isn't a valid token.
                    if digits.starts_with('+') {
                        return Err(ConversionError::InvalidFormat);
                    }

                    Ok(<$ty>::from_str_radix(digits, radix)?)
                }

                fn to_token(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_on_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_on_float {
    ($($ty:ty),*) => {
        $(
            impl Convertible for $ty {
                fn from_token(token: &str) -> Result<Self, ConversionError> {
                    if token.starts_with('+') {
                        return Err(ConversionError::InvalidFormat);
                    }

                    let value: $ty = token
                        .parse()
                        .map_err(|_| ConversionError::InvalidFormat)?;

                    // Rust saturates to infinity where the value is simply too large.
                    if value.is_infinite() && !is_infinity(token) {
                        return Err(ConversionError::OutOfRange);
                    }

                    Ok(value)
                }

                fn to_token(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_on_float!(f32, f64);

fn is_infinity(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

impl Convertible for char {
    fn from_token(token: &str) -> Result<Self, ConversionError> {
        let mut chars = token.chars();

        match (chars.next(), chars.next()) {
            (Some(single), None) => Ok(single),
            _ => Err(ConversionError::InvalidFormat),
        }
    }

    fn to_token(&self) -> String {
        self.to_string()
    }
}

impl Convertible for String {
    fn from_token(token: &str) -> Result<Self, ConversionError> {
        Ok(token.to_string())
    }

    fn to_token(&self) -> String {
        self.clone()
    }
}

impl Convertible for PathBuf {
    fn from_token(token: &str) -> Result<Self, ConversionError> {
        Ok(PathBuf::from(token))
    }

    fn to_token(&self) -> String {
        self.display().to_string()
    }
}
