//! Coercion of raw environment strings into typed leaf values.
//!
//! Responsibilities:
//! - Define `EnvValue`, the set of field types the overlay can assign.
//! - Parse with the exact width of the target type.
//!
//! Does NOT handle:
//! - Reading variables or deciding whether to assign (see `walker.rs`).
//!
//! Invariants:
//! - Parsing never trims; `" 1"` is not an integer.
//! - Finite float literals that overflow the target width are errors.
//! - `ValueError` never carries the raw input, so secrets stay out of logs.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Why a raw environment value could not become a field value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
    InvalidBool,

    #[error("invalid integer: {0}")]
    InvalidInt(#[from] ParseIntError),

    #[error("invalid float: {0}")]
    InvalidFloat(#[from] ParseFloatError),

    #[error("value out of range for {0}")]
    OutOfRange(&'static str),
}

/// A field type that can be assigned from an environment variable.
pub trait EnvValue: Sized {
    /// Human-readable kind used in diagnostics, e.g. `"i32"`.
    const KIND: &'static str;

    /// Parse a non-empty raw value.
    fn from_env_str(raw: &str) -> Result<Self, ValueError>;
}

impl EnvValue for bool {
    const KIND: &'static str = "bool";

    fn from_env_str(raw: &str) -> Result<Self, ValueError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ValueError::InvalidBool),
        }
    }
}

impl EnvValue for String {
    const KIND: &'static str = "string";

    fn from_env_str(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }
}

macro_rules! int_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                const KIND: &'static str = stringify!($ty);

                fn from_env_str(raw: &str) -> Result<Self, ValueError> {
                    Ok(raw.parse::<$ty>()?)
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                const KIND: &'static str = stringify!($ty);

                fn from_env_str(raw: &str) -> Result<Self, ValueError> {
                    let value = raw.parse::<$ty>()?;
                    if value.is_infinite() && !is_infinity_literal(raw) {
                        return Err(ValueError::OutOfRange(Self::KIND));
                    }
                    Ok(value)
                }
            }
        )*
    };
}

float_value!(f32, f64);

/// Whether `raw` spells infinity rather than overflowing into it.
fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

impl<T: EnvValue> EnvValue for Option<T> {
    const KIND: &'static str = T::KIND;

    fn from_env_str(raw: &str) -> Result<Self, ValueError> {
        T::from_env_str(raw).map(Some)
    }
}
