//! Numeric payload of a [`Value`](super::Value).
//!
//! A parsed number keeps its source lexeme and is only interpreted when a
//! typed accessor asks for it. A number set through a typed setter keeps that
//! concrete representation and is handed back through every accessor.

use std::num::{IntErrorKind, ParseIntError};

use crate::error::NumberConversionError;

/// How a number is currently represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Verbatim source text, not yet interpreted
    Raw,
    /// 32-bit signed integer
    Int,
    /// 32-bit unsigned integer
    Uint,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    Uint64,
    /// Double-precision float
    Double,
    /// Single-precision float
    Float,
    /// 16-bit signed integer
    Int16,
}

impl NumberKind {
    /// Returns the name used in error messages.
    pub fn type_name(self) -> &'static str {
        match self {
            NumberKind::Raw => "raw number",
            NumberKind::Int => "i32",
            NumberKind::Uint => "u32",
            NumberKind::Int64 => "i64",
            NumberKind::Uint64 => "u64",
            NumberKind::Double => "f64",
            NumberKind::Float => "f32",
            NumberKind::Int16 => "i16",
        }
    }
}

/// A JSON number: either raw source text or one concrete host value.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Source lexeme captured by the parser (or set explicitly)
    Raw(String),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit unsigned integer
    Uint(u32),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit unsigned integer
    Uint64(u64),
    /// Double-precision float
    Double(f64),
    /// Single-precision float
    Float(f32),
    /// 16-bit signed integer
    Int16(i16),
}

// Concrete numbers answer every accessor with their stored value; `as` is the
// cast, so reading an f64 through an integer accessor saturates and
// narrowing integer reads truncate.
macro_rules! read_as {
    ($number:expr, $ty:ty, $raw:path $(, $target:expr)?) => {
        match $number {
            Number::Raw(text) => $raw(text.as_str() $(, $target)?),
            Number::Int(v) => Ok(*v as $ty),
            Number::Uint(v) => Ok(*v as $ty),
            Number::Int64(v) => Ok(*v as $ty),
            Number::Uint64(v) => Ok(*v as $ty),
            Number::Double(v) => Ok(*v as $ty),
            Number::Float(v) => Ok(*v as $ty),
            Number::Int16(v) => Ok(*v as $ty),
        }
    };
}

#[allow(clippy::unnecessary_cast)]
impl Number {
    /// Returns the representation tag.
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Raw(_) => NumberKind::Raw,
            Number::Int(_) => NumberKind::Int,
            Number::Uint(_) => NumberKind::Uint,
            Number::Int64(_) => NumberKind::Int64,
            Number::Uint64(_) => NumberKind::Uint64,
            Number::Double(_) => NumberKind::Double,
            Number::Float(_) => NumberKind::Float,
            Number::Int16(_) => NumberKind::Int16,
        }
    }

    /// Returns the source text if this number has not been given a concrete type.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Number::Raw(text) => Some(text),
            _ => None,
        }
    }

    /// Reads the number as `i32`.
    pub fn to_i32(&self) -> Result<i32, NumberConversionError> {
        read_as!(self, i32, parse_integer, "i32")
    }

    /// Reads the number as `u32`.
    pub fn to_u32(&self) -> Result<u32, NumberConversionError> {
        read_as!(self, u32, parse_integer, "u32")
    }

    /// Reads the number as `i64`.
    pub fn to_i64(&self) -> Result<i64, NumberConversionError> {
        read_as!(self, i64, parse_integer, "i64")
    }

    /// Reads the number as `u64`.
    pub fn to_u64(&self) -> Result<u64, NumberConversionError> {
        read_as!(self, u64, parse_integer, "u64")
    }

    /// Reads the number as `i16`.
    pub fn to_i16(&self) -> Result<i16, NumberConversionError> {
        read_as!(self, i16, parse_integer, "i16")
    }

    /// Reads the number as `f64`.
    pub fn to_f64(&self) -> Result<f64, NumberConversionError> {
        read_as!(self, f64, parse_f64)
    }

    /// Reads the number as `f32`.
    pub fn to_f32(&self) -> Result<f32, NumberConversionError> {
        read_as!(self, f32, parse_f32)
    }
}

/// Parse decimal integer text into `T`.
///
/// Text that is a well-formed integer but does not fit `T` is out of range,
/// including a negative literal read as an unsigned type.
fn parse_integer<T: TryFrom<i128>>(
    text: &str,
    target: &'static str,
) -> Result<T, NumberConversionError> {
    let wide: i128 = text.parse().map_err(|err: ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            NumberConversionError::out_of_range(text, target)
        }
        _ => NumberConversionError::not_a_number(text, target),
    })?;
    T::try_from(wide).map_err(|_| NumberConversionError::out_of_range(text, target))
}

/// Rust's float parser also accepts `inf`, `NaN` and friends; those are not
/// number literals here.
fn is_decimal_literal(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'))
}

fn parse_f64(text: &str) -> Result<f64, NumberConversionError> {
    if !is_decimal_literal(text) {
        return Err(NumberConversionError::not_a_number(text, "f64"));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| NumberConversionError::not_a_number(text, "f64"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberConversionError::out_of_range(text, "f64"))
    }
}

fn parse_f32(text: &str) -> Result<f32, NumberConversionError> {
    if !is_decimal_literal(text) {
        return Err(NumberConversionError::not_a_number(text, "f32"));
    }
    let value: f32 = text
        .parse()
        .map_err(|_| NumberConversionError::not_a_number(text, "f32"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberConversionError::out_of_range(text, "f32"))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Uint(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int64(value)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::Uint64(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Double(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Int16(value)
    }
}
