//! Error types for parsing, numeric conversion and typed access.
//!
//! Every failure surfaces to the direct caller. The parser never hands back a
//! partially populated [`Document`](crate::Document): a call either yields a
//! complete tree or one of the errors below.

use thiserror::Error;

/// Errors raised while turning JSON text into a document.
///
/// Syntax errors carry the byte offset into the input at which the problem
/// was detected; limit violations carry the measured size instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input ended while a value or container was still open.
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEndOfInput(usize),

    /// A character that cannot start or continue the expected token.
    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedCharacter {
        /// The offending character
        found: char,
        /// Byte offset of the character
        offset: usize,
    },

    /// A string literal with no closing quote.
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    /// A number lexeme that does not follow JSON number grammar.
    #[error("invalid number literal {literal:?} at byte {offset}")]
    InvalidNumberLiteral {
        /// The text consumed before the grammar was violated
        literal: String,
        /// Byte offset of the first character of the literal
        offset: usize,
    },

    /// A bare word that is not `true`, `false` or `null`.
    #[error("invalid literal keyword at byte {0}")]
    InvalidLiteralKeyword(usize),

    /// A backslash sequence that is not a JSON escape.
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),

    /// Containers nested deeper than the configured limit.
    #[error("nesting depth {depth} exceeds limit {limit}")]
    NestingTooDeep {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Input longer than the configured limit.
    #[error("input of {size} bytes exceeds limit {limit}")]
    InputTooLarge {
        /// Input length in bytes
        size: usize,
        /// Configured maximum
        limit: usize,
    },
}

impl ParseError {
    /// Numeric code of this error, stable across releases.
    pub fn code(&self) -> u32 {
        match self {
            ParseError::UnexpectedEndOfInput(_) => 100,
            ParseError::UnexpectedCharacter { .. } => 101,
            ParseError::UnterminatedString(_) => 102,
            ParseError::InvalidNumberLiteral { .. } => 103,
            ParseError::InvalidLiteralKeyword(_) => 104,
            ParseError::InvalidEscape(_) => 105,
            ParseError::NestingTooDeep { .. } => 110,
            ParseError::InputTooLarge { .. } => 111,
        }
    }

    /// Name of the error variant.
    pub fn name(&self) -> &'static str {
        match self {
            ParseError::UnexpectedEndOfInput(_) => "UnexpectedEndOfInput",
            ParseError::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ParseError::UnterminatedString(_) => "UnterminatedString",
            ParseError::InvalidNumberLiteral { .. } => "InvalidNumberLiteral",
            ParseError::InvalidLiteralKeyword(_) => "InvalidLiteralKeyword",
            ParseError::InvalidEscape(_) => "InvalidEscape",
            ParseError::NestingTooDeep { .. } => "NestingTooDeep",
            ParseError::InputTooLarge { .. } => "InputTooLarge",
        }
    }

    /// Byte offset at which the error was detected, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEndOfInput(offset)
            | ParseError::UnterminatedString(offset)
            | ParseError::InvalidLiteralKeyword(offset)
            | ParseError::InvalidEscape(offset)
            | ParseError::UnexpectedCharacter { offset, .. }
            | ParseError::InvalidNumberLiteral { offset, .. } => Some(*offset),
            ParseError::NestingTooDeep { .. } | ParseError::InputTooLarge { .. } => None,
        }
    }
}

/// Why raw numeric text could not be read as the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionErrorKind {
    /// The text is not a literal of the requested type.
    NotANumber,
    /// The literal is valid but its magnitude does not fit the requested type.
    OutOfRange,
}

impl std::fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionErrorKind::NotANumber => f.write_str("not a number"),
            ConversionErrorKind::OutOfRange => f.write_str("out of range"),
        }
    }
}

/// Raised by a typed numeric getter when reinterpreting raw text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read {text:?} as {target}: {kind}")]
pub struct NumberConversionError {
    /// Failure category
    pub kind: ConversionErrorKind,
    /// The raw text that was being converted
    pub text: String,
    /// Name of the requested host type, e.g. `i32`
    pub target: &'static str,
}

impl NumberConversionError {
    pub(crate) fn not_a_number(text: &str, target: &'static str) -> Self {
        Self {
            kind: ConversionErrorKind::NotANumber,
            text: text.to_owned(),
            target,
        }
    }

    pub(crate) fn out_of_range(text: &str, target: &'static str) -> Self {
        Self {
            kind: ConversionErrorKind::OutOfRange,
            text: text.to_owned(),
            target,
        }
    }
}

/// Raised by a getter invoked on a value of a different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type mismatch: expected {expected}, found {found}")]
pub struct TypeMismatch {
    /// Kind the accessor reads
    pub expected: &'static str,
    /// Kind the value actually holds
    pub found: &'static str,
}

/// Any error this crate produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed input text.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Raw numeric text could not be converted.
    #[error(transparent)]
    NumberConversion(#[from] NumberConversionError),
    /// Accessor does not match the value's kind.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
}

/// Result type for parser operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type for value access.
pub type Result<T> = std::result::Result<T, Error>;
