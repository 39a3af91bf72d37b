//! JSON lexer/tokenizer.
//!
//! Turns input text into tokens for the parser. Every read is bounds-checked;
//! running off the end of the input becomes an error, never an out-of-range
//! access. Strings and numbers share one scanner no matter which container
//! they sit in.

use crate::error::{ParseError, ParseResult};
use crate::limits::Limits;

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (escapes decoded)
    String(String),
    /// Number value as its verbatim lexeme
    Number(String),
    /// End of input
    Eof,
}

impl Token {
    /// The character a token starts with, for error reporting.
    pub fn lead_char(&self) -> Option<char> {
        match self {
            Token::LeftBrace => Some('{'),
            Token::RightBrace => Some('}'),
            Token::LeftBracket => Some('['),
            Token::RightBracket => Some(']'),
            Token::Colon => Some(':'),
            Token::Comma => Some(','),
            Token::Null => Some('n'),
            Token::True => Some('t'),
            Token::False => Some('f'),
            Token::String(_) => Some('"'),
            Token::Number(lexeme) => lexeme.chars().next(),
            Token::Eof => None,
        }
    }
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str, limits: &Limits) -> ParseResult<Self> {
        if input.len() > limits.max_input_size {
            return Err(ParseError::InputTooLarge {
                size: input.len(),
                limit: limits.max_input_size,
            });
        }

        Ok(Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            token_start: 0,
        })
    }

    /// Get the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset where the most recently returned token starts.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Peek at the current byte without consuming it.
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consume and return the current byte.
    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Skip whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// The full character at the cursor, which may be multi-byte.
    fn char_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn unexpected_at(&self, pos: usize) -> ParseError {
        match self.char_at(pos) {
            Some(found) => ParseError::UnexpectedCharacter { found, offset: pos },
            None => ParseError::UnexpectedEndOfInput(pos),
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();
        self.token_start = self.pos;

        let token = match self.peek() {
            None => return Ok(Token::Eof),
            Some(b'{') => Token::LeftBrace,
            Some(b'}') => Token::RightBrace,
            Some(b'[') => Token::LeftBracket,
            Some(b']') => Token::RightBracket,
            Some(b':') => Token::Colon,
            Some(b',') => Token::Comma,
            Some(b'"') => return self.read_string(),
            Some(b'-' | b'0'..=b'9') => return self.read_number(),
            Some(b't') => return self.read_keyword("true", Token::True),
            Some(b'f') => return self.read_keyword("false", Token::False),
            Some(b'n') => return self.read_keyword("null", Token::Null),
            Some(_) => return Err(self.unexpected_at(self.pos)),
        };
        self.pos += 1;
        Ok(token)
    }

    /// Read a string token, decoding escape sequences.
    fn read_string(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        // Consume opening quote
        self.pos += 1;

        let mut result = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some(b'"') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    let escaped = self.read_escape_sequence(start)?;
                    result.push(escaped);
                    run_start = self.pos;
                }
                // Everything else, including raw control characters and
                // multi-byte UTF-8, is copied verbatim. Runs are split only
                // at ASCII bytes, so slicing stays on char boundaries.
                Some(_) => self.pos += 1,
            }
        }

        Ok(Token::String(result))
    }

    /// Read an escape sequence starting at the backslash under the cursor.
    fn read_escape_sequence(&mut self, string_start: usize) -> ParseResult<char> {
        let escape_start = self.pos;
        self.pos += 1;

        match self.advance() {
            None => Err(ParseError::UnterminatedString(string_start)),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(string_start, escape_start),
            Some(_) => Err(ParseError::InvalidEscape(escape_start)),
        }
    }

    /// Read the XXXX of a \uXXXX escape, pairing surrogates.
    fn read_unicode_escape(&mut self, string_start: usize, escape_start: usize) -> ParseResult<char> {
        let high = self.read_hex4(string_start, escape_start)?;

        if (0xD800..=0xDBFF).contains(&high) {
            // Must be followed by \uXXXX low surrogate
            if self.peek() != Some(b'\\') || self.bytes.get(self.pos + 1) != Some(&b'u') {
                return Err(ParseError::InvalidEscape(escape_start));
            }
            self.pos += 2;
            let low = self.read_hex4(string_start, escape_start)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ParseError::InvalidEscape(escape_start));
            }
            let combined = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined).ok_or(ParseError::InvalidEscape(escape_start));
        }

        // Lone low surrogates are rejected here by char::from_u32
        char::from_u32(u32::from(high)).ok_or(ParseError::InvalidEscape(escape_start))
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self, string_start: usize, escape_start: usize) -> ParseResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self
                .advance()
                .ok_or(ParseError::UnterminatedString(string_start))?;
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => return Err(ParseError::InvalidEscape(escape_start)),
            };
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    fn skip_digits(&mut self) -> usize {
        let from = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - from
    }

    fn invalid_number(&self, start: usize) -> ParseError {
        // Include the offending character, if any, in the reported literal.
        let end = self
            .char_at(self.pos)
            .map_or(self.pos, |c| self.pos + c.len_utf8());
        ParseError::InvalidNumberLiteral {
            literal: self.input[start..end].to_string(),
            offset: start,
        }
    }

    /// Read a number token.
    ///
    /// Accepts the full JSON grammar: optional minus, integer part without
    /// leading zeros, optional fraction, optional exponent. The lexeme is
    /// kept verbatim.
    fn read_number(&mut self) -> ParseResult<Token> {
        let start = self.pos;

        // Optional minus sign
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        // Integer part
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                // After leading zero, must not have more digits
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(self.invalid_number(start));
                }
            }
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(self.invalid_number(start)),
        }

        // Fraction
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.skip_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }

        // Exponent
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }

        Ok(Token::Number(self.input[start..self.pos].to_string()))
    }

    /// Read a `true`/`false`/`null` keyword in full.
    fn read_keyword(&mut self, keyword: &str, token: Token) -> ParseResult<Token> {
        let start = self.pos;
        let rest = &self.bytes[start..];

        if rest.starts_with(keyword.as_bytes()) {
            self.pos += keyword.len();
            return Ok(token);
        }
        if keyword.as_bytes().starts_with(rest) {
            // A truncated keyword at the very end of the input.
            return Err(ParseError::UnexpectedEndOfInput(self.bytes.len()));
        }
        Err(ParseError::InvalidLiteralKeyword(start))
    }
}
