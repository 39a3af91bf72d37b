//! Recursive-descent parser producing a [`Document`].
//!
//! The top level of every input must be a single object. Nested containers
//! are matched by explicit depth tracking, so whitespace after the root close
//! is accepted and anything else after it is an error.
//!
//! Duplicate keys are not rejected; the last occurrence wins. Parsed numbers
//! keep their source text until a typed accessor reads them.

use tracing::{debug, trace};

use crate::document::Document;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token};
use crate::limits::Limits;
use crate::value::{Map, MapOrder, Value};

/// Parser configuration.
///
/// A `Parser` holds no cursor state: each [`parse`](Parser::parse) call
/// scans its input with a fresh cursor, so one parser can be reused for any
/// number of inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    limits: Limits,
    order: MapOrder,
}

impl Parser {
    /// Parser with standard limits and insertion-ordered objects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given resource limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Back every parsed object, including the root, with `order`.
    pub fn with_order(mut self, order: MapOrder) -> Self {
        self.order = order;
        self
    }

    /// The configured limits.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The configured member order.
    pub fn order(&self) -> MapOrder {
        self.order
    }

    /// Parse `text` into a document.
    ///
    /// Empty (or whitespace-only) input yields an empty document.
    pub fn parse(&self, text: &str) -> ParseResult<Document> {
        debug!(len = text.len(), order = ?self.order, "parsing document");

        let result = self.parse_inner(text);
        match &result {
            Ok(doc) => debug!(members = doc.len(), "parsed document"),
            Err(err) => debug!(error = %err, "parse failed"),
        }
        result
    }

    fn parse_inner(&self, text: &str) -> ParseResult<Document> {
        let mut descent = Descent::new(text, &self.limits, self.order)?;

        let members = match descent.current {
            Token::Eof => return Ok(Document::with_order(self.order)),
            Token::LeftBrace => descent.parse_object()?,
            _ => return Err(descent.unexpected()),
        };

        // Ensure no trailing content
        if descent.current != Token::Eof {
            return Err(descent.unexpected());
        }

        Ok(Document::from(members))
    }
}

/// One pass over one input.
struct Descent<'a> {
    lexer: Lexer<'a>,
    current: Token,
    current_start: usize,
    order: MapOrder,
    max_depth: usize,
    depth: usize,
}

impl<'a> Descent<'a> {
    fn new(input: &'a str, limits: &Limits, order: MapOrder) -> ParseResult<Self> {
        let mut lexer = Lexer::new(input, limits)?;
        let current = lexer.next_token()?;
        Ok(Self {
            current_start: lexer.token_start(),
            lexer,
            current,
            order,
            max_depth: limits.max_nesting_depth,
            depth: 0,
        })
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        self.current_start = self.lexer.token_start();
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Error for a current token that does not fit the grammar here.
    fn unexpected(&self) -> ParseError {
        match self.current.lead_char() {
            Some(found) => ParseError::UnexpectedCharacter {
                found,
                offset: self.current_start,
            },
            None => ParseError::UnexpectedEndOfInput(self.current_start),
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                depth: self.depth,
                limit: self.max_depth,
            });
        }
        trace!(depth = self.depth, "entering container");
        Ok(())
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> ParseResult<Value> {
        match &mut self.current {
            Token::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            Token::True => {
                self.advance()?;
                Ok(Value::Boolean(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Value::Boolean(false))
            }
            Token::String(s) => {
                let value = Value::String(std::mem::take(s));
                self.advance()?;
                Ok(value)
            }
            Token::Number(lexeme) => {
                let value = Value::raw_number(std::mem::take(lexeme));
                self.advance()?;
                Ok(value)
            }
            Token::LeftBrace => Ok(Value::Object(self.parse_object()?)),
            Token::LeftBracket => Ok(Value::Array(self.parse_array()?)),
            _ => Err(self.unexpected()),
        }
    }

    /// Parse a JSON object whose `{` is the current token.
    fn parse_object(&mut self) -> ParseResult<Map> {
        self.enter()?;

        // Consume opening brace
        self.advance()?;

        let mut map = Map::with_order(self.order);

        // Empty object
        if self.current == Token::RightBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(map);
        }

        loop {
            // Expect string key
            let key = match &mut self.current {
                Token::String(s) => std::mem::take(s),
                _ => return Err(self.unexpected()),
            };
            self.advance()?;

            // Expect colon
            if self.current != Token::Colon {
                return Err(self.unexpected());
            }
            self.advance()?;

            let value = self.parse_value()?;
            map.insert(key, value);

            // Expect comma or closing brace
            match self.current {
                Token::Comma => {
                    self.advance()?;
                    // Trailing comma is not allowed in JSON
                    if self.current == Token::RightBrace {
                        return Err(self.unexpected());
                    }
                }
                Token::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.depth -= 1;
        Ok(map)
    }

    /// Parse a JSON array whose `[` is the current token.
    fn parse_array(&mut self) -> ParseResult<Vec<Value>> {
        self.enter()?;

        // Consume opening bracket
        self.advance()?;

        let mut items = Vec::new();

        // Empty array
        if self.current == Token::RightBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(items);
        }

        loop {
            items.push(self.parse_value()?);

            // Expect comma or closing bracket
            match self.current {
                Token::Comma => {
                    self.advance()?;
                    // Trailing comma is not allowed in JSON
                    if self.current == Token::RightBracket {
                        return Err(self.unexpected());
                    }
                }
                Token::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.depth -= 1;
        Ok(items)
    }
}

/// Parse a JSON text with the default parser configuration.
pub fn parse(text: &str) -> ParseResult<Document> {
    Parser::new().parse(text)
}

/// Parse a JSON text with custom limits.
pub fn parse_with_limits(text: &str, limits: Limits) -> ParseResult<Document> {
    Parser::new().with_limits(limits).parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{NumberKind, ValueKind};

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse(" \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_parse_empty_object() {
        assert!(parse("{}").unwrap().is_empty());
        assert!(parse("  { }  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_primitives() {
        let doc = parse(r#"{"n": null, "t": true, "f": false, "s": "x", "num": 12}"#).unwrap();
        assert!(doc["n"].is_null());
        assert!(doc["t"].get_boolean().unwrap());
        assert!(!doc["f"].get_boolean().unwrap());
        assert_eq!(doc["s"].get_string().unwrap(), "x");
        assert_eq!(doc["num"].number_kind().unwrap(), NumberKind::Raw);
        assert_eq!(doc["num"].get_number_string().unwrap(), "12");
    }

    #[test]
    fn test_parse_negative_and_fractional_numbers() {
        let doc = parse(r#"{"a": -5, "b": [-1.5e2, 0.25]}"#).unwrap();
        assert_eq!(doc["a"].get_int().unwrap(), -5);
        let b = doc["b"].get_array().unwrap();
        assert_eq!(b[0].get_double().unwrap(), -150.0);
        assert_eq!(b[1].get_number_string().unwrap(), "0.25");
    }

    #[test]
    fn test_parse_nested() {
        let doc = parse(r#"{"arr": [1, {"nested": [true]}], "obj": {"k": {}}}"#).unwrap();
        let arr = doc["arr"].get_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[1].kind(), ValueKind::Object);
        let nested = arr[1].get("nested").unwrap().get_array().unwrap();
        assert_eq!(nested, &[Value::Boolean(true)]);
        assert!(doc["obj"].get("k").unwrap().get_object().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let doc = parse(r#"{"a": 1, "b": 0, "a": 2}"#).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc["a"].get_int().unwrap(), 2);
        let keys: Vec<&str> = doc.get_member().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(
            parse("[1]"),
            Err(ParseError::UnexpectedCharacter { found: '[', offset: 0 })
        );
        assert_eq!(
            parse("  42"),
            Err(ParseError::UnexpectedCharacter { found: '4', offset: 2 })
        );
    }

    #[test]
    fn test_trailing_content_rejected() {
        assert_eq!(
            parse("{} {}"),
            Err(ParseError::UnexpectedCharacter { found: '{', offset: 3 })
        );
        assert_eq!(
            parse(r#"{"a": {}}}"#),
            Err(ParseError::UnexpectedCharacter { found: '}', offset: 9 })
        );
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert!(parse(r#"{"a": [1, 2,]}"#).is_err());
        assert_eq!(
            parse(r#"{"a": 1,}"#),
            Err(ParseError::UnexpectedCharacter { found: '}', offset: 8 })
        );
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            parse(r#"{"a" 1}"#),
            Err(ParseError::UnexpectedCharacter { found: '1', offset: 5 })
        );
    }

    #[test]
    fn test_non_string_key() {
        assert_eq!(
            parse(r#"{1: 2}"#),
            Err(ParseError::UnexpectedCharacter { found: '1', offset: 1 })
        );
    }

    #[test]
    fn test_value_position_rejects_structural_tokens() {
        assert_eq!(
            parse(r#"{"a": ,}"#),
            Err(ParseError::UnexpectedCharacter { found: ',', offset: 6 })
        );
        assert_eq!(
            parse(r#"{"a": [:]}"#),
            Err(ParseError::UnexpectedCharacter { found: ':', offset: 7 })
        );
        assert_eq!(
            parse(r#"{"a": }"#),
            Err(ParseError::UnexpectedCharacter { found: '}', offset: 6 })
        );
    }

    #[test]
    fn test_empty_key_and_string() {
        let doc = parse(r#"{"": "", "k": ["", "v"]}"#).unwrap();
        assert_eq!(doc[""].get_string().unwrap(), "");
        let k = doc["k"].get_array().unwrap();
        assert_eq!(k, &[Value::from(""), Value::from("v")]);
    }

    #[test]
    fn test_missing_closing_brace() {
        assert_eq!(parse(r#"{"a": 1"#), Err(ParseError::UnexpectedEndOfInput(7)));
        assert_eq!(parse(r#"{"a": [1, 2"#), Err(ParseError::UnexpectedEndOfInput(11)));
        assert_eq!(parse("{"), Err(ParseError::UnexpectedEndOfInput(1)));
        assert_eq!(parse(r#"{"a":"#), Err(ParseError::UnexpectedEndOfInput(5)));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(parse(r#"{"a": "xyz}"#), Err(ParseError::UnterminatedString(6)));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let limits = Limits::standard().with_max_nesting_depth(3);

        // Root + 2 levels is allowed
        assert!(parse_with_limits(r#"{"a": [[1]]}"#, limits).is_ok());

        // One more exceeds the limit
        assert_eq!(
            parse_with_limits(r#"{"a": [[[1]]]}"#, limits),
            Err(ParseError::NestingTooDeep { depth: 4, limit: 3 })
        );
    }

    #[test]
    fn test_depth_resets_between_siblings() {
        let limits = Limits::standard().with_max_nesting_depth(2);
        assert!(parse_with_limits(r#"{"a": [], "b": {}, "c": [1]}"#, limits).is_ok());
    }

    #[test]
    fn test_input_size_limit() {
        let limits = Limits::standard().with_max_input_size(4);
        assert_eq!(
            parse_with_limits(r#"{"a": 1}"#, limits),
            Err(ParseError::InputTooLarge { size: 8, limit: 4 })
        );
    }

    #[test]
    fn test_parser_order_applies_to_nested_objects() {
        let parser = Parser::new().with_order(MapOrder::Sorted);
        let doc = parser.parse(r#"{"z": {"y": 1, "x": 2}, "a": 0}"#).unwrap();
        assert_eq!(doc.order(), MapOrder::Sorted);
        let root: Vec<&str> = doc.get_member().keys().collect();
        assert_eq!(root, vec!["a", "z"]);
        let inner = doc["z"].get_object().unwrap();
        assert_eq!(inner.order(), MapOrder::Sorted);
        assert_eq!(inner.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_parser_reusable() {
        let parser = Parser::new();
        assert!(parser.parse("{").is_err());
        let doc = parser.parse(r#"{"ok": true}"#).unwrap();
        assert!(doc["ok"].get_boolean().unwrap());
    }
}
