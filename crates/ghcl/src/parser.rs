//! Recursive descent parser
//!
//! ```text
//! document  := trivia* ((attribute | block) trivia*)* EOF
//! block     := IDENT [STRING | IDENT] '{' trivia* ((block | attribute) trivia*)* '}'
//! attribute := IDENT '=' value
//! value     := STRING | NUMBER | BOOL | NULL | IDENT | list | object
//! list      := '[' trivia* (value trivia* (',' trivia*)?)* ']'
//! object    := '{' trivia* ((IDENT | STRING) '=' value trivia* (',' trivia*)?)* '}'
//! trivia    := NEWLINE | COMMENT
//! ```
//!
//! An identifier starting an item is an attribute when the token after it is `=` and a block
//! header otherwise. That single token of lookahead is all the parser ever needs.
//!
//! The first error aborts the parse. There is no recovery and no partial document.
use crate::document::{Block, Document};
use crate::error::{Error, ErrorKind, ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::{Number, Value};
use std::path::Path;

/// Limits applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of blocks, lists and objects
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a configuration from a string
pub fn parse_str(input: &str) -> Result<Document> {
    parse_str_with(input, &ParseOptions::default())
}

pub fn parse_str_with(input: &str, options: &ParseOptions) -> Result<Document> {
    Parser::new(input, *options)?.parse_document()
}

/// Read a file into memory and parse it
///
/// Failing to read the file is reported as [Error::Io], everything else as [Error::Parse].
pub fn parse_file(path: impl AsRef<Path>) -> std::result::Result<Document, Error> {
    parse_file_with(path, &ParseOptions::default())
}

pub fn parse_file_with(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> std::result::Result<Document, Error> {
    let path = path.as_ref();
    tracing::info!(path=%path.display(), "loading file");

    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;

    Ok(parse_str_with(&contents, options)?)
}

impl std::str::FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s)
    }
}

/// Where an attribute or block gets attached
trait Target {
    fn set_attribute(&mut self, name: String, value: Value);
    fn add_block(&mut self, block: Block);
}

impl Target for Document {
    fn set_attribute(&mut self, name: String, value: Value) {
        Document::set_attribute(self, name, value);
    }

    fn add_block(&mut self, block: Block) {
        Document::add_block(self, block);
    }
}

impl Target for Block {
    fn set_attribute(&mut self, name: String, value: Value) {
        Block::set_attribute(self, name, value);
    }

    fn add_block(&mut self, block: Block) {
        Block::add_block(self, block);
    }
}

/// Parser state: the lexer and the token under the cursor
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Fails if the very first token cannot be lexed
    pub fn new(input: &'a str, options: ParseOptions) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
            options,
        })
    }

    pub fn parse_document(mut self) -> Result<Document> {
        tracing::debug!("parsing document");
        let mut document = Document::new();

        self.skip_trivia()?;
        while !self.check(TokenKind::Eof) {
            if !self.check_name() {
                return Err(self.error(
                    ErrorKind::Syntax,
                    format!("Expected identifier at top level, found {}", self.current.kind),
                ));
            }

            self.parse_item(&mut document)?;
            self.skip_trivia()?;
        }

        tracing::debug!(
            attributes = document.attribute_count(),
            blocks = document.blocks().len(),
            "parsed document"
        );
        Ok(document)
    }

    /// Attribute or block, starting at an identifier
    fn parse_item(&mut self, target: &mut impl Target) -> Result<()> {
        let next = self.lexer.peek_token()?.kind;
        match next {
            TokenKind::Assign => {
                let (name, value) = self.parse_attribute()?;
                target.set_attribute(name, value);
            }
            TokenKind::String | TokenKind::Identifier | TokenKind::LBrace => {
                let block = self.parse_block()?;
                target.add_block(block);
            }
            other => {
                let found = self.lexer.next_token()?;
                return Err(ParseError::at(
                    ErrorKind::UnexpectedToken,
                    format!(
                        "Expected '=' or block after '{}', found {}",
                        self.current.text, other
                    ),
                    found.position(),
                ));
            }
        }
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_attribute(&mut self) -> Result<(String, Value)> {
        let name = self.expect_name()?.text;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_value()?;

        tracing::trace!(%name, "attribute");
        Ok((name, value))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_block(&mut self) -> Result<Block> {
        let header = self.expect_name()?;

        let label = if self.check(TokenKind::String) || self.check(TokenKind::Identifier) {
            Some(self.advance()?.text)
        } else {
            None
        };

        tracing::trace!(block_type=%header.text, ?label, "block");
        let mut block = Block::new(header.text, label);

        self.expect(TokenKind::LBrace)?;
        self.enter()?;
        self.skip_trivia()?;

        while !self.check(TokenKind::RBrace) {
            match self.current.kind {
                TokenKind::Identifier | TokenKind::Null => self.parse_item(&mut block)?,
                TokenKind::Eof => {
                    return Err(self.error(
                        ErrorKind::UnexpectedToken,
                        format!(
                            "Expected '}}' to close block '{}', found end of input",
                            block.block_type()
                        ),
                    ))
                }
                other => {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        format!("Expected identifier in block body, found {other}"),
                    ))
                }
            }
            self.skip_trivia()?;
        }

        self.expect(TokenKind::RBrace)?;
        self.leave();
        Ok(block)
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.current.kind {
            TokenKind::String | TokenKind::Identifier => Ok(Value::String(self.advance()?.text)),
            TokenKind::Number => {
                let token = self.advance()?;
                parse_number(&token).map(Value::Number)
            }
            TokenKind::Bool => Ok(Value::Bool(self.advance()?.text == "true")),
            TokenKind::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            TokenKind::LBracket => self.parse_list(),
            TokenKind::LBrace => self.parse_object(),
            TokenKind::Eof
            | TokenKind::Newline
            | TokenKind::Comment
            | TokenKind::RBrace
            | TokenKind::RBracket
            | TokenKind::Comma => {
                let found = match self.current.kind {
                    TokenKind::Eof => "reached end of input".to_string(),
                    other => format!("found {other}"),
                };
                Err(self.error(
                    ErrorKind::MissingValue,
                    format!("Expected value but {found}"),
                ))
            }
            other => Err(self.error(
                ErrorKind::UnexpectedToken,
                format!("Unexpected {other} for value"),
            )),
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_list(&mut self) -> Result<Value> {
        self.expect(TokenKind::LBracket)?;
        self.enter()?;
        self.skip_trivia()?;

        let mut items = Vec::new();
        while !self.check(TokenKind::RBracket) {
            if self.check(TokenKind::Eof) {
                return Err(self.error(
                    ErrorKind::UnexpectedToken,
                    "Expected ']' to close list, found end of input",
                ));
            }

            items.push(self.parse_value()?);
            self.skip_separator()?;
        }

        self.expect(TokenKind::RBracket)?;
        self.leave();
        Ok(Value::List(items))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn parse_object(&mut self) -> Result<Value> {
        self.expect(TokenKind::LBrace)?;
        self.enter()?;
        self.skip_trivia()?;

        let mut object = Value::object();
        while !self.check(TokenKind::RBrace) {
            if self.check(TokenKind::Eof) {
                return Err(self.error(
                    ErrorKind::UnexpectedToken,
                    "Expected '}' to close object, found end of input",
                ));
            }

            if !self.check_name() && !self.check(TokenKind::String) {
                return Err(self.error(
                    ErrorKind::Syntax,
                    format!(
                        "Expected identifier or string for object key, found {}",
                        self.current.kind
                    ),
                ));
            }

            let key = self.advance()?.text;
            self.expect(TokenKind::Assign)?;
            let value = self.parse_value()?;
            if let Value::Object(members) = &mut object {
                members.insert(key, value);
            }

            self.skip_separator()?;
        }

        self.expect(TokenKind::RBrace)?;
        self.leave();
        Ok(object)
    }

    /// Trivia, then an optional comma followed by more trivia
    fn skip_separator(&mut self) -> Result<()> {
        self.skip_trivia()?;
        if self.check(TokenKind::Comma) {
            self.advance()?;
            self.skip_trivia()?;
        }
        Ok(())
    }

    fn skip_trivia(&mut self) -> Result<()> {
        while self.current.kind.is_trivia() {
            self.advance()?;
        }
        Ok(())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Move to the next token, returning the one that was current
    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if !self.check(kind) {
            return Err(self.error(
                ErrorKind::UnexpectedToken,
                format!("Expected {kind} but found {}", self.current.kind),
            ));
        }
        self.advance()
    }

    /// Attribute names, block types and object keys: `null` is spelled like an identifier
    fn check_name(&self) -> bool {
        self.check(TokenKind::Identifier) || self.check(TokenKind::Null)
    }

    fn expect_name(&mut self) -> Result<Token> {
        if !self.check_name() {
            return self.expect(TokenKind::Identifier);
        }
        self.advance()
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error(
                ErrorKind::BufferOverflow,
                format!(
                    "Nesting exceeds the maximum depth of {}",
                    self.options.max_depth
                ),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::at(kind, message, self.current.position())
    }
}

/// Integer unless the text contains `.`, `e` or `E`; `0x`, `0o` and `0b` prefixes select a radix
fn parse_number(token: &Token) -> Result<Number> {
    let text = token.text.as_str();
    let invalid = || {
        ParseError::at(
            ErrorKind::InvalidNumber,
            format!("Invalid number '{text}'"),
            token.position(),
        )
    };

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let radix = match unsigned.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        let digits = &unsigned[2..];
        // the sign is applied before conversion so that i64::MIN stays representable
        let signed = if negative {
            format!("-{digits}")
        } else {
            digits.to_string()
        };
        if digits.starts_with(['+', '-']) {
            return Err(invalid());
        }
        return i64::from_str_radix(&signed, radix)
            .map(Number::Integer)
            .map_err(|_| invalid());
    }

    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| invalid())
    } else {
        text.parse::<i64>()
            .map(Number::Integer)
            .map_err(|_| invalid())
    }
}
