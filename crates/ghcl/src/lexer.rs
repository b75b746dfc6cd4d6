//! Tokenizer
//!
//! [Lexer] turns source text into position-tagged [Token]s, one at a time. The parser pulls
//! tokens with [Lexer::next_token] and looks one token ahead with [Lexer::peek_token].
//!
//! Newlines are significant and produced as [TokenKind::Newline]. Spaces, tabs and carriage
//! returns separate tokens and are otherwise dropped. Comments (`# ...` and `// ...`) are produced
//! as [TokenKind::Comment] tokens so the grammar decides where they may appear.
//!
//! Number tokens are scanned greedily and carry their raw text; deciding whether the text is a
//! valid integer or float is left to the parser.
use crate::error::{ErrorKind, ParseError, Position, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Identifier,
    String,
    Number,
    Bool,
    Null,
    Assign,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Dot,
    Newline,
    Comment,
}

impl TokenKind {
    /// Newlines and comments, skipped wherever the grammar repeats
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Comment)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::String => f.write_str("string"),
            TokenKind::Number => f.write_str("number"),
            TokenKind::Bool => f.write_str("bool"),
            TokenKind::Null => f.write_str("null"),
            TokenKind::Assign => f.write_str("'='"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Dot => f.write_str("'.'"),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Comment => f.write_str("comment"),
        }
    }
}

/// A classified piece of source text
///
/// `text` is the token's value: the unescaped content for strings, the text after the marker for
/// comments and the raw source slice for everything else. `line`/`column` point at the first
/// character of the token (the opening quote for strings).
#[derive(derive_new::new, Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Streaming tokenizer over a borrowed source string
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    /// byte offset into `input`
    cursor: usize,
    line: usize,
    column: usize,
    peeked: Option<Token>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            line: 1,
            column: 1,
            peeked: None,
            finished: false,
        }
    }

    /// Position of the next unread character
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Collect all tokens up to and including [TokenKind::Eof]
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let eof = token.is(TokenKind::Eof);
            tokens.push(token);
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Look at the next token without consuming it
    pub fn peek_token(&mut self) -> Result<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Consume the next token
    ///
    /// Keeps producing [TokenKind::Eof] once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan_token(),
        }
    }

    fn current(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.cursor..].chars().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.cursor += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(' ' | '\t' | '\r')) {
            self.advance();
        }
    }

    fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let (line, column) = (self.line, self.column);
        let Some(c) = self.current() else {
            return Ok(Token::new(TokenKind::Eof, String::new(), line, column));
        };

        let single = match c {
            '\n' => Some(TokenKind::Newline),
            '=' => Some(TokenKind::Assign),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ',' => Some(TokenKind::Comma),
            '.' => Some(TokenKind::Dot),
            _ => None,
        };

        let token = if let Some(kind) = single {
            self.advance();
            Token::new(kind, c.to_string(), line, column)
        } else {
            match c {
                '"' | '\'' => self.read_string()?,
                '#' => self.read_comment(),
                '/' if self.peek_char(1) == Some('/') => self.read_comment(),
                c if c.is_ascii_digit() => self.read_number(),
                '-' if self.peek_char(1).is_some_and(|next| next.is_ascii_digit()) => {
                    self.read_number()
                }
                c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
                c => {
                    return Err(ParseError::at(
                        ErrorKind::InvalidCharacter,
                        format!("Unexpected character '{}'", c.escape_debug()),
                        Position::new(line, column),
                    ))
                }
            }
        };

        tracing::trace!(kind=%token.kind, text=?token.text, line, column, "token");
        Ok(token)
    }

    fn read_string(&mut self) -> Result<Token> {
        let start = Position::new(self.line, self.column);
        let unterminated = || {
            ParseError::at(
                ErrorKind::UnterminatedString,
                "Unterminated string",
                start,
            )
        };

        let Some(quote) = self.advance() else {
            return Err(unterminated());
        };

        let mut value = String::new();
        loop {
            let Some(c) = self.advance() else {
                return Err(unterminated());
            };

            if c == quote {
                return Ok(Token::new(TokenKind::String, value, start.line, start.column));
            }

            if c != '\\' {
                value.push(c);
                continue;
            }

            let Some(escaped) = self.advance() else {
                return Err(unterminated());
            };

            let unescaped = match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '\\' => '\\',
                '"' => '"',
                '\'' => '\'',
                other => {
                    return Err(ParseError::at(
                        ErrorKind::InvalidEscape,
                        format!("Invalid escape sequence '\\{}'", other.escape_debug()),
                        start,
                    ))
                }
            };
            value.push(unescaped);
        }
    }

    fn read_comment(&mut self) -> Token {
        let (line, column) = (self.line, self.column);

        if self.current() == Some('#') {
            self.advance();
        } else {
            self.advance();
            self.advance();
        }

        let start = self.cursor;
        while !matches!(self.current(), None | Some('\n')) {
            self.advance();
        }

        Token::new(
            TokenKind::Comment,
            self.input[start..self.cursor].to_string(),
            line,
            column,
        )
    }

    fn read_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let start = self.cursor;

        if self.current() == Some('-') {
            self.advance();
        }

        if self.current() == Some('0')
            && matches!(
                self.peek_char(1),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            )
        {
            // radix literal: prefix followed by its digits, validated by the parser
            self.advance();
            self.advance();
            while self.current().is_some_and(|c| c.is_ascii_alphanumeric()) {
                self.advance();
            }
        } else {
            while self
                .current()
                .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
            {
                self.advance();
            }
        }

        Token::new(
            TokenKind::Number,
            self.input[start..self.cursor].to_string(),
            line,
            column,
        )
    }

    fn read_identifier(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let start = self.cursor;

        while self
            .current()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            self.advance();
        }

        let text = &self.input[start..self.cursor];
        let kind = match text {
            "true" | "false" => TokenKind::Bool,
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier,
        };

        Token::new(kind, text.to_string(), line, column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    /// Yields every token including the final [TokenKind::Eof], then stops
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if !matches!(&token, Ok(token) if !token.is(TokenKind::Eof)) {
            self.finished = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .expect("must tokenize")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Lexer::new(input)
            .tokenize()
            .expect("must tokenize")
            .into_iter()
            .map(|token| token.text)
            .collect()
    }

    fn lex_error(input: &str) -> ParseError {
        Lexer::new(input).tokenize().expect_err("must fail")
    }

    #[test]
    fn punctuation() {
        use TokenKind::*;
        assert_eq!(
            kinds("= { } [ ] ( ) , .\n"),
            vec![Assign, LBrace, RBrace, LBracket, RBracket, LParen, RParen, Comma, Dot, Newline, Eof]
        );
    }

    #[test]
    fn attribute_line() {
        use TokenKind::*;
        assert_eq!(
            kinds("name = \"test\"\n"),
            vec![Identifier, Assign, String, Newline, Eof]
        );
        assert_eq!(texts("name = \"test\"\n"), vec!["name", "=", "test", "\n", ""]);
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = Lexer::new("a = 1\n  b = 'x'").tokenize().unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 3), (1, 5), (1, 6), (2, 3), (2, 5), (2, 7), (2, 10)]
        );
    }

    #[test]
    fn keywords() {
        use TokenKind::*;
        assert_eq!(
            kinds("true false null truthy nullable"),
            vec![Bool, Bool, Null, Identifier, Identifier, Eof]
        );
    }

    #[test]
    fn identifiers_allow_dashes_and_underscores() {
        assert_eq!(texts("_private main-container x_1"), vec!["_private", "main-container", "x_1", ""]);
    }

    #[test]
    fn numbers_keep_raw_text() {
        use TokenKind::*;
        assert_eq!(kinds("42 -7 3.14 1e10 2.5E-3"), vec![Number, Number, Number, Number, Number, Eof]);
        assert_eq!(texts("42 -7 3.14 1e10 2.5E-3"), vec!["42", "-7", "3.14", "1e10", "2.5E-3", ""]);
        // no validation in the lexer
        assert_eq!(texts("1-2+3"), vec!["1-2+3", ""]);
    }

    #[test]
    fn radix_numbers() {
        assert_eq!(texts("0xFF 0b1010 0o17 -0x1f"), vec!["0xFF", "0b1010", "0o17", "-0x1f", ""]);
        assert!(kinds("0xFF").starts_with(&[TokenKind::Number]));
    }

    #[test]
    fn minus_without_digit_is_rejected() {
        let err = lex_error("- 1");
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        assert_eq!(err.position(), Some(Position::new(1, 1)));
    }

    #[test]
    fn string_escapes() {
        let tokens = Lexer::new(r#""a\n\t\r\\\"\'b" 'it\'s'"#).tokenize().unwrap();
        assert_eq!(tokens[0].text, "a\n\t\r\\\"'b");
        assert_eq!(tokens[1].text, "it's");
    }

    #[test]
    fn quotes_close_with_their_own_kind() {
        let tokens = Lexer::new(r#"'say "hi"' "it's""#).tokenize().unwrap();
        assert_eq!(tokens[0].text, "say \"hi\"");
        assert_eq!(tokens[1].text, "it's");
    }

    #[test]
    fn strings_may_contain_unicode_and_newlines() {
        let tokens = Lexer::new("\"grüße\nwelt\" x").tokenize().unwrap();
        assert_eq!(tokens[0].text, "grüße\nwelt");
        assert_eq!((tokens[1].line, tokens[1].column), (2, 7));
    }

    #[test]
    fn unterminated_string_reports_start() {
        let err = lex_error("name = \"abc");
        assert_eq!(err.kind(), ErrorKind::UnterminatedString);
        assert_eq!(err.position(), Some(Position::new(1, 8)));

        let err = lex_error("x = 'abc\\");
        assert_eq!(err.kind(), ErrorKind::UnterminatedString);
        assert_eq!(err.position(), Some(Position::new(1, 5)));
    }

    #[test]
    fn invalid_escape_reports_start() {
        let err = lex_error("\n  x = \"ab\\qc\"");
        assert_eq!(err.kind(), ErrorKind::InvalidEscape);
        assert_eq!(err.position(), Some(Position::new(2, 7)));
        assert_eq!(err.message(), "Invalid escape sequence '\\q'");
    }

    #[test]
    fn comments() {
        let tokens = Lexer::new("# hash\nx = 1 // slashes\n").tokenize().unwrap();
        let comments: Vec<_> = tokens
            .iter()
            .filter(|t| t.is(TokenKind::Comment))
            .map(|t| (t.text.as_str(), t.line, t.column))
            .collect();
        assert_eq!(comments, vec![(" hash", 1, 1), (" slashes", 2, 7)]);
    }

    #[test]
    fn single_slash_is_rejected() {
        let err = lex_error("a / b");
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        assert_eq!(err.to_string(), "Unexpected character '/' at line 1, column 3");
    }

    #[test]
    fn unexpected_character() {
        let err = lex_error("a = 1\nb = @");
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        assert_eq!(err.position(), Some(Position::new(2, 5)));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("block {");
        assert_eq!(lexer.next_token().unwrap().text, "block");
        assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::LBrace);
        assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::LBrace);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::LBrace);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn empty_input() {
        let tokens = Lexer::new("").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Eof, String::new(), 1, 1)]);
    }

    #[test]
    fn iterator_stops_after_eof() {
        let tokens: Vec<_> = Lexer::new("a b").collect();
        assert_eq!(tokens.len(), 3);

        let mut failing = Lexer::new("a @ b");
        assert!(failing.next().unwrap().is_ok());
        assert!(failing.next().unwrap().is_err());
        assert!(failing.next().is_none());
    }
}
