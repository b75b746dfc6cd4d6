//! Error types
//!
//! Lexical and syntactic problems share one error type, [ParseError], tagged with an [ErrorKind].
//! Reading a file can additionally fail with an I/O error, which is kept apart in [Error].
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ParseError>;

/// 1-based line and column of a character in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed grammar not covered by a more specific kind
    Syntax,
    UnexpectedToken,
    MissingValue,
    InvalidEscape,
    UnterminatedString,
    InvalidNumber,
    InvalidCharacter,
    /// A configured resource limit was exceeded
    BufferOverflow,
}

impl ErrorKind {
    /// Lexical errors come from the lexer, everything else from the grammar
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidEscape | ErrorKind::UnterminatedString | ErrorKind::InvalidCharacter
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Syntax => f.write_str("syntax error"),
            ErrorKind::UnexpectedToken => f.write_str("unexpected token"),
            ErrorKind::MissingValue => f.write_str("missing value"),
            ErrorKind::InvalidEscape => f.write_str("invalid escape"),
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::InvalidNumber => f.write_str("invalid number"),
            ErrorKind::InvalidCharacter => f.write_str("invalid character"),
            ErrorKind::BufferOverflow => f.write_str("buffer overflow"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", location_suffix(.position))]
pub struct ParseError {
    kind: ErrorKind,
    message: String,
    position: Option<Position>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    pub(crate) fn at(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self::new(kind, message, Some(position))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message without the location suffix
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn line(&self) -> Option<usize> {
        self.position.map(|position| position.line)
    }

    pub fn column(&self) -> Option<usize> {
        self.position.map(|position| position.column)
    }
}

fn location_suffix(position: &Option<Position>) -> String {
    match position {
        Some(position) => format!(" at {position}"),
        None => String::new(),
    }
}

/// Failure of one of the file based entry points
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse hcl")]
    Parse(#[from] ParseError),
}

impl Error {
    /// The parse error, unless reading the input failed
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Io { .. } => None,
        }
    }
}
