// lambdatron-reader - Read errors

//! Errors surfaced by the reader pipeline (lexer, parser, expander).

use std::fmt;

/// What went wrong while reading source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// A string escape other than `\r \n \t \" \\`, or a trailing backslash.
    InvalidEscape(Option<char>),
    /// A string literal still open at end of input.
    NonTerminatedString,
    /// A closing delimiter that does not match the open form.
    MismatchedDelimiter(String),
    /// End of input in the middle of a form.
    UnfinishedForm,
    /// A map literal with an odd number of forms.
    MapKVMismatch,
    /// An unparsable regex literal.
    InvalidRegex(String),
    /// `unquote` or `unquote-splicing` outside a `syntax-quote`.
    UnquoteMisuse,
    /// A character the lexer cannot start a token with.
    BadToken(String),
}

/// A read error with the position it was detected at. Errors raised by the
/// reader-macro expander carry no position (line 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub kind: ReadErrorKind,
    pub line: usize,
    pub column: usize,
}

impl ReadError {
    pub fn new(kind: ReadErrorKind, line: usize, column: usize) -> Self {
        ReadError { kind, line, column }
    }

    /// An error from the expansion pass, which works on trees without
    /// source positions.
    pub fn expansion(kind: ReadErrorKind) -> Self {
        ReadError {
            kind,
            line: 0,
            column: 0,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "Read error at {}:{}: ", self.line, self.column)?;
        } else {
            write!(f, "Read error: ")?;
        }
        match &self.kind {
            ReadErrorKind::InvalidEscape(Some(c)) => write!(f, "invalid escape sequence: \\{}", c),
            ReadErrorKind::InvalidEscape(None) => write!(f, "invalid escape at end of input"),
            ReadErrorKind::NonTerminatedString => write!(f, "unterminated string"),
            ReadErrorKind::MismatchedDelimiter(found) => {
                write!(f, "mismatched delimiter: {}", found)
            }
            ReadErrorKind::UnfinishedForm => write!(f, "unexpected end of input"),
            ReadErrorKind::MapKVMismatch => {
                write!(f, "map literal must contain an even number of forms")
            }
            ReadErrorKind::InvalidRegex(msg) => write!(f, "invalid regex literal: {}", msg),
            ReadErrorKind::UnquoteMisuse => {
                write!(f, "unquote is only legal inside a syntax-quote")
            }
            ReadErrorKind::BadToken(lexeme) => write!(f, "unexpected input: {}", lexeme),
        }
    }
}

impl std::error::Error for ReadError {}
