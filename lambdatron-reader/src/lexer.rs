// lambdatron-reader - Lexer for Lambdatron

//! Lexer (tokeniser) for Lambdatron source code.
//!
//! Converts a source string into a flat token stream. Scanning runs a small
//! state machine (normal / in-string / in-comment); lexemes that are not
//! self-delimiting are classified afterwards: special-form names, keywords,
//! `nil`/`true`/`false`, numbers, then plain identifiers.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{ReadError, ReadErrorKind};
use crate::value::SpecialTag;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Reader macros
    Quote,         // '
    SyntaxQuote,   // `
    Unquote,       // ~
    UnquoteSplice, // ~@
    Deref,         // @
    AnonFn,        // #(
    Regex(String), // #" followed by pattern content

    // Literals
    Nil,
    True,
    False,
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Keyword(String),
    Ident(String),
    Special(SpecialTag),

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quote => write!(f, "'"),
            Token::SyntaxQuote => write!(f, "`"),
            Token::Unquote => write!(f, "~"),
            Token::UnquoteSplice => write!(f, "~@"),
            Token::Deref => write!(f, "@"),
            Token::AnonFn => write!(f, "#("),
            Token::Regex(pat) => write!(f, "#\"{}\"", pat),
            Token::Nil => write!(f, "nil"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{}", n),
            Token::Char(c) => write!(f, "\\{}", c),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Keyword(s) => write!(f, ":{}", s),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Special(tag) => write!(f, "{}", tag),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, ReadError> {
        self.skip_whitespace_and_comments();

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            '[' => {
                self.advance();
                Ok(Token::LBracket)
            }
            ']' => {
                self.advance();
                Ok(Token::RBracket)
            }
            '{' => {
                self.advance();
                Ok(Token::LBrace)
            }
            '}' => {
                self.advance();
                Ok(Token::RBrace)
            }

            '\'' => {
                self.advance();
                Ok(Token::Quote)
            }
            '`' => {
                self.advance();
                Ok(Token::SyntaxQuote)
            }
            '~' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::UnquoteSplice)
                } else {
                    Ok(Token::Unquote)
                }
            }
            '@' => {
                self.advance();
                Ok(Token::Deref)
            }

            '#' => self.read_dispatch(),
            '"' => self.read_string(),
            '\\' => self.read_char(),

            _ if is_lexeme_start(c) => self.read_lexeme(),

            _ => Err(self.error(ReadErrorKind::BadToken(c.to_string()))),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ReadError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn error(&self, kind: ReadErrorKind) -> ReadError {
        ReadError::new(kind, self.line, self.column)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_dispatch(&mut self) -> Result<Token, ReadError> {
        self.advance(); // consume #

        match self.peek() {
            Some('(') => {
                self.advance();
                Ok(Token::AnonFn)
            }
            Some('"') => {
                self.advance(); // consume "
                let pattern = self.read_regex_content()?;
                Ok(Token::Regex(pattern))
            }
            Some(c) => Err(self.error(ReadErrorKind::BadToken(format!("#{}", c)))),
            None => Err(self.error(ReadErrorKind::BadToken("#".to_string()))),
        }
    }

    fn read_string(&mut self) -> Result<Token, ReadError> {
        self.advance(); // consume opening "
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('\\') => s.push('\\'),
                    Some('"') => s.push('"'),
                    Some(c) => return Err(self.error(ReadErrorKind::InvalidEscape(Some(c)))),
                    None => return Err(self.error(ReadErrorKind::InvalidEscape(None))),
                },
                Some(c) => s.push(c),
                None => return Err(self.error(ReadErrorKind::NonTerminatedString)),
            }
        }

        Ok(Token::Str(s))
    }

    /// Read regex pattern content. Backslashes pass through untouched for the
    /// regex engine; only `\"` is processed so patterns can contain quotes.
    fn read_regex_content(&mut self) -> Result<String, ReadError> {
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.peek() {
                    Some('"') => {
                        self.advance();
                        s.push('"');
                    }
                    _ => s.push('\\'),
                },
                Some(c) => s.push(c),
                None => return Err(self.error(ReadErrorKind::NonTerminatedString)),
            }
        }

        Ok(s)
    }

    fn read_char(&mut self) -> Result<Token, ReadError> {
        self.advance(); // consume backslash

        let first = self
            .advance()
            .ok_or_else(|| self.error(ReadErrorKind::InvalidEscape(None)))?;

        if first.is_ascii_alphabetic() {
            let mut name = String::new();
            name.push(first);
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() {
                    name.push(c);
                    self.advance();
                } else {
                    break;
                }
            }

            match name.as_str() {
                "newline" => Ok(Token::Char('\n')),
                "space" => Ok(Token::Char(' ')),
                "tab" => Ok(Token::Char('\t')),
                "return" => Ok(Token::Char('\r')),
                s if s.chars().count() == 1 => Ok(Token::Char(first)),
                _ => Err(self.error(ReadErrorKind::BadToken(format!("\\{}", name)))),
            }
        } else {
            // Covers \\, \", and any other single non-alphabetic character.
            Ok(Token::Char(first))
        }
    }

    /// Read a raw lexeme and classify it: special form, keyword, nil/bool,
    /// number, or identifier.
    fn read_lexeme(&mut self) -> Result<Token, ReadError> {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if is_lexeme_char(c) {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(tag) = SpecialTag::from_name(&lexeme) {
            return Ok(Token::Special(tag));
        }

        if let Some(rest) = lexeme.strip_prefix(':') {
            if rest.is_empty() {
                return Err(self.error(ReadErrorKind::BadToken(lexeme)));
            }
            return Ok(Token::Keyword(rest.to_string()));
        }

        match lexeme.as_str() {
            "nil" => return Ok(Token::Nil),
            "true" => return Ok(Token::True),
            "false" => return Ok(Token::False),
            _ => {}
        }

        if looks_numeric(&lexeme) {
            return self.parse_number(&lexeme);
        }

        Ok(Token::Ident(lexeme))
    }

    /// Parse a numeric lexeme: prefer a signed integer; on overflow, a
    /// decimal point, or an exponent, fall back to double.
    fn parse_number(&self, s: &str) -> Result<Token, ReadError> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Token::Int(n));
        }
        match s.parse::<f64>() {
            Ok(n) => Ok(Token::Float(n)),
            Err(_) => Err(self.error(ReadErrorKind::BadToken(s.to_string()))),
        }
    }
}

/// Whether a lexeme with this leading character should be collected and
/// classified (identifier, keyword, or number).
fn is_lexeme_start(c: char) -> bool {
    c == ':' || c.is_ascii_digit() || is_ident_char(c)
}

fn is_lexeme_char(c: char) -> bool {
    c == ':' || c.is_ascii_digit() || is_ident_char(c)
}

/// The identifier character set: alphanumerics plus `- _ * + ! ? / . $ = < > &`,
/// and `%` for anonymous-function parameters.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '-' | '_' | '*' | '+' | '!' | '?' | '/' | '.' | '$' | '=' | '<' | '>' | '&' | '%'
        )
}

/// Whether a lexeme should go through number parsing at all. Guards against
/// `f64::from_str` accepting words like `inf` and `NaN`.
fn looks_numeric(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+') | Some('-') => matches!(chars.next(), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
