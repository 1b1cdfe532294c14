// lambdatron-reader - Parser for Lambdatron

//! Recursive descent parser for Lambdatron source code.
//!
//! Converts tokens into an unexpanded [`Value`] tree. Reader macros come out
//! as two-element marker lists (`(quote x)`, `(syntax-quote x)`,
//! `(unquote x)`, `(unquote-splicing x)`, `(deref x)`); the expansion pass
//! lowers everything except `quote`.

use std::rc::Rc;

use regex::Regex;

use crate::error::{ReadError, ReadErrorKind};
use crate::intern::InternStore;
use crate::keyword::Keyword;
use crate::lexer::{Lexer, Token};
use crate::symbol::Symbol;
use crate::value::{SpecialTag, Value};

/// The parser converts tokens into `Value` trees.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    interns: InternStore,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code, interning identifiers
    /// into the given store.
    pub fn new(source: &'a str, interns: InternStore) -> Result<Self, ReadError> {
        let mut lexer = Lexer::new(source);
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            interns,
            current,
            line,
            column,
        })
    }

    /// Parse a single form. Returns `None` at end of input.
    pub fn parse(&mut self) -> Result<Option<Value>, ReadError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        Ok(Some(self.parse_form()?))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<Value>, ReadError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ReadError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, kind: ReadErrorKind) -> ReadError {
        ReadError::new(kind, self.line, self.column)
    }

    fn parse_form(&mut self) -> Result<Value, ReadError> {
        match &self.current {
            Token::Nil => {
                self.advance()?;
                Ok(Value::Nil)
            }
            Token::True => {
                self.advance()?;
                Ok(Value::bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Value::bool(false))
            }
            Token::Int(n) => {
                let n = *n;
                self.advance()?;
                Ok(Value::int(n))
            }
            Token::Float(n) => {
                let n = *n;
                self.advance()?;
                Ok(Value::float(n))
            }
            Token::Char(c) => {
                let c = *c;
                self.advance()?;
                Ok(Value::char(c))
            }
            Token::Str(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Value::string(s))
            }
            Token::Ident(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Value::symbol(Symbol::parse(&self.interns, &s)))
            }
            Token::Keyword(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Value::keyword(Keyword::parse(&self.interns, &s)))
            }
            Token::Special(tag) => {
                let tag = *tag;
                self.advance()?;
                Ok(Value::Special(tag))
            }

            Token::LParen => self.parse_list(),
            Token::LBracket => self.parse_vector(),
            Token::LBrace => self.parse_map(),

            Token::Quote => {
                self.advance()?;
                let form = self.parse_form()?;
                Ok(Value::list(vec![Value::Special(SpecialTag::Quote), form]))
            }
            Token::SyntaxQuote => self.parse_marker("syntax-quote"),
            Token::Unquote => self.parse_marker("unquote"),
            Token::UnquoteSplice => self.parse_marker("unquote-splicing"),
            Token::Deref => self.parse_marker("deref"),
            Token::AnonFn => self.parse_anon_fn(),
            Token::Regex(_) => self.parse_regex(),

            Token::RParen => Err(self.error(ReadErrorKind::MismatchedDelimiter(")".to_string()))),
            Token::RBracket => {
                Err(self.error(ReadErrorKind::MismatchedDelimiter("]".to_string())))
            }
            Token::RBrace => Err(self.error(ReadErrorKind::MismatchedDelimiter("}".to_string()))),
            Token::Eof => Err(self.error(ReadErrorKind::UnfinishedForm)),
        }
    }

    fn parse_list(&mut self) -> Result<Value, ReadError> {
        self.advance()?; // consume (
        let mut elements = Vec::new();

        loop {
            match &self.current {
                Token::RParen => {
                    self.advance()?;
                    return Ok(Value::list(elements));
                }
                Token::RBracket => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter("]".to_string())));
                }
                Token::RBrace => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter("}".to_string())));
                }
                Token::Eof => return Err(self.error(ReadErrorKind::UnfinishedForm)),
                _ => elements.push(self.parse_form()?),
            }
        }
    }

    fn parse_vector(&mut self) -> Result<Value, ReadError> {
        self.advance()?; // consume [
        let mut elements = Vec::new();

        loop {
            match &self.current {
                Token::RBracket => {
                    self.advance()?;
                    return Ok(Value::vector(elements));
                }
                Token::RParen => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter(")".to_string())));
                }
                Token::RBrace => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter("}".to_string())));
                }
                Token::Eof => return Err(self.error(ReadErrorKind::UnfinishedForm)),
                _ => elements.push(self.parse_form()?),
            }
        }
    }

    fn parse_map(&mut self) -> Result<Value, ReadError> {
        self.advance()?; // consume {
        let mut pairs = Vec::new();

        loop {
            match &self.current {
                Token::RBrace => {
                    self.advance()?;
                    return Ok(Value::map(pairs));
                }
                Token::RParen => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter(")".to_string())));
                }
                Token::RBracket => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter("]".to_string())));
                }
                Token::Eof => return Err(self.error(ReadErrorKind::UnfinishedForm)),
                _ => {
                    let key = self.parse_form()?;
                    if matches!(self.current, Token::RBrace) {
                        return Err(self.error(ReadErrorKind::MapKVMismatch));
                    }
                    if matches!(self.current, Token::Eof) {
                        return Err(self.error(ReadErrorKind::UnfinishedForm));
                    }
                    let value = self.parse_form()?;
                    pairs.push((key, value));
                }
            }
        }
    }

    /// Wrap the next form in a two-element marker list, e.g. `~x` becomes
    /// `(unquote x)`.
    fn parse_marker(&mut self, name: &str) -> Result<Value, ReadError> {
        self.advance()?; // consume the marker token
        let form = self.parse_form()?;
        Ok(Value::list(vec![
            Value::symbol(Symbol::new(&self.interns, name)),
            form,
        ]))
    }

    fn parse_regex(&mut self) -> Result<Value, ReadError> {
        let pattern = match self.advance()? {
            Token::Regex(pat) => pat,
            _ => unreachable!("parse_regex called on a non-regex token"),
        };
        match Regex::new(&pattern) {
            Ok(re) => Ok(Value::Regex(Rc::new(re))),
            Err(e) => Err(self.error(ReadErrorKind::InvalidRegex(e.to_string()))),
        }
    }

    /// `#(…)` — anonymous function. Collects the body, finds the highest
    /// `%`-numbered argument, and rewrites to `(fn [p1 …] (body…))`.
    fn parse_anon_fn(&mut self) -> Result<Value, ReadError> {
        self.advance()?; // consume #(

        let mut body = Vec::new();
        loop {
            match &self.current {
                Token::RParen => {
                    self.advance()?;
                    break;
                }
                Token::RBracket => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter("]".to_string())));
                }
                Token::RBrace => {
                    return Err(self.error(ReadErrorKind::MismatchedDelimiter("}".to_string())));
                }
                Token::Eof => return Err(self.error(ReadErrorKind::UnfinishedForm)),
                _ => body.push(self.parse_form()?),
            }
        }

        let (max_arg, has_rest) = find_fn_args(&body);

        let mut params = Vec::new();
        for i in 1..=max_arg {
            params.push(Value::symbol(Symbol::new(
                &self.interns,
                &format!("p{}#", i),
            )));
        }
        if has_rest {
            params.push(Value::symbol(Symbol::new(&self.interns, "&")));
            params.push(Value::symbol(Symbol::new(&self.interns, "rest#")));
        }

        let interns = self.interns.clone();
        let transformed: Vec<Value> = body
            .into_iter()
            .map(|f| transform_fn_args(f, &interns))
            .collect();

        Ok(Value::list(vec![
            Value::Special(SpecialTag::Fn),
            Value::vector(params),
            Value::list(transformed),
        ]))
    }
}

fn find_fn_args(forms: &[Value]) -> (usize, bool) {
    let mut max_arg = 0usize;
    let mut has_rest = false;
    for form in forms {
        find_fn_args_in_form(form, &mut max_arg, &mut has_rest);
    }
    (max_arg, has_rest)
}

fn find_fn_args_in_form(form: &Value, max_arg: &mut usize, has_rest: &mut bool) {
    match form {
        Value::Symbol(sym) if !sym.is_qualified() => {
            let name = sym.name();
            if name == "%" {
                *max_arg = (*max_arg).max(1);
            } else if name == "%&" {
                *has_rest = true;
            } else if let Some(rest) = name.strip_prefix('%')
                && let Ok(n) = rest.parse::<usize>()
            {
                *max_arg = (*max_arg).max(n);
            }
        }
        Value::Seq(seq) => {
            if let Some(items) = seq.realized_elements() {
                for item in &items {
                    find_fn_args_in_form(item, max_arg, has_rest);
                }
            }
        }
        Value::Vector(items) => {
            for item in items.iter() {
                find_fn_args_in_form(item, max_arg, has_rest);
            }
        }
        Value::Map(map) => {
            for (k, v) in map.iter() {
                find_fn_args_in_form(k, max_arg, has_rest);
                find_fn_args_in_form(v, max_arg, has_rest);
            }
        }
        _ => {}
    }
}

fn transform_fn_args(form: Value, interns: &InternStore) -> Value {
    match form {
        Value::Symbol(sym) if !sym.is_qualified() => {
            let name = sym.name();
            if name == "%" {
                Value::symbol(Symbol::new(interns, "p1#"))
            } else if name == "%&" {
                Value::symbol(Symbol::new(interns, "rest#"))
            } else if let Some(rest) = name.strip_prefix('%') {
                if rest.parse::<usize>().is_ok() {
                    Value::symbol(Symbol::new(interns, &format!("p{}#", rest)))
                } else {
                    Value::Symbol(sym)
                }
            } else {
                Value::Symbol(sym)
            }
        }
        Value::Seq(seq) => match seq.realized_elements() {
            Some(items) => Value::list(
                items
                    .into_iter()
                    .map(|f| transform_fn_args(f, interns))
                    .collect(),
            ),
            None => Value::Seq(seq),
        },
        Value::Vector(items) => Value::Vector(
            items
                .iter()
                .cloned()
                .map(|f| transform_fn_args(f, interns))
                .collect(),
        ),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(k, v)| {
                    (
                        transform_fn_args(k.clone(), interns),
                        transform_fn_args(v.clone(), interns),
                    )
                })
                .collect(),
        ),
        other => other,
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Parse a string and return the first form.
pub fn read(source: &str, interns: &InternStore) -> Result<Option<Value>, ReadError> {
    Parser::new(source, interns.clone())?.parse()
}

/// Parse a string and return all forms.
pub fn read_all(source: &str, interns: &InternStore) -> Result<Vec<Value>, ReadError> {
    Parser::new(source, interns.clone())?.parse_all()
}

// ============================================================================
// Tests
// ============================================================================
