// lambdatron-core - Error types and evaluation results

//! Error types and the evaluation result shape.
//!
//! Every evaluator entry point returns an [`EvalResult`]: a failure
//! (`EvalError`), a value, or the `recur` sentinel. The sentinel is a
//! distinct arm of [`Flow`], not an error — the trampolines in function
//! application and `loop` consume it, and any other observer converts it to
//! [`EvalError::RecurMisuse`] via [`Flow::into_value`].

use std::fmt;

use lambdatron_reader::{Symbol, Value};

/// Result type for Lambdatron evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;

/// The outcome of evaluating a form: a value, or the `recur` sentinel
/// carrying the re-binding parameters.
#[derive(Debug, Clone)]
pub enum Flow {
    Value(Value),
    Recur(Vec<Value>),
}

impl Flow {
    /// Extract the value, converting a stray `Recur` into `RecurMisuse`.
    /// Call this at every non-tail position.
    pub fn into_value(self) -> Result<Value> {
        match self {
            Flow::Value(v) => Ok(v),
            Flow::Recur(_) => Err(EvalError::RecurMisuse),
        }
    }
}

/// Full evaluator result: `Ok(Flow::Value)`, `Ok(Flow::Recur)`, or `Err`.
pub type EvalResult = Result<Flow>;

/// Convenience constructor for the common success case.
#[inline]
pub fn ok(value: Value) -> EvalResult {
    Ok(Flow::Value(value))
}

/// Specification for an expected arity.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

/// Errors that can occur during evaluation.
#[derive(Debug, Clone)]
pub enum EvalError {
    /// Wrong number of arguments to a function or form
    Arity {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// A function or form was given an argument it cannot accept
    InvalidArgument { name: String, message: String },
    /// Unresolvable symbol reference
    InvalidSymbol(Symbol),
    /// A qualified symbol used where it must match the current namespace
    QualifiedSymbolMisuse(Symbol),
    /// A malformed binding vector (odd length, non-symbol binding name)
    BindingMismatch { form: &'static str, message: String },
    /// The head of an evaluated seq is not callable
    NotEvalable(String),
    /// `recur` observed outside the tail of a `fn` or `loop`
    RecurMisuse,
    /// Index out of bounds for an indexed collection
    OutOfBounds { index: i64, length: usize },
    /// Arithmetic failure other than division by zero (e.g. overflow)
    ArithmeticError(&'static str),
    /// Integer division by zero
    DivideByZero,
    /// Dereference of an unbound Var
    UnboundVar(String),
    /// An unparsable regex pattern given at runtime
    InvalidRegex(String),
    /// General runtime error
    RuntimeError(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Arity {
                expected,
                got,
                name,
            } => match name {
                Some(name) => write!(
                    f,
                    "Wrong number of arguments to '{}': expected {}, got {}",
                    name, expected, got
                ),
                None => write!(
                    f,
                    "Wrong number of arguments: expected {}, got {}",
                    expected, got
                ),
            },
            EvalError::InvalidArgument { name, message } => {
                write!(f, "Invalid argument to '{}': {}", name, message)
            }
            EvalError::InvalidSymbol(sym) => {
                write!(f, "Unable to resolve symbol: {}", sym)
            }
            EvalError::QualifiedSymbolMisuse(sym) => {
                write!(
                    f,
                    "Cannot define qualified symbol {} outside its namespace",
                    sym
                )
            }
            EvalError::BindingMismatch { form, message } => {
                write!(f, "Invalid '{}' bindings: {}", form, message)
            }
            EvalError::NotEvalable(what) => {
                write!(f, "Cannot evaluate a call to: {}", what)
            }
            EvalError::RecurMisuse => {
                write!(f, "recur can only appear in the tail of a fn or loop")
            }
            EvalError::OutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for collection of length {}",
                    index, length
                )
            }
            EvalError::ArithmeticError(op) => write!(f, "Arithmetic error in '{}'", op),
            EvalError::DivideByZero => write!(f, "Division by zero"),
            EvalError::UnboundVar(name) => write!(f, "Var {} is unbound", name),
            EvalError::InvalidRegex(msg) => write!(f, "Invalid regex: {}", msg),
            EvalError::RuntimeError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

impl EvalError {
    /// Arity error for an exact count.
    pub fn arity(expected: usize, got: usize) -> Self {
        EvalError::Arity {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Arity error for an exact count, naming the callee.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        EvalError::Arity {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Arity error for a minimum count, naming the callee.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        EvalError::Arity {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Arity error for a range, naming the callee.
    pub fn arity_range(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        EvalError::Arity {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Invalid-argument error naming the callee.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Binding error for `let`/`loop`/`fn` binding shapes.
    pub fn bindings(form: &'static str, message: impl Into<String>) -> Self {
        EvalError::BindingMismatch {
            form,
            message: message.into(),
        }
    }

    /// General runtime error.
    pub fn runtime(message: impl Into<String>) -> Self {
        EvalError::RuntimeError(message.into())
    }
}
