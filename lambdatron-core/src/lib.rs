// lambdatron-core - Runtime and evaluator for the Lambdatron programming language

//! # lambdatron-core
//!
//! Runtime and evaluator for the Lambdatron programming language: an
//! AST-walking interpreter over the value trees produced by
//! `lambdatron-reader`.
//!
//! # Quick start
//!
//! ```
//! use lambdatron_core::{Interpreter, Outcome};
//!
//! let interp = Interpreter::new().unwrap();
//! match interp.evaluate("(+ 1 2 3)") {
//!     Outcome::Success(v) => assert_eq!(v.to_string(), "6"),
//!     other => panic!("{:?}", other),
//! }
//! ```
//!
//! # Core components
//!
//! - [`Interpreter`] — session: reader pipeline + evaluator + bootstrap
//! - [`Context`] — root and lexical-scope contexts
//! - [`eval`] — evaluate a form in a context
//! - [`NamespaceRegistry`] — namespaces and Var resolution

pub mod builtins;
pub mod context;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod namespace;
pub mod seq;

pub use builtins::register_host_functions;
pub use context::Context;
pub use error::{AritySpec, EvalError, EvalResult, Flow, Result};
pub use eval::{apply_value, eval, eval_value, make_host_fn, set_max_eval_depth};
pub use interpreter::{Interpreter, Outcome};
pub use namespace::{Namespace, NamespaceRegistry};

// Re-export reader types for convenience.
pub use lambdatron_reader::{
    InternStore, Keyword, ReadError, ReadErrorKind, Seq, SeqView, Symbol, Value, Var, VarSlot,
};
