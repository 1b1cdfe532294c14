// lambdatron-core - Interpreter session

//! The interpreter session: reader pipeline plus evaluator behind a single
//! `evaluate(text)` entry point.

use lambdatron_reader::{InternStore, Parser, ReadError, Symbol, Value, expand};

use crate::builtins::register_host_functions;
use crate::context::Context;
use crate::error::{EvalError, Result};
use crate::eval;
use crate::namespace::{Namespace, NamespaceRegistry};

/// Embedded standard library source (macros and seq utilities).
const CORE_STDLIB: &str = include_str!("../../lambdatron-std/core.lbt");

/// The result of `Interpreter::evaluate`.
#[derive(Debug)]
pub enum Outcome {
    /// The value of the last form in the input.
    Success(Value),
    /// The input failed to read (lex, parse, or reader-macro expansion).
    ReadFailure(ReadError),
    /// A form failed to evaluate.
    EvalFailure(EvalError),
}

impl Outcome {
    /// The success value, if any.
    #[must_use]
    pub fn value(self) -> Option<Value> {
        match self {
            Outcome::Success(v) => Some(v),
            _ => None,
        }
    }
}

/// A Lambdatron interpreter session.
///
/// Owns the intern store, the namespace registry, and the root context.
/// Construction registers the host functions and evaluates the embedded
/// standard library; any error during that bootstrap is fatal and surfaces
/// from [`Interpreter::new`].
///
/// Sessions are strictly single-threaded; sharing values across interpreter
/// instances is undefined.
pub struct Interpreter {
    ctx: Context,
}

impl Interpreter {
    /// Create an interpreter with host functions and the standard library
    /// loaded.
    pub fn new() -> Result<Self> {
        let interns = InternStore::new();
        let ctx = Context::new_root(interns);
        register_host_functions(&ctx);
        let interp = Interpreter { ctx };
        interp.bootstrap()?;
        Ok(interp)
    }

    /// Evaluate the embedded stdlib into `lambdatron.core`, then refer its
    /// vars into `user` and make `user` current.
    fn bootstrap(&self) -> Result<()> {
        let registry = self.ctx.registry();
        registry.set_current(NamespaceRegistry::CORE_NS);

        match self.evaluate(CORE_STDLIB) {
            Outcome::Success(_) => {}
            Outcome::ReadFailure(e) => {
                return Err(EvalError::runtime(format!(
                    "failed to read the standard library: {}",
                    e
                )));
            }
            Outcome::EvalFailure(e) => return Err(e),
        }

        let user = registry.find_or_create("user");
        registry.refer_core_to(&user);
        registry.set_current("user");
        Ok(())
    }

    /// Discard all session state and re-bootstrap. The output hook resets to
    /// stdout.
    pub fn reset(&mut self) -> Result<()> {
        *self = Interpreter::new()?;
        Ok(())
    }

    /// Read and evaluate every form in the input, returning the value of the
    /// last one. Reading (including reader-macro expansion) and evaluation
    /// failures are reported separately.
    pub fn evaluate(&self, text: &str) -> Outcome {
        let interns = self.ctx.interns();
        let registry = self.ctx.registry();

        let mut parser = match Parser::new(text, interns.clone()) {
            Ok(p) => p,
            Err(e) => return Outcome::ReadFailure(e),
        };

        let mut result = Value::Nil;
        loop {
            let form = match parser.parse() {
                Ok(Some(form)) => form,
                Ok(None) => break,
                Err(e) => return Outcome::ReadFailure(e),
            };

            let current_ns = registry.current_name();
            let resolver = |name: &str| {
                let sym = Symbol::new(&interns, name);
                registry.resolve(&sym).map(|var| var.ns().to_string())
            };
            let expanded = match expand(&form, &interns, &current_ns, &resolver) {
                Ok(form) => form,
                Err(e) => return Outcome::ReadFailure(e),
            };

            match eval::eval(&expanded, &self.ctx).and_then(|flow| flow.into_value()) {
                Ok(v) => result = v,
                Err(e) => return Outcome::EvalFailure(e),
            }
        }
        Outcome::Success(result)
    }

    /// Force every lazy sequence reachable from a value so it prints fully.
    /// Used by the REPL before displaying results; does not terminate on
    /// infinite sequences.
    pub fn realize(&self, value: &Value) -> Result<()> {
        crate::seq::realize_deep(value)
    }

    /// Replace the hook receiving `.print`/`.println` output.
    pub fn set_output(&self, f: impl FnMut(&str) + 'static) {
        self.ctx.set_output(f);
    }

    /// The session's intern store.
    #[must_use]
    pub fn interns(&self) -> InternStore {
        self.ctx.interns()
    }

    /// The current namespace.
    #[must_use]
    pub fn current_namespace(&self) -> Namespace {
        self.ctx.registry().current()
    }

    /// The root evaluation context, for host embedding.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}
