// lambdatron-core - Shared test helpers

//! Shared helpers for the integration tests.

#![allow(dead_code)]

pub use lambdatron_core::{EvalError, Interpreter, Outcome, Value};

/// A fresh interpreter with host functions and the stdlib loaded.
pub fn new_interp() -> Interpreter {
    Interpreter::new().expect("interpreter bootstrap failed")
}

/// Evaluate source, panicking on any failure. Lazy results are realised so
/// printing and comparisons see the full sequence.
pub fn eval_ok(interp: &Interpreter, src: &str) -> Value {
    match interp.evaluate(src) {
        Outcome::Success(v) => {
            interp.realize(&v).expect("failed to realise result");
            v
        }
        Outcome::ReadFailure(e) => panic!("read failure for {:?}: {}", src, e),
        Outcome::EvalFailure(e) => panic!("eval failure for {:?}: {}", src, e),
    }
}

/// Evaluate source, panicking unless it fails to evaluate.
pub fn eval_err(interp: &Interpreter, src: &str) -> EvalError {
    match interp.evaluate(src) {
        Outcome::EvalFailure(e) => e,
        Outcome::Success(v) => panic!("expected eval failure for {:?}, got {}", src, v),
        Outcome::ReadFailure(e) => panic!("expected eval failure for {:?}, got read error {}", src, e),
    }
}

/// Assert that source evaluates and prints as expected.
#[macro_export]
macro_rules! assert_eval {
    ($interp:expr, $src:expr, $expected:expr) => {
        assert_eq!(
            common::eval_ok($interp, $src).to_string(),
            $expected,
            "source: {}",
            $src
        );
    };
}
