// lambdatron-core - Interpreter session integration tests

//! Tests for the Interpreter API surface: outcomes, reset, namespaces, and
//! the intern store.

mod common;

use common::{Outcome, eval_ok, new_interp};

#[test]
fn test_evaluate_returns_last_form() {
    let interp = new_interp();
    assert_eval!(&interp, "1 2 3", "3");
    assert_eval!(&interp, "(def a 1) (def b 2) (+ a b)", "3");
}

#[test]
fn test_empty_input_is_nil() {
    let interp = new_interp();
    assert_eval!(&interp, "", "nil");
    assert_eval!(&interp, "   ; just a comment", "nil");
}

#[test]
fn test_outcome_variants() {
    let interp = new_interp();
    assert!(matches!(interp.evaluate("42"), Outcome::Success(_)));
    assert!(matches!(interp.evaluate("(42"), Outcome::ReadFailure(_)));
    assert!(matches!(interp.evaluate("missing"), Outcome::EvalFailure(_)));
}

#[test]
fn test_state_persists_across_evaluates() {
    let interp = new_interp();
    eval_ok(&interp, "(def counter-base 10)");
    assert_eval!(&interp, "(+ counter-base 1)", "11");
}

#[test]
fn test_reset_discards_state() {
    let mut interp = new_interp();
    eval_ok(&interp, "(def x 42)");
    assert_eval!(&interp, "x", "42");

    interp.reset().expect("reset failed");
    assert!(matches!(interp.evaluate("x"), Outcome::EvalFailure(_)));
    // The stdlib is loaded again after reset.
    assert_eval!(&interp, "(take 2 (iterate inc 0))", "(0 1)");
}

#[test]
fn test_current_namespace_is_user() {
    let interp = new_interp();
    assert_eq!(&*interp.current_namespace().name(), "user");
}

#[test]
fn test_intern_store_is_shared() {
    let interp = new_interp();
    let a = interp.interns().intern("some-identifier");
    let b = interp.interns().intern("some-identifier");
    assert_eq!(a.id(), b.id());
}

#[test]
fn test_stdlib_available_in_user() {
    let interp = new_interp();
    // Spot-check a macro, a seq utility, and a host alias.
    assert_eval!(&interp, "(when true :yes)", ":yes");
    assert_eval!(&interp, "(take 1 (repeat :r))", "(:r)");
    assert_eval!(&interp, "(cons 0 nil)", "(0)");
}

#[test]
fn test_error_display_is_stable() {
    let interp = new_interp();
    match interp.evaluate("missing-symbol") {
        Outcome::EvalFailure(e) => {
            assert_eq!(e.to_string(), "Unable to resolve symbol: missing-symbol");
        }
        other => panic!("{:?}", other),
    }
    match interp.evaluate("(1 2") {
        Outcome::ReadFailure(e) => {
            assert!(e.to_string().contains("unexpected end of input"), "{}", e);
        }
        other => panic!("{:?}", other),
    }
}
