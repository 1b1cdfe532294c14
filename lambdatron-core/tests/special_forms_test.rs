// lambdatron-core - Special form integration tests

//! Integration tests for the special forms: quote, if, do, def, let, var,
//! apply, attempt.

mod common;

use common::{EvalError, eval_err, eval_ok, new_interp};

#[test]
fn test_quote() {
    let interp = new_interp();
    assert_eval!(&interp, "'x", "x");
    assert_eval!(&interp, "'(1 2 3)", "(1 2 3)");
    assert_eval!(&interp, "(quote (a b))", "(a b)");
    assert_eval!(&interp, "(quote)", "nil");
}

#[test]
fn test_if_branches() {
    let interp = new_interp();
    assert_eval!(&interp, "(if true 1 2)", "1");
    assert_eval!(&interp, "(if false 1 2)", "2");
    assert_eval!(&interp, "(if nil 1 2)", "2");
    // Everything but nil and false is truthy.
    assert_eval!(&interp, "(if 0 :t :f)", ":t");
    assert_eval!(&interp, "(if \"\" :t :f)", ":t");
    assert_eval!(&interp, "(if () :t :f)", ":t");
    assert_eval!(&interp, "(if false 1)", "nil");
}

#[test]
fn test_if_only_takes_one_branch() {
    let interp = new_interp();
    // The untaken branch is never evaluated.
    assert_eval!(&interp, "(if true 1 missing)", "1");
    assert_eval!(&interp, "(if false missing 2)", "2");
}

#[test]
fn test_do() {
    let interp = new_interp();
    assert_eval!(&interp, "(do)", "nil");
    assert_eval!(&interp, "(do 1 2 3)", "3");
    eval_ok(&interp, "(do (def side-a 1) (def side-b 2))");
    assert_eval!(&interp, "(+ side-a side-b)", "3");
}

#[test]
fn test_def_returns_var() {
    let interp = new_interp();
    assert_eval!(&interp, "(def x 42)", "#'user/x");
    assert_eval!(&interp, "x", "42");
    // Qualified with the current namespace is allowed.
    assert_eval!(&interp, "(def user/y 1)", "#'user/y");
    assert_eval!(&interp, "y", "1");
}

#[test]
fn test_def_rebinding() {
    let interp = new_interp();
    eval_ok(&interp, "(def x 1)");
    eval_ok(&interp, "(def x 2)");
    assert_eval!(&interp, "x", "2");
}

#[test]
fn test_def_qualified_must_match_current_namespace() {
    let interp = new_interp();
    assert!(matches!(
        eval_err(&interp, "(def other/x 1)"),
        EvalError::QualifiedSymbolMisuse(_)
    ));
    assert!(matches!(
        eval_err(&interp, "(defmacro other/m [x] x)"),
        EvalError::QualifiedSymbolMisuse(_)
    ));
}

#[test]
fn test_unbound_var_resolves_to_var() {
    let interp = new_interp();
    eval_ok(&interp, "(def x)");
    assert_eval!(&interp, "x", "#'user/x");
    assert!(matches!(
        eval_err(&interp, "@x"),
        EvalError::UnboundVar(_)
    ));
}

#[test]
fn test_let_sequential_bindings() {
    let interp = new_interp();
    assert_eval!(&interp, "(let [x 10 y (+ x 1)] (+ x y))", "21");
    assert_eval!(&interp, "(let [x 1] (let [x 2] x))", "2");
    assert_eval!(&interp, "(let [x 1] (let [y 2] (+ x y)))", "3");
}

#[test]
fn test_let_binding_mismatch() {
    let interp = new_interp();
    assert!(matches!(
        eval_err(&interp, "(let [x])"),
        EvalError::BindingMismatch { .. }
    ));
    assert!(matches!(
        eval_err(&interp, "(let [1 2] 3)"),
        EvalError::BindingMismatch { .. }
    ));
    assert!(matches!(
        eval_err(&interp, "(let (x 1) x)"),
        EvalError::BindingMismatch { .. }
    ));
}

#[test]
fn test_var_special_form() {
    let interp = new_interp();
    eval_ok(&interp, "(def x 5)");
    assert_eval!(&interp, "(var x)", "#'user/x");
    assert_eval!(&interp, "(.deref (var x))", "5");
    assert!(matches!(
        eval_err(&interp, "(var missing)"),
        EvalError::InvalidSymbol(_)
    ));
}

#[test]
fn test_deref_reader_macro() {
    let interp = new_interp();
    eval_ok(&interp, "(def x 5)");
    assert_eval!(&interp, "@(var x)", "5");
}

#[test]
fn test_apply() {
    let interp = new_interp();
    assert_eval!(&interp, "(apply + [1 2 3])", "6");
    assert_eval!(&interp, "(apply + 1 2 [3 4])", "10");
    assert_eval!(&interp, "(apply + 1 2 nil)", "3");
    assert_eval!(&interp, "(apply .list '(1 2))", "(1 2)");
    // A map flattens to [k v] pairs.
    assert_eval!(&interp, "(apply .count [{1 2}])", "1");
    eval_ok(&interp, "(def pairs (apply .list {1 2}))");
    assert_eval!(&interp, "(first (first pairs))", "1");
}

#[test]
fn test_apply_rejects_non_collection_tail() {
    let interp = new_interp();
    assert!(matches!(
        eval_err(&interp, "(apply + 1 2)"),
        EvalError::InvalidArgument { .. }
    ));
}

#[test]
fn test_attempt() {
    let interp = new_interp();
    assert_eval!(&interp, "(attempt)", "nil");
    assert_eval!(&interp, "(attempt 1 2)", "1");
    assert_eval!(&interp, "(attempt (/ 1 0) 42)", "42");
    assert_eval!(&interp, "(attempt missing (/ 1 0) :fallback)", ":fallback");
    assert!(matches!(
        eval_err(&interp, "(attempt missing (/ 1 0))"),
        EvalError::DivideByZero
    ));
}

#[test]
fn test_self_evaluating_atoms() {
    let interp = new_interp();
    assert_eval!(&interp, "42", "42");
    assert_eval!(&interp, "2.5", "2.5");
    assert_eval!(&interp, "true", "true");
    assert_eval!(&interp, "nil", "nil");
    assert_eval!(&interp, ":kw", ":kw");
    assert_eval!(&interp, "\"hi\"", "\"hi\"");
    assert_eval!(&interp, r"\a", "\\a");
    assert_eval!(&interp, "()", "()");
}

#[test]
fn test_not_evalable_head() {
    let interp = new_interp();
    assert!(matches!(
        eval_err(&interp, "(1 2 3)"),
        EvalError::NotEvalable(_)
    ));
    assert!(matches!(
        eval_err(&interp, "(\"s\")"),
        EvalError::NotEvalable(_)
    ));
}
