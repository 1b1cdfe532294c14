// lambdatron-core - Standard library integration tests

//! Integration tests for the bootstrapped standard library: macros,
//! aliases, arithmetic, predicates, strings, and regex.

mod common;

use common::{EvalError, eval_err, eval_ok, new_interp};

#[test]
fn test_defn() {
    let interp = new_interp();
    assert_eval!(&interp, "(defn square [x] (* x x))", "#'user/square");
    assert_eval!(&interp, "(square 5)", "25");

    // Self-recursion through the definition name.
    eval_ok(&interp, "(defn fact [n] (if (zero? n) 1 (* n (fact (dec n)))))");
    assert_eval!(&interp, "(fact 5)", "120");
}

#[test]
fn test_when_and_when_not() {
    let interp = new_interp();
    assert_eval!(&interp, "(when true 1 2 3)", "3");
    assert_eval!(&interp, "(when false 1 2 3)", "nil");
    assert_eval!(&interp, "(when-not false :ran)", ":ran");
    assert_eval!(&interp, "(when-not true :ran)", "nil");
    // The body never evaluates when the test fails.
    assert_eval!(&interp, "(when false missing)", "nil");
}

#[test]
fn test_when_let() {
    let interp = new_interp();
    assert_eval!(&interp, "(when-let [x 5] (+ x 1))", "6");
    assert_eval!(&interp, "(when-let [x nil] missing)", "nil");
    assert_eval!(&interp, "(when-let [x false] missing)", "nil");
}

#[test]
fn test_threading_macros() {
    let interp = new_interp();
    assert_eval!(&interp, "(-> 5 inc)", "6");
    assert_eval!(&interp, "(-> 5 inc (- 2))", "4");
    assert_eval!(&interp, "(-> {} (assoc :a 1) (get :a))", "1");
    assert_eval!(&interp, "(->> (iterate inc 0) (take 3))", "(0 1 2)");
    assert_eval!(&interp, "(->> '(0 1 2) (drop 1) (take 1))", "(1)");
}

#[test]
fn test_comment_macro() {
    let interp = new_interp();
    assert_eval!(&interp, "(comment (this is never evaluated))", "nil");
}

#[test]
fn test_arithmetic() {
    let interp = new_interp();
    assert_eval!(&interp, "(+ 1 2 3)", "6");
    assert_eval!(&interp, "(+)", "0");
    assert_eval!(&interp, "(*)", "1");
    assert_eval!(&interp, "(- 10 3 2)", "5");
    assert_eval!(&interp, "(- 5)", "-5");
    assert_eval!(&interp, "(* 2 3 4)", "24");
    assert_eval!(&interp, "(/ 10 2)", "5");
    assert_eval!(&interp, "(/ 7 2)", "3");
    assert_eval!(&interp, "(quot 7 2)", "3");
    assert_eval!(&interp, "(rem 7 2)", "1");
    assert_eval!(&interp, "(inc 41)", "42");
    assert_eval!(&interp, "(dec 43)", "42");
}

#[test]
fn test_numeric_promotion() {
    let interp = new_interp();
    assert_eval!(&interp, "(+ 1 2.5)", "3.5");
    assert_eval!(&interp, "(* 2 1.5)", "3.0");
    assert_eval!(&interp, "(/ 10 2.0)", "5.0");
    assert_eval!(&interp, "(inc 1.5)", "2.5");
}

#[test]
fn test_division_by_zero() {
    let interp = new_interp();
    assert!(matches!(
        eval_err(&interp, "(/ 1 0)"),
        EvalError::DivideByZero
    ));
    assert!(matches!(
        eval_err(&interp, "(quot 1 0)"),
        EvalError::DivideByZero
    ));
    assert!(matches!(
        eval_err(&interp, "(rem 1 0)"),
        EvalError::DivideByZero
    ));
    // Float division follows IEEE 754.
    assert_eval!(&interp, "(< 1000.0 (/ 1.0 0.0))", "true");
}

#[test]
fn test_integer_overflow() {
    let interp = new_interp();
    assert!(matches!(
        eval_err(&interp, "(+ 9223372036854775807 1)"),
        EvalError::ArithmeticError(_)
    ));
    assert!(matches!(
        eval_err(&interp, "(inc 9223372036854775807)"),
        EvalError::ArithmeticError(_)
    ));
}

#[test]
fn test_comparisons() {
    let interp = new_interp();
    assert_eval!(&interp, "(= 1 1 1)", "true");
    assert_eval!(&interp, "(= 1 2)", "false");
    assert_eval!(&interp, "(= 3 3.0)", "true");
    assert_eval!(&interp, "(== 3 3.0)", "true");
    assert_eval!(&interp, "(not= 1 2)", "true");
    assert_eval!(&interp, "(< 1 2 3)", "true");
    assert_eval!(&interp, "(< 1 3 2)", "false");
    assert_eval!(&interp, "(<= 1 1 2)", "true");
    assert_eval!(&interp, "(> 3 2 1)", "true");
    assert_eval!(&interp, "(>= 3 3 1)", "true");
    assert_eval!(&interp, "(< 1 2.5)", "true");
}

#[test]
fn test_predicates() {
    let interp = new_interp();
    assert_eval!(&interp, "(nil? nil)", "true");
    assert_eval!(&interp, "(nil? false)", "false");
    assert_eval!(&interp, "(zero? 0)", "true");
    assert_eval!(&interp, "(zero? 0.0)", "true");
    assert_eval!(&interp, "(pos? 1)", "true");
    assert_eval!(&interp, "(neg? -1)", "true");
    assert_eval!(&interp, "(number? 1.5)", "true");
    assert_eval!(&interp, "(int? 1)", "true");
    assert_eval!(&interp, "(float? 1.5)", "true");
    assert_eval!(&interp, "(string? \"s\")", "true");
    assert_eval!(&interp, "(symbol? 'x)", "true");
    assert_eval!(&interp, "(keyword? :k)", "true");
    assert_eval!(&interp, "(fn? inc)", "true");
    assert_eval!(&interp, "(fn? (fn [x] x))", "true");
    assert_eval!(&interp, "(seq? '(1))", "true");
    assert_eval!(&interp, "(seq? [1])", "false");
    assert_eval!(&interp, "(vector? [1])", "true");
    assert_eval!(&interp, "(map? {})", "true");
    assert_eval!(&interp, "(empty? ())", "true");
    assert_eval!(&interp, "(empty? nil)", "true");
    assert_eval!(&interp, "(empty? [1])", "false");
    assert_eval!(&interp, "(not nil)", "true");
    assert_eval!(&interp, "(not 1)", "false");
}

#[test]
fn test_str_and_pr_str() {
    let interp = new_interp();
    assert_eval!(&interp, "(str \"a\" 1 :k)", "\"a1:k\"");
    assert_eval!(&interp, "(str)", "\"\"");
    assert_eval!(&interp, "(str nil)", "\"\"");
    assert_eval!(&interp, "(str \\a \\b)", "\"ab\"");
    // pr-str keeps the readable form.
    assert_eval!(&interp, "(pr-str \"a\")", "\"\\\"a\\\"\"");
    assert_eval!(&interp, "(pr-str [1 2])", "\"[1 2]\"");
}

#[test]
fn test_name_and_namespace() {
    let interp = new_interp();
    assert_eval!(&interp, "(name 'user/foo)", "\"foo\"");
    assert_eval!(&interp, "(name :k)", "\"k\"");
    assert_eval!(&interp, "(namespace 'user/foo)", "\"user\"");
    assert_eval!(&interp, "(namespace 'foo)", "nil");
    assert_eval!(&interp, "(namespace :ns/k)", "\"ns\"");
}

#[test]
fn test_regex() {
    let interp = new_interp();
    assert_eval!(&interp, r#"(re-matches #"a+" "aaa")"#, "\"aaa\"");
    assert_eval!(&interp, r#"(re-matches #"a+" "aab")"#, "nil");
    assert_eval!(&interp, r#"(re-find #"\d+" "ab123cd")"#, "\"123\"");
    assert_eval!(&interp, r#"(re-find #"x" "abc")"#, "nil");
    // Capture groups yield a vector of the whole match plus each group.
    assert_eval!(
        &interp,
        r#"(re-matches #"(a+)(b+)" "aabb")"#,
        "[\"aabb\" \"aa\" \"bb\"]"
    );
    assert_eval!(&interp, r#"(re-matches (re-pattern "b+") "bb")"#, "\"bb\"");
    assert!(matches!(
        eval_err(&interp, r#"(re-pattern "[unclosed")"#),
        EvalError::InvalidRegex(_)
    ));
}

#[test]
fn test_print_goes_through_output_hook() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let interp = new_interp();
    let output = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&output);
    interp.set_output(move |s| sink.borrow_mut().push_str(s));

    eval_ok(&interp, "(println \"hello\" 42)");
    eval_ok(&interp, "(print :k)");
    assert_eq!(&*output.borrow(), "hello 42\n:k");
}
