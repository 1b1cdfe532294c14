// lambdatron-core - Lazy sequence integration tests

//! Integration tests for the lazy sequence engine and the stdlib seq
//! utilities.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{EvalError, Outcome, eval_err, eval_ok, new_interp};

#[test]
fn test_take_iterate() {
    let interp = new_interp();
    assert_eval!(&interp, "(take 5 (iterate inc 0))", "(0 1 2 3 4)");
    assert_eval!(&interp, "(take 3 (iterate (fn [x] (* 2 x)) 1))", "(1 2 4)");
    assert_eval!(&interp, "(take 0 (iterate inc 0))", "()");
}

#[test]
fn test_take_stops_at_end_of_input() {
    let interp = new_interp();
    assert_eval!(&interp, "(take 10 '(1 2 3))", "(1 2 3)");
    assert_eval!(&interp, "(take 10 [1 2])", "(1 2)");
}

#[test]
fn test_repeat_and_repeatedly() {
    let interp = new_interp();
    assert_eval!(&interp, "(take 3 (repeat :x))", "(:x :x :x)");
    assert_eval!(&interp, "(take 2 (repeatedly (fn [] 7)))", "(7 7)");
}

#[test]
fn test_cycle() {
    let interp = new_interp();
    assert_eval!(&interp, "(take 5 (cycle [1 2]))", "(1 2 1 2 1)");
    assert_eval!(&interp, "(take 4 (cycle '(:a)))", "(:a :a :a :a)");
}

#[test]
fn test_drop() {
    let interp = new_interp();
    assert_eval!(&interp, "(drop 2 [1 2 3 4])", "(3 4)");
    assert_eval!(&interp, "(drop 0 '(1 2))", "(1 2)");
    assert_eval!(&interp, "(drop 5 '(1 2))", "()");
    assert_eval!(&interp, "(take 3 (drop 2 (iterate inc 0)))", "(2 3 4)");
}

#[test]
fn test_concat() {
    let interp = new_interp();
    assert_eval!(&interp, "(concat)", "()");
    assert_eval!(&interp, "(concat [1 2])", "(1 2)");
    assert_eval!(&interp, "(concat [1 2] '(3) nil [4])", "(1 2 3 4)");
    // Lazy in its later arguments.
    assert_eval!(&interp, "(take 3 (concat [1] (iterate inc 10)))", "(1 10 11)");
}

#[test]
fn test_interleave_and_interpose() {
    let interp = new_interp();
    assert_eval!(&interp, "(interleave '(1 2) '(:a :b))", "(1 :a 2 :b)");
    assert_eval!(&interp, "(interleave '(1 2 3) '(:a))", "(1 :a)");
    assert_eval!(&interp, "(interpose :sep '(1 2 3))", "(1 :sep 2 :sep 3)");
    assert_eval!(&interp, "(interpose :sep '(1))", "(1)");
    assert_eval!(&interp, "(interpose :sep ())", "()");
}

#[test]
fn test_remove() {
    let interp = new_interp();
    assert_eval!(&interp, "(remove zero? '(0 1 0 2 0 3))", "(1 2 3)");
    assert_eval!(&interp, "(remove zero? ())", "()");
    assert_eval!(&interp, "(take 2 (remove zero? (iterate inc 0)))", "(1 2)");
}

#[test]
fn test_list_star() {
    let interp = new_interp();
    assert_eval!(&interp, "(list* 1 2 [3 4])", "(1 2 3 4)");
    assert_eval!(&interp, "(list* [1 2])", "(1 2)");
    assert_eval!(&interp, "(list* 1 nil)", "(1)");
}

#[test]
fn test_lazy_seq_macro_wraps_any_value() {
    let interp = new_interp();
    // A non-seq thunk result becomes a single-element seq.
    assert_eval!(&interp, "(lazy-seq 42)", "(42)");
    assert_eval!(&interp, "(lazy-seq nil)", "()");
    assert_eval!(&interp, "(lazy-seq '(1 2))", "(1 2)");
}

#[test]
fn test_force_once() {
    let interp = new_interp();
    let output = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&output);
    interp.set_output(move |s| sink.borrow_mut().push_str(s));

    match interp.evaluate("(def ticks (take 3 (repeatedly (fn [] (println \"tick\") :t))))") {
        Outcome::Success(_) => {}
        other => panic!("{:?}", other),
    }
    // Nothing forced yet.
    assert_eq!(output.borrow().matches("tick").count(), 0);

    eval_ok(&interp, "(count ticks)");
    assert_eq!(output.borrow().matches("tick").count(), 3);

    // Traversing again re-reads the memoized nodes; the thunks never rerun.
    eval_ok(&interp, "(count ticks)");
    eval_ok(&interp, "ticks");
    assert_eq!(output.borrow().matches("tick").count(), 3);
}

#[test]
fn test_lazy_equality() {
    let interp = new_interp();
    assert_eval!(&interp, "(= (take 3 (iterate inc 0)) '(0 1 2))", "true");
    assert_eval!(&interp, "(= (take 3 (iterate inc 0)) [0 1 2])", "true");
    assert_eval!(&interp, "(= (take 3 (iterate inc 0)) '(0 1))", "false");
}

#[test]
fn test_errors_during_forcing_surface() {
    let interp = new_interp();
    // The thunk body divides by zero when forced.
    assert!(matches!(
        eval_err(&interp, "(count (lazy-seq (/ 1 0)))"),
        EvalError::DivideByZero
    ));
}

#[test]
fn test_seq_host_functions() {
    let interp = new_interp();
    assert_eval!(&interp, "(cons 1 '(2 3))", "(1 2 3)");
    assert_eval!(&interp, "(cons 1 nil)", "(1)");
    assert_eval!(&interp, "(cons 1 [2 3])", "(1 2 3)");
    assert_eval!(&interp, "(first '(1 2))", "1");
    assert_eval!(&interp, "(first ())", "nil");
    assert_eval!(&interp, "(rest '(1 2))", "(2)");
    assert_eval!(&interp, "(rest ())", "()");
    assert_eval!(&interp, "(next '(1 2))", "(2)");
    assert_eval!(&interp, "(next '(1))", "nil");
    assert_eval!(&interp, "(second '(1 2 3))", "2");
    assert_eval!(&interp, "(seq [1 2])", "(1 2)");
    assert_eval!(&interp, "(seq \"ab\")", "(\\a \\b)");
}
