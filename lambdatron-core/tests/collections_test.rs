// lambdatron-core - Collection integration tests

//! Integration tests for vectors, maps, and the persistent-collection host
//! functions.

mod common;

use common::{EvalError, eval_err, eval_ok, new_interp};

#[test]
fn test_assoc_map() {
    let interp = new_interp();
    assert_eval!(&interp, "(= (.assoc {} 1 true 2 false) {1 true 2 false})", "true");
    assert_eval!(&interp, "(= (assoc {:a 1} :a 2) {:a 2})", "true");
    assert_eval!(&interp, "(= (assoc nil :a 1) {:a 1})", "true");
}

#[test]
fn test_assoc_vector() {
    let interp = new_interp();
    assert_eval!(&interp, "(assoc [10 20 30] 1 99)", "[10 99 30]");
    // Index equal to the length appends.
    assert_eval!(&interp, "(assoc [10 20 30] 3 99)", "[10 20 30 99]");
}

#[test]
fn test_assoc_vector_out_of_bounds() {
    let interp = new_interp();
    assert!(matches!(
        eval_err(&interp, "(.assoc [10 20 30] 4 99)"),
        EvalError::OutOfBounds { index: 4, length: 3 }
    ));
    assert!(matches!(
        eval_err(&interp, "(.assoc [10 20 30] -1 99)"),
        EvalError::OutOfBounds { .. }
    ));
}

#[test]
fn test_persistence() {
    let interp = new_interp();
    eval_ok(&interp, "(def m {:a 1})");
    eval_ok(&interp, "(def m2 (assoc m :b 2))");
    // The input compares equal to its pre-call state.
    assert_eval!(&interp, "(= m {:a 1})", "true");
    assert_eval!(&interp, "(= m2 {:a 1 :b 2})", "true");

    eval_ok(&interp, "(def v [1 2])");
    eval_ok(&interp, "(def v2 (conj v 3))");
    assert_eval!(&interp, "v", "[1 2]");
    assert_eval!(&interp, "v2", "[1 2 3]");
}

#[test]
fn test_dissoc() {
    let interp = new_interp();
    assert_eval!(&interp, "(= (dissoc {:a 1 :b 2} :a) {:b 2})", "true");
    assert_eval!(&interp, "(= (dissoc {:a 1} :missing) {:a 1})", "true");
}

#[test]
fn test_get() {
    let interp = new_interp();
    assert_eval!(&interp, "(get {:a 1} :a)", "1");
    assert_eval!(&interp, "(get {:a 1} :b)", "nil");
    assert_eval!(&interp, "(get {:a 1} :b :default)", ":default");
    assert_eval!(&interp, "(get [10 20] 1)", "20");
    assert_eval!(&interp, "(get [10 20] 5)", "nil");
    assert_eval!(&interp, "(get nil :k)", "nil");
}

#[test]
fn test_contains() {
    let interp = new_interp();
    assert_eval!(&interp, "(contains? {:a 1} :a)", "true");
    assert_eval!(&interp, "(contains? {:a 1} :b)", "false");
    assert_eval!(&interp, "(contains? [10 20] 1)", "true");
    assert_eval!(&interp, "(contains? [10 20] 2)", "false");
}

#[test]
fn test_keys_and_vals() {
    let interp = new_interp();
    assert_eval!(&interp, "(keys {:a 1})", "(:a)");
    assert_eval!(&interp, "(vals {:a 1})", "(1)");
    assert_eval!(&interp, "(count (keys {:a 1 :b 2}))", "2");
}

#[test]
fn test_count() {
    let interp = new_interp();
    assert_eval!(&interp, "(count nil)", "0");
    assert_eval!(&interp, "(count [1 2 3])", "3");
    assert_eval!(&interp, "(count {:a 1})", "1");
    assert_eval!(&interp, "(count '(1 2))", "2");
    assert_eval!(&interp, "(count \"abc\")", "3");
}

#[test]
fn test_nth() {
    let interp = new_interp();
    assert_eval!(&interp, "(nth [10 20 30] 1)", "20");
    assert_eval!(&interp, "(nth '(10 20 30) 2)", "30");
    assert!(matches!(
        eval_err(&interp, "(nth [10] 1)"),
        EvalError::OutOfBounds { .. }
    ));
    assert!(matches!(
        eval_err(&interp, "(nth '(10) 3)"),
        EvalError::OutOfBounds { .. }
    ));
}

#[test]
fn test_conj() {
    let interp = new_interp();
    assert_eval!(&interp, "(conj [1 2] 3)", "[1 2 3]");
    assert_eval!(&interp, "(conj '(2 3) 1)", "(1 2 3)");
    assert_eval!(&interp, "(conj nil 1 2)", "(2 1)");
    assert_eval!(&interp, "(= (conj {:a 1} [:b 2]) {:a 1 :b 2})", "true");
}

#[test]
fn test_map_literal_evaluation() {
    let interp = new_interp();
    eval_ok(&interp, "(def k :key)");
    assert_eval!(&interp, "(get {k 1} :key)", "1");
    // Keys that collide after evaluation collapse to a single entry.
    assert_eval!(&interp, "(count {k 1 :key 2})", "1");
}

#[test]
fn test_map_key_equality_is_value_equality() {
    let interp = new_interp();
    // Int and Float keys that are numerically equal are the same key.
    assert_eval!(&interp, "(get {1 :int} 1.0)", ":int");
    assert_eval!(&interp, "(= 3 3.0)", "true");
    assert_eval!(&interp, "(get {[1 2] :v} [1 2])", ":v");
}

#[test]
fn test_vector_and_seq_equality() {
    let interp = new_interp();
    assert_eval!(&interp, "(= [1 2] '(1 2))", "true");
    assert_eval!(&interp, "(= [1 2] [1 2])", "true");
    assert_eval!(&interp, "(= [1 2] [2 1])", "false");
    assert_eval!(&interp, "(= {} {})", "true");
}

#[test]
fn test_hash_map_constructor() {
    let interp = new_interp();
    assert_eval!(&interp, "(= (hash-map :a 1 :b 2) {:a 1 :b 2})", "true");
    assert!(matches!(
        eval_err(&interp, "(hash-map :a)"),
        EvalError::InvalidArgument { .. }
    ));
}

#[test]
fn test_vec_realises() {
    let interp = new_interp();
    assert_eval!(&interp, "(vec '(1 2 3))", "[1 2 3]");
    assert_eval!(&interp, "(vec (take 3 (iterate inc 0)))", "[0 1 2]");
}
