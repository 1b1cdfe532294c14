// lambdatron-core - Predicate host functions

//! Type and value predicates.

use lambdatron_reader::Value;

use crate::context::Context;
use crate::error::{EvalError, EvalResult, ok};
use crate::seq;

use super::expect_arity;

macro_rules! type_predicate {
    ($fn_name:ident, $host_name:literal, $pattern:pat) => {
        pub(crate) fn $fn_name(args: &[Value], _ctx: &Context) -> EvalResult {
            expect_arity($host_name, 1, args)?;
            ok(Value::bool(matches!(&args[0], $pattern)))
        }
    };
}

type_predicate!(host_nil_p, ".nil?", Value::Nil);
type_predicate!(host_number_p, ".number?", Value::Int(_) | Value::Float(_));
type_predicate!(host_int_p, ".int?", Value::Int(_));
type_predicate!(host_float_p, ".float?", Value::Float(_));
type_predicate!(host_string_p, ".string?", Value::Str(_));
type_predicate!(host_symbol_p, ".symbol?", Value::Symbol(_));
type_predicate!(host_keyword_p, ".keyword?", Value::Keyword(_));
type_predicate!(host_fn_p, ".fn?", Value::Fn(_) | Value::Builtin(_));
type_predicate!(host_seq_p, ".seq?", Value::Seq(_));
type_predicate!(host_vector_p, ".vector?", Value::Vector(_));
type_predicate!(host_map_p, ".map?", Value::Map(_));

/// (.zero? n)
pub(crate) fn host_zero_p(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".zero?", 1, args)?;
    numeric_test(".zero?", &args[0], |i| i == 0, |f| f == 0.0)
}

/// (.pos? n)
pub(crate) fn host_pos_p(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".pos?", 1, args)?;
    numeric_test(".pos?", &args[0], |i| i > 0, |f| f > 0.0)
}

/// (.neg? n)
pub(crate) fn host_neg_p(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".neg?", 1, args)?;
    numeric_test(".neg?", &args[0], |i| i < 0, |f| f < 0.0)
}

fn numeric_test(
    name: &'static str,
    value: &Value,
    int_test: impl Fn(i64) -> bool,
    float_test: impl Fn(f64) -> bool,
) -> EvalResult {
    match value {
        Value::Int(n) => ok(Value::bool(int_test(*n))),
        Value::Float(n) => ok(Value::bool(float_test(*n))),
        other => Err(EvalError::invalid_argument(
            name,
            format!("expected a number, got {}", other.type_name()),
        )),
    }
}

/// (.empty? coll) — nil counts as empty; forcing may run lazy thunks.
pub(crate) fn host_empty_p(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".empty?", 1, args)?;
    match &args[0] {
        Value::Nil => ok(Value::bool(true)),
        Value::Vector(items) => ok(Value::bool(items.is_empty())),
        Value::Map(map) => ok(Value::bool(map.is_empty())),
        Value::Str(s) => ok(Value::bool(s.is_empty())),
        Value::Seq(s) => {
            let view = seq::force(s)?;
            ok(Value::bool(matches!(
                view,
                lambdatron_reader::SeqView::Empty
            )))
        }
        other => Err(EvalError::invalid_argument(
            ".empty?",
            format!("expected a collection, got {}", other.type_name()),
        )),
    }
}

/// (.not x) — logical negation of truthiness.
pub(crate) fn host_not(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".not", 1, args)?;
    ok(Value::bool(!args[0].is_truthy()))
}
