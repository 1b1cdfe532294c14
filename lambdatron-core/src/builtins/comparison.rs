// lambdatron-core - Comparison host functions

//! Equality and ordering host functions.

use std::cmp::Ordering;

use lambdatron_reader::Value;

use crate::context::Context;
use crate::error::{EvalError, EvalResult, Result, ok};

use super::Num;

/// (.= x y*) — structural equality over all arguments. Numeric equality is
/// cross-type. Lazy sequences are realised before comparison.
pub(crate) fn host_eq(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::arity_at_least(".=", 1, 0));
    }
    for arg in args {
        crate::seq::realize_deep(arg)?;
    }
    let all_equal = args.windows(2).all(|w| w[0] == w[1]);
    ok(Value::bool(all_equal))
}

/// (.== n n*) — numeric equality; errors on non-numbers.
pub(crate) fn host_num_eq(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::arity_at_least(".==", 1, 0));
    }
    for pair in args.windows(2) {
        if compare_numbers(".==", &pair[0], &pair[1])? != Ordering::Equal {
            return ok(Value::bool(false));
        }
    }
    ok(Value::bool(true))
}

/// Compare two numbers, promoting to `f64` when either is a float.
pub(crate) fn compare_numbers(
    name: &'static str,
    a: &Value,
    b: &Value,
) -> Result<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        _ => {
            let x = Num::of(name, a)?.as_f64();
            let y = Num::of(name, b)?.as_f64();
            x.partial_cmp(&y)
                .ok_or_else(|| EvalError::invalid_argument(name, "cannot order NaN"))
        }
    }
}

fn chain(
    name: &'static str,
    args: &[Value],
    keep: impl Fn(Ordering) -> bool,
) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::arity_at_least(name, 1, 0));
    }
    for pair in args.windows(2) {
        if !keep(compare_numbers(name, &pair[0], &pair[1])?) {
            return ok(Value::bool(false));
        }
    }
    ok(Value::bool(true))
}

/// (.< n n*) — strictly increasing chain.
pub(crate) fn host_lt(args: &[Value], _ctx: &Context) -> EvalResult {
    chain(".<", args, |o| o == Ordering::Less)
}

/// (.> n n*) — strictly decreasing chain.
pub(crate) fn host_gt(args: &[Value], _ctx: &Context) -> EvalResult {
    chain(".>", args, |o| o == Ordering::Greater)
}

/// (.<= n n*)
pub(crate) fn host_le(args: &[Value], _ctx: &Context) -> EvalResult {
    chain(".<=", args, |o| o != Ordering::Greater)
}

/// (.>= n n*)
pub(crate) fn host_ge(args: &[Value], _ctx: &Context) -> EvalResult {
    chain(".>=", args, |o| o != Ordering::Less)
}
