// lambdatron-core - Arithmetic host functions

//! Arithmetic host functions over the `i64`/`f64` numeric tower.
//!
//! Operations promote to `f64` when either operand is a float. Integer
//! arithmetic is checked: overflow is an `ArithmeticError`, integer division
//! by zero is `DivideByZero`. Float division follows IEEE 754.

use lambdatron_reader::Value;

use crate::context::Context;
use crate::error::{EvalError, EvalResult, Result, ok};

use super::{Num, expect_arity};

fn fold(
    name: &'static str,
    args: &[Value],
    init: i64,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    let mut acc = Num::Int(init);
    for arg in args {
        let n = Num::of(name, arg)?;
        acc = match (acc, n) {
            (Num::Int(a), Num::Int(b)) => {
                Num::Int(int_op(a, b).ok_or(EvalError::ArithmeticError(name))?)
            }
            (a, b) => Num::Float(float_op(a.as_f64(), b.as_f64())),
        };
    }
    Ok(match acc {
        Num::Int(n) => Value::int(n),
        Num::Float(n) => Value::float(n),
    })
}

/// (.+ n*) — sum; no arguments yield 0.
pub(crate) fn host_add(args: &[Value], _ctx: &Context) -> EvalResult {
    ok(fold(".+", args, 0, i64::checked_add, |a, b| a + b)?)
}

/// (.* n*) — product; no arguments yield 1.
pub(crate) fn host_mul(args: &[Value], _ctx: &Context) -> EvalResult {
    ok(fold(".*", args, 1, i64::checked_mul, |a, b| a * b)?)
}

/// (.- n n*) — subtraction; a single argument negates.
pub(crate) fn host_sub(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::arity_at_least(".-", 1, 0));
    }
    if args.len() == 1 {
        return match Num::of(".-", &args[0])? {
            Num::Int(n) => ok(Value::int(
                n.checked_neg().ok_or(EvalError::ArithmeticError(".-"))?,
            )),
            Num::Float(n) => ok(Value::float(-n)),
        };
    }
    let mut acc = Num::of(".-", &args[0])?;
    for arg in &args[1..] {
        let n = Num::of(".-", arg)?;
        acc = match (acc, n) {
            (Num::Int(a), Num::Int(b)) => Num::Int(
                a.checked_sub(b)
                    .ok_or(EvalError::ArithmeticError(".-"))?,
            ),
            (a, b) => Num::Float(a.as_f64() - b.as_f64()),
        };
    }
    ok(match acc {
        Num::Int(n) => Value::int(n),
        Num::Float(n) => Value::float(n),
    })
}

/// (./ n n*) — division; a single argument is its reciprocal. Integer
/// division truncates; any float operand promotes the whole chain.
pub(crate) fn host_div(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::arity_at_least("./", 1, 0));
    }
    let mut acc = if args.len() == 1 {
        Num::Int(1)
    } else {
        Num::of("./", &args[0])?
    };
    let divisors = if args.len() == 1 { args } else { &args[1..] };
    for arg in divisors {
        let n = Num::of("./", arg)?;
        acc = match (acc, n) {
            (Num::Int(a), Num::Int(b)) => {
                if b == 0 {
                    return Err(EvalError::DivideByZero);
                }
                Num::Int(a.checked_div(b).ok_or(EvalError::ArithmeticError("./"))?)
            }
            (a, b) => Num::Float(a.as_f64() / b.as_f64()),
        };
    }
    ok(match acc {
        Num::Int(n) => Value::int(n),
        Num::Float(n) => Value::float(n),
    })
}

/// (.quot a b) — integer quotient.
pub(crate) fn host_quot(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".quot", 2, args)?;
    int_pair(".quot", args, |a, b| {
        if b == 0 {
            return Err(EvalError::DivideByZero);
        }
        a.checked_div(b).ok_or(EvalError::ArithmeticError(".quot"))
    })
}

/// (.rem a b) — integer remainder.
pub(crate) fn host_rem(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".rem", 2, args)?;
    int_pair(".rem", args, |a, b| {
        if b == 0 {
            return Err(EvalError::DivideByZero);
        }
        a.checked_rem(b).ok_or(EvalError::ArithmeticError(".rem"))
    })
}

fn int_pair(
    name: &'static str,
    args: &[Value],
    op: impl Fn(i64, i64) -> Result<i64>,
) -> EvalResult {
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => ok(Value::int(op(*a, *b)?)),
        (a, b) => {
            let other = if matches!(a, Value::Int(_)) { b } else { a };
            Err(EvalError::invalid_argument(
                name,
                format!("expected integers, got {}", other.type_name()),
            ))
        }
    }
}

/// (.inc n)
pub(crate) fn host_inc(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".inc", 1, args)?;
    match Num::of(".inc", &args[0])? {
        Num::Int(n) => ok(Value::int(
            n.checked_add(1).ok_or(EvalError::ArithmeticError(".inc"))?,
        )),
        Num::Float(n) => ok(Value::float(n + 1.0)),
    }
}

/// (.dec n)
pub(crate) fn host_dec(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".dec", 1, args)?;
    match Num::of(".dec", &args[0])? {
        Num::Int(n) => ok(Value::int(
            n.checked_sub(1).ok_or(EvalError::ArithmeticError(".dec"))?,
        )),
        Num::Float(n) => ok(Value::float(n - 1.0)),
    }
}
