// lambdatron-core - Sequence host functions

//! Sequence host functions: construction, traversal, and the lazy-seq
//! primitive the `lazy-seq` macro bottoms out in.

use lambdatron_reader::{Seq, SeqView, Value};

use crate::context::Context;
use crate::error::{EvalError, EvalResult, ok};
use crate::seq;

use super::expect_arity;

fn as_seq(name: &'static str, value: &Value) -> Result<Seq, EvalError> {
    seq::seq_of(value).ok_or_else(|| {
        EvalError::invalid_argument(
            name,
            format!("expected a seqable collection, got {}", value.type_name()),
        )
    })
}

/// (.cons x coll) — prepend to the seq of coll without forcing it.
pub(crate) fn host_cons(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".cons", 2, args)?;
    let rest = as_seq(".cons", &args[1])?;
    ok(Value::Seq(Seq::cons(args[0].clone(), rest)))
}

/// (.first coll) — the head, or nil when empty.
pub(crate) fn host_first(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".first", 1, args)?;
    let s = as_seq(".first", &args[0])?;
    match seq::force(&s)? {
        SeqView::Empty => ok(Value::Nil),
        SeqView::Cons(head, _) => ok(head),
    }
}

/// (.rest coll) — everything after the head; the empty seq when exhausted.
pub(crate) fn host_rest(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".rest", 1, args)?;
    let s = as_seq(".rest", &args[0])?;
    match seq::force(&s)? {
        SeqView::Empty => ok(Value::empty_seq()),
        SeqView::Cons(_, tail) => ok(Value::Seq(tail)),
    }
}

/// (.next coll) — like .rest but nil when nothing remains.
pub(crate) fn host_next(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".next", 1, args)?;
    let s = as_seq(".next", &args[0])?;
    match seq::force(&s)? {
        SeqView::Empty => ok(Value::Nil),
        SeqView::Cons(_, tail) => match seq::force(&tail)? {
            SeqView::Empty => ok(Value::Nil),
            SeqView::Cons(_, _) => ok(Value::Seq(tail)),
        },
    }
}

/// (.seq coll) — view a collection as a seq. The empty collection yields the
/// canonical empty seq.
pub(crate) fn host_seq(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".seq", 1, args)?;
    ok(Value::Seq(as_seq(".seq", &args[0])?))
}

/// (.concat coll*) — eager concatenation of the given collections into one
/// seq. (The lazy `concat` in the standard library builds on this only for
/// already-realised inputs such as syntax-quote expansions.)
pub(crate) fn host_concat(args: &[Value], _ctx: &Context) -> EvalResult {
    let mut out = Vec::new();
    for arg in args {
        let s = as_seq(".concat", arg)?;
        out.extend(seq::to_vec(&s)?);
    }
    ok(Value::Seq(Seq::from_vec(out)))
}

/// (.lazy-seq thunk) — wrap a zero-argument function as an unforced lazy
/// seq. Forcing runs the thunk at most once.
pub(crate) fn host_lazy_seq(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".lazy-seq", 1, args)?;
    match &args[0] {
        Value::Fn(closure) => ok(Value::Seq(Seq::lazy(closure.clone()))),
        other => Err(EvalError::invalid_argument(
            ".lazy-seq",
            format!("expected a function, got {}", other.type_name()),
        )),
    }
}
