// lambdatron-core - Collection host functions

//! Collection host functions over vectors, maps, and seqs.
//!
//! Persistent semantics throughout: operations return new collections and
//! never mutate their inputs.

use lambdatron_reader::{SeqView, Value};

use crate::context::Context;
use crate::error::{EvalError, EvalResult, Result, ok};
use crate::seq;

use super::expect_arity;

/// (.list x*) — a seq of the arguments.
pub(crate) fn host_list(args: &[Value], _ctx: &Context) -> EvalResult {
    ok(Value::list(args.to_vec()))
}

/// (.vector x*) — a vector of the arguments.
pub(crate) fn host_vector(args: &[Value], _ctx: &Context) -> EvalResult {
    ok(Value::vector(args.to_vec()))
}

/// (.vec coll) — realise a collection into a vector.
pub(crate) fn host_vec(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".vec", 1, args)?;
    let s = seq::seq_of(&args[0]).ok_or_else(|| {
        EvalError::invalid_argument(
            ".vec",
            format!("expected a collection, got {}", args[0].type_name()),
        )
    })?;
    ok(Value::vector(seq::to_vec(&s)?))
}

/// (.hash-map k v …) — a map from alternating keys and values.
pub(crate) fn host_hash_map(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.len() % 2 != 0 {
        return Err(EvalError::invalid_argument(
            ".hash-map",
            "expected an even number of arguments",
        ));
    }
    let pairs = args
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    ok(Value::map(pairs))
}

/// (.map-from-seq coll) — a map from a flat seq of alternating keys and
/// values.
pub(crate) fn host_map_from_seq(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".map-from-seq", 1, args)?;
    let s = seq::seq_of(&args[0]).ok_or_else(|| {
        EvalError::invalid_argument(
            ".map-from-seq",
            format!("expected a collection, got {}", args[0].type_name()),
        )
    })?;
    let flat = seq::to_vec(&s)?;
    if flat.len() % 2 != 0 {
        return Err(EvalError::invalid_argument(
            ".map-from-seq",
            "expected an even number of elements",
        ));
    }
    let pairs = flat
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    ok(Value::map(pairs))
}

/// A vector index for an indexed operation, bounds-checked against
/// `0..=max`.
fn vector_index(value: &Value, max: usize) -> Result<usize> {
    let raw = match value {
        Value::Int(n) => *n,
        other => {
            return Err(EvalError::invalid_argument(
                ".assoc",
                format!("vector index must be an integer, got {}", other.type_name()),
            ));
        }
    };
    if raw < 0 || raw as usize > max {
        return Err(EvalError::OutOfBounds {
            index: raw,
            length: max,
        });
    }
    Ok(raw as usize)
}

/// (.assoc coll k v …) — on a map, insert or replace the keys; on a vector,
/// replace indices (an index equal to the length appends). Returns a new
/// collection; nil starts an empty map.
pub(crate) fn host_assoc(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.len() < 3 || args.len() % 2 != 1 {
        return Err(EvalError::invalid_argument(
            ".assoc",
            "expected a collection and key-value pairs",
        ));
    }
    match &args[0] {
        Value::Map(map) => {
            let mut out = map.clone();
            for pair in args[1..].chunks(2) {
                out.insert(pair[0].clone(), pair[1].clone());
            }
            ok(Value::Map(out))
        }
        Value::Nil => {
            let pairs = args[1..]
                .chunks(2)
                .map(|pair| (pair[0].clone(), pair[1].clone()))
                .collect();
            ok(Value::map(pairs))
        }
        Value::Vector(items) => {
            let mut out = items.clone();
            for pair in args[1..].chunks(2) {
                let idx = vector_index(&pair[0], out.len())?;
                if idx == out.len() {
                    out.push_back(pair[1].clone());
                } else {
                    out.set(idx, pair[1].clone());
                }
            }
            ok(Value::Vector(out))
        }
        other => Err(EvalError::invalid_argument(
            ".assoc",
            format!("expected a map or vector, got {}", other.type_name()),
        )),
    }
}

/// (.dissoc map k*) — remove keys from a map.
pub(crate) fn host_dissoc(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::arity_at_least(".dissoc", 1, 0));
    }
    match &args[0] {
        Value::Map(map) => {
            let mut out = map.clone();
            for key in &args[1..] {
                out.remove(key);
            }
            ok(Value::Map(out))
        }
        Value::Nil => ok(Value::Nil),
        other => Err(EvalError::invalid_argument(
            ".dissoc",
            format!("expected a map, got {}", other.type_name()),
        )),
    }
}

/// (.get coll k default?) — map lookup or vector index; missing yields the
/// default (or nil).
pub(crate) fn host_get(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.len() < 2 || args.len() > 3 {
        return Err(EvalError::arity_range(".get", 2, 3, args.len()));
    }
    let missing = || args.get(2).cloned().unwrap_or(Value::Nil);
    match &args[0] {
        Value::Map(map) => ok(map.get(&args[1]).cloned().unwrap_or_else(missing)),
        Value::Vector(items) => match &args[1] {
            Value::Int(n) if *n >= 0 && (*n as usize) < items.len() => {
                ok(items[*n as usize].clone())
            }
            _ => ok(missing()),
        },
        _ => ok(missing()),
    }
}

/// (.contains? coll k) — key membership for maps, index membership for
/// vectors.
pub(crate) fn host_contains(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".contains?", 2, args)?;
    match &args[0] {
        Value::Map(map) => ok(Value::bool(map.contains_key(&args[1]))),
        Value::Vector(items) => match &args[1] {
            Value::Int(n) => ok(Value::bool(*n >= 0 && (*n as usize) < items.len())),
            _ => ok(Value::bool(false)),
        },
        Value::Nil => ok(Value::bool(false)),
        other => Err(EvalError::invalid_argument(
            ".contains?",
            format!("expected a map or vector, got {}", other.type_name()),
        )),
    }
}

/// (.keys map) — a seq of the map's keys, in no particular order.
pub(crate) fn host_keys(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".keys", 1, args)?;
    match &args[0] {
        Value::Map(map) => ok(Value::list(map.keys().cloned().collect())),
        Value::Nil => ok(Value::empty_seq()),
        other => Err(EvalError::invalid_argument(
            ".keys",
            format!("expected a map, got {}", other.type_name()),
        )),
    }
}

/// (.vals map) — a seq of the map's values, in no particular order.
pub(crate) fn host_vals(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".vals", 1, args)?;
    match &args[0] {
        Value::Map(map) => ok(Value::list(map.values().cloned().collect())),
        Value::Nil => ok(Value::empty_seq()),
        other => Err(EvalError::invalid_argument(
            ".vals",
            format!("expected a map, got {}", other.type_name()),
        )),
    }
}

/// (.count coll) — number of elements. Fully realises seqs.
pub(crate) fn host_count(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".count", 1, args)?;
    let n = match &args[0] {
        Value::Nil => 0,
        Value::Vector(items) => items.len(),
        Value::Map(map) => map.len(),
        Value::Str(s) => s.chars().count(),
        Value::Seq(s) => seq::to_vec(s)?.len(),
        other => {
            return Err(EvalError::invalid_argument(
                ".count",
                format!("expected a collection, got {}", other.type_name()),
            ));
        }
    };
    ok(Value::int(n as i64))
}

/// (.nth coll i) — indexed access; walking a seq forces it up to i.
pub(crate) fn host_nth(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".nth", 2, args)?;
    let idx = match &args[1] {
        Value::Int(n) => *n,
        other => {
            return Err(EvalError::invalid_argument(
                ".nth",
                format!("index must be an integer, got {}", other.type_name()),
            ));
        }
    };
    match &args[0] {
        Value::Vector(items) => {
            if idx < 0 || idx as usize >= items.len() {
                return Err(EvalError::OutOfBounds {
                    index: idx,
                    length: items.len(),
                });
            }
            ok(items[idx as usize].clone())
        }
        Value::Seq(s) => {
            if idx < 0 {
                return Err(EvalError::OutOfBounds { index: idx, length: 0 });
            }
            let mut current = s.clone();
            let mut remaining = idx as usize;
            let mut walked = 0usize;
            loop {
                match seq::force(&current)? {
                    SeqView::Empty => {
                        return Err(EvalError::OutOfBounds {
                            index: idx,
                            length: walked,
                        });
                    }
                    SeqView::Cons(head, tail) => {
                        if remaining == 0 {
                            return ok(head);
                        }
                        remaining -= 1;
                        walked += 1;
                        current = tail;
                    }
                }
            }
        }
        other => Err(EvalError::invalid_argument(
            ".nth",
            format!("expected an indexed collection, got {}", other.type_name()),
        )),
    }
}

/// (.conj coll x*) — add to a collection at its natural insertion point:
/// vectors at the back, seqs at the front, maps via `[k v]` pair vectors.
/// nil conjures a seq.
pub(crate) fn host_conj(args: &[Value], _ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::arity_at_least(".conj", 1, 0));
    }
    match &args[0] {
        Value::Vector(items) => {
            let mut out = items.clone();
            for x in &args[1..] {
                out.push_back(x.clone());
            }
            ok(Value::Vector(out))
        }
        Value::Seq(s) => {
            let mut out = s.clone();
            for x in &args[1..] {
                out = lambdatron_reader::Seq::cons(x.clone(), out);
            }
            ok(Value::Seq(out))
        }
        Value::Nil => ok(Value::list(args[1..].iter().rev().cloned().collect())),
        Value::Map(map) => {
            let mut out = map.clone();
            for x in &args[1..] {
                match x {
                    Value::Vector(pair) if pair.len() == 2 => {
                        out.insert(pair[0].clone(), pair[1].clone());
                    }
                    other => {
                        return Err(EvalError::invalid_argument(
                            ".conj",
                            format!("expected a [k v] pair, got {}", other.type_name()),
                        ));
                    }
                }
            }
            ok(Value::Map(out))
        }
        other => Err(EvalError::invalid_argument(
            ".conj",
            format!("expected a collection, got {}", other.type_name()),
        )),
    }
}
