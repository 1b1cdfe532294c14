// lambdatron-core - AST-walking evaluator

//! AST-walking evaluator for Lambdatron expressions.
//!
//! Dispatch follows the form's tag: atoms evaluate to themselves, symbols
//! resolve through the lexical frames and then the namespace system,
//! collections evaluate their elements, and seqs evaluate their head and
//! dispatch on it — special forms get unevaluated operands, macros expand
//! once and re-evaluate, functions and builtins apply to evaluated
//! arguments.

pub mod apply;

pub use apply::{HostFnImpl, apply as apply_value, apply_closure, make_host_fn};

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use lambdatron_reader::{Closure, FnArity, SpecialTag, Symbol, Value, VarSlot};

use crate::context::Context;
use crate::error::{EvalError, EvalResult, Flow, Result, ok};
use crate::seq;

// ============================================================================
// Stack overflow protection
// ============================================================================

/// Maximum recursion depth for eval. Configurable via `set_max_eval_depth`.
const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard for the eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            (current, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(EvalError::runtime(format!(
                "Stack overflow: maximum recursion depth ({}) exceeded",
                max
            )))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// Evaluate a form in the given context.
///
/// Returns the full [`EvalResult`]: a value, the `recur` sentinel (only
/// meaningful when this call sits in the tail of a `fn` or `loop` body), or
/// a failure.
pub fn eval(form: &Value, ctx: &Context) -> EvalResult {
    let _guard = EvalDepthGuard::new()?;

    match form {
        // Atoms evaluate to themselves. Note Vars do too: dereferencing
        // happens during symbol resolution, not here.
        Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Char(_)
        | Value::Str(_)
        | Value::Keyword(_)
        | Value::Var(_)
        | Value::Fn(_)
        | Value::Macro(_)
        | Value::Special(_)
        | Value::Builtin(_)
        | Value::Regex(_) => ok(form.clone()),

        Value::Symbol(sym) => resolve_symbol(sym, ctx).map(Flow::Value),

        Value::Vector(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items.iter() {
                out.push(eval_value(item, ctx)?);
            }
            ok(Value::vector(out))
        }

        // Keys and values evaluate left-to-right; duplicate resolved keys
        // overwrite.
        Value::Map(map) => {
            let mut out = Vec::with_capacity(map.len());
            for (k, v) in map.iter() {
                out.push((eval_value(k, ctx)?, eval_value(v, ctx)?));
            }
            ok(Value::map(out))
        }

        Value::Seq(s) => {
            let items = seq::to_vec(s)?;
            if items.is_empty() {
                return ok(Value::empty_seq());
            }
            eval_call(&items, ctx)
        }
    }
}

/// Evaluate in a non-tail position: a stray `recur` sentinel here is a
/// `RecurMisuse` error.
pub fn eval_value(form: &Value, ctx: &Context) -> Result<Value> {
    eval(form, ctx)?.into_value()
}

/// Resolve a symbol: lexical frames deepest-first, then the current
/// namespace's Vars, referred Vars, and aliases. A bound Var resolves to its
/// value; an unbound Var resolves to the Var itself.
fn resolve_symbol(sym: &Symbol, ctx: &Context) -> Result<Value> {
    if let Some(val) = ctx.lookup(sym) {
        return Ok(val);
    }
    match ctx.registry().resolve(sym) {
        Some(var) => match var.slot() {
            VarSlot::Bound(v) => Ok(v),
            VarSlot::Unbound => Ok(Value::Var(var)),
        },
        None => Err(EvalError::InvalidSymbol(sym.clone())),
    }
}

/// Evaluate a non-empty seq form: evaluate the head and dispatch on it.
fn eval_call(items: &[Value], ctx: &Context) -> EvalResult {
    let head = eval_value(&items[0], ctx)?;
    let args = &items[1..];

    match head {
        Value::Special(tag) => eval_special(tag, args, ctx),
        Value::Macro(closure) => {
            // One level of expansion, then evaluate the result here.
            let expanded = apply_closure(&closure, args)?;
            eval(&expanded, ctx)
        }
        Value::Fn(_) | Value::Builtin(_) => {
            let mut evaluated = Vec::with_capacity(args.len());
            for arg in args {
                evaluated.push(eval_value(arg, ctx)?);
            }
            apply::apply(&head, &evaluated, ctx).map(Flow::Value)
        }
        other => Err(EvalError::NotEvalable(format!(
            "{} ({})",
            other,
            other.type_name()
        ))),
    }
}

// ============================================================================
// Special forms
// ============================================================================

fn eval_special(tag: SpecialTag, args: &[Value], ctx: &Context) -> EvalResult {
    match tag {
        SpecialTag::Quote => eval_quote(args),
        SpecialTag::If => eval_if(args, ctx),
        SpecialTag::Do => eval_do(args, ctx),
        SpecialTag::Def => eval_def(args, ctx),
        SpecialTag::Let => eval_let(args, ctx),
        SpecialTag::Var => eval_var(args, ctx),
        SpecialTag::Fn => eval_fn(args, ctx),
        SpecialTag::Defmacro => eval_defmacro(args, ctx),
        SpecialTag::Loop => eval_loop(args, ctx),
        SpecialTag::Recur => eval_recur(args, ctx),
        SpecialTag::Apply => eval_apply(args, ctx),
        SpecialTag::Attempt => eval_attempt(args, ctx),
    }
}

/// (quote x) — return x unevaluated; zero arguments yield nil.
fn eval_quote(args: &[Value]) -> EvalResult {
    ok(args.first().cloned().unwrap_or(Value::Nil))
}

/// (if test then else?) — falsy is nil or false, everything else truthy.
/// Both branches are tail positions.
fn eval_if(args: &[Value], ctx: &Context) -> EvalResult {
    if args.len() < 2 || args.len() > 3 {
        return Err(EvalError::arity_range("if", 2, 3, args.len()));
    }
    let test = eval_value(&args[0], ctx)?;
    if test.is_truthy() {
        eval(&args[1], ctx)
    } else if args.len() == 3 {
        eval(&args[2], ctx)
    } else {
        ok(Value::Nil)
    }
}

/// (do e*) — evaluate left-to-right, return the last. Only the last form is
/// a tail position; `recur` anywhere else is a misuse.
fn eval_do(args: &[Value], ctx: &Context) -> EvalResult {
    let mut result = Flow::Value(Value::Nil);
    for (i, expr) in args.iter().enumerate() {
        if i + 1 == args.len() {
            result = eval(expr, ctx)?;
        } else {
            eval_value(expr, ctx)?;
        }
    }
    Ok(result)
}

/// The symbol a `def`/`defmacro` binds. Qualified symbols must match the
/// current namespace.
fn def_target(form_name: &'static str, arg: &Value, ctx: &Context) -> Result<Symbol> {
    let sym = match arg {
        Value::Symbol(sym) => sym.clone(),
        other => {
            return Err(EvalError::invalid_argument(
                form_name,
                format!("first argument must be a symbol, got {}", other.type_name()),
            ));
        }
    };
    if let Some(ns) = sym.namespace() {
        let current = ctx.registry().current_name();
        if ns != &*current {
            return Err(EvalError::QualifiedSymbolMisuse(sym));
        }
    }
    Ok(sym)
}

/// (def sym init?) — intern or rebind sym in the current namespace. With an
/// init form, evaluate then assign; without one, mark the slot unbound.
/// Returns the Var.
fn eval_def(args: &[Value], ctx: &Context) -> EvalResult {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::arity_range("def", 1, 2, args.len()));
    }
    let sym = def_target("def", &args[0], ctx)?;
    let current_ns = ctx.registry().current();
    if args.len() == 2 {
        let val = eval_value(&args[1], ctx)?;
        let var = current_ns.set_var(sym.name_interned(), val);
        ok(Value::Var(var))
    } else {
        let var = current_ns.intern(sym.name_interned());
        var.unbind();
        ok(Value::Var(var))
    }
}

/// Parse a `[b₁ v₁ …]` binding vector into (symbol, form) pairs. Binding
/// names must be unqualified symbols and the vector even-length.
fn binding_pairs<'a>(
    form_name: &'static str,
    arg: &'a Value,
) -> Result<Vec<(Symbol, &'a Value)>> {
    let items = match arg {
        Value::Vector(items) => items,
        other => {
            return Err(EvalError::bindings(
                form_name,
                format!("expected a binding vector, got {}", other.type_name()),
            ));
        }
    };
    if items.len() % 2 != 0 {
        return Err(EvalError::bindings(
            form_name,
            "binding vector must have an even number of forms",
        ));
    }
    let mut pairs = Vec::with_capacity(items.len() / 2);
    let mut iter = items.iter();
    while let (Some(name), Some(init)) = (iter.next(), iter.next()) {
        match name {
            Value::Symbol(sym) if !sym.is_qualified() => pairs.push((sym.clone(), init)),
            other => {
                return Err(EvalError::bindings(
                    form_name,
                    format!("binding name must be an unqualified symbol, got {}", other),
                ));
            }
        }
    }
    Ok(pairs)
}

/// (let [b₁ v₁ …] body*) — each init form is evaluated in the scope
/// accumulated so far; the body is an implicit do.
fn eval_let(args: &[Value], ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::bindings("let", "missing binding vector"));
    }
    let pairs = binding_pairs("let", &args[0])?;
    let let_ctx = ctx.child();
    for (sym, init) in pairs {
        let val = eval_value(init, &let_ctx)?;
        let_ctx.define(&sym, val);
    }
    eval_do(&args[1..], &let_ctx)
}

/// (var sym) — resolve sym to its Var without dereferencing.
fn eval_var(args: &[Value], ctx: &Context) -> EvalResult {
    if args.len() != 1 {
        return Err(EvalError::arity_named("var", 1, args.len()));
    }
    let sym = match &args[0] {
        Value::Symbol(sym) => sym,
        other => {
            return Err(EvalError::invalid_argument(
                "var",
                format!("expected a symbol, got {}", other.type_name()),
            ));
        }
    };
    match ctx.registry().resolve(sym) {
        Some(var) => ok(Value::Var(var)),
        None => Err(EvalError::InvalidSymbol(sym.clone())),
    }
}

/// (fn name? [params…] body*) or (fn name? ([…] body*)+) — build a closure
/// capturing the current context.
fn eval_fn(args: &[Value], ctx: &Context) -> EvalResult {
    let (name, arities) = parse_fn_form("fn", args)?;
    let env: Rc<dyn Any> = Rc::new(ctx.clone());
    ok(Value::Fn(Closure::new(name, arities, env)))
}

/// (defmacro name [params…] body*) — as fn, but bound into a Var as a macro.
/// Returns the Var.
fn eval_defmacro(args: &[Value], ctx: &Context) -> EvalResult {
    if args.len() < 2 {
        return Err(EvalError::arity_at_least("defmacro", 2, args.len()));
    }
    let sym = def_target("defmacro", &args[0], ctx)?;
    let (_, arities) = parse_fn_form("defmacro", &args[1..])?;
    let env: Rc<dyn Any> = Rc::new(ctx.clone());
    let closure = Closure::new(Some(sym.clone()), arities, env);
    let var = ctx
        .registry()
        .current()
        .set_var(sym.name_interned(), Value::Macro(closure));
    ok(Value::Var(var))
}

/// Parse the shared fn/defmacro shape: optional name, then either a single
/// `[params…] body*` arity or one or more `([params…] body*)` lists.
fn parse_fn_form(
    form_name: &'static str,
    args: &[Value],
) -> Result<(Option<Symbol>, Vec<FnArity>)> {
    let (name, rest) = match args.first() {
        Some(Value::Symbol(sym)) => (Some(sym.clone()), &args[1..]),
        _ => (None, args),
    };
    if rest.is_empty() {
        return Err(EvalError::invalid_argument(
            form_name,
            "missing parameter vector",
        ));
    }

    let arities = match &rest[0] {
        Value::Vector(_) => vec![parse_arity(form_name, &rest[0], &rest[1..])?],
        Value::Seq(_) => {
            let mut arities = Vec::with_capacity(rest.len());
            for form in rest {
                let items = match form {
                    Value::Seq(s) => s.realized_elements().unwrap_or_default(),
                    other => {
                        return Err(EvalError::invalid_argument(
                            form_name,
                            format!(
                                "each arity must be a list like ([params] body), got {}",
                                other.type_name()
                            ),
                        ));
                    }
                };
                if items.is_empty() {
                    return Err(EvalError::invalid_argument(
                        form_name,
                        "arity is missing its parameter vector",
                    ));
                }
                arities.push(parse_arity(form_name, &items[0], &items[1..])?);
            }
            arities
        }
        other => {
            return Err(EvalError::invalid_argument(
                form_name,
                format!(
                    "expected a parameter vector or arity lists, got {}",
                    other.type_name()
                ),
            ));
        }
    };

    validate_arities(form_name, &arities)?;
    Ok((name, arities))
}

/// Parse one parameter vector plus body. `&` in the penultimate position
/// marks the final symbol as the variadic parameter.
fn parse_arity(form_name: &'static str, params_form: &Value, body: &[Value]) -> Result<FnArity> {
    let items = match params_form {
        Value::Vector(items) => items,
        other => {
            return Err(EvalError::invalid_argument(
                form_name,
                format!("expected a parameter vector, got {}", other.type_name()),
            ));
        }
    };

    let mut params = Vec::with_capacity(items.len());
    let mut rest_param = None;
    let mut i = 0;
    let vec: Vec<Value> = items.iter().cloned().collect();
    while i < vec.len() {
        let sym = match &vec[i] {
            Value::Symbol(sym) if !sym.is_qualified() => sym.clone(),
            other => {
                return Err(EvalError::bindings(
                    form_name,
                    format!("parameter must be an unqualified symbol, got {}", other),
                ));
            }
        };
        if sym.name() == "&" {
            if i + 2 != vec.len() {
                return Err(EvalError::bindings(
                    form_name,
                    "& must be followed by exactly one parameter",
                ));
            }
            match &vec[i + 1] {
                Value::Symbol(rest) if !rest.is_qualified() && rest.name() != "&" => {
                    rest_param = Some(rest.clone());
                }
                other => {
                    return Err(EvalError::bindings(
                        form_name,
                        format!("variadic parameter must be a symbol, got {}", other),
                    ));
                }
            }
            break;
        }
        params.push(sym);
        i += 1;
    }

    Ok(FnArity::new(params, rest_param, body.to_vec()))
}

/// At most one arity per fixed count, at most one variadic arity, and the
/// variadic arity's fixed-parameter count must be ≥ every other fixed count.
fn validate_arities(form_name: &'static str, arities: &[FnArity]) -> Result<()> {
    let mut fixed_counts: Vec<usize> = arities
        .iter()
        .filter(|a| a.rest_param.is_none())
        .map(|a| a.params.len())
        .collect();
    fixed_counts.sort_unstable();
    let deduped = fixed_counts.len();
    fixed_counts.dedup();
    if fixed_counts.len() != deduped {
        return Err(EvalError::invalid_argument(
            form_name,
            "two arities share the same fixed parameter count",
        ));
    }

    let variadics: Vec<&FnArity> = arities.iter().filter(|a| a.rest_param.is_some()).collect();
    if variadics.len() > 1 {
        return Err(EvalError::invalid_argument(
            form_name,
            "only one variadic arity is allowed",
        ));
    }
    if let Some(variadic) = variadics.first()
        && let Some(&max_fixed) = fixed_counts.iter().max()
        && variadic.params.len() < max_fixed
    {
        return Err(EvalError::invalid_argument(
            form_name,
            "the variadic arity must have at least as many fixed parameters as any other arity",
        ));
    }
    Ok(())
}

/// (loop [b₁ v₁ …] body*) — like let, but the body is a recur target. The
/// trampoline is a plain Rust loop, so recursion depth stays constant on the
/// host stack.
fn eval_loop(args: &[Value], ctx: &Context) -> EvalResult {
    if args.is_empty() {
        return Err(EvalError::bindings("loop", "missing binding vector"));
    }
    let pairs = binding_pairs("loop", &args[0])?;
    let body = &args[1..];

    // Initial values evaluate sequentially, like let.
    let init_ctx = ctx.child();
    let mut names = Vec::with_capacity(pairs.len());
    let mut values = Vec::with_capacity(pairs.len());
    for (sym, init) in pairs {
        let val = eval_value(init, &init_ctx)?;
        init_ctx.define(&sym, val.clone());
        names.push(sym);
        values.push(val);
    }

    loop {
        let loop_ctx = ctx.child();
        for (sym, val) in names.iter().zip(values.iter()) {
            loop_ctx.define(sym, val.clone());
        }
        match eval_do(body, &loop_ctx)? {
            Flow::Value(v) => return ok(v),
            Flow::Recur(new_values) => {
                if new_values.len() != names.len() {
                    return Err(EvalError::arity_named(
                        "recur",
                        names.len(),
                        new_values.len(),
                    ));
                }
                values = new_values;
            }
        }
    }
}

/// (recur arg*) — evaluate the arguments and produce the recur sentinel.
fn eval_recur(args: &[Value], ctx: &Context) -> EvalResult {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval_value(arg, ctx)?);
    }
    Ok(Flow::Recur(values))
}

/// (apply f a₁ … aₙ coll) — prepend a₁…aₙ to the elements of coll and
/// invoke f. coll may be nil, a seq, a vector, or a map (flattened to
/// `[k v]` pairs).
fn eval_apply(args: &[Value], ctx: &Context) -> EvalResult {
    if args.len() < 2 {
        return Err(EvalError::arity_at_least("apply", 2, args.len()));
    }
    let func = eval_value(&args[0], ctx)?;
    let mut call_args = Vec::new();
    for arg in &args[1..args.len() - 1] {
        call_args.push(eval_value(arg, ctx)?);
    }
    let coll = eval_value(&args[args.len() - 1], ctx)?;
    match &coll {
        Value::Nil | Value::Seq(_) | Value::Vector(_) | Value::Map(_) => {
            let spread = seq::seq_of(&coll)
                .ok_or_else(|| EvalError::invalid_argument("apply", "uncollectable argument"))?;
            call_args.extend(seq::to_vec(&spread)?);
        }
        other => {
            return Err(EvalError::invalid_argument(
                "apply",
                format!(
                    "last argument must be nil, a seq, a vector, or a map, got {}",
                    other.type_name()
                ),
            ));
        }
    }
    apply::apply(&func, &call_args, ctx).map(Flow::Value)
}

/// (attempt e*) — evaluate left-to-right, returning the first success; if
/// every form fails, return the last failure. No forms is a vacuous success.
fn eval_attempt(args: &[Value], ctx: &Context) -> EvalResult {
    let mut last_err = None;
    for expr in args {
        match eval(expr, ctx) {
            Ok(flow) => return Ok(flow),
            Err(e) => last_err = Some(e),
        }
    }
    match last_err {
        Some(e) => Err(e),
        None => ok(Value::Nil),
    }
}

// ============================================================================
// Tests
// ============================================================================
