// lambdatron-core - Function application

//! Function application: arity dispatch, parameter binding, the fn-level
//! `recur` trampoline, and host-function invocation.

use std::any::Any;
use std::rc::Rc;

use lambdatron_reader::{Closure, FnArity, HostFn, Seq, Value};

use super::{eval, eval_value};
use crate::context::Context;
use crate::error::{AritySpec, EvalError, EvalResult, Flow, Result};

/// Concrete signature of a host function implementation.
pub type HostFnImpl = dyn Fn(&[Value], &Context) -> EvalResult;

/// Create a host function value from a Rust closure.
pub fn make_host_fn(
    name: impl Into<Rc<str>>,
    func: impl Fn(&[Value], &Context) -> EvalResult + 'static,
) -> HostFn {
    let func_rc: Rc<HostFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    HostFn::new(name, func_any)
}

/// Apply a callable value to already-evaluated arguments.
pub fn apply(func: &Value, args: &[Value], ctx: &Context) -> Result<Value> {
    match func {
        Value::Fn(closure) => apply_closure(closure, args),
        Value::Builtin(host) => apply_host(host, args, ctx),
        other => Err(EvalError::NotEvalable(format!(
            "{} ({})",
            other,
            other.type_name()
        ))),
    }
}

/// Apply a user-defined closure.
///
/// Selects the arity for the initial argument count, binds parameters in a
/// fresh lexical scope under the closure's captured context, and evaluates
/// the body. A `Recur` from the body's tail re-enters the binding step of
/// the same arity — a plain loop, so tail recursion runs in constant host
/// stack.
pub fn apply_closure(closure: &Closure, args: &[Value]) -> Result<Value> {
    let arity = closure
        .find_arity(args.len())
        .ok_or_else(|| arity_error(closure, args.len()))?;

    let captured = closure
        .env
        .downcast_ref::<Context>()
        .ok_or_else(|| EvalError::runtime("function captured an invalid context"))?;

    let mut current_args: Vec<Value> = args.to_vec();
    loop {
        if !arity.matches(current_args.len()) {
            return Err(EvalError::arity_named(
                "recur",
                arity.params.len(),
                current_args.len(),
            ));
        }

        let fn_ctx = captured.child();
        if let Some(name) = &closure.name {
            fn_ctx.define(name, Value::Fn(closure.clone()));
        }
        bind_arity(arity, &current_args, &fn_ctx);

        match eval_body(&arity.body, &fn_ctx)? {
            Flow::Value(v) => return Ok(v),
            Flow::Recur(new_args) => current_args = new_args,
        }
    }
}

/// Evaluate body forms as an implicit do: only the last form is a tail
/// position.
fn eval_body(body: &[Value], ctx: &Context) -> EvalResult {
    let mut result = Flow::Value(Value::Nil);
    for (i, expr) in body.iter().enumerate() {
        if i + 1 == body.len() {
            result = eval(expr, ctx)?;
        } else {
            eval_value(expr, ctx)?;
        }
    }
    Ok(result)
}

/// Bind fixed parameters positionally; the variadic parameter gets a seq
/// (possibly empty) of the remaining arguments.
fn bind_arity(arity: &FnArity, args: &[Value], fn_ctx: &Context) {
    for (param, arg) in arity.params.iter().zip(args.iter()) {
        fn_ctx.define(param, arg.clone());
    }
    if let Some(rest) = &arity.rest_param {
        let rest_args: Vec<Value> = args[arity.params.len()..].to_vec();
        fn_ctx.define(rest, Value::Seq(Seq::from_vec(rest_args)));
    }
}

/// Apply a host function. A stray `Recur` coming back from a host call is
/// not a legal tail value, so it converts to `RecurMisuse`.
pub fn apply_host(host: &HostFn, args: &[Value], ctx: &Context) -> Result<Value> {
    let f = host
        .func()
        .downcast_ref::<Rc<HostFnImpl>>()
        .ok_or_else(|| EvalError::runtime("host function has an invalid implementation type"))?;
    f(args, ctx)?.into_value()
}

fn arity_error(closure: &Closure, got: usize) -> EvalError {
    let name = closure
        .name
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "fn".to_string());
    let variadic_min = closure
        .arities()
        .iter()
        .filter(|a| a.rest_param.is_some())
        .map(|a| a.params.len())
        .min();
    match variadic_min {
        Some(min) => EvalError::Arity {
            expected: AritySpec::AtLeast(min),
            got,
            name: Some(name),
        },
        None => {
            let counts: Vec<usize> = closure.arities().iter().map(|a| a.params.len()).collect();
            let expected = match (counts.iter().min(), counts.iter().max()) {
                (Some(&min), Some(&max)) if min != max => AritySpec::Range(min, max),
                (Some(&only), _) => AritySpec::Exact(only),
                _ => AritySpec::Exact(0),
            };
            EvalError::Arity {
                expected,
                got,
                name: Some(name),
            }
        }
    }
}
