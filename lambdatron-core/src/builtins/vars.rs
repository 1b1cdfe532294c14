// lambdatron-core - Var host functions

use lambdatron_reader::Value;

use crate::context::Context;
use crate::error::{EvalError, EvalResult, ok};

use super::expect_arity;

/// (.deref var) — the Var's bound value. Dereferencing an unbound Var is an
/// error; `@x` lowers to this call.
pub(crate) fn host_deref(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".deref", 1, args)?;
    match &args[0] {
        Value::Var(var) => match var.value() {
            Some(v) => ok(v),
            None => Err(EvalError::UnboundVar(var.qualified_name())),
        },
        other => Err(EvalError::invalid_argument(
            ".deref",
            format!("expected a var, got {}", other.type_name()),
        )),
    }
}
