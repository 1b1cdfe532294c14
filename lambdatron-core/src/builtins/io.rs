// lambdatron-core - Printing host functions

//! Printing host functions. Everything the `.print` family emits goes
//! through the interpreter's output hook.

use lambdatron_reader::Value;

use crate::context::Context;
use crate::error::{EvalResult, ok};

/// Render a value for `.str`/`.print`: strings and characters unquoted,
/// nil as the empty string, everything else in its readable form.
fn unquoted(value: &Value) -> String {
    match value {
        Value::Nil => String::new(),
        Value::Str(s) => s.to_string(),
        Value::Char(c) => c.to_string(),
        other => other.to_string(),
    }
}

/// (.str x*) — concatenate the unquoted renderings of the arguments.
pub(crate) fn host_str(args: &[Value], _ctx: &Context) -> EvalResult {
    let mut out = String::new();
    for arg in args {
        out.push_str(&unquoted(arg));
    }
    ok(Value::string(out))
}

/// (.pr-str x*) — readable renderings joined by spaces.
pub(crate) fn host_pr_str(args: &[Value], _ctx: &Context) -> EvalResult {
    let parts: Vec<String> = args.iter().map(|v| v.to_string()).collect();
    ok(Value::string(parts.join(" ")))
}

/// (.print x*) — write unquoted renderings joined by spaces.
pub(crate) fn host_print(args: &[Value], ctx: &Context) -> EvalResult {
    let parts: Vec<String> = args.iter().map(unquoted).collect();
    ctx.write_output(&parts.join(" "));
    ok(Value::Nil)
}

/// (.println x*) — like .print, with a trailing newline.
pub(crate) fn host_println(args: &[Value], ctx: &Context) -> EvalResult {
    let parts: Vec<String> = args.iter().map(unquoted).collect();
    ctx.write_output(&parts.join(" "));
    ctx.write_output("\n");
    ok(Value::Nil)
}
