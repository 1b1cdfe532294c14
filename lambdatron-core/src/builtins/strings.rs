// lambdatron-core - String, identifier, and regex host functions

use std::rc::Rc;

use lambdatron_reader::Value;
use regex::Regex;

use crate::context::Context;
use crate::error::{EvalError, EvalResult, ok};

use super::expect_arity;

/// (.name x) — the name part of a symbol or keyword; strings pass through.
pub(crate) fn host_name(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".name", 1, args)?;
    match &args[0] {
        Value::Symbol(sym) => ok(Value::string(sym.name())),
        Value::Keyword(kw) => ok(Value::string(kw.name())),
        Value::Str(s) => ok(Value::Str(s.clone())),
        other => Err(EvalError::invalid_argument(
            ".name",
            format!(
                "expected a symbol, keyword, or string, got {}",
                other.type_name()
            ),
        )),
    }
}

/// (.namespace x) — the namespace part of a symbol or keyword, or nil.
pub(crate) fn host_namespace(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".namespace", 1, args)?;
    let ns = match &args[0] {
        Value::Symbol(sym) => sym.namespace(),
        Value::Keyword(kw) => kw.namespace(),
        other => {
            return Err(EvalError::invalid_argument(
                ".namespace",
                format!("expected a symbol or keyword, got {}", other.type_name()),
            ));
        }
    };
    ok(ns.map(Value::string).unwrap_or(Value::Nil))
}

/// (.re-pattern s) — compile a string into a regex; regexes pass through.
pub(crate) fn host_re_pattern(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".re-pattern", 1, args)?;
    match &args[0] {
        Value::Regex(re) => ok(Value::Regex(Rc::clone(re))),
        Value::Str(s) => match Regex::new(s) {
            Ok(re) => ok(Value::Regex(Rc::new(re))),
            Err(e) => Err(EvalError::InvalidRegex(e.to_string())),
        },
        other => Err(EvalError::invalid_argument(
            ".re-pattern",
            format!("expected a string or regex, got {}", other.type_name()),
        )),
    }
}

fn regex_and_input<'a>(
    name: &'static str,
    args: &'a [Value],
) -> Result<(&'a Regex, &'a str), EvalError> {
    let re = match &args[0] {
        Value::Regex(re) => re.as_ref(),
        other => {
            return Err(EvalError::invalid_argument(
                name,
                format!("expected a regex, got {}", other.type_name()),
            ));
        }
    };
    let input = match &args[1] {
        Value::Str(s) => s.as_ref(),
        other => {
            return Err(EvalError::invalid_argument(
                name,
                format!("expected a string, got {}", other.type_name()),
            ));
        }
    };
    Ok((re, input))
}

/// A match result: the whole match when the pattern has no capture groups,
/// else a vector of the whole match and each group (nil for non-matching
/// groups).
fn match_value(caps: &regex::Captures<'_>) -> Value {
    if caps.len() == 1 {
        Value::string(caps.get(0).map(|m| m.as_str()).unwrap_or(""))
    } else {
        Value::vector(
            caps.iter()
                .map(|m| match m {
                    Some(m) => Value::string(m.as_str()),
                    None => Value::Nil,
                })
                .collect(),
        )
    }
}

/// (.re-matches re s) — the match if the regex matches the entire string,
/// else nil.
pub(crate) fn host_re_matches(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".re-matches", 2, args)?;
    let (re, input) = regex_and_input(".re-matches", args)?;
    match re.captures(input) {
        Some(caps) if caps.get(0).is_some_and(|m| m.as_str() == input) => ok(match_value(&caps)),
        _ => ok(Value::Nil),
    }
}

/// (.re-find re s) — the first match anywhere in the string, else nil.
pub(crate) fn host_re_find(args: &[Value], _ctx: &Context) -> EvalResult {
    expect_arity(".re-find", 2, args)?;
    let (re, input) = regex_and_input(".re-find", args)?;
    match re.captures(input) {
        Some(caps) => ok(match_value(&caps)),
        None => ok(Value::Nil),
    }
}
