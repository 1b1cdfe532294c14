// lambdatron-reader - Reader-macro expansion

//! Reader-macro expansion pass.
//!
//! Runs over the parsed value tree and lowers every reader form except
//! `quote`: `(deref x)` becomes a `.deref` host call, and `(syntax-quote x)`
//! becomes code that constructs the quoted structure out of the `.seq`,
//! `.concat`, `.list`, `.vec` and `.map-from-seq` host functions, with
//! `unquote` / `unquote-splicing` holes left unquoted for evaluation.
//!
//! Unqualified symbols under a syntax-quote are qualified with the namespace
//! they resolve in (falling back to the current namespace); the resolver is
//! supplied by the runtime so this pass stays independent of the namespace
//! system.

use crate::error::{ReadError, ReadErrorKind};
use crate::intern::InternStore;
use crate::symbol::Symbol;
use crate::value::{Seq, SpecialTag, Value};

/// The namespace that host functions and the standard library live in.
pub const CORE_NS: &str = "lambdatron.core";

/// Maps an unqualified name to the namespace it currently resolves in, if
/// any. Supplied by the interpreter.
pub type NsResolver<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Expand all reader macros in a form. After this pass the tree contains
/// only `quote` as a lexical reader form.
pub fn expand(
    form: &Value,
    interns: &InternStore,
    current_ns: &str,
    resolver: NsResolver<'_>,
) -> Result<Value, ReadError> {
    let cx = ExpandCx {
        interns,
        current_ns,
        resolver,
    };
    cx.expand(form)
}

struct ExpandCx<'a> {
    interns: &'a InternStore,
    current_ns: &'a str,
    resolver: NsResolver<'a>,
}

/// Which reader marker a two-element list carries.
fn marker_of(items: &[Value]) -> Option<&'static str> {
    if items.len() != 2 {
        return None;
    }
    match &items[0] {
        Value::Symbol(sym) if !sym.is_qualified() => match sym.name() {
            "syntax-quote" => Some("syntax-quote"),
            "unquote" => Some("unquote"),
            "unquote-splicing" => Some("unquote-splicing"),
            "deref" => Some("deref"),
            _ => None,
        },
        _ => None,
    }
}

fn seq_elements(seq: &Seq) -> Vec<Value> {
    // Parser output is always fully realised.
    seq.realized_elements().unwrap_or_default()
}

impl<'a> ExpandCx<'a> {
    fn core_symbol(&self, name: &str) -> Value {
        Value::symbol(Symbol::with_namespace(self.interns, CORE_NS, name))
    }

    fn expand(&self, form: &Value) -> Result<Value, ReadError> {
        match form {
            Value::Seq(seq) => {
                let items = seq_elements(seq);
                if items.is_empty() {
                    return Ok(form.clone());
                }
                if let Value::Special(SpecialTag::Quote) = items[0] {
                    // (quote x) passes through unchanged.
                    return Ok(form.clone());
                }
                match marker_of(&items) {
                    Some("syntax-quote") => self.expand_syntax_quote(&items[1]),
                    Some("unquote") | Some("unquote-splicing") => {
                        Err(ReadError::expansion(ReadErrorKind::UnquoteMisuse))
                    }
                    Some("deref") => {
                        let inner = self.expand(&items[1])?;
                        Ok(Value::list(vec![
                            Value::symbol(Symbol::new(self.interns, ".deref")),
                            inner,
                        ]))
                    }
                    _ => {
                        let expanded: Result<Vec<_>, _> =
                            items.iter().map(|item| self.expand(item)).collect();
                        Ok(Value::list(expanded?))
                    }
                }
            }
            Value::Vector(items) => {
                let expanded: Result<Vec<_>, _> =
                    items.iter().map(|item| self.expand(item)).collect();
                Ok(Value::vector(expanded?))
            }
            Value::Map(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (k, v) in map.iter() {
                    pairs.push((self.expand(k)?, self.expand(v)?));
                }
                Ok(Value::map(pairs))
            }
            other => Ok(other.clone()),
        }
    }

    /// Expand the body of a `syntax-quote`.
    fn expand_syntax_quote(&self, form: &Value) -> Result<Value, ReadError> {
        match form {
            Value::Symbol(sym) => Ok(self.quote(Value::symbol(self.qualify(sym)))),

            Value::Seq(seq) => {
                let items = seq_elements(seq);
                match marker_of(&items) {
                    // ~e — the hole: e is evaluated in place.
                    Some("unquote") => self.expand(&items[1]),
                    Some("unquote-splicing") => {
                        Err(ReadError::expansion(ReadErrorKind::UnquoteMisuse))
                    }
                    // Nested syntax-quote: expand the inner level first, then
                    // quote its expansion one level up.
                    Some("syntax-quote") => {
                        let inner = self.expand_syntax_quote(&items[1])?;
                        self.expand_syntax_quote(&inner)
                    }
                    _ => {
                        let parts = self.splice_parts(&items)?;
                        Ok(Value::list(vec![
                            self.core_symbol(".seq"),
                            self.concat_call(parts),
                        ]))
                    }
                }
            }

            Value::Vector(items) => {
                let items: Vec<Value> = items.iter().cloned().collect();
                let parts = self.splice_parts(&items)?;
                Ok(Value::list(vec![
                    self.core_symbol(".vec"),
                    self.concat_call(parts),
                ]))
            }

            Value::Map(map) => {
                let mut flat = Vec::with_capacity(map.len() * 2);
                for (k, v) in map.iter() {
                    flat.push(k.clone());
                    flat.push(v.clone());
                }
                let parts = self.splice_parts(&flat)?;
                Ok(Value::list(vec![
                    self.core_symbol(".map-from-seq"),
                    self.concat_call(parts),
                ]))
            }

            // Atoms self-quote; all of these evaluate to themselves.
            other => Ok(other.clone()),
        }
    }

    /// Per-element pieces of a `.concat` call: quoted singletons for plain
    /// elements, the spliced expression itself for `~@e`.
    fn splice_parts(&self, items: &[Value]) -> Result<Vec<Value>, ReadError> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let splice = match item {
                Value::Seq(seq) => {
                    let inner = seq_elements(seq);
                    if marker_of(&inner) == Some("unquote-splicing") {
                        Some(self.expand(&inner[1])?)
                    } else {
                        None
                    }
                }
                _ => None,
            };
            match splice {
                Some(expr) => parts.push(expr),
                None => {
                    let quoted = self.expand_syntax_quote(item)?;
                    parts.push(Value::list(vec![self.core_symbol(".list"), quoted]));
                }
            }
        }
        Ok(parts)
    }

    fn concat_call(&self, mut parts: Vec<Value>) -> Value {
        let mut call = vec![self.core_symbol(".concat")];
        call.append(&mut parts);
        Value::list(call)
    }

    fn quote(&self, form: Value) -> Value {
        Value::list(vec![Value::Special(SpecialTag::Quote), form])
    }

    /// Qualify an unqualified symbol with its home namespace (where it
    /// resolves today), falling back to the current namespace. `&` is left
    /// alone so quoted parameter vectors stay valid.
    fn qualify(&self, sym: &Symbol) -> Symbol {
        if sym.is_qualified() || sym.name() == "&" {
            return sym.clone();
        }
        let ns = (self.resolver)(sym.name()).unwrap_or_else(|| self.current_ns.to_string());
        Symbol::with_namespace(self.interns, &ns, sym.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
