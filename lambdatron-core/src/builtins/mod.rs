// lambdatron-core - Host functions

//! Host-provided primitive functions.
//!
//! Host functions are registered under stable dot-prefixed names in the
//! `lambdatron.core` namespace; the standard library defines the public
//! aliases (`+`, `cons`, …) on top of them during bootstrap.

mod arithmetic;
mod collections;
mod comparison;
mod io;
mod predicates;
mod sequences;
mod strings;
mod vars;

use lambdatron_reader::{InternStore, Value};

use crate::context::Context;
use crate::error::{EvalError, EvalResult, Result};
use crate::eval::make_host_fn;
use crate::namespace::{Namespace, NamespaceRegistry};

use arithmetic::{
    host_add, host_dec, host_div, host_inc, host_mul, host_quot, host_rem, host_sub,
};
use collections::{
    host_assoc, host_conj, host_contains, host_count, host_dissoc, host_get, host_hash_map,
    host_keys, host_list, host_map_from_seq, host_nth, host_vals, host_vec, host_vector,
};
use comparison::{host_eq, host_ge, host_gt, host_le, host_lt, host_num_eq};
use io::{host_pr_str, host_print, host_println, host_str};
use predicates::{
    host_empty_p, host_float_p, host_fn_p, host_int_p, host_keyword_p, host_map_p, host_neg_p,
    host_nil_p, host_not, host_number_p, host_pos_p, host_seq_p, host_string_p, host_symbol_p,
    host_vector_p, host_zero_p,
};
use sequences::{
    host_concat, host_cons, host_first, host_lazy_seq, host_next, host_rest, host_seq,
};
use strings::{host_name, host_namespace, host_re_find, host_re_matches, host_re_pattern};
use vars::host_deref;

/// Register every host function into the `lambdatron.core` namespace.
pub fn register_host_functions(ctx: &Context) {
    let registry = ctx.registry();
    let interns = ctx.interns();
    let core = registry.find_or_create(NamespaceRegistry::CORE_NS);

    // Arithmetic
    core.define_host(&interns, ".+", host_add);
    core.define_host(&interns, ".-", host_sub);
    core.define_host(&interns, ".*", host_mul);
    core.define_host(&interns, "./", host_div);
    core.define_host(&interns, ".quot", host_quot);
    core.define_host(&interns, ".rem", host_rem);
    core.define_host(&interns, ".inc", host_inc);
    core.define_host(&interns, ".dec", host_dec);

    // Comparison
    core.define_host(&interns, ".=", host_eq);
    core.define_host(&interns, ".==", host_num_eq);
    core.define_host(&interns, ".<", host_lt);
    core.define_host(&interns, ".>", host_gt);
    core.define_host(&interns, ".<=", host_le);
    core.define_host(&interns, ".>=", host_ge);

    // Predicates
    core.define_host(&interns, ".nil?", host_nil_p);
    core.define_host(&interns, ".zero?", host_zero_p);
    core.define_host(&interns, ".pos?", host_pos_p);
    core.define_host(&interns, ".neg?", host_neg_p);
    core.define_host(&interns, ".number?", host_number_p);
    core.define_host(&interns, ".int?", host_int_p);
    core.define_host(&interns, ".float?", host_float_p);
    core.define_host(&interns, ".string?", host_string_p);
    core.define_host(&interns, ".symbol?", host_symbol_p);
    core.define_host(&interns, ".keyword?", host_keyword_p);
    core.define_host(&interns, ".fn?", host_fn_p);
    core.define_host(&interns, ".seq?", host_seq_p);
    core.define_host(&interns, ".vector?", host_vector_p);
    core.define_host(&interns, ".map?", host_map_p);
    core.define_host(&interns, ".empty?", host_empty_p);
    core.define_host(&interns, ".not", host_not);

    // Sequences
    core.define_host(&interns, ".cons", host_cons);
    core.define_host(&interns, ".first", host_first);
    core.define_host(&interns, ".rest", host_rest);
    core.define_host(&interns, ".next", host_next);
    core.define_host(&interns, ".seq", host_seq);
    core.define_host(&interns, ".concat", host_concat);
    core.define_host(&interns, ".lazy-seq", host_lazy_seq);

    // Collections
    core.define_host(&interns, ".list", host_list);
    core.define_host(&interns, ".vector", host_vector);
    core.define_host(&interns, ".vec", host_vec);
    core.define_host(&interns, ".hash-map", host_hash_map);
    core.define_host(&interns, ".map-from-seq", host_map_from_seq);
    core.define_host(&interns, ".assoc", host_assoc);
    core.define_host(&interns, ".dissoc", host_dissoc);
    core.define_host(&interns, ".get", host_get);
    core.define_host(&interns, ".contains?", host_contains);
    core.define_host(&interns, ".keys", host_keys);
    core.define_host(&interns, ".vals", host_vals);
    core.define_host(&interns, ".count", host_count);
    core.define_host(&interns, ".nth", host_nth);
    core.define_host(&interns, ".conj", host_conj);

    // Vars
    core.define_host(&interns, ".deref", host_deref);

    // Strings, symbols, regex
    core.define_host(&interns, ".name", host_name);
    core.define_host(&interns, ".namespace", host_namespace);
    core.define_host(&interns, ".re-pattern", host_re_pattern);
    core.define_host(&interns, ".re-matches", host_re_matches);
    core.define_host(&interns, ".re-find", host_re_find);

    // Printing
    core.define_host(&interns, ".str", host_str);
    core.define_host(&interns, ".pr-str", host_pr_str);
    core.define_host(&interns, ".print", host_print);
    core.define_host(&interns, ".println", host_println);
}

/// Helper trait for registering host functions on a namespace.
pub trait NsExt {
    fn define_host(
        &self,
        interns: &InternStore,
        name: &'static str,
        func: fn(&[Value], &Context) -> EvalResult,
    );
}

impl NsExt for Namespace {
    fn define_host(
        &self,
        interns: &InternStore,
        name: &'static str,
        func: fn(&[Value], &Context) -> EvalResult,
    ) {
        let host = make_host_fn(name, func);
        self.set_var(&interns.intern(name), Value::Builtin(host));
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Check an exact argument count.
pub(crate) fn expect_arity(name: &'static str, expected: usize, args: &[Value]) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::arity_named(name, expected, args.len()))
    }
}

/// A numeric operand, promoted to float when either side is a float.
#[derive(Clone, Copy)]
pub(crate) enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub(crate) fn of(name: &'static str, value: &Value) -> Result<Num> {
        match value {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(n) => Ok(Num::Float(*n)),
            other => Err(EvalError::invalid_argument(
                name,
                format!("expected a number, got {}", other.type_name()),
            )),
        }
    }

    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }
}
