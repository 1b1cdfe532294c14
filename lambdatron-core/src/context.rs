// lambdatron-core - Evaluation contexts

//! Evaluation contexts.
//!
//! A [`Context`] is either the interpreter's *root* context — holding the
//! namespace registry, the intern store, and the output hook — or a
//! *lexical-scope* context holding one frame of bindings plus a parent
//! handle. Lookup walks frames deepest-first; Var resolution against the
//! namespace system is the evaluator's job once the frames are exhausted.
//!
//! Contexts are cheap `Rc` handles; closures capture their defining context.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use lambdatron_reader::{InternStore, Symbol, Value};

use crate::namespace::NamespaceRegistry;

/// Hook receiving everything the `.print` family of host functions emits.
pub type OutputHook = Rc<RefCell<Box<dyn FnMut(&str)>>>;

#[derive(Clone)]
pub struct Context {
    inner: Rc<RefCell<ContextInner>>,
}

struct ContextInner {
    bindings: HashMap<u32, Value>,
    parent: Option<Context>,
    /// Only set on the root context.
    root: Option<RootState>,
}

struct RootState {
    registry: NamespaceRegistry,
    interns: InternStore,
    output: OutputHook,
}

impl Context {
    /// Create a root context with a fresh namespace registry. Output defaults
    /// to stdout.
    pub fn new_root(interns: InternStore) -> Self {
        let stdout_sink: Box<dyn FnMut(&str)> = Box::new(|s: &str| {
            print!("{}", s);
            let _ = std::io::stdout().flush();
        });
        let output: OutputHook = Rc::new(RefCell::new(stdout_sink));
        Context {
            inner: Rc::new(RefCell::new(ContextInner {
                bindings: HashMap::new(),
                parent: None,
                root: Some(RootState {
                    registry: NamespaceRegistry::new(),
                    interns,
                    output,
                }),
            })),
        }
    }

    /// Create a lexical-scope context with this context as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Context {
            inner: Rc::new(RefCell::new(ContextInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
                root: None,
            })),
        }
    }

    /// Define a binding in this frame. Bindings are keyed by the symbol's
    /// name id; the namespace part of a symbol never participates in lexical
    /// scope.
    pub fn define(&self, sym: &Symbol, val: Value) {
        self.inner
            .borrow_mut()
            .bindings
            .insert(sym.name_interned().id(), val);
    }

    /// Look up an unqualified symbol through the frame chain, deepest first.
    /// Returns `None` once the chain is exhausted; the caller falls through
    /// to namespace resolution.
    #[must_use]
    pub fn lookup(&self, sym: &Symbol) -> Option<Value> {
        if sym.is_qualified() {
            return None;
        }
        let id = sym.name_interned().id();
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(&id) {
                return Some(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    fn with_root<T>(&self, f: impl FnOnce(&RootState) -> T) -> T {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(root) = &inner.root {
                return f(root);
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                // Contexts are only created through new_root/child, so the
                // chain always ends at a root.
                None => unreachable!("context chain has no root"),
            }
        }
    }

    /// The namespace registry from the root context.
    #[must_use]
    pub fn registry(&self) -> NamespaceRegistry {
        self.with_root(|root| root.registry.clone())
    }

    /// The intern store from the root context.
    #[must_use]
    pub fn interns(&self) -> InternStore {
        self.with_root(|root| root.interns.clone())
    }

    /// Write a string through the output hook.
    pub fn write_output(&self, s: &str) {
        let hook = self.with_root(|root| root.output.clone());
        let mut f = hook.borrow_mut();
        (*f)(s);
    }

    /// Replace the output hook.
    pub fn set_output(&self, f: impl FnMut(&str) + 'static) {
        let hook = self.with_root(|root| root.output.clone());
        *hook.borrow_mut() = Box::new(f);
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        write!(
            f,
            "Context({} bindings{})",
            inner.bindings.len(),
            if inner.root.is_some() { ", root" } else { "" }
        )
    }
}
