// lambdatron-core - Namespace system

//! Namespace system for global Var bindings.
//!
//! A [`Namespace`] maps interned names to [`Var`]s, plus referred Vars from
//! other namespaces and aliases to other namespaces. The
//! [`NamespaceRegistry`] owns every namespace and the current-namespace
//! cursor; `def` interns Vars into the current namespace.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lambdatron_reader::{CORE_NS, InternedStr, Symbol, Value, Var};

/// A namespace containing Var bindings.
#[derive(Clone)]
pub struct Namespace {
    inner: Rc<RefCell<NamespaceInner>>,
}

struct NamespaceInner {
    name: Rc<str>,
    /// Vars interned here, keyed by name id.
    vars: HashMap<u32, Var>,
    /// Vars referred from other namespaces, keyed by name id.
    refers: HashMap<u32, Var>,
    /// Aliases to other namespaces, keyed by alias name id.
    aliases: HashMap<u32, Namespace>,
}

impl Namespace {
    /// Create a new namespace with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Namespace {
            inner: Rc::new(RefCell::new(NamespaceInner {
                name: Rc::from(name.into()),
                vars: HashMap::new(),
                refers: HashMap::new(),
                aliases: HashMap::new(),
            })),
        }
    }

    /// The namespace name as a cheap shared string.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Rc<str> {
        self.inner.borrow().name.clone()
    }

    /// Intern a Var under the given name, creating an unbound one if it does
    /// not exist yet. Vars are never removed once interned.
    pub fn intern(&self, name: &InternedStr) -> Var {
        let mut inner = self.inner.borrow_mut();
        if let Some(var) = inner.vars.get(&name.id()) {
            return var.clone();
        }
        let var = Var::new_unbound(inner.name.clone(), name.clone());
        inner.vars.insert(name.id(), var.clone());
        var
    }

    /// Intern a Var and bind its slot. This is the only mutation path for
    /// namespace bindings; it returns the (possibly pre-existing) Var.
    pub fn set_var(&self, name: &InternedStr, value: Value) -> Var {
        let var = self.intern(name);
        var.bind(value);
        var
    }

    /// Look up a Var interned in this namespace (not refers, not aliases).
    #[inline]
    #[must_use]
    pub fn find_var(&self, name_id: u32) -> Option<Var> {
        self.inner.borrow().vars.get(&name_id).cloned()
    }

    /// Resolve an unqualified symbol: own Vars first, then referred Vars.
    /// Referred Vars shadow nothing defined here.
    #[must_use]
    pub fn resolve_unqualified(&self, sym: &Symbol) -> Option<Var> {
        let inner = self.inner.borrow();
        let id = sym.name_interned().id();
        inner
            .vars
            .get(&id)
            .or_else(|| inner.refers.get(&id))
            .cloned()
    }

    /// Look up an alias registered in this namespace.
    #[must_use]
    pub fn find_alias(&self, alias_id: u32) -> Option<Namespace> {
        self.inner.borrow().aliases.get(&alias_id).cloned()
    }

    /// Register an alias for another namespace.
    pub fn add_alias(&self, alias: &InternedStr, ns: Namespace) {
        self.inner.borrow_mut().aliases.insert(alias.id(), ns);
    }

    /// Refer a Var from another namespace into this one.
    pub fn refer(&self, name: &InternedStr, var: Var) {
        self.inner.borrow_mut().refers.insert(name.id(), var);
    }

    /// All Vars interned in this namespace.
    #[must_use]
    pub fn vars(&self) -> Vec<Var> {
        self.inner.borrow().vars.values().cloned().collect()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#<namespace {}>", self.name())
    }
}

/// Registry of all namespaces plus the current-namespace cursor.
///
/// Created with the `lambdatron.core` and `user` namespaces; `user` is
/// current.
#[derive(Clone)]
pub struct NamespaceRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

struct RegistryInner {
    namespaces: HashMap<String, Namespace>,
    current: Rc<str>,
}

impl NamespaceRegistry {
    /// The namespace host functions and the standard library live in.
    pub const CORE_NS: &'static str = CORE_NS;

    pub fn new() -> Self {
        let mut namespaces = HashMap::new();
        namespaces.insert(Self::CORE_NS.to_string(), Namespace::new(Self::CORE_NS));
        namespaces.insert("user".to_string(), Namespace::new("user"));
        NamespaceRegistry {
            inner: Rc::new(RefCell::new(RegistryInner {
                namespaces,
                current: Rc::from("user"),
            })),
        }
    }

    /// Find a namespace by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Namespace> {
        self.inner.borrow().namespaces.get(name).cloned()
    }

    /// Find a namespace by name, creating it if necessary.
    pub fn find_or_create(&self, name: &str) -> Namespace {
        let mut inner = self.inner.borrow_mut();
        if let Some(ns) = inner.namespaces.get(name) {
            return ns.clone();
        }
        let ns = Namespace::new(name);
        inner.namespaces.insert(name.to_string(), ns.clone());
        ns
    }

    /// The current namespace.
    #[must_use]
    pub fn current(&self) -> Namespace {
        let inner = self.inner.borrow();
        inner
            .namespaces
            .get(&*inner.current)
            .cloned()
            .expect("current namespace should always exist")
    }

    /// The current namespace name.
    #[must_use]
    pub fn current_name(&self) -> Rc<str> {
        self.inner.borrow().current.clone()
    }

    /// Set the current namespace by name, creating it if necessary.
    pub fn set_current(&self, name: &str) -> Namespace {
        let ns = self.find_or_create(name);
        self.inner.borrow_mut().current = Rc::from(name);
        ns
    }

    /// Resolve a symbol to a Var against the current namespace.
    ///
    /// Unqualified: the current namespace's own Vars, then its refers.
    /// Qualified: the current namespace's aliases first (the more specific
    /// binding), then a namespace with that name.
    #[must_use]
    pub fn resolve(&self, sym: &Symbol) -> Option<Var> {
        let current = self.current();
        match sym.namespace_interned() {
            None => current.resolve_unqualified(sym),
            Some(ns_part) => {
                let target = current
                    .find_alias(ns_part.id())
                    .or_else(|| self.find(ns_part.as_str()))?;
                target.find_var(sym.name_interned().id())
            }
        }
    }

    /// Refer every Var of `lambdatron.core` into the given namespace.
    pub fn refer_core_to(&self, ns: &Namespace) {
        if let Some(core) = self.find(Self::CORE_NS) {
            for var in core.vars() {
                let name = var.name_interned().clone();
                ns.refer(&name, var);
            }
        }
    }

    /// All namespace names.
    #[must_use]
    pub fn all_ns(&self) -> Vec<String> {
        self.inner.borrow().namespaces.keys().cloned().collect()
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NamespaceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NamespaceRegistry(current: {})", self.current_name())
    }
}

// ============================================================================
// Tests
// ============================================================================
