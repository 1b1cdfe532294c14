// lambdatron-reader - Symbol type

//! Symbols are identifiers that may be optionally namespaced.
//!
//! Symbol names are interned in the interpreter's [`InternStore`], so
//! comparing two symbols compares two integer ids rather than strings.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::intern::{InternStore, InternedStr};

/// A symbol with an optional namespace, written `name` or `ns/name`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Symbol {
    namespace: Option<InternedStr>,
    name: InternedStr,
}

impl Symbol {
    /// Create an unqualified symbol.
    pub fn new(store: &InternStore, name: &str) -> Self {
        Symbol {
            namespace: None,
            name: store.intern(name),
        }
    }

    /// Create a qualified symbol.
    pub fn with_namespace(store: &InternStore, namespace: &str, name: &str) -> Self {
        Symbol {
            namespace: Some(store.intern(namespace)),
            name: store.intern(name),
        }
    }

    /// Parse a symbol from text like `foo` or `ns/foo`.
    ///
    /// A `/` only separates namespace and name when both parts are
    /// non-empty, so `/` and `./` stay plain symbols.
    pub fn parse(store: &InternStore, s: &str) -> Self {
        if let Some(slash) = s.find('/') {
            let (ns, name) = (&s[..slash], &s[slash + 1..]);
            if !ns.is_empty() && !name.is_empty() {
                return Symbol::with_namespace(store, ns, name);
            }
        }
        Symbol::new(store, s)
    }

    /// The namespace part, if any.
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_ref().map(InternedStr::as_str)
    }

    /// The interned namespace entry, if any.
    #[inline]
    #[must_use]
    pub fn namespace_interned(&self) -> Option<&InternedStr> {
        self.namespace.as_ref()
    }

    /// The name part.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The interned name entry.
    #[inline]
    #[must_use]
    pub fn name_interned(&self) -> &InternedStr {
        &self.name
    }

    /// Whether this symbol carries a namespace.
    #[inline]
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.namespace.is_some()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{}/{}", ns, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_symbol() {
        let store = InternStore::new();
        let sym = Symbol::new(&store, "foo");
        assert_eq!(sym.name(), "foo");
        assert!(sym.namespace().is_none());
        assert_eq!(sym.to_string(), "foo");
    }

    #[test]
    fn test_qualified_symbol() {
        let store = InternStore::new();
        let sym = Symbol::with_namespace(&store, "user", "foo");
        assert_eq!(sym.name(), "foo");
        assert_eq!(sym.namespace(), Some("user"));
        assert_eq!(sym.to_string(), "user/foo");
    }

    #[test]
    fn test_parse() {
        let store = InternStore::new();
        let plain = Symbol::parse(&store, "foo");
        assert!(!plain.is_qualified());

        let qualified = Symbol::parse(&store, "user/foo");
        assert_eq!(qualified.namespace(), Some("user"));
        assert_eq!(qualified.name(), "foo");

        let slash = Symbol::parse(&store, "/");
        assert_eq!(slash.name(), "/");
        assert!(!slash.is_qualified());

        let dot_slash = Symbol::parse(&store, "./");
        assert_eq!(dot_slash.name(), "./");
        assert!(!dot_slash.is_qualified());
    }

    #[test]
    fn test_equality_via_intern() {
        let store = InternStore::new();
        assert_eq!(Symbol::new(&store, "foo"), Symbol::new(&store, "foo"));
        assert_ne!(Symbol::new(&store, "foo"), Symbol::new(&store, "bar"));
        assert_ne!(
            Symbol::new(&store, "foo"),
            Symbol::with_namespace(&store, "ns", "foo")
        );
    }
}
