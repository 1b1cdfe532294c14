// lambdatron-reader - Keyword type

//! Keywords are self-evaluating identifiers printed with a leading `:`.
//!
//! Keywords share the interpreter's [`InternStore`] with symbols, so two
//! keywords with the same namespace and name are id-equal.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::intern::{InternStore, InternedStr};

/// A keyword with an optional namespace, written `:name` or `:ns/name`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Keyword {
    namespace: Option<InternedStr>,
    name: InternedStr,
}

impl Keyword {
    /// Create an unqualified keyword.
    pub fn new(store: &InternStore, name: &str) -> Self {
        Keyword {
            namespace: None,
            name: store.intern(name),
        }
    }

    /// Create a qualified keyword.
    pub fn with_namespace(store: &InternStore, namespace: &str, name: &str) -> Self {
        Keyword {
            namespace: Some(store.intern(namespace)),
            name: store.intern(name),
        }
    }

    /// Parse a keyword from text like `foo` or `ns/foo` (no leading colon).
    pub fn parse(store: &InternStore, s: &str) -> Self {
        if let Some(slash) = s.find('/') {
            Keyword::with_namespace(store, &s[..slash], &s[slash + 1..])
        } else {
            Keyword::new(store, s)
        }
    }

    /// The namespace part, if any.
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_ref().map(InternedStr::as_str)
    }

    /// The name part.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, ":{}/{}", ns, self.name)
        } else {
            write!(f, ":{}", self.name)
        }
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl Hash for Keyword {
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
    fn test_simple_keyword() {
        let store = InternStore::new();
        let kw = Keyword::new(&store, "foo");
        assert_eq!(kw.name(), "foo");
        assert!(kw.namespace().is_none());
        assert_eq!(kw.to_string(), ":foo");
    }

    #[test]
    fn test_qualified_keyword() {
        let store = InternStore::new();
        let kw = Keyword::with_namespace(&store, "user", "foo");
        assert_eq!(kw.to_string(), ":user/foo");
    }

    #[test]
    fn test_parse() {
        let store = InternStore::new();
        let kw = Keyword::parse(&store, "user/foo");
        assert_eq!(kw.namespace(), Some("user"));
        assert_eq!(kw.name(), "foo");
    }

    #[test]
    fn test_id_equality() {
        let store = InternStore::new();
        assert_eq!(Keyword::new(&store, "a"), Keyword::new(&store, "a"));
        assert_ne!(Keyword::new(&store, "a"), Keyword::new(&store, "b"));
    }
}
