//! Append-only string interner.
//!
//! Interning hands out a compact [`Name`] (a `u32`) for each distinct
//! string. Storage is leaked `&'static str`, so lookups are plain slice
//! reads and interned spellings outlive every borrower — the lexer keeps
//! identifier and literal spellings here for its whole lifetime.
//!
//! Single-threaded by design (one `(Options, Lexer, Parser)` triple per
//! thread), so a `RefCell` stands in for per-shard locking.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// Handle to an interned string. `Name(0)` is always the empty string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(u32);

impl Name {
    pub const EMPTY: Name = Name(0);

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct Inner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Interner with O(1) intern and lookup.
#[derive(Debug)]
pub struct StringInterner {
    inner: RefCell<Inner>,
}

impl StringInterner {
    #[must_use]
    pub fn new() -> Self {
        let mut inner = Inner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        inner.map.insert("", 0);
        inner.strings.push("");
        StringInterner {
            inner: RefCell::new(inner),
        }
    }

    /// Intern `s`, returning its stable handle.
    pub fn intern(&self, s: &str) -> Name {
        let mut inner = self.inner.borrow_mut();
        if let Some(&idx) = inner.map.get(s) {
            return Name(idx);
        }
        let idx = u32::try_from(inner.strings.len()).expect("interner overflow");
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        inner.map.insert(leaked, idx);
        inner.strings.push(leaked);
        Name(idx)
    }

    /// Resolve a handle back to its string.
    ///
    /// # Panics
    ///
    /// Panics if `name` did not come from this interner.
    #[must_use]
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner.borrow().strings[name.index()]
    }

    /// Number of distinct strings interned (the empty string counts).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_name_zero() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("wchar_t");
        let b = interner.intern("wchar_t");
        let c = interner.intern("wchar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.lookup(a), "wchar_t");
        assert_eq!(interner.lookup(c), "wchar");
    }

    #[test]
    fn lookup_survives_growth() {
        let interner = StringInterner::new();
        let first = interner.intern("first");
        for i in 0..1000 {
            interner.intern(&format!("ident{i}"));
        }
        assert_eq!(interner.lookup(first), "first");
        assert_eq!(interner.len(), 1002);
    }
}
