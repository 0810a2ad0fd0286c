use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for scene vocabulary (tag names, element ids,
/// class names, attribute keys).
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned symbol. Selector matching compares millions of
/// tag/class symbols during pointer moves — interning keeps that O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom(Spur);

impl Atom {
    /// Intern a string, or return the existing symbol if already interned.
    pub fn intern(s: &str) -> Self {
        Atom(INTERNER.get_or_intern(s))
    }

    /// Intern the ASCII-lowercased form (scene tags are case-insensitive,
    /// selectors are written lowercase).
    pub fn intern_lower(s: &str) -> Self {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            Self::intern(&s.to_ascii_lowercase())
        } else {
            Self::intern(s)
        }
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Atom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Atom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Atom::intern(&s))
    }
}
