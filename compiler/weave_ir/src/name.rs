//! Binding names.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An identifier used as a binding key in a [`ScopeFrame`](crate::ScopeFrame).
///
/// Names are shared between the parsed directive that introduces them and
/// every frame created for that directive, so cloning is a reference-count
/// bump rather than a string copy.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    /// Create a name from any string-like value.
    pub fn new(text: impl AsRef<str>) -> Self {
        Name(Arc::from(text.as_ref()))
    }

    /// The name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `text` is a legal binding identifier:
    /// `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn is_identifier(text: &str) -> bool {
        let mut bytes = text.bytes();
        match bytes.next() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
            _ => return false,
        }
        bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Name(Arc::from(text))
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rules() {
        assert!(Name::is_identifier("item"));
        assert!(Name::is_identifier("_x9"));
        assert!(Name::is_identifier("StringItem"));
        assert!(!Name::is_identifier(""));
        assert!(!Name::is_identifier("9lives"));
        assert!(!Name::is_identifier("a-b"));
        assert!(!Name::is_identifier("a.b"));
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = Name::new("shared");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.0, &b.0));
    }
}
