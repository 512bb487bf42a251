//! Interned names for identifiers and string values.
//!
//! Entity names, parameter names and string literals repeat constantly in
//! narrative scripts. [`Id`] stores each distinct spelling once in a
//! process-wide [`string_interner`] table and hands out a `Copy` symbol.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Process-wide name table.
///
/// The table is append-only; symbols stay valid for the lifetime of the process.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// An interned name.
///
/// Two `Id`s compare equal exactly when their spellings are equal, which also
/// holds across independent parses.
///
/// # Examples
///
/// ```
/// use nss_core::identifier::Id;
///
/// let a = Id::new("bg01");
/// let b = Id::new("bg01");
/// assert_eq!(a, b);
/// assert_eq!(a, "bg01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its symbol.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` with the interned spelling without allocating.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }

    /// Returns an owned copy of the spelling.
    pub fn as_string(&self) -> String {
        self.with_str(str::to_owned)
    }

    /// Returns `true` if the spelling is empty.
    pub fn is_empty(&self) -> bool {
        self.with_str(str::is_empty)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolve first so the lock is not held while writing.
        let text = self.as_string();
        f.write_str(&text)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|s| s == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("ch01_scene");
        let id2 = Id::new("ch01_scene");
        let id3 = Id::new("ch02_scene");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "ch01_scene");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "text001".into();
        let id2 = Id::new("text001");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_hash_and_eq() {
        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_non_ascii_names() {
        let id = Id::new("選択肢1");
        assert_eq!(id, "選択肢1");
        assert_eq!(id.as_string(), "選択肢1");
    }

    #[test]
    fn test_empty() {
        assert!(Id::new("").is_empty());
        assert!(!Id::new("x").is_empty());
    }

    #[test]
    fn test_partial_eq_str_ref() {
        let id = Id::new("$SYSTEM_skip");
        let owned = String::from("$SYSTEM_skip");

        assert!(id == owned.as_str());
        assert!(id != "SYSTEM_skip");
    }
}
