//! Bidirectional key/tag lookup.
//!
//! The registry is the only place a declared name is turned back into a
//! [`Tag`]. It is built once, checked for duplicate keys while it is built,
//! and never mutated afterwards, so it can be shared freely across threads.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::tag::Tag;

/// Errors raised while building a registry or converting raw keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate registry key '{key}' for {first:?} and {second:?}")]
    DuplicateKey {
        key: &'static str,
        first: Tag,
        second: Tag,
    },

    #[error("unknown registry key '{0}'")]
    UnknownKey(String),
}

static GLOBAL: LazyLock<TypeRegistry> = LazyLock::new(|| match TypeRegistry::from_tags(Tag::ALL) {
    Ok(registry) => registry,
    // A duplicate key is a defect in the tag table, not a runtime condition.
    Err(err) => panic!("tag table is inconsistent: {err}"),
});

/// Maps registry keys to tags.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_key: FxHashMap<&'static str, Tag>,
}

impl TypeRegistry {
    /// Build a registry over `tags`, rejecting any key registered twice.
    pub fn from_tags(tags: &[Tag]) -> Result<Self, RegistryError> {
        let mut by_key = FxHashMap::default();
        by_key.reserve(tags.len());

        for &tag in tags {
            if let Some(&first) = by_key.get(tag.key()) {
                if first == tag {
                    continue;
                }
                return Err(RegistryError::DuplicateKey {
                    key: tag.key(),
                    first,
                    second: tag,
                });
            }
            by_key.insert(tag.key(), tag);
        }

        Ok(Self { by_key })
    }

    /// Build a registry from explicit `(key, tag)` pairs.
    ///
    /// Used where keys do not come from [`Tag::key`], e.g. aliases supplied by
    /// a producer. The same duplicate rule applies.
    pub fn from_pairs(pairs: &[(&'static str, Tag)]) -> Result<Self, RegistryError> {
        let mut by_key = FxHashMap::default();
        for &(key, tag) in pairs {
            if let Some(&first) = by_key.get(key) {
                return Err(RegistryError::DuplicateKey {
                    key,
                    first,
                    second: tag,
                });
            }
            by_key.insert(key, tag);
        }
        Ok(Self { by_key })
    }

    /// The process-wide registry over [`Tag::ALL`].
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL
    }

    pub fn lookup(&self, key: &str) -> Option<Tag> {
        self.by_key.get(key).copied()
    }

    /// Like [`lookup`](Self::lookup), but an unknown key is an error.
    pub fn require(&self, key: &str) -> Result<Tag, RegistryError> {
        self.lookup(key)
            .ok_or_else(|| RegistryError::UnknownKey(key.to_string()))
    }

    pub fn name(&self, tag: Tag) -> &'static str {
        tag.key()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_registry_covers_every_tag() {
        let registry = TypeRegistry::global();
        assert_eq!(registry.len(), Tag::ALL.len());
    }

    #[test]
    fn test_duplicate_pair_is_rejected() {
        let err = TypeRegistry::from_pairs(&[("Port", Tag::Port), ("Port", Tag::PortField)])
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateKey {
                key: "Port",
                first: Tag::Port,
                second: Tag::PortField,
            }
        );
    }

    #[test]
    fn test_repeated_tag_is_not_a_duplicate() {
        let registry = TypeRegistry::from_tags(&[Tag::Port, Tag::Port, Tag::Mode]).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_require_unknown_key() {
        let err = TypeRegistry::global().require("NoSuchTerminal").unwrap_err();
        assert_eq!(err, RegistryError::UnknownKey("NoSuchTerminal".to_string()));
    }
}
