// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Artifact namespace populated by the bootstrap.
//!
//! The registry is the single shared resource of the whole bootstrap: shell
//! tasks publish placeholder artifacts into it, later tasks resolve their
//! prerequisites out of it. It is an explicit object owned by the caller
//! rather than ambient global state, so it can be constructed and inspected
//! in isolation.
//!
//! # Lifecycle
//!
//! Append-only, single-writer, single-thread. Artifacts are published once
//! during the bootstrap and never removed or replaced; a duplicate name is
//! rejected. The bootstrap itself is synchronous, so no locking is needed;
//! running the scheduler concurrently against one registry is unsupported.

use std::collections::HashMap;

use crate::error::BindError;

/// Publication seam between the scheduler's tasks and the namespace.
///
/// Publication takes effect immediately (a plain map insertion, no deferred
/// flush): an artifact published mid-pass is resolvable by every subsequent
/// `attempt` call within the same pass. The fixpoint scheduler relies on
/// this re-entrant visibility to make progress.
pub trait Exposer<A> {
    /// Publish `artifact` under its public `name`.
    fn publish(&mut self, name: &str, artifact: A) -> Result<(), BindError>;
}

/// Append-only namespace of named artifacts.
///
/// Keyed by public name; publication order is preserved for deterministic
/// introspection.
#[derive(Debug)]
pub struct Registry<A> {
    entries: HashMap<String, A>,
    order: Vec<String>,
}

impl<A> Registry<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Look up an artifact by public name.
    pub fn resolve(&self, name: &str) -> Option<&A> {
        self.entries.get(name)
    }

    /// Mutable lookup, for in-place population of an already-published shell.
    pub fn resolve_mut(&mut self, name: &str) -> Option<&mut A> {
        self.entries.get_mut(name)
    }

    /// Whether an artifact with this name has been published.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of published artifacts.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the namespace is still empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Public names in publication order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<A> Exposer<A> for Registry<A> {
    fn publish(&mut self, name: &str, artifact: A) -> Result<(), BindError> {
        if self.entries.contains_key(name) {
            return Err(BindError::DuplicateName(name.to_string()));
        }
        self.entries.insert(name.to_string(), artifact);
        self.order.push(name.to_string());
        log::trace!("registry: published '{}' ({} total)", name, self.order.len());
        Ok(())
    }
}

impl<A> Default for Registry<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_then_resolve() {
        let mut registry: Registry<u32> = Registry::new();
        registry.publish("Entity", 1).unwrap();
        registry.publish("Topic", 2).unwrap();

        assert_eq!(registry.resolve("Entity"), Some(&1));
        assert_eq!(registry.resolve("Topic"), Some(&2));
        assert!(registry.resolve("DataWriter").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut registry: Registry<u32> = Registry::new();
        registry.publish("Entity", 1).unwrap();

        let err = registry.publish("Entity", 2).unwrap_err();
        assert_eq!(err, BindError::DuplicateName("Entity".to_string()));
        // First publication untouched.
        assert_eq!(registry.resolve("Entity"), Some(&1));
    }

    #[test]
    fn names_in_publication_order() {
        let mut registry: Registry<&str> = Registry::new();
        registry.publish("Entity", "shell").unwrap();
        registry.publish("DomainParticipant", "shell").unwrap();
        registry.publish("Topic", "shell").unwrap();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["Entity", "DomainParticipant", "Topic"]);
    }

    #[test]
    fn resolve_mut_allows_population() {
        let mut registry: Registry<Vec<&str>> = Registry::new();
        registry.publish("Enum", Vec::new()).unwrap();
        registry.resolve_mut("Enum").unwrap().push("VOLATILE");
        assert_eq!(registry.resolve("Enum").unwrap().len(), 1);
    }
}
