// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for the binding bootstrap.
//!
//! The scheduler and pipeline are generic over the embedder's error type and
//! propagate it verbatim; [`BindError`] is the error currency of the parts
//! this crate owns itself (the registry and the descriptor layer).

use std::fmt;

/// Errors produced by the binding registry and descriptor layer.
///
/// `MissingPrerequisite` is the transient/ordering case: the scheduler
/// retries it silently until the prerequisite appears or the worklist stops
/// shrinking. The other variants indicate genuine defects in the descriptor
/// set and surface unchanged once the scheduler gives up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required artifact does not (yet) exist in the registry.
    MissingPrerequisite(String),
    /// An artifact with this public name is already published.
    DuplicateName(String),
    /// Registration failed for a reason other than ordering.
    Registration(String),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::MissingPrerequisite(what) => {
                write!(f, "missing prerequisite: {}", what)
            }
            BindError::DuplicateName(name) => {
                write!(f, "artifact already published: {}", name)
            }
            BindError::Registration(msg) => write!(f, "registration failed: {}", msg),
        }
    }
}

impl std::error::Error for BindError {}

/// Convenience alias for results carrying a [`BindError`].
pub type Result<T> = std::result::Result<T, BindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(
            BindError::MissingPrerequisite("Base".into()).to_string(),
            "missing prerequisite: Base"
        );
        assert_eq!(
            BindError::DuplicateName("Entity".into()).to_string(),
            "artifact already published: Entity"
        );
        assert_eq!(
            BindError::Registration("boom".into()).to_string(),
            "registration failed: boom"
        );
    }

    #[test]
    fn is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&BindError::DuplicateName("x".into()));
    }
}
