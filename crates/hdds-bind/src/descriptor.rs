// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binding descriptors for exposed types.
//!
//! A [`TypeDescriptor`] describes one type of the native runtime to be
//! exposed in the host namespace: its public name, an optional supertype
//! that must exist (at least as a shell) before this type's shell can be
//! created, and any types it needs *fully populated* before the bootstrap
//! may finish. Descriptors never declare a global ordering; the fixpoint
//! scheduler discovers one.
//!
//! Lowering a descriptor via [`TypeDescriptor::into_shell_task`] produces a
//! shell task over [`Registry<TypeArtifact>`]:
//!
//! - supertype missing means the attempt defers with `MissingPrerequisite` and
//!   touches nothing (the registry stays exactly as it was);
//! - supertype present means an unpopulated [`TypeArtifact`] shell is published
//!   immediately (visible to later attempts within the same pass), and the
//!   heavy population work comes back as a follow-up;
//! - the follow-up runs the descriptor's populate hook, marks the artifact
//!   populated, and defers a late check for the fully-populated
//!   prerequisites.

use crate::error::BindError;
use crate::registry::{Exposer, Registry};
use crate::task::{FollowUpTask, Outcome, ShellTask};

/// Artifact handle stored in the registry for one exposed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArtifact {
    /// Public name in the host namespace.
    pub name: String,
    /// Supertype name, if any.
    pub base: Option<String>,
    /// False while only the shell exists; set by the follow-up stage.
    pub populated: bool,
}

/// Population hook: the body of the follow-up task for one descriptor.
pub type PopulateFn = Box<dyn FnOnce(&mut Registry<TypeArtifact>) -> Result<(), BindError>>;

/// Declarative description of one exposed type.
///
/// Fluent builder in the style of the runtime's dynamic-type descriptors:
///
/// ```
/// use hdds_bind::TypeDescriptor;
///
/// let descriptor = TypeDescriptor::new("DataWriter")
///     .extends("Entity")
///     .uses("QosPolicy")
///     .populate(|_registry| Ok(()));
/// ```
pub struct TypeDescriptor {
    name: String,
    base: Option<String>,
    uses: Vec<String>,
    populate: Option<PopulateFn>,
}

impl TypeDescriptor {
    /// Descriptor for a type published under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        TypeDescriptor {
            name: name.into(),
            base: None,
            uses: Vec::new(),
            populate: None,
        }
    }

    /// Require `base` to exist (as a shell) before this type's shell can be
    /// created.
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Require `dep` to be fully populated before the bootstrap finishes.
    /// Checked in the late stage, after all follow-ups.
    pub fn uses(mut self, dep: impl Into<String>) -> Self {
        self.uses.push(dep.into());
        self
    }

    /// Attach the population body, run in the follow-up stage.
    pub fn populate(
        mut self,
        f: impl FnOnce(&mut Registry<TypeArtifact>) -> Result<(), BindError> + 'static,
    ) -> Self {
        self.populate = Some(Box::new(f));
        self
    }

    /// Lower this descriptor to a shell task for the bootstrap pipeline.
    ///
    /// The returned task's artifact handle is the public name.
    pub fn into_shell_task(self) -> ShellTask<Registry<TypeArtifact>, String, BindError> {
        let TypeDescriptor {
            name,
            base,
            mut uses,
            mut populate,
        } = self;

        Box::new(move |scx| {
            if let Some(base_name) = base.as_deref() {
                if !scx.contains(base_name) {
                    return Outcome::Deferred(BindError::MissingPrerequisite(format!(
                        "{}: supertype {}",
                        name, base_name
                    )));
                }
            }

            let shell = TypeArtifact {
                name: name.clone(),
                base: base.clone(),
                populated: false,
            };
            if let Err(err) = scx.publish(&name, shell) {
                return Outcome::Deferred(err);
            }

            // Single post-success invocation: after this point the
            // scheduler removes the task, so the taken state is gone for
            // good and the follow-up runs exactly once.
            let populate = populate.take();
            let uses = std::mem::take(&mut uses);
            let owner = name.clone();

            let follow_up: FollowUpTask<Registry<TypeArtifact>, BindError> =
                Box::new(move |scx| {
                    if let Some(body) = populate {
                        body(scx.cx())?;
                    }
                    match scx.resolve_mut(&owner) {
                        Some(artifact) => artifact.populated = true,
                        None => {
                            return Err(BindError::Registration(format!(
                                "{}: shell missing at population time",
                                owner
                            )))
                        }
                    }
                    if !uses.is_empty() {
                        scx.defer(move |registry: &mut Registry<TypeArtifact>| {
                            check_populated(registry, &owner, &uses)
                        });
                    }
                    Ok(())
                });

            Outcome::Success {
                artifact: name.clone(),
                follow_up: Some(follow_up),
            }
        })
    }
}

impl crate::pipeline::BootstrapPipeline<Registry<TypeArtifact>, String, BindError> {
    /// Queue a descriptor's shell task.
    pub fn add_descriptor(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.add_shell_boxed(descriptor.into_shell_task())
    }
}

/// Late-stage check that every fully-populated prerequisite of `owner` is
/// actually populated.
fn check_populated(
    registry: &Registry<TypeArtifact>,
    owner: &str,
    deps: &[String],
) -> Result<(), BindError> {
    for dep in deps {
        match registry.resolve(dep) {
            Some(artifact) if artifact.populated => {}
            Some(_) => {
                return Err(BindError::Registration(format!(
                    "{}: dependency {} never fully populated",
                    owner, dep
                )))
            }
            None => {
                return Err(BindError::MissingPrerequisite(format!(
                    "{}: dependency {}",
                    owner, dep
                )))
            }
        }
    }
    Ok(())
}
