// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Staged bootstrap pipeline.
//!
//! Composes three scheduling rounds over one shared context:
//!
//! 1. **Shell stage** - fixpoint scheduling of the shell tasks. Each task
//!    creates a minimal placeholder artifact (enough to be referenced as a
//!    supertype) and hands back a follow-up carrying the heavy population
//!    work. Only this stage has a-priori-unknown ordering, so only this
//!    stage retries.
//! 2. **Follow-up stage** - the follow-ups run in the order their shells
//!    succeeded, which is guaranteed supertype-before-subtype. No retry: a
//!    failure here is a logic defect, not a timing problem, and aborts
//!    immediately.
//! 3. **Late stage** - closures deferred via [`StageCx::defer`] during the
//!    earlier stages, for artifacts that need other artifacts *fully
//!    populated* rather than merely present as shells. Runs strictly after
//!    stage 2, in collection order, again with no retry tolerance.
//!
//! The pipeline runs once, synchronously, to full success or first error;
//! there is no cancellation and no resumable partial state. Running it
//! concurrently against one context is unsupported.

use log::debug;

use crate::scheduler::run_to_fixpoint;
use crate::task::{FollowUpTask, LateTask, Outcome, ShellTask, StageCx};

/// Three-stage bootstrap over a shared context `C`, producing artifact
/// handles of type `A` and propagating embedder errors `E` verbatim.
pub struct BootstrapPipeline<C, A, E> {
    shells: Vec<ShellTask<C, A, E>>,
}

impl<C, A, E> BootstrapPipeline<C, A, E> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        BootstrapPipeline { shells: Vec::new() }
    }

    /// Append a shell task to the worklist.
    ///
    /// Insertion order only affects which task's error surfaces if the
    /// bootstrap gets stuck; correctness never depends on it.
    pub fn add_shell(
        &mut self,
        task: impl FnMut(&mut StageCx<'_, C, E>) -> Outcome<A, FollowUpTask<C, E>, E>
            + 'static,
    ) -> &mut Self {
        self.shells.push(Box::new(task));
        self
    }

    /// Append an already-boxed shell task (avoids double boxing when the
    /// task comes from a descriptor lowering).
    pub fn add_shell_boxed(&mut self, task: ShellTask<C, A, E>) -> &mut Self {
        self.shells.push(task);
        self
    }

    /// Number of shell tasks queued.
    pub fn len(&self) -> usize {
        self.shells.len()
    }

    /// Whether no shell task has been queued yet.
    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    /// Run all three stages to completion.
    ///
    /// Returns the artifact handles in first-success order (a valid
    /// topological order of the latent dependency relation).
    ///
    /// # Errors
    ///
    /// The first unresolvable shell task's error (after one full stuck
    /// pass), or the first follow-up/late task failure, propagated
    /// unwrapped.
    pub fn run(self, cx: &mut C) -> Result<Vec<A>, E> {
        let mut late: Vec<LateTask<C, E>> = Vec::new();

        debug!("bootstrap stage 1: {} shell tasks", self.shells.len());
        let completed = {
            let mut scx = StageCx::new(cx, &mut late);
            run_to_fixpoint(&mut scx, self.shells)?
        };

        debug!("bootstrap stage 2: {} follow-ups", completed.len());
        let mut artifacts = Vec::with_capacity(completed.len());
        for (artifact, follow_up) in completed {
            if let Some(populate) = follow_up {
                let mut scx = StageCx::new(cx, &mut late);
                populate(&mut scx)?;
            }
            artifacts.push(artifact);
        }

        debug!("bootstrap stage 3: {} late tasks", late.len());
        for task in late {
            task(cx)?;
        }

        Ok(artifacts)
    }
}

impl<C, A, E> Default for BootstrapPipeline<C, A, E> {
    fn default() -> Self {
        Self::new()
    }
}
