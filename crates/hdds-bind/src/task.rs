// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration task model.
//!
//! A registration task is an opaque nullary operation from the scheduler's
//! point of view: "try to materialize artifact X". It never declares its
//! dependencies; it simply reports whether it could run yet. The scheduler
//! owns the interpretation of "not yet" (retry vs. give up), so the task
//! contract stays a plain two-valued result instead of control-flow-by-
//! exception.
//!
//! # Task contract
//!
//! - An attempt must be safe to repeat with identical effect while it has
//!   never succeeded (idempotent failure). In particular, an attempt that
//!   returns [`Outcome::Deferred`] must leave the shared registry exactly as
//!   it found it; the retry loop corrupts state otherwise.
//! - On success the registration side effect happens exactly once: the
//!   scheduler removes the task from the worklist and never calls it again.
//! - `Deferred` carries the task's own error, verbatim. If the task is never
//!   resolvable, that exact error is what the caller sees.

use std::ops::{Deref, DerefMut};

/// Result of one attempt at a registration task.
///
/// `Deferred` means "not ready" from the task's view; whether that is a
/// transient ordering problem or a fatal one is decided by the scheduler
/// based on whether the worklist is still shrinking.
pub enum Outcome<A, F, E> {
    /// The artifact was materialized and published.
    Success {
        /// Handle to the materialized artifact (bookkeeping and ordering).
        artifact: A,
        /// Optional work deferred to the immediate follow-up stage.
        follow_up: Option<F>,
    },
    /// Not ready; carries the task's original error for potential re-raise.
    Deferred(E),
}

/// Work deferred until after the follow-up stage, run in collection order.
pub type LateTask<C, E> = Box<dyn FnOnce(&mut C) -> Result<(), E>>;

/// Follow-up work generated by a successful shell task, run in first-success
/// order with no retry tolerance.
pub type FollowUpTask<C, E> = Box<dyn FnOnce(&mut StageCx<'_, C, E>) -> Result<(), E>>;

/// A shell-stage registration task. `FnMut` because the scheduler may
/// attempt it several times before it succeeds.
pub type ShellTask<C, A, E> =
    Box<dyn FnMut(&mut StageCx<'_, C, E>) -> Outcome<A, FollowUpTask<C, E>, E>>;

/// Context handed to shell and follow-up tasks.
///
/// Wraps the caller's shared context `C` (typically a
/// [`Registry`](crate::Registry)) together with the pipeline's late-stage
/// queue. Derefs to `C`, so registry calls read naturally from task bodies.
pub struct StageCx<'a, C, E> {
    cx: &'a mut C,
    late: &'a mut Vec<LateTask<C, E>>,
}

impl<'a, C, E> StageCx<'a, C, E> {
    pub(crate) fn new(cx: &'a mut C, late: &'a mut Vec<LateTask<C, E>>) -> Self {
        StageCx { cx, late }
    }

    /// The caller's shared context.
    pub fn cx(&mut self) -> &mut C {
        self.cx
    }

    /// Queue `task` for the late stage.
    ///
    /// Late tasks run strictly after every follow-up has completed, in the
    /// order they were deferred. Use this when an artifact needs other
    /// artifacts *fully populated*, not merely present as shells.
    pub fn defer(&mut self, task: impl FnOnce(&mut C) -> Result<(), E> + 'static) {
        self.late.push(Box::new(task));
    }

    /// Number of late tasks queued so far.
    pub fn deferred_len(&self) -> usize {
        self.late.len()
    }
}

impl<C, E> Deref for StageCx<'_, C, E> {
    type Target = C;

    fn deref(&self) -> &C {
        self.cx
    }
}

impl<C, E> DerefMut for StageCx<'_, C, E> {
    fn deref_mut(&mut self) -> &mut C {
        self.cx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_cx_derefs_to_context() {
        let mut names: Vec<String> = vec!["Entity".into()];
        let mut late: Vec<LateTask<Vec<String>, ()>> = Vec::new();
        let mut scx = StageCx::new(&mut names, &mut late);

        assert_eq!(scx.len(), 1);
        scx.push("Topic".into());
        assert_eq!(scx.cx().len(), 2);
    }

    #[test]
    fn defer_queues_in_order() {
        let mut cx = Vec::new();
        let mut late: Vec<LateTask<Vec<u32>, ()>> = Vec::new();
        {
            let mut scx = StageCx::new(&mut cx, &mut late);
            scx.defer(|v| {
                v.push(1);
                Ok(())
            });
            scx.defer(|v| {
                v.push(2);
                Ok(())
            });
            assert_eq!(scx.deferred_len(), 2);
        }
        for task in late {
            task(&mut cx).unwrap();
        }
        assert_eq!(cx, [1, 2]);
    }
}
