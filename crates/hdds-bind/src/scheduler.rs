// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixpoint scheduler: retry-based dependency ordering.
//!
//! The descriptor set this crate bootstraps never declares its dependency
//! graph, so the scheduler substitutes exhaustive retry for graph analysis:
//! it sweeps the worklist in order, removes every task that succeeds, and
//! repeats until the worklist is empty. A task whose prerequisite has not
//! been published yet simply fails this pass and is retried on the next one.
//!
//! # Termination
//!
//! Each pass resolves at least the current "depth layer" of the latent
//! dependency relation, so an acyclic relation drains in at most depth+1
//! passes (O(n·d) attempts, O(n²) worst case). A true cycle or a permanently
//! missing prerequisite produces one pass with zero progress; that arms
//! stuck mode, and the very next pass raises the first unresolved task's own
//! error instead of looping forever. Silent hangs become diagnosable
//! failures.
//!
//! # Failure semantics
//!
//! Exactly one underlying cause is reported: the original error of the first
//! task still failing in the terminal pass, unwrapped. Errors from other
//! still-pending tasks are discarded; the caller is expected to abort the
//! whole load operation anyway.

use log::{debug, trace};

use crate::task::Outcome;

/// Drive `worklist` to a fixpoint against the shared context `cx`.
///
/// Returns the completed registrations in first-success order. For tasks
/// with a genuine prerequisite relation, that order is a valid topological
/// order; independent tasks keep their relative worklist order within a
/// pass but have no cross-pass guarantee.
///
/// # Errors
///
/// If the worklist stops shrinking, the next pass returns the first
/// still-failing task's error verbatim.
pub fn run_to_fixpoint<C, T, A, F, E>(
    cx: &mut C,
    mut worklist: Vec<T>,
) -> Result<Vec<(A, Option<F>)>, E>
where
    T: FnMut(&mut C) -> Outcome<A, F, E>,
{
    let mut completed = Vec::with_capacity(worklist.len());
    let mut stuck = false;
    let mut pass = 0usize;

    while !worklist.is_empty() {
        pass += 1;
        let before = worklist.len();

        // Stable in-order sweep with in-place removal of successes, so a
        // task published mid-pass is visible to every task after it.
        let mut i = 0;
        while i < worklist.len() {
            match (worklist[i])(cx) {
                Outcome::Success {
                    artifact,
                    follow_up,
                } => {
                    completed.push((artifact, follow_up));
                    worklist.remove(i);
                }
                Outcome::Deferred(err) => {
                    if stuck {
                        // Final chance exhausted: surface the task's own
                        // error, never a synthesized "stuck" error.
                        debug!(
                            "bootstrap: pass {} unresolvable, {} tasks pending",
                            pass,
                            worklist.len()
                        );
                        return Err(err);
                    }
                    i += 1;
                }
            }
        }

        trace!(
            "bootstrap: pass {} resolved {} of {} tasks",
            pass,
            before - worklist.len(),
            before
        );

        if worklist.len() == before {
            // Zero progress: the next pass is terminal.
            debug!(
                "bootstrap: pass {} made no progress, {} tasks get one final attempt",
                pass,
                worklist.len()
            );
            stuck = true;
        } else {
            stuck = false;
        }
    }

    Ok(completed)
}
