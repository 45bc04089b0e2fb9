// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # hdds-bind - Bootstrap scheduler for HDDS language bindings
//!
//! Brings a large set of binding descriptors "online" in a runtime-enforced
//! order, even though no descriptor ever declares its own dependencies. The
//! binding layer for a scripting host consists of thousands of per-type
//! descriptors (DataWriter extends Entity, Topic uses TypeSupport, ...);
//! instead of maintaining an explicit dependency graph by hand, this crate
//! retries registration to a fixpoint and lets the order discover itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use hdds_bind::{BindError, BootstrapPipeline, Registry, TypeDescriptor};
//!
//! fn main() -> Result<(), BindError> {
//!     let mut pipeline = BootstrapPipeline::new();
//!     // Worklist order is deliberately wrong; the scheduler fixes it.
//!     pipeline.add_descriptor(TypeDescriptor::new("DataWriter").extends("Entity"));
//!     pipeline.add_descriptor(TypeDescriptor::new("Entity"));
//!
//!     let mut registry = Registry::new();
//!     let order = pipeline.run(&mut registry)?;
//!
//!     assert_eq!(order, ["Entity", "DataWriter"]);
//!     assert!(registry.resolve("DataWriter").unwrap().populated);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                     BootstrapPipeline                        |
//! |  stage 1: shells      stage 2: follow-ups   stage 3: late    |
//! |  (fixpoint retry)     (first-success order) (collection      |
//! |                       (no retry)             order, no retry)|
//! +--------------------------------------------------------------+
//! |                     FixpointScheduler                        |
//! |  sweep worklist in order, remove successes, repeat;          |
//! |  zero-progress pass arms stuck mode; next pass raises        |
//! +--------------------------------------------------------------+
//! |                  Registry (artifact namespace)               |
//! |  append-only, single-writer, re-entrant visibility           |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BootstrapPipeline`] | Three-stage bootstrap driver (start here) |
//! | [`TypeDescriptor`] | Declarative description of one exposed type |
//! | [`Registry`] | Append-only namespace the bootstrap populates |
//! | [`Outcome`] | Result of one registration attempt |
//! | [`StageCx`] | Context handed to shell and follow-up tasks |
//!
//! ## Failure model
//!
//! A prerequisite that is not published *yet* is retried silently. A
//! prerequisite that never appears (missing or cyclic) stops the worklist
//! from shrinking; one further pass runs, and the first still-failing
//! task's own error is raised unwrapped - exactly one cause, never a
//! synthesized "stuck" error and never a cascade.
//!
//! The scheduler and pipeline are generic over the context and error types;
//! the [`descriptor`] layer instantiates them for the common case of typed
//! artifacts in a [`Registry`].
//!
//! ## Concurrency
//!
//! None. The bootstrap is single-threaded and synchronous by design: later
//! tasks must observe earlier successes within the same pass. Run it once,
//! to completion, before anything observes the namespace.

/// Binding descriptors for exposed types and their lowering to shell tasks.
pub mod descriptor;
/// Error types for the binding bootstrap.
pub mod error;
/// Staged bootstrap pipeline (shells, follow-ups, late tasks).
pub mod pipeline;
/// Append-only artifact namespace and the publication seam.
pub mod registry;
/// Fixpoint scheduler: retry-based dependency ordering.
pub mod scheduler;
/// Registration task model (outcomes, task aliases, stage context).
pub mod task;

pub use descriptor::{PopulateFn, TypeArtifact, TypeDescriptor};
pub use error::{BindError, Result};
pub use pipeline::BootstrapPipeline;
pub use registry::{Exposer, Registry};
pub use scheduler::run_to_fixpoint;
pub use task::{FollowUpTask, LateTask, Outcome, ShellTask, StageCx};

/// hdds-bind version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
