//! Resumable behavior-tree interpreter.
//!
//! Walks a batch of actors through shared tree definitions one tick at a
//! time. When a leaf emits a deferred action the tick suspends mid-tree,
//! persisting the active path on the actor; the next tick resumes at exactly
//! that point once the action's result has been merged back in. Traversal is
//! single-threaded per interpreter instance; instances over disjoint actor
//! subsets may run in parallel, and the returned deferred-action queue is
//! drained by a single-threaded execute phase.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod interp;
pub mod queue;
pub mod registry;

pub use interp::TreeInterpreter;
pub use queue::{execute_deferred, DeferredRequest};
pub use registry::{RegistryError, TreeRegistry, TreeSource};
