use core::fmt;

use crate::{BuildError, TraversalToken};

/// Stable identifier for an actor, allocated by the registry that spawned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Per-actor traversal record: which tree it runs, where the previous tick
/// suspended, and which deferred actions have since resolved.
///
/// The interpreter reads and rewrites `suspended` and `deferred_results`
/// every tick; `entity` is the opaque payload handed to leaf actions.
pub struct Actor<E> {
    id: ActorId,
    tree_handle: String,
    /// Suspended path from the prior tick, root-first.
    pub suspended: Vec<TraversalToken<E>>,
    /// Resolved results for deferred actions emitted on earlier ticks.
    pub deferred_results: Vec<TraversalToken<E>>,
    pub entity: E,
}

impl<E> Actor<E> {
    pub fn new(id: ActorId, tree_handle: impl Into<String>, entity: E) -> Result<Self, BuildError> {
        let tree_handle = tree_handle.into();
        if tree_handle.is_empty() {
            return Err(BuildError::EmptyActorTreeHandle);
        }
        Ok(Self {
            id,
            tree_handle,
            suspended: Vec::new(),
            deferred_results: Vec::new(),
            entity,
        })
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn tree_handle(&self) -> &str {
        &self.tree_handle
    }

    /// Point the actor at a different tree. Suspended state from the old tree
    /// becomes stale and is dropped by the interpreter on the next tick.
    pub fn set_tree_handle(&mut self, tree_handle: impl Into<String>) -> Result<(), BuildError> {
        let tree_handle = tree_handle.into();
        if tree_handle.is_empty() {
            return Err(BuildError::EmptyActorTreeHandle);
        }
        self.tree_handle = tree_handle;
        Ok(())
    }
}

impl<E> fmt::Debug for Actor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("tree_handle", &self.tree_handle)
            .field("suspended", &self.suspended.len())
            .field("deferred_results", &self.deferred_results.len())
            .finish()
    }
}
