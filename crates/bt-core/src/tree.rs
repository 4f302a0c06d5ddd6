use core::fmt;
use std::sync::Arc;

use crate::{BuildError, NodeShape};

/// A flattened behavior tree: a handle plus its nodes in depth-first order.
///
/// Index 0 is the root. Trees are built once at load time and read-only for
/// the rest of the process; traversal never mutates them, which is what makes
/// one definition safely shareable across threads and actors.
pub struct BehaviorTree<E> {
    handle: String,
    nodes: Vec<Arc<NodeShape<E>>>,
}

impl<E> BehaviorTree<E> {
    pub fn new(
        handle: impl Into<String>,
        nodes: Vec<Arc<NodeShape<E>>>,
    ) -> Result<Self, BuildError> {
        let handle = handle.into();
        if handle.is_empty() {
            return Err(BuildError::EmptyTreeHandle);
        }
        if nodes.is_empty() {
            return Err(BuildError::EmptyTree { handle });
        }
        Ok(Self { handle, nodes })
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn nodes(&self) -> &[Arc<NodeShape<E>>] {
        &self.nodes
    }

    pub fn node(&self, position: usize) -> Option<&Arc<NodeShape<E>>> {
        self.nodes.get(position)
    }

    pub fn root(&self) -> &Arc<NodeShape<E>> {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<E> fmt::Debug for BehaviorTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("handle", &self.handle)
            .field("len", &self.nodes.len())
            .finish()
    }
}
