use core::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BuildError, TokenState};

/// Structural role of a node within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Selector,
    Sequence,
    Decorator,
    Leaf,
}

impl NodeKind {
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf)
    }
}

/// Callable bound to a leaf node, invoked against the actor's entity.
///
/// Shapes are immutable and referenced by many concurrent traversals, so the
/// callable must be `Send + Sync` and is shared via `Arc`.
pub type LeafAction<E> = Arc<dyn Fn(&mut E) -> TokenState + Send + Sync>;

/// One immutable entry in a flattened tree.
///
/// A shape carries no per-actor state: it describes where a node sits in the
/// depth-first layout (`position`, `end_of_range`), which positions are its
/// children, and (for leaves) the action to run.
pub struct NodeShape<E> {
    handle: String,
    kind: NodeKind,
    children: Vec<usize>,
    position: usize,
    end_of_range: usize,
    leaf_action: Option<LeafAction<E>>,
    immediate: bool,
}

impl<E> NodeShape<E> {
    pub fn new(
        handle: impl Into<String>,
        kind: NodeKind,
        children: Vec<usize>,
        position: usize,
        end_of_range: usize,
        leaf_action: Option<LeafAction<E>>,
        immediate: bool,
    ) -> Result<Self, BuildError> {
        let handle = handle.into();
        if handle.is_empty() {
            return Err(BuildError::EmptyHandle);
        }
        if kind.is_leaf() && !children.is_empty() {
            return Err(BuildError::LeafWithChildren { handle });
        }
        if !kind.is_leaf() && children.is_empty() {
            return Err(BuildError::InnerWithoutChildren { handle });
        }
        if end_of_range < position {
            return Err(BuildError::RangeBeforePosition {
                handle,
                position,
                end_of_range,
            });
        }
        if kind.is_leaf() && leaf_action.is_none() {
            return Err(BuildError::MissingLeafAction { handle });
        }
        if !kind.is_leaf() && leaf_action.is_some() {
            return Err(BuildError::ActionOnInnerNode { handle });
        }

        Ok(Self {
            handle,
            kind,
            children,
            position,
            end_of_range,
            leaf_action,
            immediate,
        })
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Child positions within the owning tree, in traversal order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// This node's own index in the flattened layout.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Index of the last node belonging to this node's subtree.
    pub fn end_of_range(&self) -> usize {
        self.end_of_range
    }

    pub fn leaf_action(&self) -> Option<&LeafAction<E>> {
        self.leaf_action.as_ref()
    }

    /// Whether the leaf action resolves within the current tick. Meaningful
    /// only for leaves.
    pub fn is_immediate(&self) -> bool {
        self.immediate
    }
}

/// Shapes compare by `(handle, kind)` only; children and position are ignored.
///
/// This is the resume-matching rule: a retained token is matched back to a
/// tree node purely by handle and kind. Two distinct nodes sharing both are
/// indistinguishable to resume logic, so handles should be unique per tree.
impl<E> PartialEq for NodeShape<E> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && self.kind == other.kind
    }
}

impl<E> fmt::Debug for NodeShape<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeShape")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("position", &self.position)
            .field("end_of_range", &self.end_of_range)
            .field("has_action", &self.leaf_action.is_some())
            .field("immediate", &self.immediate)
            .finish()
    }
}
