use std::sync::Arc;

use crate::{BehaviorTree, BuildError, LeafAction, NodeKind, NodeShape, TokenState};

/// Nested description of a tree, flattened into depth-first layout on build.
///
/// Positions and subtree ranges are derived during flattening, so callers
/// describe structure only. Handles should be unique within a tree: resume
/// matching identifies nodes by `(handle, kind)`.
pub struct NodeSpec<E> {
    handle: String,
    kind: NodeKind,
    children: Vec<NodeSpec<E>>,
    action: Option<LeafAction<E>>,
    immediate: bool,
}

impl<E> NodeSpec<E> {
    pub fn selector(handle: impl Into<String>, children: Vec<NodeSpec<E>>) -> Self {
        Self {
            handle: handle.into(),
            kind: NodeKind::Selector,
            children,
            action: None,
            immediate: false,
        }
    }

    pub fn sequence(handle: impl Into<String>, children: Vec<NodeSpec<E>>) -> Self {
        Self {
            handle: handle.into(),
            kind: NodeKind::Sequence,
            children,
            action: None,
            immediate: false,
        }
    }

    pub fn decorator(handle: impl Into<String>, child: NodeSpec<E>) -> Self {
        Self {
            handle: handle.into(),
            kind: NodeKind::Decorator,
            children: vec![child],
            action: None,
            immediate: false,
        }
    }

    /// A leaf whose action resolves within the tick it runs in.
    pub fn leaf(
        handle: impl Into<String>,
        action: impl Fn(&mut E) -> TokenState + Send + Sync + 'static,
    ) -> Self {
        Self {
            handle: handle.into(),
            kind: NodeKind::Leaf,
            children: Vec::new(),
            action: Some(Arc::new(action)),
            immediate: true,
        }
    }

    /// A leaf whose action is queued for the single-threaded execute phase
    /// and resolved on a later tick.
    pub fn deferred_leaf(
        handle: impl Into<String>,
        action: impl Fn(&mut E) -> TokenState + Send + Sync + 'static,
    ) -> Self {
        Self {
            handle: handle.into(),
            kind: NodeKind::Leaf,
            children: Vec::new(),
            action: Some(Arc::new(action)),
            immediate: false,
        }
    }
}

struct FlatNode<E> {
    handle: String,
    kind: NodeKind,
    children: Vec<usize>,
    position: usize,
    end_of_range: usize,
    action: Option<LeafAction<E>>,
    immediate: bool,
}

fn flatten<E>(spec: NodeSpec<E>, out: &mut Vec<FlatNode<E>>) -> usize {
    let NodeSpec {
        handle,
        kind,
        children,
        action,
        immediate,
    } = spec;

    let position = out.len();
    out.push(FlatNode {
        handle,
        kind,
        children: Vec::new(),
        position,
        end_of_range: position,
        action,
        immediate,
    });

    let mut child_positions = Vec::with_capacity(children.len());
    for child in children {
        child_positions.push(flatten(child, out));
    }
    let end_of_range = out.len() - 1;

    let node = &mut out[position];
    node.children = child_positions;
    node.end_of_range = end_of_range;
    position
}

impl<E> BehaviorTree<E> {
    /// Flatten a nested spec into a depth-first tree rooted at position 0.
    pub fn from_spec(handle: impl Into<String>, root: NodeSpec<E>) -> Result<Self, BuildError> {
        let mut flat = Vec::new();
        flatten(root, &mut flat);

        let mut nodes = Vec::with_capacity(flat.len());
        for node in flat {
            nodes.push(Arc::new(NodeShape::new(
                node.handle,
                node.kind,
                node.children,
                node.position,
                node.end_of_range,
                node.action,
                node.immediate,
            )?));
        }
        Self::new(handle, nodes)
    }
}
