use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use crate::{NodeShape, TokenState};

/// Live traversal state for one node visit: a shape plus progress data.
///
/// Tokens are short-lived and mutated often, in contrast to the read-only
/// shapes they reference. A token is created when traversal enters a node,
/// handed to the actor's suspended stack if the tick halts mid-tree, and
/// discarded once its subtree resolves and the result has been folded into
/// its parent.
pub struct TraversalToken<E> {
    reference: Arc<NodeShape<E>>,
    state: TokenState,
    current_running_child: Option<usize>,
    previously_run_children: Vec<usize>,
}

impl<E> TraversalToken<E> {
    /// A fresh token in `Ready` state, as built when traversal first enters a
    /// node.
    pub fn new(reference: Arc<NodeShape<E>>) -> Self {
        Self {
            reference,
            state: TokenState::Ready,
            current_running_child: None,
            previously_run_children: Vec::new(),
        }
    }

    /// A token carrying a known state, as built by the execute phase when a
    /// deferred action resolves.
    pub fn with_state(reference: Arc<NodeShape<E>>, state: TokenState) -> Self {
        Self {
            reference,
            state,
            current_running_child: None,
            previously_run_children: Vec::new(),
        }
    }

    pub fn reference(&self) -> &Arc<NodeShape<E>> {
        &self.reference
    }

    pub fn state(&self) -> TokenState {
        self.state
    }

    pub fn set_state(&mut self, state: TokenState) {
        self.state = state;
    }

    /// Position of the referenced node in its tree.
    pub fn position(&self) -> usize {
        self.reference.position()
    }

    /// The child position traversal is currently descended into, if any.
    pub fn current_running_child(&self) -> Option<usize> {
        self.current_running_child
    }

    /// Record the child currently being descended into. Rejected unless the
    /// value is one of the referenced shape's children.
    pub fn set_running_child(&mut self, child: usize) -> bool {
        if self.reference.children().contains(&child) {
            self.current_running_child = Some(child);
            true
        } else {
            false
        }
    }

    /// The lowest-indexed not-yet-attempted child, by order in the shape's
    /// child list, recording it as attempted. `None` once all children have
    /// been tried.
    pub fn next_unvisited_child(&mut self) -> Option<usize> {
        let index = self.previously_run_children.len();
        let child = *self.reference.children().get(index)?;
        self.previously_run_children.push(child);
        Some(child)
    }

    pub fn previously_run_children(&self) -> &[usize] {
        &self.previously_run_children
    }
}

impl<E> Clone for TraversalToken<E> {
    fn clone(&self) -> Self {
        Self {
            reference: Arc::clone(&self.reference),
            state: self.state,
            current_running_child: self.current_running_child,
            previously_run_children: self.previously_run_children.clone(),
        }
    }
}

/// Tokens compare equal when their references match, i.e. by the shape's
/// `(handle, kind)`. This is the splice rule for merging deferred results
/// back into a suspended path.
impl<E> PartialEq for TraversalToken<E> {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

/// Tokens order by tree position ascending, which is root-first in a
/// depth-first layout. Assumes handles are unique per tree, per the equality
/// contract.
impl<E> PartialOrd for TraversalToken<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.position().cmp(&other.position()))
    }
}

impl<E> fmt::Debug for TraversalToken<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalToken")
            .field("handle", &self.reference.handle())
            .field("kind", &self.reference.kind())
            .field("state", &self.state)
            .field("current_running_child", &self.current_running_child)
            .field("previously_run_children", &self.previously_run_children)
            .finish()
    }
}
