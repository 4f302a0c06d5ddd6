use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use bt_core::{Actor, ActorId, BehaviorTree, BuildError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown behavior tree `{handle}`")]
    UnknownTree { handle: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Lookup seam between the interpreter and whatever owns tree definitions.
///
/// `has_tree` should be checked before `get_tree`; the interpreter does both
/// and treats a miss as a per-actor reportable condition, never a batch
/// failure.
pub trait TreeSource<E> {
    fn has_tree(&self, handle: &str) -> bool;
    fn get_tree(&self, handle: &str) -> Option<Arc<BehaviorTree<E>>>;
}

/// In-memory tree store plus actor-id allocation.
///
/// The id counter is owned by the registry instance, so independent
/// registries allocate independently.
pub struct TreeRegistry<E> {
    trees: BTreeMap<String, Arc<BehaviorTree<E>>>,
    next_actor_id: u64,
}

impl<E> TreeRegistry<E> {
    pub fn new() -> Self {
        Self {
            trees: BTreeMap::new(),
            next_actor_id: 1,
        }
    }

    /// Register a tree under its own handle, replacing any previous tree with
    /// the same handle. Actors suspended inside a replaced tree fall back to
    /// a fresh traversal once their retained tokens stop matching.
    pub fn register(&mut self, tree: BehaviorTree<E>) -> Arc<BehaviorTree<E>> {
        let tree = Arc::new(tree);
        self.trees
            .insert(tree.handle().to_owned(), Arc::clone(&tree));
        tree
    }

    /// Create an actor bound to a registered tree, allocating its id from
    /// this registry's counter.
    pub fn spawn_actor(&mut self, tree_handle: &str, entity: E) -> Result<Actor<E>, RegistryError> {
        if !self.has_tree(tree_handle) {
            return Err(RegistryError::UnknownTree {
                handle: tree_handle.to_owned(),
            });
        }
        let id = ActorId(self.next_actor_id);
        let actor = Actor::new(id, tree_handle, entity)?;
        self.next_actor_id += 1;
        Ok(actor)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl<E> Default for TreeRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TreeSource<E> for TreeRegistry<E> {
    fn has_tree(&self, handle: &str) -> bool {
        self.trees.contains_key(handle)
    }

    fn get_tree(&self, handle: &str) -> Option<Arc<BehaviorTree<E>>> {
        self.trees.get(handle).cloned()
    }
}
