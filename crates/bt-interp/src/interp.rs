use std::collections::VecDeque;
use std::sync::Arc;

use bt_core::{Actor, BehaviorTree, NodeKind, TickContext, TokenState, TraversalToken};

use crate::queue::DeferredRequest;
use crate::registry::TreeSource;

/// Walks actors through their behavior trees one tick at a time.
///
/// All scratch state is per-instance and cleared between actors, so nothing
/// is shared within a batch. Run one interpreter per worker thread over
/// disjoint actor subsets for the parallel load/traverse phase; each
/// instance accumulates its own deferred-action queue, drained afterwards by
/// the single-threaded execute phase.
pub struct TreeInterpreter<E> {
    /// Tree definition for the actor currently being processed. Kept across
    /// actors so a batch sharing one tree loads it once.
    current_tree: Option<Arc<BehaviorTree<E>>>,
    /// Replay queue rebuilt from the actor's suspended stack, root-first,
    /// with resolved deferred results spliced in.
    replay: VecDeque<TraversalToken<E>>,
    /// Ancestors of the node currently being visited, used for result
    /// propagation.
    active_path: Vec<TraversalToken<E>>,
    /// Suspended path collected when the walk halts on a deferred action.
    next_suspension: Vec<TraversalToken<E>>,
    /// Deferred actions emitted this batch, in traversal order.
    deferred: Vec<DeferredRequest<E>>,
}

impl<E> TreeInterpreter<E> {
    pub fn new() -> Self {
        Self {
            current_tree: None,
            replay: VecDeque::new(),
            active_path: Vec::new(),
            next_suspension: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Drain one traversal tick for every actor in the batch.
    ///
    /// Returns the deferred-action queue for this tick. Callers execute it
    /// (see `execute_deferred`) and write results into each actor's
    /// `deferred_results` before the next tick. One actor's failure never
    /// aborts the batch: an unknown tree handle skips that actor for the
    /// tick, leaving its stored state untouched.
    pub fn interpret_batch(
        &mut self,
        trees: &impl TreeSource<E>,
        actors: &mut [Actor<E>],
        ctx: &TickContext,
    ) -> Vec<DeferredRequest<E>> {
        for actor in actors.iter_mut() {
            if !self.select_tree(trees, actor.tree_handle()) {
                tracing::warn!(
                    actor = actor.id().0,
                    tree = actor.tree_handle(),
                    "unknown behavior tree, skipping actor for this tick"
                );
                continue;
            }
            self.load_suspended(actor);
            self.walk(actor, ctx);
            self.write_back_and_clean(actor);
        }
        std::mem::take(&mut self.deferred)
    }

    /// Switch to the actor's tree if it differs from the loaded one.
    fn select_tree(&mut self, trees: &impl TreeSource<E>, handle: &str) -> bool {
        if self
            .current_tree
            .as_ref()
            .is_some_and(|tree| tree.handle() == handle)
        {
            return true;
        }
        if !trees.has_tree(handle) {
            return false;
        }
        match trees.get_tree(handle) {
            Some(tree) => {
                self.current_tree = Some(tree);
                true
            }
            None => false,
        }
    }

    /// Rebuild the replay queue from the actor's suspended stack, splicing in
    /// resolved deferred results where a result token matches a suspended
    /// one. Results that match nothing are dropped.
    fn load_suspended(&mut self, actor: &mut Actor<E>) {
        let mut results = std::mem::take(&mut actor.deferred_results);
        for token in actor.suspended.drain(..) {
            match results.iter().position(|result| *result == token) {
                Some(index) => self.replay.push_back(results.swap_remove(index)),
                None => self.replay.push_back(token),
            }
        }
        for leftover in results {
            tracing::debug!(
                actor = actor.id().0,
                node = leftover.reference().handle(),
                "dropping deferred result with no matching suspended token"
            );
        }
    }

    /// Depth-first walk with replay-matching: one tick of traversal for one
    /// actor.
    fn walk(&mut self, actor: &mut Actor<E>, ctx: &TickContext) {
        let Some(tree) = self.current_tree.clone() else {
            return;
        };
        let len = tree.len();
        let mut cursor = 0usize;

        while cursor < len {
            let shape = match tree.node(cursor) {
                Some(shape) => Arc::clone(shape),
                None => break,
            };

            // Resume path: the head of the replay queue is what the previous
            // tick decided for this exact node.
            let resumes = self
                .replay
                .front()
                .is_some_and(|token| token.reference() == &shape);
            if resumes {
                if let Some(token) = self.replay.pop_front() {
                    self.resume_token(token, actor, &mut cursor, len);
                }
                continue;
            }

            // Freshly-entered node.
            let token = TraversalToken::new(shape);
            if token.reference().kind().is_leaf() {
                self.perform_leaf(token, actor, &mut cursor, len);
            } else {
                self.handle_inner(token, &mut cursor, len);
            }
        }

        tracing::trace!(actor = actor.id().0, tick = ctx.tick, "walk finished");
    }

    /// Continue a token retained from the previous tick.
    fn resume_token(
        &mut self,
        token: TraversalToken<E>,
        actor: &mut Actor<E>,
        cursor: &mut usize,
        len: usize,
    ) {
        let state = token.state();
        if state.is_terminal() {
            // A deferred result was spliced in during load; fold it upward.
            self.active_path.push(token);
            self.resolve_top(cursor, len);
            return;
        }

        if token.reference().kind().is_leaf() {
            if state == TokenState::Running {
                // The deferred action has not resolved yet: keep waiting
                // without re-enqueueing it.
                self.active_path.push(token);
                self.halt_with_running(cursor, len);
            } else {
                // A non-running leaf on the suspended stack is stale
                // bookkeeping; re-enter the node fresh.
                self.perform_leaf(token, actor, cursor, len);
            }
            return;
        }

        match token.current_running_child() {
            Some(child) if state == TokenState::Running => {
                // Descend exactly where the prior tick suspended.
                self.active_path.push(token);
                *cursor = child;
            }
            _ => {
                // No usable descent point recorded; fall back to the next
                // untried child.
                self.handle_inner(token, cursor, len);
            }
        }
    }

    /// Run or enqueue a leaf's action and react to the resulting state.
    fn perform_leaf(
        &mut self,
        mut token: TraversalToken<E>,
        actor: &mut Actor<E>,
        cursor: &mut usize,
        len: usize,
    ) {
        let Some(action) = token.reference().leaf_action().cloned() else {
            // Unreachable after construction validation; fail the branch
            // rather than the batch.
            token.set_state(TokenState::UnexpectedFail);
            self.active_path.push(token);
            self.resolve_top(cursor, len);
            return;
        };

        if token.reference().is_immediate() {
            let state = action(&mut actor.entity);
            if state.is_terminal() {
                token.set_state(state);
            } else {
                // An immediate action must resolve within the tick; nothing
                // was enqueued, so a Running result could never resume.
                tracing::warn!(
                    actor = actor.id().0,
                    node = token.reference().handle(),
                    ?state,
                    "immediate leaf action returned a non-terminal state"
                );
                token.set_state(TokenState::UnexpectedFail);
            }
            self.active_path.push(token);
            self.resolve_top(cursor, len);
        } else {
            token.set_state(TokenState::Running);
            self.deferred.push(DeferredRequest {
                actor: actor.id(),
                token: token.clone(),
                action,
            });
            tracing::debug!(
                actor = actor.id().0,
                node = token.reference().handle(),
                "deferred action enqueued, suspending traversal"
            );
            self.active_path.push(token);
            self.halt_with_running(cursor, len);
        }
    }

    /// Pick an inner node's next untried child and descend, or clean-fail it
    /// once the children are exhausted.
    fn handle_inner(&mut self, mut token: TraversalToken<E>, cursor: &mut usize, len: usize) {
        match token.next_unvisited_child() {
            Some(child) => {
                token.set_state(TokenState::Running);
                token.set_running_child(child);
                self.active_path.push(token);
                *cursor = child;
            }
            None => {
                token.set_state(TokenState::CleanFail);
                self.active_path.push(token);
                self.resolve_top(cursor, len);
            }
        }
    }

    /// Fold the terminal token on top of the active path into its ancestors.
    ///
    /// Repeats upward until a parent selects another child to descend into,
    /// or the path empties because the whole tree resolved this tick.
    fn resolve_top(&mut self, cursor: &mut usize, len: usize) {
        loop {
            let Some(child) = self.active_path.pop() else {
                return;
            };

            let mut result = child.state();
            if result == TokenState::UnexpectedFail {
                // Decorator handling for unexpected failures is not defined;
                // degrade to a clean failure so the batch keeps going.
                tracing::warn!(
                    node = child.reference().handle(),
                    "unexpected failure degraded to clean failure"
                );
                result = TokenState::CleanFail;
            }

            let Some(parent) = self.active_path.last_mut() else {
                // Root resolved: stop the walk, leaving no suspended state.
                tracing::debug!(
                    node = child.reference().handle(),
                    ?result,
                    "tree resolved this tick"
                );
                *cursor = len;
                return;
            };

            match (parent.reference().kind(), result) {
                // Sequence advances past a successful child; selector
                // advances past a failed one.
                (NodeKind::Sequence, TokenState::Success)
                | (NodeKind::Selector, TokenState::CleanFail) => {
                    match parent.next_unvisited_child() {
                        Some(next) => {
                            parent.set_running_child(next);
                            *cursor = next;
                            return;
                        }
                        None => {
                            let resolved = match parent.reference().kind() {
                                NodeKind::Sequence => TokenState::Success,
                                _ => TokenState::CleanFail,
                            };
                            parent.set_state(resolved);
                        }
                    }
                }
                (NodeKind::Sequence, _) => parent.set_state(TokenState::CleanFail),
                (NodeKind::Selector, _) => parent.set_state(TokenState::Success),
                // Decorators pass their single child's result through.
                (NodeKind::Decorator, state) => parent.set_state(state),
                (NodeKind::Leaf, state) => {
                    // Leaves have no children, so they never sit above
                    // another token on the path.
                    tracing::warn!(
                        node = parent.reference().handle(),
                        "leaf token found as a propagation parent"
                    );
                    parent.set_state(state);
                }
            }
        }
    }

    /// Suspend the walk: everything on the active path is still running and
    /// must be retained, root-first, for the next tick.
    fn halt_with_running(&mut self, cursor: &mut usize, len: usize) {
        self.next_suspension.clear();
        while let Some(mut token) = self.active_path.pop() {
            token.set_state(TokenState::Running);
            self.next_suspension.push(token);
        }
        self.next_suspension
            .sort_by(|a, b| a.position().cmp(&b.position()));
        *cursor = len;
    }

    /// Persist the collected suspension on the actor and clear all scratch
    /// before the next actor. Unconsumed replay entries are stale and
    /// dropped here.
    fn write_back_and_clean(&mut self, actor: &mut Actor<E>) {
        actor.suspended = std::mem::take(&mut self.next_suspension);

        if !self.replay.is_empty() {
            tracing::debug!(
                actor = actor.id().0,
                count = self.replay.len(),
                "dropping stale suspended tokens"
            );
            self.replay.clear();
        }
        self.active_path.clear();
    }
}

impl<E> Default for TreeInterpreter<E> {
    fn default() -> Self {
        Self::new()
    }
}
