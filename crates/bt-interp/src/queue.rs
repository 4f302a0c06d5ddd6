use core::fmt;

use bt_core::{Actor, ActorId, LeafAction, TraversalToken};

/// A deferred leaf action emitted during traversal, waiting for the execute
/// phase.
///
/// Carries the originating actor and the suspended leaf token so the result
/// can be routed back to the right actor's `deferred_results` and spliced
/// into its suspended path on the next tick.
pub struct DeferredRequest<E> {
    pub actor: ActorId,
    pub token: TraversalToken<E>,
    pub action: LeafAction<E>,
}

impl<E> fmt::Debug for DeferredRequest<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredRequest")
            .field("actor", &self.actor)
            .field("token", &self.token)
            .finish()
    }
}

/// The single-threaded execute phase.
///
/// Runs each queued action against its actor's entity in queue order and
/// records the resolved token in that actor's `deferred_results`. Must run
/// after all traversal work for the tick has finished; execution order can
/// affect shared world state, so this is never parallelized.
pub fn execute_deferred<E>(requests: Vec<DeferredRequest<E>>, actors: &mut [Actor<E>]) {
    for request in requests {
        let Some(actor) = actors.iter_mut().find(|a| a.id() == request.actor) else {
            tracing::warn!(
                actor = request.actor.0,
                node = request.token.reference().handle(),
                "dropping deferred action for actor missing from batch"
            );
            continue;
        };

        let state = (request.action)(&mut actor.entity);
        let mut token = request.token;
        token.set_state(state);
        actor.deferred_results.push(token);
    }
}
