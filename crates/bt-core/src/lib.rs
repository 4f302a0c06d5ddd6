//! Deterministic behavior-tree primitives.
//!
//! A tree is a flattened, depth-first array of immutable node shapes addressed
//! by integer position; live traversal state lives in short-lived traversal
//! tokens so one tree definition can drive arbitrarily many actors at once.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actor;
pub mod builder;
pub mod error;
pub mod shape;
pub mod state;
pub mod tick;
pub mod token;
pub mod tree;

pub use actor::{Actor, ActorId};
pub use builder::NodeSpec;
pub use error::BuildError;
pub use shape::{LeafAction, NodeKind, NodeShape};
pub use state::TokenState;
pub use tick::TickContext;
pub use token::TraversalToken;
pub use tree::BehaviorTree;
