use thiserror::Error;

/// Errors raised while constructing trees, shapes, tokens or actors.
///
/// Malformed structure is rejected at build time; traversal never observes it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("node handle must be non-empty")]
    EmptyHandle,

    #[error("leaf node `{handle}` must not have children")]
    LeafWithChildren { handle: String },

    #[error("inner node `{handle}` must have at least one child")]
    InnerWithoutChildren { handle: String },

    #[error("node `{handle}`: end of range {end_of_range} precedes position {position}")]
    RangeBeforePosition {
        handle: String,
        position: usize,
        end_of_range: usize,
    },

    #[error("leaf node `{handle}` is missing its action")]
    MissingLeafAction { handle: String },

    #[error("inner node `{handle}` must not carry a leaf action")]
    ActionOnInnerNode { handle: String },

    #[error("tree handle must be non-empty")]
    EmptyTreeHandle,

    #[error("tree `{handle}` must contain at least one node")]
    EmptyTree { handle: String },

    #[error("actor tree handle must be non-empty")]
    EmptyActorTreeHandle,
}
