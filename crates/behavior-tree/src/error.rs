//! Error types for tree construction and structural validation.
//!
//! Tick-time faults are never errors in the Rust sense: they surface as
//! [`Status::Error`](crate::Status::Error). The types here cover the two
//! phases that run before the tick loop, building and validating.

use crate::NodeId;

/// Structural rule violated by a node.
///
/// Rules are checked in declaration order; the first violation wins.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    thiserror::Error,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ValidateError {
    #[error("child count exceeds the configured capacity")]
    ChildrenExceedMax,

    #[error("child reference does not resolve to a node")]
    NullChild,

    #[error("leaf node has no tick callback")]
    LeafMissingTick,

    #[error("inverter must have exactly one child")]
    InverterNotOneChild,

    #[error("parallel children exceed the completion bitmask width")]
    ParallelExceedsBitmap,
}

impl ValidateError {
    /// Stable upper-case code, e.g. `"LEAF_MISSING_TICK"`.
    #[inline]
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// First structural fault found by a recursive validation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("node {node}: {error}")]
pub struct ValidationFailure {
    /// The offending node.
    pub node: NodeId,
    pub error: ValidateError,
}

/// Errors raised by the arena's build-phase API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("node {0} does not exist in this arena")]
    UnknownNode(NodeId),

    #[error("node {node} has no free child slot (capacity {capacity})")]
    ChildSlotsExhausted { node: NodeId, capacity: usize },

    #[error("node {child} is already attached to {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}
