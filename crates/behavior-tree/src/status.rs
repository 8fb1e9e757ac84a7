//! Status and node-kind vocabulary.
//!
//! Everything here is plain data. The string forms (`SUCCESS`, `SEQUENCE`,
//! `LEAF_MISSING_TICK`, ...) are stable and intended for logs and tooling.

/// The result of ticking a node.
///
/// # Reactive Semantics
///
/// A tree is re-evaluated by an external driver loop, so a node may need more
/// than one tick to resolve:
/// - `Running` means "not finished yet, tick me again"
/// - `Error` is a configuration fault, never a domain outcome
///
/// The default (idle) status is `Failure`, which is also what [`reset`] leaves
/// behind.
///
/// [`reset`]: crate::NodeArena::reset
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum Status {
    /// The node completed successfully.
    ///
    /// For conditions: the condition was met.
    /// For actions: the action finished without problems.
    Success = 0,

    /// The node failed. Recoverable through tree structure.
    #[default]
    Failure = 1,

    /// The node has not resolved yet and expects another tick.
    Running = 2,

    /// Structural or configuration fault (e.g. a leaf without a callback).
    Error = 3,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub const fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub const fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` if this status is `Error`.
    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(self, Status::Error)
    }

    /// Returns `true` for every resolved status (anything but `Running`).
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !self.is_running()
    }

    /// Swaps `Success` and `Failure`; `Running` and `Error` pass through.
    #[inline]
    pub const fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            other => other,
        }
    }

    /// Stable upper-case name, e.g. `"RUNNING"`.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Kind of a node, which selects its tick algorithm.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum NodeType {
    /// Leaf that performs work.
    #[default]
    Action,
    /// Leaf that checks a predicate. Dispatches exactly like `Action`.
    Condition,
    /// Composite: all children must succeed, in order (AND).
    Sequence,
    /// Composite: first successful child wins (OR).
    Selector,
    /// Composite: every unfinished child is ticked each cycle.
    Parallel,
    /// Decorator: swaps its single child's Success and Failure.
    Inverter,
}

impl NodeType {
    /// `Action` or `Condition`.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeType::Action | NodeType::Condition)
    }

    /// `Sequence`, `Selector` or `Parallel`.
    #[inline]
    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            NodeType::Sequence | NodeType::Selector | NodeType::Parallel
        )
    }

    /// `Inverter`.
    #[inline]
    pub const fn is_decorator(self) -> bool {
        matches!(self, NodeType::Inverter)
    }

    /// Stable upper-case name, e.g. `"SELECTOR"`.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Success policy of a `Parallel` node.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ParallelPolicy {
    /// Succeed once every child succeeded; fail on the first failure.
    #[default]
    RequireAll,
    /// Succeed on the first child success; fail once all children failed.
    RequireOne,
}
