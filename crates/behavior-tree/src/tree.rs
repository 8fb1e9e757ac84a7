//! Tree manager.
//!
//! [`BehaviorTree`] borrows an arena, a root id and the caller's context, and
//! keeps the two pieces of state a driver loop usually wants: the status of
//! the last tick and a lifetime tick counter.

use crate::{Node, NodeArena, NodeId, Status, ValidationFailure};

/// Drives the tree rooted at one node of an arena.
///
/// Nothing is owned: the arena and the context outlive the manager and stay
/// reachable through [`nodes_mut`](Self::nodes_mut) and
/// [`context_mut`](Self::context_mut).
pub struct BehaviorTree<'a, C> {
    nodes: &'a mut NodeArena<C>,
    root: NodeId,
    context: &'a mut C,
    last_status: Status,
    tick_count: u64,
}

impl<'a, C> BehaviorTree<'a, C> {
    pub fn new(nodes: &'a mut NodeArena<C>, root: NodeId, context: &'a mut C) -> Self {
        Self {
            nodes,
            root,
            context,
            last_status: Status::Failure,
            tick_count: 0,
        }
    }

    /// Ticks the root once, caching and returning its status.
    ///
    /// The tick counter is incremented even if the root is dangling.
    pub fn tick(&mut self) -> Status {
        self.tick_count += 1;
        let status = self.nodes.tick(self.root, self.context);
        self.last_status = status;
        tracing::trace!(tick = self.tick_count, status = %status, "tree ticked");
        status
    }

    /// Resets the root subtree to idle.
    ///
    /// The lifetime tick counter is kept.
    pub fn reset(&mut self) {
        self.nodes.reset(self.root);
        self.last_status = Status::Failure;
        tracing::debug!(tick = self.tick_count, "tree reset");
    }

    /// Validates the whole tree; see [`NodeArena::validate_tree`].
    pub fn validate_tree(&self) -> Result<(), ValidationFailure> {
        self.nodes.validate_tree(self.root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root node, or `None` if the root id is dangling.
    pub fn root_node(&self) -> Option<&Node<C>> {
        self.nodes.node(self.root)
    }

    pub fn nodes(&self) -> &NodeArena<C> {
        self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeArena<C> {
        self.nodes
    }

    pub fn context(&self) -> &C {
        self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        self.context
    }

    /// Status of the most recent tick (`Failure` before the first one).
    pub fn last_status(&self) -> Status {
        self.last_status
    }

    /// Number of ticks since construction. Not cleared by [`reset`](Self::reset).
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
