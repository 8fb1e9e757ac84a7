//! The node entity and its configuration API.
//!
//! A [`Node`] holds its kind, its persisted status, the resumable bookkeeping
//! of composites (cursor and completion masks) and up to three callback slots.
//! Children are referenced by [`NodeId`]; nodes live in a
//! [`NodeArena`](crate::NodeArena), which owns every node of a tree and wires
//! parent/child links.

use std::borrow::Cow;
use std::fmt;

use arrayvec::ArrayVec;

use crate::behavior::{Hook, TickFn};
use crate::{Behavior, ChildMask, NodeType, ParallelPolicy, Status, TreeConfig};

/// Stable handle to a node inside a [`NodeArena`](crate::NodeArena).
///
/// Ids are minted by the arena in insertion order and are tagged with the
/// arena that minted them. An id from another arena never resolves; such a
/// dangling reference is reported by validation and yields [`Status::Error`]
/// when reached during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    arena: u32,
    index: u32,
}

impl NodeId {
    #[inline]
    pub(crate) const fn new(arena: u32, index: u32) -> Self {
        Self { arena, index }
    }

    #[inline]
    pub(crate) const fn arena(self) -> u32 {
        self.arena
    }

    /// Position of the node in its arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

pub(crate) type Children = ArrayVec<NodeId, { TreeConfig::MAX_CHILD_SLOTS }>;

/// A behavior tree node.
///
/// Configure a node with the `with_*` builders before adding it to an arena,
/// or through [`NodeArena::node_mut`](crate::NodeArena::node_mut) afterwards.
/// A fresh node is an `Action` with idle status `Failure` and no callbacks.
pub struct Node<C> {
    // Hot state, touched on every tick.
    pub(crate) kind: NodeType,
    pub(crate) status: Status,
    pub(crate) cursor: usize,
    pub(crate) policy: ParallelPolicy,
    pub(crate) done: ChildMask,
    pub(crate) succeeded: ChildMask,

    pub(crate) tick: Option<TickFn<C>>,
    pub(crate) on_enter: Option<Hook<C>>,
    pub(crate) on_exit: Option<Hook<C>>,

    pub(crate) children: Children,
    pub(crate) parent: Option<NodeId>,

    name: Cow<'static, str>,
}

impl<C> Node<C> {
    /// Creates an `Action` node. The name is only used for diagnostics.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: NodeType::Action,
            status: Status::Failure,
            cursor: 0,
            policy: ParallelPolicy::RequireAll,
            done: ChildMask::EMPTY,
            succeeded: ChildMask::EMPTY,
            tick: None,
            on_enter: None,
            on_exit: None,
            children: ArrayVec::new(),
            parent: None,
            name: name.into(),
        }
    }

    // ===== builders =====

    #[must_use]
    pub fn with_type(mut self, kind: NodeType) -> Self {
        self.kind = kind;
        self
    }

    /// Binds a closure as the tick callback.
    #[must_use]
    pub fn with_tick<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) -> Status + Send + 'static,
    {
        self.set_tick(f);
        self
    }

    /// Binds a [`Behavior`] implementation as the tick callback.
    #[must_use]
    pub fn with_behavior<B>(mut self, behavior: B) -> Self
    where
        B: Behavior<C> + 'static,
    {
        self.set_behavior(behavior);
        self
    }

    #[must_use]
    pub fn with_on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.set_on_enter(f);
        self
    }

    #[must_use]
    pub fn with_on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.set_on_exit(f);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ParallelPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ===== mutators =====

    pub fn set_type(&mut self, kind: NodeType) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn set_tick<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut C) -> Status + Send + 'static,
    {
        self.tick = Some(Box::new(f));
        self
    }

    pub fn set_behavior<B>(&mut self, behavior: B) -> &mut Self
    where
        B: Behavior<C> + 'static,
    {
        self.tick = Some(Box::new(behavior));
        self
    }

    /// Unbinds the tick callback. Ticking an unbound leaf yields `Error`.
    pub fn clear_tick(&mut self) -> &mut Self {
        self.tick = None;
        self
    }

    pub fn set_on_enter<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn set_on_exit<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.on_exit = Some(Box::new(f));
        self
    }

    pub fn set_policy(&mut self, policy: ParallelPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    // ===== queries =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_type(&self) -> NodeType {
        self.kind
    }

    /// Status after the most recent tick (or `Failure` when idle).
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Index of the child a Sequence/Selector resumes from.
    ///
    /// Only meaningful while the node is `Running`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }

    /// Children of a Parallel node that reached a terminal status this run.
    pub fn done_mask(&self) -> ChildMask {
        self.done
    }

    /// Subset of [`done_mask`](Self::done_mask) that succeeded.
    pub fn success_mask(&self) -> ChildMask {
        self.succeeded
    }

    pub fn has_tick(&self) -> bool {
        self.tick.is_some()
    }

    pub fn has_on_enter(&self) -> bool {
        self.on_enter.is_some()
    }

    pub fn has_on_exit(&self) -> bool {
        self.on_exit.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    // ===== crate-internal helpers =====

    #[inline]
    pub(crate) fn enter(&mut self, ctx: &mut C) {
        if let Some(hook) = self.on_enter.as_mut() {
            hook(ctx);
        }
    }

    #[inline]
    pub(crate) fn exit(&mut self, ctx: &mut C) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook(ctx);
        }
    }

    /// Clears status and resumable bookkeeping, keeping configuration.
    #[inline]
    pub(crate) fn clear_state(&mut self) {
        self.status = Status::Failure;
        self.cursor = 0;
        self.done.clear();
        self.succeeded.clear();
    }
}

impl<C> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("status", &self.status)
            .field("cursor", &self.cursor)
            .field("policy", &self.policy)
            .field("done", &self.done)
            .field("succeeded", &self.succeeded)
            .field("children", &self.children)
            .field("has_tick", &self.tick.is_some())
            .finish()
    }
}
