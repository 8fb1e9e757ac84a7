//! Node storage and tree wiring.
//!
//! A [`NodeArena`] owns every node of one or more trees. Nodes never own each
//! other: parents reference children by [`NodeId`], so a tree is assembled once
//! (build phase) and then ticked many times without allocation.
//!
//! The arena keeps the parent links consistent while wiring, which rules out
//! shared children and cycles at build time. What it deliberately does not
//! reject is left to the validator, so that the same faults are reported the
//! same way whether or not validation runs:
//! - child counts above [`TreeConfig::max_children`] (the node kind may still
//!   change after wiring)
//! - ids minted by a different arena (dangling references)

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::node::Children;
use crate::{BuildError, Node, NodeId, NodeType, TreeConfig};

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(0);

/// Owner of the nodes of a behavior tree.
pub struct NodeArena<C> {
    id: u32,
    pub(crate) nodes: Vec<Node<C>>,
    pub(crate) config: TreeConfig,
}

impl<C> NodeArena<C> {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves a node into the arena and returns its id.
    pub fn add(&mut self, node: Node<C>) -> NodeId {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeId::new(self.id, index)
    }

    /// Returns `true` if `id` was minted by this arena.
    pub fn contains(&self, id: NodeId) -> bool {
        id.arena() == self.id && id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<C>> {
        if id.arena() != self.id {
            return None;
        }
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<C>> {
        if id.arena() != self.id {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Iterates over all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<C>)> + '_ {
        let arena = self.id;
        self.nodes
            .iter()
            .enumerate()
            .map(move |(index, node)| (NodeId::new(arena, index as u32), node))
    }

    // ===== wiring =====

    /// Appends `child` to the children of `parent`.
    ///
    /// Insertion order is evaluation order.
    ///
    /// # Errors
    ///
    /// - [`BuildError::UnknownNode`] if `parent` is not in this arena
    /// - [`BuildError::ChildSlotsExhausted`] once the inline storage is full
    /// - [`BuildError::AlreadyAttached`] if `child` already has a parent
    /// - [`BuildError::Cycle`] if `child` is `parent` or one of its ancestors
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), BuildError> {
        let slots = self
            .node(parent)
            .map(|node| node.children.remaining_capacity())
            .ok_or(BuildError::UnknownNode(parent))?;
        if slots == 0 {
            return Err(BuildError::ChildSlotsExhausted {
                node: parent,
                capacity: TreeConfig::MAX_CHILD_SLOTS,
            });
        }

        if let Some(node) = self.node(child) {
            if let Some(current) = node.parent {
                return Err(BuildError::AlreadyAttached {
                    child,
                    parent: current,
                });
            }
            if self.is_ancestor_or_self(child, parent) {
                return Err(BuildError::Cycle { parent, child });
            }
        }

        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Replaces the children of `parent` with `children`, in order.
    ///
    /// Previous children are detached first and become free to attach
    /// elsewhere. On error the previous children are restored.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), BuildError> {
        let previous = self.detach_children(parent)?;

        for &child in children {
            if let Err(err) = self.add_child(parent, child) {
                self.detach_children(parent)?;
                for &old in &previous {
                    let _ = self.add_child(parent, old);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Makes `child` the only child of `parent` (decorator convenience).
    pub fn set_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), BuildError> {
        self.set_children(parent, &[child])
    }

    /// Removes every child of `parent` and returns them.
    pub fn detach_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>, BuildError> {
        let removed: Children = self
            .node_mut(parent)
            .map(|node| std::mem::take(&mut node.children))
            .ok_or(BuildError::UnknownNode(parent))?;

        for &child in &removed {
            if let Some(node) = self.node_mut(child) {
                if node.parent == Some(parent) {
                    node.parent = None;
                }
            }
        }
        Ok(removed.into_iter().collect())
    }

    /// Walks the parent chain upwards from `start`.
    fn is_ancestor_or_self(&self, candidate: NodeId, start: NodeId) -> bool {
        let mut current = Some(start);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.node(id).and_then(|node| node.parent);
        }
        false
    }

    // ===== diagnostics =====

    /// Renders an indented outline of the subtree rooted at `root`.
    ///
    /// One line per node: `name [TYPE] STATUS`, children indented by two
    /// spaces. Dangling references render as `<dangling #n>`.
    pub fn render(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.render_into(&mut out, root, 0);
        out
    }

    fn render_into(&self, out: &mut String, id: NodeId, depth: usize) {
        let indent = depth * 2;
        let Some(node) = self.node(id) else {
            let _ = writeln!(out, "{:indent$}<dangling {id}>", "");
            return;
        };

        let _ = write!(out, "{:indent$}{} [{}] {}", "", node.name(), node.kind, node.status);
        if node.status.is_running() && matches!(node.kind, NodeType::Sequence | NodeType::Selector) {
            let _ = write!(out, " (cursor {})", node.cursor);
        }
        out.push('\n');

        for &child in &node.children {
            self.render_into(out, child, depth + 1);
        }
    }
}

impl<C> Default for NodeArena<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    struct TestContext;

    fn leaf(arena: &mut NodeArena<TestContext>, name: &'static str) -> NodeId {
        arena.add(Node::new(name).with_tick(|_| Status::Success))
    }

    #[test]
    fn add_child_links_both_directions() {
        let mut arena = NodeArena::new();
        let seq = arena.add(Node::new("seq").with_type(NodeType::Sequence));
        let a = leaf(&mut arena, "a");
        let b = leaf(&mut arena, "b");

        arena.add_child(seq, a).unwrap();
        arena.add_child(seq, b).unwrap();

        assert_eq!(arena.node(seq).unwrap().children(), &[a, b]);
        assert_eq!(arena.node(a).unwrap().parent(), Some(seq));
        assert_eq!(arena.node(b).unwrap().parent(), Some(seq));
    }

    #[test]
    fn child_cannot_have_two_parents() {
        let mut arena = NodeArena::new();
        let first = arena.add(Node::new("first").with_type(NodeType::Sequence));
        let second = arena.add(Node::new("second").with_type(NodeType::Selector));
        let a = leaf(&mut arena, "a");

        arena.add_child(first, a).unwrap();
        assert_eq!(
            arena.add_child(second, a),
            Err(BuildError::AlreadyAttached {
                child: a,
                parent: first
            })
        );
    }

    #[test]
    fn cycles_are_rejected() {
        let mut arena: NodeArena<TestContext> = NodeArena::new();
        let outer = arena.add(Node::new("outer").with_type(NodeType::Sequence));
        let inner = arena.add(Node::new("inner").with_type(NodeType::Sequence));
        arena.add_child(outer, inner).unwrap();

        assert_eq!(
            arena.add_child(inner, outer),
            Err(BuildError::Cycle {
                parent: inner,
                child: outer
            })
        );
        assert_eq!(
            arena.add_child(inner, inner),
            Err(BuildError::Cycle {
                parent: inner,
                child: inner
            })
        );
    }

    #[test]
    fn unknown_parent_is_reported() {
        let mut other: NodeArena<TestContext> = NodeArena::new();
        let foreign = other.add(Node::new("foreign"));

        let mut arena: NodeArena<TestContext> = NodeArena::new();
        let a = leaf(&mut arena, "a");

        assert!(!arena.contains(foreign));
        assert_eq!(arena.add_child(foreign, a), Err(BuildError::UnknownNode(foreign)));
    }

    #[test]
    fn storage_exhaustion_is_an_error_not_a_panic() {
        let mut arena: NodeArena<TestContext> = NodeArena::new();
        let par = arena.add(Node::new("par").with_type(NodeType::Parallel));
        for _ in 0..TreeConfig::MAX_CHILD_SLOTS {
            let child = leaf(&mut arena, "c");
            arena.add_child(par, child).unwrap();
        }

        let extra = leaf(&mut arena, "extra");
        assert_eq!(
            arena.add_child(par, extra),
            Err(BuildError::ChildSlotsExhausted {
                node: par,
                capacity: TreeConfig::MAX_CHILD_SLOTS
            })
        );
        assert_eq!(arena.node(extra).unwrap().parent(), None);
    }

    #[test]
    fn set_children_replaces_and_frees_previous_children() {
        let mut arena = NodeArena::new();
        let seq = arena.add(Node::new("seq").with_type(NodeType::Sequence));
        let a = leaf(&mut arena, "a");
        let b = leaf(&mut arena, "b");
        let c = leaf(&mut arena, "c");

        arena.set_children(seq, &[a, b]).unwrap();
        arena.set_children(seq, &[c, a]).unwrap();

        assert_eq!(arena.node(seq).unwrap().children(), &[c, a]);
        assert_eq!(arena.node(b).unwrap().parent(), None);
        assert_eq!(arena.node(a).unwrap().parent(), Some(seq));
    }

    #[test]
    fn failed_set_children_restores_previous_children() {
        let mut arena = NodeArena::new();
        let seq = arena.add(Node::new("seq").with_type(NodeType::Sequence));
        let other = arena.add(Node::new("other").with_type(NodeType::Sequence));
        let a = leaf(&mut arena, "a");
        let taken = leaf(&mut arena, "taken");
        arena.add_child(other, taken).unwrap();
        arena.set_children(seq, &[a]).unwrap();

        let err = arena.set_children(seq, &[a, taken]).unwrap_err();

        assert!(matches!(err, BuildError::AlreadyAttached { .. }));
        assert_eq!(arena.node(seq).unwrap().children(), &[a]);
        assert_eq!(arena.node(a).unwrap().parent(), Some(seq));
    }

    #[test]
    fn set_child_keeps_exactly_one() {
        let mut arena = NodeArena::new();
        let inv = arena.add(Node::new("inv").with_type(NodeType::Inverter));
        let a = leaf(&mut arena, "a");
        let b = leaf(&mut arena, "b");

        arena.set_children(inv, &[a, b]).unwrap();
        arena.set_child(inv, b).unwrap();

        assert_eq!(arena.node(inv).unwrap().children(), &[b]);
    }

    #[test]
    fn render_outlines_the_subtree() {
        let mut arena = NodeArena::new();
        let root = arena.add(Node::new("Root").with_type(NodeType::Selector));
        let a = leaf(&mut arena, "A");
        arena.add_child(root, a).unwrap();

        let mut other: NodeArena<TestContext> = NodeArena::new();
        let foreign = other.add(Node::new("foreign"));
        arena.add_child(root, foreign).unwrap();

        let expected = format!(
            "Root [SELECTOR] FAILURE\n  A [ACTION] FAILURE\n  <dangling {foreign}>\n"
        );
        assert_eq!(arena.render(root), expected);
    }
}
