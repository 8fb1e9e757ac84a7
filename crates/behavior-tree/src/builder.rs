//! Builder utilities for ergonomic behavior tree construction.
//!
//! Each helper bundles "add node + set type + bind callback + attach children"
//! into one call. Instead of
//!
//! ```ignore
//! let seq = arena.add(Node::new("seq").with_type(NodeType::Sequence));
//! arena.set_children(seq, &[a, b])?;
//! ```
//!
//! you can write `sequence(&mut arena, "seq", &[a, b])?`. The helpers carry no
//! logic of their own; hooks can still be bound afterwards through
//! [`NodeArena::node_mut`].

use std::borrow::Cow;

use crate::{BuildError, Node, NodeArena, NodeId, NodeType, ParallelPolicy, Status};

/// Creates an action leaf bound to `tick`.
#[inline]
pub fn action<C, F>(arena: &mut NodeArena<C>, name: impl Into<Cow<'static, str>>, tick: F) -> NodeId
where
    F: FnMut(&mut C) -> Status + Send + 'static,
{
    arena.add(Node::new(name).with_tick(tick))
}

/// Creates a condition leaf bound to `check`.
#[inline]
pub fn condition<C, F>(
    arena: &mut NodeArena<C>,
    name: impl Into<Cow<'static, str>>,
    check: F,
) -> NodeId
where
    F: FnMut(&mut C) -> Status + Send + 'static,
{
    arena.add(
        Node::new(name)
            .with_type(NodeType::Condition)
            .with_tick(check),
    )
}

/// Creates a sequence over `children`.
#[inline]
pub fn sequence<C>(
    arena: &mut NodeArena<C>,
    name: impl Into<Cow<'static, str>>,
    children: &[NodeId],
) -> Result<NodeId, BuildError> {
    composite(arena, Node::new(name).with_type(NodeType::Sequence), children)
}

/// Creates a selector over `children`.
#[inline]
pub fn selector<C>(
    arena: &mut NodeArena<C>,
    name: impl Into<Cow<'static, str>>,
    children: &[NodeId],
) -> Result<NodeId, BuildError> {
    composite(arena, Node::new(name).with_type(NodeType::Selector), children)
}

/// Creates a parallel node with the given success policy.
#[inline]
pub fn parallel<C>(
    arena: &mut NodeArena<C>,
    name: impl Into<Cow<'static, str>>,
    policy: ParallelPolicy,
    children: &[NodeId],
) -> Result<NodeId, BuildError> {
    let node = Node::new(name)
        .with_type(NodeType::Parallel)
        .with_policy(policy);
    composite(arena, node, children)
}

/// Creates an inverter decorating `child`.
#[inline]
pub fn inverter<C>(
    arena: &mut NodeArena<C>,
    name: impl Into<Cow<'static, str>>,
    child: NodeId,
) -> Result<NodeId, BuildError> {
    composite(arena, Node::new(name).with_type(NodeType::Inverter), &[child])
}

fn composite<C>(
    arena: &mut NodeArena<C>,
    node: Node<C>,
    children: &[NodeId],
) -> Result<NodeId, BuildError> {
    let id = arena.add(node);
    arena.set_children(id, children)?;
    Ok(id)
}
