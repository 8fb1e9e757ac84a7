//! Per-type tick algorithms.
//!
//! Every node follows the same lifecycle around its type-specific work:
//! 1. If the status before this tick is not `Running`, call `on_enter`.
//! 2. Do the work and store the resulting status.
//! 3. If the result is terminal, call `on_exit`.
//!
//! Configuration faults detected before a node starts (missing leaf callback,
//! wrong Inverter arity, too many children, dangling children of a leaf or an
//! Inverter) resolve to `Error` without touching either hook. Faults found
//! while a composite scans its children (a dangling reference) resolve like
//! any other terminal result, `on_exit` included.
//!
//! Nothing in this module allocates, blocks or panics on a well-formed arena.

use crate::node::Node;
use crate::{NodeArena, NodeId, NodeType, ParallelPolicy, Status, ValidateError};

impl<C> Node<C> {
    /// Stores `status`, firing `on_exit` if it is terminal.
    #[inline]
    fn settle(&mut self, status: Status, ctx: &mut C) -> Status {
        self.status = status;
        if status.is_terminal() {
            self.exit(ctx);
            tracing::trace!(node = self.name(), status = %status, "exit");
        }
        status
    }

    /// Marks the node as faulted before it started this tick.
    #[cold]
    fn fault(&mut self, error: ValidateError) -> Status {
        tracing::warn!(
            node = self.name(),
            kind = %self.kind,
            fault = error.code(),
            "structural fault during tick"
        );
        self.status = Status::Error;
        Status::Error
    }

    #[inline]
    fn begin(&mut self, ctx: &mut C) -> bool {
        let fresh = !self.status.is_running();
        if fresh {
            tracing::trace!(node = self.name(), kind = %self.kind, "enter");
            self.enter(ctx);
        }
        fresh
    }
}

impl<C> NodeArena<C> {
    /// Ticks the subtree rooted at `id` once and returns its status.
    ///
    /// A dangling `id` yields `Error`.
    pub fn tick(&mut self, id: NodeId, ctx: &mut C) -> Status {
        let Some(kind) = self.node(id).map(|node| node.kind) else {
            tracing::warn!(node = %id, "tick reached a dangling node reference");
            return Status::Error;
        };

        let index = id.index();
        match kind {
            NodeType::Action | NodeType::Condition => self.tick_leaf(index, ctx),
            NodeType::Sequence => self.tick_ordered(index, ctx, Status::Success),
            NodeType::Selector => self.tick_ordered(index, ctx, Status::Failure),
            NodeType::Parallel => self.tick_parallel(index, ctx),
            NodeType::Inverter => self.tick_inverter(index, ctx),
        }
    }

    /// Returns the subtree rooted at `id` to idle.
    ///
    /// Status becomes `Failure`, cursor and completion masks are cleared.
    /// Type, children, policy and callbacks are kept. No hook is called and
    /// no cancellation is signalled to work a leaf may have started.
    pub fn reset(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.clear_state();

        let count = node.children.len();
        for i in 0..count {
            let child = self.nodes[id.index()].children[i];
            self.reset(child);
        }
    }

    /// Leaves never tick their children, but a leaf carrying oversized or
    /// dangling children is faulted exactly as [`validate`](Self::validate)
    /// reports it.
    fn tick_leaf(&mut self, index: usize, ctx: &mut C) -> Status {
        let max_children = self.config.max_children;
        let node = &self.nodes[index];
        let fault = if node.children.len() > max_children {
            Some(ValidateError::ChildrenExceedMax)
        } else if node.children.iter().any(|&child| !self.contains(child)) {
            Some(ValidateError::NullChild)
        } else if node.tick.is_none() {
            Some(ValidateError::LeafMissingTick)
        } else {
            None
        };

        let node = &mut self.nodes[index];
        if let Some(error) = fault {
            return node.fault(error);
        }

        node.begin(ctx);
        let status = match node.tick.as_mut() {
            Some(behavior) => behavior.tick(ctx),
            None => Status::Error,
        };
        node.settle(status, ctx)
    }

    /// Sequence and Selector share one scan that differs only in which child
    /// outcome lets the scan continue:
    /// - Sequence continues on `Success` and succeeds when exhausted
    /// - Selector continues on `Failure` and fails when exhausted
    ///
    /// Any other child outcome stops the scan and is adopted unchanged.
    fn tick_ordered(&mut self, index: usize, ctx: &mut C, proceed: Status) -> Status {
        let max_children = self.config.max_children;
        let node = &mut self.nodes[index];
        if node.children.len() > max_children {
            return node.fault(ValidateError::ChildrenExceedMax);
        }

        if node.begin(ctx) {
            node.cursor = 0;
        }

        let count = node.children.len();
        let mut i = node.cursor;
        while i < count {
            let child = self.nodes[index].children[i];
            let status = self.tick(child, ctx);
            if status != proceed {
                let node = &mut self.nodes[index];
                node.cursor = i;
                return node.settle(status, ctx);
            }
            i += 1;
        }

        // Vacuous outcome: AND of nothing succeeds, OR of nothing fails.
        self.nodes[index].settle(proceed, ctx)
    }

    /// A child `Error` ends the node with `Error` under either policy; it is
    /// never counted as a plain failure.
    fn tick_parallel(&mut self, index: usize, ctx: &mut C) -> Status {
        let limit = self.config.parallel_limit();
        let node = &mut self.nodes[index];
        if node.children.len() > limit {
            return node.fault(ValidateError::ParallelExceedsBitmap);
        }

        if node.begin(ctx) {
            node.done.clear();
            node.succeeded.clear();
        }

        let policy = node.policy;
        let count = node.children.len();
        let mut running = 0usize;
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for i in 0..count {
            let node = &self.nodes[index];
            if node.done.contains(i) {
                if node.succeeded.contains(i) {
                    succeeded += 1;
                } else {
                    failed += 1;
                }
                continue;
            }

            let child = node.children[i];
            let status = self.tick(child, ctx);
            let node = &mut self.nodes[index];
            match status {
                Status::Running => running += 1,
                Status::Success => {
                    node.done.insert(i);
                    node.succeeded.insert(i);
                    succeeded += 1;
                }
                Status::Failure => {
                    node.done.insert(i);
                    failed += 1;
                }
                Status::Error => {
                    node.done.insert(i);
                    return node.settle(Status::Error, ctx);
                }
            }
        }

        // Children still Running when the policy resolves are abandoned as-is.
        let outcome = match policy {
            ParallelPolicy::RequireAll if failed > 0 => Status::Failure,
            ParallelPolicy::RequireAll if running > 0 => Status::Running,
            ParallelPolicy::RequireAll => Status::Success,
            ParallelPolicy::RequireOne if succeeded > 0 => Status::Success,
            ParallelPolicy::RequireOne if running > 0 => Status::Running,
            ParallelPolicy::RequireOne => Status::Failure,
        };
        self.nodes[index].settle(outcome, ctx)
    }

    fn tick_inverter(&mut self, index: usize, ctx: &mut C) -> Status {
        let node = &mut self.nodes[index];
        if node.children.len() != 1 {
            return node.fault(ValidateError::InverterNotOneChild);
        }
        let child = node.children[0];
        if !self.contains(child) {
            return self.nodes[index].fault(ValidateError::NullChild);
        }

        self.nodes[index].begin(ctx);
        let status = self.tick(child, ctx).invert();
        self.nodes[index].settle(status, ctx)
    }
}
