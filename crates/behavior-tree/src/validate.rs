//! Structural validation.
//!
//! Validation is a separate pass meant to run once, after the tree is fully
//! assembled and before the first tick. It never ticks a node and never calls
//! a hook. Skipping it is safe: the tick path reports the same faults lazily
//! as [`Status::Error`](crate::Status::Error).

use crate::{NodeArena, NodeId, NodeType, TreeConfig, ValidateError, ValidationFailure};

impl<C> NodeArena<C> {
    /// Checks a single node (non-recursive).
    ///
    /// Rules are checked in priority order and the first violation is
    /// returned:
    /// 1. child count exceeds [`TreeConfig::max_children`] (Parallel nodes are
    ///    bounded by rule 5 instead)
    /// 2. a child id does not resolve in this arena
    /// 3. a leaf has no tick callback
    /// 4. an Inverter does not have exactly one child
    /// 5. a Parallel node has more children than its completion bitmask tracks
    ///
    /// A dangling `id` is reported as [`ValidateError::NullChild`].
    pub fn validate(&self, id: NodeId) -> Result<(), ValidateError> {
        let Some(node) = self.node(id) else {
            return Err(ValidateError::NullChild);
        };
        let count = node.children.len();

        let capacity = match node.kind {
            NodeType::Parallel => TreeConfig::MAX_CHILD_SLOTS,
            _ => self.config.max_children,
        };
        if count > capacity {
            return Err(ValidateError::ChildrenExceedMax);
        }

        if node.children.iter().any(|&child| !self.contains(child)) {
            return Err(ValidateError::NullChild);
        }

        if node.kind.is_leaf() && node.tick.is_none() {
            return Err(ValidateError::LeafMissingTick);
        }

        if node.kind == NodeType::Inverter && count != 1 {
            return Err(ValidateError::InverterNotOneChild);
        }

        if node.kind == NodeType::Parallel && count > self.config.parallel_limit() {
            return Err(ValidateError::ParallelExceedsBitmap);
        }

        Ok(())
    }

    /// Checks the subtree rooted at `root` in pre-order and stops at the first
    /// faulty node.
    pub fn validate_tree(&self, root: NodeId) -> Result<(), ValidationFailure> {
        self.validate(root)
            .map_err(|error| ValidationFailure { node: root, error })?;

        if let Some(node) = self.node(root) {
            for &child in &node.children {
                self.validate_tree(child)?;
            }
        }
        Ok(())
    }
}
