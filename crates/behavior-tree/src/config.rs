use crate::ChildMask;

/// Structural limits applied to every node of an arena.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeConfig {
    /// Maximum children of a Sequence, Selector or Inverter (and of leaves,
    /// which should have none).
    pub max_children: usize,
    /// Maximum children of a Parallel node. Parallel nodes are bounded by the
    /// completion bitmask rather than by `max_children`.
    pub parallel_width: usize,
}

impl TreeConfig {
    // ===== compile-time constants =====
    /// Inline child storage per node. Attaching beyond this fails at build time.
    pub const MAX_CHILD_SLOTS: usize = 64;
    /// Width of the Parallel completion bitmask.
    pub const BITMASK_WIDTH: usize = ChildMask::WIDTH;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_CHILDREN: usize = 8;
    pub const DEFAULT_PARALLEL_WIDTH: usize = Self::BITMASK_WIDTH;

    pub const fn new() -> Self {
        Self {
            max_children: Self::DEFAULT_MAX_CHILDREN,
            parallel_width: Self::DEFAULT_PARALLEL_WIDTH,
        }
    }

    /// Sets the general child capacity, clamped to [`Self::MAX_CHILD_SLOTS`].
    #[must_use]
    pub fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children.min(Self::MAX_CHILD_SLOTS);
        self
    }

    /// Sets the Parallel child capacity, clamped to [`Self::BITMASK_WIDTH`].
    #[must_use]
    pub fn with_parallel_width(mut self, parallel_width: usize) -> Self {
        self.parallel_width = parallel_width.min(Self::BITMASK_WIDTH);
        self
    }

    /// Effective Parallel limit, never wider than the bitmask.
    #[inline]
    pub fn parallel_limit(&self) -> usize {
        self.parallel_width.min(Self::BITMASK_WIDTH)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let config = TreeConfig::default();
        assert_eq!(config.max_children, 8);
        assert_eq!(config.parallel_width, 32);
    }

    #[test]
    fn builders_clamp_to_storage_and_bitmask() {
        let config = TreeConfig::new()
            .with_max_children(1_000)
            .with_parallel_width(1_000);
        assert_eq!(config.max_children, TreeConfig::MAX_CHILD_SLOTS);
        assert_eq!(config.parallel_width, TreeConfig::BITMASK_WIDTH);
    }

    #[test]
    fn parallel_limit_ignores_oversized_raw_field() {
        let config = TreeConfig {
            max_children: 8,
            parallel_width: 40,
        };
        assert_eq!(config.parallel_limit(), 32);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn round_trips_through_json() {
        let config = TreeConfig::new().with_max_children(4);
        let json = serde_json::to_string(&config).unwrap();
        let back: TreeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
