//! Per-child completion bitmask used by `Parallel` nodes.

use core::fmt;

/// Fixed-width set of child indices, one bit per child.
///
/// Bit `i` corresponds to the child at index `i`. Indices at or beyond
/// [`ChildMask::WIDTH`] are ignored by [`insert`](Self::insert) and never
/// reported by [`contains`](Self::contains).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChildMask(u32);

impl ChildMask {
    /// Number of children a mask can track.
    pub const WIDTH: usize = u32::BITS as usize;

    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(self, index: usize) -> bool {
        index < Self::WIDTH && self.0 & (1 << index) != 0
    }

    #[inline]
    pub fn insert(&mut self, index: usize) {
        if index < Self::WIDTH {
            self.0 |= 1 << index;
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl fmt::Debug for ChildMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChildMask({:#034b})", self.0)
    }
}
