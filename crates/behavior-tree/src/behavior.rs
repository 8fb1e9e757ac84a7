//! Callback traits bound to nodes.
//!
//! This module defines the [`Behavior`] trait, the tick callback of a leaf
//! node. The trait is generic over a context type `C`, allowing leaves to read
//! and modify the shared blackboard. Closures implement it automatically, so
//! most leaves are written inline; stateful leaves can be plain structs.

use crate::Status;

/// Work performed by a leaf node on each tick.
///
/// Implementations must not block: unfinished work is reported as
/// [`Status::Running`] and resumed on the next tick.
pub trait Behavior<C>: Send {
    /// Evaluate this leaf against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard shared by every
    ///   node of the tree.
    ///
    /// # Returns
    ///
    /// - `Status::Success` / `Status::Failure` once the leaf has resolved
    /// - `Status::Running` if the leaf needs further ticks
    /// - `Status::Error` for faults the leaf wants to surface as structural
    fn tick(&mut self, ctx: &mut C) -> Status;
}

/// Blanket implementation for closures.
impl<C, F> Behavior<C> for F
where
    F: FnMut(&mut C) -> Status + Send,
{
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        self(ctx)
    }
}

/// Boxed tick callback stored in a node slot.
pub type TickFn<C> = Box<dyn Behavior<C>>;

/// Lifecycle hook invoked on enter/exit transitions.
pub type Hook<C> = Box<dyn FnMut(&mut C) + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    struct CountDown {
        remaining: u32,
    }

    impl Behavior<TestContext> for CountDown {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            if self.remaining == 0 {
                return Status::Success;
            }
            self.remaining -= 1;
            Status::Running
        }
    }

    #[test]
    fn closures_are_behaviors() {
        let mut leaf: TickFn<TestContext> = Box::new(|ctx: &mut TestContext| {
            ctx.value *= 2;
            Status::Success
        });

        let mut ctx = TestContext { value: 21 };
        assert_eq!(leaf.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 42);
    }

    #[test]
    fn struct_behaviors_keep_their_own_state() {
        let mut leaf: TickFn<TestContext> = Box::new(CountDown { remaining: 2 });

        let mut ctx = TestContext { value: 0 };
        assert_eq!(leaf.tick(&mut ctx), Status::Running);
        assert_eq!(leaf.tick(&mut ctx), Status::Running);
        assert_eq!(leaf.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 3);
    }
}
