//! Reactive behavior tree engine for control loops and agent AI.
//!
//! Trees are built once into a [`NodeArena`] and ticked many times by an
//! external driver loop. A node that cannot finish within one tick returns
//! [`Status::Running`] and resumes on the next tick, so long-running work never
//! blocks the loop.
//!
//! - **Resumable**: Sequence and Selector keep a cursor, Parallel keeps
//!   completion bitmasks, so finished children are never re-ticked
//! - **Lifecycle hooks**: `on_enter` once per run, `on_exit` once per result
//! - **No allocation per tick**: children live in inline fixed-capacity storage
//! - **Faults are statuses**: misconfiguration yields [`Status::Error`], never a
//!   panic; [`NodeArena::validate_tree`] reports the same faults up front
//!
//! # Architecture
//!
//! - [`Behavior`]: tick callback of leaf nodes (closures implement it)
//! - [`Node`] / [`NodeArena`]: node configuration, storage and wiring
//! - [`BehaviorTree`]: root + context + last status + tick counter
//! - [`builder`]: one-call helpers for common node shapes
//!
//! # Example
//!
//! ```
//! use behavior_tree::{builder, BehaviorTree, NodeArena, Status};
//!
//! struct Ctx { charge: u32 }
//!
//! let mut arena = NodeArena::new();
//! let charge = builder::action(&mut arena, "Charge", |ctx: &mut Ctx| {
//!     ctx.charge += 50;
//!     if ctx.charge >= 100 { Status::Success } else { Status::Running }
//! });
//! let root = builder::sequence(&mut arena, "Root", &[charge]).unwrap();
//!
//! let mut ctx = Ctx { charge: 0 };
//! let mut tree = BehaviorTree::new(&mut arena, root, &mut ctx);
//! assert_eq!(tree.validate_tree(), Ok(()));
//! assert_eq!(tree.tick(), Status::Running);
//! assert_eq!(tree.tick(), Status::Success);
//! ```

pub mod arena;
pub mod behavior;
pub mod builder;
pub mod config;
mod dispatch;
pub mod error;
pub mod mask;
pub mod node;
pub mod status;
pub mod tree;
mod validate;

// Re-export core types for ergonomic API
pub use arena::NodeArena;
pub use behavior::{Behavior, Hook, TickFn};
pub use config::TreeConfig;
pub use error::{BuildError, ValidateError, ValidationFailure};
pub use mask::ChildMask;
pub use node::{Node, NodeId};
pub use status::{NodeType, ParallelPolicy, Status};
pub use tree::BehaviorTree;
