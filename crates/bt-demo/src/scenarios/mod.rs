//! Demo scenarios, one per subcommand.

pub mod basic;
pub mod device;
pub mod patrol;
