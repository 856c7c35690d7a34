//! Runner module for concurrent command execution
//!
//! Provides:
//! - Invocations pairing each command with its display name
//! - A bounded worker pool that runs them concurrently
//! - The output sink trait blocks are written through

pub mod invocation;
pub mod pool;
pub mod traits;

pub use invocation::{build_invocations, resolve_names, Invocation};
pub use pool::{ctrl_c, CommandPool, PoolExit};
pub use traits::*;
