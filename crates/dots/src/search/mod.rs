//! Online DAG search: frontier layers, stable-prefix decode and the
//! `Simplifier` state machine that drives them.
//!
//! Data flow
//! - `feed` appends to the trajectory buffer (prefix sums included).
//! - `read_output` runs an incremental pass when the output queue is drained:
//!   the frontier extends until it saturates, swaps layers, and the path
//!   tracker commits whatever prefix all live paths share.
//! - `finish` drains the frontier to the last point and decodes the rest by
//!   walking parent links back to the last committed index.

mod decode;
mod frontier;
mod simplifier;

pub use decode::PathTracker;
pub use frontier::{Frontier, Node};
pub use simplifier::{Simplifier, SimplifierState};
