//! Online trajectory simplification (DOTS).
//!
//! DOTS is short for "Directed acyclic graph based Online Trajectory
//! Simplification". Points `(x, y, t)` are fed one at a time; the simplifier
//! keeps a reduced subsequence whose every kept segment stays under a bound on
//! the integral squared synchronous Euclidean distance (LSSD) of the points it
//! replaces.
//!
//! Layout
//! - `stats`: append-only prefix sums over the fed stream.
//! - `lssd`: closed-form interior error between two fed indices.
//! - `search`: layered frontier search, stable-prefix decode and the public
//!   `Simplifier` state machine.
//! - `batch`, `metrics`, `synth`: whole-trajectory helpers, error measures and
//!   reproducible random walks for tests and benchmarks.
//!
//! Threading
//! - Everything is single-threaded and synchronous. A `Simplifier` owns all of
//!   its state; share it across threads only behind the caller's own lock.

pub mod batch;
pub mod error;
pub mod lssd;
pub mod metrics;
pub mod search;
pub mod stats;
pub mod synth;
mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{DotsError, DotsResult};
pub use search::Simplifier;
pub use types::{DotsCfg, Point};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::batch::{simplify, simplify_indices};
    pub use crate::metrics::{compression_ratio, evaluate, ErrorMeasure};
    pub use crate::search::{SimplifierState, Simplifier};
    pub use crate::synth::{random_walk, ReplayToken, WalkCfg};
    pub use crate::{DotsCfg, DotsError, DotsResult, Point};
}
