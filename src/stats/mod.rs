//! Process-wide traversal cost counter.
//!
//! With the `stats` feature enabled, every visited node and every tested
//! candidate bumps one global atomic counter shared by all query tasks. It
//! starts at zero, may be reset between runs, and is meant to be read after
//! all tasks have finished.
//!
//! Without the feature all functions are no-ops that compile away, and
//! [`read`] always returns zero.

#[cfg(feature = "stats")]
mod real;
#[cfg(not(feature = "stats"))]
mod stub;

#[cfg(feature = "stats")]
pub use real::*;
#[cfg(not(feature = "stats"))]
pub use stub::*;

/// Whether the counter is compiled in.
pub const ENABLED: bool = cfg!(feature = "stats");
