//! report — run records, status flags, and side-by-side comparison.
//!
//! Purpose
//! -------
//! Turn a run's terminal state into the immutable, serializable record
//! consumed by external formatting, and pair records from two backends
//! for comparison.
//!
//! Key behaviors
//! -------------
//! - `stats` defines [`RunFlag`](stats::RunFlag) and
//!   [`RunStat`](stats::RunStat) with the external serde schema and the
//!   partial-population contract for setup failures.
//! - `compare` runs two backends strictly sequentially and tags their
//!   records with algorithm and solver identities.

pub mod compare;
pub mod stats;

pub mod prelude {
    pub use super::compare::{compare_backends, SolverTag, TaggedStat};
    pub use super::stats::{RunFlag, RunStat};
}
