//! Side-by-side comparison of two solver backends on one problem.
//!
//! Runs two (driver, backend) pairings strictly one after the other and
//! tags each resulting [`RunStat`] with the algorithm family and the
//! solver identity, producing a pair of records for external formatting.
//! No judgment of which backend did better is made here; consumers of the
//! two records decide that.
//!
//! Sequential execution is a requirement, not an optimization: problem
//! repositories allow a single active session at a time, so the second
//! run must not start until the first has torn its session down.
use serde::{Deserialize, Serialize};

use crate::report::stats::RunStat;

/// Identity of one side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverTag {
    /// Algorithm family, e.g. `"L-BFGS-B"` or `"L-BFGS"`.
    pub alg: String,
    /// Concrete backend identity, e.g. `"argmin/MoreThuente"`.
    pub solver: String,
}

impl SolverTag {
    pub fn new(alg: impl Into<String>, solver: impl Into<String>) -> Self {
        Self { alg: alg.into(), solver: solver.into() }
    }
}

/// A run record extended with the identity of the backend that produced
/// it. The underlying record's fields are flattened into the serialized
/// object alongside the tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedStat {
    pub alg: String,
    pub solver: String,
    #[serde(flatten)]
    pub stat: RunStat,
}

impl TaggedStat {
    pub fn new(tag: SolverTag, stat: RunStat) -> Self {
        Self { alg: tag.alg, solver: tag.solver, stat }
    }
}

/// Run two backends against the same problem, strictly sequentially, and
/// pair their tagged records in call order.
///
/// Each side is a tag plus a closure producing its run record; the first
/// closure runs to completion before the second starts.
pub fn compare_backends<F, G>(
    first: (SolverTag, F), second: (SolverTag, G),
) -> (TaggedStat, TaggedStat)
where
    F: FnOnce() -> RunStat,
    G: FnOnce() -> RunStat,
{
    let (first_tag, first_run) = first;
    let (second_tag, second_run) = second;
    let first_stat = first_run();
    let second_stat = second_run();
    (TaggedStat::new(first_tag, first_stat), TaggedStat::new(second_tag, second_stat))
}
