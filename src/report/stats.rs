//! Per-run statistics record and its status flag.
//!
//! Purpose
//! -------
//! Assemble the uniform, immutable record a benchmark run produces,
//! whichever driver ran it. The record carries the problem identity, the
//! run's status flag and message, the size/iteration/evaluation counters,
//! the final objective and (projected) gradient norm, and the
//! repository-reported timings. It is created exactly once, after a run
//! terminates, and never mutated afterwards.
//!
//! Partial population
//! ------------------
//! When a run fails before problem setup completes (open, dimension,
//! setup, or name failures), only `flag` and `msg` are meaningful; every
//! other field stays at its default (empty name, zero counters and
//! values). Consumers must not read significance into the zeroed fields
//! of such a record.
//!
//! Serialization
//! -------------
//! The serde field names are the external schema: `problem`, `flag`,
//! `msg`, `nvar`, `niter`, `nfun`, `objval`, `proj_grad`, `setup_time`,
//! `solve_time`. The flag serializes as its integer code (0 normal,
//! 1 solver error, 2 problem error), not as a variant name.
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{errors::DriverError, problem::traits::UsageReport};

/// Status flag of a completed run.
///
/// Reaching the iteration cap without convergence is still
/// [`RunFlag::Normal`]; cutoff runs are distinguished from converged ones
/// only by comparing the iteration count to the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunFlag {
    /// The run terminated normally (converged or soft cutoff).
    #[default]
    Normal,
    /// A solver backend failed or returned an abnormal code.
    SolverError,
    /// The problem repository failed or the problem shape is unsupported.
    ProblemError,
}

impl RunFlag {
    /// Integer code used in the external schema.
    pub fn code(self) -> u8 {
        match self {
            RunFlag::Normal => 0,
            RunFlag::SolverError => 1,
            RunFlag::ProblemError => 2,
        }
    }

    /// Inverse of [`RunFlag::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RunFlag::Normal),
            1 => Some(RunFlag::SolverError),
            2 => Some(RunFlag::ProblemError),
            _ => None,
        }
    }
}

impl Serialize for RunFlag {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for RunFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        RunFlag::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown run flag code {code}")))
    }
}

/// Immutable record of one benchmark run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunStat {
    /// Problem name, trailing padding removed.
    #[serde(rename = "problem")]
    pub prob: String,
    /// Status flag, serialized as its integer code.
    pub flag: RunFlag,
    /// Diagnostic message; empty on normal runs.
    pub msg: String,
    /// Number of variables.
    pub nvar: usize,
    /// Accepted iterations.
    pub niter: usize,
    /// Function evaluations, as counted by the repository.
    pub nfun: usize,
    /// Final objective value.
    pub objval: f64,
    /// Final gradient norm (projected for bound-constrained runs).
    pub proj_grad: f64,
    /// Repository setup time in seconds.
    pub setup_time: f64,
    /// Repository solve time in seconds.
    pub solve_time: f64,
}

impl RunStat {
    /// Record for a run that failed before problem setup completed.
    ///
    /// Only the flag and message are meaningful; the numeric fields and
    /// the name stay at their defaults per the partial-population
    /// contract.
    pub fn setup_failure(err: &DriverError) -> Self {
        Self {
            flag: err.flag(),
            msg: err.to_string(),
            ..Self::default()
        }
    }

    /// Record for a run that failed after setup, while solving.
    ///
    /// The problem identity and size are known and kept; counters and
    /// values stay at their defaults.
    pub fn run_failure(prob: String, nvar: usize, err: &DriverError) -> Self {
        Self {
            prob,
            flag: err.flag(),
            msg: err.to_string(),
            nvar,
            ..Self::default()
        }
    }

    /// Record for a normally terminated run (converged or soft cutoff).
    ///
    /// The evaluation count and timings come from the repository's usage
    /// report, which is authoritative over anything the driver could
    /// count itself.
    pub fn success(
        prob: String, nvar: usize, niter: usize, objval: f64, proj_grad: f64,
        usage: &UsageReport,
    ) -> Self {
        Self {
            prob,
            flag: RunFlag::Normal,
            msg: String::new(),
            nvar,
            niter,
            nfun: usage.fn_evals,
            objval,
            proj_grad,
            setup_time: usage.setup_time,
            solve_time: usage.solve_time,
        }
    }
}
