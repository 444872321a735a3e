//! Bound-type classification for box-constrained runs.
//!
//! Reverse-communication bound-constrained backends take one integer code
//! per variable describing which of its bounds are active. The mapping is
//! part of the solver protocol: a wrong code silently corrupts the
//! optimization, so [`classify`] reproduces the classic decision table
//! exactly and is covered by exhaustive tests.
//!
//! Classification looks at true infinities only. Repositories that encode
//! missing bounds with ±1e20 sentinels produce `Both` here, which matches
//! how the classic drivers feed such problems to the backend; the
//! sentinel-aware check lives in the unconstrained driver instead.
use crate::driver::types::Point;

/// Bound type of a single variable, derived from its `(lower, upper)` pair.
///
/// `code` yields the conventional reverse-communication encoding:
/// 0 = unbounded, 1 = lower bound only, 2 = both bounds, 3 = upper bound
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundType {
    Free,
    LowerOnly,
    Both,
    UpperOnly,
}

impl BoundType {
    /// Integer code understood by bound-constrained solver backends.
    pub fn code(self) -> i32 {
        match self {
            BoundType::Free => 0,
            BoundType::LowerOnly => 1,
            BoundType::Both => 2,
            BoundType::UpperOnly => 3,
        }
    }
}

/// Classify one `(lower, upper)` bound pair.
///
/// Decision table (first match wins):
///
/// | lower  | upper  | type        |
/// |--------|--------|-------------|
/// | −∞     | +∞     | `Free`      |
/// | −∞     | finite | `UpperOnly` |
/// | finite | +∞     | `LowerOnly` |
/// | finite | finite | `Both`      |
///
/// Total function: every input pair maps to a type, including
/// `lower == upper`.
pub fn classify(lower: f64, upper: f64) -> BoundType {
    if lower == f64::NEG_INFINITY {
        if upper == f64::INFINITY {
            BoundType::Free
        } else {
            BoundType::UpperOnly
        }
    } else if upper == f64::INFINITY {
        BoundType::LowerOnly
    } else {
        BoundType::Both
    }
}

/// Map bound vectors to the per-variable code vector consumed by a
/// reverse-communication backend.
///
/// Computed once at setup; the codes are immutable for the run.
pub fn classify_all(lb: &Point, ub: &Point) -> Vec<i32> {
    lb.iter()
        .zip(ub.iter())
        .map(|(&lower, &upper)| classify(lower, upper).code())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The full decision table must be reproduced exactly, including the
    // degenerate lower == upper case.
    fn decision_table_is_exact() {
        assert_eq!(classify(f64::NEG_INFINITY, f64::INFINITY), BoundType::Free);
        assert_eq!(classify(f64::NEG_INFINITY, 5.0), BoundType::UpperOnly);
        assert_eq!(classify(2.0, f64::INFINITY), BoundType::LowerOnly);
        assert_eq!(classify(2.0, 4.0), BoundType::Both);
        assert_eq!(classify(3.0, 3.0), BoundType::Both);
    }

    #[test]
    // Purpose
    // -------
    // Classification is a pure function: calling it twice on the same
    // pair yields the same type.
    fn classification_is_idempotent() {
        let pairs = [
            (f64::NEG_INFINITY, f64::INFINITY),
            (f64::NEG_INFINITY, 5.0),
            (2.0, f64::INFINITY),
            (2.0, 4.0),
        ];
        for (lower, upper) in pairs {
            assert_eq!(classify(lower, upper), classify(lower, upper));
        }
    }

    #[test]
    // Purpose
    // -------
    // Large-magnitude sentinel bounds (±1e20) are finite and therefore
    // classify as Both; the sentinel convention is handled only by the
    // unconstrained-problem check.
    fn sentinel_bounds_are_finite_here() {
        assert_eq!(classify(-1.0e20, 1.0e20), BoundType::Both);
    }

    #[test]
    // Purpose
    // -------
    // Codes must match the conventional backend encoding: 0 free,
    // 1 lower only, 2 both, 3 upper only.
    fn codes_match_backend_convention() {
        assert_eq!(BoundType::Free.code(), 0);
        assert_eq!(BoundType::LowerOnly.code(), 1);
        assert_eq!(BoundType::Both.code(), 2);
        assert_eq!(BoundType::UpperOnly.code(), 3);
    }

    #[test]
    // Purpose
    // -------
    // classify_all maps the worked box example (lb = 2, ub = 4 for every
    // coordinate) to an all-Both code vector.
    fn box_example_classifies_as_both() {
        let lb = array![2.0, 2.0, 2.0];
        let ub = array![4.0, 4.0, 4.0];
        assert_eq!(classify_all(&lb, &ub), vec![2, 2, 2]);
    }

    #[test]
    fn mixed_bounds_produce_mixed_codes() {
        let lb = array![f64::NEG_INFINITY, f64::NEG_INFINITY, 0.0, 0.0];
        let ub = array![f64::INFINITY, 5.0, f64::INFINITY, 1.0];
        assert_eq!(classify_all(&lb, &ub), vec![0, 3, 1, 2]);
    }
}
