// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{assignment::Assignment, stats::OracleStatistics};

#[derive(Debug, Clone, PartialEq)]
pub enum OracleResult {
    /// A solution exists; with a zero objective every solution is optimal.
    Optimal(Assignment),
    /// It has been proven that no solution exists.
    Infeasible,
    /// The backend stopped without a proof either way.
    Unknown,
}

impl std::fmt::Display for OracleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleResult::Optimal(assignment) => {
                write!(f, "Optimal({} values)", assignment.len())
            }
            OracleResult::Infeasible => write!(f, "Infeasible"),
            OracleResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// A solution was found.
    OptimalityProven,
    /// The search space was exhausted without a solution.
    InfeasibilityProven,
    /// A limit or an interrupt stopped the search. The string says which.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Everything a backend reports for one `solve`.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleOutcome {
    pub result: OracleResult,
    pub reason: TerminationReason,
    pub statistics: OracleStatistics,
}

impl OracleOutcome {
    #[inline]
    pub fn new(
        result: OracleResult,
        reason: TerminationReason,
        statistics: OracleStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn optimal(assignment: Assignment, statistics: OracleStatistics) -> Self {
        Self::new(
            OracleResult::Optimal(assignment),
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    #[inline]
    pub fn infeasible(statistics: OracleStatistics) -> Self {
        Self::new(
            OracleResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            statistics,
        )
    }

    #[inline]
    pub fn aborted<S>(reason: S, statistics: OracleStatistics) -> Self
    where
        S: Into<String>,
    {
        Self::new(
            OracleResult::Unknown,
            TerminationReason::Aborted(reason.into()),
            statistics,
        )
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, OracleResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, OracleResult::Infeasible)
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self.result, OracleResult::Unknown)
    }
}

impl std::fmt::Display for OracleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.result, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pair_result_and_reason() {
        let stats = OracleStatistics::default();
        let opt = OracleOutcome::optimal(Assignment::from_bits(&[true]), stats.clone());
        assert!(opt.is_optimal());
        assert_eq!(opt.reason, TerminationReason::OptimalityProven);

        let inf = OracleOutcome::infeasible(stats.clone());
        assert!(inf.is_infeasible());
        assert_eq!(inf.reason, TerminationReason::InfeasibilityProven);

        let ab = OracleOutcome::aborted("time limit reached", stats);
        assert!(ab.is_unknown());
        assert_eq!(ab.to_string(), "Unknown (Aborted: time limit reached)");
    }
}
