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

use crate::{
    enumerate::ConfigurationRecord, extreme::ExtremeConfiguration,
    stats::ExplorationStatistics,
};
use bicrystal_core::math::hull::DegeneracyPolicy;
use bicrystal_model::triple::CounterTriple;
use serde::{Serialize, Serializer};

/// The outcome of the extreme-point stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HullSummary {
    Extreme {
        configurations: Vec<ExtremeConfiguration>,
    },
    /// The hull could not be computed; the enumeration results stand.
    Failed { error: String },
}

/// Everything an exploration run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorationReport {
    pub side: usize,
    pub num_solute: usize,
    pub pruning_hints: bool,
    pub symmetry_breaking: bool,
    #[serde(serialize_with = "serialize_policy")]
    pub degeneracy: DegeneracyPolicy,
    pub kc_max: usize,
    pub num_candidates: usize,
    /// Every candidate in enumeration order.
    pub records: Vec<ConfigurationRecord>,
    pub hull: HullSummary,
    pub statistics: ExplorationStatistics,
}

impl ExplorationReport {
    /// Feasible records in enumeration order.
    pub fn feasible(&self) -> impl Iterator<Item = &ConfigurationRecord> {
        self.records.iter().filter(|r| r.is_feasible())
    }

    #[inline]
    pub fn num_feasible(&self) -> usize {
        self.feasible().count()
    }

    /// The extreme configurations, if the hull stage succeeded.
    pub fn extreme(&self) -> Option<&[ExtremeConfiguration]> {
        match &self.hull {
            HullSummary::Extreme { configurations } => Some(configurations),
            HullSummary::Failed { .. } => None,
        }
    }

    /// Feasible triples in enumeration order.
    pub fn feasible_triples(&self) -> Vec<CounterTriple> {
        self.feasible().map(|r| r.triple).collect()
    }

    pub fn extreme_triples(&self) -> Vec<CounterTriple> {
        self.extreme()
            .map(|c| c.iter().map(|e| e.triple).collect())
            .unwrap_or_default()
    }

    /// The hull failure text, if any.
    pub fn hull_error(&self) -> Option<&str> {
        match &self.hull {
            HullSummary::Failed { error } => Some(error),
            HullSummary::Extreme { .. } => None,
        }
    }
}

fn serialize_policy<S>(policy: &DegeneracyPolicy, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(policy)
}

impl std::fmt::Display for ExplorationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "lattice side: {} num. solute: {}", self.side, self.num_solute)?;
        writeln!(f, "max. kc: {}", self.kc_max)?;
        writeln!(f, "num. candidates: {}", self.num_candidates)?;
        writeln!(f, "num. feasible: {}", self.num_feasible())?;
        match &self.hull {
            HullSummary::Extreme { configurations } => {
                writeln!(f, "extreme configurations: {}", configurations.len())?;
                for configuration in configurations {
                    writeln!(f)?;
                    writeln!(f, "{}", configuration.triple)?;
                    writeln!(f, "{}", configuration.witness)?;
                }
            }
            HullSummary::Failed { error } => {
                writeln!(f, "extreme configurations unavailable: {error}")?;
                writeln!(f, "feasible configurations: {}", self.num_feasible())?;
                for record in self.feasible() {
                    writeln!(f)?;
                    writeln!(f, "{}", record.triple)?;
                    if let Some(witness) = &record.witness {
                        writeln!(f, "{witness}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bicrystal_model::witness::WitnessGrid;

    fn report(hull: HullSummary) -> ExplorationReport {
        ExplorationReport {
            side: 2,
            num_solute: 1,
            pruning_hints: true,
            symmetry_breaking: true,
            degeneracy: DegeneracyPolicy::Reject,
            kc_max: 0,
            num_candidates: 2,
            records: vec![
                ConfigurationRecord {
                    triple: CounterTriple::new(0, 0, 0),
                    witness: None,
                },
                ConfigurationRecord {
                    triple: CounterTriple::new(1, 0, 0),
                    witness: Some(WitnessGrid::from_rows(&[[1u8, 0], [0, 0]])),
                },
            ],
            hull,
            statistics: ExplorationStatistics::default(),
        }
    }

    #[test]
    fn test_failed_hull_keeps_feasible_records() {
        let report = report(HullSummary::Failed {
            error: "insufficient points".to_string(),
        });
        assert_eq!(report.num_feasible(), 1);
        assert_eq!(report.extreme(), None);
        assert!(report.extreme_triples().is_empty());
        assert_eq!(report.hull_error(), Some("insufficient points"));

        let text = report.to_string();
        assert!(text.contains("num. feasible: 1"));
        assert!(text.contains("extreme configurations unavailable: insufficient points"));
        assert!(text.contains("feasible configurations: 1\n\nngb= 1 kgb= 0 kc= 0\n[[1 0]\n [0 0]]"));
        assert!(!text.contains("ngb= 0 kgb= 0 kc= 0"));
        assert_eq!(report.feasible_triples(), vec![CounterTriple::new(1, 0, 0)]);
    }

    #[test]
    fn test_text_lists_extreme_witnesses() {
        let report = report(HullSummary::Extreme {
            configurations: vec![ExtremeConfiguration {
                triple: CounterTriple::new(1, 0, 0),
                witness: WitnessGrid::from_rows(&[[1u8, 0], [0, 0]]),
            }],
        });
        assert_eq!(report.extreme_triples(), vec![CounterTriple::new(1, 0, 0)]);
        let text = report.to_string();
        assert!(text.contains("max. kc: 0"));
        assert!(text.contains("ngb= 1 kgb= 0 kc= 0\n[[1 0]\n [0 0]]"));
    }

    #[test]
    fn test_json_shape() {
        let report = report(HullSummary::Failed {
            error: "boom".to_string(),
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["degeneracy"], "reject");
        assert_eq!(json["hull"]["status"], "failed");
        assert_eq!(json["hull"]["error"], "boom");
        assert_eq!(json["records"][0]["witness"], serde_json::Value::Null);
        assert_eq!(json["records"][1]["witness"], serde_json::json!([[1, 0], [0, 0]]));
        assert_eq!(json["records"][1]["triple"]["ngb"], 1);
    }
}
