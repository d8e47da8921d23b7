//! Compatibility report data model.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::library::{Category, SoundId};
use crate::profile::Timbre;

/// Reason attached to every check when no input id resolves to a profile.
pub const NO_VALID_SOUNDS: &str = "No valid sounds";

/// Outcome of the family coherence check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyAnalysis {
    pub compatible: bool,
    pub score: f64,
    /// Distinct families, sorted.
    pub families: Vec<String>,
    pub reason: String,
}

/// Outcome of the category balance check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceAnalysis {
    pub balanced: bool,
    pub score: f64,
    /// Number of sounds per category.
    pub categories: BTreeMap<Category, usize>,
    pub reason: String,
}

/// Outcome of the timbre compatibility check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimbreAnalysis {
    pub compatible: bool,
    pub score: f64,
    /// Distinct timbres, sorted.
    pub timbres: Vec<Timbre>,
    pub reason: String,
}

/// Rating band of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Excellent,
    Good,
    Acceptable,
    NeedsImprovement,
}

impl Rating {
    /// Band for `score`: `>= 0.85` excellent, `>= 0.70` good, `>= 0.55`
    /// acceptable, otherwise needs improvement.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            Rating::Excellent
        } else if score >= 0.70 {
            Rating::Good
        } else if score >= 0.55 {
            Rating::Acceptable
        } else {
            Rating::NeedsImprovement
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Rating::Excellent => "These sounds will work very well together!",
            Rating::Good => "These sounds should work well together.",
            Rating::Acceptable => "These sounds may work, but could use refinement.",
            Rating::NeedsImprovement => "Consider adjusting sound selection for better coherence.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Excellent => "EXCELLENT",
            Rating::Good => "GOOD",
            Rating::Acceptable => "ACCEPTABLE",
            Rating::NeedsImprovement => "NEEDS_IMPROVEMENT",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sound referenced by the analyzed set, with its summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundUsage {
    pub id: SoundId,
    pub summary: String,
}

/// Full compatibility analysis of a set of sound ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityReport {
    /// Weighted score, rounded to two decimals.
    pub overall_score: f64,
    pub rating: Rating,
    pub verdict: String,
    pub family_analysis: FamilyAnalysis,
    pub balance_analysis: BalanceAnalysis,
    pub timbre_analysis: TimbreAnalysis,
    pub matching_kit: Option<String>,
    /// Number of distinct ids analyzed, unknown ids included.
    pub sound_count: usize,
    /// Every analyzed id in ascending order.
    pub sounds_used: Vec<SoundUsage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_boundaries() {
        assert_eq!(Rating::from_score(0.85), Rating::Excellent);
        assert_eq!(Rating::from_score(0.849), Rating::Good);
        assert_eq!(Rating::from_score(0.70), Rating::Good);
        assert_eq!(Rating::from_score(0.699), Rating::Acceptable);
        assert_eq!(Rating::from_score(0.55), Rating::Acceptable);
        assert_eq!(Rating::from_score(0.549), Rating::NeedsImprovement);
        assert_eq!(Rating::from_score(0.0), Rating::NeedsImprovement);
        assert_eq!(Rating::from_score(1.0), Rating::Excellent);
    }

    #[test]
    fn rating_serializes_screaming_snake() {
        let json = serde_json::to_string(&Rating::NeedsImprovement).unwrap();
        assert_eq!(json, "\"NEEDS_IMPROVEMENT\"");
        assert_eq!(Rating::NeedsImprovement.to_string(), "NEEDS_IMPROVEMENT");
    }

    #[test]
    fn each_band_has_distinct_verdict() {
        let verdicts = [
            Rating::Excellent.verdict(),
            Rating::Good.verdict(),
            Rating::Acceptable.verdict(),
            Rating::NeedsImprovement.verdict(),
        ];
        for (i, a) in verdicts.iter().enumerate() {
            for b in &verdicts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
