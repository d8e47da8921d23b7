//! Compatibility scoring: how coherent a set of sounds is.
//!
//! Three independent checks (family, category balance, timbre) are combined
//! into a weighted overall score and a [`Rating`] band. The scorer also
//! finds the curated [`SoundKit`] that best covers the set.

pub mod checks;
pub mod kits;
pub mod report;

use std::collections::BTreeSet;
use std::sync::Arc;

pub use checks::{check_balance, check_family, check_timbre};
pub use kits::{KitMatch, SoundKit, KITS, MATCH_THRESHOLD};
pub use report::{
    BalanceAnalysis, CompatibilityReport, FamilyAnalysis, Rating, SoundUsage, TimbreAnalysis,
    NO_VALID_SOUNDS,
};

use crate::library::{SoundId, SoundLibrary};
use crate::profile::{factory_profiles, SoundProfiles};

pub const FAMILY_WEIGHT: f64 = 0.40;
pub const BALANCE_WEIGHT: f64 = 0.35;
pub const TIMBRE_WEIGHT: f64 = 0.25;

/// Scores sound sets against a profile index and the curated kits.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    profiles: Arc<SoundProfiles>,
    kits: &'static [SoundKit],
}

impl CompatibilityScorer {
    /// Create a scorer over an existing profile index.
    pub fn new(profiles: Arc<SoundProfiles>) -> Self {
        Self {
            profiles,
            kits: KITS,
        }
    }

    /// Create a scorer for a custom library.
    pub fn for_library(library: &SoundLibrary) -> Self {
        Self::new(Arc::new(SoundProfiles::build(library)))
    }

    pub fn profiles(&self) -> &Arc<SoundProfiles> {
        &self.profiles
    }

    /// Curated kits in matching order.
    pub fn kits(&self) -> &'static [SoundKit] {
        self.kits
    }

    /// Kit by name, or `None` if no kit has that name.
    pub fn recommended_kit(&self, style: &str) -> Option<&'static SoundKit> {
        self.kits
            .iter()
            .find(|k| k.name.eq_ignore_ascii_case(style.trim()))
    }

    pub fn check_family(&self, ids: &BTreeSet<SoundId>) -> FamilyAnalysis {
        check_family(&self.profiles.resolve(ids))
    }

    pub fn check_balance(&self, ids: &BTreeSet<SoundId>) -> BalanceAnalysis {
        check_balance(&self.profiles.resolve(ids))
    }

    pub fn check_timbre(&self, ids: &BTreeSet<SoundId>) -> TimbreAnalysis {
        check_timbre(&self.profiles.resolve(ids))
    }

    /// Kit covering more than [`MATCH_THRESHOLD`] of `ids`. Sets with no
    /// resolvable id never match.
    pub fn find_matching_kit(&self, ids: &BTreeSet<SoundId>) -> Option<KitMatch> {
        if self.profiles.resolve(ids).is_empty() {
            return None;
        }
        kits::best_kit(ids, self.kits)
    }

    /// Run every check over the distinct ids in `ids` and aggregate.
    pub fn analyze(&self, ids: impl IntoIterator<Item = SoundId>) -> CompatibilityReport {
        let ids: BTreeSet<SoundId> = ids.into_iter().collect();
        let resolved = self.profiles.resolve(&ids);

        let family_analysis = check_family(&resolved);
        let balance_analysis = check_balance(&resolved);
        let timbre_analysis = check_timbre(&resolved);

        let raw = weighted_score(
            family_analysis.score,
            balance_analysis.score,
            timbre_analysis.score,
        );
        // Rated on the unrounded sum; only the reported score is rounded.
        let rating = Rating::from_score(raw);
        let overall_score = round_to_hundredths(raw);

        let matching_kit = self
            .find_matching_kit(&ids)
            .map(|m| m.kit.name.to_string());

        tracing::debug!(
            sounds = ids.len(),
            resolved = resolved.len(),
            overall_score,
            %rating,
            "analyzed sound compatibility"
        );

        CompatibilityReport {
            overall_score,
            rating,
            verdict: rating.verdict().to_string(),
            family_analysis,
            balance_analysis,
            timbre_analysis,
            matching_kit,
            sound_count: ids.len(),
            sounds_used: ids
                .iter()
                .map(|&id| SoundUsage {
                    id,
                    summary: self.profiles.summary(id),
                })
                .collect(),
        }
    }
}

impl Default for CompatibilityScorer {
    /// Scorer over the factory library.
    fn default() -> Self {
        Self::new(factory_profiles())
    }
}

/// Weighted sum of the three check scores.
pub fn weighted_score(family: f64, balance: f64, timbre: f64) -> f64 {
    family * FAMILY_WEIGHT + balance * BALANCE_WEIGHT + timbre * TIMBRE_WEIGHT
}

/// Round to two decimals by the exact binary value of `x`, ties to even.
///
/// `0.845` is stored just below the midpoint, so it becomes `0.84`.
pub fn round_to_hundredths(x: f64) -> f64 {
    let eighths = x * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        // odd multiples of 1/8 sit exactly between two hundredths
        let lower = (x * 100.0).floor();
        let even = if lower % 2.0 == 0.0 { lower } else { lower + 1.0 };
        return even / 100.0;
    }
    // Decimal formatting is exact on the binary value.
    format!("{x:.2}").parse().unwrap_or(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn natural_kit_is_excellent() {
        let scorer = CompatibilityScorer::default();
        let report = scorer.analyze([2, 100, 200, 300]);
        // 0.4 * 1.0 + 0.35 * 1.0 + 0.25 * 0.95
        assert_approx_eq!(report.overall_score, 0.99);
        assert_eq!(report.rating, Rating::Excellent);
        assert_eq!(report.matching_kit.as_deref(), Some("Natural Kit"));
        assert_eq!(report.sound_count, 4);
    }

    #[test]
    fn hybrid_mix_scores_excellent() {
        let scorer = CompatibilityScorer::default();
        // MICRO, NT, NT, S95X; dark, warm, warm, neutral
        let report = scorer.analyze([1, 101, 218, 401]);
        // 0.4 * 0.7 + 0.35 * 1.0 + 0.25 * 0.9 lands just below 0.855
        assert_approx_eq!(report.overall_score, 0.85);
        assert_eq!(report.rating, Rating::Excellent);
        assert_eq!(report.matching_kit.as_deref(), Some("Hybrid Kit"));
    }

    #[test]
    fn duplicates_are_collapsed() {
        let scorer = CompatibilityScorer::default();
        let report = scorer.analyze([2, 2, 2, 100]);
        assert_eq!(report.sound_count, 2);
        assert_eq!(report.sounds_used.len(), 2);
    }

    #[test]
    fn empty_set_scores_zero() {
        let scorer = CompatibilityScorer::default();
        let report = scorer.analyze([]);
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.rating, Rating::NeedsImprovement);
        assert_eq!(report.family_analysis.reason, NO_VALID_SOUNDS);
        assert!(report.matching_kit.is_none());
        assert!(report.sounds_used.is_empty());
    }

    #[test]
    fn unknown_ids_excluded_from_scoring() {
        let scorer = CompatibilityScorer::default();
        let known = scorer.analyze([2, 100, 200]);
        let mixed = scorer.analyze([2, 100, 200, 7777]);
        assert_eq!(known.family_analysis, mixed.family_analysis);
        assert_eq!(known.overall_score, mixed.overall_score);
        assert_eq!(mixed.sounds_used[3].summary, "Unknown sound (ID: 7777)");
    }

    #[test]
    fn only_unknown_ids_match_no_kit() {
        let scorer = CompatibilityScorer::default();
        assert!(scorer.find_matching_kit(&BTreeSet::from([7777])).is_none());
    }

    #[test]
    fn weighted_score_is_unrounded() {
        assert_approx_eq!(weighted_score(0.4, 0.3, 0.5), 0.39);
        assert_approx_eq!(weighted_score(1.0, 1.0, 1.0), 1.0);
        assert_eq!(weighted_score(0.0, 0.0, 0.0), 0.0);
        assert!(weighted_score(0.85, 0.8, 0.9) < 0.85);
    }

    #[test]
    fn rounding_follows_binary_value() {
        assert_eq!(round_to_hundredths(weighted_score(0.85, 0.8, 0.9)), 0.84);
        assert_eq!(round_to_hundredths(0.9875), 0.99);
        assert_eq!(round_to_hundredths(0.8125), 0.81);
        assert_eq!(round_to_hundredths(0.125), 0.12);
        assert_eq!(round_to_hundredths(0.375), 0.38);
        assert_eq!(round_to_hundredths(0.25), 0.25);
        assert_eq!(round_to_hundredths(1.0), 1.0);
        assert_eq!(round_to_hundredths(0.0), 0.0);
    }

    #[test]
    fn rating_uses_unrounded_score() {
        let scorer = CompatibilityScorer::default();
        // NT, NT, S95X: 0.4 * 0.85 + 0.35 * 0.8 + 0.25 * 0.9 falls short of 0.845
        let report = scorer.analyze([2, 100, 401]);
        assert_eq!(report.overall_score, 0.84);
        assert_eq!(report.rating, Rating::Good);
        assert_eq!(report.verdict, Rating::Good.verdict());
    }

    #[test]
    fn recommended_kit_lookup() {
        let scorer = CompatibilityScorer::default();
        assert_eq!(scorer.recommended_kit("Electronic Kit").unwrap().style, "electronic");
        assert!(scorer.recommended_kit("Polka Kit").is_none());
        assert_eq!(scorer.kits().len(), 4);
    }
}
