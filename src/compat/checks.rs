//! The three compatibility checks. Each takes the resolved profiles of a
//! sound set; unknown ids have already been filtered out.

use std::collections::{BTreeMap, BTreeSet};

use super::report::{BalanceAnalysis, FamilyAnalysis, TimbreAnalysis, NO_VALID_SOUNDS};
use crate::library::Category;
use crate::profile::{SoundProfile, Timbre};

/// Family that mixes well with one other family.
const VERSATILE_FAMILY: &str = "NT";

/// Family coherence: fewer distinct families score higher.
pub fn check_family(profiles: &[&SoundProfile]) -> FamilyAnalysis {
    if profiles.is_empty() {
        return FamilyAnalysis {
            compatible: false,
            score: 0.0,
            families: Vec::new(),
            reason: NO_VALID_SOUNDS.to_string(),
        };
    }

    let families: BTreeSet<&str> = profiles.iter().map(|p| p.family.as_str()).collect();
    let count = families.len();

    let (compatible, score, reason) = if count == 1 {
        let only = families.iter().next().copied().unwrap_or_default();
        (
            true,
            1.0,
            format!("All sounds from {only} family - excellent coherence"),
        )
    } else if families.contains(VERSATILE_FAMILY) && count <= 2 {
        (
            true,
            0.85,
            "NT sounds with other families - good compatibility".to_string(),
        )
    } else if count <= 3 {
        (
            true,
            0.70,
            "Multiple families - acceptable mix, watch for coherence".to_string(),
        )
    } else {
        (
            false,
            0.40,
            "Too many different sound families - may lack coherence".to_string(),
        )
    };

    FamilyAnalysis {
        compatible,
        score,
        families: families.into_iter().map(str::to_string).collect(),
        reason,
    }
}

/// Category balance: a kit needs kicks, snares, and hats.
pub fn check_balance(profiles: &[&SoundProfile]) -> BalanceAnalysis {
    if profiles.is_empty() {
        return BalanceAnalysis {
            balanced: false,
            score: 0.0,
            categories: BTreeMap::new(),
            reason: NO_VALID_SOUNDS.to_string(),
        };
    }

    let mut categories: BTreeMap<Category, usize> = BTreeMap::new();
    for p in profiles {
        *categories.entry(p.category).or_insert(0) += 1;
    }

    let has_kicks = categories.contains_key(&Category::Kicks);
    let has_snares = categories.contains_key(&Category::Snares);
    let has_hats = categories.contains_key(&Category::CymbalsAndHats);

    let (balanced, score, reason) = if has_kicks && has_snares && has_hats {
        (true, 1.0, "Good balance: has essential drum elements")
    } else if has_kicks && has_snares {
        (true, 0.80, "Acceptable: has kicks and snares, missing hats")
    } else if has_kicks {
        (
            false,
            0.50,
            "Unbalanced: only has kicks, missing snares and hats",
        )
    } else {
        (
            false,
            0.30,
            "Very unbalanced: missing essential drum elements",
        )
    };

    BalanceAnalysis {
        balanced,
        score,
        categories,
        reason: reason.to_string(),
    }
}

/// Timbre compatibility: uniform or neutral palettes score highest.
pub fn check_timbre(profiles: &[&SoundProfile]) -> TimbreAnalysis {
    if profiles.is_empty() {
        return TimbreAnalysis {
            compatible: false,
            score: 0.0,
            timbres: Vec::new(),
            reason: NO_VALID_SOUNDS.to_string(),
        };
    }

    let timbres: BTreeSet<Timbre> = profiles.iter().map(|p| p.timbre).collect();
    let complementary = [
        BTreeSet::from([Timbre::Warm, Timbre::Bright]),
        BTreeSet::from([Timbre::Warm, Timbre::Dark]),
    ];

    let (compatible, score, reason) = if timbres.len() == 1 {
        let only = timbres.iter().next().copied().unwrap_or(Timbre::Balanced);
        (
            true,
            0.95,
            format!("Uniform {only} timbre - excellent coherence"),
        )
    } else if timbres.contains(&Timbre::Balanced) || timbres.contains(&Timbre::Neutral) {
        (
            true,
            0.90,
            "Includes balanced timbres - good compatibility".to_string(),
        )
    } else if complementary.contains(&timbres) {
        (
            true,
            0.85,
            "Complementary timbres - creates nice contrast".to_string(),
        )
    } else if timbres.len() <= 2 {
        (
            true,
            0.75,
            "Mixed timbres - acceptable variety".to_string(),
        )
    } else {
        (
            false,
            0.50,
            "Too many different timbres - may sound disjointed".to_string(),
        )
    };

    TimbreAnalysis {
        compatible,
        score,
        timbres: timbres.into_iter().collect(),
        reason,
    }
}
