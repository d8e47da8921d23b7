//! Curated sound kits and kit matching.
//!
//! [`KITS`] order is part of the matching contract: when two kits reach the
//! same overlap, the one listed first wins.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::library::SoundId;
use crate::profile::Timbre;

/// Minimum overlap ratio a kit must exceed to count as a match.
pub const MATCH_THRESHOLD: f64 = 0.30;

/// A hand-picked set of sounds that work together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundKit {
    pub name: &'static str,
    pub description: &'static str,
    pub family: &'static str,
    pub style: &'static str,
    pub timbre: Timbre,
    pub kick: &'static [SoundId],
    pub snare: &'static [SoundId],
    pub hat: &'static [SoundId],
    pub perc: &'static [SoundId],
    pub bass: &'static [SoundId],
    pub melodic: &'static [SoundId],
}

impl SoundKit {
    /// Every sound in the kit, lane by lane (kick, snare, hat, perc, bass, melodic).
    pub fn sound_ids(&self) -> impl Iterator<Item = SoundId> + '_ {
        [
            self.kick,
            self.snare,
            self.hat,
            self.perc,
            self.bass,
            self.melodic,
        ]
        .into_iter()
        .flatten()
        .copied()
    }
}

pub const KITS: &[SoundKit] = &[
    SoundKit {
        name: "Natural Kit",
        description: "Organic, natural-sounding drum kit",
        family: "NT",
        style: "organic",
        timbre: Timbre::Warm,
        kick: &[2, 3, 4, 5],
        snare: &[100, 101, 102],
        hat: &[200, 201, 218],
        perc: &[300, 301, 302],
        bass: &[],
        melodic: &[],
    },
    SoundKit {
        name: "Electronic Kit",
        description: "Modern electronic/synth sounds",
        family: "S95X",
        style: "electronic",
        timbre: Timbre::Bright,
        kick: &[1],
        snare: &[100],
        hat: &[200, 201],
        perc: &[300],
        bass: &[401],
        melodic: &[500, 501, 502],
    },
    SoundKit {
        name: "Hybrid Kit",
        description: "Mix of natural and electronic elements",
        family: "MIXED",
        style: "hybrid",
        timbre: Timbre::Balanced,
        kick: &[1, 2, 3],
        snare: &[100, 101],
        hat: &[200, 201, 218],
        perc: &[300, 301],
        bass: &[400, 401],
        melodic: &[501, 502],
    },
    SoundKit {
        name: "Heavy Kit",
        description: "Aggressive, powerful sounds",
        family: "HEAVY",
        style: "aggressive",
        timbre: Timbre::Dark,
        kick: &[5],
        snare: &[102],
        hat: &[218],
        perc: &[302],
        bass: &[402],
        melodic: &[],
    },
];

/// The best-matching kit and the fraction of the requested ids it covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KitMatch {
    pub kit: &'static SoundKit,
    pub overlap: f64,
}

/// Kit covering the largest share of `ids`, if that share exceeds
/// [`MATCH_THRESHOLD`].
///
/// The share is `|ids ∩ kit| / |ids|`. Only the first kit reaching the
/// maximum is kept.
pub fn best_kit(ids: &BTreeSet<SoundId>, kits: &'static [SoundKit]) -> Option<KitMatch> {
    if ids.is_empty() {
        return None;
    }

    let mut best: Option<KitMatch> = None;
    for kit in kits {
        let kit_ids: BTreeSet<SoundId> = kit.sound_ids().collect();
        let overlap = ids.intersection(&kit_ids).count() as f64 / ids.len() as f64;
        if best.map_or(true, |b| overlap > b.overlap) {
            best = Some(KitMatch { kit, overlap });
        }
    }

    best.filter(|m| m.overlap > MATCH_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[SoundId]) -> BTreeSet<SoundId> {
        v.iter().copied().collect()
    }

    #[test]
    fn kit_order_is_fixed() {
        let names: Vec<_> = KITS.iter().map(|k| k.name).collect();
        assert_eq!(
            names,
            vec!["Natural Kit", "Electronic Kit", "Hybrid Kit", "Heavy Kit"]
        );
    }

    #[test]
    fn every_kit_matches_itself_fully() {
        for kit in KITS {
            let m = best_kit(&kit.sound_ids().collect(), KITS).unwrap();
            assert_eq!(m.kit.name, kit.name);
            assert_eq!(m.overlap, 1.0);
        }
    }

    #[test]
    fn zero_overlap_has_no_match() {
        assert!(best_kit(&ids(&[9999, 8888]), KITS).is_none());
    }

    #[test]
    fn empty_input_has_no_match() {
        assert!(best_kit(&BTreeSet::new(), KITS).is_none());
    }

    #[test]
    fn ties_go_to_first_kit() {
        // 2 and 100 are in Natural, Hybrid; 100 also in Electronic.
        let m = best_kit(&ids(&[2, 100]), KITS).unwrap();
        assert_eq!(m.kit.name, "Natural Kit");
        assert_eq!(m.overlap, 1.0);
    }

    #[test]
    fn threshold_is_exclusive() {
        // 1 of 4 ids in any kit: 0.25 is below the threshold.
        assert!(best_kit(&ids(&[402, 9001, 9002, 9003]), KITS).is_none());
    }

    #[test]
    fn sound_ids_flattens_lanes_in_order() {
        let heavy = &KITS[3];
        let all: Vec<_> = heavy.sound_ids().collect();
        assert_eq!(all, vec![5, 102, 218, 302, 402]);
    }
}
