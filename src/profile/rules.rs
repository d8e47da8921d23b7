//! Naming rule tables: family extraction, characteristic tags, timbre.
//!
//! All matching is done on the upper-cased display name. Family and timbre
//! tables are ordered and first match wins; characteristic rules are unioned.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::library::Category;

/// Family reported when no rule matches.
pub const GENERIC_FAMILY: &str = "GENERIC";

/// How a family token must appear in a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    /// Token at the start, followed by whitespace (`"NT KICK"`).
    Leading,
    /// Whitespace then token at the end (`"WURLI CLEAN"`).
    Trailing,
    /// Token at the start, anything may follow (`"BLUE"`, `"PIANO S95X"`).
    Prefix,
}

/// One row of the family table.
#[derive(Debug, Clone, Copy)]
pub struct FamilyRule {
    pub token: &'static str,
    pub kind: TokenMatch,
}

impl FamilyRule {
    const fn new(token: &'static str, kind: TokenMatch) -> Self {
        Self { token, kind }
    }

    /// Whether this rule matches an upper-cased name.
    pub fn matches(&self, upper: &str) -> bool {
        match self.kind {
            TokenMatch::Leading => upper
                .strip_prefix(self.token)
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_whitespace),
            TokenMatch::Trailing => upper
                .strip_suffix(self.token)
                .and_then(|rest| rest.chars().next_back())
                .is_some_and(char::is_whitespace),
            TokenMatch::Prefix => upper.starts_with(self.token),
        }
    }
}

pub const FAMILY_RULES: &[FamilyRule] = &[
    FamilyRule::new("NT", TokenMatch::Leading),
    FamilyRule::new("808", TokenMatch::Leading),
    FamilyRule::new("909", TokenMatch::Leading),
    FamilyRule::new("S95X", TokenMatch::Leading),
    FamilyRule::new("MICRO", TokenMatch::Leading),
    FamilyRule::new("TURBO", TokenMatch::Leading),
    FamilyRule::new("TUBRO", TokenMatch::Leading),
    FamilyRule::new("CLEAN", TokenMatch::Trailing),
    FamilyRule::new("BLUE", TokenMatch::Prefix),
    FamilyRule::new("PIANO", TokenMatch::Prefix),
    FamilyRule::new("WURLI", TokenMatch::Prefix),
];

/// Sound family for a display name.
pub fn extract_family(name: &str) -> String {
    let upper = name.trim().to_uppercase();
    FAMILY_RULES
        .iter()
        .find(|rule| rule.matches(&upper))
        .map_or(GENERIC_FAMILY, |rule| rule.token)
        .to_string()
}

/// Substrings that, when any is present, contribute `tags`.
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub needles: &'static [&'static str],
    pub tags: &'static [&'static str],
}

impl TagRule {
    const fn new(needles: &'static [&'static str], tags: &'static [&'static str]) -> Self {
        Self { needles, tags }
    }
}

pub const CHARACTERISTIC_RULES: &[TagRule] = &[
    TagRule::new(&["NT"], &["natural", "acoustic", "organic"]),
    TagRule::new(&["808", "BASS"], &["deep", "sub", "powerful"]),
    TagRule::new(&["909"], &["classic", "punchy", "electronic"]),
    TagRule::new(&["MICRO"], &["tight", "short", "crisp"]),
    TagRule::new(&["CLEAN"], &["clean", "clear", "polished"]),
    TagRule::new(&["OPEN"], &["sustained", "ringing", "bright"]),
    TagRule::new(&["CLOSED"], &["tight", "short", "controlled"]),
    TagRule::new(&["CLAP"], &["percussive", "sharp", "bright"]),
    TagRule::new(&["S95X"], &["synth", "electronic", "modern"]),
    TagRule::new(&["TURBO", "TUBRO"], &["aggressive", "distorted", "heavy"]),
    TagRule::new(&["PIANO"], &["melodic", "harmonic", "acoustic"]),
    TagRule::new(&["WURLI"], &["vintage", "electric", "warm"]),
    TagRule::new(&["BLUE"], &["smooth", "synth", "pad"]),
];

/// Tags every sound in a category carries.
pub fn category_tags(category: Category) -> &'static [&'static str] {
    match category {
        Category::Kicks => &["low-frequency"],
        Category::Snares => &["mid-frequency"],
        Category::CymbalsAndHats => &["high-frequency"],
        Category::Bass => &["low-frequency", "harmonic"],
        Category::MelodicSynth => &["harmonic", "pitched"],
        Category::Percussion => &[],
    }
}

/// Union of every matching characteristic rule plus the category tags.
pub fn infer_characteristics(name: &str, category: Category) -> BTreeSet<&'static str> {
    let upper = name.to_uppercase();
    let mut tags: BTreeSet<&'static str> = CHARACTERISTIC_RULES
        .iter()
        .filter(|rule| rule.needles.iter().any(|n| upper.contains(*n)))
        .flat_map(|rule| rule.tags.iter().copied())
        .collect();
    tags.extend(category_tags(category));
    tags
}

/// Tonal color bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timbre {
    Warm,
    Bright,
    Dark,
    Neutral,
    Balanced,
}

impl Timbre {
    pub fn as_str(self) -> &'static str {
        match self {
            Timbre::Warm => "warm",
            Timbre::Bright => "bright",
            Timbre::Dark => "dark",
            Timbre::Neutral => "neutral",
            Timbre::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for Timbre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the timbre decision list.
#[derive(Debug, Clone, Copy)]
pub struct TimbreRule {
    pub needles: &'static [&'static str],
    /// Characteristic that also triggers the rule.
    pub characteristic: Option<&'static str>,
    pub timbre: Timbre,
}

impl TimbreRule {
    const fn new(
        needles: &'static [&'static str],
        characteristic: Option<&'static str>,
        timbre: Timbre,
    ) -> Self {
        Self {
            needles,
            characteristic,
            timbre,
        }
    }
}

pub const TIMBRE_RULES: &[TimbreRule] = &[
    TimbreRule::new(&["WURLI"], Some("natural"), Timbre::Warm),
    TimbreRule::new(&["CLEAN", "OPEN", "CLAP"], None, Timbre::Bright),
    TimbreRule::new(&["BASS", "MICRO"], None, Timbre::Dark),
    TimbreRule::new(&["S95X", "BLUE"], None, Timbre::Neutral),
];

/// First matching timbre rule, or [`Timbre::Balanced`].
pub fn infer_timbre(name: &str, characteristics: &BTreeSet<&'static str>) -> Timbre {
    let upper = name.to_uppercase();
    TIMBRE_RULES
        .iter()
        .find(|rule| {
            rule.needles.iter().any(|n| upper.contains(*n))
                || rule
                    .characteristic
                    .is_some_and(|c| characteristics.contains(c))
        })
        .map_or(Timbre::Balanced, |rule| rule.timbre)
}
