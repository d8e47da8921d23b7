//! Sound library: the static category → {id → name} table the generator
//! and scorer read from.
//!
//! The factory library mirrors the sampler's built-in sounds. A YAML file
//! with the same shape can replace it at start-up; after that the library is
//! treated as read-only reference data.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a sound in the library.
pub type SoundId = u32;

/// Sound category. Declaration order is the library's enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Kicks")]
    Kicks,
    #[serde(rename = "Snares")]
    Snares,
    #[serde(rename = "Cymbals and Hats")]
    CymbalsAndHats,
    #[serde(rename = "Percussion")]
    Percussion,
    #[serde(rename = "Bass")]
    Bass,
    #[serde(rename = "Melodic & Synth")]
    MelodicSynth,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Kicks,
        Category::Snares,
        Category::CymbalsAndHats,
        Category::Percussion,
        Category::Bass,
        Category::MelodicSynth,
    ];

    /// Display name, as shown on the device.
    pub fn name(self) -> &'static str {
        match self {
            Category::Kicks => "Kicks",
            Category::Snares => "Snares",
            Category::CymbalsAndHats => "Cymbals and Hats",
            Category::Percussion => "Percussion",
            Category::Bass => "Bass",
            Category::MelodicSynth => "Melodic & Synth",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a display name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::CategoryNotFound(s.to_string()))
    }
}

/// A single sound as returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundEntry {
    pub id: SoundId,
    pub name: String,
    pub category: Category,
}

/// Category → {id → display name}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundLibrary {
    sounds: BTreeMap<Category, BTreeMap<SoundId, String>>,
}

impl SoundLibrary {
    /// Build a library from `(category, id, name)` triples.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (Category, SoundId, &'a str)>) -> Self {
        let mut sounds: BTreeMap<Category, BTreeMap<SoundId, String>> = BTreeMap::new();
        for (category, id, name) in entries {
            sounds.entry(category).or_default().insert(id, name.to_string());
        }
        Self { sounds }
    }

    /// Load a library from a YAML file keyed by category display name.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Categories in enumeration order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL.to_vec()
    }

    /// All sounds in a category, by display name.
    pub fn sounds_in(&self, category: &str) -> Result<Vec<SoundEntry>> {
        let category: Category = category.parse()?;
        Ok(self.sounds_in_category(category))
    }

    /// All sounds in a category, ordered by id. Empty if the category has no sounds.
    pub fn sounds_in_category(&self, category: Category) -> Vec<SoundEntry> {
        self.sounds
            .get(&category)
            .into_iter()
            .flatten()
            .map(|(&id, name)| SoundEntry {
                id,
                name: name.clone(),
                category,
            })
            .collect()
    }

    /// Case-insensitive substring search over sound names.
    pub fn search(&self, query: &str) -> Vec<SoundEntry> {
        let needle = query.to_uppercase();
        self.iter()
            .filter(|entry| entry.name.to_uppercase().contains(&needle))
            .collect()
    }

    /// Look up a sound by id.
    pub fn get(&self, id: SoundId) -> Option<SoundEntry> {
        self.sounds.iter().find_map(|(&category, sounds)| {
            sounds.get(&id).map(|name| SoundEntry {
                id,
                name: name.clone(),
                category,
            })
        })
    }

    /// Find a sound id by exact (case-insensitive) name.
    pub fn find_by_name(&self, name: &str) -> Option<SoundId> {
        let wanted = name.to_uppercase();
        self.iter()
            .find(|entry| entry.name.to_uppercase() == wanted)
            .map(|entry| entry.id)
    }

    /// A numeric id as given, otherwise the id of the sound with that name.
    pub fn resolve(&self, input: &str) -> Result<SoundId> {
        match input.trim().parse::<SoundId>() {
            Ok(id) => Ok(id),
            Err(_) => self
                .find_by_name(input.trim())
                .ok_or_else(|| Error::SoundNotFound(input.to_string())),
        }
    }

    /// Whether `id` exists anywhere in the library.
    pub fn contains(&self, id: SoundId) -> bool {
        self.sounds.values().any(|sounds| sounds.contains_key(&id))
    }

    /// Every sound, in category then id order.
    pub fn iter(&self) -> impl Iterator<Item = SoundEntry> + '_ {
        self.sounds.iter().flat_map(|(&category, sounds)| {
            sounds.iter().map(move |(&id, name)| SoundEntry {
                id,
                name: name.clone(),
                category,
            })
        })
    }

    /// Total number of sounds.
    pub fn len(&self) -> usize {
        self.sounds.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SoundLibrary {
    /// The factory library.
    fn default() -> Self {
        use Category::*;

        Self::from_entries([
            (Kicks, 1, "MICRO KICK"),
            (Kicks, 2, "NT KICK"),
            (Kicks, 3, "NT KICK B"),
            (Kicks, 4, "NT KICK C"),
            (Kicks, 5, "NT KICK D"),
            (Snares, 100, "NT SNARE"),
            (Snares, 101, "NT SNARE B"),
            (Snares, 102, "NT SNARE C"),
            (CymbalsAndHats, 200, "NT HH CLOSED"),
            (CymbalsAndHats, 201, "NT HH CLOSED B"),
            (CymbalsAndHats, 218, "NT HH OPEN"),
            (Percussion, 300, "NT CLAP"),
            (Percussion, 301, "NT CLAP B"),
            (Percussion, 302, "NT CLAP C"),
            (Bass, 400, "NT BASS"),
            (Bass, 401, "S95X ROUND"),
            (Bass, 402, "TUBRO BASS"),
            (MelodicSynth, 500, "BLUE"),
            (MelodicSynth, 501, "PIANO S95X"),
            (MelodicSynth, 502, "WURLI CLEAN"),
        ])
    }
}
