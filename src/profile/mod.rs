//! Sound profiles: family, characteristics, and timbre derived from names.
//!
//! Profiles are a pure function of the [`SoundLibrary`]. They are built once
//! into a [`SoundProfiles`] index and shared read-only behind an `Arc`;
//! rebuilding produces a new index rather than mutating the old one.

pub mod rules;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::library::{Category, SoundId, SoundLibrary};

pub use rules::{extract_family, infer_characteristics, infer_timbre, Timbre, GENERIC_FAMILY};

/// Semantic profile of a single library sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundProfile {
    pub sound_id: SoundId,
    pub name: String,
    pub category: Category,
    /// Naming family, e.g. `"NT"`, `"S95X"`, or `"GENERIC"`.
    pub family: String,
    pub characteristics: BTreeSet<&'static str>,
    pub timbre: Timbre,
}

impl SoundProfile {
    /// Derive the profile for one library entry.
    pub fn derive(sound_id: SoundId, name: &str, category: Category) -> Self {
        let characteristics = infer_characteristics(name, category);
        let timbre = infer_timbre(name, &characteristics);
        Self {
            sound_id,
            name: name.to_string(),
            category,
            family: extract_family(name),
            characteristics,
            timbre,
        }
    }

    /// One-line description: name, family, timbre, and the first three
    /// characteristics in sorted order.
    pub fn summary(&self) -> String {
        let chars: Vec<&str> = self.characteristics.iter().copied().take(3).collect();
        format!(
            "{} ({} family, {} timbre: {})",
            self.name,
            self.family,
            self.timbre,
            chars.join(", ")
        )
    }
}

/// Read-only index of profiles keyed by sound id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundProfiles {
    profiles: BTreeMap<SoundId, SoundProfile>,
}

impl SoundProfiles {
    /// Build a profile for every sound in `library`.
    pub fn build(library: &SoundLibrary) -> Self {
        let profiles = library
            .iter()
            .map(|entry| {
                let profile = SoundProfile::derive(entry.id, &entry.name, entry.category);
                (entry.id, profile)
            })
            .collect();
        Self { profiles }
    }

    /// Profile for `id`, if the library has it.
    pub fn get(&self, id: SoundId) -> Option<&SoundProfile> {
        self.profiles.get(&id)
    }

    /// Profiles for the resolvable ids in `ids`; unknown ids are dropped.
    pub fn resolve<'b>(&self, ids: impl IntoIterator<Item = &'b SoundId>) -> Vec<&SoundProfile> {
        ids.into_iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Summary for `id`, or a placeholder naming the unknown id.
    pub fn summary(&self, id: SoundId) -> String {
        match self.get(id) {
            Some(profile) => profile.summary(),
            None => format!("Unknown sound (ID: {id})"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Convenience wrapper over [`SoundProfiles::build`].
pub fn build_profiles(library: &SoundLibrary) -> SoundProfiles {
    SoundProfiles::build(library)
}

/// Process-wide profiles for the factory library, built on first use.
pub fn factory_profiles() -> Arc<SoundProfiles> {
    static FACTORY: OnceLock<Arc<SoundProfiles>> = OnceLock::new();
    FACTORY
        .get_or_init(|| Arc::new(SoundProfiles::build(&SoundLibrary::default())))
        .clone()
}
