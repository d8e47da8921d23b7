//! Pattern generators: kick, snare, hat, and percussion lanes over a fixed
//! step grid.
//!
//! All four lanes draw from one PRNG stream in the fixed order kick → snare
//! → hat → perc. Reordering the calls changes every lane after the first, so
//! [`generate_patterns`] is the only place that sequences them.

pub mod hat;
pub mod kick;
pub mod perc;
pub mod snare;

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::library::{SoundId, SoundLibrary};
use crate::seed::SeedParams;

pub use hat::generate_hat;
pub use kick::generate_kick;
pub use perc::generate_perc;
pub use snare::generate_snare;

/// Largest grid the generators accept.
pub const MAX_STEPS: u32 = 1 << 16;

/// Shape of the step grid: `bars * beats_per_bar * subdivisions` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub bars: u32,
    pub beats_per_bar: u32,
    /// Steps per beat.
    pub subdivisions: u32,
}

impl Grid {
    pub fn new(bars: u32, beats_per_bar: u32, subdivisions: u32) -> Self {
        Self {
            bars,
            beats_per_bar,
            subdivisions,
        }
    }

    /// Panics on overflow; settings reject such grids through [`Grid::checked_total_steps`].
    pub fn total_steps(&self) -> u32 {
        self.bars * self.beats_per_bar * self.subdivisions
    }

    /// Step count, or `None` if it overflows `u32`.
    pub fn checked_total_steps(&self) -> Option<u32> {
        self.bars
            .checked_mul(self.beats_per_bar)?
            .checked_mul(self.subdivisions)
    }

    /// Steps in increasing order.
    pub fn steps(&self) -> std::ops::Range<u32> {
        0..self.total_steps()
    }

    /// Position of `step` inside its beat (0 = on the beat).
    pub fn position(&self, step: u32) -> u32 {
        step % self.subdivisions
    }

    /// Beat index of `step` inside its bar.
    pub fn beat_in_bar(&self, step: u32) -> u32 {
        (step / self.subdivisions) % self.beats_per_bar
    }
}

impl Default for Grid {
    /// 4 bars of 4/4 in sixteenth notes: 64 steps.
    fn default() -> Self {
        Self::new(4, 4, 4)
    }
}

/// A single timed note on one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEvent {
    pub step: u32,
    /// MIDI note number.
    pub note: u8,
    /// MIDI velocity (0–127).
    pub velocity: u8,
    pub sound_id: SoundId,
}

/// Instrument lane. [`Lane::ALL`] is the generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Kick,
    Snare,
    Hat,
    Perc,
}

impl Lane {
    pub const ALL: [Lane; 4] = [Lane::Kick, Lane::Snare, Lane::Hat, Lane::Perc];

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Kick => "kick",
            Lane::Snare => "snare",
            Lane::Hat => "hat",
            Lane::Perc => "perc",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four generated lanes, each ordered by step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patterns {
    pub kick: Vec<PatternEvent>,
    pub snare: Vec<PatternEvent>,
    pub hat: Vec<PatternEvent>,
    pub perc: Vec<PatternEvent>,
}

impl Patterns {
    pub fn lane(&self, lane: Lane) -> &[PatternEvent] {
        match lane {
            Lane::Kick => &self.kick,
            Lane::Snare => &self.snare,
            Lane::Hat => &self.hat,
            Lane::Perc => &self.perc,
        }
    }

    /// `(lane, events)` pairs in generation order.
    pub fn lanes(&self) -> impl Iterator<Item = (Lane, &[PatternEvent])> {
        Lane::ALL.into_iter().map(move |lane| (lane, self.lane(lane)))
    }

    pub fn total_events(&self) -> usize {
        self.lanes().map(|(_, events)| events.len()).sum()
    }

    /// Distinct sound ids referenced by any lane.
    pub fn sound_ids(&self) -> BTreeSet<SoundId> {
        self.lanes()
            .flat_map(|(_, events)| events.iter().map(|e| e.sound_id))
            .collect()
    }
}

/// Generate all four lanes from one stream, in the order kick, snare, hat, perc.
pub fn generate_patterns<R: Rng + ?Sized>(
    grid: &Grid,
    params: SeedParams,
    rng: &mut R,
) -> Patterns {
    let kick = generate_kick(grid, params.density, rng);
    let snare = generate_snare(grid, params.density, rng);
    let hat = generate_hat(grid, params.density, params.complexity, rng);
    let perc = generate_perc(grid, params.complexity, rng);
    Patterns {
        kick,
        snare,
        hat,
        perc,
    }
}

/// Every sound id the four lanes can emit.
pub fn lane_sound_ids() -> BTreeSet<SoundId> {
    [kick::SOUNDS, snare::SOUNDS, hat::SOUNDS, perc::SOUNDS]
        .into_iter()
        .flatten()
        .copied()
        .collect()
}

/// Fail with [`Error::Config`] unless `library` holds every id the lanes emit.
pub fn check_library(library: &SoundLibrary) -> Result<()> {
    let missing: Vec<String> = lane_sound_ids()
        .into_iter()
        .filter(|&id| !library.contains(id))
        .map(|id| id.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "sound library is missing generator sounds: {}",
            missing.join(", ")
        )))
    }
}

/// Uniform choice from a non-empty constant table.
fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}
