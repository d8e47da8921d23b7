//! Percussion lane: sparse auxiliary hits, silent for simple patterns.

use rand::Rng;

use super::{pick, Grid, PatternEvent};
use crate::library::SoundId;

pub const PERC_NOTES: [u8; 3] = [39, 54, 56];
const PERC_SOUNDS: [SoundId; 3] = [300, 301, 302];
pub const SOUNDS: &[SoundId] = &PERC_SOUNDS;
/// Below this complexity the lane stays empty and draws nothing.
pub const MIN_COMPLEXITY: f64 = 0.3;

pub fn generate_perc<R: Rng + ?Sized>(
    grid: &Grid,
    complexity: f64,
    rng: &mut R,
) -> Vec<PatternEvent> {
    if complexity < MIN_COMPLEXITY {
        return Vec::new();
    }

    let mut pattern = Vec::new();
    for step in grid.steps() {
        if rng.gen::<f64>() < complexity * 0.15 {
            let velocity = rng.gen_range(60..=100);
            let note = pick(rng, &PERC_NOTES);
            let sound_id = pick(rng, &PERC_SOUNDS);
            pattern.push(PatternEvent {
                step,
                note,
                velocity,
                sound_id,
            });
        }
    }

    pattern
}
