//! Hi-hat lane: a complexity-selected grid of closed/open hits plus
//! density-driven accents between them.

use rand::Rng;

use super::{pick, Grid, PatternEvent};
use crate::library::SoundId;

pub const CLOSED_HAT_NOTE: u8 = 42;
pub const OPEN_HAT_NOTE: u8 = 46;
const CLOSED_SOUNDS: [SoundId; 2] = [200, 201];
const OPEN_SOUND: SoundId = 218;
pub const SOUNDS: &[SoundId] = &[CLOSED_SOUNDS[0], CLOSED_SOUNDS[1], OPEN_SOUND];
const OPEN_CHANCE: f64 = 0.2;

/// Steps between primary hat hits: quarter notes below 0.33 complexity,
/// eighths below 0.66, otherwise every step.
pub fn hat_interval(grid: &Grid, complexity: f64) -> u32 {
    if complexity < 0.33 {
        grid.subdivisions
    } else if complexity < 0.66 {
        (grid.subdivisions / 2).max(1)
    } else {
        1
    }
}

pub fn generate_hat<R: Rng + ?Sized>(
    grid: &Grid,
    density: f64,
    complexity: f64,
    rng: &mut R,
) -> Vec<PatternEvent> {
    let interval = hat_interval(grid, complexity);
    let mut pattern = Vec::new();

    for step in grid.steps() {
        if step % interval == 0 {
            let is_open = rng.gen::<f64>() < OPEN_CHANCE;
            let event = if is_open {
                PatternEvent {
                    step,
                    note: OPEN_HAT_NOTE,
                    velocity: rng.gen_range(80..=110),
                    sound_id: OPEN_SOUND,
                }
            } else {
                let velocity = rng.gen_range(70..=100);
                PatternEvent {
                    step,
                    note: CLOSED_HAT_NOTE,
                    velocity,
                    sound_id: pick(rng, &CLOSED_SOUNDS),
                }
            };
            pattern.push(event);
        } else if rng.gen::<f64>() < density * 0.3 {
            let velocity = rng.gen_range(50..=80);
            pattern.push(PatternEvent {
                step,
                note: CLOSED_HAT_NOTE,
                velocity,
                sound_id: pick(rng, &CLOSED_SOUNDS),
            });
        }
    }

    pattern
}
