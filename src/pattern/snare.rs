//! Snare lane: backbeat on beats 2 and 4, ghost notes on the third sixteenth.

use rand::Rng;

use super::{pick, Grid, PatternEvent};
use crate::library::SoundId;

pub const SNARE_NOTE: u8 = 38;
const STRONG_SOUNDS: [SoundId; 3] = [100, 101, 102];
const GHOST_SOUND: SoundId = 100;
pub const SOUNDS: &[SoundId] = &STRONG_SOUNDS;
/// Position inside the beat where ghost notes land.
const GHOST_POSITION: u32 = 2;

pub fn generate_snare<R: Rng + ?Sized>(
    grid: &Grid,
    density: f64,
    rng: &mut R,
) -> Vec<PatternEvent> {
    let mut pattern = Vec::new();

    for step in grid.steps() {
        let position = grid.position(step);
        let beat = grid.beat_in_bar(step);

        if position == 0 && (beat == 1 || beat == 3) {
            let velocity = rng.gen_range(85..=120);
            let sound_id = pick(rng, &STRONG_SOUNDS);
            pattern.push(PatternEvent {
                step,
                note: SNARE_NOTE,
                velocity,
                sound_id,
            });
        } else if rng.gen::<f64>() < density * 0.4 && position == GHOST_POSITION {
            pattern.push(PatternEvent {
                step,
                note: SNARE_NOTE,
                velocity: rng.gen_range(40..=70),
                sound_id: GHOST_SOUND,
            });
        }
    }

    pattern
}
