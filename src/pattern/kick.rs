//! Kick lane: strong hits on beats 1 and 3, density-driven extras on the
//! other beats.

use rand::Rng;

use super::{pick, Grid, PatternEvent};
use crate::library::SoundId;

pub const KICK_NOTE: u8 = 36;
const STRONG_SOUNDS: [SoundId; 5] = [1, 2, 3, 4, 5];
const SOFT_SOUNDS: [SoundId; 3] = [1, 2, 3];
/// Every id this lane emits.
pub const SOUNDS: &[SoundId] = &STRONG_SOUNDS;

/// Generate the kick lane.
///
/// Every step that is not a strong hit consumes one draw, even off the beat,
/// so the stream position after this lane depends only on the grid.
pub fn generate_kick<R: Rng + ?Sized>(
    grid: &Grid,
    density: f64,
    rng: &mut R,
) -> Vec<PatternEvent> {
    let mut pattern = Vec::new();

    for step in grid.steps() {
        let on_beat = grid.position(step) == 0;
        let beat = grid.beat_in_bar(step);

        if on_beat && (beat == 0 || beat == 2) {
            let velocity = rng.gen_range(90..=127);
            let sound_id = pick(rng, &STRONG_SOUNDS);
            pattern.push(PatternEvent {
                step,
                note: KICK_NOTE,
                velocity,
                sound_id,
            });
        } else if rng.gen::<f64>() < density * 0.3 && on_beat {
            let velocity = rng.gen_range(60..=90);
            let sound_id = pick(rng, &SOFT_SOUNDS);
            pattern.push(PatternEvent {
                step,
                note: KICK_NOTE,
                velocity,
                sound_id,
            });
        }
    }

    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::rng_for;

    #[test]
    fn zero_density_only_strong_hits() {
        let grid = Grid::default();
        let kick = generate_kick(&grid, 0.0, &mut rng_for(1));
        let steps: Vec<u32> = kick.iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![0, 8, 16, 24, 32, 40, 48, 56]);
        for e in &kick {
            assert!((90..=127).contains(&e.velocity));
            assert!(STRONG_SOUNDS.contains(&e.sound_id));
            assert_eq!(e.note, KICK_NOTE);
        }
    }

    #[test]
    fn extras_only_on_beats() {
        let grid = Grid::default();
        let kick = generate_kick(&grid, 0.99, &mut rng_for(2));
        for e in &kick {
            assert_eq!(grid.position(e.step), 0);
            let beat = grid.beat_in_bar(e.step);
            if beat == 1 || beat == 3 {
                assert!((60..=90).contains(&e.velocity));
                assert!(SOFT_SOUNDS.contains(&e.sound_id));
            }
        }
    }
}
