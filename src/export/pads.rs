//! Pad addressing for 12-pad groups (`A.`, `A0`, `A1`..`A9`, groups A-D).

use crate::error::{Error, Result};

/// Group letter and the MIDI note of its first pad.
const GROUP_BASES: [(char, u8); 4] = [('A', 36), ('B', 48), ('C', 60), ('D', 72)];

/// MIDI note for a pad reference such as `"A1"` or `"c."`.
///
/// `.` is the group's base note, `0` is base + 1, and the numbered pads
/// `1`..`9` start at base + 3 in rows of three.
pub fn pad_to_note(pad: &str) -> Result<u8> {
    let invalid = || Error::InvalidPad(pad.to_string());

    let mut chars = pad.chars();
    let group = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let base = GROUP_BASES
        .iter()
        .find(|(g, _)| *g == group)
        .map(|(_, base)| *base)
        .ok_or_else(invalid)?;

    match chars.as_str() {
        "." => Ok(base),
        "0" => Ok(base + 1),
        rest => {
            let n: u8 = rest.parse().map_err(|_| invalid())?;
            if !(1..=9).contains(&n) {
                return Err(invalid());
            }
            Ok(base + 3 + ((n - 1) / 3) * 3 + (n - 1) % 3)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_a_layout() {
        assert_eq!(pad_to_note("A.").unwrap(), 36);
        assert_eq!(pad_to_note("A0").unwrap(), 37);
        assert_eq!(pad_to_note("A1").unwrap(), 39);
        assert_eq!(pad_to_note("A3").unwrap(), 41);
        assert_eq!(pad_to_note("A4").unwrap(), 42);
        assert_eq!(pad_to_note("A9").unwrap(), 47);
    }

    #[test]
    fn group_bases() {
        assert_eq!(pad_to_note("B.").unwrap(), 48);
        assert_eq!(pad_to_note("c.").unwrap(), 60);
        assert_eq!(pad_to_note("D5").unwrap(), 79);
    }

    #[test]
    fn rejects_bad_pads() {
        for pad in ["", "E1", "A", "A10", "Ax", "1A"] {
            assert!(
                matches!(pad_to_note(pad), Err(Error::InvalidPad(_))),
                "{pad:?} should be invalid"
            );
        }
    }
}
