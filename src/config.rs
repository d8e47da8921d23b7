//! Settings: tempo, grid shape, and MIDI output loaded from ~/.seedbeat/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pattern::{Grid, MAX_STEPS};

/// User settings. Every field has a default so partial files are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tempo used for export pacing and recorded in composition metadata.
    pub bpm: u32,
    /// Number of bars in a generated composition.
    pub bars: u32,
    pub beats_per_bar: u32,
    /// Steps per beat (4 = sixteenth notes).
    pub subdivisions: u32,
    /// How long each exported note is held before note-off.
    pub note_duration_ms: u64,
    /// Preferred MIDI output device (substring match). None = first available.
    pub device_name: Option<String>,
    /// MIDI channel (0-15) used for export.
    pub channel: u8,
    /// Optional YAML sound library replacing the factory library.
    pub library_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bpm: 120,
            bars: 4,
            beats_per_bar: 4,
            subdivisions: 4,
            note_duration_ms: 100,
            device_name: None,
            channel: 0,
            library_path: None,
        }
    }
}

/// Default path for the settings file.
pub fn default_settings_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".seedbeat");
    path.push("config.yaml");
    path
}

impl Settings {
    /// Load settings from the standard path, falling back to defaults when
    /// the file is missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_settings_path())
    }

    /// Load settings from `path`. A missing file yields defaults; a file that
    /// exists but does not parse is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would produce an empty grid or a bad MIDI channel.
    pub fn validate(&self) -> Result<()> {
        use crate::error::Error;

        if self.bpm == 0 {
            return Err(Error::Config("bpm must be positive".into()));
        }
        if self.bars == 0 || self.beats_per_bar == 0 || self.subdivisions == 0 {
            return Err(Error::Config(
                "bars, beats_per_bar and subdivisions must be positive".into(),
            ));
        }
        let grid = Grid::new(self.bars, self.beats_per_bar, self.subdivisions);
        match grid.checked_total_steps() {
            Some(steps) if steps <= MAX_STEPS => {}
            _ => {
                return Err(Error::Config(format!(
                    "grid of {} bars x {} beats x {} subdivisions exceeds {MAX_STEPS} steps",
                    self.bars, self.beats_per_bar, self.subdivisions
                )));
            }
        }
        if self.channel > 15 {
            return Err(Error::Config(format!(
                "channel {} out of range 0-15",
                self.channel
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_match_factory_grid() {
        let s = Settings::default();
        assert_eq!(s.bpm, 120);
        assert_eq!((s.bars, s.beats_per_bar, s.subdivisions), (4, 4, 4));
        assert_eq!(s.note_duration_ms, 100);
        assert!(s.device_name.is_none());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "bpm: 96\ndevice_name: \"EP-133\"\n").unwrap();

        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.bpm, 96);
        assert_eq!(s.device_name.as_deref(), Some("EP-133"));
        assert_eq!(s.bars, 4);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "bpm: [fast\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn zero_subdivisions_rejected() {
        let s = Settings {
            subdivisions: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn overflowing_grid_rejected() {
        let s = Settings {
            bars: u32::MAX / 8,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(Error::Config(_))));

        let s = Settings {
            bars: 536_870_911,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn grid_at_step_limit_accepted() {
        let s = Settings {
            bars: MAX_STEPS / 16,
            ..Settings::default()
        };
        assert!(s.validate().is_ok());

        let s = Settings {
            bars: MAX_STEPS / 16 + 1,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn channel_out_of_range_rejected() {
        let s = Settings {
            channel: 16,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }
}
