//! Error types for library lookups, configuration, and note export.
//!
//! Composition generation and scoring never fail; only the edges that touch
//! user input, files, or MIDI hardware return [`Error`].

use std::io;

/// Errors surfaced by seedbeat.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Sound not found: {0}")]
    SoundNotFound(String),

    #[error("Invalid pad reference: {0}")]
    InvalidPad(String),

    #[error("MIDI error: {0}")]
    Midi(String),

    #[error("no MIDI output ports available")]
    NoOutputPorts,

    #[error("MIDI device matching '{0}' not found")]
    DeviceNotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_not_found_message() {
        let e = Error::CategoryNotFound("Drums".into());
        assert_eq!(e.to_string(), "Category not found: Drums");
    }

    #[test]
    fn yaml_error_becomes_config() {
        let err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        assert!(matches!(Error::from(err), Error::Config(_)));
    }

    #[test]
    fn io_error_is_transparent() {
        let e = Error::from(io::Error::other("disk gone"));
        assert_eq!(e.to_string(), "disk gone");
    }
}
