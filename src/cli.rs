//! Command-line argument definitions for the seedbeat binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Seedbeat - seed-driven drum patterns with sound compatibility scoring
#[derive(Parser)]
#[command(name = "seedbeat")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Settings file (default: ~/.seedbeat/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Tempo override
    #[arg(long, global = true)]
    pub bpm: Option<u32>,

    /// Bars per composition override
    #[arg(long, global = true)]
    pub bars: Option<u32>,

    /// MIDI output device (substring match)
    #[arg(long, global = true)]
    pub device: Option<String>,

    /// Sound library YAML replacing the factory library
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a composition seeded by the current local time
    Clock,

    /// Generate a composition seeded by a bar number
    Bar {
        /// Bar index
        number: u32,
    },

    /// Score how well a set of sounds work together
    Analyze {
        /// Sound ids or names (e.g. 2 "NT SNARE" 200)
        #[arg(required = true)]
        sounds: Vec<String>,
    },

    /// List the curated kits, or show one by name
    Kits {
        /// Kit name, e.g. "Natural Kit"
        name: Option<String>,
    },

    /// List sound categories, or the sounds in one category
    Sounds {
        /// Category display name, e.g. "Kicks"
        category: Option<String>,
    },

    /// Search sound names
    Search {
        /// Case-insensitive substring
        query: String,
    },

    /// List MIDI output devices
    Devices,

    /// Generate a composition and play it on the MIDI output
    Export {
        #[command(subcommand)]
        source: Source,
    },

    /// Play a single note by MIDI number or pad name (e.g. 36, A1, B.)
    Note {
        note: String,

        /// Note velocity
        #[arg(long, default_value_t = 100)]
        velocity: u8,
    },

    /// Menu-driven session (default when no command is given)
    Interactive,
}

#[derive(Subcommand, Clone, Copy)]
pub(crate) enum Source {
    /// Seed from the current local time
    Clock,
    /// Seed from a bar number
    Bar { number: u32 },
}
