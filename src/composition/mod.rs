//! Composition assembly: seed → lanes → compatibility → one immutable record.
//!
//! [`Composer`] is the pure pipeline: it owns no random state and builds a
//! fresh PRNG per call, so independent composers (or threads sharing one)
//! produce the same output for the same seed. [`Generator`] wraps a composer
//! and remembers the last composition it produced.

mod summary;

use std::sync::Arc;

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::compat::{CompatibilityReport, CompatibilityScorer};
use crate::config::Settings;
use crate::pattern::{generate_patterns, Grid, Patterns};
use crate::seed::{rng_for, seed_from_bar, seed_from_clock, SeedParams};

/// What the seed was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Clock,
    Bar,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Clock => "clock",
            Mode::Bar => "bar",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The clock reading or bar index a seed came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Local time formatted `HH:MM:SS`.
    Time(String),
    BarNumber(u32),
}

impl Origin {
    pub fn mode(&self) -> Mode {
        match self {
            Origin::Time(_) => Mode::Clock,
            Origin::BarNumber(_) => Mode::Bar,
        }
    }
}

/// Parameters a composition was generated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub seed: u64,
    pub mode: Mode,
    pub bpm: u32,
    pub bars: u32,
    pub density: f64,
    pub complexity: f64,
    pub time_or_bar: Origin,
    pub generated_at: DateTime<Local>,
}

/// A generated composition: metadata, four lanes, and their compatibility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub metadata: Metadata,
    pub patterns: Patterns,
    pub compatibility: CompatibilityReport,
    #[serde(skip)]
    grid: Grid,
}

impl Composition {
    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Grid the lanes were generated on.
    pub fn grid(&self) -> Grid {
        self.grid
    }
}

/// Stateless generation pipeline.
#[derive(Debug, Clone)]
pub struct Composer {
    grid: Grid,
    bpm: u32,
    scorer: CompatibilityScorer,
}

impl Composer {
    pub fn new(grid: Grid, bpm: u32, scorer: CompatibilityScorer) -> Self {
        Self { grid, bpm, scorer }
    }

    /// Composer using the grid and tempo from `settings` and the given scorer.
    pub fn from_settings(settings: &Settings, scorer: CompatibilityScorer) -> Self {
        Self::new(
            Grid::new(settings.bars, settings.beats_per_bar, settings.subdivisions),
            settings.bpm,
            scorer,
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    /// Generate a composition for `seed`.
    ///
    /// Reseeds, derives density and complexity, runs the four lanes in
    /// order, then scores the distinct sounds they use.
    pub fn compose(&self, seed: u64, origin: Origin) -> Composition {
        let mut rng = rng_for(seed);
        let params = SeedParams::from_seed(seed);
        let mode = origin.mode();

        tracing::info!(
            seed,
            %mode,
            density = params.density,
            complexity = params.complexity,
            "generating composition"
        );

        let patterns = generate_patterns(&self.grid, params, &mut rng);
        let compatibility = self.scorer.analyze(patterns.sound_ids());

        tracing::debug!(
            kick = patterns.kick.len(),
            snare = patterns.snare.len(),
            hat = patterns.hat.len(),
            perc = patterns.perc.len(),
            rating = %compatibility.rating,
            "composition assembled"
        );

        Composition {
            metadata: Metadata {
                seed,
                mode,
                bpm: self.bpm,
                bars: self.grid.bars,
                density: params.density,
                complexity: params.complexity,
                time_or_bar: origin,
                generated_at: Local::now(),
            },
            patterns,
            compatibility,
            grid: self.grid,
        }
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), CompatibilityScorer::default())
    }
}

/// Generation front end that keeps the most recent composition.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    composer: Composer,
    current: Option<Arc<Composition>>,
}

impl Generator {
    pub fn new(composer: Composer) -> Self {
        Self {
            composer,
            current: None,
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Generate from an explicit seed and replace the current composition.
    pub fn generate(&mut self, seed: u64, origin: Origin) -> Arc<Composition> {
        let composition = Arc::new(self.composer.compose(seed, origin));
        self.current = Some(Arc::clone(&composition));
        composition
    }

    /// Generate from a local clock reading.
    pub fn generate_from_clock<T: Timelike>(&mut self, now: &T) -> Arc<Composition> {
        let seed = seed_from_clock(now);
        let time = format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());
        self.generate(seed, Origin::Time(time))
    }

    /// Generate from the current local time.
    pub fn generate_now(&mut self) -> Arc<Composition> {
        self.generate_from_clock(&Local::now())
    }

    /// Generate from a bar index.
    pub fn generate_from_bar(&mut self, bar: u32) -> Arc<Composition> {
        self.generate(seed_from_bar(bar), Origin::BarNumber(bar))
    }

    /// The most recently generated composition, if any.
    pub fn current(&self) -> Option<Arc<Composition>> {
        self.current.clone()
    }
}
