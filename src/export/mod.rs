//! Export: plays a finished composition through a note player.
//!
//! The exporter only reads the [`Composition`]: it merges the four lanes into
//! one step-ordered timeline, waits one step duration per grid step between
//! events, and sends each event to a [`NotePlayer`]. A failed note is logged
//! and counted but does not stop the run. Cancellation is a shared flag that
//! is checked before every event.

pub mod midi;
pub mod pads;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::composition::Composition;
use crate::error::{Error, Result};
use crate::pattern::{Lane, PatternEvent};

pub use midi::MidiNotePlayer;
pub use pads::pad_to_note;

/// Something that can sound a single note.
pub trait NotePlayer {
    /// Send note-on, hold for `duration`, then note-off.
    fn play(&mut self, note: u8, velocity: u8, duration: Duration) -> Result<()>;
}

impl<P: NotePlayer + ?Sized> NotePlayer for Box<P> {
    fn play(&mut self, note: u8, velocity: u8, duration: Duration) -> Result<()> {
        (**self).play(note, velocity, duration)
    }
}

/// How an export run is paced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// How long each note is held.
    pub note_duration: Duration,
    /// Sleep between events according to tempo. Disable for offline runs.
    pub realtime: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            note_duration: Duration::from_millis(100),
            realtime: true,
        }
    }
}

/// Outcome of an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Events in the timeline.
    pub total: usize,
    pub played: usize,
    pub failed: usize,
    /// The run stopped early because the cancel flag was set.
    pub cancelled: bool,
}

/// Duration of one grid step: `(60 / bpm) / subdivisions` seconds.
pub fn step_duration(bpm: u32, subdivisions: u32) -> Duration {
    Duration::from_secs_f64(60.0 / f64::from(bpm.max(1)) / f64::from(subdivisions.max(1)))
}

/// All events of a composition merged into one timeline, ordered by step.
/// Events on the same step keep lane order (kick, snare, hat, perc).
pub fn timeline(composition: &Composition) -> Vec<(Lane, PatternEvent)> {
    let mut events: Vec<(Lane, PatternEvent)> = composition
        .patterns
        .lanes()
        .flat_map(|(lane, events)| events.iter().map(move |e| (lane, *e)))
        .collect();
    events.sort_by_key(|(_, e)| e.step);
    events
}

/// Walks a composition's timeline and sends it to a player.
#[derive(Debug, Clone)]
pub struct Exporter {
    options: ExportOptions,
    cancel: Arc<AtomicBool>,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use an externally owned cancel flag (e.g. one set by a Ctrl-C handler).
    pub fn with_cancel_flag(options: ExportOptions, cancel: Arc<AtomicBool>) -> Self {
        Self { options, cancel }
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Play every event in step order.
    pub fn run<P: NotePlayer + ?Sized>(
        &self,
        composition: &Composition,
        player: &mut P,
    ) -> ExportReport {
        let events = timeline(composition);
        let step = step_duration(composition.metadata.bpm, composition.grid().subdivisions);
        let mut report = ExportReport {
            total: events.len(),
            ..ExportReport::default()
        };

        tracing::info!(
            events = events.len(),
            bpm = composition.metadata.bpm,
            "exporting composition"
        );

        let mut current_step = 0;
        for (lane, event) in &events {
            if self.cancel.load(Ordering::Relaxed) {
                tracing::info!(played = report.played, "export cancelled");
                report.cancelled = true;
                return report;
            }

            let gap = event.step.saturating_sub(current_step);
            if self.options.realtime && gap > 0 {
                thread::sleep(step * gap);
            }

            match player.play(event.note, event.velocity.min(127), self.options.note_duration) {
                Ok(()) => report.played += 1,
                Err(e) => {
                    tracing::warn!(
                        %lane,
                        step = event.step,
                        note = event.note,
                        error = %e,
                        "note failed"
                    );
                    report.failed += 1;
                }
            }
            current_step = event.step;
        }

        tracing::info!(
            played = report.played,
            failed = report.failed,
            "export complete"
        );
        report
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

/// An export running on a background thread.
pub struct ExportHandle {
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<Result<ExportReport>>>,
}

impl ExportHandle {
    /// Start exporting `composition` on a new thread.
    ///
    /// `connect` runs on that thread and opens the player, so players that
    /// cannot cross threads (MIDI connections) still work.
    pub fn spawn<P, F>(composition: Arc<Composition>, options: ExportOptions, connect: F) -> Self
    where
        P: NotePlayer,
        F: FnOnce() -> Result<P> + Send + 'static,
    {
        let exporter = Exporter::new(options);
        let cancel = exporter.cancel_flag();
        let thread = thread::spawn(move || -> Result<ExportReport> {
            let mut player = connect()?;
            Ok(exporter.run(&composition, &mut player))
        });
        Self {
            cancel,
            thread: Some(thread),
        }
    }

    /// Ask the export to stop before its next event.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Whether the background thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the export to end.
    pub fn join(mut self) -> Result<ExportReport> {
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| Error::Io(std::io::Error::other("export thread panicked")))?,
            None => Ok(ExportReport::default()),
        }
    }
}

impl Drop for ExportHandle {
    fn drop(&mut self) {
        self.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
