//! Export integration tests: timeline playback, failures, and cancellation.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use seedbeat::compat::CompatibilityScorer;
use seedbeat::composition::{Composer, Composition, Origin};
use seedbeat::export::{step_duration, timeline, ExportHandle, ExportOptions, Exporter, NotePlayer};
use seedbeat::pattern::Grid;
use seedbeat::pattern::kick::KICK_NOTE;
use seedbeat::{Error, Result};

fn offline() -> ExportOptions {
    ExportOptions {
        note_duration: Duration::ZERO,
        realtime: false,
    }
}

fn bar_sixteen() -> Arc<Composition> {
    Arc::new(Composer::default().compose(16_000, Origin::BarNumber(16)))
}

/// Records notes into a shared buffer.
#[derive(Clone, Default)]
struct Recorder {
    notes: Arc<Mutex<Vec<u8>>>,
}

impl NotePlayer for Recorder {
    fn play(&mut self, note: u8, _velocity: u8, _duration: Duration) -> Result<()> {
        self.notes.lock().unwrap().push(note);
        Ok(())
    }
}

/// Fails every kick.
struct KickHater;

impl NotePlayer for KickHater {
    fn play(&mut self, note: u8, _velocity: u8, _duration: Duration) -> Result<()> {
        if note == KICK_NOTE {
            Err(Error::Midi("device unplugged".into()))
        } else {
            Ok(())
        }
    }
}

#[test]
fn plays_timeline_in_order() {
    let composition = bar_sixteen();
    let recorder = Recorder::default();
    let mut player = recorder.clone();

    let report = Exporter::new(offline()).run(&composition, &mut player);
    assert_eq!(report.total, 32);
    assert_eq!(report.played, 32);
    assert_eq!(report.failed, 0);

    let expected: Vec<u8> = timeline(&composition).iter().map(|(_, e)| e.note).collect();
    assert_eq!(*recorder.notes.lock().unwrap(), expected);
}

#[test]
fn realtime_export_waits_between_steps() {
    // One bar of two beats in eighths at 600 bpm: 50 ms per step, last event on step 2.
    let composer = Composer::new(Grid::new(1, 2, 2), 600, CompatibilityScorer::default());
    let composition = composer.compose(16_000, Origin::BarNumber(16));
    let last_step = timeline(&composition).last().unwrap().1.step;
    assert_eq!(last_step, 2);

    let options = ExportOptions {
        note_duration: Duration::ZERO,
        realtime: true,
    };
    let started = Instant::now();
    let report = Exporter::new(options).run(&composition, &mut Recorder::default());
    let elapsed = started.elapsed();

    assert_eq!(report.played, report.total);
    assert!(elapsed >= step_duration(600, 2) * last_step, "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "{elapsed:?}");
}

#[test]
fn failed_notes_are_counted_not_fatal() {
    let composition = bar_sixteen();
    let report = Exporter::new(offline()).run(&composition, &mut KickHater);
    assert_eq!(report.failed, composition.patterns.kick.len());
    assert_eq!(report.played, report.total - report.failed);
    assert!(!report.cancelled);
}

#[test]
fn works_through_boxed_player() {
    let composition = bar_sixteen();
    let mut player: Box<dyn NotePlayer> = Box::new(Recorder::default());
    let report = Exporter::new(offline()).run(&composition, &mut player);
    assert_eq!(report.played, 32);
}

#[test]
fn background_export_joins_with_report() {
    let recorder = Recorder::default();
    let player = recorder.clone();
    let handle = ExportHandle::spawn(bar_sixteen(), offline(), move || Ok(player));

    let report = handle.join().unwrap();
    assert_eq!(report.played, 32);
    assert_eq!(recorder.notes.lock().unwrap().len(), 32);
}

#[test]
fn background_export_reports_connect_failure() {
    let handle = ExportHandle::spawn(bar_sixteen(), offline(), || {
        Err::<Recorder, _>(Error::NoOutputPorts)
    });
    assert!(matches!(handle.join(), Err(Error::NoOutputPorts)));
}

/// Signals each note, then holds it long enough for the test to cancel.
struct SlowPlayer {
    played: mpsc::Sender<u8>,
}

impl NotePlayer for SlowPlayer {
    fn play(&mut self, note: u8, _velocity: u8, _duration: Duration) -> Result<()> {
        let _ = self.played.send(note);
        thread::sleep(Duration::from_millis(20));
        Ok(())
    }
}

#[test]
fn cancel_stops_background_export() {
    let (tx, rx) = mpsc::channel();
    let handle = ExportHandle::spawn(bar_sixteen(), offline(), move || {
        Ok(SlowPlayer { played: tx })
    });

    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    handle.cancel();
    let report = handle.join().unwrap();

    assert!(report.cancelled);
    assert!(report.played < report.total);
}
