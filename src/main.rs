//! Seedbeat: generate drum patterns from the clock or a bar number, score
//! their sounds, and play them on a MIDI device.

mod cli;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use seedbeat::compat::{CompatibilityReport, CompatibilityScorer, SoundKit};
use seedbeat::composition::{Composer, Composition, Generator};
use seedbeat::config::Settings;
use seedbeat::export::{
    pad_to_note, ExportHandle, ExportOptions, ExportReport, Exporter, MidiNotePlayer, NotePlayer,
};
use seedbeat::library::{SoundEntry, SoundLibrary};
use seedbeat::pattern::check_library;
use seedbeat::{Error, Result};

use cli::{Cli, Commands, Source};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    let (library, scorer) = match &settings.library_path {
        Some(path) => {
            let library = SoundLibrary::load(path)?;
            check_library(&library)?;
            let scorer = CompatibilityScorer::for_library(&library);
            (library, scorer)
        }
        None => (SoundLibrary::default(), CompatibilityScorer::default()),
    };
    let composer = Composer::from_settings(&settings, scorer);

    let mut app = App {
        settings,
        library,
        generator: Generator::new(composer),
        json: cli.json,
    };

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Clock => {
            let composition = app.generator.generate_now();
            app.show(&composition)
        }
        Commands::Bar { number } => {
            let composition = app.generator.generate_from_bar(number);
            app.show(&composition)
        }
        Commands::Analyze { sounds } => {
            let ids = sounds
                .iter()
                .map(|s| app.library.resolve(s))
                .collect::<Result<Vec<_>>>()?;
            let report = app.generator.composer().scorer().analyze(ids);
            app.show_report(&report)
        }
        Commands::Kits { name } => app.kits(name.as_deref()),
        Commands::Sounds { category } => app.sounds(category.as_deref()),
        Commands::Search { query } => {
            let found = app.library.search(&query);
            app.show_entries(&found)
        }
        Commands::Devices => {
            let devices = MidiNotePlayer::list_devices();
            if devices.is_empty() {
                println!("No MIDI output devices found.");
            }
            for (i, name) in devices.iter().enumerate() {
                println!("  {i}: {name}");
            }
            Ok(())
        }
        Commands::Export { source } => app.export(source),
        Commands::Note { note, velocity } => app.note(&note, velocity),
        Commands::Interactive => app.interactive(),
    }
}

/// Settings file plus command-line overrides.
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(bpm) = cli.bpm {
        settings.bpm = bpm;
    }
    if let Some(bars) = cli.bars {
        settings.bars = bars;
    }
    if let Some(device) = &cli.device {
        settings.device_name = Some(device.clone());
    }
    if let Some(library) = &cli.library {
        settings.library_path = Some(library.clone());
    }
    settings.validate()?;
    Ok(settings)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{text}");
    Ok(())
}

/// A MIDI note number (0-127) or a pad name such as `A1`.
fn parse_note(input: &str) -> Result<u8> {
    match input.parse::<u8>() {
        Ok(note) if note <= 127 => Ok(note),
        Ok(_) => Err(Error::InvalidPad(input.to_string())),
        Err(_) => pad_to_note(input),
    }
}

fn print_export_report(report: &ExportReport) {
    let stopped = if report.cancelled { " (stopped)" } else { "" };
    println!(
        "Export: {}/{} notes played, {} failed{stopped}",
        report.played, report.total, report.failed
    );
}

fn finish_export(handle: ExportHandle) {
    match handle.join() {
        Ok(report) => print_export_report(&report),
        Err(e) => eprintln!("export failed: {e}"),
    }
}

struct App {
    settings: Settings,
    library: SoundLibrary,
    generator: Generator,
    json: bool,
}

impl App {
    fn show(&self, composition: &Composition) -> Result<()> {
        if self.json {
            print_json(composition)
        } else {
            println!("{composition}");
            Ok(())
        }
    }

    fn show_report(&self, report: &CompatibilityReport) -> Result<()> {
        if self.json {
            return print_json(report);
        }
        println!(
            "Rating:  {} ({:.0}%)",
            report.rating,
            report.overall_score * 100.0
        );
        println!("Verdict: {}", report.verdict);
        println!(
            "Family:  {:.2}  {}",
            report.family_analysis.score, report.family_analysis.reason
        );
        println!(
            "Balance: {:.2}  {}",
            report.balance_analysis.score, report.balance_analysis.reason
        );
        println!(
            "Timbre:  {:.2}  {}",
            report.timbre_analysis.score, report.timbre_analysis.reason
        );
        if let Some(kit) = &report.matching_kit {
            println!("Kit:     {kit}");
        }
        println!("Sounds ({}):", report.sound_count);
        for sound in &report.sounds_used {
            println!("  {:>4}  {}", sound.id, sound.summary);
        }
        Ok(())
    }

    fn show_entries(&self, entries: &[SoundEntry]) -> Result<()> {
        if self.json {
            return print_json(entries);
        }
        if entries.is_empty() {
            println!("No sounds found.");
        }
        for entry in entries {
            println!("  {:>4}  {:<16} [{}]", entry.id, entry.name, entry.category);
        }
        Ok(())
    }

    fn kits(&self, name: Option<&str>) -> Result<()> {
        let scorer = self.generator.composer().scorer();
        let kits: Vec<&SoundKit> = match name {
            Some(name) => match scorer.recommended_kit(name) {
                Some(kit) => vec![kit],
                None => {
                    println!("No kit named '{name}'.");
                    return Ok(());
                }
            },
            None => scorer.kits().iter().collect(),
        };
        if self.json {
            return print_json(&kits);
        }
        for kit in kits {
            println!("{} ({} family, {} timbre)", kit.name, kit.family, kit.timbre);
            println!("  {}", kit.description);
            let ids: Vec<String> = kit.sound_ids().map(|id| id.to_string()).collect();
            println!("  sounds: {}", ids.join(", "));
        }
        Ok(())
    }

    fn sounds(&self, category: Option<&str>) -> Result<()> {
        match category {
            Some(category) => {
                let entries = self.library.sounds_in(category)?;
                self.show_entries(&entries)
            }
            None if self.json => print_json(&self.library),
            None => {
                for category in self.library.categories() {
                    let count = self.library.sounds_in_category(category).len();
                    println!("  {category:<18} {count} sounds");
                }
                Ok(())
            }
        }
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            note_duration: Duration::from_millis(self.settings.note_duration_ms),
            realtime: true,
        }
    }

    fn generate(&mut self, source: Source) -> Arc<Composition> {
        match source {
            Source::Clock => self.generator.generate_now(),
            Source::Bar { number } => self.generator.generate_from_bar(number),
        }
    }

    /// Generate, then play in the foreground until done or Ctrl-C.
    fn export(&mut self, source: Source) -> Result<()> {
        let composition = self.generate(source);
        self.show(&composition)?;

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .map_err(|e| io::Error::other(e.to_string()))?;

        let mut player =
            MidiNotePlayer::connect(self.settings.device_name.as_deref(), self.settings.channel)?;
        eprintln!("Exporting to {} (Ctrl-C to stop)", player.port_name());

        let report =
            Exporter::with_cancel_flag(self.export_options(), cancel).run(&composition, &mut player);
        print_export_report(&report);
        Ok(())
    }

    fn note(&self, input: &str, velocity: u8) -> Result<()> {
        let note = parse_note(input)?;
        let mut player =
            MidiNotePlayer::connect(self.settings.device_name.as_deref(), self.settings.channel)?;
        player.play(
            note,
            velocity.min(127),
            Duration::from_millis(self.settings.note_duration_ms),
        )?;
        println!("Played note {note} on {}", player.port_name());
        Ok(())
    }

    /// Start a background export, stopping any export already running.
    fn start_export(&self, slot: &mut Option<ExportHandle>, composition: Arc<Composition>) {
        if let Some(previous) = slot.take() {
            previous.cancel();
            finish_export(previous);
        }
        let device = self.settings.device_name.clone();
        let channel = self.settings.channel;
        *slot = Some(ExportHandle::spawn(
            composition,
            self.export_options(),
            move || MidiNotePlayer::connect(device.as_deref(), channel),
        ));
        println!("Export started in background (s to stop).");
    }

    fn interactive(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let mut export: Option<ExportHandle> = None;

        print_menu();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match line.trim().to_lowercase().as_str() {
                "1" => {
                    let composition = self.generator.generate_now();
                    self.show(&composition)?;
                }
                "2" => {
                    if let Some(bar) = read_bar(&mut lines)? {
                        let composition = self.generator.generate_from_bar(bar);
                        self.show(&composition)?;
                    }
                }
                "3" => match self.generator.current() {
                    Some(composition) => self.start_export(&mut export, composition),
                    None => println!("Generate a composition first."),
                },
                "4" => {
                    let composition = self.generator.generate_now();
                    self.show(&composition)?;
                    self.start_export(&mut export, composition);
                }
                "5" => {
                    if let Some(bar) = read_bar(&mut lines)? {
                        let composition = self.generator.generate_from_bar(bar);
                        self.show(&composition)?;
                        self.start_export(&mut export, composition);
                    }
                }
                "s" => match export.take() {
                    Some(handle) => {
                        handle.cancel();
                        finish_export(handle);
                    }
                    None => println!("No export running."),
                },
                "q" => break,
                "" => {}
                _ => print_menu(),
            }

            if export.as_ref().is_some_and(ExportHandle::is_finished) {
                if let Some(handle) = export.take() {
                    finish_export(handle);
                }
            }
        }

        if let Some(handle) = export.take() {
            handle.cancel();
            finish_export(handle);
        }
        Ok(())
    }
}

fn print_menu() {
    println!();
    println!("  1  Generate from clock");
    println!("  2  Generate from bar number");
    println!("  3  Export current composition");
    println!("  4  Generate from clock and export");
    println!("  5  Generate from bar and export");
    println!("  s  Stop export");
    println!("  q  Quit");
}

fn read_bar<B: BufRead>(lines: &mut io::Lines<B>) -> Result<Option<u32>> {
    print!("Bar number: ");
    io::stdout().flush()?;
    let Some(line) = lines.next() else {
        return Ok(None);
    };
    match line?.trim().parse() {
        Ok(bar) => Ok(Some(bar)),
        Err(_) => {
            println!("Not a bar number.");
            Ok(None)
        }
    }
}
