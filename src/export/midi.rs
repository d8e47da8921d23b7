//! MIDI output: sends exported notes to a hardware or virtual device.

use std::thread;
use std::time::Duration;

use midir::{MidiOutput, MidiOutputConnection};

use super::NotePlayer;
use crate::error::{Error, Result};

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

/// Active MIDI output connection.
pub struct MidiNotePlayer {
    connection: MidiOutputConnection,
    port_name: String,
    channel: u8,
}

impl MidiNotePlayer {
    /// Connect to a MIDI output port.
    /// Picks the first port whose name contains `device_name`, or the first
    /// available port when no name is given.
    pub fn connect(device_name: Option<&str>, channel: u8) -> Result<Self> {
        let midi_out =
            MidiOutput::new("seedbeat").map_err(|e| Error::Midi(format!("init: {e}")))?;

        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err(Error::NoOutputPorts);
        }

        let (port, port_name) = match device_name {
            Some(filter) => ports
                .iter()
                .find_map(|p| {
                    let name = midi_out.port_name(p).unwrap_or_default();
                    name.contains(filter).then(|| (p.clone(), name))
                })
                .ok_or_else(|| Error::DeviceNotFound(filter.to_string()))?,
            None => {
                let p = ports[0].clone();
                let name = midi_out
                    .port_name(&p)
                    .unwrap_or_else(|_| "unknown".to_string());
                (p, name)
            }
        };

        let connection = midi_out
            .connect(&port, "seedbeat-output")
            .map_err(|e| Error::Midi(format!("connect: {e}")))?;

        tracing::info!(port = %port_name, channel, "connected MIDI output");

        Ok(Self {
            connection,
            port_name,
            channel: channel & 0x0F,
        })
    }

    /// Get the connected port name.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// List all available MIDI output device names.
    pub fn list_devices() -> Vec<String> {
        let Ok(midi_out) = MidiOutput::new("seedbeat-list") else {
            return Vec::new();
        };
        midi_out
            .ports()
            .iter()
            .filter_map(|p| midi_out.port_name(p).ok())
            .collect()
    }

    fn send(&mut self, message: &[u8]) -> Result<()> {
        self.connection
            .send(message)
            .map_err(|e| Error::Midi(format!("send: {e}")))
    }
}

impl NotePlayer for MidiNotePlayer {
    fn play(&mut self, note: u8, velocity: u8, duration: Duration) -> Result<()> {
        let note = note & 0x7F;
        self.send(&[NOTE_ON | self.channel, note, velocity.min(127)])?;
        thread::sleep(duration);
        self.send(&[NOTE_OFF | self.channel, note, 0])
    }
}
