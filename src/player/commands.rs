// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The libmpv playback worker.
//!
//! The worker alternates between draining queued [`AudioPlayerCommand`]s and
//! waiting briefly for libmpv property changes, which it forwards to the UI as
//! [`AppEvent`]s.

use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use log::{debug, error};
use mpv::Format;

use crate::{events::AppEvent, player::PlayerState};

const EVENT_WAIT_SECS: f64 = 0.05;

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    PlayFile { filename: String, start_secs: u32 },
    TogglePause,
    Stop,
    AdjustVolume(i32),
}

/// Spawns the playback worker thread.
///
/// A failure inside the worker ends playback for the rest of the run and is
/// reported as [`AppEvent::FatalError`].
pub(crate) fn spawn_player_worker(command_rx: Receiver<AudioPlayerCommand>, event_tx: Sender<AppEvent>) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            error!("Audio player failure: {:#}", e);
            let _ = error_tx.send(AppEvent::FatalError(format!("Audio player failure: {:#}", e)));
        }
    });
}

fn audio_player_worker(command_rx: Receiver<AudioPlayerCommand>, event_tx: Sender<AppEvent>) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    for property in ["duration", "time-pos", "volume"] {
        handler
            .observe_property::<f64>(property, 0)
            .with_context(|| format!("Failed to observe {}", property))?;
    }
    for property in ["pause", "idle-active"] {
        handler
            .observe_property::<bool>(property, 0)
            .with_context(|| format!("Failed to observe {}", property))?;
    }

    let mut flags = PlaybackFlags {
        is_paused: false,
        is_idle: true,
        state: PlayerState::Stopped,
    };

    loop {
        process_commands(&mut handler, &command_rx)?;
        process_mpv_events(&mut handler, &mut flags, &event_tx)?;
    }
}

struct PlaybackFlags {
    is_paused: bool,
    is_idle: bool,
    state: PlayerState,
}

fn process_commands(handler: &mut mpv::MpvHandler, command_rx: &Receiver<AudioPlayerCommand>) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        match command {
            AudioPlayerCommand::PlayFile { filename, start_secs } => {
                debug!("Playing {} from {}s", filename, start_secs);
                let start = format!("+{}", start_secs);
                handler
                    .set_property("start", start.as_str())
                    .context("Failed to set start position")?;
                handler
                    .command(&["loadfile", &filename, "replace"])
                    .with_context(|| format!("Failed to load file: {}", filename))?;
                handler.set_property("pause", false)?;
            }
            AudioPlayerCommand::TogglePause => {
                handler.command(&["cycle", "pause"])?;
            }
            AudioPlayerCommand::Stop => {
                handler.command(&["stop"])?;
            }
            AudioPlayerCommand::AdjustVolume(delta) => {
                handler.command(&["add", "volume", &delta.to_string()])?;
            }
        }
    }

    Ok(())
}

fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    flags: &mut PlaybackFlags,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    let Some(mpv_event) = handler.wait_event(EVENT_WAIT_SECS) else {
        return Ok(());
    };

    let app_event = match mpv_event {
        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("duration", Format::Double(duration)) => Some(AppEvent::DurationChanged(duration as u64)),
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => Some(AppEvent::TimeChanged(seconds)),
            ("volume", Format::Double(volume)) => Some(AppEvent::VolumeChanged(volume.round() as u32)),
            ("pause", Format::Flag(pause)) => {
                flags.is_paused = pause;
                None
            }
            ("idle-active", Format::Flag(idle)) => {
                flags.is_idle = idle;
                None
            }
            _ => None,
        },
        mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)) => Some(AppEvent::TrackFinished),
        _ => None,
    };

    let state = PlayerState::from_flags(flags.is_paused, flags.is_idle);
    if state != flags.state {
        flags.state = state;
        event_tx
            .send(AppEvent::PlayerStateChanged(state))
            .context("Failed to send player state event")?;
    }

    if let Some(event) = app_event {
        event_tx.send(event).context("Failed to send event")?;
    }

    Ok(())
}
