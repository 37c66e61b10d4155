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

//! Audio playback of called songs.
//!
//! The [`AudioPlayer`] handle is what the UI talks to. Playback itself runs on
//! a background worker thread driving libmpv, so loading a file never blocks
//! the main event loop.

mod commands;

use std::sync::mpsc;

use anyhow::Result;

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

impl PlayerState {
    // Maps the libmpv pause and idle flags to a player state.
    fn from_flags(is_paused: bool, is_idle: bool) -> Self {
        if is_idle {
            Self::Stopped
        } else if is_paused {
            Self::Paused
        } else {
            Self::Playing
        }
    }
}

/// A handle to the playback worker.
///
/// Every method only queues a command for the worker thread; errors are
/// limited to the worker having gone away.
pub(crate) struct AudioPlayer {
    command_tx: mpsc::Sender<AudioPlayerCommand>,
}

impl AudioPlayer {
    /// Spawns the playback worker and returns a handle to it.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - Channel for player progress and failures, consumed by
    ///   the main event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx);

        Self { command_tx }
    }

    /// Plays a song file from the beginning, or `start_secs` into it.
    pub(crate) fn play_file(&self, filename: &str, start_secs: u32) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::PlayFile {
            filename: filename.to_string(),
            start_secs,
        })?;
        Ok(())
    }

    pub(crate) fn toggle_pause(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::TogglePause)?;
        Ok(())
    }

    pub(crate) fn stop(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::Stop)?;
        Ok(())
    }

    /// Adjusts the volume by `delta` percentage points.
    pub(crate) fn adjust_volume(&self, delta: i32) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::AdjustVolume(delta))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_wins_over_pause() {
        assert_eq!(PlayerState::from_flags(true, true), PlayerState::Stopped);
        assert_eq!(PlayerState::from_flags(false, true), PlayerState::Stopped);
        assert_eq!(PlayerState::from_flags(true, false), PlayerState::Paused);
        assert_eq!(PlayerState::from_flags(false, false), PlayerState::Playing);
    }
}
