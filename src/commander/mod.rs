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

//! The `:` command line.
//!
//! Typing `:` opens a text input; `Enter` parses the buffer into an
//! application event and `Esc` closes the line. See [`parse_command`] for the
//! commands understood.

use std::{path::PathBuf, sync::mpsc::Sender};

use crossterm::event::{Event, KeyCode};
use log::debug;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{MainView, events::AppEvent};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Offers a terminal event to the command line.
    ///
    /// Returns `true` if the event was consumed.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }
            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    debug!("Command: {}", buffer);
                    let event = parse_command(&buffer).unwrap_or_else(AppEvent::Error);
                    let _ = event_tx.send(event);
                }
            }
            _ => {
                self.input.handle_event(event);
            }
        }

        true
    }
}

/// Parses one command line into the event it requests.
///
/// # Errors
///
/// Returns a message for the user if the command is unknown or its argument
/// is missing or malformed.
pub(crate) fn parse_command(buffer: &str) -> Result<AppEvent, String> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        ["q"] => AppEvent::ExitApplication,
        ["scan"] => AppEvent::ScanCatalog,

        ["gen"] => AppEvent::GenerateTickets(None),
        ["gen", count] => AppEvent::GenerateTickets(Some(parse_count(count)?)),
        ["add"] => AppEvent::AddTicket,
        ["grid", size] => AppEvent::SetGridSize(parse_number(size)?),

        ["next"] => AppEvent::NextSong,
        ["reset"] => AppEvent::ResetSession,

        ["t", id] => AppEvent::SelectTicket(id.to_string()),

        ["export", path_parts @ ..] if !path_parts.is_empty() => {
            AppEvent::ExportTickets(PathBuf::from(path_parts.join(" ")))
        }

        ["1"] => AppEvent::SetMainView(MainView::Tickets),
        ["2"] => AppEvent::SetMainView(MainView::Session),
        ["3"] => AppEvent::SetMainView(MainView::Catalog),

        [cmd, ..] => return Err(format!("Unknown or incomplete command: {}", cmd)),
        [] => return Err("Empty command".to_string()),
    };

    Ok(event)
}

fn parse_number(value: &str) -> Result<usize, String> {
    value.parse().map_err(|_| format!("Not a number: {}", value))
}

fn parse_count(value: &str) -> Result<usize, String> {
    match parse_number(value)? {
        0 => Err("Ticket count must be at least 1".to_string()),
        count => Ok(count),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn parses_game_commands() {
        assert!(matches!(parse_command("gen"), Ok(AppEvent::GenerateTickets(None))));
        assert!(matches!(parse_command("gen 12"), Ok(AppEvent::GenerateTickets(Some(12)))));
        assert!(matches!(parse_command("grid 4"), Ok(AppEvent::SetGridSize(4))));
        assert!(matches!(parse_command("next"), Ok(AppEvent::NextSong)));
        assert!(matches!(parse_command("reset"), Ok(AppEvent::ResetSession)));
        assert!(matches!(parse_command("add"), Ok(AppEvent::AddTicket)));
        assert!(matches!(parse_command("  q  "), Ok(AppEvent::ExitApplication)));
        assert!(matches!(parse_command("2"), Ok(AppEvent::SetMainView(MainView::Session))));
    }

    #[test]
    fn keeps_arguments() {
        match parse_command("t 7") {
            Ok(AppEvent::SelectTicket(id)) => assert_eq!(id, "7"),
            other => panic!("unexpected {:?}", other),
        }
        match parse_command("export my tickets.txt") {
            Ok(AppEvent::ExportTickets(path)) => assert_eq!(path, PathBuf::from("my tickets.txt")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!(parse_command("gen lots").unwrap_err(), "Not a number: lots");
        assert_eq!(parse_command("gen 0").unwrap_err(), "Ticket count must be at least 1");
        assert!(parse_command("grid").is_err());
        assert!(parse_command("export").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn command_line_sends_the_parsed_event() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('n')), &event_tx));
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &event_tx));
        assert!(commander.active());

        for c in "gen 3".chars() {
            assert!(commander.handle_event(&key(KeyCode::Char(c)), &event_tx));
        }
        assert!(commander.handle_event(&key(KeyCode::Enter), &event_tx));

        assert!(!commander.active());
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::GenerateTickets(Some(3)))));
    }

    #[test]
    fn unknown_command_becomes_an_error_event() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(&key(KeyCode::Char(':')), &event_tx);
        commander.handle_event(&key(KeyCode::Char('x')), &event_tx);
        commander.handle_event(&key(KeyCode::Enter), &event_tx);

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::Error(_))));
    }
}
