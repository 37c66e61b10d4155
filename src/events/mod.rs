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

//! Application events and the main event loop.
//!
//! Everything that changes application state arrives here as an [`AppEvent`]:
//! key presses, player progress, results from the task worker and requests
//! issued by the command line. Events are handled one at a time on the main
//! thread and the UI is redrawn after each one.

mod handlers;
use handlers::*;

use std::{io::Stdout, path::PathBuf};

use anyhow::{Result, anyhow};
use crossterm::event::{Event, KeyCode, KeyEvent};
use log::error;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    bingo::{Batch, Ticket},
    model::Song,
    player::PlayerState,
    render::draw,
};

const VOLUME_DELTA: i32 = 5;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    Catalog(CatalogEvent),
    CatalogUpdated,
    ScanCatalog,

    GameLoaded {
        songs: Vec<Song>,
        tickets: Vec<Ticket<Song>>,
        history: Vec<String>,
    },

    GenerateTickets(Option<usize>),
    TicketsGenerated(Batch<Song>),
    AddTicket,
    TicketAdded(Ticket<Song>),
    SetGridSize(usize),
    ExportTickets(PathBuf),

    SetMainView(MainView),
    SelectTicket(String),

    NextSong,
    ResetSession,

    PlayerStateChanged(PlayerState),
    DurationChanged(u64),
    TimeChanged(f64),
    VolumeChanged(u32),
    TrackFinished,

    Tick,

    Status(String),

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Progress of a library scan, reported per directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogEvent {
    Started,
    StartedDirectory(String),
    ProcessedFile(usize, String),
    FinishedDirectory(String),
    Finished(usize),
    Failed,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a quit event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error on a fatal event, or if handling an event or drawing the
/// terminal fails.
pub(crate) fn process_events(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => return Err(anyhow!(message)),
            event => handle_event(app, event)?,
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Catalog(catalog_event) => handle_catalog_event(app, catalog_event),
        AppEvent::CatalogUpdated => handle_catalog_updated(app),
        AppEvent::ScanCatalog => handle_scan_catalog(app)?,
        AppEvent::GameLoaded {
            songs,
            tickets,
            history,
        } => handle_game_loaded(app, songs, tickets, &history),
        AppEvent::GenerateTickets(count) => handle_generate_tickets(app, count)?,
        AppEvent::TicketsGenerated(batch) => handle_tickets_generated(app, batch),
        AppEvent::AddTicket => handle_add_ticket(app)?,
        AppEvent::TicketAdded(ticket) => handle_ticket_added(app, ticket),
        AppEvent::SetGridSize(size) => handle_set_grid_size(app, size),
        AppEvent::ExportTickets(path) => handle_export_tickets(app, path)?,
        AppEvent::SetMainView(view) => handle_set_main_view(app, view),
        AppEvent::SelectTicket(id) => handle_select_ticket(app, &id),
        AppEvent::NextSong => handle_next_song(app)?,
        AppEvent::ResetSession => handle_reset_session(app)?,
        AppEvent::PlayerStateChanged(state) => handle_player_state_changed(app, state),
        AppEvent::DurationChanged(duration) => handle_duration_changed(app, duration),
        AppEvent::TimeChanged(secs) => handle_time_changed(app, secs),
        AppEvent::VolumeChanged(volume) => handle_volume_changed(app, volume),
        AppEvent::TrackFinished => handle_track_finished(app),
        AppEvent::Status(message) => handle_status(app, message),
        AppEvent::Error(message) => {
            error!("{}", message);
            handle_status(app, format!("Error: {}", message));
        }
        AppEvent::Tick | AppEvent::ExitApplication | AppEvent::FatalError(_) => {}
    }

    Ok(())
}

/// Maps keyboard input to game and playback actions.
///
/// While the command line is active it consumes every key; otherwise keys are
/// single-stroke shortcuts.
///
/// # Errors
///
/// Returns an error if a request cannot be sent to a background worker.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.commander.handle_event(&Event::Key(key), &app.event_tx) {
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Tickets))?,
        KeyCode::Char('2') => app.event_tx.send(AppEvent::SetMainView(MainView::Session))?,
        KeyCode::Char('3') => app.event_tx.send(AppEvent::SetMainView(MainView::Catalog))?,

        KeyCode::Char('n') => app.event_tx.send(AppEvent::NextSong)?,

        KeyCode::Char('h') | KeyCode::Left => app.ticket_view.previous(app.ticket_book.len()),
        KeyCode::Char('l') | KeyCode::Right => app.ticket_view.next(app.ticket_book.len()),

        KeyCode::Char(' ') => app.audio_player.toggle_pause()?,
        KeyCode::Char('s') => app.audio_player.stop()?,
        KeyCode::Char('-') => app.audio_player.adjust_volume(-VOLUME_DELTA)?,
        KeyCode::Char('=') => app.audio_player.adjust_volume(VOLUME_DELTA)?,

        _ => {}
    }

    Ok(())
}
