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

use std::path::PathBuf;

use anyhow::Result;
use log::{debug, info, warn};
use rand::rng;

use crate::{
    App, MainView,
    bingo::{Batch, Ticket},
    config::{self, AppConfig},
    events::CatalogEvent,
    model::{Song, tickets::Achievement},
    player::PlayerState,
    tasks::{AppTask, GenerationSettings},
    util::format::format_capacity,
};

pub(super) fn handle_catalog_event(app: &mut App, catalog_event: CatalogEvent) {
    match catalog_event {
        CatalogEvent::Started => app.catalog.prepare_scan(&app.config.media_dirs),
        CatalogEvent::StartedDirectory(dir) => app.catalog.begin_scan_directory(&dir),
        CatalogEvent::ProcessedFile(count, filename) => {
            debug!("Scanned {}", filename);
            app.catalog.update_scan_directory(count);
        }
        CatalogEvent::FinishedDirectory(dir) => {
            debug!("Finished scanning {}", dir);
            app.catalog.end_scan_directory();
        }
        CatalogEvent::Finished(count) => {
            info!("Scan finished with {} songs", count);
            app.catalog.finish_scan();
        }
        CatalogEvent::Failed => app.catalog.abort_scan(),
    }
}

pub(super) fn handle_catalog_updated(app: &mut App) {
    app.status = Some(format!("Scan finished, {} files found", app.catalog.scanned_files()));
}

pub(super) fn handle_scan_catalog(app: &mut App) -> Result<()> {
    if app.config.media_dirs.is_empty() {
        app.status = Some("No media directories configured".to_string());
        return Ok(());
    }

    app.task_tx.send(AppTask::ScanCatalog)?;
    app.main_view = MainView::Catalog;

    Ok(())
}

/// Installs the catalog, tickets and played history read from the store.
///
/// Wins already held by the restored history are not announced again.
pub(super) fn handle_game_loaded(app: &mut App, songs: Vec<Song>, tickets: Vec<Ticket<Song>>, history: &[String]) {
    app.catalog.set_songs(songs);
    app.ticket_book.set_tickets(tickets);
    app.session.start(app.catalog.songs(), history, &mut rng());
    app.ticket_book.refresh(app.session.played_ids());
    app.ticket_view.clamp(app.ticket_book.len());
}

pub(super) fn handle_generate_tickets(app: &mut App, count: Option<usize>) -> Result<()> {
    if !AppConfig::is_valid_grid_size(app.config.grid_size) {
        app.status = Some(format!("Invalid grid size {}, set one with :grid", app.config.grid_size));
        return Ok(());
    }

    let count = count.unwrap_or(app.config.ticket_count);
    if count == 0 {
        app.status = Some("Ticket count must be at least 1".to_string());
        return Ok(());
    }

    let settings = GenerationSettings::from_config(&app.config);

    app.task_tx.send(AppTask::GenerateTickets(settings, count))?;
    app.status = Some(format!("Generating {} tickets...", count));

    Ok(())
}

/// A new ticket set starts a new game with an empty played-set.
pub(super) fn handle_tickets_generated(app: &mut App, batch: Batch<Song>) {
    let message = if batch.is_complete() {
        format!("Generated {} tickets", batch.produced())
    } else {
        format!(
            "Generated {} of {} tickets, the catalog has no more distinct tickets",
            batch.produced(),
            batch.requested
        )
    };
    info!("{}", message);

    app.ticket_book.set_tickets(batch.tickets);
    app.session.reset(app.catalog.songs(), &mut rng());
    app.ticket_book.refresh(app.session.played_ids());
    app.ticket_view.select(0);
    app.main_view = MainView::Tickets;
    app.status = Some(message);
}

pub(super) fn handle_add_ticket(app: &mut App) -> Result<()> {
    let mut settings = GenerationSettings::from_config(&app.config);
    if let Some(first) = app.ticket_book.get(0) {
        settings.grid_size = first.size();
    }

    app.task_tx.send(AppTask::AddTicket {
        settings,
        id: next_ticket_id(app.ticket_book.tickets()),
        existing: app.ticket_book.signatures(),
    })?;

    Ok(())
}

pub(super) fn handle_ticket_added(app: &mut App, ticket: Ticket<Song>) {
    let message = format!("Added ticket {}", ticket.id);

    app.ticket_book.push(ticket);
    let achievements = app.ticket_book.refresh(app.session.played_ids());
    app.ticket_view.select(app.ticket_book.len().saturating_sub(1));
    app.main_view = MainView::Tickets;
    app.status = Some(announce(&achievements).unwrap_or(message));
}

pub(super) fn handle_set_grid_size(app: &mut App, size: usize) {
    if !AppConfig::is_valid_grid_size(size) {
        app.status = Some(format!(
            "Grid size must be between {} and {}",
            config::MIN_GRID_SIZE,
            config::MAX_GRID_SIZE
        ));
        return;
    }

    app.config.grid_size = size;
    if let Err(e) = config::save_config(&app.config) {
        warn!("Failed to save configuration: {}", e);
    }

    let cap = app.config.combination_cap;
    let capacity = app.catalog.ticket_capacity(size, cap);
    app.status = Some(format!(
        "Grid size {}x{}, up to {} distinct tickets",
        size,
        size,
        format_capacity(capacity, cap)
    ));
}

pub(super) fn handle_export_tickets(app: &mut App, path: PathBuf) -> Result<()> {
    app.task_tx.send(AppTask::ExportTickets(path))?;

    Ok(())
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    app.main_view = main_view;
}

pub(super) fn handle_select_ticket(app: &mut App, ticket_id: &str) {
    match app.ticket_book.position(ticket_id) {
        Some(idx) => {
            app.ticket_view.select(idx);
            app.main_view = MainView::Tickets;
        }
        None => app.status = Some(format!("No ticket {}", ticket_id)),
    }
}

/// Calls the next song: plays it, records it and checks every ticket.
pub(super) fn handle_next_song(app: &mut App) -> Result<()> {
    let Some(song) = app.session.next().cloned() else {
        app.status = Some("Every song has been played".to_string());
        return Ok(());
    };

    info!("Calling {} - {}", song.artist, song.title);
    app.audio_player
        .play_file(&song.filename, app.config.play_offset_secs)?;
    app.task_tx.send(AppTask::RecordPlayed(song.id.clone()))?;
    app.player_time = None;
    app.player_duration = None;

    let achievements = app.ticket_book.refresh(app.session.played_ids());
    for achievement in &achievements {
        info!("Ticket {} has a {}", achievement.ticket_id, achievement.condition);
    }

    app.status = Some(
        announce(&achievements).unwrap_or_else(|| format!("Now playing {} - {}", song.artist, song.title)),
    );

    Ok(())
}

pub(super) fn handle_reset_session(app: &mut App) -> Result<()> {
    app.audio_player.stop()?;
    app.session.reset(app.catalog.songs(), &mut rng());
    app.ticket_book.refresh(app.session.played_ids());
    app.task_tx.send(AppTask::ClearPlayed)?;
    app.status = Some("Session reset".to_string());

    Ok(())
}

pub(super) fn handle_player_state_changed(app: &mut App, state: PlayerState) {
    app.player_state = state;
}

pub(super) fn handle_duration_changed(app: &mut App, duration: u64) {
    app.player_duration = Some(duration);
}

pub(super) fn handle_time_changed(app: &mut App, seconds: f64) {
    app.player_time = Some(seconds as u64);
}

pub(super) fn handle_volume_changed(app: &mut App, volume: u32) {
    app.volume = Some(volume);
}

pub(super) fn handle_track_finished(app: &mut App) {
    app.player_time = app.player_duration;
}

pub(super) fn handle_status(app: &mut App, message: String) {
    app.status = Some(message);
}

/// Numeric identifiers continue from the highest one in use.
fn next_ticket_id(tickets: &[Ticket<Song>]) -> String {
    let highest = tickets
        .iter()
        .filter_map(|t| t.id.parse::<usize>().ok())
        .max()
        .unwrap_or(0);

    (highest.max(tickets.len()) + 1).to_string()
}

fn announce(achievements: &[Achievement]) -> Option<String> {
    if achievements.is_empty() {
        return None;
    }

    let wins: Vec<String> = achievements
        .iter()
        .map(|a| format!("ticket {} {}", a.ticket_id, a.condition))
        .collect();

    Some(format!("Winner! {}", wins.join(", ")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{bingo::WinCondition, model::test_songs};

    fn ticket(id: &str) -> Ticket<Song> {
        Ticket::new(id, vec![test_songs(1)])
    }

    #[test]
    fn ticket_ids_continue_after_the_highest() {
        assert_eq!(next_ticket_id(&[]), "1");
        assert_eq!(next_ticket_id(&[ticket("1"), ticket("2"), ticket("7")]), "8");
        assert_eq!(next_ticket_id(&[ticket("a"), ticket("b")]), "3");
    }

    #[test]
    fn achievements_are_announced_together() {
        assert_eq!(announce(&[]), None);

        let achievements = vec![
            Achievement {
                ticket_id: "3".to_string(),
                condition: WinCondition::SingleLine,
            },
            Achievement {
                ticket_id: "5".to_string(),
                condition: WinCondition::FullHouse,
            },
        ];
        assert_eq!(
            announce(&achievements).as_deref(),
            Some("Winner! ticket 3 Single Line, ticket 5 Full House")
        );
    }
}
