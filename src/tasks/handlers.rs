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

use std::{collections::HashSet, path::Path};

use anyhow::{Result, bail};
use log::{error, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    bingo::{TicketGenerator, max_tickets},
    db::{self, scan},
    events::{AppEvent, CatalogEvent},
    export,
    tasks::{GenerationSettings, TaskContext},
};

pub(super) fn scan_catalog(ctx: &mut TaskContext) -> Result<()> {
    let media_dirs = &ctx.config.media_dirs;

    match scan::process_music_library(ctx.conn, media_dirs, ctx.event_tx) {
        Ok(_) => ctx.event_tx.send(AppEvent::CatalogUpdated)?,
        Err(e) => {
            error!("Failure processing catalog: {:#}", e);
            ctx.event_tx.send(AppEvent::Catalog(CatalogEvent::Failed))?;
            ctx.event_tx.send(AppEvent::Error(format!("Scan failed: {:#}", e)))?;
        }
    }

    load_game(ctx)
}

pub(super) fn load_game(ctx: &mut TaskContext) -> Result<()> {
    let songs = db::fetch_songs(ctx.conn)?;
    let tickets = db::fetch_tickets(ctx.conn)?;
    let history = db::fetch_played(ctx.conn)?;

    info!(
        "Loaded {} songs, {} tickets and {} played songs",
        songs.len(),
        tickets.len(),
        history.len()
    );

    ctx.event_tx.send(AppEvent::GameLoaded {
        songs,
        tickets,
        history,
    })?;

    Ok(())
}

fn rng_for(seed: Option<u64>, salt: u64) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    StdRng::seed_from_u64(seed.wrapping_add(salt))
}

/// Generates a fresh set of tickets, replacing the saved ones.
///
/// A new ticket set starts a new game, so the played history is cleared.
pub(super) fn generate_tickets(
    ctx: &mut TaskContext,
    settings: GenerationSettings,
    count: usize,
) -> Result<()> {
    if count == 0 {
        bail!("Ticket count must be at least 1");
    }

    let songs = db::fetch_songs(ctx.conn)?;

    let capacity = max_tickets(songs.len(), settings.grid_size, settings.combination_cap);
    if (count as u64) > capacity {
        warn!(
            "Requested {} tickets but only {} distinct tickets are possible",
            count, capacity
        );
    }

    let generator = TicketGenerator::new(settings.grid_size).with_retry_limit(settings.retry_limit);
    let mut rng = rng_for(settings.seed, 0);
    let batch = generator.generate_batch(&songs, count, &mut rng)?;

    if !batch.is_complete() {
        warn!(
            "Generated {} of {} requested tickets",
            batch.produced(),
            batch.requested
        );
    }

    db::save_tickets(ctx.conn, &batch.tickets)?;
    db::clear_played(ctx.conn)?;

    ctx.event_tx.send(AppEvent::TicketsGenerated(batch))?;

    Ok(())
}

/// Generates one more ticket whose song set differs from every `existing`
/// signature.
pub(super) fn add_ticket(
    ctx: &mut TaskContext,
    settings: GenerationSettings,
    id: String,
    existing: &HashSet<String>,
) -> Result<()> {
    let songs = db::fetch_songs(ctx.conn)?;

    let generator = TicketGenerator::new(settings.grid_size).with_retry_limit(settings.retry_limit);
    let mut rng = rng_for(settings.seed, existing.len() as u64 + 1);

    match generator.generate_ticket_excluding(&songs, id, existing, &mut rng)? {
        Some(ticket) => {
            db::append_ticket(ctx.conn, &ticket)?;
            info!("Added ticket {}", ticket.id);
            ctx.event_tx.send(AppEvent::TicketAdded(ticket))?;
        }
        None => {
            warn!("No distinct ticket found after {} attempts", settings.retry_limit);
            ctx.event_tx.send(AppEvent::Status(
                "No distinct ticket left for this catalog".to_string(),
            ))?;
        }
    }

    Ok(())
}

pub(super) fn export_tickets(ctx: &mut TaskContext, path: &Path) -> Result<()> {
    let tickets = db::fetch_tickets(ctx.conn)?;
    export::export_tickets(path, &tickets)?;

    info!("Exported {} tickets to {}", tickets.len(), path.display());
    ctx.event_tx.send(AppEvent::Status(format!(
        "Exported {} tickets to {}",
        tickets.len(),
        path.display()
    )))?;

    Ok(())
}

pub(super) fn record_played(ctx: &mut TaskContext, song_id: &str) -> Result<()> {
    db::record_played(ctx.conn, song_id)
}

pub(super) fn clear_played(ctx: &mut TaskContext) -> Result<()> {
    db::clear_played(ctx.conn)
}
