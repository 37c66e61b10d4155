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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation, the song catalog, saved tickets and the played history of
//! the current session. It uses cached statements for the queries issued on
//! every called song.
//!
//! # Tables
//!
//! * `songs` - One row per audio file, keyed by the stable song identifier.
//! * `tickets` - Generated tickets, in the order they were handed out.
//! * `ticket_cells` - The song at each grid position of a ticket.
//! * `played` - Songs called in the current session, oldest first.

mod model;
pub(crate) mod scan;

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::warn;
use rusqlite::{Connection, params};

use crate::{bingo::Ticket, db::model::StoredCell, model::Song};

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging for better concurrency.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL` and increases the cache size.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened, WAL mode cannot be
/// enabled or the schema initialization fails.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open database {path}"))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    prepare(&conn)?;

    Ok(conn)
}

/// Applies connection settings and creates the schema.
fn prepare(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -64000; -- Use 64MB of RAM for cache
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    create_schema(conn)
}

/// Create the database schema.
///
/// Ticket cells reference their ticket with `ON DELETE CASCADE`. They do not
/// reference `songs`, since a rescan rebuilds that table; tickets whose songs
/// vanish are dropped when loaded instead.
///
/// # Errors
///
/// Returns an error if the transaction fails, if there are permission issues
/// with the database file, or if the SQL syntax is invalid.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS songs (
            id TEXT PRIMARY KEY,
            artist TEXT NOT NULL COLLATE NOCASE,
            title TEXT NOT NULL COLLATE NOCASE,
            album TEXT NOT NULL COLLATE NOCASE,
            duration INTEGER NOT NULL,
            filename TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS tickets (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            grid_size INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ticket_cells (
            ticket_id TEXT NOT NULL,
            row INTEGER NOT NULL,
            col INTEGER NOT NULL,
            song_id TEXT NOT NULL,
            PRIMARY KEY (ticket_id, row, col),
            FOREIGN KEY (ticket_id) REFERENCES tickets (id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS played (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id TEXT NOT NULL UNIQUE
        );

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Fetches the whole song catalog, sorted by artist and title.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if there is a type mismatch
/// when mapping the database rows to the [`Song`] struct.
pub(crate) fn fetch_songs(conn: &Connection) -> Result<Vec<Song>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, artist, title, album, duration, filename
         FROM songs
         ORDER BY artist, title",
    )?;

    let results = stmt
        .query_map([], Song::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Replaces all saved tickets.
///
/// The previous tickets and their cells are removed and the new ones written
/// in a single transaction, keeping their order.
pub(crate) fn save_tickets(conn: &mut Connection, tickets: &[Ticket<Song>]) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM ticket_cells", [])?;
    tx.execute("DELETE FROM tickets", [])?;

    for (position, ticket) in tickets.iter().enumerate() {
        insert_ticket(&tx, ticket, position)?;
    }

    tx.commit().context("Failed to commit tickets")
}

/// Saves one more ticket after the existing ones.
pub(crate) fn append_ticket(conn: &mut Connection, ticket: &Ticket<Song>) -> Result<()> {
    let tx = conn.transaction()?;

    let position: i64 = tx.query_row("SELECT COALESCE(MAX(position) + 1, 0) FROM tickets", [], |r| {
        r.get(0)
    })?;
    insert_ticket(&tx, ticket, usize::try_from(position).unwrap_or_default())?;

    tx.commit().context("Failed to commit ticket")
}

fn insert_ticket(conn: &Connection, ticket: &Ticket<Song>, position: usize) -> Result<()> {
    conn.execute(
        "INSERT INTO tickets (id, position, grid_size) VALUES (?1, ?2, ?3)",
        params![ticket.id, position as i64, ticket.size() as i64],
    )
    .with_context(|| format!("Failed to save ticket {}", ticket.id))?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO ticket_cells (ticket_id, row, col, song_id) VALUES (?1, ?2, ?3, ?4)",
    )?;

    for (r, row) in ticket.grid.iter().enumerate() {
        for (c, song) in row.iter().enumerate() {
            stmt.execute(params![ticket.id, r as i64, c as i64, song.id])?;
        }
    }

    Ok(())
}

/// Loads saved tickets in their original order.
///
/// Cells are resolved against the current catalog. A ticket referring to a
/// song that is no longer in the catalog, or with an incomplete grid, is
/// skipped with a warning.
pub(crate) fn fetch_tickets(conn: &Connection) -> Result<Vec<Ticket<Song>>> {
    let songs: HashMap<String, Song> = fetch_songs(conn)?
        .into_iter()
        .map(|s| (s.id.clone(), s))
        .collect();

    let mut stmt = conn.prepare_cached(
        "SELECT t.id, t.grid_size, c.row, c.col, c.song_id
         FROM tickets t
         JOIN ticket_cells c ON c.ticket_id = t.id
         ORDER BY t.position, c.row, c.col",
    )?;

    let cells = stmt
        .query_map([], StoredCell::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut tickets = Vec::new();
    for group in cells.chunk_by(|a, b| a.ticket_id == b.ticket_id) {
        match StoredCell::assemble(group, &songs) {
            Some(ticket) => tickets.push(ticket),
            None => warn!(
                "Dropping saved ticket {}: its songs are no longer in the catalog",
                group[0].ticket_id
            ),
        }
    }

    Ok(tickets)
}

/// Appends a song to the played history. Songs already played are ignored.
pub(crate) fn record_played(conn: &Connection, song_id: &str) -> Result<()> {
    let mut stmt = conn.prepare_cached("INSERT OR IGNORE INTO played (song_id) VALUES (?1)")?;
    stmt.execute(params![song_id])?;

    Ok(())
}

/// Fetches the played history, oldest first.
pub(crate) fn fetch_played(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare_cached("SELECT song_id FROM played ORDER BY seq")?;
    let results = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

pub(crate) fn clear_played(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM played", [])?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    prepare(&conn).unwrap();
    conn
}

#[cfg(test)]
pub(crate) fn insert_songs(conn: &Connection, songs: &[Song]) {
    for song in songs {
        conn.execute(
            "INSERT INTO songs (id, artist, title, album, duration, filename) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![song.id, song.artist, song.title, song.album, song.duration, song.filename],
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{bingo::TicketGenerator, model::test_songs};

    #[test]
    fn songs_round_trip() {
        let conn = open_in_memory();
        let songs = test_songs(3);
        insert_songs(&conn, &songs);

        let fetched = fetch_songs(&conn).unwrap();
        assert_eq!(fetched, songs);
    }

    #[test]
    fn tickets_round_trip_in_order() {
        let mut conn = open_in_memory();
        let songs = test_songs(20);
        insert_songs(&conn, &songs);

        let batch = TicketGenerator::new(3)
            .generate_batch(&songs, 4, &mut StdRng::seed_from_u64(1))
            .unwrap();
        save_tickets(&mut conn, &batch.tickets).unwrap();

        assert_eq!(fetch_tickets(&conn).unwrap(), batch.tickets);

        let extra = TicketGenerator::new(3)
            .generate_ticket(&songs, "5", &mut StdRng::seed_from_u64(2))
            .unwrap();
        append_ticket(&mut conn, &extra).unwrap();

        let fetched = fetch_tickets(&conn).unwrap();
        assert_eq!(fetched.len(), 5);
        assert_eq!(fetched[4], extra);
    }

    #[test]
    fn saving_replaces_previous_tickets() {
        let mut conn = open_in_memory();
        let songs = test_songs(16);
        insert_songs(&conn, &songs);

        let generator = TicketGenerator::new(2);
        let mut rng = StdRng::seed_from_u64(3);
        let first = generator.generate_batch(&songs, 6, &mut rng).unwrap();
        let second = generator.generate_batch(&songs, 2, &mut rng).unwrap();

        save_tickets(&mut conn, &first.tickets).unwrap();
        save_tickets(&mut conn, &second.tickets).unwrap();

        assert_eq!(fetch_tickets(&conn).unwrap(), second.tickets);
    }

    #[test]
    fn tickets_with_missing_songs_are_dropped() {
        let mut conn = open_in_memory();
        let songs = test_songs(9);
        insert_songs(&conn, &songs);

        let ticket = TicketGenerator::new(3)
            .generate_ticket(&songs, "1", &mut StdRng::seed_from_u64(4))
            .unwrap();
        save_tickets(&mut conn, &[ticket]).unwrap();

        conn.execute("DELETE FROM songs WHERE id = ?1", params![songs[0].id])
            .unwrap();

        assert!(fetch_tickets(&conn).unwrap().is_empty());
    }

    #[test]
    fn played_history_keeps_order_and_ignores_repeats() {
        let conn = open_in_memory();

        record_played(&conn, "b").unwrap();
        record_played(&conn, "a").unwrap();
        record_played(&conn, "b").unwrap();
        assert_eq!(fetch_played(&conn).unwrap(), vec!["b", "a"]);

        clear_played(&conn).unwrap();
        assert!(fetch_played(&conn).unwrap().is_empty());
    }
}
