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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and high-level domain models, ensuring type-safe extraction of model
//! attributes from database queries.

use std::collections::HashMap;

use rusqlite::Row;

use crate::{bingo::Ticket, model::Song};

impl Song {
    /// Maps an SQLite row to a [`Song`] instance.
    ///
    /// This is a helper function designed to be used with [`rusqlite::Statement::query_map`].
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if:
    /// * The row does not contain enough columns.
    /// * The data in a column cannot be converted to the required Rust type.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            artist: row.get(1)?,
            title: row.get(2)?,
            album: row.get(3)?,
            duration: row.get(4)?,
            filename: row.get(5)?,
        })
    }
}

/// One saved grid position of a ticket.
#[derive(Debug)]
pub(super) struct StoredCell {
    pub(super) ticket_id: String,
    pub(super) grid_size: i64,
    pub(super) row: i64,
    pub(super) col: i64,
    pub(super) song_id: String,
}

impl StoredCell {
    pub(super) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            ticket_id: row.get(0)?,
            grid_size: row.get(1)?,
            row: row.get(2)?,
            col: row.get(3)?,
            song_id: row.get(4)?,
        })
    }

    /// Rebuilds a ticket from its cells, which must be ordered by row then
    /// column.
    ///
    /// Returns `None` if any position is missing or any song cannot be
    /// resolved.
    pub(super) fn assemble(cells: &[StoredCell], songs: &HashMap<String, Song>) -> Option<Ticket<Song>> {
        let first = cells.first()?;
        let size = usize::try_from(first.grid_size).ok()?;
        if size == 0 || cells.len() != size * size {
            return None;
        }

        let mut grid: Vec<Vec<Song>> = Vec::with_capacity(size);
        for (idx, cell) in cells.iter().enumerate() {
            let (row, col) = (idx / size, idx % size);
            if cell.row != row as i64 || cell.col != col as i64 {
                return None;
            }

            if col == 0 {
                grid.push(Vec::with_capacity(size));
            }
            grid.last_mut()?.push(songs.get(&cell.song_id)?.clone());
        }

        Some(Ticket::new(first.ticket_id.clone(), grid))
    }
}
