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

//! Song catalog and library scan progress.
//!
//! The catalog holds the songs tickets are drawn from, as last loaded from
//! the database, along with per-directory progress of a running scan.

use crate::{bingo::max_tickets, model::Song};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogStatus {
    Idle,
    Scanning,
    Finished,
}

pub(crate) struct DirectoryStatus {
    pub(crate) status: CatalogStatus,
    pub(crate) name: String,
    pub(crate) count: usize,
}

pub(crate) struct Catalog {
    pub(crate) status: CatalogStatus,
    pub(crate) directory_status: Vec<DirectoryStatus>,
    songs: Vec<Song>,
    current_directory_index: Option<usize>,
}

impl Catalog {
    pub(crate) fn new() -> Self {
        Self {
            status: CatalogStatus::Idle,
            directory_status: vec![],
            songs: vec![],
            current_directory_index: None,
        }
    }

    pub(crate) fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub(crate) fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
    }

    pub(crate) fn len(&self) -> usize {
        self.songs.len()
    }

    /// Number of distinct tickets this catalog supports for the grid size,
    /// saturating at `cap`.
    pub(crate) fn ticket_capacity(&self, grid_size: usize, cap: u64) -> u64 {
        max_tickets(self.songs.len(), grid_size, cap)
    }

    pub(crate) fn prepare_scan(&mut self, directories: &[String]) {
        self.status = CatalogStatus::Scanning;
        self.current_directory_index = None;

        self.directory_status = directories
            .iter()
            .map(|d| DirectoryStatus {
                status: CatalogStatus::Idle,
                name: d.clone(),
                count: 0,
            })
            .collect();
    }

    pub(crate) fn begin_scan_directory(&mut self, directory: &str) {
        self.current_directory_index = self
            .directory_status
            .iter()
            .position(|s| s.name == directory);

        if let Some(idx) = self.current_directory_index {
            self.directory_status[idx].status = CatalogStatus::Scanning;
        }
    }

    pub(crate) fn update_scan_directory(&mut self, count: usize) {
        if let Some(status) = self
            .current_directory_index
            .and_then(|idx| self.directory_status.get_mut(idx))
        {
            status.count = count;
        }
    }

    pub(crate) fn end_scan_directory(&mut self) {
        if let Some(status) = self
            .current_directory_index
            .and_then(|idx| self.directory_status.get_mut(idx))
        {
            status.status = CatalogStatus::Finished;
        }
        self.current_directory_index = None;
    }

    pub(crate) fn finish_scan(&mut self) {
        self.status = CatalogStatus::Finished;
    }

    /// Drops the progress of a scan that failed; the songs are unchanged.
    pub(crate) fn abort_scan(&mut self) {
        self.status = CatalogStatus::Idle;
        self.current_directory_index = None;
        self.directory_status.clear();
    }

    pub(crate) fn scanned_files(&self) -> usize {
        self.directory_status.iter().map(|d| d.count).sum()
    }
}
