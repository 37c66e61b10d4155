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

//! Domain models and core data structures.
//!
//! This module defines the song catalog as the game sees it, together with
//! the state of a running game: the session's call order and the book of
//! tickets in play.

pub(crate) mod catalog;
pub(crate) mod session;
pub(crate) mod tickets;

use xxhash_rust::xxh3::xxh3_64;

use crate::bingo::CatalogItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Song {
    pub(crate) id: String,
    pub(crate) artist: String,
    pub(crate) title: String,
    pub(crate) album: String,
    pub(crate) duration: i64,
    pub(crate) filename: String,
}

impl Song {
    /// Derives the stable identifier of a song from its file path.
    ///
    /// Rescanning the library yields the same identifier for the same file,
    /// which keeps saved tickets and play history valid.
    pub(crate) fn id_for_path(filename: &str) -> String {
        format!("{:016x}", xxh3_64(filename.as_bytes()))
    }
}

impl CatalogItem for Song {
    fn item_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
pub(crate) fn test_song(n: usize) -> Song {
    let filename = format!("/music/artist-{n}/song-{n}.mp3");
    Song {
        id: Song::id_for_path(&filename),
        artist: format!("Artist {n}"),
        title: format!("Song {n}"),
        album: format!("Album {n}"),
        duration: 180,
        filename,
    }
}

#[cfg(test)]
pub(crate) fn test_songs(count: usize) -> Vec<Song> {
    (0..count).map(test_song).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_distinct() {
        let a = Song::id_for_path("/music/a.mp3");

        assert_eq!(a, Song::id_for_path("/music/a.mp3"));
        assert_ne!(a, Song::id_for_path("/music/b.mp3"));
        assert_eq!(a.len(), 16);
    }
}
