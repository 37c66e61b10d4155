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

//! Game session state.
//!
//! A session owns the call order, a shuffled queue of the songs that have not
//! been played yet, and the history of songs already called. The played-set
//! derived from that history is the single source of truth for win checks.
//! It only grows until the session is reset.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::{Rng, seq::SliceRandom};

use crate::model::Song;

pub(crate) struct Session {
    queued: VecDeque<Song>,
    played: Vec<Song>,
    played_ids: HashSet<String>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            played: Vec::new(),
            played_ids: HashSet::new(),
        }
    }

    /// Starts the session over for the given catalog.
    ///
    /// Songs listed in `history` (by identifier, oldest first) are restored as
    /// already played; identifiers no longer in the catalog are skipped. Every
    /// other song is queued in random order.
    pub(crate) fn start<R: Rng + ?Sized>(&mut self, songs: &[Song], history: &[String], rng: &mut R) {
        let by_id: HashMap<&str, &Song> = songs.iter().map(|s| (s.id.as_str(), s)).collect();

        self.played.clear();
        self.played_ids.clear();

        for id in history {
            if let Some(song) = by_id.get(id.as_str()) {
                if self.played_ids.insert(song.id.clone()) {
                    self.played.push((*song).clone());
                }
            }
        }

        let mut queued: Vec<Song> = songs
            .iter()
            .filter(|s| !self.played_ids.contains(&s.id))
            .cloned()
            .collect();
        queued.shuffle(rng);

        self.queued = queued.into();
    }

    /// Clears the history and reshuffles the whole catalog.
    pub(crate) fn reset<R: Rng + ?Sized>(&mut self, songs: &[Song], rng: &mut R) {
        self.start(songs, &[], rng);
    }

    /// Calls the next song, moving it from the queue into the history.
    pub(crate) fn next(&mut self) -> Option<&Song> {
        let song = self.queued.pop_front()?;
        self.played_ids.insert(song.id.clone());
        self.played.push(song);

        self.played.last()
    }

    pub(crate) fn current(&self) -> Option<&Song> {
        self.played.last()
    }

    pub(crate) fn played(&self) -> &[Song] {
        &self.played
    }

    pub(crate) fn played_ids(&self) -> &HashSet<String> {
        &self.played_ids
    }

    pub(crate) fn remaining(&self) -> usize {
        self.queued.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::model::test_songs;

    #[test]
    fn calls_every_song_exactly_once() {
        let songs = test_songs(12);
        let mut session = Session::new();
        session.start(&songs, &[], &mut StdRng::seed_from_u64(1));

        let mut called = HashSet::new();
        while let Some(song) = session.next() {
            assert!(called.insert(song.id.clone()));
        }

        assert_eq!(called.len(), 12);
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.played_ids().len(), 12);
        assert!(session.next().is_none());
    }

    #[test]
    fn restores_history_in_order() {
        let songs = test_songs(6);
        let history = vec![
            songs[4].id.clone(),
            "missing".to_string(),
            songs[1].id.clone(),
            songs[4].id.clone(),
        ];

        let mut session = Session::new();
        session.start(&songs, &history, &mut StdRng::seed_from_u64(2));

        let played: Vec<&str> = session.played().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(played, vec![songs[4].id.as_str(), songs[1].id.as_str()]);
        assert_eq!(session.current().map(|s| s.id.as_str()), Some(songs[1].id.as_str()));
        assert_eq!(session.remaining(), 4);

        while let Some(song) = session.next() {
            assert_ne!(song.id, songs[4].id);
            assert_ne!(song.id, songs[1].id);
        }
    }

    #[test]
    fn reset_clears_the_played_set() {
        let songs = test_songs(5);
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::new();
        session.start(&songs, &[], &mut rng);
        session.next();
        session.next();

        session.reset(&songs, &mut rng);

        assert!(session.played_ids().is_empty());
        assert!(session.current().is_none());
        assert_eq!(session.remaining(), 5);
    }
}
