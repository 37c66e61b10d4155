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

//! The tickets in play and their win status.

use std::collections::HashSet;

use crate::{
    bingo::{Ticket, WinCondition, evaluate},
    model::Song,
};

/// A win condition newly satisfied by a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Achievement {
    pub(crate) ticket_id: String,
    pub(crate) condition: WinCondition,
}

pub(crate) struct TicketBook {
    tickets: Vec<Ticket<Song>>,
    wins: Vec<Vec<WinCondition>>,
}

impl TicketBook {
    pub(crate) fn new() -> Self {
        Self {
            tickets: vec![],
            wins: vec![],
        }
    }

    /// Replaces every ticket. Win status starts empty until the next refresh.
    pub(crate) fn set_tickets(&mut self, tickets: Vec<Ticket<Song>>) {
        self.wins = vec![vec![]; tickets.len()];
        self.tickets = tickets;
    }

    pub(crate) fn push(&mut self, ticket: Ticket<Song>) {
        self.tickets.push(ticket);
        self.wins.push(vec![]);
    }

    pub(crate) fn tickets(&self) -> &[Ticket<Song>] {
        &self.tickets
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Ticket<Song>> {
        self.tickets.get(idx)
    }

    pub(crate) fn position(&self, ticket_id: &str) -> Option<usize> {
        self.tickets.iter().position(|t| t.id == ticket_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.tickets.len()
    }

    pub(crate) fn wins(&self, idx: usize) -> &[WinCondition] {
        self.wins.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of tickets currently satisfying at least one win condition.
    pub(crate) fn winning_tickets(&self) -> usize {
        self.wins.iter().filter(|w| !w.is_empty()).count()
    }

    pub(crate) fn signatures(&self) -> HashSet<String> {
        self.tickets.iter().map(Ticket::signature).collect()
    }

    /// Re-evaluates every ticket against the played-set.
    ///
    /// Returns the wins that were not held at the previous refresh, in ticket
    /// order. Wins that no longer hold (after a reset) are simply dropped.
    pub(crate) fn refresh(&mut self, played: &HashSet<String>) -> Vec<Achievement> {
        let mut achieved = vec![];

        for (ticket, previous) in self.tickets.iter().zip(self.wins.iter_mut()) {
            let current = evaluate(&ticket.grid, played);

            achieved.extend(
                current
                    .iter()
                    .filter(|c| !previous.contains(c))
                    .map(|&condition| Achievement {
                        ticket_id: ticket.id.clone(),
                        condition,
                    }),
            );

            *previous = current;
        }

        achieved
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::test_songs;

    fn book() -> (TicketBook, Vec<Song>) {
        let songs = test_songs(8);
        let a = Ticket::new(
            "1",
            vec![
                vec![songs[0].clone(), songs[1].clone()],
                vec![songs[2].clone(), songs[3].clone()],
            ],
        );
        let b = Ticket::new(
            "2",
            vec![
                vec![songs[4].clone(), songs[5].clone()],
                vec![songs[6].clone(), songs[7].clone()],
            ],
        );

        let mut book = TicketBook::new();
        book.set_tickets(vec![a, b]);
        (book, songs)
    }

    fn played(songs: &[Song], idx: &[usize]) -> HashSet<String> {
        idx.iter().map(|&i| songs[i].id.clone()).collect()
    }

    #[test]
    fn reports_each_win_once() {
        let (mut book, songs) = book();

        assert!(book.refresh(&played(&songs, &[0])).is_empty());

        let first = book.refresh(&played(&songs, &[0, 1]));
        assert_eq!(
            first,
            vec![Achievement {
                ticket_id: "1".to_string(),
                condition: WinCondition::SingleLine,
            }]
        );
        assert_eq!(book.wins(0), &[WinCondition::SingleLine]);
        assert_eq!(book.winning_tickets(), 1);

        // a 2x2 row plus a column also completes a diagonal
        let second = book.refresh(&played(&songs, &[0, 1, 2]));
        let conditions: Vec<WinCondition> = second.iter().map(|a| a.condition).collect();
        assert_eq!(conditions, vec![WinCondition::DoubleLine]);

        assert!(book.refresh(&played(&songs, &[0, 1, 2])).is_empty());
    }

    #[test]
    fn reset_drops_previous_wins() {
        let (mut book, songs) = book();
        book.refresh(&played(&songs, &[4, 5, 6, 7]));
        assert_eq!(book.wins(1).last(), Some(&WinCondition::FullHouse));

        assert!(book.refresh(&HashSet::new()).is_empty());
        assert!(book.wins(1).is_empty());
        assert_eq!(book.winning_tickets(), 0);
    }

    #[test]
    fn lookup_by_id_and_signature() {
        let (mut book, songs) = book();
        assert_eq!(book.position("2"), Some(1));
        assert_eq!(book.position("9"), None);
        assert_eq!(book.signatures().len(), 2);

        book.push(Ticket::new("3", vec![vec![songs[0].clone()]]));
        assert_eq!(book.len(), 3);
        assert!(book.wins(2).is_empty());
        assert!(book.wins(7).is_empty());
    }
}
