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

//! Random ticket generation.
//!
//! Each ticket is drawn from a fresh uniform shuffle of the whole catalog: the
//! first `grid_size * grid_size` songs of the shuffle are laid out row by row.
//! Within one batch no two tickets may hold the same set of songs, so every
//! slot is retried until it produces an unseen signature or its attempts run
//! out. Running out ends the batch early; the tickets produced so far are
//! still returned.

use std::collections::HashSet;

use log::debug;
use rand::{Rng, seq::SliceRandom};

use crate::bingo::{
    combinations::{DEFAULT_COMBINATION_CAP, max_tickets},
    error::BingoError,
    ticket::{CatalogItem, Ticket},
};

/// Attempts allowed per ticket slot before a batch gives up.
pub(crate) const DEFAULT_RETRY_LIMIT: usize = 200;

/// Outcome of a batch request.
///
/// Holding fewer tickets than requested is a normal outcome once a catalog
/// nears its combinatorial limit.
#[derive(Debug, Clone)]
pub(crate) struct Batch<T> {
    pub(crate) tickets: Vec<Ticket<T>>,
    pub(crate) requested: usize,
}

impl<T> Batch<T> {
    pub(crate) fn produced(&self) -> usize {
        self.tickets.len()
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.tickets.len() >= self.requested
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TicketGenerator {
    grid_size: usize,
    retry_limit: usize,
}

impl TicketGenerator {
    pub(crate) fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    /// Overrides the per-slot attempt limit. A limit of zero is treated as
    /// one attempt.
    pub(crate) fn with_retry_limit(mut self, retry_limit: usize) -> Self {
        self.retry_limit = retry_limit.max(1);
        self
    }

    fn cells_per_ticket(&self) -> usize {
        self.grid_size * self.grid_size
    }

    fn check_catalog(&self, available: usize) -> Result<(), BingoError> {
        let required = self.cells_per_ticket();
        if available < required {
            return Err(BingoError::CatalogTooSmall {
                grid_size: self.grid_size,
                required,
                available,
            });
        }

        Ok(())
    }

    /// Generates a single ticket with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BingoError::CatalogTooSmall`] if the catalog cannot fill one
    /// grid.
    pub(crate) fn generate_ticket<T, R>(
        &self,
        catalog: &[T],
        id: impl Into<String>,
        rng: &mut R,
    ) -> Result<Ticket<T>, BingoError>
    where
        T: CatalogItem + Clone,
        R: Rng + ?Sized,
    {
        self.check_catalog(catalog.len())?;

        let mut order: Vec<usize> = (0..catalog.len()).collect();
        Ok(self.draw(catalog, &mut order, id.into(), rng))
    }

    /// Generates a single ticket whose song set matches none of the
    /// `existing` signatures.
    ///
    /// Returns `Ok(None)` once the retry limit is used up without a new song
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`BingoError::CatalogTooSmall`] if the catalog cannot fill one
    /// grid.
    pub(crate) fn generate_ticket_excluding<T, R>(
        &self,
        catalog: &[T],
        id: impl Into<String>,
        existing: &HashSet<String>,
        rng: &mut R,
    ) -> Result<Option<Ticket<T>>, BingoError>
    where
        T: CatalogItem + Clone,
        R: Rng + ?Sized,
    {
        self.check_catalog(catalog.len())?;

        let mut order: Vec<usize> = (0..catalog.len()).collect();
        Ok(self.draw_unique(catalog, &mut order, &id.into(), existing, rng))
    }

    /// Generates up to `count` tickets with pairwise distinct song sets.
    ///
    /// Tickets are numbered from "1" in the order they were produced.
    ///
    /// # Errors
    ///
    /// Returns [`BingoError::CatalogTooSmall`] before doing any work if the
    /// catalog cannot fill one grid. Exhausted retries are not an error, see
    /// [`Batch::is_complete`].
    pub(crate) fn generate_batch<T, R>(
        &self,
        catalog: &[T],
        count: usize,
        rng: &mut R,
    ) -> Result<Batch<T>, BingoError>
    where
        T: CatalogItem + Clone,
        R: Rng + ?Sized,
    {
        self.check_catalog(catalog.len())?;

        // Never reserve beyond what the catalog can produce.
        let possible = max_tickets(catalog.len(), self.grid_size, DEFAULT_COMBINATION_CAP);
        let reserve = count.min(usize::try_from(possible).unwrap_or(usize::MAX));

        let mut order: Vec<usize> = (0..catalog.len()).collect();
        let mut seen: HashSet<String> = HashSet::with_capacity(reserve);
        let mut tickets = Vec::with_capacity(reserve);

        for slot in 1..=count {
            let Some(ticket) = self.draw_unique(catalog, &mut order, &slot.to_string(), &seen, rng) else {
                debug!(
                    "No unique ticket for slot {} after {} attempts",
                    slot, self.retry_limit
                );
                break;
            };

            seen.insert(ticket.signature());
            tickets.push(ticket);
        }

        Ok(Batch {
            tickets,
            requested: count,
        })
    }

    // Draws until a ticket's signature is not in `seen`, at most `retry_limit`
    // times.
    fn draw_unique<T, R>(
        &self,
        catalog: &[T],
        order: &mut [usize],
        id: &str,
        seen: &HashSet<String>,
        rng: &mut R,
    ) -> Option<Ticket<T>>
    where
        T: CatalogItem + Clone,
        R: Rng + ?Sized,
    {
        for _ in 0..self.retry_limit {
            let ticket = self.draw(catalog, order, id.to_string(), rng);
            if !seen.contains(&ticket.signature()) {
                return Some(ticket);
            }
        }

        None
    }

    // Shuffles the full index order and lays the leading cells out row-major.
    fn draw<T, R>(&self, catalog: &[T], order: &mut [usize], id: String, rng: &mut R) -> Ticket<T>
    where
        T: CatalogItem + Clone,
        R: Rng + ?Sized,
    {
        order.shuffle(rng);

        let grid = order[..self.cells_per_ticket()]
            .chunks(self.grid_size.max(1))
            .map(|row| row.iter().map(|&i| catalog[i].clone()).collect())
            .collect();

        Ticket { id, grid }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::bingo::ticket::signature_of;

    fn catalog(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("song-{i:03}")).collect()
    }

    #[test]
    fn tickets_have_the_configured_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        for grid_size in 1..=5 {
            let generator = TicketGenerator::new(grid_size);
            let batch = generator
                .generate_batch(&catalog(40), 10, &mut rng)
                .unwrap();

            assert_eq!(batch.produced(), 10);
            for ticket in &batch.tickets {
                assert_eq!(ticket.grid.len(), grid_size);
                assert!(ticket.grid.iter().all(|row| row.len() == grid_size));

                let ids: HashSet<&str> = ticket.cells().map(|s| s.as_str()).collect();
                assert_eq!(ids.len(), grid_size * grid_size);
            }
        }
    }

    #[test]
    fn batch_ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(2);
        let batch = TicketGenerator::new(3)
            .generate_batch(&catalog(20), 4, &mut rng)
            .unwrap();

        let ids: Vec<&str> = batch.tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn batch_has_no_duplicate_song_sets() {
        let mut rng = StdRng::seed_from_u64(3);
        // C(11, 9) = 55, so collisions are frequent
        let batch = TicketGenerator::new(3)
            .generate_batch(&catalog(11), 40, &mut rng)
            .unwrap();

        let signatures: HashSet<String> = batch.tickets.iter().map(Ticket::signature).collect();
        assert_eq!(signatures.len(), batch.produced());
    }

    #[test]
    fn batch_stops_early_when_the_catalog_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(4);
        // C(10, 9) = 10 distinct tickets at most
        let batch = TicketGenerator::new(3)
            .generate_batch(&catalog(10), 25, &mut rng)
            .unwrap();

        assert!(!batch.is_complete());
        assert_eq!(batch.requested, 25);
        assert!(batch.produced() <= 10);
        assert!(batch.produced() >= 1);
    }

    #[test]
    fn oversized_request_returns_a_partial_batch() {
        let mut rng = StdRng::seed_from_u64(1);
        let batch = TicketGenerator::new(3)
            .generate_batch(&catalog(10), 1usize << 40, &mut rng)
            .unwrap();

        assert_eq!(batch.requested, 1usize << 40);
        assert!(!batch.is_complete());
        assert!((1..=10).contains(&batch.produced()));
    }

    // Every 3x3 ticket from 10 songs leaves exactly one song out.
    fn signatures_without(songs: &[String], left_out: &[usize]) -> HashSet<String> {
        left_out
            .iter()
            .map(|&skip| {
                signature_of(
                    songs
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != skip)
                        .map(|(_, s)| s),
                )
            })
            .collect()
    }

    #[test]
    fn excluding_finds_the_one_remaining_song_set() {
        let songs = catalog(10);
        let existing = signatures_without(&songs, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let mut rng = StdRng::seed_from_u64(12);

        let ticket = TicketGenerator::new(3)
            .generate_ticket_excluding(&songs, "extra", &existing, &mut rng)
            .unwrap()
            .expect("one song set is still free");

        assert_eq!(ticket.id, "extra");
        assert!(!existing.contains(&ticket.signature()));
        assert!(!ticket.cells().any(|s| s == &songs[9]));
    }

    #[test]
    fn excluding_gives_up_when_every_song_set_is_taken() {
        let songs = catalog(10);
        let existing = signatures_without(&songs, &(0..10).collect::<Vec<_>>());
        let mut rng = StdRng::seed_from_u64(13);

        let ticket = TicketGenerator::new(3)
            .with_retry_limit(20)
            .generate_ticket_excluding(&songs, "extra", &existing, &mut rng)
            .unwrap();

        assert_eq!(ticket, None);
    }

    #[test]
    fn single_ticket_rejects_a_small_catalog() {
        let mut rng = StdRng::seed_from_u64(14);
        let generator = TicketGenerator::new(4);

        assert_eq!(
            generator.generate_ticket(&catalog(15), "1", &mut rng),
            Err(BingoError::CatalogTooSmall {
                grid_size: 4,
                required: 16,
                available: 15,
            })
        );
        assert!(
            generator
                .generate_ticket_excluding(&catalog(3), "1", &HashSet::new(), &mut rng)
                .is_err()
        );
    }

    #[test]
    fn exact_catalog_yields_a_single_ticket() {
        let mut rng = StdRng::seed_from_u64(5);
        let batch = TicketGenerator::new(3)
            .with_retry_limit(5)
            .generate_batch(&catalog(9), 3, &mut rng)
            .unwrap();

        assert_eq!(batch.produced(), 1);
        assert_eq!(batch.tickets[0].id, "1");
    }

    #[test]
    fn small_catalog_is_rejected_before_any_work() {
        let mut rng = StdRng::seed_from_u64(6);
        let err = TicketGenerator::new(5)
            .generate_batch(&catalog(24), 3, &mut rng)
            .unwrap_err();

        assert_eq!(
            err,
            BingoError::CatalogTooSmall {
                grid_size: 5,
                required: 25,
                available: 24,
            }
        );

        let message = err.to_string();
        assert!(message.contains("5x5"));
        assert!(message.contains("25"));
        assert!(message.contains("24"));
    }

    #[test]
    fn single_ticket_uses_the_given_id() {
        let mut rng = StdRng::seed_from_u64(7);
        let ticket = TicketGenerator::new(4)
            .generate_ticket(&catalog(16), "extra", &mut rng)
            .unwrap();

        assert_eq!(ticket.id, "extra");
        assert_eq!(ticket.size(), 4);
        assert_eq!(signature_of(&catalog(16)), ticket.signature());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let generator = TicketGenerator::new(4);
        let songs = catalog(30);

        let a = generator
            .generate_batch(&songs, 5, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = generator
            .generate_batch(&songs, 5, &mut StdRng::seed_from_u64(99))
            .unwrap();

        assert_eq!(a.tickets, b.tickets);
    }

    #[test]
    fn zero_count_yields_an_empty_complete_batch() {
        let mut rng = StdRng::seed_from_u64(8);
        let batch = TicketGenerator::new(3)
            .generate_batch(&catalog(9), 0, &mut rng)
            .unwrap();

        assert!(batch.tickets.is_empty());
        assert!(batch.is_complete());
    }
}
