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

//! Tickets and the items they hold.

use std::collections::HashSet;

/// Anything that can be drawn onto a ticket.
///
/// The engine only ever compares identifiers; whatever else an item carries
/// is passed through untouched.
pub(crate) trait CatalogItem {
    fn item_id(&self) -> &str;
}

impl CatalogItem for String {
    fn item_id(&self) -> &str {
        self
    }
}

/// A grid of catalog items, stored row-major.
///
/// Whether a cell has been played is not part of the ticket, it is looked up
/// in the session's played-set whenever it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ticket<T> {
    pub(crate) id: String,
    pub(crate) grid: Vec<Vec<T>>,
}

impl<T: CatalogItem> Ticket<T> {
    pub(crate) fn new(id: impl Into<String>, grid: Vec<Vec<T>>) -> Self {
        Self {
            id: id.into(),
            grid,
        }
    }

    /// Number of rows in the grid.
    pub(crate) fn size(&self) -> usize {
        self.grid.len()
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = &T> {
        self.grid.iter().flatten()
    }

    pub(crate) fn cell(&self, row: usize, col: usize) -> Option<&T> {
        self.grid.get(row).and_then(|r| r.get(col))
    }

    /// Returns `true` if the cell at `row`, `col` holds a played item.
    pub(crate) fn is_played(&self, row: usize, col: usize, played: &HashSet<String>) -> bool {
        self.cell(row, col)
            .is_some_and(|item| played.contains(item.item_id()))
    }

    /// Number of cells whose item has been played.
    pub(crate) fn played_count(&self, played: &HashSet<String>) -> usize {
        self.cells()
            .filter(|item| played.contains(item.item_id()))
            .count()
    }

    /// Order-independent key identifying the set of items on this ticket.
    pub(crate) fn signature(&self) -> String {
        signature_of(self.cells())
    }
}

/// Builds the canonical signature for a collection of items: their sorted
/// identifiers joined with a separator that cannot be confused with a
/// concatenation of two shorter ids.
pub(crate) fn signature_of<'a, T, I>(items: I) -> String
where
    T: CatalogItem + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut ids: Vec<&str> = items.into_iter().map(CatalogItem::item_id).collect();
    ids.sort_unstable();
    ids.join("\u{1f}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(rows: &[&[&str]]) -> Ticket<String> {
        Ticket::new(
            "1",
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn signature_ignores_layout() {
        let a = ticket(&[&["a", "b"], &["c", "d"]]);
        let b = ticket(&[&["d", "c"], &["a", "b"]]);
        let c = ticket(&[&["a", "b"], &["c", "e"]]);

        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.signature(), c.signature());
    }

    #[test]
    fn signature_does_not_merge_ids() {
        let a = ticket(&[&["ab", "c"]]);
        let b = ticket(&[&["a", "bc"]]);

        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn played_overlay_is_derived_from_the_set() {
        let t = ticket(&[&["a", "b"], &["c", "d"]]);
        let played: HashSet<String> = ["b", "d", "z"].iter().map(|s| s.to_string()).collect();

        assert!(!t.is_played(0, 0, &played));
        assert!(t.is_played(0, 1, &played));
        assert!(t.is_played(1, 1, &played));
        assert!(!t.is_played(5, 5, &played));
        assert_eq!(t.played_count(&played), 2);
    }
}
