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

//! Browsing the tickets in play, one ticket at a time.

mod render;

/// Selection state of the ticket view.
pub(crate) struct TicketView {
    selected: usize,
}

impl TicketView {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn select(&mut self, idx: usize) {
        self.selected = idx;
    }

    /// Moves to the next ticket, wrapping around after the last one.
    pub(crate) fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub(crate) fn previous(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Keeps the selection within a ticket book of `len` tickets.
    pub(crate) fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps() {
        let mut view = TicketView::new();

        view.previous(3);
        assert_eq!(view.selected(), 2);
        view.next(3);
        assert_eq!(view.selected(), 0);
        view.next(3);
        assert_eq!(view.selected(), 1);
    }

    #[test]
    fn empty_book_keeps_the_first_slot() {
        let mut view = TicketView::new();

        view.next(0);
        view.previous(0);
        assert_eq!(view.selected(), 0);

        view.select(7);
        view.clamp(0);
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn clamp_follows_a_shrinking_book() {
        let mut view = TicketView::new();
        view.select(9);
        view.clamp(4);
        assert_eq!(view.selected(), 3);
    }
}
