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

//! Ticket generation and win detection.
//!
//! This module is the game engine. It knows nothing about files, audio or the
//! terminal: tickets are built from any [`CatalogItem`] and checked against a
//! set of played item identifiers supplied by the caller.
//!
//! * [`combinations`]: how many distinct tickets a catalog can produce.
//! * [`generator`]: random, duplicate-free ticket batches.
//! * [`win`]: which win conditions a ticket currently satisfies.

pub(crate) mod combinations;
pub(crate) mod error;
pub(crate) mod generator;
pub(crate) mod ticket;
pub(crate) mod win;

pub(crate) use combinations::{DEFAULT_COMBINATION_CAP, max_tickets};
pub(crate) use generator::{Batch, DEFAULT_RETRY_LIMIT, TicketGenerator};
pub(crate) use ticket::{CatalogItem, Ticket};
pub(crate) use win::{WinCondition, evaluate};
