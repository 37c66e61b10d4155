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

//! Plain-text ticket export.
//!
//! Tickets are written as `key=value` lines, one per cell, where the key is
//! `<ticket id>.<row>.<col>` and the value is the song identifier. Each
//! ticket is preceded by a `#` comment line describing it.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::bingo::{CatalogItem, Ticket};

pub(crate) fn write_tickets<W: Write, T: CatalogItem>(out: &mut W, tickets: &[Ticket<T>]) -> io::Result<()> {
    for ticket in tickets {
        let cols = ticket.grid.first().map_or(0, Vec::len);
        writeln!(out, "# Ticket {}: {}x{}", ticket.id, ticket.size(), cols)?;

        for (r, row) in ticket.grid.iter().enumerate() {
            for (c, item) in row.iter().enumerate() {
                writeln!(out, "{}.{}.{}={}", ticket.id, r, c, item.item_id())?;
            }
        }
    }

    Ok(())
}

/// Writes all tickets to the file at `path`, replacing it.
pub(crate) fn export_tickets<T: CatalogItem>(path: &Path, tickets: &[Ticket<T>]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write_tickets(&mut out, tickets).with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ticket(id: &str, rows: &[&[&str]]) -> Ticket<String> {
        Ticket::new(
            id,
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn writes_one_line_per_cell() {
        let tickets = vec![
            ticket("1", &[&["a", "b"], &["c", "d"]]),
            ticket("2", &[&["e", "f"], &["g", "h"]]),
        ];

        let mut out = Vec::new();
        write_tickets(&mut out, &tickets).unwrap();

        let expected = "\
# Ticket 1: 2x2
1.0.0=a
1.0.1=b
1.1.0=c
1.1.1=d
# Ticket 2: 2x2
2.0.0=e
2.0.1=f
2.1.0=g
2.1.1=h
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn exports_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.txt");

        export_tickets(&path, &[ticket("7", &[&["x"]])]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Ticket 7: 1x1\n7.0.0=x\n");
    }
}
