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

//! UI rendering logic for the ticket view.

use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{
    components::TicketView,
    model::{Song, tickets::TicketBook},
    theme::Theme,
};

impl TicketView {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        book: &TicketBook,
        played: &HashSet<String>,
        theme: &Theme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        self.clamp(book.len());
        let Some(ticket) = book.get(self.selected) else {
            let header = Paragraph::new("No tickets, type :gen to generate a set").block(header_block);
            f.render_widget(header, chunks[0]);
            return;
        };

        let wins = book.wins(self.selected);
        let wins_text = if wins.is_empty() {
            "none".to_string()
        } else {
            wins.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };

        let header = Line::from(vec![
            Span::styled(
                format!("Ticket {}", ticket.id),
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " ({} of {}) | {}/{} played | {} winning tickets | Wins: ",
                self.selected + 1,
                book.len(),
                ticket.played_count(played),
                ticket.cells().count(),
                book.winning_tickets(),
            )),
            Span::styled(wins_text, Style::default().fg(theme.win_colour)),
        ]);
        f.render_widget(Paragraph::new(header).block(header_block), chunks[0]);

        let rows = ticket.grid.iter().enumerate().map(|(r, row)| {
            let cells = row.iter().enumerate().map(|(c, song)| {
                if ticket.is_played(r, c, played) {
                    Cell::from(song_text(song, theme, true))
                        .style(Style::default().fg(theme.played_cell_fg).bg(theme.played_cell_bg))
                } else {
                    Cell::from(song_text(song, theme, false))
                }
            });
            Row::new(cells).height(3)
        });

        let widths = vec![Constraint::Ratio(1, ticket.size().max(1) as u32); ticket.size()];
        let table = Table::new(rows, widths)
            .block(Block::default().padding(Padding::uniform(1)))
            .column_spacing(1);

        f.render_widget(table, chunks[1]);
    }
}

fn song_text<'a>(song: &'a Song, theme: &Theme, played: bool) -> Text<'a> {
    let (title_fg, artist_fg) = if played {
        (theme.played_cell_fg, theme.played_cell_fg)
    } else {
        (theme.cell_fg, theme.cell_dim_fg)
    };

    Text::from(vec![
        Line::styled(song.title.as_str(), Style::default().fg(title_fg).add_modifier(Modifier::BOLD)),
        Line::styled(song.artist.as_str(), Style::default().fg(artist_fg)),
    ])
}
