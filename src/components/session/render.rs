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

//! UI rendering logic for the session view.
//!
//! Songs are listed in call order with the most recent call highlighted and
//! kept in view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{components::SessionView, model::session::Session, theme::Theme, util::format::format_time};

impl SessionView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let header = format!(
            "Session | {} played | {} remaining",
            session.played().len(),
            session.remaining()
        );
        f.render_widget(Paragraph::new(header).block(header_block), chunks[0]);

        let rows = session.played().iter().enumerate().map(|(i, song)| {
            let duration = u64::try_from(song.duration).unwrap_or(0);

            Row::new(vec![
                Cell::from(Line::from(format!("{}", i + 1)).alignment(Alignment::Right)),
                Cell::from(
                    Line::from(format_time(duration))
                        .style(Style::default().fg(theme.table_time_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(Line::from(song.artist.as_str()).style(Style::default().fg(theme.table_artist_fg))),
                Cell::from(Line::from(song.title.as_str()).style(Style::default().fg(theme.table_track_fg))),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Percentage(35),
                Constraint::Percentage(65),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from(Line::from("Time").alignment(Alignment::Right)),
                Cell::from("Artist"),
                Cell::from("Title"),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD).fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().fg(theme.played_cell_fg).bg(theme.played_cell_bg))
        .column_spacing(2)
        .block(Block::default().padding(Padding::horizontal(1)));

        self.table_state
            .select(session.played().len().checked_sub(1));
        f.render_stateful_widget(table, chunks[1], &mut self.table_state);
    }
}
