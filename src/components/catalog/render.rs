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

//! UI rendering logic for the catalog view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{
    components::CatalogView,
    model::catalog::{Catalog, CatalogStatus},
    theme::Theme,
    util::format::format_capacity,
};

impl CatalogView {
    pub(crate) fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        catalog: &Catalog,
        grid_size: usize,
        cap: u64,
        theme: &Theme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let status = match catalog.status {
            CatalogStatus::Idle => "Idle".to_string(),
            CatalogStatus::Scanning => format!("Scanning... {} files", catalog.scanned_files()),
            CatalogStatus::Finished => "Scan complete".to_string(),
        };

        let capacity = catalog.ticket_capacity(grid_size, cap);
        let header = vec![
            Line::from(format!("Media Catalog ({}) | {} songs", status, catalog.len())),
            Line::from(vec![
                Span::raw(format!("Distinct {}x{} tickets: ", grid_size, grid_size)),
                Span::styled(
                    format_capacity(capacity, cap),
                    Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        f.render_widget(Paragraph::new(header).block(header_block), chunks[0]);

        let header_row = Row::new(vec![
            Cell::from("Status"),
            Cell::from(Line::from("Count").alignment(Alignment::Right)),
            Cell::from("Directory"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(theme.accent_colour))
        .bottom_margin(1);

        let rows = catalog.directory_status.iter().map(|dir| {
            let (status_text, status_style) = match dir.status {
                CatalogStatus::Idle => ("Pending", Style::default().fg(theme.cell_dim_fg)),
                CatalogStatus::Scanning => (
                    "Scanning",
                    Style::default()
                        .fg(theme.accent_colour)
                        .add_modifier(Modifier::ITALIC),
                ),
                CatalogStatus::Finished => ("Done", Style::default().fg(theme.win_colour)),
            };

            Row::new(vec![
                Cell::from(status_text).style(status_style),
                Cell::from(Line::from(dir.count.to_string()).alignment(Alignment::Right)),
                Cell::from(dir.name.as_str()),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Min(20),
            ],
        )
        .header(header_row)
        .block(Block::default().padding(Padding::horizontal(1)))
        .column_spacing(2);

        f.render_widget(table, chunks[1]);
    }
}
