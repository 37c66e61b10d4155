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

//! Render the command line.
//!
//! While a command is being typed the line shows the input and the cursor,
//! otherwise it shows the latest status message.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::App;

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let style = Style::default().bg(app.theme.gauge_track_colour);

    if commander.active() {
        f.render_widget(Paragraph::new(":").style(style.fg(app.theme.commander_colour)), container[0]);
        f.render_widget(
            Paragraph::new(commander.input.value()).style(style.fg(app.theme.commander_colour)),
            container[1],
        );

        let cursor_x = container[1].x + commander.input.visual_cursor() as u16;
        f.set_cursor_position((cursor_x, container[1].y));
    } else {
        f.render_widget(Paragraph::new("").style(style), container[0]);
        f.render_widget(
            Paragraph::new(app.status.as_deref().unwrap_or_default()).style(style.fg(app.theme.status_colour)),
            container[1],
        );
    }
}
