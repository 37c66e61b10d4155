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

//! User interface rendering.
//!
//! [`draw`] is called after every handled event. It lays the screen out as
//! the current main view, the player panel and the command line.

mod commander;
mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    App, MainView,
    render::{commander::draw_commander, player::draw_player},
};

pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5), Constraint::Length(1)])
        .split(f.area());

    match app.main_view {
        MainView::Tickets => app.ticket_view.draw(
            f,
            outer[0],
            &app.ticket_book,
            app.session.played_ids(),
            &app.theme,
        ),
        MainView::Session => app.session_view.draw(f, outer[0], &app.session, &app.theme),
        MainView::Catalog => app.catalog_view.draw(
            f,
            outer[0],
            &app.catalog,
            app.config.grid_size,
            app.config.combination_cap,
            &app.theme,
        ),
    }

    draw_player(f, outer[1], app);
    draw_commander(f, outer[2], app);
}
