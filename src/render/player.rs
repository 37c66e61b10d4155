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

//! Render the player panel: the called song, elapsed time, volume and the
//! playback position.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util::format::format_time,
};

const MAX_VOLUME: f64 = 130.0;

pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);

    let info = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(rows[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let accent = bold.fg(app.theme.accent_colour);

    let icon = match app.player_state {
        PlayerState::Playing => ICON_PLAY,
        PlayerState::Paused => ICON_PAUSE,
        PlayerState::Stopped => ICON_STOP,
    };

    let song_line = match app.session.current() {
        Some(song) => Line::from(vec![
            Span::styled(format!(" {} ", icon), bold),
            Span::styled(format!("#{} ", app.session.played().len()), bold),
            Span::styled(song.title.as_str(), accent),
            Span::raw(" by "),
            Span::styled(song.artist.as_str(), accent),
        ]),
        None => Line::from(vec![
            Span::styled(format!(" {} ", icon), bold),
            Span::raw("Press n to call the first song"),
        ]),
    };
    f.render_widget(Paragraph::new(song_line), info[0]);

    let duration = app.player_duration.unwrap_or(0);
    let time = app.player_time.unwrap_or(0);
    let volume = app.volume.unwrap_or(0);

    let time_line = Line::from(vec![
        Span::styled(format_time(time), accent),
        Span::styled(" / ", bold),
        Span::styled(format_time(duration), accent),
        Span::styled(format!("  vol {}%", volume), bold),
    ]);
    f.render_widget(Paragraph::new(time_line).alignment(Alignment::Right), info[1]);

    let position = if duration > 0 {
        (time as f64 / duration as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(2), Constraint::Length(20)])
        .split(rows[2]);

    let position_gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.accent_colour).bg(app.theme.gauge_track_colour))
        .ratio(position)
        .label("")
        .use_unicode(true);
    f.render_widget(position_gauge, gauges[0]);

    let volume_gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.accent_colour).bg(app.theme.gauge_track_colour))
        .ratio((f64::from(volume) / MAX_VOLUME).clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, gauges[2]);
}
