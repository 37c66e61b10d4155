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

//! Colours used across the TUI.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) status_colour: Color,

    pub(crate) cell_fg: Color,
    pub(crate) cell_dim_fg: Color,
    pub(crate) played_cell_fg: Color,
    pub(crate) played_cell_bg: Color,
    pub(crate) win_colour: Color,

    pub(crate) table_time_fg: Color,
    pub(crate) table_artist_fg: Color,
    pub(crate) table_track_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(50, 30, 60),
            commander_colour: Color::Rgb(255, 255, 255),
            status_colour: Color::Rgb(179, 157, 219),

            cell_fg: Color::Rgb(255, 255, 255),
            cell_dim_fg: Color::Rgb(162, 161, 166),
            played_cell_fg: Color::Rgb(40, 20, 50),
            played_cell_bg: Color::Rgb(250, 189, 47),
            win_colour: Color::Rgb(120, 220, 120),

            table_time_fg: Color::Rgb(162, 161, 166),
            table_artist_fg: Color::Rgb(255, 215, 0),
            table_track_fg: Color::Rgb(255, 255, 255),
        }
    }
}

impl Theme {
    /// Converts an RGB colour into a CSS-style hexadecimal string, as used by
    /// terminal escape sequences.
    ///
    /// Returns `None` for colours that are not [`Color::Rgb`].
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_colours_convert_to_hex() {
        assert_eq!(Theme::to_hex(Color::Rgb(40, 20, 250)).as_deref(), Some("#2814fa"));
        assert_eq!(Theme::to_hex(Color::Red), None);
    }
}
