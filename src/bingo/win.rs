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

//! Win detection.
//!
//! Win status is recomputed from the played-set on every call; nothing about
//! a ticket is ever marked in place. Rows, columns and (on square grids) the
//! two diagonals all count towards one shared total of completed lines.

use std::{collections::HashSet, fmt};

use crate::bingo::ticket::CatalogItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum WinCondition {
    SingleLine,
    DoubleLine,
    FourCorners,
    FullHouse,
}

impl fmt::Display for WinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WinCondition::SingleLine => "Single Line",
            WinCondition::DoubleLine => "Double Line",
            WinCondition::FourCorners => "Four Corners",
            WinCondition::FullHouse => "Full House",
        };
        f.write_str(name)
    }
}

/// Evaluates every win condition for a grid against the played-set.
///
/// The result is ordered as [`WinCondition`] is declared. An empty grid, or
/// one whose first row is empty, satisfies nothing.
pub(crate) fn evaluate<T: CatalogItem>(grid: &[Vec<T>], played: &HashSet<String>) -> Vec<WinCondition> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return vec![];
    }

    let is_played = |row: usize, col: usize| {
        grid.get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|item| played.contains(item.item_id()))
    };

    let complete_rows = (0..rows)
        .filter(|&r| (0..cols).all(|c| is_played(r, c)))
        .count();

    let complete_cols = (0..cols)
        .filter(|&c| (0..rows).all(|r| is_played(r, c)))
        .count();

    let complete_diagonals = if rows == cols {
        let down = (0..rows).all(|i| is_played(i, i));
        let up = (0..rows).all(|i| is_played(i, cols - 1 - i));
        usize::from(down) + usize::from(up)
    } else {
        0
    };

    let lines = complete_rows + complete_cols + complete_diagonals;

    let mut wins = Vec::new();

    if lines >= 1 {
        wins.push(WinCondition::SingleLine);
    }

    if lines >= 2 {
        wins.push(WinCondition::DoubleLine);
    }

    if rows >= 2
        && cols >= 2
        && is_played(0, 0)
        && is_played(0, cols - 1)
        && is_played(rows - 1, 0)
        && is_played(rows - 1, cols - 1)
    {
        wins.push(WinCondition::FourCorners);
    }

    let full_house = grid
        .iter()
        .flatten()
        .all(|item| played.contains(item.item_id()));

    if full_house {
        wins.push(WinCondition::FullHouse);
    }

    wins
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{WinCondition::*, *};

    fn grid(rows: usize, cols: usize) -> Vec<Vec<String>> {
        (0..rows)
            .map(|r| (0..cols).map(|c| format!("{r}:{c}")).collect())
            .collect()
    }

    fn played(cells: &[(usize, usize)]) -> HashSet<String> {
        cells.iter().map(|(r, c)| format!("{r}:{c}")).collect()
    }

    fn row(r: usize, cols: usize) -> Vec<(usize, usize)> {
        (0..cols).map(|c| (r, c)).collect()
    }

    #[test]
    fn one_row_is_a_single_line() {
        let wins = evaluate(&grid(5, 5), &played(&row(0, 5)));
        assert_eq!(wins, vec![SingleLine]);
    }

    #[test]
    fn two_rows_are_a_double_line() {
        let mut cells = row(0, 5);
        cells.extend(row(1, 5));

        let wins = evaluate(&grid(5, 5), &played(&cells));
        assert_eq!(wins, vec![SingleLine, DoubleLine]);
    }

    #[test]
    fn every_cell_is_a_full_house() {
        let cells: Vec<_> = (0..5).flat_map(|r| row(r, 5)).collect();

        let wins = evaluate(&grid(5, 5), &played(&cells));
        assert_eq!(wins, vec![SingleLine, DoubleLine, FourCorners, FullHouse]);
    }

    #[test]
    fn corners_alone_are_four_corners() {
        let wins = evaluate(&grid(5, 5), &played(&[(0, 0), (0, 4), (4, 0), (4, 4)]));
        assert_eq!(wins, vec![FourCorners]);
    }

    #[test]
    fn empty_grid_has_no_wins() {
        let empty: Vec<Vec<String>> = vec![];
        assert!(evaluate(&empty, &played(&[(0, 0)])).is_empty());

        let no_columns: Vec<Vec<String>> = vec![vec![], vec![]];
        assert!(evaluate(&no_columns, &HashSet::new()).is_empty());
    }

    #[test]
    fn columns_count_as_lines() {
        let column: Vec<_> = (0..4).map(|r| (r, 2)).collect();
        assert_eq!(evaluate(&grid(4, 4), &played(&column)), vec![SingleLine]);
    }

    #[test]
    fn diagonals_count_as_lines() {
        let down: Vec<_> = (0..3).map(|i| (i, i)).collect();
        assert_eq!(evaluate(&grid(3, 3), &played(&down)), vec![SingleLine]);

        let mut both = down.clone();
        both.extend((0..3).map(|i| (i, 2 - i)));
        assert_eq!(
            evaluate(&grid(3, 3), &played(&both)),
            vec![SingleLine, DoubleLine, FourCorners]
        );
    }

    #[test]
    fn row_and_diagonal_make_a_double_line() {
        let mut cells = row(0, 4);
        cells.extend((0..4).map(|i| (i, i)));

        assert_eq!(
            evaluate(&grid(4, 4), &played(&cells)),
            vec![SingleLine, DoubleLine]
        );
    }

    #[test]
    fn non_square_grids_skip_diagonals() {
        let down: Vec<_> = (0..3).map(|i| (i, i)).collect();
        assert!(evaluate(&grid(3, 4), &played(&down)).is_empty());

        assert_eq!(evaluate(&grid(3, 4), &played(&row(1, 4))), vec![SingleLine]);
    }

    #[test]
    fn tiny_grids_have_no_corners() {
        assert_eq!(
            evaluate(&grid(1, 1), &played(&[(0, 0)])),
            vec![SingleLine, DoubleLine, FullHouse]
        );

        // each column of a single row grid is complete on its own
        assert_eq!(
            evaluate(&grid(1, 3), &played(&row(0, 3))),
            vec![SingleLine, DoubleLine, FullHouse]
        );
    }

    #[test]
    fn unrelated_plays_have_no_effect() {
        let wins = evaluate(&grid(3, 3), &played(&[(7, 7), (8, 8)]));
        assert!(wins.is_empty());
    }
}
