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

//! Upper bound on the number of distinguishable tickets.
//!
//! A ticket is identified by *which* songs it holds, not where they sit on
//! the grid, so the number of distinct tickets a catalog can produce is a
//! plain choose-without-replacement count.

/// Ceiling applied to combination counts.
///
/// Any result at or above this value means "effectively unlimited" and
/// callers should not rely on it being exact.
pub(crate) const DEFAULT_COMBINATION_CAP: u64 = 1_000_000;

/// Computes `C(n, r)`, saturating at `cap`.
///
/// Impossible selections (`r < 0` or `r > n`) yield zero. The multiplicative
/// form is evaluated over the smaller of `r` and `n - r`, and every partial
/// product is itself a binomial coefficient, so each division is exact.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(max_combinations(10, 5, DEFAULT_COMBINATION_CAP), 252);
/// assert_eq!(max_combinations(50, 25, DEFAULT_COMBINATION_CAP), DEFAULT_COMBINATION_CAP);
/// ```
pub(crate) fn max_combinations(n: i64, r: i64, cap: u64) -> u64 {
    if r < 0 || r > n {
        return 0;
    }

    if r == 0 || r == n {
        return 1;
    }

    let n = n as u128;
    let k = (r as u128).min(n - r as u128);
    let cap = u128::from(cap);

    let mut result: u128 = 1;
    for i in 1..=k {
        // result <= cap <= u64::MAX here, so the product cannot overflow
        result = result * (n - k + i) / i;
        if result > cap {
            return cap as u64;
        }
    }

    result as u64
}

/// Maximum number of distinct `grid_size` x `grid_size` tickets available
/// from a catalog holding `catalog_len` songs.
pub(crate) fn max_tickets(catalog_len: usize, grid_size: usize, cap: u64) -> u64 {
    let Some(r) = grid_size
        .checked_mul(grid_size)
        .and_then(|cells| i64::try_from(cells).ok())
    else {
        return 0;
    };
    let n = i64::try_from(catalog_len).unwrap_or(i64::MAX);

    max_combinations(n, r, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factorial(n: u128) -> u128 {
        (1..=n).product()
    }

    fn reference(n: i64, r: i64) -> u128 {
        let (n, r) = (n as u128, r as u128);
        factorial(n) / (factorial(r) * factorial(n - r))
    }

    #[test]
    fn matches_factorial_reference_for_small_catalogs() {
        for n in 0..=30 {
            for r in 0..=n {
                let expected = reference(n, r);
                assert_eq!(
                    u128::from(max_combinations(n, r, u64::MAX)),
                    expected,
                    "C({n}, {r})"
                );

                let capped = expected.min(u128::from(DEFAULT_COMBINATION_CAP));
                assert_eq!(
                    u128::from(max_combinations(n, r, DEFAULT_COMBINATION_CAP)),
                    capped,
                    "capped C({n}, {r})"
                );
            }
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(max_combinations(25, 25, DEFAULT_COMBINATION_CAP), 1);
        assert_eq!(max_combinations(25, 0, DEFAULT_COMBINATION_CAP), 1);
        assert_eq!(max_combinations(25, 1, DEFAULT_COMBINATION_CAP), 25);
        assert_eq!(max_combinations(10, 5, DEFAULT_COMBINATION_CAP), 252);
    }

    #[test]
    fn symmetric_in_r() {
        for n in 0..=40 {
            for r in 0..=n {
                assert_eq!(
                    max_combinations(n, r, DEFAULT_COMBINATION_CAP),
                    max_combinations(n, n - r, DEFAULT_COMBINATION_CAP)
                );
            }
        }
    }

    #[test]
    fn saturates_at_cap() {
        assert_eq!(
            max_combinations(50, 25, DEFAULT_COMBINATION_CAP),
            DEFAULT_COMBINATION_CAP
        );
        assert_eq!(max_combinations(10_000, 25, 500), 500);
        assert_eq!(max_combinations(i64::MAX, 2, DEFAULT_COMBINATION_CAP), DEFAULT_COMBINATION_CAP);
    }

    #[test]
    fn impossible_selections_are_zero() {
        assert_eq!(max_combinations(5, 6, DEFAULT_COMBINATION_CAP), 0);
        assert_eq!(max_combinations(5, -1, DEFAULT_COMBINATION_CAP), 0);
        assert_eq!(max_combinations(0, 1, DEFAULT_COMBINATION_CAP), 0);
        assert_eq!(max_combinations(-3, 2, DEFAULT_COMBINATION_CAP), 0);
        assert_eq!(max_combinations(-3, -4, DEFAULT_COMBINATION_CAP), 0);
    }

    #[test]
    fn ticket_bound_uses_grid_area() {
        assert_eq!(max_tickets(9, 3, DEFAULT_COMBINATION_CAP), 1);
        assert_eq!(max_tickets(10, 3, DEFAULT_COMBINATION_CAP), 10);
        assert_eq!(max_tickets(8, 3, DEFAULT_COMBINATION_CAP), 0);
        assert_eq!(max_tickets(100, 5, DEFAULT_COMBINATION_CAP), DEFAULT_COMBINATION_CAP);
    }

    #[test]
    fn overflowing_grid_area_allows_no_tickets() {
        assert_eq!(max_tickets(usize::MAX, usize::MAX, DEFAULT_COMBINATION_CAP), 0);
        assert_eq!(max_tickets(1_000, usize::MAX / 2, DEFAULT_COMBINATION_CAP), 0);
    }
}
