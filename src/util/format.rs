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

/// Formats seconds as `mm:ss`.
pub(crate) fn format_time(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Formats a ticket bound with thousands separators, marking a bound that hit
/// the cap with a trailing `+`.
pub(crate) fn format_capacity(capacity: u64, cap: u64) -> String {
    let digits = capacity.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if capacity >= cap {
        grouped.push('+');
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_are_zero_padded() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn capacity_is_grouped_and_marked_when_capped() {
        assert_eq!(format_capacity(0, 1_000_000), "0");
        assert_eq!(format_capacity(126, 1_000_000), "126");
        assert_eq!(format_capacity(3_268_760, 10_000_000), "3,268,760");
        assert_eq!(format_capacity(1_000_000, 1_000_000), "1,000,000+");
    }
}
