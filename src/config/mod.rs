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

//! Application configuration.
//!
//! This module manages the application configuration file, including the
//! game settings: grid size, how many tickets to hand out, and the limits
//! used by the ticket generator.

use serde::{Deserialize, Serialize};

use crate::bingo::{DEFAULT_COMBINATION_CAP, DEFAULT_RETRY_LIMIT};

const CONFIG_NAME: &str = "songbingo";

pub(crate) const MIN_GRID_SIZE: usize = 1;
pub(crate) const MAX_GRID_SIZE: usize = 10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub media_dirs: Vec<String>,
    pub database_file: String,
    pub log_file: String,

    pub grid_size: usize,
    pub ticket_count: usize,
    pub retry_limit: usize,
    pub combination_cap: u64,
    /// Fixed seed for ticket generation, for reproducible ticket sets.
    pub seed: Option<u64>,

    /// Seconds into each song to start playback, skipping long intros.
    pub play_offset_secs: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dirs: vec![],
            database_file: "songbingo.db".to_string(),
            log_file: "songbingo.log".to_string(),
            grid_size: 5,
            ticket_count: 20,
            retry_limit: DEFAULT_RETRY_LIMIT,
            combination_cap: DEFAULT_COMBINATION_CAP,
            seed: None,
            play_offset_secs: 0,
        }
    }
}

impl AppConfig {
    pub(crate) fn is_valid_grid_size(size: usize) -> bool {
        (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size)
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_engine_constants() {
        let config = AppConfig::default();

        assert_eq!(config.grid_size, 5);
        assert_eq!(config.retry_limit, 200);
        assert_eq!(config.combination_cap, 1_000_000);
        assert!(config.seed.is_none());
    }

    #[test]
    fn grid_size_bounds() {
        assert!(!AppConfig::is_valid_grid_size(0));
        assert!(AppConfig::is_valid_grid_size(3));
        assert!(AppConfig::is_valid_grid_size(MAX_GRID_SIZE));
        assert!(!AppConfig::is_valid_grid_size(MAX_GRID_SIZE + 1));
    }
}
