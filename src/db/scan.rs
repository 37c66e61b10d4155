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

//! Media library indexing and database persistence.
//!
//! This module handles the discovery of audio files on the local filesystem
//! and rebuilds the `songs` table from them.
//!
//! It utilizes `WalkDir` for efficient directory traversal and `Lofty` for
//! metadata extraction. Progress is reported to the UI as
//! [`CatalogEvent`]s while the scan runs.
//!
//! # Performance
//!
//! The whole scan is performed within one SQLite transaction to maximize
//! write throughput and ensure the catalog is never seen half-built.

use std::{path::Path, sync::mpsc::Sender};

use anyhow::{Context, Result, bail};
use lofty::prelude::*;
use lofty::probe::Probe;
use log::{debug, info, warn};
use rusqlite::{Connection, Transaction, params};
use walkdir::WalkDir;

use crate::{
    events::{AppEvent, CatalogEvent},
    model::Song,
};

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "opus", "m4a", "wav"];

// Progress is reported once per this many files.
const PROGRESS_INTERVAL: usize = 25;

/// Recursively scans the media directories and rebuilds the song catalog.
///
/// All existing songs are removed first. Files without readable tags are
/// skipped; missing artist or title tags fall back to placeholders so the
/// song can still be called.
///
/// # Returns
///
/// Returns the number of songs in the catalog after the scan.
///
/// # Errors
///
/// Returns an error if a media directory does not exist, if the transaction
/// fails or if database constraints are violated during insertion. The
/// previous catalog is kept in that case. Unreadable files and
/// subdirectories are skipped.
pub(crate) fn process_music_library(
    conn: &mut Connection,
    media_dirs: &[String],
    event_tx: &Sender<AppEvent>,
) -> Result<usize> {
    let _ = event_tx.send(AppEvent::Catalog(CatalogEvent::Started));

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM songs", [])?;

    for dir in media_dirs {
        if !Path::new(dir).is_dir() {
            bail!("Media directory not found: {}", dir);
        }

        let _ = event_tx.send(AppEvent::Catalog(CatalogEvent::StartedDirectory(dir.clone())));

        let count = scan_directory(&tx, Path::new(dir), |count, filename| {
            let _ = event_tx.send(AppEvent::Catalog(CatalogEvent::ProcessedFile(
                count,
                filename.to_string(),
            )));
        })?;
        info!("Scanned {} songs in {}", count, dir);

        let _ = event_tx.send(AppEvent::Catalog(CatalogEvent::FinishedDirectory(dir.clone())));
    }

    tx.commit().context("Failed to commit transaction")?;

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
    let count = usize::try_from(count).unwrap_or_default();

    let _ = event_tx.send(AppEvent::Catalog(CatalogEvent::Finished(count)));

    Ok(count)
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

fn scan_directory(
    tx: &Transaction,
    root: &Path,
    mut on_progress: impl FnMut(usize, &str),
) -> Result<usize> {
    let mut count = 0;

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
    {
        let path = entry.path();

        let Some(song) = read_song(path) else {
            continue;
        };

        let inserted = tx.execute(
            "INSERT OR IGNORE INTO songs (id, artist, title, album, duration, filename) VALUES (?, ?, ?, ?, ?, ?)",
            params![song.id, song.artist, song.title, song.album, song.duration, song.filename],
        )?;

        if inserted > 0 {
            count += 1;
            if count % PROGRESS_INTERVAL == 0 {
                on_progress(count, &song.filename);
            }
        }
    }

    on_progress(count, "");

    Ok(count)
}

/// Reads the tags of one audio file.
fn read_song(path: &Path) -> Option<Song> {
    let Some(filename) = path.to_str() else {
        warn!("Skipping {:?}: path is not valid UTF-8", path);
        return None;
    };

    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            warn!("Skipping {}: {}", filename, e);
            return None;
        }
    };

    let duration = i64::try_from(tagged_file.properties().duration().as_secs()).unwrap_or(-1);

    let fallback_title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string());

    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        debug!("No tags in {}, using the file name", filename);
        return Some(Song {
            id: Song::id_for_path(filename),
            artist: "Unknown Artist".to_string(),
            title: fallback_title,
            album: "Unknown Album".to_string(),
            duration,
            filename: filename.to_string(),
        });
    };

    Some(Song {
        id: Song::id_for_path(filename),
        artist: tag
            .artist()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Unknown Artist".to_string()),
        title: tag.title().map(|t| t.to_string()).unwrap_or(fallback_title),
        album: tag
            .album()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Unknown Album".to_string()),
        duration,
        filename: filename.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::mpsc};

    use super::*;
    use crate::db;

    #[test]
    fn recognises_audio_extensions() {
        assert!(is_audio_file(Path::new("/music/a.mp3")));
        assert!(is_audio_file(Path::new("/music/a.FLAC")));
        assert!(!is_audio_file(Path::new("/music/cover.jpg")));
        assert!(!is_audio_file(Path::new("/music/mp3")));
    }

    #[test]
    fn scan_replaces_the_catalog_and_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "not music").unwrap();
        fs::create_dir(dir.path().join("artwork")).unwrap();
        fs::write(dir.path().join("artwork").join("cover.jpg"), [0u8; 16]).unwrap();

        let mut conn = db::open_in_memory();
        db::insert_songs(&conn, &crate::model::test_songs(2));

        let (tx, rx) = mpsc::channel();
        let media_dirs = vec![dir.path().to_string_lossy().to_string()];
        let count = process_music_library(&mut conn, &media_dirs, &tx).unwrap();

        assert_eq!(count, 0);
        assert!(db::fetch_songs(&conn).unwrap().is_empty());

        let events: Vec<AppEvent> = rx.try_iter().collect();
        assert!(matches!(events.first(), Some(AppEvent::Catalog(CatalogEvent::Started))));
        assert!(matches!(events.last(), Some(AppEvent::Catalog(CatalogEvent::Finished(0)))));
    }

    #[test]
    fn missing_directory_fails_and_keeps_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("unmounted");

        let mut conn = db::open_in_memory();
        db::insert_songs(&conn, &crate::model::test_songs(2));

        let (tx, rx) = mpsc::channel();
        let media_dirs = vec![missing.to_string_lossy().to_string()];
        let err = process_music_library(&mut conn, &media_dirs, &tx).unwrap_err();

        assert!(err.to_string().contains("unmounted"));
        assert_eq!(db::fetch_songs(&conn).unwrap().len(), 2);
        assert!(
            !rx.try_iter()
                .any(|e| matches!(e, AppEvent::Catalog(CatalogEvent::Finished(_))))
        );
    }
}
