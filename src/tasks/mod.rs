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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload tasks such as
//! library scans, database access and ticket generation from the main UI
//! thread. It provides a dedicated worker loop that translates [`AppTask`]
//! requests into database (and other) operations and broadcasts the results
//! back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to be events.

mod handlers;

use std::{
    collections::HashSet,
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use log::error;
use rusqlite::Connection;

use crate::{config::AppConfig, db, events::AppEvent};

/// Generator settings captured from the configuration when a task is issued,
/// so later configuration changes do not affect a task already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GenerationSettings {
    pub(crate) grid_size: usize,
    pub(crate) retry_limit: usize,
    pub(crate) combination_cap: u64,
    pub(crate) seed: Option<u64>,
}

impl GenerationSettings {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self {
            grid_size: config.grid_size,
            retry_limit: config.retry_limit,
            combination_cap: config.combination_cap,
            seed: config.seed,
        }
    }
}

#[derive(Debug)]
pub(crate) enum AppTask {
    ScanCatalog,
    LoadGame,

    GenerateTickets(GenerationSettings, usize),
    AddTicket {
        settings: GenerationSettings,
        id: String,
        existing: HashSet<String>,
    },
    ExportTickets(PathBuf),

    RecordPlayed(String),
    ClearPlayed,
}

/// Spawns a background thread to process application tasks.
///
/// This worker thread initializes its own database connection and enters
/// a blocking loop, listening for incoming [`AppTask`]s.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let mut conn = match db::init_db(&config.database_file) {
            Ok(conn) => conn,
            Err(e) => {
                error!("Database unavailable: {:#}", e);
                let _ = event_tx.send(AppEvent::FatalError(format!("Database unavailable: {:#}", e)));
                return;
            }
        };

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                config: &config,
                event_tx: &event_tx,
                conn: &mut conn,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                error!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    config: &'a AppConfig,
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
}

/// Orchestrates the execution of a single task.
///
/// This function implements the logic for each task and sends the result back
/// through the application event channel.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::ScanCatalog => handlers::scan_catalog(ctx),
        AppTask::LoadGame => handlers::load_game(ctx),

        AppTask::GenerateTickets(settings, count) => handlers::generate_tickets(ctx, settings, count),
        AppTask::AddTicket {
            settings,
            id,
            existing,
        } => handlers::add_ticket(ctx, settings, id, &existing),
        AppTask::ExportTickets(path) => handlers::export_tickets(ctx, &path),

        AppTask::RecordPlayed(song_id) => handlers::record_played(ctx, &song_id),
        AppTask::ClearPlayed => handlers::clear_played(ctx),
    }
}
