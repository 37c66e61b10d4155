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

//! # Song Bingo TUI.
//!
//! A terminal music bingo host: bingo tickets are generated from the songs in
//! a local music library, songs are called and played one after another, and
//! every ticket is checked for wins as the game goes on.
//!
//! ## Architecture
//!
//! * The **Main Thread** owns the terminal and the [`App`] state, and redraws
//!   the UI after every event.
//! * A **Task Worker** owns the database connection and runs scans, loads,
//!   ticket generation and persistence.
//! * A **Player Worker** drives libmpv.
//! * **Input** and **Tick** threads feed key presses and periodic redraws into
//!   the event channel.
//!
//! All threads talk to each other through `std::sync::mpsc` channels.

mod bingo;
mod commander;
mod components;
mod config;
mod db;
mod events;
mod export;
mod model;
mod player;
mod render;
mod tasks;
mod theme;
mod util;

use std::{
    fs::File,
    io,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::event;
use env_logger::{Env, Target};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    commander::Commander,
    components::{CatalogView, SessionView, TicketView},
    config::AppConfig,
    events::{AppEvent, process_events},
    model::{catalog::Catalog, session::Session, tickets::TicketBook},
    player::{AudioPlayer, PlayerState},
    tasks::AppTask,
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq)]
enum MainView {
    Tickets,
    Session,
    Catalog,
}

/// Application state.
struct App {
    config: AppConfig,

    theme: Theme,
    main_view: MainView,

    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,

    task_tx: Sender<AppTask>,

    audio_player: AudioPlayer,

    catalog: Catalog,
    ticket_book: TicketBook,
    session: Session,

    ticket_view: TicketView,
    session_view: SessionView,
    catalog_view: CatalogView,

    commander: Commander,
    status: Option<String>,

    player_state: PlayerState,
    player_duration: Option<u64>,
    player_time: Option<u64>,
    volume: Option<u32>,
}

impl App {
    fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let audio_player = AudioPlayer::new(event_tx.clone());

        Self {
            config,
            theme: Theme::default(),
            main_view: MainView::Tickets,
            event_tx,
            event_rx,
            task_tx,
            audio_player,
            catalog: Catalog::new(),
            ticket_book: TicketBook::new(),
            session: Session::new(),
            ticket_view: TicketView::new(),
            session_view: SessionView::new(),
            catalog_view: CatalogView,
            commander: Commander::new(),
            status: None,
            player_state: PlayerState::Stopped,
            player_duration: None,
            player_time: None,
            volume: None,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, and manages the terminal lifecycle.
fn main() -> Result<()> {
    let config = config::load_config();

    init_logging(&config)?;
    info!("Starting with database {}", config.database_file);

    let (task_tx, task_rx) = mpsc::channel();
    let mut app = App::new(config, task_tx);

    let mut terminal = util::term::setup_terminal(&app.theme)?;
    let res = run(&mut terminal, &mut app, task_rx);
    util::term::restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

// The terminal belongs to the TUI, so log records go to a file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

/// Starts the background workers and enters the main event loop.
///
/// # Errors
///
/// Returns an error if the event loop ends with an unrecoverable error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    tasks::spawn_task_worker(&app.config, task_rx, app.event_tx.clone());

    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // The tick is the minimum frame rate of the UI.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    app.task_tx
        .send(AppTask::LoadGame)
        .context("Task worker unavailable")?;

    process_events(terminal, app)
}
