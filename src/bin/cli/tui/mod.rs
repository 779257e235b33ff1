mod app_state;
mod card_widget;
mod key_handler;
mod status_bar;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::seq::SliceRandom;
use ratatui::prelude::*;

use wordbook_lib::review::{Card, SessionSink};

use crate::app::App;
use app_state::TuiState;

/// Longer than the session upload timeout, so an upload finishes or fails first
const SINK_FLUSH_TIMEOUT: Duration = Duration::from_secs(15);

pub fn run(app: &App, group_name: &str, shuffle: bool) -> Result<()> {
    let group = app.find_group(group_name)?;
    let mut cards: Vec<Card> = app
        .group_words(group.id)?
        .into_iter()
        .map(Card::from)
        .collect();
    if shuffle {
        cards.shuffle(&mut rand::thread_rng());
    }

    let sink = app.session_sink(group.id)?;
    let recorder: Arc<dyn SessionSink> = sink.clone();
    let mut state = TuiState::new(group.name, cards, Some(recorder));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Event loop
    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !sink.flush(SINK_FLUSH_TIMEOUT) {
        eprintln!("Warning: the last review session may not have been saved");
    }

    if let Some(summary) = state.session.result() {
        println!(
            "Last pass: {} known, {} unknown out of {}",
            summary.known_count, summary.unknown_count, summary.total_words
        );
    }

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut TuiState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if state.quit {
            return Ok(());
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    key_handler::handle_key(state, key);
                }
            }
        }
    }
}
