//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the ranking,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. Every
//! action goes through `Host::dispatch`, so the terminal ranker emits exactly
//! what the headless one would for the same gestures.
//!
//! ## Redraw Strategy
//!
//! The loop sleeps up to 250ms waiting for input and only redraws after an
//! event or a resize. All pending events are drained before the next frame.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect};
use crate::core::emit::Emitter;
use crate::host::Host;
use crate::tui::component::EventHandler;
use crate::tui::components::{RankedList, RankedListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-only state. Everything that affects emissions lives in `Ranker`.
#[derive(Debug, Default)]
pub struct TuiState {
    pub ranked_list: RankedListState,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run<E: Emitter>(host: &mut Host<E>) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| event_loop(&mut terminal, host));
    ratatui::restore();
    result
}

fn event_loop<E: Emitter>(
    terminal: &mut DefaultTerminal,
    host: &mut Host<E>,
) -> std::io::Result<()> {
    let mut tui = TuiState::new();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &host.ranker, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit | TuiEvent::Quit => Some(Action::Quit),
                _ if !host.ranker.accepts_gestures() => None,
                _ => RankedList::new(&mut tui.ranked_list, &host.ranker.sequence, host.ranker.schema)
                    .handle_event(&event),
            };

            let Some(action) = action else { continue };
            debug!("Event loop received: {:?}", action);
            if host.dispatch(action) == Effect::Quit {
                info!("Quit after {} emissions", host.emissions());
                return Ok(());
            }
        }
    }
}
