use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{info, trace};

use crate::app::{App, Model, update};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&self) -> Result<()> {
        // Initialize terminal
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - prodios requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = self.initial_model((size.width, size.height));
        info!(
            tabs = model.session.len(),
            width = size.width,
            height = size.height,
            "editor started"
        );

        let result = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Some(msg) = Self::handle_event(event::read()?, model) {
                trace!(?msg, "dispatch");
                *model = update(std::mem::take(model), msg);
                needs_render = true;
            }

            if model.should_quit {
                break;
            }
        }

        Ok(())
    }
}
