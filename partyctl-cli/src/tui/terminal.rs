//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use partyctl_core::PartyView;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::{App, Mode};
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI over `view`. The party is fetched once on start.
pub async fn run(view: PartyView) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::new(view);

    // Failures are logged by the view; the list just stays empty
    if app.view.load_party().await.is_ok() {
        app.clamp_selection();
    }

    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events (with 100ms timeout for responsive UI)
        if let Some(event) = poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => {
                    // Dismiss help on any key if showing
                    if app.help_text.is_some() {
                        app.dismiss_help();
                        continue;
                    }

                    let result = handle_key(app, key);
                    if result == HandleResult::Quit {
                        break;
                    }
                    apply(app, result).await;
                }
                Event::Resize(_, _) => {
                    // Terminal resized, will be handled on next draw
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Carry out a store-backed action. Failures stay in the log; the screen
/// keeps showing the previous state.
pub async fn apply(app: &mut App, result: HandleResult) {
    match result {
        HandleResult::Continue | HandleResult::Quit => {}
        HandleResult::Reload => {
            if app.view.load_party().await.is_ok() {
                app.clamp_selection();
                app.set_status(format!("Loaded {} members", app.view.members().len()));
            }
        }
        HandleResult::CommitRename => {
            let draft = app.view.name_draft().to_string();
            if app.view.commit_rename().await.is_ok() {
                app.set_status(format!("Renamed to {}", draft));
            }
        }
        HandleResult::CommitMoves(id) => {
            let outcome = app.view.commit_move_selection(&id).await;
            // An empty selection keeps the checklist open with its message
            if app.view.moves_editing().is_none() {
                app.mode = Mode::Normal;
            }
            if outcome.is_ok() {
                app.set_status("Moves saved");
            }
        }
        HandleResult::Delete(id) => {
            let name = app.view.member(&id).map(|m| m.name.clone());
            if app.view.delete_member(&id).await.is_ok() {
                app.clamp_selection();
                if let Some(name) = name {
                    app.set_status(format!("Released {}", name));
                }
            }
        }
    }
}
