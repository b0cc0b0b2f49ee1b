//! Event handling for the TUI
//!
//! Local edits (drafts, checkboxes, mode switches) happen right here.
//! Anything that needs the store comes back as a [`HandleResult`] for the
//! run loop to await.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use partyctl_core::MemberId;

use super::app::{App, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Fetch the party again
    Reload,
    /// Send the name draft
    CommitRename,
    /// Send the pending move selection for this member
    CommitMoves(MemberId),
    /// Delete this member
    Delete(MemberId),
}

pub const HELP_TEXT: &str = "\
Party list
  j/k, Up/Down   select member
  g/G            first / last member
  e              edit name (resumes a parked edit)
  m              edit moves (resumes a parked edit)
  d              delete member
  r              reload party
  ?              this help
  q, Ctrl+C      quit

Name input
  Enter          save name
  Esc            cancel
  Tab            park the edit and return to the list

Move checklist
  j/k            move cursor
  Space          check / uncheck (at most 4)
  Enter, s       save moves
  Esc            cancel
  Tab            park the edit and return to the list";

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            _ => {}
        }
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::NameEdit => handle_name_edit(app, key),
        Mode::MoveEdit => handle_move_edit(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,

        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            HandleResult::Continue
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.select_first();
            HandleResult::Continue
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.select_last();
            HandleResult::Continue
        }

        KeyCode::Char('e') => {
            if let Some(id) = app.selected_id() {
                if app.view.name_editing() != Some(&id) {
                    // Entering for another member replaces any parked rename
                    if app.view.begin_rename(&id).is_err() {
                        return HandleResult::Continue;
                    }
                }
                app.mode = Mode::NameEdit;
                app.clear_status();
            }
            HandleResult::Continue
        }

        KeyCode::Char('m') => {
            if let Some(id) = app.selected_id() {
                if app.view.moves_editing() != Some(&id) {
                    if app.view.begin_move_edit(&id).is_err() {
                        return HandleResult::Continue;
                    }
                    app.move_cursor = 0;
                }
                app.mode = Mode::MoveEdit;
                app.clear_status();
            }
            HandleResult::Continue
        }

        KeyCode::Char('d') | KeyCode::Delete => match app.selected_id() {
            Some(id) => HandleResult::Delete(id),
            None => HandleResult::Continue,
        },

        KeyCode::Char('r') => HandleResult::Reload,

        KeyCode::Char('?') => {
            app.show_help(HELP_TEXT);
            HandleResult::Continue
        }

        _ => HandleResult::Continue,
    }
}

fn handle_name_edit(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => {
            app.view.cancel_rename();
            app.mode = Mode::Normal;
            HandleResult::Continue
        }
        KeyCode::Tab => {
            app.mode = Mode::Normal;
            HandleResult::Continue
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            HandleResult::CommitRename
        }
        KeyCode::Backspace => {
            app.view.name_draft_mut().pop();
            HandleResult::Continue
        }
        KeyCode::Char(c) => {
            app.view.name_draft_mut().push(c);
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

fn handle_move_edit(app: &mut App, key: KeyEvent) -> HandleResult {
    let Some(id) = app.view.moves_editing().cloned() else {
        app.mode = Mode::Normal;
        return HandleResult::Continue;
    };

    match key.code {
        KeyCode::Esc => {
            app.view.cancel_move_edit();
            app.mode = Mode::Normal;
            HandleResult::Continue
        }
        KeyCode::Tab => {
            app.mode = Mode::Normal;
            HandleResult::Continue
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_cursor_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_cursor_prev();
            HandleResult::Continue
        }
        KeyCode::Char(' ') => {
            app.toggle_move_under_cursor();
            HandleResult::Continue
        }
        KeyCode::Enter | KeyCode::Char('s') => HandleResult::CommitMoves(id),
        _ => HandleResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use partyctl_core::{MemoryPartyStore, PartyMember, PartyView, SilentNotifier};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn party() -> Vec<PartyMember> {
        vec![
            serde_json::from_value(json!({
                "id": 1,
                "name": "Bulbasaur",
                "official_artwork": "https://img/1.png",
                "learnable_moves": ["Tackle", "Growl", "Vine Whip", "Leech Seed", "Razor Leaf"]
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "id": 7,
                "name": "Squirtle",
                "official_artwork": "https://img/7.png",
                "learnable_moves": ["Tackle", "Tail Whip", "Bubble", "Withdraw"]
            }))
            .unwrap(),
        ]
    }

    async fn app() -> App {
        let store = Arc::new(MemoryPartyStore::new(party()));
        let mut view = PartyView::new(store, Arc::new(SilentNotifier));
        view.load_party().await.unwrap();
        App::new(view)
    }

    #[tokio::test]
    async fn test_navigation_is_clamped() {
        let mut app = app().await;

        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected_index, 1);
    }

    #[tokio::test]
    async fn test_name_edit_typing_and_commit() {
        let mut app = app().await;

        handle_key(&mut app, key(KeyCode::Char('e')));
        assert_eq!(app.mode, Mode::NameEdit);
        assert_eq!(app.view.name_draft(), "Bulbasaur");

        for _ in 0.."asaur".len() {
            handle_key(&mut app, key(KeyCode::Backspace));
        }
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.view.name_draft(), "Bulby");

        // 'q' is text while typing, not quit
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char('q'))),
            HandleResult::Continue
        );
        handle_key(&mut app, key(KeyCode::Backspace));

        assert_eq!(
            handle_key(&mut app, key(KeyCode::Enter)),
            HandleResult::CommitRename
        );
        assert_eq!(app.mode, Mode::Normal);
    }

    #[tokio::test]
    async fn test_escape_cancels_rename() {
        let mut app = app().await;

        handle_key(&mut app, key(KeyCode::Char('e')));
        handle_key(&mut app, key(KeyCode::Esc));

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.view.name_editing(), None);
    }

    #[tokio::test]
    async fn test_parked_edits_coexist() {
        let mut app = app().await;

        handle_key(&mut app, key(KeyCode::Char('e')));
        handle_key(&mut app, key(KeyCode::Char('!')));
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('m')));

        assert_eq!(app.mode, Mode::MoveEdit);
        assert_eq!(app.view.name_editing(), Some(&MemberId::from(1)));
        assert_eq!(app.view.moves_editing(), Some(&MemberId::from(7)));

        // Resuming the rename keeps the draft
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Char('k')));
        handle_key(&mut app, key(KeyCode::Char('e')));
        assert_eq!(app.view.name_draft(), "Bulbasaur!");
    }

    #[tokio::test]
    async fn test_checklist_toggle_and_cap() {
        let mut app = app().await;
        let id = MemberId::from(1);

        handle_key(&mut app, key(KeyCode::Char('m')));
        assert_eq!(app.checklist().len(), 5);

        // Cursor to "Razor Leaf": all four slots are full, so checking is ignored
        for _ in 0..4 {
            handle_key(&mut app, key(KeyCode::Down));
        }
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(!app.view.is_move_checked(&id, "Razor Leaf"));
        assert_eq!(app.view.error_message(), None);

        // Uncheck "Growl", then "Razor Leaf" fits
        app.move_cursor = 1;
        handle_key(&mut app, key(KeyCode::Char(' ')));
        app.move_cursor = 4;
        handle_key(&mut app, key(KeyCode::Char(' ')));

        assert_eq!(
            app.view.pending_selection(&id).unwrap().as_slice(),
            ["Tackle", "Vine Whip", "Leech Seed", "Razor Leaf"]
        );
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Enter)),
            HandleResult::CommitMoves(id)
        );
    }

    #[tokio::test]
    async fn test_delete_targets_selected_member() {
        let mut app = app().await;
        handle_key(&mut app, key(KeyCode::Char('j')));

        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char('d'))),
            HandleResult::Delete(MemberId::from(7))
        );
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_any_mode() {
        let mut app = app().await;
        handle_key(&mut app, key(KeyCode::Char('e')));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c), HandleResult::Quit);
    }
}
