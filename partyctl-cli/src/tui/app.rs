//! TUI application state: the party view plus cursor and input mode

use partyctl_core::{MemberId, PartyMember, PartyView};

/// Where keystrokes go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigate the party list and start actions
    #[default]
    Normal,
    /// Typing into the name input of the member in name-edit
    NameEdit,
    /// Moving through the move checklist of the member in moves-edit
    MoveEdit,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Party state and edit modes
    pub view: PartyView,
    /// Current input mode
    pub mode: Mode,
    /// Selected row in the party list
    pub selected_index: usize,
    /// Highlighted row in the move checklist
    pub move_cursor: usize,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    /// Help overlay text, when open
    pub help_text: Option<String>,
}

impl App {
    pub fn new(view: PartyView) -> Self {
        Self {
            view,
            mode: Mode::Normal,
            selected_index: 0,
            move_cursor: 0,
            status_message: None,
            help_text: None,
        }
    }

    pub fn selected_member(&self) -> Option<&PartyMember> {
        self.view.members().get(self.selected_index)
    }

    pub fn selected_id(&self) -> Option<MemberId> {
        self.selected_member().map(|m| m.id.clone())
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.view.members().len() {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.view.members().len().saturating_sub(1);
    }

    /// Keep the selection inside the list after it shrinks
    pub fn clamp_selection(&mut self) {
        let len = self.view.members().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Learnable moves of the member in moves-edit
    pub fn checklist(&self) -> &[String] {
        self.view
            .moves_editing()
            .and_then(|id| self.view.member(id))
            .map(|m| m.learnable_moves.as_slice())
            .unwrap_or(&[])
    }

    pub fn move_cursor_next(&mut self) {
        if self.move_cursor + 1 < self.checklist().len() {
            self.move_cursor += 1;
        }
    }

    pub fn move_cursor_prev(&mut self) {
        self.move_cursor = self.move_cursor.saturating_sub(1);
    }

    /// Flip the checkbox under the move cursor. Checking a fifth move does nothing.
    pub fn toggle_move_under_cursor(&mut self) -> bool {
        let Some(id) = self.view.moves_editing().cloned() else {
            return false;
        };
        let Some(move_name) = self.checklist().get(self.move_cursor).cloned() else {
            return false;
        };

        let checked = self.view.is_move_checked(&id, &move_name);
        self.view.select_move(&id, &move_name, !checked)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn show_help(&mut self, text: impl Into<String>) {
        self.help_text = Some(text.into());
    }

    pub fn dismiss_help(&mut self) {
        self.help_text = None;
    }
}
