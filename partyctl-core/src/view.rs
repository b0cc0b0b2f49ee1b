//! PartyView: local party state kept in sync with the store
//!
//! Local state only changes after the store call succeeds. Every mutation
//! rebuilds the member list from the previous one and swaps it in; failed
//! calls are logged and leave the list as it was.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{PartyError, Result};
use crate::member::{MemberId, MemberPatch, PartyMember};
use crate::notify::Notifier;
use crate::selection::MoveSelection;
use crate::store::PartyStore;

/// Shown when a move selection is committed with nothing checked
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one move.";

pub struct PartyView {
    store: Arc<dyn PartyStore>,
    notifier: Arc<dyn Notifier>,
    members: Vec<PartyMember>,

    /// Member whose name is being edited (at most one)
    name_editing: Option<MemberId>,
    name_draft: String,

    /// Member whose moves are being edited (at most one)
    moves_editing: Option<MemberId>,
    pending: HashMap<MemberId, MoveSelection>,

    error_message: Option<String>,
}

impl PartyView {
    pub fn new(store: Arc<dyn PartyStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            members: Vec::new(),
            name_editing: None,
            name_draft: String::new(),
            moves_editing: None,
            pending: HashMap::new(),
            error_message: None,
        }
    }

    // ------------------------------------------------------------------
    // Store-backed operations
    // ------------------------------------------------------------------

    /// Replace local state with the store's current party
    pub async fn load_party(&mut self) -> Result<()> {
        match self.store.list().await {
            Ok(members) => {
                tracing::info!(count = members.len(), "party loaded");
                self.members = members;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load party");
                Err(e)
            }
        }
    }

    pub async fn rename_member(&mut self, id: &MemberId, new_name: &str) -> Result<()> {
        self.apply_patch(id, MemberPatch::rename(new_name)).await
    }

    pub async fn update_moves(&mut self, id: &MemberId, new_moves: Vec<String>) -> Result<()> {
        self.apply_patch(id, MemberPatch::moves(new_moves)).await
    }

    pub async fn delete_member(&mut self, id: &MemberId) -> Result<()> {
        if let Err(e) = self.store.delete(id).await {
            tracing::warn!(%id, error = %e, "failed to delete party member");
            return Err(e);
        }

        self.members = self
            .members
            .iter()
            .filter(|m| &m.id != id)
            .cloned()
            .collect();

        if self.name_editing.as_ref() == Some(id) {
            self.cancel_rename();
        }
        if self.moves_editing.as_ref() == Some(id) {
            self.moves_editing = None;
        }
        self.pending.remove(id);

        tracing::info!(%id, "party member deleted");
        self.notifier.notify();
        Ok(())
    }

    async fn apply_patch(&mut self, id: &MemberId, patch: MemberPatch) -> Result<()> {
        if let Err(e) = self.store.patch(id, &patch).await {
            tracing::warn!(%id, error = %e, "failed to update party member");
            return Err(e);
        }

        self.members = self
            .members
            .iter()
            .map(|m| {
                if &m.id == id {
                    patch.applied_to(m)
                } else {
                    m.clone()
                }
            })
            .collect();

        tracing::info!(%id, "party member updated");
        self.notifier.notify();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Name editing
    // ------------------------------------------------------------------

    /// Enter name-edit for `id`, seeding the draft with its current name
    pub fn begin_rename(&mut self, id: &MemberId) -> Result<()> {
        let name = self.require(id)?.name.clone();
        self.name_editing = Some(id.clone());
        self.name_draft = name;
        Ok(())
    }

    pub fn set_name_draft(&mut self, text: impl Into<String>) {
        self.name_draft = text.into();
    }

    pub fn name_draft_mut(&mut self) -> &mut String {
        &mut self.name_draft
    }

    /// Leave name-edit and send the draft. No-op when nothing is being renamed.
    pub async fn commit_rename(&mut self) -> Result<()> {
        let Some(id) = self.name_editing.take() else {
            return Ok(());
        };
        let name = std::mem::take(&mut self.name_draft);
        self.rename_member(&id, &name).await
    }

    pub fn cancel_rename(&mut self) {
        self.name_editing = None;
        self.name_draft.clear();
    }

    // ------------------------------------------------------------------
    // Move editing
    // ------------------------------------------------------------------

    /// Enter moves-edit for `id`, seeding the pending selection with the
    /// moves currently displayed for it
    pub fn begin_move_edit(&mut self, id: &MemberId) -> Result<()> {
        let seed = MoveSelection::seeded(self.require(id)?.displayed_moves().iter().cloned());
        self.pending.insert(id.clone(), seed);
        self.moves_editing = Some(id.clone());
        Ok(())
    }

    /// Toggle a move in the pending selection for `id`.
    ///
    /// Checking a fifth move, a move already checked, or a move the member
    /// cannot learn is ignored. Returns whether the selection changed.
    pub fn select_move(&mut self, id: &MemberId, move_name: &str, checked: bool) -> bool {
        if checked {
            let learnable = self
                .member(id)
                .map(|m| m.can_learn(move_name))
                .unwrap_or(false);
            if !learnable {
                tracing::debug!(%id, move_name, "ignoring move the member cannot learn");
                return false;
            }
            self.pending
                .entry(id.clone())
                .or_default()
                .check(move_name)
        } else {
            self.pending
                .entry(id.clone())
                .or_default()
                .uncheck(move_name)
        }
    }

    /// Send the pending selection for `id`.
    ///
    /// An empty selection sets [`EMPTY_SELECTION_MESSAGE`] and touches nothing
    /// else. Otherwise the message is cleared, moves-edit ends and the
    /// selection goes to [`update_moves`](Self::update_moves).
    pub async fn commit_move_selection(&mut self, id: &MemberId) -> Result<()> {
        let has_moves = self
            .pending
            .get(id)
            .map(|sel| !sel.is_empty())
            .unwrap_or(false);

        if !has_moves {
            self.error_message = Some(EMPTY_SELECTION_MESSAGE.to_string());
            return Err(PartyError::EmptySelection {
                message: EMPTY_SELECTION_MESSAGE,
            });
        }

        let moves = self
            .pending
            .remove(id)
            .map(MoveSelection::into_vec)
            .unwrap_or_default();
        self.error_message = None;
        self.moves_editing = None;
        self.update_moves(id, moves).await
    }

    pub fn cancel_move_edit(&mut self) {
        if let Some(id) = self.moves_editing.take() {
            self.pending.remove(&id);
        }
        self.error_message = None;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    pub fn member(&self, id: &MemberId) -> Option<&PartyMember> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn name_editing(&self) -> Option<&MemberId> {
        self.name_editing.as_ref()
    }

    pub fn name_draft(&self) -> &str {
        &self.name_draft
    }

    pub fn moves_editing(&self) -> Option<&MemberId> {
        self.moves_editing.as_ref()
    }

    pub fn pending_selection(&self, id: &MemberId) -> Option<&MoveSelection> {
        self.pending.get(id)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Checkbox state: the pending selection if there is one, else the
    /// member's stored selection
    pub fn is_move_checked(&self, id: &MemberId, move_name: &str) -> bool {
        match self.pending.get(id) {
            Some(sel) => sel.contains(move_name),
            None => self
                .member(id)
                .and_then(|m| m.selected_moves.as_ref())
                .map(|moves| moves.iter().any(|m| m == move_name))
                .unwrap_or(false),
        }
    }

    /// Checkbox is disabled: not checked and no room left
    pub fn is_move_locked(&self, id: &MemberId, move_name: &str) -> bool {
        self.pending
            .get(id)
            .map(|sel| !sel.contains(move_name) && sel.is_full())
            .unwrap_or(false)
    }

    fn require(&self, id: &MemberId) -> Result<&PartyMember> {
        self.member(id)
            .ok_or_else(|| PartyError::UnknownMember { id: id.clone() })
    }
}

impl std::fmt::Debug for PartyView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartyView")
            .field("members", &self.members.len())
            .field("name_editing", &self.name_editing)
            .field("moves_editing", &self.moves_editing)
            .field("error_message", &self.error_message)
            .finish()
    }
}
