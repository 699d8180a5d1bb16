//! Dashboard controller: entry list, editor, delete confirmation and analysis panel.
//!
//! Methods never talk to the network. They return [`Effect`]s which the app
//! runs as background tasks, and results come back through the `*_loaded` /
//! `*_saved` / `*_deleted` methods.

use crate::analysis::AnalysisView;
use crate::api::{AnalysisSummary, MutationOutcome};
use crate::diary_entry::{DiaryEntry, EntryId};
use crate::diary_state::DiaryState;
use crate::editor::{EditorSession, EditorState, SaveRequest, SubmitError};
use crate::error::ClientResult;
use std::collections::HashSet;

const GENERIC_ERROR: &str = "An error occurred. Please try again.";
const SAVE_FAILED: &str = "Error saving entry. Please try again.";
const DELETE_FAILED: &str = "Error deleting entry. Please try again.";
pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this entry? This action cannot be undone.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchEntries,
    Save(SaveRequest),
    Delete(EntryId),
    FetchAnalysis { ticket: u64 },
    EndConfirmation { ticket: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Editor,
}

/// Modal prompts. While one is open it receives all input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Alert(String),
    ConfirmDelete(EntryId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPanel {
    Closed,
    Loading { ticket: u64 },
    Ready(AnalysisView),
    Failed,
}

impl AnalysisPanel {
    pub fn is_open(&self) -> bool {
        !matches!(self, AnalysisPanel::Closed)
    }
}

#[derive(Debug)]
pub struct Dashboard {
    entries: DiaryState,
    editor: EditorSession,
    focus: Focus,
    prompt: Option<Prompt>,
    analysis: AnalysisPanel,
    analysis_ticket: u64,
    deleting: HashSet<EntryId>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard {
            entries: DiaryState::new(),
            editor: EditorSession::new(),
            focus: Focus::List,
            prompt: None,
            analysis: AnalysisPanel::Closed,
            analysis_ticket: 0,
            deleting: HashSet::new(),
        }
    }

    pub fn entries(&self) -> &DiaryState {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut DiaryState {
        &mut self.entries
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorSession {
        &mut self.editor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = match (focus, self.editor.state()) {
            (Focus::Editor, EditorState::Hidden) => Focus::List,
            (focus, _) => focus,
        };
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn analysis(&self) -> &AnalysisPanel {
        &self.analysis
    }

    pub fn is_deleting(&self, id: EntryId) -> bool {
        self.deleting.contains(&id)
    }

    fn alert(&mut self, text: impl Into<String>) {
        self.prompt = Some(Prompt::Alert(text.into()));
    }

    pub fn refresh(&self) -> Effect {
        Effect::FetchEntries
    }

    /// Failures keep the previous snapshot and are only logged.
    pub fn entries_loaded(&mut self, result: ClientResult<Vec<DiaryEntry>>) {
        match result {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "entries loaded");
                self.entries.replace(entries);
            }
            Err(e) => tracing::error!(error = %e, "failed to load entries"),
        }
    }

    pub fn new_entry(&mut self) {
        self.editor.open_create();
        self.focus = Focus::Editor;
    }

    /// Row click. Unknown ids are ignored.
    pub fn view_entry(&mut self, id: EntryId) {
        if let Some(entry) = self.entries.find(id).cloned() {
            self.editor.open_view(&entry);
            self.focus = Focus::Editor;
        }
    }

    pub fn edit_entry(&mut self, id: EntryId) {
        if let Some(entry) = self.entries.find(id).cloned() {
            self.editor.open_edit(&entry);
            self.focus = Focus::Editor;
        }
    }

    pub fn view_selected(&mut self) {
        if let Some(id) = self.entries.selected_entry().map(|e| e.id) {
            self.view_entry(id);
        }
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.entries.selected_entry().map(|e| e.id) {
            self.edit_entry(id);
        }
    }

    /// View → Edit for the entry already open.
    pub fn edit_current(&mut self) {
        if let Some(id) = self.editor.current_entry_id() {
            self.edit_entry(id);
        }
    }

    /// Cancel / Close. The create form has neither, so there it only gives focus back to the list.
    pub fn dismiss_editor(&mut self) {
        if self.editor.state().dismiss_label().is_some() {
            self.editor.close();
        }
        self.focus = Focus::List;
    }

    pub fn submit(&mut self) -> Option<Effect> {
        match self.editor.begin_submit() {
            Ok(request) => {
                tracing::info!(id = ?request.id, "saving entry");
                Some(Effect::Save(request))
            }
            Err(SubmitError::Invalid(e)) => {
                self.alert(e.to_string());
                None
            }
            Err(e) => {
                tracing::debug!(reason = ?e, "submit ignored");
                None
            }
        }
    }

    pub fn entry_saved(&mut self, ticket: u64, result: ClientResult<MutationOutcome>) -> Vec<Effect> {
        match result {
            Ok(outcome) if outcome.succeeded() => {
                match self.editor.save_succeeded(ticket, outcome.confirmation_text()) {
                    Some(ticket) => vec![Effect::EndConfirmation { ticket }],
                    None => vec![Effect::FetchEntries],
                }
            }
            Ok(outcome) => {
                tracing::warn!(status = %outcome.status, error = ?outcome.body.error, "entry save rejected");
                self.editor.save_failed();
                self.alert(SAVE_FAILED);
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, "error saving entry");
                self.editor.save_failed();
                self.alert(GENERIC_ERROR);
                Vec::new()
            }
        }
    }

    /// The list is re-fetched whether or not the editor still showed the confirmation.
    pub fn confirmation_elapsed(&mut self, ticket: u64) -> Effect {
        self.editor.confirmation_elapsed(ticket);
        if self.editor.state() == &EditorState::Hidden {
            self.focus = Focus::List;
        }
        Effect::FetchEntries
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.entries.selected_entry().map(|e| e.id) {
            self.prompt = Some(Prompt::ConfirmDelete(id));
        }
    }

    pub fn request_delete_current(&mut self) {
        if let Some(id) = self.editor.current_entry_id() {
            self.prompt = Some(Prompt::ConfirmDelete(id));
        }
    }

    /// Answer to the delete confirmation. Does nothing if no confirmation is open.
    pub fn answer_delete(&mut self, confirmed: bool) -> Option<Effect> {
        let Some(Prompt::ConfirmDelete(id)) = self.prompt.clone() else {
            return None;
        };
        self.prompt = None;
        if !confirmed {
            return None;
        }
        if !self.deleting.insert(id) {
            tracing::debug!(id, "delete already in flight");
            return None;
        }
        tracing::info!(id, "deleting entry");
        Some(Effect::Delete(id))
    }

    pub fn entry_deleted(&mut self, id: EntryId, result: ClientResult<MutationOutcome>) -> Vec<Effect> {
        self.deleting.remove(&id);
        match result {
            Ok(outcome) if outcome.succeeded() => {
                self.editor.entry_deleted(id);
                if self.editor.state() == &EditorState::Hidden {
                    self.focus = Focus::List;
                }
                vec![Effect::FetchEntries]
            }
            Ok(outcome) => {
                tracing::warn!(id, status = %outcome.status, "entry delete rejected");
                self.alert(DELETE_FAILED);
                Vec::new()
            }
            Err(e) => {
                tracing::error!(id, error = %e, "error deleting entry");
                self.alert(GENERIC_ERROR);
                Vec::new()
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        if matches!(self.prompt, Some(Prompt::Alert(_))) {
            self.prompt = None;
        }
    }

    /// Opens the panel and asks for fresh statistics; nothing is cached between openings.
    pub fn open_analysis(&mut self) -> Effect {
        self.analysis_ticket += 1;
        self.analysis = AnalysisPanel::Loading {
            ticket: self.analysis_ticket,
        };
        Effect::FetchAnalysis {
            ticket: self.analysis_ticket,
        }
    }

    pub fn close_analysis(&mut self) {
        self.analysis = AnalysisPanel::Closed;
    }

    /// Results for a closed panel or an older opening are dropped.
    pub fn analysis_loaded(&mut self, ticket: u64, result: ClientResult<AnalysisSummary>) {
        if self.analysis != (AnalysisPanel::Loading { ticket }) {
            tracing::debug!(ticket, "stale analysis result dropped");
            return;
        }
        self.analysis = match result {
            Ok(summary) => AnalysisPanel::Ready(AnalysisView::from_summary(&summary)),
            Err(e) => {
                tracing::error!(error = %e, "error loading analysis");
                AnalysisPanel::Failed
            }
        };
    }
}
