//! Entry editor: an explicit state machine plus the session bookkeeping around saves.

use crate::diary_entry::{DiaryEntry, EntryId, EntryPayload, MOODS};
use crate::error::ValidationError;
use crate::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Content,
    Mood,
}

impl EditorField {
    fn next(self) -> Self {
        match self {
            EditorField::Title => EditorField::Content,
            EditorField::Content => EditorField::Mood,
            EditorField::Mood => EditorField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            EditorField::Title => EditorField::Mood,
            EditorField::Content => EditorField::Title,
            EditorField::Mood => EditorField::Content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub title: TextInput,
    pub content: TextInput,
    mood: usize,
    focus: EditorField,
}

impl EntryForm {
    pub fn blank() -> Self {
        Self {
            title: TextInput::single_line(),
            content: TextInput::multi_line(),
            mood: 0,
            focus: EditorField::Title,
        }
    }

    /// Unknown moods are shown as "none", like an HTML select with no matching option.
    pub fn from_entry(entry: &DiaryEntry) -> Self {
        let mut form = Self::blank();
        form.title.set_value(entry.title.as_deref().unwrap_or(""));
        form.content.set_value(&entry.content);
        form.mood = entry
            .mood
            .as_deref()
            .and_then(|m| MOODS.iter().position(|candidate| *candidate == m))
            .unwrap_or(0);
        form
    }

    pub fn mood(&self) -> &'static str {
        MOODS[self.mood]
    }

    pub fn next_mood(&mut self) {
        self.mood = (self.mood + 1) % MOODS.len();
    }

    pub fn previous_mood(&mut self) {
        self.mood = (self.mood + MOODS.len() - 1) % MOODS.len();
    }

    pub fn focus(&self) -> EditorField {
        self.focus
    }

    pub fn focus_field(&mut self, field: EditorField) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            EditorField::Title => Some(&mut self.title),
            EditorField::Content => Some(&mut self.content),
            EditorField::Mood => None,
        }
    }

    /// Content must contain something besides whitespace; title and mood are optional.
    pub fn validate(&self) -> Result<EntryPayload, ValidationError> {
        if self.content.value().trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(EntryPayload {
            title: self.title.value().to_string(),
            content: self.content.value().to_string(),
            mood: self.mood().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    /// Welcome message shown instead of the editor.
    #[default]
    Hidden,
    Create(EntryForm),
    View {
        id: EntryId,
        heading: String,
        form: EntryForm,
    },
    Edit {
        id: EntryId,
        form: EntryForm,
    },
}

impl EditorState {
    pub fn heading(&self) -> &str {
        match self {
            EditorState::Hidden => "",
            EditorState::Create(_) => "New Entry",
            EditorState::View { heading, .. } => heading,
            EditorState::Edit { .. } => "Edit Entry",
        }
    }

    pub fn current_entry_id(&self) -> Option<EntryId> {
        match self {
            EditorState::View { id, .. } | EditorState::Edit { id, .. } => Some(*id),
            EditorState::Hidden | EditorState::Create(_) => None,
        }
    }

    pub fn form(&self) -> Option<&EntryForm> {
        match self {
            EditorState::Hidden => None,
            EditorState::Create(form)
            | EditorState::View { form, .. }
            | EditorState::Edit { form, .. } => Some(form),
        }
    }

    /// Only writable forms are handed out mutably.
    pub fn writable_form_mut(&mut self) -> Option<&mut EntryForm> {
        match self {
            EditorState::Create(form) | EditorState::Edit { form, .. } => Some(form),
            EditorState::Hidden | EditorState::View { .. } => None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, EditorState::View { .. })
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, EditorState::Create(_) | EditorState::Edit { .. })
    }

    /// Label of the dismiss action, if the state offers one.
    pub fn dismiss_label(&self) -> Option<&'static str> {
        match self {
            EditorState::View { .. } => Some("Close"),
            EditorState::Edit { .. } => Some("Cancel"),
            EditorState::Hidden | EditorState::Create(_) => None,
        }
    }
}

/// A save the dashboard should send. `ticket` identifies the editor state it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub id: Option<EntryId>,
    pub payload: EntryPayload,
    pub ticket: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub text: String,
    pub ticket: u64,
    after_update: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A save is running or its confirmation is still on screen.
    Busy,
    /// Nothing to submit in the current state.
    NotEditable,
    Invalid(ValidationError),
}

/// Editor state plus the save in flight and the confirmation window.
///
/// Every transition bumps the generation, which is what tickets refer to; a
/// late save result or timer for an older generation leaves the editor alone.
#[derive(Debug, Default)]
pub struct EditorSession {
    state: EditorState,
    generation: u64,
    saving: bool,
    confirmation: Option<Confirmation>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn current_entry_id(&self) -> Option<EntryId> {
        self.state.current_entry_id()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    fn transition(&mut self, state: EditorState) {
        self.state = state;
        self.generation += 1;
        self.confirmation = None;
    }

    pub fn open_create(&mut self) {
        self.transition(EditorState::Create(EntryForm::blank()));
    }

    pub fn open_view(&mut self, entry: &DiaryEntry) {
        let heading = match entry.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => "View Entry".to_string(),
        };
        self.transition(EditorState::View {
            id: entry.id,
            heading,
            form: EntryForm::from_entry(entry),
        });
    }

    pub fn open_edit(&mut self, entry: &DiaryEntry) {
        let mut form = EntryForm::from_entry(entry);
        form.focus_field(EditorField::Content);
        self.transition(EditorState::Edit { id: entry.id, form });
    }

    /// Cancel / Close.
    pub fn close(&mut self) {
        self.transition(EditorState::Hidden);
    }

    pub fn begin_submit(&mut self) -> Result<SaveRequest, SubmitError> {
        if self.saving || self.confirmation.is_some() {
            return Err(SubmitError::Busy);
        }
        let form = match &self.state {
            EditorState::Create(form) | EditorState::Edit { form, .. } => form,
            EditorState::Hidden | EditorState::View { .. } => return Err(SubmitError::NotEditable),
        };
        let payload = form.validate().map_err(SubmitError::Invalid)?;

        self.saving = true;
        Ok(SaveRequest {
            id: self.state.current_entry_id(),
            payload,
            ticket: self.generation,
        })
    }

    /// Records a successful save. Returns the confirmation ticket when the
    /// confirmation is shown, `None` if the editor moved on in the meantime.
    pub fn save_succeeded(&mut self, request_ticket: u64, text: String) -> Option<u64> {
        self.saving = false;
        if request_ticket != self.generation {
            return None;
        }
        let after_update = self.state.current_entry_id().is_some();
        self.confirmation = Some(Confirmation {
            text,
            ticket: self.generation,
            after_update,
        });
        Some(self.generation)
    }

    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    /// End of the confirmation window: a new entry returns to Hidden, an edited
    /// one to a blank create form.
    pub fn confirmation_elapsed(&mut self, ticket: u64) {
        let Some(confirmation) = &self.confirmation else {
            return;
        };
        if confirmation.ticket != ticket || ticket != self.generation {
            return;
        }
        let next = if confirmation.after_update {
            EditorState::Create(EntryForm::blank())
        } else {
            EditorState::Hidden
        };
        self.transition(next);
    }

    pub fn entry_deleted(&mut self, id: EntryId) {
        if self.current_entry_id() == Some(id) {
            self.close();
        }
    }
}
