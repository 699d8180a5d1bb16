use crate::diary_entry::{DiaryEntry, EntryId};

/// Snapshot of the server's entry list plus the list cursor.
///
/// The snapshot is only ever replaced whole after a successful fetch; nothing
/// here edits individual entries.
#[derive(Debug, Default)]
pub struct DiaryState {
    entries: Vec<DiaryEntry>,
    selected: usize,
}

impl DiaryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, entries: Vec<DiaryEntry>) {
        self.entries = entries;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn get_entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn find(&self, id: EntryId) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.selected)
    }

    pub fn selected_entry(&self) -> Option<&DiaryEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: EntryId) -> DiaryEntry {
        DiaryEntry {
            id,
            title: None,
            content: format!("entry {id}"),
            mood: None,
            created_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn empty_state_has_no_selection() {
        let state = DiaryState::new();
        assert!(state.is_empty());
        assert_eq!(state.selected_index(), None);
        assert!(state.selected_entry().is_none());
    }

    #[test]
    fn keeps_server_order() {
        let mut state = DiaryState::new();
        state.replace(vec![entry(9), entry(4), entry(7)]);
        let ids: Vec<_> = state.get_entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 4, 7]);
        assert_eq!(state.find(4).map(|e| e.id), Some(4));
        assert!(state.find(5).is_none());
    }

    #[test]
    fn cursor_is_bounded() {
        let mut state = DiaryState::new();
        state.replace(vec![entry(1), entry(2)]);
        state.select_previous();
        assert_eq!(state.selected_index(), Some(0));
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn shrinking_snapshot_clamps_cursor() {
        let mut state = DiaryState::new();
        state.replace(vec![entry(1), entry(2), entry(3)]);
        state.select_next();
        state.select_next();
        state.replace(vec![entry(1)]);
        assert_eq!(state.selected_entry().map(|e| e.id), Some(1));
        state.replace(Vec::new());
        assert_eq!(state.selected_index(), None);
    }
}
