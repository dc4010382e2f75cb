use crate::FilterVector;

/// Linear undo/redo log of filter snapshots.
///
/// The snapshot under `cursor` is always the active vector. Applying after an
/// undo drops everything past the cursor, so redo branches are not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterHistory {
    entries: Vec<FilterVector>,
    cursor: usize,
}

impl Default for FilterHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![FilterVector::IDENTITY],
            cursor: 0,
        }
    }

    pub fn current(&self) -> FilterVector {
        self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FilterVector] {
        &self.entries
    }

    /// Records `vector` as the new active state and returns the new cursor.
    /// Identical successive vectors are recorded as separate entries.
    pub fn apply(&mut self, vector: FilterVector) -> usize {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(vector);
        self.cursor = self.entries.len() - 1;
        self.cursor
    }

    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(FilterVector::IDENTITY);
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_preset, FilterChannel};

    fn brightness(value: f32) -> FilterVector {
        FilterVector::IDENTITY.with_channel(FilterChannel::Brightness, value)
    }

    #[test]
    fn new_history_holds_only_identity() {
        let history = FilterHistory::new();
        assert_eq!(history.entries(), &[FilterVector::IDENTITY]);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn cursor_tracks_last_entry_after_every_apply() {
        let mut history = FilterHistory::new();
        for step in 1..=6 {
            let cursor = history.apply(brightness(100.0 + step as f32));
            assert_eq!(cursor, history.len() - 1);
            assert_eq!(history.current(), brightness(100.0 + step as f32));
            assert!(!history.can_redo());
        }
    }

    #[test]
    fn undo_then_redo_restores_vector() {
        let mut history = FilterHistory::new();
        history.apply(brightness(110.0));
        history.apply(brightness(120.0));
        history.apply(brightness(130.0));
        assert!(history.undo());
        let middle = history.current();
        assert_eq!(middle, brightness(120.0));

        assert!(history.undo());
        assert!(history.redo());
        assert_eq!(history.current(), middle);
    }

    #[test]
    fn apply_after_undo_truncates_redo_branch() {
        let (a, b, c, d, e) = (
            FilterVector::IDENTITY,
            brightness(110.0),
            brightness(120.0),
            brightness(130.0),
            brightness(140.0),
        );
        let mut history = FilterHistory::new();
        history.apply(b);
        history.apply(c);
        history.apply(d);
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), 1);

        let cursor = history.apply(e);
        assert_eq!(cursor, 2);
        assert_eq!(history.entries(), &[a, b, e]);
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_and_redo_at_boundaries_are_no_ops() {
        let mut history = FilterHistory::new();
        assert!(!history.undo());
        assert_eq!(history.cursor(), 0);

        history.apply(brightness(150.0));
        assert!(!history.redo());
        assert_eq!(history.current(), brightness(150.0));
    }

    #[test]
    fn can_flags_follow_cursor_position() {
        let mut history = FilterHistory::new();
        history.apply(brightness(110.0));
        history.apply(brightness(120.0));
        assert!(history.can_undo() && !history.can_redo());
        history.undo();
        assert!(history.can_undo() && history.can_redo());
        history.undo();
        assert!(!history.can_undo() && history.can_redo());
    }

    #[test]
    fn identical_applies_are_not_coalesced() {
        let mut history = FilterHistory::new();
        let vivid = find_preset("Vivid").expect("preset").filters;
        history.apply(vivid);
        history.apply(vivid);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn reset_discards_everything() {
        let mut history = FilterHistory::new();
        history.apply(brightness(110.0));
        history.apply(brightness(120.0));
        history.undo();
        history.reset();
        assert_eq!(history.entries(), &[FilterVector::IDENTITY]);
        assert_eq!(history.cursor(), 0);
    }
}
