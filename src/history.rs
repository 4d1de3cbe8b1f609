//! Undo/redo snapshot chain over the three editable fields plus cursor
//! and scroll state. Edits at fine granularity (one keystroke) coalesce
//! into one snapshot until a coarse event boundary is crossed.
//!
//! The chain tracks checkpoints only, not every keystroke: the `live`
//! state is what the UI actually renders and always reflects the most
//! recent `record` call, independent of whether that call grew the undo
//! chain. This mirrors `record_for_undo` in the grounding C source
//! (`examples/original_source/src/main.c:1098-1155`), which mutates the
//! live `ui_state_t` unconditionally but only *additionally* clones it
//! into a new undo entry when the editable text differs from the last
//! entry's text — a cursor-only move never touches a stored entry.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditState {
    pub input: String,
    pub include: String,
    pub exclude: String,
    pub field: Field,
    pub cursor: usize,
    pub scroll: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Input,
    Include,
    Exclude,
}

/// A coarse edit-boundary kind. Consecutive edits of the same kind
/// coalesce into the checkpoint already on top of the undo stack; any
/// other kind (or a kind change) pushes a new checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKind {
    /// Plain character insertion mid-word.
    Typing,
    /// A space was just typed after a word: word boundary.
    WordBoundary,
    /// A whole word was deleted in one action (e.g. Ctrl+W, Alt+D).
    WordDeletion,
    /// Cursor moved without changing text.
    CursorMove,
    /// Active field changed.
    FieldSwitch,
    /// A mouse click landed in a field.
    Click,
    /// An explicit reset (e.g. clear-to-start/clear-to-end).
    Reset,
}

pub struct EditHistory {
    /// Checkpoints captured at coarse edit boundaries; `entries[0]` is
    /// always the initial state.
    entries: Vec<EditState>,
    /// Index into `entries` of the checkpoint `live` was last derived
    /// from (or restored to, via `undo`/`redo`).
    entry_cursor: usize,
    /// The state actually rendered and edited; diverges from
    /// `entries[entry_cursor]` between checkpoints (e.g. while the
    /// cursor is moving with no text change).
    live: EditState,
    last_kind: Option<EditKind>,
}

impl EditHistory {
    pub fn new(initial: EditState) -> EditHistory {
        EditHistory { entries: vec![initial.clone()], entry_cursor: 0, live: initial, last_kind: None }
    }

    pub fn current(&self) -> &EditState {
        &self.live
    }

    /// How many checkpoints back of the chain tip `entry_cursor` sits;
    /// `0` means there is nothing left to undo.
    pub fn undo_depth(&self) -> usize {
        self.entry_cursor
    }

    /// Record a new live state reached via `kind`. `live` is always
    /// updated. A checkpoint is captured only if `input`, `include`, or
    /// `exclude` actually changed from `live`'s previous value; a
    /// cursor/scroll-only move (or a field switch that lands on the
    /// same field) never touches the stored chain, so `undo` still
    /// restores the cursor position as it was at the last text-changing
    /// edit. When text did change, consecutive edits of the same
    /// coalescing `kind` replace the checkpoint already on top of the
    /// stack rather than growing it; any other kind (or a kind change)
    /// truncates the undone-but-not-redone branch and pushes a new one.
    pub fn record(&mut self, state: EditState, kind: EditKind) {
        let text_changed = state.input != self.live.input
            || state.include != self.live.include
            || state.exclude != self.live.exclude;

        if !text_changed {
            self.live = state;
            self.last_kind = Some(kind);
            return;
        }

        let coalesce = self.last_kind == Some(kind)
            && matches!(kind, EditKind::Typing | EditKind::CursorMove)
            && self.entry_cursor == self.entries.len() - 1;

        if coalesce {
            self.entries[self.entry_cursor] = state.clone();
        } else {
            self.entries.truncate(self.entry_cursor + 1);
            self.entries.push(state.clone());
            self.entry_cursor = self.entries.len() - 1;
        }
        self.live = state;
        self.last_kind = Some(kind);
    }

    pub fn undo(&mut self) -> bool {
        if self.entry_cursor == 0 {
            return false;
        }
        self.entry_cursor -= 1;
        self.live = self.entries[self.entry_cursor].clone();
        self.last_kind = None;
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.entry_cursor + 1 >= self.entries.len() {
            return false;
        }
        self.entry_cursor += 1;
        self.live = self.entries[self.entry_cursor].clone();
        self.last_kind = None;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.entry_cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.entry_cursor + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(input: &str) -> EditState {
        EditState { input: input.to_string(), ..Default::default() }
    }

    #[test]
    fn coalesces_consecutive_typing() {
        let mut h = EditHistory::new(state(""));
        h.record(state("c"), EditKind::Typing);
        h.record(state("ca"), EditKind::Typing);
        h.record(state("cat"), EditKind::Typing);
        assert_eq!(h.current().input, "cat");
        assert!(h.undo());
        assert_eq!(h.current().input, "");
    }

    #[test]
    fn word_boundary_breaks_coalescing() {
        let mut h = EditHistory::new(state(""));
        h.record(state("cat"), EditKind::Typing);
        h.record(state("cat "), EditKind::WordBoundary);
        h.record(state("cat d"), EditKind::Typing);
        assert!(h.undo());
        assert_eq!(h.current().input, "cat ");
        assert!(h.undo());
        assert_eq!(h.current().input, "cat");
        assert!(h.undo());
        assert_eq!(h.current().input, "");
        assert!(!h.undo());
    }

    #[test]
    fn cursor_only_move_does_not_grow_chain() {
        let mut h = EditHistory::new(state("cat"));
        h.record(state("cat"), EditKind::Typing);
        let mut moved = h.current().clone();
        moved.cursor = 2;
        h.record(moved, EditKind::CursorMove);
        assert!(!h.can_undo());
        assert_eq!(h.current().cursor, 2);
    }

    /// Regression test for the scenario in the grounding source
    /// (`record_for_undo`, `main.c:1098-1155`): a cursor move that
    /// doesn't change text must not overwrite the cursor position
    /// stored in the last text-changing checkpoint, or `undo` restores
    /// the wrong cursor.
    #[test]
    fn cursor_move_does_not_clobber_checkpoint_cursor() {
        let mut h = EditHistory::new(state(""));
        let mut typed = state("cat");
        typed.cursor = 3;
        h.record(typed, EditKind::Typing);

        let mut moved = h.current().clone();
        moved.cursor = 1;
        h.record(moved, EditKind::CursorMove);
        assert_eq!(h.current().cursor, 1, "live cursor follows the move");

        let mut typed_s = state("cats");
        typed_s.input = "cats".to_string();
        typed_s.cursor = 2;
        h.record(typed_s, EditKind::Typing);

        assert!(h.undo());
        assert_eq!(h.current().input, "cat");
        assert_eq!(h.current().cursor, 3, "checkpoint cursor was never clobbered by the cursor-only move");
    }

    #[test]
    fn redo_after_undo() {
        let mut h = EditHistory::new(state(""));
        h.record(state("cat"), EditKind::WordBoundary);
        h.undo();
        assert!(h.redo());
        assert_eq!(h.current().input, "cat");
        assert!(!h.redo());
    }

    #[test]
    fn new_edit_after_undo_truncates_redo_branch() {
        let mut h = EditHistory::new(state(""));
        h.record(state("cat"), EditKind::WordBoundary);
        h.record(state("cats"), EditKind::WordBoundary);
        h.undo();
        h.record(state("cab"), EditKind::WordBoundary);
        assert!(!h.can_redo());
        assert_eq!(h.current().input, "cab");
    }

    #[test]
    fn word_deletion_and_reset_push_distinct_checkpoints() {
        let mut h = EditHistory::new(state("cat dog"));
        let mut after_word_delete = state("cat ");
        after_word_delete.cursor = 4;
        h.record(after_word_delete, EditKind::WordDeletion);
        assert!(h.can_undo());

        let mut after_reset = state("");
        after_reset.cursor = 0;
        h.record(after_reset, EditKind::Reset);
        assert!(h.undo());
        assert_eq!(h.current().input, "cat ");
        assert!(h.undo());
        assert_eq!(h.current().input, "cat dog");
    }
}
