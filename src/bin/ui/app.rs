//! Application state: the three editable fields and their undo history,
//! the current query's driver, and the handful of UI toggles (color
//! mode, help overlay, debug overlay) the original terminal tool offers.

use std::collections::HashSet;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use anagram_live::bag::Bag;
use anagram_live::dictionary::Dictionary;
use anagram_live::driver::{Driver, SearchOutcome};
use anagram_live::enumerator::{build_entries, SubsetEntry};
use anagram_live::history::{EditHistory, EditKind, EditState, Field};

/// How many results the user has scrolled past. Approaches `scroll_target`
/// smoothly rather than jumping, matching the original tool's damped
/// scroll-wheel feel.
#[derive(Default)]
struct Scroll {
    offset: i64,
    target: i64,
}

impl Scroll {
    fn step(&mut self) {
        self.offset += (self.target - self.offset + 3) / 4;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    TrueColor,
    Ansi16,
    Monochrome,
}

impl ColorMode {
    fn next(self) -> ColorMode {
        match self {
            ColorMode::TrueColor => ColorMode::Ansi16,
            ColorMode::Ansi16 => ColorMode::Monochrome,
            ColorMode::Monochrome => ColorMode::TrueColor,
        }
    }
}

pub struct App {
    pub dict: Dictionary,
    pub exclude_set: HashSet<String>,
    entries: Rc<[SubsetEntry]>,
    pub history: EditHistory,
    pub driver: Driver,
    pub outcome: Option<SearchOutcomeSummary>,
    pub color_mode: ColorMode,
    pub show_help: bool,
    pub show_debug: bool,
    pub scroll: i64,
    scroll_model: Scroll,
    pub should_quit: bool,
    dirty: bool,
}

/// A render-friendly snapshot of the last `SearchOutcome`; the borrowed
/// suggestions from `driver::SearchOutcome` don't outlive the call that
/// produced them, so the UI keeps its own owned copy.
pub enum SearchOutcomeSummary {
    Shortfall { missing_count: i32, suggestions: Vec<String> },
    Searching,
    Empty,
}

impl App {
    pub fn new(dict: Dictionary) -> App {
        let exclude_set = HashSet::new();
        let entries = build_entries(&dict, &exclude_set);
        App {
            dict,
            exclude_set,
            entries,
            history: EditHistory::new(EditState::default()),
            driver: Driver::new(),
            outcome: None,
            color_mode: ColorMode::TrueColor,
            show_help: false,
            show_debug: false,
            scroll: 0,
            scroll_model: Scroll::default(),
            should_quit: false,
            dirty: true,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => self.dirty = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('f') => {
                    self.color_mode = self.color_mode.next();
                    return;
                }
                KeyCode::Char('d') => {
                    self.show_debug = !self.show_debug;
                    return;
                }
                KeyCode::Char('z') => {
                    self.history.undo();
                    self.dirty = true;
                    return;
                }
                KeyCode::Char('y') => {
                    self.history.redo();
                    self.dirty = true;
                    return;
                }
                KeyCode::Char('w') | KeyCode::Backspace => {
                    self.delete_word_before();
                    return;
                }
                KeyCode::Delete => {
                    self.delete_word_after();
                    return;
                }
                KeyCode::Char('u') => {
                    self.reset_to_start();
                    return;
                }
                KeyCode::Char('k') => {
                    self.reset_to_end();
                    return;
                }
                _ => {}
            }
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char('d') = key.code {
                self.delete_word_after();
                return;
            }
        }
        match key.code {
            KeyCode::F(1) => self.show_help = !self.show_help,
            KeyCode::F(12) => self.show_debug = !self.show_debug,
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Tab => self.switch_field(1),
            KeyCode::BackTab => self.switch_field(-1),
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.scroll_model.target = (self.scroll_model.target - 1).max(0),
            KeyCode::Down => self.scroll_model.target += 1,
            KeyCode::Backspace => self.edit_remove(),
            KeyCode::Char(c) => self.edit_insert(c),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_model.target += 3,
            MouseEventKind::ScrollUp => self.scroll_model.target = (self.scroll_model.target - 3).max(0),
            MouseEventKind::Down(_) => {
                // Row-to-field mapping is resolved in `render`, which owns
                // layout; clicks are translated to field switches there in
                // a later pass. For now a click anywhere cycles focus,
                // matching a click "selecting the nearest field".
                self.switch_field_recorded(1, EditKind::Click);
            }
            _ => {}
        }
    }

    fn switch_field(&mut self, delta: i32) {
        self.switch_field_recorded(delta, EditKind::FieldSwitch);
    }

    fn switch_field_recorded(&mut self, delta: i32, kind: EditKind) {
        let mut state = self.history.current().clone();
        let order = [Field::Input, Field::Include, Field::Exclude];
        let idx = order.iter().position(|f| *f == state.field).unwrap_or(0) as i32;
        let next = (idx + delta).rem_euclid(order.len() as i32) as usize;
        state.field = order[next];
        state.cursor = field_text(&state).len();
        self.history.record(state, kind);
        self.dirty = true;
    }

    fn move_cursor(&mut self, delta: i32) {
        let mut state = self.history.current().clone();
        let len = field_text(&state).len() as i32;
        let new_cursor = (state.cursor as i32 + delta).clamp(0, len) as usize;
        if new_cursor == state.cursor {
            return;
        }
        state.cursor = new_cursor;
        self.history.record(state, EditKind::CursorMove);
        self.dirty = true;
    }

    fn edit_insert(&mut self, c: char) {
        let mut state = self.history.current().clone();
        let cursor = state.cursor;
        let kind = if c == ' ' { EditKind::WordBoundary } else { EditKind::Typing };
        {
            let text = field_text_mut(&mut state);
            text.insert(cursor, c);
        }
        state.cursor = cursor + c.len_utf8();
        self.history.record(state, kind);
        self.dirty = true;
    }

    fn edit_remove(&mut self) {
        let mut state = self.history.current().clone();
        if state.cursor == 0 {
            return;
        }
        let cursor = state.cursor;
        let removed = {
            let text = field_text_mut(&mut state);
            let ch = text[..cursor].chars().next_back();
            if let Some(ch) = ch {
                text.remove(cursor - ch.len_utf8());
            }
            ch
        };
        let Some(removed) = removed else { return };
        state.cursor = cursor - removed.len_utf8();
        self.history.record(state, EditKind::Typing);
        self.dirty = true;
    }

    /// Delete the word immediately before the cursor (Ctrl+W /
    /// Ctrl+Backspace), one undo unit.
    fn delete_word_before(&mut self) {
        let mut state = self.history.current().clone();
        let cursor = state.cursor;
        let boundary = find_previous_word_boundary(field_text(&state), cursor);
        if boundary == cursor {
            return;
        }
        field_text_mut(&mut state).replace_range(boundary..cursor, "");
        state.cursor = boundary;
        self.history.record(state, EditKind::WordDeletion);
        self.dirty = true;
    }

    /// Delete the word immediately after the cursor (Alt+D / Ctrl+Delete),
    /// one undo unit.
    fn delete_word_after(&mut self) {
        let mut state = self.history.current().clone();
        let cursor = state.cursor;
        let boundary = find_next_word_boundary(field_text(&state), cursor);
        if boundary == cursor {
            return;
        }
        field_text_mut(&mut state).replace_range(cursor..boundary, "");
        self.history.record(state, EditKind::WordDeletion);
        self.dirty = true;
    }

    /// Clear from the start of the field up to the cursor (Ctrl+U): an
    /// explicit reset of everything typed so far in this field.
    fn reset_to_start(&mut self) {
        let mut state = self.history.current().clone();
        let cursor = state.cursor;
        if cursor == 0 {
            return;
        }
        field_text_mut(&mut state).replace_range(0..cursor, "");
        state.cursor = 0;
        self.history.record(state, EditKind::Reset);
        self.dirty = true;
    }

    /// Clear from the cursor to the end of the field (Ctrl+K): an
    /// explicit reset of everything after the cursor.
    fn reset_to_end(&mut self) {
        let mut state = self.history.current().clone();
        let cursor = state.cursor;
        let len = field_text(&state).len();
        if cursor == len {
            return;
        }
        field_text_mut(&mut state).replace_range(cursor..len, "");
        self.history.record(state, EditKind::Reset);
        self.dirty = true;
    }

    /// Upper bound on chain depth: a solution can never need more words
    /// than there are letters left to cover once the include is
    /// subtracted out (spec.md §3's `chain.len() <= sum(target)`).
    fn max_phrase_words(input: Bag, include: Bag) -> usize {
        input.sub(&include).clamp_nonneg().sum().max(1) as usize
    }

    /// Advance the active query by `budget` steps, (re)starting it first
    /// if the editable fields changed since the last tick.
    pub fn tick(&mut self, budget: usize) {
        self.scroll_model.step();
        self.scroll = self.scroll_model.offset;

        if self.dirty {
            self.dirty = false;
            let state = self.history.current().clone();
            let input = Bag::from_bytes(state.input.as_bytes()).unwrap_or(Bag::EMPTY);
            let include = Bag::from_bytes(state.include.as_bytes()).unwrap_or(Bag::EMPTY);
            let exclude: HashSet<String> =
                state.exclude.split_whitespace().map(str::to_string).collect();
            if exclude != self.exclude_set {
                self.exclude_set = exclude;
                self.entries = build_entries(&self.dict, &self.exclude_set);
            }
            let max_words = Self::max_phrase_words(input, include);
            let outcome =
                self.driver.reset(&self.dict, &self.exclude_set, &self.entries, input, include, max_words);
            self.outcome = Some(match outcome {
                SearchOutcome::Shortfall { missing, suggestions } => SearchOutcomeSummary::Shortfall {
                    missing_count: missing.sum(),
                    suggestions: suggestions
                        .iter()
                        .map(|words| {
                            words.iter().map(|&id| self.dict.word(id)).collect::<Vec<_>>().join(" ")
                        })
                        .collect(),
                },
                SearchOutcome::Searching => SearchOutcomeSummary::Searching,
                SearchOutcome::Empty => SearchOutcomeSummary::Empty,
            });
        }

        self.driver.advance(&self.entries, budget);
    }

    pub fn render_word(&self, id: u32) -> &str {
        self.dict.word(id)
    }
}

fn field_text(state: &EditState) -> &str {
    match state.field {
        Field::Input => &state.input,
        Field::Include => &state.include,
        Field::Exclude => &state.exclude,
    }
}

fn field_text_mut(state: &mut EditState) -> &mut String {
    match state.field {
        Field::Input => &mut state.input,
        Field::Include => &mut state.include,
        Field::Exclude => &mut state.exclude,
    }
}

/// Byte offset of the start of the word containing (or just before)
/// `start`, treating a run of spaces as a separator. Ported from
/// `find_previous_word_boundary` in the grounding C source.
fn find_previous_word_boundary(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut result = start.min(bytes.len());
    let mut encountered_nonspace = false;
    while result > 0 {
        encountered_nonspace |= bytes[result - 1] != b' ';
        result -= 1;
        if encountered_nonspace && result > 0 && bytes[result - 1] == b' ' {
            break;
        }
    }
    result
}

/// Byte offset just past the end of the word containing (or just after)
/// `start`. Ported from `find_next_word_boundary` in the grounding C
/// source.
fn find_next_word_boundary(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut result = start.min(bytes.len());
    let mut encountered_nonspace = false;
    while result < bytes.len() {
        encountered_nonspace |= bytes[result] != b' ';
        result += 1;
        if encountered_nonspace && result < bytes.len() && bytes[result] == b' ' {
            break;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_word_boundary_skips_trailing_space_run() {
        assert_eq!(find_previous_word_boundary("cat dog", 7), 4);
        assert_eq!(find_previous_word_boundary("cat   dog", 9), 6);
        assert_eq!(find_previous_word_boundary("cat", 3), 0);
        assert_eq!(find_previous_word_boundary("", 0), 0);
    }

    #[test]
    fn next_word_boundary_stops_before_following_space() {
        assert_eq!(find_next_word_boundary("cat dog", 0), 3);
        assert_eq!(find_next_word_boundary("cat dog", 4), 7);
        assert_eq!(find_next_word_boundary("cat", 0), 3);
        assert_eq!(find_next_word_boundary("", 0), 0);
    }
}
