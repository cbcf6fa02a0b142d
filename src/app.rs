//! Application state and core logic for the mood tracker.
//!
//! This module contains the `App` struct, which owns the entry store handle,
//! the last rendered history view, the input buffer, and modal/status state.
//! Every user action is handled here synchronously; failures become a dialog
//! and leave the previously displayed entries untouched.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{error, info, warn};
use ratatui::widgets::ListState;

use crate::models::{Dialog, MoodEntry};
use crate::prefs::Preferences;
use crate::store::{EntryStore, StoreError, StoreResult};
use crate::ui::{effective_width, RenderedView};
use crate::utils::on_off;

/// Quiet period after the last resize event before the list is re-wrapped
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Lines moved by PageUp/PageDown
const PAGE_STEP: isize = 10;

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    viewport_width: usize,
    at: Instant,
}

/// Application state
pub struct App {
    store: EntryStore,
    pub prefs: Preferences,
    prefs_path: Option<PathBuf>,
    // Last list read from the store, newest first
    pub entries: Vec<MoodEntry>,
    // Visual lines for `entries`, reused for selection resolution
    pub view: RenderedView,
    pub list_state: ListState,
    pub input: String,
    pub status: String,
    pub dialog: Option<Dialog>,
    viewport_width: usize,
    pending_resize: Option<PendingResize>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        store: EntryStore,
        prefs: Preferences,
        prefs_path: Option<PathBuf>,
        viewport_width: usize,
    ) -> Self {
        let mut app = Self {
            store,
            prefs,
            prefs_path,
            entries: Vec::new(),
            view: RenderedView::default(),
            list_state: ListState::default(),
            input: String::new(),
            status: "Ready".to_string(),
            dialog: None,
            viewport_width,
            pending_resize: None,
            should_quit: false,
        };

        if app.reload_entries() {
            app.status = format!("Loaded {} mood entries", app.entries.len());
        }
        app
    }

    /// Release the store connection
    pub fn shutdown(self) -> StoreResult<()> {
        self.store.close()
    }

    /// Re-read all entries and rebuild the view.
    ///
    /// On failure a "Load Error" dialog is shown and the current entries and
    /// view are kept.
    pub fn reload_entries(&mut self) -> bool {
        match self.store.list_all_descending() {
            Ok(entries) => {
                self.entries = entries;
                self.rebuild_view();
                true
            }
            Err(err) => {
                self.report_storage_error("Load Error", "Failed to load mood entries", &err);
                false
            }
        }
    }

    /// Lay out `entries` again for the current width and wrap setting,
    /// keeping the selected entry selected where possible.
    pub fn rebuild_view(&mut self) {
        let previous_index = self.list_state.selected();
        let previous_owner = previous_index.and_then(|i| self.view.resolve(i));

        self.view = if self.prefs.list_word_wrap {
            RenderedView::rebuild(&self.entries, self.viewport_width)
        } else {
            RenderedView::unwrapped(&self.entries)
        };

        let selection = if self.view.is_empty() {
            None
        } else {
            previous_owner
                .and_then(|id| self.view.first_line_of(id))
                .or_else(|| {
                    let last = self.view.len() - 1;
                    previous_index.map(|i| self.step_off_separator(i.min(last), true))
                })
        };
        self.list_state.select(selection);
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Save the input field as a new entry
    pub fn submit_input(&mut self) {
        if self.input.trim().is_empty() {
            self.dialog = Some(Dialog::notice(
                "Empty Entry",
                "Please enter your mood before saving.",
            ));
            return;
        }

        match self.store.append(&self.input) {
            Ok(entry) => {
                self.input.clear();
                self.status = format!("Mood saved at {}", entry.created_at);
                self.reload_entries();
            }
            Err(err) => self.report_storage_error("Save Error", "Failed to save mood", &err),
        }
    }

    /// Delete the entry owning the selected visual line
    pub fn delete_selected(&mut self) {
        let owner = self
            .list_state
            .selected()
            .and_then(|index| self.view.resolve(index));
        let Some(id) = owner else {
            self.dialog = Some(Dialog::notice(
                "No Selection",
                "Please select an entry to delete.",
            ));
            return;
        };

        let label = self
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .map(MoodEntry::display_line)
            .unwrap_or_default();

        match self.store.delete_by_id(id) {
            Ok(true) => {
                self.status = format!("Entry deleted: {}", label);
                self.reload_entries();
            }
            Ok(false) => {
                self.status = "Entry was already deleted".to_string();
                self.reload_entries();
            }
            Err(err) => self.report_storage_error("Delete Error", "Failed to delete entry", &err),
        }
    }

    /// Ask for confirmation before clearing everything
    pub fn request_clear_all(&mut self) {
        self.dialog = Some(Dialog::ConfirmClear);
    }

    /// Delete all entries (after the user confirmed)
    pub fn confirm_clear_all(&mut self) {
        match self.store.clear() {
            Ok(_) => {
                self.entries.clear();
                self.list_state.select(None);
                self.rebuild_view();
                self.status = "All entries cleared".to_string();
            }
            Err(err) => self.report_storage_error("Clear Error", "Failed to clear entries", &err),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.prefs.theme = self.prefs.theme.toggle();
        self.persist_prefs();
        self.status = format!("Theme: {}", self.prefs.theme.label());
    }

    pub fn toggle_input_wrap(&mut self) {
        self.prefs.input_word_wrap = !self.prefs.input_word_wrap;
        self.persist_prefs();
        self.status = format!("Input word wrap: {}", on_off(self.prefs.input_word_wrap));
    }

    pub fn toggle_list_wrap(&mut self) {
        self.prefs.list_word_wrap = !self.prefs.list_word_wrap;
        self.persist_prefs();
        self.rebuild_view();
        self.status = format!("List word wrap: {}", on_off(self.prefs.list_word_wrap));
    }

    /// Insert pasted text into the input field; line breaks become spaces
    pub fn paste(&mut self, text: &str) {
        self.input
            .extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
    }

    // ========================================================================
    // Resize handling
    // ========================================================================

    /// Record a new list viewport width; applied once resizing settles.
    pub fn note_resize(&mut self, viewport_width: usize, now: Instant) {
        self.pending_resize = Some(PendingResize {
            viewport_width,
            at: now,
        });
    }

    /// Apply a settled resize. Returns true when the list was re-wrapped.
    pub fn apply_pending_resize(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_resize else {
            return false;
        };
        if now.saturating_duration_since(pending.at) < RESIZE_DEBOUNCE {
            return false;
        }

        self.pending_resize = None;
        self.viewport_width = pending.viewport_width;

        if !self.prefs.list_word_wrap {
            return false;
        }
        if self.view.wrap_width() == Some(effective_width(self.viewport_width)) {
            return false;
        }

        self.rebuild_view();
        true
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    pub fn select_first(&mut self) {
        if !self.view.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.view.is_empty() {
            self.list_state.select(Some(self.view.len() - 1));
        }
    }

    /// Move by `delta` visual lines, stepping over blank separators
    fn move_selection(&mut self, delta: isize) {
        if self.view.is_empty() {
            self.list_state.select(None);
            return;
        }

        let last = self.view.len() - 1;
        let next = match self.list_state.selected() {
            None if delta < 0 => last,
            None => 0,
            Some(index) => index.saturating_add_signed(delta).min(last),
        };

        let next = self.step_off_separator(next, delta >= 0);
        self.list_state.select(Some(next));
    }

    /// Nearest entry line to `index`, moving `forward` when it is a separator.
    fn step_off_separator(&self, index: usize, forward: bool) -> usize {
        // Separators sit between two entry lines, never at either end
        if self.view.resolve(index).is_some() {
            return index;
        }
        if forward && index + 1 < self.view.len() {
            index + 1
        } else {
            index.saturating_sub(1)
        }
    }

    // ========================================================================
    // Input dispatch
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('d') if ctrl => self.delete_selected(),
            KeyCode::Char('l') if ctrl => self.request_clear_all(),
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::Char('e') if ctrl => self.toggle_input_wrap(),
            KeyCode::Char('w') if ctrl => self.toggle_list_wrap(),
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::Delete => self.delete_selected(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match self.dialog {
            Some(Dialog::ConfirmClear) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.dialog = None;
                    self.confirm_clear_all();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.dialog = None;
                    self.status = "Clear all cancelled".to_string();
                }
                _ => {}
            },
            Some(_) => self.dialog = None,
            None => {}
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn persist_prefs(&self) {
        let Some(path) = self.prefs_path.as_deref() else {
            return;
        };
        match self.prefs.save(path) {
            Ok(()) => info!(
                "event=prefs_save module=app status=ok path={}",
                path.display()
            ),
            Err(err) => warn!(
                "event=prefs_save module=app status=error path={} error={}",
                path.display(),
                err
            ),
        }
    }

    fn report_storage_error(&mut self, title: &str, context: &str, err: &StoreError) {
        error!(
            "event=user_action module=app status=error action={} error={}",
            title, err
        );
        self.dialog = Some(Dialog::error(title, format!("{}: {}", context, err)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeMode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App {
        App::new(
            EntryStore::open_in_memory().unwrap(),
            Preferences::default(),
            None,
            70,
        )
    }

    fn type_and_submit(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
    }

    fn stored_texts(app: &App) -> Vec<String> {
        app.store
            .list_all_descending()
            .unwrap()
            .into_iter()
            .map(|e| e.text)
            .collect()
    }

    #[test]
    fn test_new_app_reports_loaded_count() {
        let app = test_app();
        assert_eq!(app.status, "Loaded 0 mood entries");
        assert!(app.view.is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_submit_saves_clears_input_and_renders() {
        let mut app = test_app();
        type_and_submit(&mut app, "  happy ");

        assert!(app.input.is_empty());
        assert_eq!(stored_texts(&app), vec!["happy"]);
        assert_eq!(app.view.len(), 1);
        assert!(app.view.lines()[0].text.ends_with(" - happy"));
        assert!(app.status.starts_with("Mood saved at "));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_submit_whitespace_shows_notice_without_row() {
        let mut app = test_app();
        app.input = "   ".to_string();
        app.submit_input();

        assert!(matches!(
            app.dialog,
            Some(Dialog::Notice { ref title, .. }) if title == "Empty Entry"
        ));
        assert!(stored_texts(&app).is_empty());
        assert_eq!(app.input, "   ");
    }

    #[test]
    fn test_happy_then_sad_renders_three_lines() {
        let mut app = test_app();
        type_and_submit(&mut app, "happy");
        type_and_submit(&mut app, "sad");

        let sad = app.entries[0].id;
        let happy = app.entries[1].id;
        assert_eq!(app.view.len(), 3);
        assert_eq!(app.view.resolve(0), Some(sad));
        assert_eq!(app.view.resolve(1), None);
        assert_eq!(app.view.resolve(2), Some(happy));
    }

    #[test]
    fn test_delete_selected_removes_owning_entry() {
        let mut app = test_app();
        type_and_submit(&mut app, "happy");
        type_and_submit(&mut app, "sad");

        app.list_state.select(Some(2));
        app.handle_key(key(KeyCode::Delete));

        assert_eq!(stored_texts(&app), vec!["sad"]);
        assert!(app.status.starts_with("Entry deleted: "));
        assert!(app.status.ends_with(" - happy"));
        assert_eq!(app.view.len(), 1);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_delete_on_wrapped_continuation_line() {
        let mut app = test_app();
        type_and_submit(&mut app, "short");
        type_and_submit(&mut app, &"long mood text ".repeat(12));
        assert!(app.view.first_line_of(app.entries[1].id).unwrap() > 2);

        // Second visual line of the long entry
        app.list_state.select(Some(1));
        app.delete_selected();

        assert_eq!(stored_texts(&app), vec!["short"]);
    }

    #[test]
    fn test_delete_wrapped_entry_leaves_selection_on_an_entry() {
        let mut app = App::new(
            EntryStore::open_in_memory().unwrap(),
            Preferences::default(),
            None,
            30,
        );
        type_and_submit(&mut app, "c");
        type_and_submit(&mut app, "b");
        type_and_submit(&mut app, &"xxxxxxxx ".repeat(10));
        assert!(app.view.first_line_of(app.entries[1].id).unwrap() > 2);

        // Continuation line of the long, newest entry
        app.list_state.select(Some(1));
        app.delete_selected();

        assert_eq!(stored_texts(&app), vec!["b", "c"]);
        let selected = app.list_state.selected().unwrap();
        assert!(app.view.resolve(selected).is_some());

        app.handle_key(key(KeyCode::Delete));
        assert!(app.dialog.is_none());
        assert_eq!(stored_texts(&app).len(), 1);
    }

    #[test]
    fn test_delete_separator_or_nothing_shows_notice() {
        let mut app = test_app();
        app.delete_selected();
        assert!(matches!(
            app.dialog,
            Some(Dialog::Notice { ref title, .. }) if title == "No Selection"
        ));
        app.dialog = None;

        type_and_submit(&mut app, "a");
        type_and_submit(&mut app, "b");
        app.list_state.select(Some(1));
        app.delete_selected();

        assert!(matches!(app.dialog, Some(Dialog::Notice { .. })));
        assert_eq!(stored_texts(&app).len(), 2);
    }

    #[test]
    fn test_clear_all_requires_confirmation() {
        let mut app = test_app();
        type_and_submit(&mut app, "a");
        type_and_submit(&mut app, "b");

        app.handle_key(ctrl('l'));
        assert_eq!(app.dialog, Some(Dialog::ConfirmClear));
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.dialog.is_none());
        assert_eq!(stored_texts(&app).len(), 2);
        assert_eq!(app.status, "Clear all cancelled");

        app.handle_key(ctrl('l'));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(stored_texts(&app).is_empty());
        assert!(app.view.is_empty());
        assert_eq!(app.list_state.selected(), None);
        assert_eq!(app.status, "All entries cleared");
    }

    #[test]
    fn test_confirm_dialog_ignores_unrelated_keys() {
        let mut app = test_app();
        app.request_clear_all();
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.dialog, Some(Dialog::ConfirmClear));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_notice_is_dismissed_by_any_key() {
        let mut app = test_app();
        app.submit_input();
        assert!(app.dialog.is_some());
        app.handle_key(key(KeyCode::Char('z')));
        assert!(app.dialog.is_none());
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_storage_failure_keeps_displayed_state() {
        let mut app = test_app();
        type_and_submit(&mut app, "kept");
        app.list_state.select(Some(0));
        let entries_before = app.entries.clone();
        let view_before = app.view.clone();

        app.store
            .connection()
            .execute_batch("DROP TABLE moods;")
            .unwrap();

        app.input = "lost".to_string();
        app.submit_input();
        assert!(matches!(
            app.dialog,
            Some(Dialog::Error { ref title, .. }) if title == "Save Error"
        ));
        assert_eq!(app.input, "lost");
        assert_eq!(app.entries, entries_before);
        assert_eq!(app.view, view_before);

        app.dialog = None;
        app.delete_selected();
        assert!(matches!(
            app.dialog,
            Some(Dialog::Error { ref title, .. }) if title == "Delete Error"
        ));
        assert_eq!(app.view, view_before);
        assert_eq!(app.list_state.selected(), Some(0));

        app.dialog = None;
        app.confirm_clear_all();
        assert!(matches!(
            app.dialog,
            Some(Dialog::Error { ref title, .. }) if title == "Clear Error"
        ));
        assert_eq!(app.entries, entries_before);
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut app = test_app();
        type_and_submit(&mut app, &"resize me please ".repeat(8));
        assert_eq!(app.view.wrap_width(), Some(70));

        let start = Instant::now();
        app.note_resize(40, start);
        assert!(!app.apply_pending_resize(start + Duration::from_millis(50)));
        app.note_resize(30, start + Duration::from_millis(100));
        assert!(!app.apply_pending_resize(start + Duration::from_millis(200)));
        assert_eq!(app.view.wrap_width(), Some(70));

        assert!(app.apply_pending_resize(start + Duration::from_millis(260)));
        assert_eq!(app.view.wrap_width(), Some(30));
        assert!(!app.apply_pending_resize(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_resize_to_same_width_skips_rebuild() {
        let mut app = test_app();
        let start = Instant::now();
        app.note_resize(70, start);
        assert!(!app.apply_pending_resize(start + RESIZE_DEBOUNCE));
    }

    #[test]
    fn test_resize_without_list_wrap_does_not_rebuild() {
        let mut app = test_app();
        app.toggle_list_wrap();
        type_and_submit(&mut app, &"no wrap here ".repeat(10));
        assert_eq!(app.view.len(), 1);

        let start = Instant::now();
        app.note_resize(30, start);
        assert!(!app.apply_pending_resize(start + RESIZE_DEBOUNCE));
        assert_eq!(app.view.len(), 1);

        // Re-enabling wrap uses the width recorded while wrap was off
        app.toggle_list_wrap();
        assert_eq!(app.view.wrap_width(), Some(30));
    }

    #[test]
    fn test_selection_follows_entry_across_rebuild() {
        let mut app = test_app();
        type_and_submit(&mut app, "older");
        type_and_submit(&mut app, &"wide words that wrap ".repeat(6));
        let older = app.entries[1].id;

        let start = app.view.first_line_of(older).unwrap();
        app.list_state.select(Some(start));

        let now = Instant::now();
        app.note_resize(120, now);
        assert!(app.apply_pending_resize(now + RESIZE_DEBOUNCE));

        let selected = app.list_state.selected().unwrap();
        assert_eq!(app.view.resolve(selected), Some(older));
    }

    #[test]
    fn test_navigation_skips_separators() {
        let mut app = test_app();
        type_and_submit(&mut app, "a");
        type_and_submit(&mut app, "b");

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.list_state.selected(), Some(2));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.list_state.selected(), Some(2));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.list_state.selected(), Some(2));
        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_toggles_persist_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut app = App::new(
            EntryStore::open_in_memory().unwrap(),
            Preferences::default(),
            Some(path.clone()),
            70,
        );

        app.handle_key(ctrl('t'));
        app.handle_key(ctrl('e'));
        app.handle_key(ctrl('w'));

        let saved = Preferences::load(&path).unwrap();
        assert_eq!(saved.theme, ThemeMode::Dark);
        assert!(!saved.input_word_wrap);
        assert!(!saved.list_word_wrap);
        assert_eq!(app.status, "List word wrap: Off");
    }

    #[test]
    fn test_unwritable_prefs_path_does_not_interrupt() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let mut app = App::new(
            EntryStore::open_in_memory().unwrap(),
            Preferences::default(),
            Some(dir.path().to_path_buf()),
            70,
        );

        app.toggle_theme();
        assert_eq!(app.prefs.theme, ThemeMode::Dark);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_input_editing_keys() {
        let mut app = test_app();
        for c in "moody".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.input, "mood");

        app.handle_key(ctrl('u'));
        assert!(app.input.is_empty());

        app.paste("line one\nline two");
        assert_eq!(app.input, "line one line two");
    }

    #[test]
    fn test_quit_keys() {
        for event in [key(KeyCode::Esc), ctrl('q'), ctrl('c')] {
            let mut app = test_app();
            app.handle_key(event);
            assert!(app.should_quit);
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = test_app();
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_shutdown_closes_store() {
        let app = test_app();
        app.shutdown().unwrap();
    }
}
