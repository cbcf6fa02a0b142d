//! Rendered history view and its inverse mapping.
//!
//! # Responsibility
//! - Turn the ordered entry list into the visual lines shown in the list.
//! - Map a visual line index back to the entry that produced it.
//!
//! # Invariants
//! - Every visual line is tagged with its owning entry id when the view is
//!   built; `resolve` only reads that tagging and never re-wraps.
//! - Separator lines carry no owner and resolve to `None`.

use super::helpers::wrap_text;
use crate::models::{EntryId, MoodEntry};

/// Widths below this are treated as "not laid out yet"
pub const MIN_VIEWPORT_WIDTH: usize = 20;
/// Width used in place of a too-small viewport
pub const DEFAULT_VIEWPORT_WIDTH: usize = 70;

/// Clamp a measured viewport width to a usable wrap width
pub fn effective_width(viewport_width_chars: usize) -> usize {
    if viewport_width_chars < MIN_VIEWPORT_WIDTH {
        DEFAULT_VIEWPORT_WIDTH
    } else {
        viewport_width_chars
    }
}

/// One line of the history list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    pub text: String,
    /// `None` for blank separators between entries
    pub owner: Option<EntryId>,
}

impl VisualLine {
    fn separator() -> Self {
        Self {
            text: String::new(),
            owner: None,
        }
    }
}

/// Retained result of laying out all entries for one viewport width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    lines: Vec<VisualLine>,
    wrap_width: Option<usize>,
}

impl RenderedView {
    /// Word-wrap every entry at `viewport_width_chars` (clamped by
    /// [`effective_width`]) with a blank separator between entries.
    pub fn rebuild(entries: &[MoodEntry], viewport_width_chars: usize) -> Self {
        let width = effective_width(viewport_width_chars);
        let mut lines = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            for text in wrap_text(&entry.display_line(), width) {
                lines.push(VisualLine {
                    text,
                    owner: Some(entry.id),
                });
            }
            if i + 1 < entries.len() {
                lines.push(VisualLine::separator());
            }
        }

        Self {
            lines,
            wrap_width: Some(width),
        }
    }

    /// One line per entry, no wrapping and no separators.
    pub fn unwrapped(entries: &[MoodEntry]) -> Self {
        let lines = entries
            .iter()
            .map(|entry| VisualLine {
                text: entry.display_line(),
                owner: Some(entry.id),
            })
            .collect();

        Self {
            lines,
            wrap_width: None,
        }
    }

    /// Owning entry of a visual line; `None` for separators and indices
    /// past the end.
    pub fn resolve(&self, visual_index: usize) -> Option<EntryId> {
        self.lines.get(visual_index).and_then(|line| line.owner)
    }

    /// Index of the first visual line belonging to `id`
    pub fn first_line_of(&self, id: EntryId) -> Option<usize> {
        self.lines.iter().position(|line| line.owner == Some(id))
    }

    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Width the view was wrapped at, `None` when built unwrapped
    pub fn wrap_width(&self) -> Option<usize> {
        self.wrap_width
    }
}
