//! Theme module for mood-tui
//!
//! Light and dark palettes plus the explicit set of themeable element roles.
//! Widgets ask for a style by role; nothing inspects widget types.

use ratatui::style::{Color, Modifier, Style};

use crate::models::ThemeMode;

/// Themeable element roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Label,
    Button,
    List,
    Input,
    Scrollbar,
}

/// Color set for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub on_accent: Color,
    pub border: Color,
    pub danger: Color,
}

// ============================================================================
// Light Palette
// ============================================================================

pub const LIGHT: Palette = Palette {
    // #f8fafc
    background: Color::Rgb(248, 250, 252),
    // #ffffff
    surface: Color::Rgb(255, 255, 255),
    // #1e293b
    text: Color::Rgb(30, 41, 59),
    // #64748b
    muted: Color::Rgb(100, 116, 139),
    // #2563eb
    accent: Color::Rgb(37, 99, 235),
    // #f8fafc
    on_accent: Color::Rgb(248, 250, 252),
    // #cbd5e1
    border: Color::Rgb(203, 213, 225),
    // #dc2626
    danger: Color::Rgb(220, 38, 38),
};

// ============================================================================
// Dark Palette
// ============================================================================

pub const DARK: Palette = Palette {
    // #0a0e14
    background: Color::Rgb(10, 14, 20),
    // #12161c
    surface: Color::Rgb(18, 22, 28),
    // #e2e8f0
    text: Color::Rgb(226, 232, 240),
    // #94a3b8
    muted: Color::Rgb(148, 163, 184),
    // #00d4aa
    accent: Color::Rgb(0, 212, 170),
    // #0a0e14
    on_accent: Color::Rgb(10, 14, 20),
    // #1e2530
    border: Color::Rgb(30, 37, 48),
    // #f87171
    danger: Color::Rgb(248, 113, 113),
};

/// Palette for the given theme mode
pub fn palette(mode: ThemeMode) -> &'static Palette {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}

impl Palette {
    /// Declared style for an element role
    pub fn style(&self, role: ElementRole) -> Style {
        match role {
            ElementRole::Label => Style::default()
                .fg(self.text)
                .bg(self.background)
                .add_modifier(Modifier::BOLD),
            ElementRole::Button => Style::default().fg(self.on_accent).bg(self.accent),
            ElementRole::List => Style::default().fg(self.text).bg(self.surface),
            ElementRole::Input => Style::default().fg(self.text).bg(self.surface),
            ElementRole::Scrollbar => Style::default().fg(self.muted).bg(self.surface),
        }
    }

    /// Whole-screen base style
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Border style for framed widgets; `focused` uses the accent color
    pub fn border(&self, focused: bool) -> Style {
        let color = if focused { self.accent } else { self.border };
        Style::default().fg(color)
    }

    /// Selected list line
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.on_accent)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text such as the status bar
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.background)
    }

    /// Error dialog frame
    pub fn danger(&self) -> Style {
        Style::default().fg(self.danger)
    }
}
