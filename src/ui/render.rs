//! Screen drawing for the mood tracker

use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::helpers::{centered_rect, wrap_chars};
use crate::app::App;
use crate::models::Dialog;
use crate::theme::{palette, ElementRole, Palette};
use crate::utils::on_off;

/// Left and right border of the history list
const LIST_BORDER_COLUMNS: u16 = 2;

/// Input field grows up to this many text rows when wrapping
const MAX_INPUT_ROWS: usize = 4;

/// Character width available to list lines for a terminal `frame_width`
/// columns wide. The list spans the full width; the scrollbar sits on the
/// right border.
pub fn list_viewport_width(frame_width: u16) -> usize {
    frame_width.saturating_sub(LIST_BORDER_COLUMNS) as usize
}

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let palette = palette(app.prefs.theme);

    frame.render_widget(Block::default().style(palette.base()), area);

    let input_rows = input_rows(app, area.width);
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(input_rows as u16 + 2), // Input field
            Constraint::Min(3),                        // History list
            Constraint::Length(1),                     // Key hints
            Constraint::Length(1),                     // Status bar
        ])
        .split(area);

    let show_cursor = app.dialog.is_none();
    draw_input(frame, app, palette, main_layout[0], input_rows, show_cursor);
    draw_history(frame, app, palette, main_layout[1]);
    draw_key_hints(frame, app, palette, main_layout[2]);

    let status = Paragraph::new(format!(" {}", app.status)).style(palette.muted());
    frame.render_widget(status, main_layout[3]);

    if let Some(dialog) = &app.dialog {
        draw_dialog(frame, dialog, palette, area);
    }
}

/// Text rows the input field needs at the given terminal width
fn input_rows(app: &App, frame_width: u16) -> usize {
    if !app.prefs.input_word_wrap {
        return 1;
    }
    let inner_width = frame_width.saturating_sub(2) as usize;
    wrap_chars(&app.input, inner_width)
        .len()
        .clamp(1, MAX_INPUT_ROWS)
}

fn draw_input(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    area: Rect,
    rows: usize,
    show_cursor: bool,
) {
    let block = Block::default()
        .title(Span::styled(
            " How are you feeling? ",
            palette.style(ElementRole::Label),
        ))
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .style(palette.style(ElementRole::Input));
    let inner = block.inner(area);
    let inner_width = inner.width as usize;

    let (lines, cursor_col, cursor_row) = if app.prefs.input_word_wrap {
        let wrapped = wrap_chars(&app.input, inner_width);
        // Keep the rows ending at the cursor visible
        let skip = wrapped.len().saturating_sub(rows);
        let visible: Vec<String> = wrapped.into_iter().skip(skip).collect();
        let col = visible.last().map_or(0, |line| line.width());
        let row = visible.len().saturating_sub(1);
        (visible, col, row)
    } else {
        // Scroll horizontally so the end of the input stays in view
        let budget = inner_width.saturating_sub(1);
        let mut used = 0usize;
        let mut tail: Vec<char> = Vec::new();
        for ch in app.input.chars().rev() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > budget {
                break;
            }
            used += ch_width;
            tail.push(ch);
        }
        let visible: String = tail.into_iter().rev().collect();
        (vec![visible], used, 0)
    };

    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(text).block(block), area);

    if show_cursor && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (cursor_col as u16).min(inner.width - 1);
        let y = inner.y + (cursor_row as u16).min(inner.height - 1);
        frame.set_cursor_position((x, y));
    }
}

fn draw_history(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Your Mood History ({}) ", app.entries.len()),
            palette.style(ElementRole::Label),
        ))
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .style(palette.style(ElementRole::List));

    if app.view.is_empty() {
        let placeholder = Paragraph::new("No entries yet. Type how you feel and press Enter.")
            .style(palette.muted())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    }

    // Lines sharing an owner with the selected line get a subtle accent
    let selected_owner = app
        .list_state
        .selected()
        .and_then(|index| app.view.resolve(index));
    let sibling_style = Style::default().fg(palette.accent);

    let items: Vec<ListItem> = app
        .view
        .lines()
        .iter()
        .map(|line| {
            let item = ListItem::new(line.text.clone());
            if line.owner.is_some() && line.owner == selected_owner {
                item.style(sibling_style)
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(palette.style(ElementRole::List))
        .highlight_style(palette.highlight());
    frame.render_stateful_widget(list, area, &mut app.list_state);

    let viewport_rows = area.height.saturating_sub(2) as usize;
    if app.view.len() > viewport_rows {
        let mut scrollbar_state =
            ScrollbarState::new(app.view.len()).position(app.list_state.offset());
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .style(palette.style(ElementRole::Scrollbar));
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn draw_key_hints(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let hints = format!(
        " Enter: Save | Del: Delete Selected | ^L: Clear All | ^T: {} Theme | ^E: Input Wrap {} | ^W: List Wrap {} | Esc: Quit ",
        app.prefs.theme.toggle().label(),
        on_off(app.prefs.input_word_wrap),
        on_off(app.prefs.list_word_wrap),
    );
    let bar = Paragraph::new(hints).style(palette.style(ElementRole::Button));
    frame.render_widget(bar, area);
}

fn draw_dialog(frame: &mut Frame, dialog: &Dialog, palette: &Palette, area: Rect) {
    let (title, message, hint, border) = match dialog {
        Dialog::Notice { title, message } => (
            title.as_str(),
            message.as_str(),
            "Press any key to continue",
            palette.border(true),
        ),
        Dialog::Error { title, message } => (
            title.as_str(),
            message.as_str(),
            "Press any key to continue",
            palette.danger(),
        ),
        Dialog::ConfirmClear => (
            "Confirm Clear All",
            "Are you sure you want to delete ALL mood entries?",
            "Press y to confirm, n or Esc to cancel",
            palette.danger(),
        ),
    };

    let body = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(palette.muted))),
    ];
    let popup = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(palette.style(ElementRole::List))
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", title),
                    border.add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(border),
        );

    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
