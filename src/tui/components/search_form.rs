//! # SearchForm Component
//!
//! Single-line search box with a submit control.
//!
//! ## Responsibilities
//!
//! - Capture text input and basic editing (backspace, delete, cursor movement, paste)
//! - Report every change so the term can be persisted as it is typed
//! - Report submission (Enter), which is disabled while the box is empty
//!
//! The buffer is internal state, seeded from the persisted search term.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchForm
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The buffer changed; carries the full new text.
    Changed(String),
    /// Enter pressed with a non-empty buffer.
    Submit,
}

pub struct SearchForm {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether keyboard input is routed here (Prop)
    pub focused: bool,
    /// Byte offset of the cursor in `buffer`.
    cursor: usize,
}

impl SearchForm {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            focused: true,
            cursor: initial.len(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.buffer.is_empty()
    }

    fn changed(&self) -> Option<SearchEvent> {
        Some(SearchEvent::Changed(self.buffer.clone()))
    }

    /// Visible slice of the buffer and the cursor column within it, scrolled
    /// horizontally so the cursor stays inside `width` columns.
    fn visible(&self, width: usize) -> (String, usize) {
        let cursor_col = self.buffer[..self.cursor].width();
        if width == 0 {
            return (String::new(), 0);
        }
        let skip = (cursor_col + 1).saturating_sub(width);

        let mut skipped = 0;
        let mut visible = String::new();
        let mut visible_width = 0;
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0);
            if skipped < skip {
                skipped += w;
                continue;
            }
            if visible_width + w > width {
                break;
            }
            visible.push(c);
            visible_width += w;
        }
        (visible, cursor_col.saturating_sub(skipped))
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

impl Component for SearchForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let submit_style = if !self.can_submit() {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(" Search: ").style(border_style.add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(" [ Submit ] ").style(submit_style).right_aligned());

        let inner_width = area.width.saturating_sub(2) as usize;
        let (visible, cursor_col) = self.visible(inner_width);

        frame.render_widget(Paragraph::new(visible).block(block), area);

        if self.focused && area.height > 2 {
            let x = area.x + 1 + cursor_col as u16;
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for SearchForm {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => self.can_submit().then_some(SearchEvent::Submit),
            _ => None,
        }
    }
}
