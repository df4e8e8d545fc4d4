//! # TitleBar Component
//!
//! Top status bar: app name, active variant, and the current status message.
//!
//! Stateless: all three props come from core `App` state and are copied in
//! each frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub variant_label: String,
    pub status_message: String,
    /// True while a fetch is outstanding.
    pub is_loading: bool,
}

impl TitleBar {
    pub fn new(variant_label: String, status_message: String, is_loading: bool) -> Self {
        Self {
            variant_label,
            status_message,
            is_loading,
        }
    }

    fn text(&self) -> String {
        let loading = if self.is_loading { " …" } else { "" };
        if self.status_message.is_empty() {
            format!("My Hacker Stories ({}){}", self.variant_label, loading)
        } else {
            format!(
                "My Hacker Stories ({}) | {}{}",
                self.variant_label, self.status_message, loading
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
