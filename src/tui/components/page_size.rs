//! # PageSizePicker Component
//!
//! Radio group choosing how many of the fetched stories are shown (paged
//! variant only). Tab / Shift+Tab move the selection, wrapping around.
//!
//! The choice only trims the list on screen. It is not sent to the API.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSizeEvent {
    Selected(usize),
}

pub struct PageSizePicker {
    options: Vec<usize>,
    selected: usize,
}

impl PageSizePicker {
    /// `initial` is selected if present in `options`, else the first option.
    pub fn new(options: Vec<usize>, initial: usize) -> Self {
        let selected = options.iter().position(|n| *n == initial).unwrap_or(0);
        Self { options, selected }
    }

    pub fn value(&self) -> Option<usize> {
        self.options.get(self.selected).copied()
    }

    fn step(&mut self, forward: bool) -> Option<PageSizeEvent> {
        if self.options.is_empty() {
            return None;
        }
        let len = self.options.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        self.value().map(PageSizeEvent::Selected)
    }
}

impl Component for PageSizePicker {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "Results per page: ",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for (i, n) in self.options.iter().enumerate() {
            let (marker, style) = if i == self.selected {
                ("(•)", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                ("( )", Style::default().fg(Color::Gray))
            };
            spans.push(Span::styled(format!("{marker} {n}"), style));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("Tab to change", Style::default().fg(Color::DarkGray)));
        frame.render_widget(Line::from(spans), area);
    }
}

impl EventHandler for PageSizePicker {
    type Event = PageSizeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::NextOption => self.step(true),
            TuiEvent::PreviousOption => self.step(false),
            _ => None,
        }
    }
}
