//! # StoryList Component
//!
//! Scrollable list of search hits with a remove control.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `StoryListState` lives in `TuiState`
//! - `StoryList` is created each frame with borrowed state and the stories
//!   to show as props
//!
//! Each row shows the title (wrapped to at most two lines) and a meta line
//! with author, comment count, points and date.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::api::Story;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_STEP: usize = 5;
const MAX_TITLE_LINES: usize = 2;

/// Persistent state for the story list.
#[derive(Default)]
pub struct StoryListState {
    pub list_state: ListState,
    pub focused: bool,
    /// Number of stories rendered last; bounds keyboard navigation.
    len: usize,
}

/// Events emitted by the story list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryListEvent {
    /// Remove the story at this index of the visible list.
    Remove(usize),
    /// Show the story at this index.
    Open(usize),
}

impl StoryListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Records the visible story count and keeps the selection in range.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        let selected = match (self.list_state.selected(), len) {
            (_, 0) => None,
            (Some(i), _) => Some(i.min(len - 1)),
            (None, _) if self.focused => Some(0),
            (None, _) => None,
        };
        self.list_state.select(selected);
    }

    /// Moves keyboard focus into the list, selecting the first row if nothing is selected.
    pub fn focus(&mut self) {
        self.focused = true;
        if self.list_state.selected().is_none() && self.len > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    fn move_to(&mut self, index: usize) {
        if self.len > 0 {
            self.list_state.select(Some(index.min(self.len - 1)));
        }
    }
}

impl EventHandler for StoryListState {
    type Event = StoryListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let current = self.list_state.selected();
        match event {
            TuiEvent::CursorUp => {
                self.move_to(current.map(|i| i.saturating_sub(1)).unwrap_or(0));
                None
            }
            TuiEvent::CursorDown => {
                self.move_to(current.map(|i| i + 1).unwrap_or(0));
                None
            }
            TuiEvent::PageUp => {
                self.move_to(current.unwrap_or(0).saturating_sub(PAGE_STEP));
                None
            }
            TuiEvent::PageDown => {
                self.move_to(current.unwrap_or(0) + PAGE_STEP);
                None
            }
            TuiEvent::Home => {
                self.move_to(0);
                None
            }
            TuiEvent::End => {
                self.move_to(self.len.saturating_sub(1));
                None
            }
            TuiEvent::Delete | TuiEvent::InputChar('d') => current
                .filter(|i| *i < self.len)
                .map(StoryListEvent::Remove),
            TuiEvent::Submit => current.filter(|i| *i < self.len).map(StoryListEvent::Open),
            _ => None,
        }
    }
}

/// Transient render wrapper for the story list.
pub struct StoryList<'a> {
    state: &'a mut StoryListState,
    stories: &'a [Story],
    is_loading: bool,
}

impl<'a> StoryList<'a> {
    pub fn new(state: &'a mut StoryListState, stories: &'a [Story], is_loading: bool) -> Self {
        Self {
            state,
            stories,
            is_loading,
        }
    }
}

impl Component for StoryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.state.focused {
            " ↑↓ Move  d Remove  Enter Show URL  q Quit "
        } else {
            " Esc Browse results "
        };
        let border_style = if self.state.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(border_style)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.is_loading {
            let loading = Paragraph::new("Loading ...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
            return;
        }

        self.state.sync_len(self.stories.len());

        if self.stories.is_empty() {
            let empty = Paragraph::new("No stories.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Borders + padding + highlight symbol
        let text_width = (area.width as usize).saturating_sub(2 + 2);
        let items: Vec<ListItem> = self
            .stories
            .iter()
            .map(|story| story_item(story, text_width))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn story_item(story: &Story, width: usize) -> ListItem<'static> {
    let mut lines: Vec<Line> = title_lines(&story.title, width)
        .into_iter()
        .map(|l| {
            Line::from(Span::styled(
                l,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    lines.push(Line::from(Span::styled(
        meta_line(story),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::default());
    ListItem::new(lines)
}

/// Wraps the title to `width`, keeping at most `MAX_TITLE_LINES` and marking
/// the cut with "…".
fn title_lines(title: &str, width: usize) -> Vec<String> {
    let title = if title.trim().is_empty() {
        "(untitled)"
    } else {
        title.trim()
    };
    if width == 0 {
        return vec![title.to_string()];
    }
    let options = textwrap::Options::new(width).break_words(true);
    let wrapped = textwrap::wrap(title, options);
    let truncated = wrapped.len() > MAX_TITLE_LINES;
    let mut lines: Vec<String> = wrapped
        .into_iter()
        .take(MAX_TITLE_LINES)
        .map(|l| l.into_owned())
        .collect();
    if truncated && let Some(last) = lines.last_mut() {
        if last.chars().count() >= width {
            last.pop();
        }
        last.push('…');
    }
    lines
}

fn meta_line(story: &Story) -> String {
    let mut meta = format!(
        "by {} | {} comments | {} points",
        if story.author.is_empty() { "unknown" } else { &story.author },
        story.num_comments,
        story.points
    );
    if let Some(created) = story.created_at {
        meta.push_str(&format!(" | {}", created.format("%b %d %Y")));
    }
    meta
}
