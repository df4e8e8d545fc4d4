//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. It is also
//! where `Effect`s are executed: fetches are spawned on the tokio runtime and
//! the search term is written to the store.
//!
//! ## Focus
//!
//! Keyboard input goes either to the search box or to the story list.
//! Esc moves from the box to the list; typing in the list moves back.
//! Ctrl+C quits from anywhere, `q` quits from the list.
//!
//! ## Redraw Strategy
//!
//! The loop only draws after an input event or a background action arrived.
//! While a fetch is outstanding it polls more often so results show promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{AlgoliaClient, SearchClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::fetch::spawn_fetch;
use crate::core::persist::{FileStore, KeyValueStore, MemoryStore};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    PageSizeEvent, PageSizePicker, SearchEvent, SearchForm, StoryListEvent, StoryListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which component receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    List,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_form: SearchForm,
    /// Present only in the paged variant.
    pub page_size: Option<PageSizePicker>,
    pub story_list: StoryListState,
    pub focus: Focus,
}

impl TuiState {
    pub fn new(app: &App, page_size_options: &[usize]) -> Self {
        Self {
            search_form: SearchForm::new(app.search_term.value()),
            page_size: app
                .results_per_page
                .map(|n| PageSizePicker::new(page_size_options.to_vec(), n)),
            story_list: StoryListState::new(),
            focus: Focus::Search, // User expects to type immediately
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.search_form.focused = focus == Focus::Search;
        match focus {
            Focus::List => self.story_list.focus(),
            Focus::Search => self.story_list.blur(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Picks the search term store: the JSON file under the app directory, or
/// memory when no path could be determined.
pub fn build_store(config: &ResolvedConfig) -> Box<dyn KeyValueStore> {
    match &config.storage_path {
        Some(path) => {
            info!("Persisting search term to {}", path.display());
            Box::new(FileStore::new(path.clone()))
        }
        None => {
            warn!("No storage path available, search term will not survive restarts");
            Box::new(MemoryStore::new())
        }
    }
}

/// `initial_query` replaces the restored search term before the first fetch.
pub fn run(config: ResolvedConfig, initial_query: Option<String>) -> std::io::Result<()> {
    let client: Arc<dyn SearchClient> = Arc::new(AlgoliaClient::new());
    let mut app = App::new(&config, build_store(&config));

    let (tx, rx) = mpsc::channel();

    let effect = apply_initial_query(&mut app, initial_query);
    execute_effect(effect, &mut app, &client, &tx);

    let mut tui = TuiState::new(&app, &config.results_per_page);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let effect = update(&mut app, Action::Startup);
    execute_effect(effect, &mut app, &client, &tx);

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.stories.is_loading {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&mut app, &mut tui, event)
                && execute_effect(update(&mut app, action), &mut app, &client, &tx)
            {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if execute_effect(effect, &mut app, &client, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Replaces the restored search term with a non-empty `--query`, so the
/// startup fetch uses it. An empty query is ignored like an empty submit.
fn apply_initial_query(app: &mut App, query: Option<String>) -> Effect {
    match query {
        Some(query) if !query.is_empty() => {
            info!("Starting with query from command line: {}", query);
            let effect = update(app, Action::SearchInput(query));
            app.url = app.current_query_url();
            effect
        }
        Some(_) => {
            warn!("Ignoring empty --query");
            Effect::None
        }
        None => Effect::None,
    }
}

/// Translates one terminal event into at most one core action, updating
/// presentation state along the way.
fn route_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Refresh => return Some(Action::Refresh),
        TuiEvent::NextOption | TuiEvent::PreviousOption => {
            return tui
                .page_size
                .as_mut()
                .and_then(|picker| picker.handle_event(&event))
                .map(|PageSizeEvent::Selected(n)| Action::SelectResultsPerPage(n));
        }
        _ => {}
    }

    match tui.focus {
        Focus::Search => {
            if event == TuiEvent::Escape {
                tui.set_focus(Focus::List);
                return None;
            }
            search_action(tui, &event)
        }
        Focus::List => match event {
            TuiEvent::Escape => None,
            TuiEvent::InputChar('q') => Some(Action::Quit),
            // Typing goes back to the search box
            TuiEvent::InputChar(c) if c != 'd' => {
                tui.set_focus(Focus::Search);
                search_action(tui, &event)
            }
            TuiEvent::Paste(_) | TuiEvent::Backspace => {
                tui.set_focus(Focus::Search);
                search_action(tui, &event)
            }
            // The list is hidden while loading
            _ if app.stories.is_loading => None,
            _ => match tui.story_list.handle_event(&event)? {
                StoryListEvent::Remove(index) => app
                    .visible_stories()
                    .get(index)
                    .cloned()
                    .map(Action::RemoveStory),
                StoryListEvent::Open(index) => {
                    if let Some(story) = app.visible_stories().get(index) {
                        app.status_message = if story.url.is_empty() {
                            format!("No link for \"{}\"", story.title)
                        } else {
                            story.url.clone()
                        };
                    }
                    None
                }
            },
        },
    }
}

fn search_action(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match tui.search_form.handle_event(event)? {
        SearchEvent::Changed(text) => Some(Action::SearchInput(text)),
        SearchEvent::Submit => Some(Action::SubmitSearch),
    }
}

/// Performs the I/O an `update()` asked for. Returns true on quit.
fn execute_effect(
    effect: Effect,
    app: &mut App,
    client: &Arc<dyn SearchClient>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Fetch(request) => {
            spawn_fetch(client.clone(), request, tx.clone());
            false
        }
        Effect::PersistSearchTerm => {
            if let Err(e) = app.search_term.persist() {
                warn!("Failed to persist search term: {}", e);
                app.status_message = format!("Could not save search term: {e}");
            }
            false
        }
    }
}
