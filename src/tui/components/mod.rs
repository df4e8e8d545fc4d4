//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar with variant and status message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SearchForm`: Search box with submit control
//! - `PageSizePicker`: Results-per-page radio group (paged variant)
//! - `StoryList`: Scrollable result list with remove control
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests. Components receive external data as props
//! rather than reaching into `App`.

pub mod page_size;
pub mod search_form;
pub mod story_list;
mod title_bar;

pub use page_size::{PageSizeEvent, PageSizePicker};
pub use search_form::{SearchEvent, SearchForm};
pub use story_list::{StoryList, StoryListEvent, StoryListState};
pub use title_bar::TitleBar;
