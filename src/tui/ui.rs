use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{StoryList, TitleBar};

const ERROR_MESSAGE: &str = "Something went wrong ...";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let picker_height = if tui.page_size.is_some() { 1 } else { 0 };
    let banner_height = if app.stories.is_error { 1 } else { 0 };
    let layout = Layout::vertical([
        Length(1),
        Length(3),
        Length(picker_height),
        Length(banner_height),
        Min(0),
    ]);
    let [title_area, search_area, picker_area, banner_area, list_area] =
        layout.areas(frame.area());

    TitleBar::new(
        app.variant.label().to_string(),
        app.status_message.clone(),
        app.stories.is_loading,
    )
    .render(frame, title_area);

    tui.search_form.render(frame, search_area);

    if let Some(picker) = tui.page_size.as_mut() {
        picker.render(frame, picker_area);
    }

    if app.stories.is_error {
        draw_error_banner(frame, banner_area);
    }

    StoryList::new(
        &mut tui.story_list,
        app.visible_stories(),
        app.stories.is_loading,
    )
    .render(frame, list_area);
}

fn draw_error_banner(frame: &mut Frame, area: Rect) {
    let banner = Line::from(ERROR_MESSAGE)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .centered();
    frame.render_widget(banner, area);
}
