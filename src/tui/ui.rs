//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::router::Screen;
use crate::tui::app::App;
use crate::tui::screens::{authorization, boot, detail, idle, login, tunnel};
use crate::tui::theme::Theme;

/// Render the current screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::normal()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match app.router.screen() {
        Screen::LoggedOut(state) => login::render(frame, chunks[0], &app.login, state),
        Screen::Authorizing(sequencer) => authorization::render(frame, chunks[0], sequencer),
        Screen::Booting(state) => boot::render(frame, chunks[0], state, app.clock),
        Screen::Idle => idle::render(
            frame,
            chunks[0],
            app.weather.as_ref(),
            app.weather_loading,
            app.clock,
        ),
        Screen::Transitioning(transition) => tunnel::render(frame, chunks[0], transition),
        Screen::DetailView => detail::render(
            frame,
            chunks[0],
            app.weather.as_ref(),
            app.gauge.as_ref(),
            &app.search,
        ),
    }

    render_status_bar(frame, chunks[1], app);
}

/// Key hints for the current screen
pub fn status_text(app: &App) -> &'static str {
    match app.router.screen() {
        Screen::LoggedOut(_) => " Esc quit ",
        Screen::Authorizing(_) | Screen::Booting(_) | Screen::Transitioning(_) => " q quit ",
        Screen::Idle => " Enter open weather │ q quit ",
        Screen::DetailView if app.search.editing => " Enter search │ Esc cancel ",
        Screen::DetailView => " / search │ Tab tabs │ u units │ Esc close │ q quit ",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(status_text(app)).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// A `width` × `height` rectangle centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
