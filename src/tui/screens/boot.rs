//! Boot screen with the arc reactor

use std::time::Duration;

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::Paragraph;

use crate::router::BootState;
use crate::tui::screens::{dot_bounds, reactor};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, boot: &BootState, clock: Duration) {
    let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).split(area);
    let canvas_area = rows[0];

    let (x_bounds, y_bounds) = dot_bounds(canvas_area);
    let radius = x_bounds[1].min(y_bounds[1]) * 0.85;
    // Reactor powers up over the first half second
    let opacity = (boot.elapsed().as_secs_f64() / 0.5).min(1.0);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(Theme::BACKGROUND)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| reactor::paint(ctx, 0.0, 0.0, radius, clock, opacity));
    frame.render_widget(canvas, canvas_area);

    let caption = if boot.greeting.has_fired() {
        "WELCOME BACK"
    } else {
        "SYSTEM BOOT"
    };
    let caption = Paragraph::new(caption)
        .alignment(Alignment::Center)
        .style(Theme::header());
    frame.render_widget(caption, rows[1]);
}
