//! Idle screen: ambient reactor and the mini weather widget

use std::time::Duration;

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::screens::{dot_bounds, reactor};
use crate::tui::theme::Theme;
use crate::weather::lookup::LocalWeather;

/// Size of the mini widget
const WIDGET_WIDTH: u16 = 30;
const WIDGET_HEIGHT: u16 = 7;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    weather: Option<&LocalWeather>,
    loading: bool,
    clock: Duration,
) {
    let (x_bounds, y_bounds) = dot_bounds(area);
    let radius = x_bounds[1].min(y_bounds[1]) * 0.6;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(Theme::BACKGROUND)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| reactor::paint(ctx, 0.0, 0.0, radius, clock, 0.35));
    frame.render_widget(canvas, area);

    render_widget(frame, widget_area(area), weather, loading);
}

/// Bottom-right corner of `area`
pub fn widget_area(area: Rect) -> Rect {
    let width = WIDGET_WIDTH.min(area.width);
    let height = WIDGET_HEIGHT.min(area.height);
    Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    )
}

fn render_widget(frame: &mut Frame, area: Rect, weather: Option<&LocalWeather>, loading: bool) {
    frame.render_widget(Clear, area);

    let lines = match weather {
        Some(outcome) => match outcome.record() {
            Some(record) => vec![
                Line::from(vec![
                    Span::raw(format!("{} ", record.icon)),
                    Span::styled(
                        format!("{:.0}°C", record.temperature_c),
                        Style::default()
                            .fg(Theme::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(record.condition.clone(), Theme::normal())),
                Line::from(Span::styled(
                    format!("Wind {:.0} km/h", record.wind_speed_kmh),
                    Theme::muted(),
                )),
            ],
            None => {
                let message = match outcome {
                    LocalWeather::Failed(message) => message.clone(),
                    _ => String::new(),
                };
                vec![Line::from(Span::styled(
                    message,
                    Style::default().fg(Theme::ERROR),
                ))]
            }
        },
        None if loading => vec![Line::from(Span::styled("Scanning...", Theme::muted()))],
        None => vec![Line::from(Span::styled("No data", Theme::muted()))],
    };

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Theme::PRIMARY))
                .title(" WEATHER ")
                .title_bottom(Line::from(" Enter ").right_aligned())
                .style(Style::default().bg(Theme::PANEL)),
        );
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_area_in_corner() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(widget_area(area), Rect::new(70, 33, 30, 7));

        let tiny = Rect::new(0, 0, 10, 3);
        assert_eq!(widget_area(tiny), tiny);
    }
}
