//! Weather detail view: local conditions, wind gauge and place search

use std::f64::consts::PI;

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};

use crate::anim::gauge::GAUGE_MAX;
use crate::anim::WindGauge;
use crate::tui::app::{SearchPanel, SearchTab};
use crate::tui::screens::reactor::arc_points;
use crate::tui::theme::Theme;
use crate::weather::lookup::LocalWeather;
use crate::weather::model::{PlaceReport, Unit};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    weather: Option<&LocalWeather>,
    gauge: Option<&WindGauge>,
    search: &SearchPanel,
) {
    let columns = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    let left = Layout::vertical([Constraint::Length(7), Constraint::Min(0)]).split(columns[0]);

    render_local(frame, left[0], weather);
    render_gauge(frame, left[1], gauge);
    render_search(frame, columns[1], search);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::SECONDARY))
        .title(Span::styled(format!(" {} ", title), Theme::header()))
        .style(Style::default().bg(Theme::PANEL))
}

fn render_local(frame: &mut Frame, area: Rect, weather: Option<&LocalWeather>) {
    let lines = match weather {
        Some(LocalWeather::Failed(message)) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Theme::ERROR),
        ))],
        Some(outcome) => match outcome.record() {
            Some(record) => {
                let mut lines = vec![
                    Line::from(vec![
                        Span::raw(format!("{} ", record.icon)),
                        Span::styled(
                            format!("{:.0}°C", record.temperature_c),
                            Style::default()
                                .fg(Theme::PRIMARY)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("  {}", record.condition), Theme::normal()),
                    ]),
                    Line::from(vec![
                        Span::styled("Sunrise ", Theme::muted()),
                        Span::styled(record.sunrise_display(), Theme::normal()),
                        Span::styled("   Sunset ", Theme::muted()),
                        Span::styled(record.sunset_display(), Theme::normal()),
                    ]),
                ];
                if matches!(outcome, LocalWeather::Fallback(_)) {
                    lines.push(Line::from(Span::styled(
                        "Location unavailable; default conditions",
                        Theme::muted(),
                    )));
                }
                lines
            }
            None => Vec::new(),
        },
        None => vec![Line::from(Span::styled("Loading...", Theme::muted()))],
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("LOCAL")),
        area,
    );
}

/// Needle direction in canvas radians: 0 km/h points left, full scale right
pub fn needle_radians(gauge: &WindGauge) -> f64 {
    -gauge.angle_degrees().to_radians()
}

fn render_gauge(frame: &mut Frame, area: Rect, gauge: Option<&WindGauge>) {
    let block = panel("WIND");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(gauge) = gauge else {
        return;
    };

    let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
    // Semicircle dial: twice as wide as tall, in braille dots
    let radius = (rows[0].width as f64).min(rows[0].height as f64 * 4.0 - 2.0).max(1.0) * 0.9;
    let angle = needle_radians(gauge);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-(rows[0].width as f64), rows[0].width as f64])
        .y_bounds([-1.0, rows[0].height as f64 * 4.0 - 1.0])
        .paint(|ctx| {
            let dial = arc_points(0.0, 0.0, radius, 0.0, PI);
            ctx.draw(&Points {
                coords: &dial,
                color: Theme::SECONDARY,
            });
            // Ticks every 20 km/h
            for tick in 0..=5 {
                let a = PI - PI * tick as f64 / 5.0;
                ctx.draw(&CanvasLine {
                    x1: radius * 0.85 * a.cos(),
                    y1: radius * 0.85 * a.sin(),
                    x2: radius * a.cos(),
                    y2: radius * a.sin(),
                    color: Theme::SECONDARY,
                });
            }
            ctx.layer();
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: 0.0,
                x2: radius * 0.8 * angle.cos(),
                y2: radius * 0.8 * angle.sin(),
                color: Theme::PRIMARY,
            });
        });
    frame.render_widget(canvas, rows[0]);

    let readout = Paragraph::new(format!("{:.0} / {:.0} km/h", gauge.value(), GAUGE_MAX))
        .alignment(Alignment::Center)
        .style(Theme::normal());
    frame.render_widget(readout, rows[1]);
}

fn render_search(frame: &mut Frame, area: Rect, search: &SearchPanel) {
    let block = panel("GLOBAL SEARCH");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Input
        Constraint::Length(1), // Units
        Constraint::Length(2), // Tabs
        Constraint::Min(0),    // Content
    ])
    .split(inner);

    let mut input = vec![
        Span::styled("Place: ", Theme::muted()),
        Span::styled(search.input.clone(), Theme::normal()),
    ];
    if search.editing {
        input.push(Span::styled("█", Style::default().fg(Theme::PRIMARY))); // cursor
    }
    frame.render_widget(Paragraph::new(Line::from(input)), rows[0]);

    let units: Vec<Span> = Unit::all()
        .iter()
        .flat_map(|unit| {
            let style = if *unit == search.unit {
                Theme::selected()
            } else {
                Theme::muted()
            };
            [Span::styled(format!(" {} ", unit.display_name()), style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(units)), rows[1]);

    let tabs = Tabs::new(SearchTab::all().iter().map(|t| t.title()))
        .select(search.tab.index())
        .style(Theme::muted())
        .highlight_style(Theme::selected())
        .divider("│");
    frame.render_widget(tabs, rows[2]);

    let content: Vec<Line> = if search.loading {
        vec![Line::from(Span::styled("Searching...", Theme::muted()))]
    } else {
        match &search.result {
            None => vec![Line::from(Span::styled(
                "Press / to search a place",
                Theme::muted(),
            ))],
            Some(Err(message)) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Theme::ERROR),
            ))],
            Some(Ok(report)) => tab_lines(report, search.tab),
        }
    };
    frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }), rows[3]);
}

/// Text of one search tab
pub fn tab_lines(report: &PlaceReport, tab: SearchTab) -> Vec<Line<'static>> {
    let temp = report.unit.temperature_suffix();
    let wind = report.unit.wind_suffix();

    match tab {
        SearchTab::Current => {
            let current = &report.current;
            let place = if report.country.is_empty() {
                report.place.clone()
            } else {
                format!("{}, {}", report.place, report.country)
            };
            vec![
                Line::from(Span::styled(place, Theme::header())),
                Line::from(format!("{:.1}{}  {}", current.temperature, temp, current.description)),
                Line::from(format!("Wind {:.1} {}", current.wind_speed, wind)),
                Line::from(format!("Humidity {}%", current.humidity)),
            ]
        }
        SearchTab::Hourly => report
            .hourly
            .iter()
            .map(|point| {
                Line::from(format!(
                    "{}  {:>6.1}{}  {}",
                    point.time.format("%a %H:%M"),
                    point.temperature,
                    temp,
                    point.description
                ))
            })
            .collect(),
        SearchTab::Weekly => report
            .weekly
            .iter()
            .map(|day| {
                Line::from(format!(
                    "{}  {:>6.1}{} / {:>6.1}{}  {}",
                    day.date.format("%a %d %b"),
                    day.min,
                    temp,
                    day.max,
                    temp,
                    day.description
                ))
            })
            .collect(),
        SearchTab::Monthly => match &report.monthly {
            Ok(months) if months.is_empty() => vec![Line::from("No data")],
            Ok(months) => months
                .iter()
                .map(|m| {
                    Line::from(format!(
                        "{}  min {:.1}°C  max {:.1}°C",
                        m.month.format("%B %Y"),
                        m.min,
                        m.max
                    ))
                })
                .collect(),
            Err(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Theme::ERROR),
            ))],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::NaiveDate;

    use crate::weather::client::MONTHLY_ERROR;
    use crate::weather::model::{Coordinates, CurrentConditions};

    fn report() -> PlaceReport {
        PlaceReport {
            place: "Oslo".to_string(),
            country: "NO".to_string(),
            coordinates: Coordinates::new(59.91, 10.75),
            unit: Unit::Imperial,
            current: CurrentConditions {
                temperature: 41.0,
                description: "snow".to_string(),
                wind_speed: 9.2,
                humidity: 90,
            },
            hourly: Vec::new(),
            weekly: Vec::new(),
            monthly: Err(MONTHLY_ERROR.to_string()),
        }
    }

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_needle_sweeps_left_to_right() {
        let gauge = WindGauge::new(50.0);
        assert!((needle_radians(&gauge) - PI).abs() < 1e-9);

        let mut gauge = WindGauge::new(50.0);
        gauge.advance(Duration::from_millis(2000));
        assert!(needle_radians(&gauge).abs() < 1e-9);
    }

    #[test]
    fn test_current_tab_uses_units() {
        let body = text(&tab_lines(&report(), SearchTab::Current));
        assert!(body.contains("Oslo, NO"));
        assert!(body.contains("41.0°F  snow"));
        assert!(body.contains("9.2 mph"));
    }

    #[test]
    fn test_monthly_tab_shows_error() {
        let body = text(&tab_lines(&report(), SearchTab::Monthly));
        assert_eq!(body, MONTHLY_ERROR);

        let mut ok = report();
        ok.monthly = Ok(vec![crate::weather::model::MonthlySummary {
            month: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            min: -4.0,
            max: 6.5,
        }]);
        let body = text(&tab_lines(&ok, SearchTab::Monthly));
        assert!(body.contains("February 2024  min -4.0°C  max 6.5°C"));
    }
}
