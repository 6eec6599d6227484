//! Login screen

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::router::LoginState;
use crate::tui::app::{LoginField, LoginForm};
use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;

/// Render the login panel, faded by the login transition
pub fn render(frame: &mut Frame, area: Rect, form: &LoginForm, state: &LoginState) {
    let opacity = state.opacity();
    let accent = Theme::fade(Theme::PRIMARY, opacity);
    let muted = Theme::fade(Theme::MUTED, opacity);

    let panel = centered_rect(48, 13, area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Theme::PANEL));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::vertical([
        Constraint::Length(2), // Title
        Constraint::Length(3), // Username
        Constraint::Length(3), // Password
        Constraint::Length(1), // Error
        Constraint::Min(0),
    ])
    .split(inner);

    let title = Paragraph::new("VISION ACCESS")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, rows[0]);

    let editable = !state.is_fading();
    render_field(
        frame,
        rows[1],
        "Username",
        &form.username,
        editable && form.focus == LoginField::Username,
        accent,
        muted,
    );
    render_field(
        frame,
        rows[2],
        "Password",
        &masked(&form.password),
        editable && form.focus == LoginField::Password,
        accent,
        muted,
    );

    if let Some(error) = &state.error {
        let error = Paragraph::new(error.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Theme::ERROR));
        frame.render_widget(error, rows[3]);
    }

    let hint = Paragraph::new("Tab switch field │ Enter sign in")
        .alignment(Alignment::Center)
        .style(Style::default().fg(muted));
    frame.render_widget(hint, rows[4]);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    accent: Color,
    muted: Color,
) {
    let border = if focused { accent } else { muted };
    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(accent))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(accent))); // cursor
    }

    let field = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(format!(" {} ", label), Style::default().fg(border))),
    );
    frame.render_widget(field, area);
}

/// Password shown as bullets
pub fn masked(password: &str) -> String {
    "•".repeat(password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_counts_chars() {
        assert_eq!(masked(""), "");
        assert_eq!(masked("PROVISION"), "•••••••••");
        assert_eq!(masked("é1"), "••");
    }
}
