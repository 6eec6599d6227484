//! Authorization screen: typed stage transcript and segmented progress bar

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::anim::StageSequencer;
use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;

/// Segments in the progress bar
pub const PROGRESS_SEGMENTS: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, sequencer: &StageSequencer) {
    let opacity = if sequencer.is_fading() { 0.35 } else { 1.0 };
    let accent = Theme::fade(Theme::PRIMARY, opacity);

    let mut lines: Vec<Line> = sequencer
        .transcript()
        .split('\n')
        .map(|text| Line::from(Span::styled(format!("> {}", text), Style::default().fg(accent))))
        .collect();

    // Cursor on the line being typed
    if sequencer.active_stage().is_some() {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("█", Style::default().fg(accent)));
        }
    } else if lines.last().is_some_and(|l| l.width() <= 2) {
        lines.pop();
    }

    let height = lines.len() as u16 + 3;
    let panel = centered_rect(52, height, area);
    let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).split(panel);

    frame.render_widget(Paragraph::new(lines), rows[0]);

    let percent = sequencer.overall_percent();
    if percent < 100.0 {
        let bar = progress_bar(sequencer.progress_bars(PROGRESS_SEGMENTS), PROGRESS_SEGMENTS);
        let line = Line::from(vec![
            Span::styled(bar, Style::default().fg(accent)),
            Span::styled(format!(" {:>3.0}%", percent), Theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rows[1]);
    }
}

/// `filled` of `total` segments
pub fn progress_bar(filled: usize, total: usize) -> String {
    let filled = filled.min(total);
    format!("{}{}", "▰".repeat(filled), "▱".repeat(total - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "▱▱▱▱");
        assert_eq!(progress_bar(3, 4), "▰▰▰▱");
        assert_eq!(progress_bar(9, 4), "▰▰▰▰");
    }
}
