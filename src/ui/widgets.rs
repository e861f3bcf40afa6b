use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};

use crate::ui::theme::Theme;

/// Top bar: app name on the left, learner name and token balance on the right.
pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme, title: &str, name: &str, tokens: u32) {
    let colors = &theme.colors;
    let who = if name.is_empty() { "explorer" } else { name };
    let info = format!(" {who} | 🪙 {tokens} tokens ");

    let line = Line::from(vec![
        Span::styled(
            format!(" floe · {title} "),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.gold()).bg(colors.header_bg()),
        ),
    ]);
    let header = Paragraph::new(line).style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme, hints: &str) {
    let footer = Paragraph::new(Line::from(Span::styled(
        hints.to_string(),
        Style::default().fg(theme.colors.dim()),
    )));
    frame.render_widget(footer, area);
}

/// Remaining-time bar for timed rounds.
pub fn render_timer_bar(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    remaining_secs: u64,
    total_secs: u64,
) {
    let colors = &theme.colors;
    let ratio = if total_secs == 0 {
        0.0
    } else {
        (remaining_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
    };
    let color = if remaining_secs <= 10 {
        colors.error()
    } else {
        colors.accent()
    };
    let gauge = Gauge::default()
        .block(Block::bordered().border_style(Style::default().fg(colors.border())))
        .gauge_style(Style::default().fg(color).bg(colors.bg()))
        .ratio(ratio)
        .label(format!("{remaining_secs}s"));
    frame.render_widget(gauge, area);
}

/// Big centered 3-2-1-GO overlay.
pub fn render_countdown(frame: &mut Frame, area: Rect, theme: &Theme, value: i64) {
    let colors = &theme.colors;
    let text = if value > 0 {
        value.to_string()
    } else {
        "GO!".to_string()
    };
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Get ready...",
            Style::default().fg(colors.dim()),
        )),
    ];
    let overlay = Paragraph::new(lines)
        .centered()
        .block(Block::bordered().border_style(Style::default().fg(colors.accent())));
    frame.render_widget(overlay, area);
}

/// The digits typed so far, shown as an answer slot.
pub fn answer_line(theme: &Theme, answer: &str) -> Line<'static> {
    let colors = &theme.colors;
    let shown = if answer.is_empty() {
        "_".to_string()
    } else {
        answer.to_string()
    };
    Line::from(vec![
        Span::styled("= ", Style::default().fg(colors.dim())),
        Span::styled(
            shown,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
