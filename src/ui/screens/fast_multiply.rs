use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::engine::facts::RoundMode;
use crate::session::fast_multiply::{DRILL_SECS, FastPhase, ROUND_SECS};
use crate::ui::layout::{AppLayout, centered_rect};
use crate::ui::widgets::{answer_line, render_countdown, render_footer, render_header, render_timer_bar};

pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let data = app.store.data();
    render_header(
        frame,
        layout.header,
        app.theme,
        "fast multiplication",
        &data.user_name,
        data.tokens,
    );

    let now = Instant::now();
    match app.fast.phase() {
        FastPhase::ModeSelect => render_mode_select(frame, app, &layout),
        FastPhase::Countdown => {
            let value = app.fast.countdown_value(now).unwrap_or(0).max(0);
            render_countdown(frame, centered_rect(40, 40, layout.main), app.theme, value);
            render_footer(frame, layout.footer, app.theme, " Get ready! ");
        }
        FastPhase::Playing => render_playing(frame, app, &layout, now, ROUND_SECS),
        FastPhase::MissDrill => render_playing(frame, app, &layout, now, DRILL_SECS),
        FastPhase::RoundEnd => render_round_end(frame, app, &layout),
        FastPhase::DrillEnd => render_drill_end(frame, app, &layout),
    }
}

fn render_mode_select(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;
    let best = &app.store.data().multiplication.best_scores;

    let mut lines = vec![
        Line::from(Span::styled(
            "Pick a challenge:",
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for table in 2..=9u8 {
        let best_score = best.single.get(&table).copied().unwrap_or(0);
        lines.push(Line::from(vec![
            Span::styled(
                format!("  [{table}] {table}× table"),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                if best_score > 0 {
                    format!("   best {best_score}")
                } else {
                    String::new()
                },
                Style::default().fg(colors.gold()),
            ),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("  [m] Mixed tables", Style::default().fg(colors.fg())),
        Span::styled(
            if best.mixed > 0 {
                format!("   best {}", best.mixed)
            } else {
                String::new()
            },
            Style::default().fg(colors.gold()),
        ),
    ]));
    if app.boss_available() {
        lines.push(Line::from(vec![
            Span::styled("  [b] Boss round", Style::default().fg(colors.error())),
            Span::styled(
                ": the facts that got away",
                Style::default().fg(colors.dim()),
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "  [b] Boss round (unlocks after a few misses)",
            Style::default().fg(colors.dim()),
        )));
    }

    let card = Paragraph::new(lines).block(
        Block::bordered()
            .title(" fast multiplication ")
            .border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(card, centered_rect(55, 80, layout.main));
    render_footer(frame, layout.footer, app.theme, " [2-9/m/b] Start  [Esc] Back ");
}

fn render_playing(frame: &mut Frame, app: &App, layout: &AppLayout, now: Instant, total_secs: u64) {
    let colors = &app.theme.colors;
    let area = centered_rect(55, 80, layout.main);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let remaining = app.fast.time_remaining(now).as_secs();
    render_timer_bar(frame, rows[0], app.theme, remaining, total_secs);

    let mut lines = Vec::new();
    if app.fast.phase() == FastPhase::MissDrill {
        let (corrected, total) = app.fast.drill_progress();
        lines.push(Line::from(Span::styled(
            format!("Miss drill: fixed {corrected} of {total}"),
            Style::default().fg(colors.warning()),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Score: {}", app.fast.score()),
                Style::default().fg(colors.success()),
            ),
            Span::styled(
                format!("   Streak: {}", app.fast.streak()),
                Style::default().fg(colors.warning()),
            ),
        ]));
    }
    lines.push(Line::default());

    if let Some(flash) = app.fast.flash() {
        lines.push(Line::from(Span::styled(
            format!("{} = {}", flash.text, flash.answer),
            Style::default()
                .fg(colors.error())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "Remember it!",
            Style::default().fg(colors.dim()),
        )));
    } else if let Some(question) = app.fast.question() {
        lines.push(Line::from(Span::styled(
            question.text.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        lines.push(answer_line(app.theme, app.fast.answer()));
    }

    let title = if app.fast.phase() == FastPhase::MissDrill {
        " miss drill ".to_string()
    } else {
        match app.fast.mode() {
            RoundMode::Single { table } => format!(" {table}× table "),
            RoundMode::Mixed => " mixed ".to_string(),
            RoundMode::Boss => " boss ".to_string(),
        }
    };
    let card = Paragraph::new(lines).centered().block(
        Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(card, rows[1]);
    render_footer(
        frame,
        layout.footer,
        app.theme,
        " [0-9] Type  [Enter] Answer  [Esc] Back ",
    );
}

fn render_round_end(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;
    let Some(summary) = app.fast.summary() else {
        return;
    };

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Score: {}", summary.score),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} of {} correct · best streak {}",
                summary.correct_count, summary.total_answered, summary.best_streak),
            Style::default().fg(colors.dim()),
        )),
        Line::from(Span::styled(
            format!("+{} tokens", summary.tokens_earned),
            Style::default().fg(colors.gold()),
        )),
    ];
    if summary.is_new_best {
        lines.push(Line::from(Span::styled(
            "⭐ New best!",
            Style::default().fg(colors.warning()).add_modifier(Modifier::BOLD),
        )));
    }
    if summary.miss_count > 0 {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "A quick drill on the ones that slipped?",
            Style::default().fg(colors.accent()),
        )));
    }

    let card = Paragraph::new(lines).centered().block(
        Block::bordered()
            .title(" time! ")
            .border_style(Style::default().fg(colors.accent())),
    );
    frame.render_widget(card, centered_rect(50, 60, layout.main));
    render_footer(frame, layout.footer, app.theme, " [Enter] Continue  [Esc] Back ");
}

fn render_drill_end(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;
    let (corrected, total) = app.fast.drill_progress();

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Corrected {corrected} of {total}"),
            Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Those facts won't get away next time.",
            Style::default().fg(colors.dim()),
        )),
    ];
    let card = Paragraph::new(lines).centered().block(
        Block::bordered()
            .title(" drill done ")
            .border_style(Style::default().fg(colors.success())),
    );
    frame.render_widget(card, centered_rect(50, 50, layout.main));
    render_footer(frame, layout.footer, app.theme, " [Enter] Back to modes ");
}
