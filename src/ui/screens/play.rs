use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::catalog;
use crate::session::play::PlayPhase;
use crate::ui::layout::{AppLayout, centered_rect};
use crate::ui::widgets::{answer_line, render_footer, render_header};

pub fn render(frame: &mut Frame, app: &App) {
    let Some(play) = app.play.as_ref() else {
        return;
    };
    let layout = AppLayout::new(frame.area());
    let colors = &app.theme.colors;
    let data = app.store.data();

    let section_name = catalog::SECTIONS
        .iter()
        .find(|s| s.id == play.section())
        .map(|s| s.name)
        .unwrap_or("play");
    render_header(frame, layout.header, app.theme, section_name, &data.user_name, data.tokens);

    let card_area = centered_rect(60, 70, layout.main);

    match play.phase() {
        PlayPhase::Loading => {
            let loading = Paragraph::new(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(colors.dim()),
            )))
            .centered();
            frame.render_widget(loading, card_area);
            render_footer(frame, layout.footer, app.theme, " [Esc] Back ");
        }
        PlayPhase::Answering => {
            let mut lines = streak_lines(app);
            if play.is_retry() {
                lines.push(Line::from(Span::styled(
                    "Second try, you've got this!",
                    Style::default().fg(colors.warning()),
                )));
            }
            if let Some(problem) = play.problem() {
                lines.push(Line::from(Span::styled(
                    problem.question.clone(),
                    Style::default()
                        .fg(colors.fg())
                        .add_modifier(Modifier::BOLD),
                )));
                if let Some(hint) = &problem.hint {
                    lines.push(Line::from(Span::styled(
                        format!("hint: {hint}"),
                        Style::default().fg(colors.dim()),
                    )));
                }
                lines.push(Line::default());
                lines.push(answer_line(app.theme, play.answer()));
            }
            let card = Paragraph::new(lines).centered().block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.border())),
            );
            frame.render_widget(card, card_area);
            render_footer(
                frame,
                layout.footer,
                app.theme,
                " [0-9] Type  [Backspace] Erase  [Enter] Check  [Esc] Back ",
            );
        }
        PlayPhase::Correct => {
            let lines = vec![
                Line::default(),
                Line::from(Span::styled(
                    "🎉 Correct!",
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("+{} tokens", play.reward_tokens()),
                    Style::default().fg(colors.gold()),
                )),
                Line::default(),
                Line::from(Span::styled(
                    format!("Streak: {}", play.streak()),
                    Style::default().fg(colors.warning()),
                )),
            ];
            let card = Paragraph::new(lines).centered().block(
                Block::bordered()
                    .title(" well done ")
                    .border_style(Style::default().fg(colors.success())),
            );
            frame.render_widget(card, card_area);
            render_footer(frame, layout.footer, app.theme, " [Enter] Next problem ");
        }
        PlayPhase::FirstWrong => {
            let lines = vec![
                Line::default(),
                Line::from(Span::styled(
                    "Not quite!",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Take another look and try again.",
                    Style::default().fg(colors.fg()),
                )),
            ];
            let card = Paragraph::new(lines).centered().block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.warning())),
            );
            frame.render_widget(card, card_area);
            render_footer(frame, layout.footer, app.theme, " [Enter] Try again ");
        }
        PlayPhase::Wrong => {
            let mut lines = vec![Line::from(Span::styled(
                "Let's walk through it:",
                Style::default().fg(colors.fg()),
            ))];
            match play.explanation() {
                Some(explanation) => {
                    for (i, step) in explanation.steps.iter().enumerate() {
                        lines.push(Line::from(Span::styled(
                            format!("{}. {step}", i + 1),
                            Style::default().fg(colors.fg()),
                        )));
                    }
                    lines.push(Line::default());
                    lines.push(Line::from(Span::styled(
                        explanation.encouragement.clone(),
                        Style::default().fg(colors.success()),
                    )));
                }
                None => lines.push(Line::from(Span::styled(
                    "Thinking...",
                    Style::default().fg(colors.dim()),
                ))),
            }
            let card = Paragraph::new(lines).block(
                Block::bordered()
                    .title(" explanation ")
                    .border_style(Style::default().fg(colors.error())),
            );
            frame.render_widget(card, card_area);
            let hints = if app.narration_playing() {
                " [Enter] Next problem  [s] Stop voice  [Esc] Back "
            } else {
                " [Enter] Next problem  [r] Read aloud  [Esc] Back "
            };
            render_footer(frame, layout.footer, app.theme, hints);
        }
    }
}

fn streak_lines(app: &App) -> Vec<Line<'static>> {
    let Some(play) = app.play.as_ref() else {
        return Vec::new();
    };
    if play.streak() > 0 {
        vec![
            Line::from(Span::styled(
                format!("🔥 Streak: {}", play.streak()),
                Style::default().fg(app.theme.colors.warning()),
            )),
            Line::default(),
        ]
    } else {
        vec![Line::default()]
    }
}
