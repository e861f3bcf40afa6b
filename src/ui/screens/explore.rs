use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::app::App;
use crate::catalog;
use crate::ui::layout::{AppLayout, centered_rect};
use crate::ui::widgets::{render_footer, render_header};

pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let colors = &app.theme.colors;
    let data = app.store.data();

    render_header(frame, layout.header, app.theme, "explore", &data.user_name, data.tokens);

    let animals = catalog::ARCTIC_ANIMALS;
    let index = app.explore_selected.min(animals.len().saturating_sub(1));
    let animal = &animals[index];

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", animal.emoji, animal.name),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Lives in: {}   Eats: {}", animal.habitat, animal.diet),
            Style::default().fg(colors.dim()),
        )),
        Line::default(),
    ];
    for fact in animal.fun_facts {
        lines.push(Line::from(Span::styled(
            format!("• {fact}"),
            Style::default().fg(colors.fg()),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("{} / {}", index + 1, animals.len()),
        Style::default().fg(colors.dim()),
    )));

    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::bordered()
            .title(" arctic friends ")
            .border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(card, centered_rect(60, 70, layout.main));

    render_footer(frame, layout.footer, app.theme, " [←/→] Browse  [Esc] Back ");
}
