use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, HOME_EXTRA_ENTRIES};
use crate::catalog;
use crate::ui::layout::{AppLayout, centered_rect};
use crate::ui::widgets::{render_footer, render_header};

pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let colors = &app.theme.colors;
    let data = app.store.data();

    render_header(frame, layout.header, app.theme, "home", &data.user_name, data.tokens);

    let mut lines: Vec<Line> = vec![avatar_line(app), Line::default()];

    for (i, section) in catalog::SECTIONS.iter().enumerate() {
        let level = data.sections.get(section.id).level;
        let selected = app.home_selected == i;
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{} {:<16}", section.emoji, section.name), style),
            Span::styled(format!("level {level}  "), Style::default().fg(colors.warning())),
            Span::styled(section.description, Style::default().fg(colors.dim())),
        ]));
    }
    lines.push(Line::default());

    for (j, name) in HOME_EXTRA_ENTRIES.iter().enumerate() {
        let i = catalog::SECTIONS.len() + j;
        let selected = app.home_selected == i;
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        lines.push(Line::from(Span::styled(format!("{marker}{name}"), style)));
    }

    let menu_area = centered_rect(60, 80, layout.main);
    let menu = Paragraph::new(lines).block(
        Block::bordered()
            .title(" choose an adventure ")
            .border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(menu, menu_area);

    render_footer(
        frame,
        layout.footer,
        app.theme,
        " [↑/↓] Move  [Enter] Start  [q] Quit ",
    );
}

/// The penguin and whatever cosmetics are equipped.
fn avatar_line(app: &App) -> Line<'static> {
    let equipped = &app.store.data().equipped;
    let mut spans = vec![Span::raw("   🐧")];
    for id in [
        equipped.hat.as_deref(),
        equipped.scarf.as_deref(),
        equipped.background.as_deref(),
        equipped.accessory.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Some(item) = catalog::shop_item(id) {
            spans.push(Span::raw(format!(" {}", item.emoji)));
        }
    }
    Line::from(spans)
}
