use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::catalog;
use crate::ui::layout::{AppLayout, centered_rect};
use crate::ui::widgets::{render_footer, render_header};

pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let colors = &app.theme.colors;
    let data = app.store.data();

    render_header(frame, layout.header, app.theme, "shop", &data.user_name, data.tokens);

    let mut lines: Vec<Line> = Vec::new();
    for (i, item) in catalog::SHOP_ITEMS.iter().enumerate() {
        let owned = data.purchased_items.iter().any(|id| id == item.id);
        let equipped = data.equipped.slot(item.category) == Some(item.id);
        let selected = app.shop_selected == i;

        let marker = if selected { "> " } else { "  " };
        let status = if equipped {
            "worn"
        } else if owned {
            "owned"
        } else {
            ""
        };
        let affordable = data.tokens >= item.cost;

        let name_style = if selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else if owned {
            Style::default().fg(colors.fg())
        } else if affordable {
            Style::default().fg(colors.fg())
        } else {
            Style::default().fg(colors.dim())
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{} {:<20}", item.emoji, item.name), name_style),
            Span::styled(
                if owned {
                    "      ".to_string()
                } else {
                    format!("🪙 {:<3} ", item.cost)
                },
                Style::default().fg(colors.gold()),
            ),
            Span::styled(status, Style::default().fg(colors.success())),
        ]));
    }

    let card = Paragraph::new(lines).block(
        Block::bordered()
            .title(" cosmetics ")
            .border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(card, centered_rect(60, 70, layout.main));

    render_footer(
        frame,
        layout.footer,
        app.theme,
        " [↑/↓] Move  [Enter] Buy / wear / take off  [Esc] Back ",
    );
}
