use ratatui::{
    layout::Margin,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{shortcuts::get_shortcuts, theme::Theme};

/// Render the shortcuts help panel as a centered floating window
pub fn render_shortcuts_panel(f: &mut Frame, area: Rect, theme: &Theme) {
    let popup_width = (area.width * 80 / 100).min(70);
    let popup_height = (area.height * 90 / 100).min(30);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keyboard Shortcuts ")
        .title_style(theme.panel_border())
        .border_style(theme.panel_border())
        .style(Style::default().bg(theme.bg_panel));
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let mut lines = Vec::new();
    for category in get_shortcuts() {
        lines.push(Line::styled(category.name, theme.section_header()));
        for shortcut in category.shortcuts {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:14}", shortcut.key_display), theme.success()),
                Span::styled(shortcut.description, theme.key_description()),
            ]));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(theme.bg_panel)),
        content_area,
    );

    let footer = Line::from(vec![
        Span::styled("Press ", theme.muted()),
        Span::styled("?", theme.key_hint()),
        Span::styled(" or ", theme.muted()),
        Span::styled("Esc", theme.key_hint()),
        Span::styled(" to close this help", theme.muted()),
    ]);
    f.render_widget(
        Paragraph::new(footer)
            .style(Style::default().bg(theme.bg_panel))
            .centered(),
        footer_area,
    );
}
