use ::log::Level;
use ratatui::{
    prelude::*,
    widgets::{Block, Clear, List, ListItem},
};
use std::sync::PoisonError;

use crate::{state::DebugConsoleState, theme::Theme};

/// Render the debug console as a Quake-style drop-down panel
pub fn render_debug_console(f: &mut Frame, area: Rect, console: &DebugConsoleState, theme: &Theme) {
    let console_height = (area.height * console.height_percent) / 100;
    let console_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: console_height.min(area.height),
    };

    f.render_widget(Clear, console_area);

    let logs = console.logs.lock().unwrap_or_else(PoisonError::into_inner);
    let total_logs = logs.len();
    let visible_height = console_height.saturating_sub(2) as usize; // Borders

    // scroll_offset counts lines up from the newest entry
    let newest_first_skip = if console.auto_scroll {
        0
    } else {
        console
            .scroll_offset
            .min(total_logs.saturating_sub(visible_height))
    };
    let start = total_logs.saturating_sub(visible_height + newest_first_skip);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(start)
        .take(visible_height)
        .map(|entry| {
            let color = match entry.level {
                Level::Error => theme.status_error,
                Level::Warn => theme.status_warning,
                Level::Info => theme.text_primary,
                Level::Debug => theme.text_secondary,
                Level::Trace => theme.text_muted,
            };

            let target = if entry.target.chars().count() > 20 {
                format!("{}...", entry.target.chars().take(17).collect::<String>())
            } else {
                format!("{:20}", entry.target)
            };

            ListItem::new(format!(
                "{} {:5} {} {}",
                entry.timestamp.format("%H:%M:%S%.3f"),
                entry.level,
                target,
                entry.message
            ))
            .style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(items).block(
        Block::bordered()
            .title(format!(
                " Debug Console ({}) {} ",
                total_logs,
                if console.auto_scroll { "[AUTO]" } else { "[MANUAL]" }
            ))
            .title_bottom(" ` Close | j/k Scroll | a Auto-scroll | c Clear ")
            .border_style(Style::default().fg(theme.accent_primary))
            .style(Style::default().bg(theme.bg_secondary)),
    );

    f.render_widget(list, console_area);
}
