use ratatui::{prelude::*, widgets::*};

use crate::{
    state::{TaskStatus, TaskStatusType},
    theme::Theme,
    view_models::{
        header::HeaderViewModel,
        list_table::{CellStyle, CellViewModel, FooterViewModel, ListTableViewModel},
    },
};

/// Render the tab bar with the episode title and deadline countdown
pub fn render_header(f: &mut Frame, area: Rect, vm: &HeaderViewModel, theme: &Theme) {
    let mut block = Block::bordered()
        .title(vm.title.as_str())
        .title_style(theme.key_hint())
        .border_style(Style::default().fg(theme.text_muted))
        .style(Style::default().bg(theme.bg_primary));

    if let Some(deadline) = &vm.deadline {
        block = block.title(Line::styled(format!(" {} ", deadline), theme.warning()).right_aligned());
    }

    let tabs = Tabs::new(vm.tabs.iter().map(String::as_str))
        .block(block)
        .style(theme.text())
        .highlight_style(
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .select(vm.selected_index)
        .divider("│");

    f.render_widget(tabs, area);
}

fn cell_style(cell: &CellViewModel, theme: &Theme) -> Style {
    match cell.style {
        CellStyle::Normal => Style::default(),
        CellStyle::Muted => theme.muted(),
        CellStyle::Highlight => Style::default()
            .fg(theme.highlight_fg)
            .add_modifier(Modifier::BOLD),
        CellStyle::Status(variant) => theme.variant(variant),
        CellStyle::Outcome(outcome) => theme.outcome(outcome),
    }
}

/// Render the table of the selected list
pub fn render_table(f: &mut Frame, area: Rect, vm: &ListTableViewModel, theme: &Theme) {
    let block = Block::bordered()
        .title(vm.title.as_str())
        .title_style(theme.key_hint())
        .border_style(Style::default().fg(theme.text_muted))
        .style(Style::default().bg(theme.bg_primary));

    if let Some(placeholder) = &vm.placeholder {
        let paragraph = Paragraph::new(placeholder.as_str())
            .style(theme.muted())
            .centered()
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vm.headers.iter().copied())
        .style(theme.table_header())
        .height(1);

    let rows = vm.rows.iter().enumerate().map(|(i, cells)| {
        Row::new(
            cells
                .iter()
                .map(|cell| Cell::from(cell.text.as_str()).style(cell_style(cell, theme))),
        )
        .style(theme.table_row(i))
    });

    let widths = vm.widths.iter().map(|w| Constraint::Percentage(*w));

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

/// Render "Page x of y", the spinner and the last error
pub fn render_footer(f: &mut Frame, area: Rect, vm: &FooterViewModel, theme: &Theme) {
    let mut spans = vec![Span::styled(format!(" {} ", vm.page_text), theme.text())];

    if let Some(spinner) = vm.spinner {
        spans.push(Span::styled(format!("{} loading ", spinner), theme.warning()));
    }

    if let Some(error) = &vm.error {
        spans.push(Span::styled(format!(" ✗ {} ", error), theme.error()));
    }

    for (key, description) in [("n/p", "page"), ("g/G", "first/last"), ("r", "reload"), ("?", "help")] {
        spans.push(Span::styled(format!(" {}", key), theme.key_hint()));
        spans.push(Span::styled(format!(" {} ", description), theme.key_description()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_secondary));
    f.render_widget(paragraph, area);
}

/// Render the last task status on the bottom line
pub fn render_status_bar(f: &mut Frame, area: Rect, status: Option<&TaskStatus>, theme: &Theme) {
    let line = match status {
        Some(status) => {
            let style = match status.status_type {
                TaskStatusType::Running => Style::default().fg(theme.status_info),
                TaskStatusType::Success => theme.success(),
                TaskStatusType::Error => theme.error(),
                TaskStatusType::Warning => theme.warning(),
            };
            Line::styled(format!(" {}", status.message), style)
        }
        None => Line::styled(" Ready", theme.muted()),
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.bg_primary)),
        area,
    );
}

/// Render the search prompt over the bottom of the table
pub fn render_search_prompt(f: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let popup = Rect {
        x: area.x + 2,
        y: area.bottom().saturating_sub(4),
        width: area.width.saturating_sub(4).min(60),
        height: 3,
    };

    f.render_widget(Clear, popup);
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(input, theme.text()),
        Span::styled("█", theme.key_hint()),
    ]))
    .block(
        Block::bordered()
            .title(" Search teams ")
            .title_bottom(" Enter apply | Esc cancel ")
            .border_style(theme.panel_border())
            .style(Style::default().bg(theme.bg_panel)),
    );
    f.render_widget(paragraph, popup);
}
