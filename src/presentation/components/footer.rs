use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::super::view::ViewContext;
use crate::iterator::RenderedItem;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &ViewContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    if let Some(help) = ctx.help {
        let help_widget = Paragraph::new(help)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(help_widget, rows[0]);
    }

    let mut spans = vec![Span::raw(ctx.status_message.to_string())];
    if let Some(item) = ctx.items.get(ctx.selected) {
        spans.push(Span::raw(" • "));
        spans.extend(focus_spans(item));
    }
    spans.push(Span::raw(" "));
    spans.push(count_badge(ctx.items.len(), ctx.dirty));

    let status_widget = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}

fn focus_spans(item: &RenderedItem) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        format!("#{} ({})", item.label, item.member),
        Style::default().fg(Color::Cyan),
    )];
    if !item.can_remove() {
        spans.push(Span::styled(" locked", Style::default().fg(Color::DarkGray)));
    }
    if !item.can_reorder() {
        spans.push(Span::styled(" pinned", Style::default().fg(Color::DarkGray)));
    }
    spans
}

fn count_badge(count: usize, dirty: bool) -> Span<'static> {
    let noun = if count == 1 { "entry" } else { "entries" };
    if dirty {
        Span::styled(
            format!("[{count} {noun}, unsaved]"),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled(
            format!("[{count} {noun}]"),
            Style::default().fg(Color::Green),
        )
    }
}
