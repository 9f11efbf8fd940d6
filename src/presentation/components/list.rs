use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::super::view::ViewContext;
use super::rows::item_lines;

pub fn render_items(frame: &mut Frame<'_>, area: Rect, ctx: &ViewContext<'_>) {
    let block = Block::default()
        .title(ctx.title.to_string())
        .borders(Borders::ALL);
    if ctx.items.is_empty() {
        let placeholder = Paragraph::new("No entries yet. Press Ctrl+N to add one.").block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let content_width = area.width.saturating_sub(4);
    let items: Vec<ListItem<'static>> = ctx
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| ListItem::new(item_lines(item, idx == ctx.selected, content_width)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(ctx.selected.min(ctx.items.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut state);
}
