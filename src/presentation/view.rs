use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::iterator::RenderedItem;

use super::components::{render_footer, render_items};

pub struct ViewContext<'a> {
    pub title: &'a str,
    pub items: &'a [RenderedItem],
    pub selected: usize,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: ViewContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(frame.area());

    render_items(frame, chunks[0], &ctx);
    render_footer(frame, chunks[1], &ctx);
}
