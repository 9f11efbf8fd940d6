use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde_json::Value;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::element::{Element, keys};
use crate::iterator::RenderedItem;

const REORDER_HINT: &str = "[Ctrl+↑/↓ move]";
const LABEL_SEPARATOR: &str = ": ";

/// Lines for one row: header, one block per field.
pub fn item_lines(item: &RenderedItem, is_selected: bool, max_width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![header_line(item, is_selected)];

    let label_width = item
        .fields
        .iter()
        .map(|field| UnicodeWidthStr::width(field_label(field)))
        .max()
        .unwrap_or(0);
    for field in &item.fields {
        lines.extend(field_lines(item, field, label_width, max_width));
    }
    if item.fields.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no fields)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn header_line(item: &RenderedItem, is_selected: bool) -> Line<'static> {
    let label_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![Span::styled(format!("#{}", item.label), label_style)];
    if item.can_reorder() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            REORDER_HINT,
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(button) = &item.remove_button {
        let text = button.str_prop(keys::LABEL).unwrap_or("Remove");
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[✕ {text}]"),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn field_lines(
    item: &RenderedItem,
    field: &Element,
    label_width: usize,
    max_width: u16,
) -> Vec<Line<'static>> {
    let label = field_label(field);
    let value = field
        .source()
        .and_then(|source| value_at(&item.record, &item.member, source))
        .map(format_value)
        .unwrap_or_default();
    let disabled = field.bool_prop(keys::DISABLED).unwrap_or(false);
    let value_style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let prefix = if label.is_empty() {
        "  ".to_string()
    } else {
        let padding = label_width.saturating_sub(UnicodeWidthStr::width(label));
        format!("  {label}{}{LABEL_SEPARATOR}", " ".repeat(padding))
    };
    let prefix_width = UnicodeWidthStr::width(prefix.as_str());
    let available = (max_width as usize).saturating_sub(prefix_width).max(8);

    let mut segments: Vec<String> = wrap(&value, available)
        .into_iter()
        .map(|segment| segment.into_owned())
        .collect();
    if segments.is_empty() {
        segments.push(String::new());
    }

    let indent = " ".repeat(prefix_width);
    segments
        .into_iter()
        .enumerate()
        .map(|(line_index, segment)| {
            let lead = if line_index == 0 {
                Span::styled(prefix.clone(), Style::default().fg(Color::Gray))
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![lead, Span::styled(segment, value_style)])
        })
        .collect()
}

fn field_label(field: &Element) -> &str {
    match field.prop(keys::LABEL) {
        Some(label) if !label.is_blank_label() => label.as_str().unwrap_or(""),
        _ => "",
    }
}

/// Resolves a scoped field path (`items.2.title`) inside the row's record.
pub fn value_at<'a>(record: &'a Value, member: &str, source: &str) -> Option<&'a Value> {
    let relative = source.strip_prefix(member)?;
    if relative.is_empty() {
        return Some(record);
    }
    let relative = relative.strip_prefix('.')?;
    relative
        .split('.')
        .try_fold(record, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        })
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(num) => num.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => format!("array({})", items.len()),
        Value::Object(map) => format!("object({})", map.len()),
    }
}
