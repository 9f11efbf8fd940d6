mod components;
mod view;

pub use components::{format_value, item_lines, value_at};
pub use view::{ViewContext, draw};
