mod footer;
mod list;
mod rows;

pub use footer::render_footer;
pub use list::render_items;
pub use rows::{format_value, item_lines, value_at};
