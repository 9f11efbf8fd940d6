mod array_ui;
mod editor;
pub(crate) mod input;
mod options;
mod status;
mod terminal;

pub use array_ui::ArrayInputUI;
pub use input::{KeyCommand, classify};
pub use options::UiOptions;
