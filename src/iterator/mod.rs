//! Repeatable rows of an array field.
//!
//! [`FormIteratorItem`] renders one row; [`FormIterator`] renders them all
//! from a [`SharedArrayInput`]. Rows talk back to their list only through
//! [`IteratorContext`].

pub mod buttons;
mod context;
mod form_iterator;
mod item;
mod state;

pub use buttons::{ReorderDirection, trigger_reorder};
pub use context::{ItemContext, IteratorContext};
pub use form_iterator::{FormIterator, IteratorOptions};
pub use item::{
    DisableRemove, FormIteratorItem, ItemLabelFn, ItemProps, RemovePredicate, RenderedItem,
    default_item_label, disable_remove_field,
};
pub use state::{ArrayInputState, ListError, SharedArrayInput, member_path};
