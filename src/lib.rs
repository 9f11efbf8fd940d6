#![deny(rust_2018_idioms)]

mod app;
pub mod element;
pub mod i18n;
mod io;
pub mod iterator;
mod presentation;

pub use app::{ArrayInputUI, KeyCommand, UiOptions, classify};
pub use element::{ClickEvent, Element, Node, PropPatch, PropValue};
pub use i18n::{
    IdentityTranslator, LabelQuery, MessageCatalog, TranslationArgs, Translator,
    field_label_translation_args,
};
pub use io::{DocumentFormat, parse_document_str, read_document, serialize_value};
pub use iterator::{
    ArrayInputState, DisableRemove, FormIterator, FormIteratorItem, ItemContext, ItemProps,
    IteratorContext, IteratorOptions, RenderedItem, SharedArrayInput,
};
pub use presentation::{format_value, item_lines, value_at};

pub mod prelude {
    pub use super::{
        ArrayInputUI, DisableRemove, Element, FormIterator, IteratorOptions, MessageCatalog,
        SharedArrayInput, UiOptions,
    };
}
