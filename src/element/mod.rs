//! Declarative element tree used by list rows.
//!
//! Elements are immutable descriptions: a name plus an ordered prop map.
//! Rows never mutate the elements they are given; they derive new ones with
//! [`Element::clone_with`].

mod props;

use std::fmt;

use crossterm::event::KeyEvent;

pub use props::{ClickHandler, PropPatch, PropValue, Props, ReorderHandler, keys};

/// Payload handed to `onClick` handlers.
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    /// Key press that activated the control, if it came from the keyboard.
    pub key: Option<KeyEvent>,
}

impl ClickEvent {
    pub fn from_key(key: KeyEvent) -> Self {
        Self { key: Some(key) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    props: Props,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: Props::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_source(self, source: impl Into<String>) -> Self {
        self.with_prop(keys::SOURCE, source.into())
    }

    pub fn with_label(self, label: impl Into<PropValue>) -> Self {
        self.with_prop(keys::LABEL, label)
    }

    pub fn with_on_click(self, handler: impl Fn(&ClickEvent) + 'static) -> Self {
        self.with_prop(keys::ON_CLICK, PropValue::click(handler))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn has_prop(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.prop(key).and_then(PropValue::as_str)
    }

    pub fn bool_prop(&self, key: &str) -> Option<bool> {
        self.prop(key).and_then(PropValue::as_bool)
    }

    pub fn int_prop(&self, key: &str) -> Option<i64> {
        self.prop(key).and_then(PropValue::as_int)
    }

    pub fn source(&self) -> Option<&str> {
        self.str_prop(keys::SOURCE).filter(|source| !source.is_empty())
    }

    pub fn class_name(&self) -> Option<&str> {
        self.str_prop(keys::CLASS_NAME)
    }

    pub fn on_click(&self) -> Option<ClickHandler> {
        match self.prop(keys::ON_CLICK) {
            Some(PropValue::Click(handler)) => Some(handler.clone()),
            _ => None,
        }
    }

    pub fn reorder_handler(&self) -> Option<ReorderHandler> {
        match self.prop(keys::REORDER) {
            Some(PropValue::Reorder(handler)) => Some(handler.clone()),
            _ => None,
        }
    }

    /// Returns a copy whose props are overridden key by key with `patch`.
    pub fn clone_with(&self, patch: &PropPatch) -> Element {
        let mut props = self.props.clone();
        for (key, value) in patch.iter() {
            match value {
                Some(value) => {
                    props.insert(key.clone(), value.clone());
                }
                None => {
                    props.shift_remove(key);
                }
            }
        }
        Element {
            name: self.name.clone(),
            props,
        }
    }

    /// Runs the `onClick` handler. Returns `false` when there is none.
    pub fn click(&self, event: &ClickEvent) -> bool {
        match self.on_click() {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

/// A child slot. Only [`Node::Element`] takes part in rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    Element(Element),
    Text(String),
    #[default]
    Empty,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Option<Element>> for Node {
    fn from(element: Option<Element>) -> Self {
        element.map(Node::Element).unwrap_or(Node::Empty)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (key, value) in &self.props {
            write!(f, " {key}={value}")?;
        }
        write!(f, ">")
    }
}

/// Joins class fragments with single spaces, skipping empty ones.
pub fn class_names<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
