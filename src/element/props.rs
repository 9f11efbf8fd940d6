use std::{fmt, rc::Rc};

use indexmap::IndexMap;
use serde_json::Value;

use super::ClickEvent;

pub type ClickHandler = Rc<dyn Fn(&ClickEvent)>;
pub type ReorderHandler = Rc<dyn Fn(usize, usize)>;

pub type Props = IndexMap<String, PropValue>;

/// Well-known prop names shared by rows and their controls.
pub mod keys {
    pub const SOURCE: &str = "source";
    pub const LABEL: &str = "label";
    pub const INDEX: &str = "index";
    pub const DISABLED: &str = "disabled";
    pub const ON_CLICK: &str = "onClick";
    pub const CLASS_NAME: &str = "className";
    pub const MAX: &str = "max";
    pub const REORDER: &str = "reOrder";
}

#[derive(Clone)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Json(Value),
    Click(ClickHandler),
    Reorder(ReorderHandler),
}

impl PropValue {
    pub fn click(handler: impl Fn(&ClickEvent) + 'static) -> Self {
        PropValue::Click(Rc::new(handler))
    }

    pub fn reorder(handler: impl Fn(usize, usize) + 'static) -> Self {
        PropValue::Reorder(Rc::new(handler))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(text) => Some(text),
            PropValue::Json(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(flag) => Some(*flag),
            PropValue::Json(Value::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(value) => Some(*value),
            PropValue::Json(value) => value.as_i64(),
            _ => None,
        }
    }

    /// `""` and `false` both mean "render without a label".
    pub fn is_blank_label(&self) -> bool {
        matches!(self.as_str(), Some("")) || self.as_bool() == Some(false)
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Int(a), PropValue::Int(b)) => a == b,
            (PropValue::Str(a), PropValue::Str(b)) => a == b,
            (PropValue::Json(a), PropValue::Json(b)) => a == b,
            (PropValue::Click(a), PropValue::Click(b)) => Rc::ptr_eq(a, b),
            (PropValue::Reorder(a), PropValue::Reorder(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            PropValue::Int(value) => f.debug_tuple("Int").field(value).finish(),
            PropValue::Str(text) => f.debug_tuple("Str").field(text).finish(),
            PropValue::Json(value) => f.debug_tuple("Json").field(value).finish(),
            PropValue::Click(_) => f.write_str("Click(<handler>)"),
            PropValue::Reorder(_) => f.write_str("Reorder(<handler>)"),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(flag) => write!(f, "{flag}"),
            PropValue::Int(value) => write!(f, "{value}"),
            PropValue::Str(text) => write!(f, "{text:?}"),
            PropValue::Json(value) => write!(f, "{value}"),
            PropValue::Click(_) | PropValue::Reorder(_) => f.write_str("{fn}"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<usize> for PropValue {
    fn from(value: usize) -> Self {
        PropValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Json(value)
    }
}

/// Ordered set of prop overrides. `None` entries remove the prop.
#[derive(Debug, Clone, Default)]
pub struct PropPatch {
    entries: IndexMap<String, Option<PropValue>>,
}

impl PropPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> &mut Self {
        self.entries.insert(key.into(), Some(value.into()));
        self
    }

    pub fn unset(&mut self, key: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), None);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<PropValue>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
