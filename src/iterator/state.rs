use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use serde_json::Value;

use super::context::IteratorContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::OutOfRange { index, len } => {
                write!(f, "index {index} is out of range for a list of {len}")
            }
        }
    }
}

impl std::error::Error for ListError {}

/// `items` + 2 → `items.2`; an empty source yields the bare index.
pub fn member_path(source: &str, index: usize) -> String {
    if source.is_empty() {
        index.to_string()
    } else {
        format!("{source}.{index}")
    }
}

/// Records backing one array field.
#[derive(Debug, Clone, Default)]
pub struct ArrayInputState {
    source: String,
    records: Vec<Value>,
    dirty: bool,
}

impl ArrayInputState {
    pub fn new(source: impl Into<String>, records: Vec<Value>) -> Self {
        Self {
            source: source.into(),
            records,
            dirty: false,
        }
    }

    /// Seeds from a JSON array. Anything else starts an empty list.
    pub fn from_value(source: impl Into<String>, value: &Value) -> Self {
        let source = source.into();
        let records = match value {
            Value::Array(items) => items.clone(),
            Value::Null => Vec::new(),
            other => {
                tracing::warn!(%source, kind = value_kind(other), "expected an array of records");
                Vec::new()
            }
        };
        Self::new(source, records)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&Value> {
        self.records.get(index)
    }

    pub fn member(&self, index: usize) -> String {
        member_path(&self.source, index)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn push(&mut self, record: Value) -> usize {
        self.records.push(record);
        self.dirty = true;
        let index = self.records.len() - 1;
        tracing::debug!(source = %self.source, index, "added record");
        index
    }

    pub fn insert(&mut self, index: usize, record: Value) -> Result<(), ListError> {
        if index > self.records.len() {
            return Err(self.out_of_range(index));
        }
        self.records.insert(index, record);
        self.dirty = true;
        tracing::debug!(source = %self.source, index, "inserted record");
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Value, ListError> {
        if index >= self.records.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.records.remove(index);
        self.dirty = true;
        tracing::debug!(
            source = %self.source,
            index,
            remaining = self.records.len(),
            "removed record"
        );
        Ok(removed)
    }

    /// Moves the record at `from` so it ends up at `to`. Siblings shift.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool, ListError> {
        let len = self.records.len();
        if from >= len {
            return Err(self.out_of_range(from));
        }
        if to >= len {
            return Err(self.out_of_range(to));
        }
        if from == to {
            return Ok(false);
        }
        let record = self.records.remove(from);
        self.records.insert(to, record);
        self.dirty = true;
        tracing::debug!(source = %self.source, from, to, "moved record");
        Ok(true)
    }

    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            self.records.clear();
            self.dirty = true;
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.records.clone())
    }

    fn out_of_range(&self, index: usize) -> ListError {
        ListError::OutOfRange {
            index,
            len: self.records.len(),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Shared handle that rows hold on to through [`IteratorContext`].
#[derive(Debug, Clone, Default)]
pub struct SharedArrayInput {
    inner: Rc<RefCell<ArrayInputState>>,
}

impl SharedArrayInput {
    pub fn new(state: ArrayInputState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, ArrayInputState> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, ArrayInputState> {
        self.inner.borrow_mut()
    }

    pub fn as_context(&self) -> Rc<dyn IteratorContext> {
        Rc::new(self.clone())
    }
}

impl IteratorContext for SharedArrayInput {
    fn source(&self) -> String {
        self.borrow().source().to_string()
    }

    fn total(&self) -> usize {
        self.borrow().len()
    }

    fn reorder(&self, from: usize, to: usize) {
        let result = self.borrow_mut().reorder(from, to);
        if let Err(err) = result {
            tracing::warn!(error = %err, from, to, "ignored reorder request");
        }
    }

    fn remove(&self, index: usize) {
        let result = self.borrow_mut().remove(index);
        if let Err(err) = result {
            tracing::warn!(error = %err, index, "ignored remove request");
        }
    }
}
