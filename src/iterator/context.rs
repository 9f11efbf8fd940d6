use std::{fmt, rc::Rc};

/// Operations a row may request from the list that owns it.
pub trait IteratorContext {
    /// Path of the array field itself, e.g. `items`.
    fn source(&self) -> String;
    fn total(&self) -> usize;
    fn reorder(&self, from: usize, to: usize);
    fn remove(&self, index: usize);
}

/// Per-row handle published to everything rendered inside a row.
///
/// The callbacks capture the row's own index, so a descendant can move or
/// drop its row without knowing where the row sits.
#[derive(Clone)]
pub struct ItemContext {
    index: usize,
    total: usize,
    reorder: Rc<dyn Fn(usize)>,
    remove: Rc<dyn Fn()>,
}

impl ItemContext {
    pub fn new(parent: Rc<dyn IteratorContext>, index: usize) -> Self {
        let total = parent.total();
        let reorder_parent = Rc::clone(&parent);
        Self {
            index,
            total,
            reorder: Rc::new(move |new_index| reorder_parent.reorder(index, new_index)),
            remove: Rc::new(move || parent.remove(index)),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn reorder(&self, new_index: usize) {
        (self.reorder)(new_index)
    }

    pub fn remove(&self) {
        (self.remove)()
    }
}

impl fmt::Debug for ItemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemContext")
            .field("index", &self.index)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
