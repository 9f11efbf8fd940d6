use crate::element::{Element, keys};

pub const REMOVE_BUTTON: &str = "RemoveItemButton";
pub const REORDER_BUTTONS: &str = "ReOrderButtons";

pub const REMOVE_CLASS: &str = "button-remove";
pub const REORDER_CLASS: &str = "button-reorder";

pub fn remove_button() -> Element {
    Element::new(REMOVE_BUTTON).with_label("Remove")
}

pub fn reorder_buttons() -> Element {
    Element::new(REORDER_BUTTONS).with_label("Move")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    Up,
    Down,
}

/// Moves the owning row one step using the props a row stamped on its
/// reorder control. Returns `false` at either end of the list or when the
/// control was never bound to a row.
pub fn trigger_reorder(control: &Element, direction: ReorderDirection) -> bool {
    let (Some(index), Some(max), Some(reorder)) = (
        control.int_prop(keys::INDEX),
        control.int_prop(keys::MAX),
        control.reorder_handler(),
    ) else {
        return false;
    };
    let target = match direction {
        ReorderDirection::Up => index - 1,
        ReorderDirection::Down => index + 1,
    };
    if target < 0 || target >= max {
        return false;
    }
    match (usize::try_from(index), usize::try_from(target)) {
        (Ok(from), Ok(to)) => {
            reorder(from, to);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::element::{PropPatch, PropValue};

    fn bound_control(index: usize, max: usize, log: Rc<RefCell<Vec<(usize, usize)>>>) -> Element {
        let mut patch = PropPatch::new();
        patch
            .set(keys::INDEX, index)
            .set(keys::MAX, max)
            .set(
                keys::REORDER,
                PropValue::reorder(move |from, to| log.borrow_mut().push((from, to))),
            );
        reorder_buttons().clone_with(&patch)
    }

    #[test]
    fn moves_within_bounds_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = bound_control(0, 3, Rc::clone(&log));
        assert!(!trigger_reorder(&first, ReorderDirection::Up));
        assert!(trigger_reorder(&first, ReorderDirection::Down));

        let last = bound_control(2, 3, Rc::clone(&log));
        assert!(!trigger_reorder(&last, ReorderDirection::Down));
        assert!(trigger_reorder(&last, ReorderDirection::Up));

        assert_eq!(*log.borrow(), [(0, 1), (2, 1)]);
    }

    #[test]
    fn unbound_control_does_nothing() {
        assert!(!trigger_reorder(&reorder_buttons(), ReorderDirection::Down));
    }
}
