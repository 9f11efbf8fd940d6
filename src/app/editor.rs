use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::Frame;
use serde_json::Value;

use crate::{
    element::ClickEvent,
    i18n::Translator,
    iterator::{FormIterator, RenderedItem, ReorderDirection, trigger_reorder},
    presentation::{self, ViewContext},
};

use super::{
    input::{KeyCommand, classify},
    options::UiOptions,
    status::StatusLine,
};

const HELP_TEXT: &str =
    "Rows only: values are not editable here • ↑/↓ focus • Ctrl+N add blank row • Ctrl+D remove • Ctrl+↑/↓ move • Ctrl+Home/End move to edge • Ctrl+S save • Ctrl+Q quit";

/// Editor state behind the terminal loop. Rows are re-rendered from the
/// list on every frame and every command.
pub(crate) struct Editor {
    iterator: FormIterator,
    translator: Box<dyn Translator>,
    options: UiOptions,
    title: String,
    status: StatusLine,
    selected: usize,
    exit_armed: bool,
    should_quit: bool,
    result: Option<Value>,
}

impl Editor {
    pub(crate) fn new(
        iterator: FormIterator,
        translator: Box<dyn Translator>,
        title: String,
        options: UiOptions,
    ) -> Self {
        Self {
            iterator,
            translator,
            options,
            title,
            status: StatusLine::new(),
            selected: 0,
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    pub(crate) fn rows(&self) -> Vec<RenderedItem> {
        self.iterator.render(self.translator.as_ref())
    }

    #[cfg(test)]
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> &str {
        self.status.message()
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }

    fn is_dirty(&self) -> bool {
        self.iterator.state().borrow().is_dirty()
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        let rows = self.rows();
        let help = self.options.show_help.then_some(HELP_TEXT);
        presentation::draw(
            frame,
            ViewContext {
                title: &self.title,
                items: &rows,
                selected: self.selected,
                status_message: self.status.message(),
                dirty: self.is_dirty(),
                help,
            },
        );
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let command = classify(&key);
        self.apply(command, key);
    }

    pub(crate) fn apply(&mut self, command: KeyCommand, key: KeyEvent) {
        if command != KeyCommand::Quit {
            self.exit_armed = false;
        }
        match command {
            KeyCommand::Save => self.save(),
            KeyCommand::Quit => self.quit(),
            KeyCommand::NextItem => self.focus(1),
            KeyCommand::PrevItem => self.focus(-1),
            KeyCommand::Add => self.add(),
            KeyCommand::Remove => self.remove_selected(key),
            KeyCommand::Move(direction) => self.move_selected(direction),
            KeyCommand::MoveToStart => self.move_selected_to_edge(true),
            KeyCommand::MoveToEnd => self.move_selected_to_edge(false),
            KeyCommand::ResetStatus => self.status.ready(),
            KeyCommand::None => {}
        }
    }

    fn focus(&mut self, delta: i32) {
        let len = self.iterator.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = (self.selected as i64 + i64::from(delta)).clamp(0, len as i64 - 1);
        self.selected = next as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.iterator.len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn add(&mut self) {
        match self.iterator.add() {
            Some(index) => {
                self.selected = index;
                let label = self.label_at(index).unwrap_or_default();
                self.status.added(&label);
            }
            None => self.status.set_raw("Adding entries is disabled"),
        }
    }

    fn remove_selected(&mut self, key: KeyEvent) {
        let rows = self.rows();
        let Some(row) = rows.get(self.selected) else {
            self.status.set_raw("No entry to remove");
            return;
        };
        if row.click_remove(&ClickEvent::from_key(key)) {
            self.status.removed(&row.label);
            self.clamp_selection();
        } else {
            self.status
                .set_raw(format!("Entry #{} cannot be removed", row.label));
        }
    }

    fn move_selected(&mut self, direction: ReorderDirection) {
        let rows = self.rows();
        let Some(row) = rows.get(self.selected) else {
            return;
        };
        let Some(control) = row.reorder_buttons.as_ref() else {
            self.status.set_raw("Reordering is disabled");
            return;
        };
        if !trigger_reorder(control, direction) {
            self.status.set_raw("Cannot move entry further");
            return;
        }
        match direction {
            ReorderDirection::Up => self.selected -= 1,
            ReorderDirection::Down => self.selected += 1,
        }
        self.announce_move();
    }

    fn move_selected_to_edge(&mut self, to_start: bool) {
        let rows = self.rows();
        let Some(row) = rows.get(self.selected) else {
            return;
        };
        if !row.can_reorder() {
            self.status.set_raw("Reordering is disabled");
            return;
        }
        let context = &row.context;
        let target = if to_start {
            0
        } else {
            context.total().saturating_sub(1)
        };
        if target == context.index() {
            self.status.set_raw("Cannot move entry further");
            return;
        }
        context.reorder(target);
        self.selected = target;
        self.announce_move();
    }

    fn announce_move(&mut self) {
        let label = self.label_at(self.selected).unwrap_or_default();
        self.status.moved(&label);
    }

    fn label_at(&self, index: usize) -> Option<String> {
        self.iterator.item_props(index).map(|props| props.item_label())
    }

    fn save(&mut self) {
        let value = {
            let mut state = self.iterator.state().borrow_mut();
            state.mark_clean();
            state.to_value()
        };
        let count = value.as_array().map(Vec::len).unwrap_or(0);
        tracing::info!(entries = count, "saved array input");
        self.status.set_raw(format!("Saved {count} entries"));
        self.result = Some(value);
        self.should_quit = true;
    }

    fn quit(&mut self) {
        if self.options.confirm_exit && self.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
        self.result = None;
    }
}
