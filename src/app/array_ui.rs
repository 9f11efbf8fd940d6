use anyhow::{Result, anyhow};
use crossterm::event::{self, Event};
use serde_json::Value;

use crate::{
    i18n::{IdentityTranslator, Translator, humanize},
    iterator::FormIterator,
};

use super::{editor::Editor, options::UiOptions, terminal::TerminalGuard};

/// Interactive terminal editor for one array field.
pub struct ArrayInputUI {
    iterator: FormIterator,
    translator: Box<dyn Translator>,
    title: Option<String>,
    options: UiOptions,
}

impl ArrayInputUI {
    pub fn new(iterator: FormIterator) -> Self {
        Self {
            iterator,
            translator: Box::new(IdentityTranslator),
            title: None,
            options: UiOptions::default(),
        }
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs until the user saves (returns the edited array) or quits.
    pub fn run(self) -> Result<Value> {
        let ArrayInputUI {
            iterator,
            translator,
            title,
            options,
        } = self;
        let title = title.unwrap_or_else(|| {
            let source = iterator.state().borrow().source().to_string();
            if source.is_empty() {
                "Items".to_string()
            } else {
                humanize(&source)
            }
        });

        let mut editor = Editor::new(iterator, translator, title, options);
        let mut terminal = TerminalGuard::enter()?;
        while !editor.should_quit() {
            terminal.draw(|frame| editor.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                editor.handle_key(key);
            }
        }
        drop(terminal);

        editor
            .take_result()
            .ok_or_else(|| anyhow!("user exited without saving"))
    }
}
