use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::iterator::ReorderDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Save,
    Quit,
    NextItem,
    PrevItem,
    Add,
    Remove,
    Move(ReorderDirection),
    MoveToStart,
    MoveToEnd,
    ResetStatus,
    None,
}

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Save,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('n') | KeyCode::Char('N') => KeyCommand::Add,
            KeyCode::Char('d') | KeyCode::Char('D') => KeyCommand::Remove,
            KeyCode::Up => KeyCommand::Move(ReorderDirection::Up),
            KeyCode::Down => KeyCommand::Move(ReorderDirection::Down),
            KeyCode::Home => KeyCommand::MoveToStart,
            KeyCode::End => KeyCommand::MoveToEnd,
            _ => KeyCommand::None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => KeyCommand::NextItem,
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => KeyCommand::PrevItem,
        KeyCode::Delete => KeyCommand::Remove,
        KeyCode::Esc => KeyCommand::ResetStatus,
        _ => KeyCommand::None,
    }
}
