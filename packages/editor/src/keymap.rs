//! Keyboard shortcuts.

use crate::session::Command;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Delete,
}

/// A key press with normalized modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStroke {
    pub key: Key,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyStroke {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            shift: false,
        }
    }

    pub fn ctrl_shift(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            shift: true,
        }
    }
}

/// Map a key stroke to its editor command.
///
/// Paste is not mapped here: it needs clipboard text, which the host
/// supplies through [`Command::Paste`].
pub fn command_for(stroke: KeyStroke) -> Option<Command> {
    match stroke.key {
        Key::Delete if !stroke.ctrl => Some(Command::DeleteSelected),
        Key::Char(c) if stroke.ctrl => match (c.to_ascii_lowercase(), stroke.shift) {
            ('z', false) => Some(Command::Undo),
            ('z', true) | ('y', _) => Some(Command::Redo),
            ('a', false) => Some(Command::SelectAll),
            ('c', false) => Some(Command::Copy),
            _ => None,
        },
        _ => None,
    }
}

/// Whether the stroke asks for a paste (Ctrl+V)
pub fn is_paste(stroke: KeyStroke) -> bool {
    match stroke.key {
        Key::Char(c) => stroke.ctrl && !stroke.shift && c.eq_ignore_ascii_case(&'v'),
        Key::Delete => false,
    }
}
