//! Logical input events consumed by the editing core.
//!
//! Terminal decoding happens outside this workspace; whatever front end reads
//! raw bytes hands over already-decoded [`KeyEvent`]s.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Top-level event consumed by a front-end loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// Periodic tick used to expire status messages without polling.
    Tick,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Normalized logical keys. Printable input, including a literal tab typed
/// into the buffer, arrives as [`KeyCode::Char`] or [`KeyCode::Tab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("M-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized key `{0}`")]
pub struct KeyParseError(pub String);

/// Inverse of the `Display` notation: optional `C-`, `M-`, `S-` prefixes then
/// a single char or a key name (`Enter`, `PageDown`, ...). `Space` is accepted
/// for a literal space.
impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mods = KeyModifiers::empty();
        let mut rest = s;
        loop {
            let (flag, tail) = match rest.split_at_checked(2) {
                Some(("C-", tail)) if !tail.is_empty() => (KeyModifiers::CTRL, tail),
                Some(("M-", tail)) if !tail.is_empty() => (KeyModifiers::ALT, tail),
                Some(("S-", tail)) if !tail.is_empty() => (KeyModifiers::SHIFT, tail),
                _ => break,
            };
            mods |= flag;
            rest = tail;
        }
        let code = match rest {
            "Enter" => KeyCode::Enter,
            "Esc" => KeyCode::Esc,
            "Backspace" => KeyCode::Backspace,
            "Tab" => KeyCode::Tab,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Delete" => KeyCode::Delete,
            "Space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(KeyParseError(s.to_string())),
                }
            }
        };
        Ok(KeyEvent::new(code, mods))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        assert_eq!(KeyEvent::ctrl('z').to_string(), "C-z");
        assert_eq!(KeyEvent::plain(KeyCode::PageDown).to_string(), "PageDown");
        let k = KeyEvent::new(KeyCode::Right, KeyModifiers::CTRL | KeyModifiers::SHIFT);
        assert_eq!(k.to_string(), "C-S-Right");
    }

    #[test]
    fn constructors_set_modifiers() {
        assert!(KeyEvent::plain(KeyCode::Enter).mods.is_empty());
        assert_eq!(KeyEvent::shift(KeyCode::Left).mods, KeyModifiers::SHIFT);
    }

    #[test]
    fn key_notation_parses_back() {
        for text in ["C-z", "PageDown", "C-S-Right", "M-Left", "x", "-", "C--"] {
            let key: KeyEvent = text.parse().unwrap();
            assert_eq!(key.to_string(), text);
        }
        assert_eq!("Space".parse::<KeyEvent>().unwrap(), KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(
            "C-Bogus".parse::<KeyEvent>(),
            Err(KeyParseError("C-Bogus".into()))
        );
    }
}
