// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Conversions from crossterm key events

use crossterm::event::{KeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers};

use crate::keyboard::{Key, KeyEvent, Modifiers};

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Enter => Key::Return,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut out = Modifiers::empty();
        out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
        out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
        out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
        out.set(
            Modifiers::META,
            mods.intersects(KeyModifiers::META | KeyModifiers::SUPER),
        );
        out
    }
}

/// Convert a terminal key press; releases and repeats-as-release are dropped.
///
/// Terminals do not report a caret, so pass the host's caret position.
pub fn key_event(event: &CtKeyEvent, caret: Option<usize>) -> Option<KeyEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let mut modifiers = Modifiers::from(event.modifiers);
    if event.code == KeyCode::BackTab {
        modifiers |= Modifiers::SHIFT;
    }
    Some(KeyEvent {
        key: Key::from(event.code),
        modifiers,
        caret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(Key::from(KeyCode::Esc), Key::Escape);
        assert_eq!(Key::from(KeyCode::Enter), Key::Return);
        assert_eq!(Key::from(KeyCode::F(1)), Key::Other);
    }

    #[test]
    fn back_tab_is_shift_tab() {
        let event = CtKeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
        let converted = key_event(&event, None).unwrap();
        assert_eq!(converted.key, Key::Tab);
        assert!(converted.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn releases_are_ignored() {
        let mut event = CtKeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(key_event(&event, None), None);
    }
}
