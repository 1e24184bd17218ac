// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Keyboard interaction
//!
//! Key events are interpreted against the controller state: arrows move the
//! highlight, Escape closes the menu, and Tab, Return and Right accept the
//! highlighted or hinted item.

use crate::controller::{Typeahead, TypeaheadEvent};
use crate::item::Item;

/// Keys the controller reacts to. Anything else is forwarded untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Tab,
    Return,
    Backspace,
    Char(char),
    Other,
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Caret position in chars; `None` means the caret is at the end.
    pub caret: Option<usize>,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            caret: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = Some(caret);
        self
    }

    fn caret_at_end(&self, text: &str) -> bool {
        self.caret.map_or(true, |caret| caret >= text.chars().count())
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        KeyEvent::new(key)
    }
}

/// What the host should do with the native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// Suppress the default action (caret movement, focus change, form submit).
    pub prevent_default: bool,
}

impl KeyOutcome {
    const PREVENT: Self = Self {
        prevent_default: true,
    };
    const PASS: Self = Self {
        prevent_default: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Step the highlight through `{none, 0..len}`, wrapping at both ends and
/// passing over disabled entries.
pub fn next_active_index(
    current: Option<usize>,
    direction: Direction,
    results: &[Item],
) -> Option<usize> {
    let len = results.len();
    let mut index = current;
    // `None` is always a valid stop, so at most len + 1 steps are needed.
    for _ in 0..=len {
        index = match (index, direction) {
            (None, Direction::Down) if len > 0 => Some(0),
            (None, Direction::Up) if len > 0 => Some(len - 1),
            (None, _) => None,
            (Some(i), Direction::Down) if i + 1 < len => Some(i + 1),
            (Some(_), Direction::Down) => None,
            (Some(0), Direction::Up) => None,
            (Some(i), Direction::Up) => Some(i - 1),
        };
        match index {
            Some(i) if results.get(i).is_some_and(Item::is_disabled) => continue,
            _ => return index,
        }
    }
    None
}

impl Typeahead {
    /// Interpret a key press. The event is always queued as
    /// [`TypeaheadEvent::KeyDown`] afterwards, focused or not.
    pub fn handle_key_down(&mut self, event: impl Into<KeyEvent>) -> KeyOutcome {
        let event = event.into();
        let outcome = if self.state.is_focused {
            self.dispatch_key(&event)
        } else {
            KeyOutcome::PASS
        };
        self.events.push(TypeaheadEvent::KeyDown(event));
        outcome
    }

    fn dispatch_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        match event.key {
            Key::Up | Key::Down => {
                if !self.state.show_menu {
                    self.show_menu();
                    return KeyOutcome::PREVENT;
                }
                let direction = if event.key == Key::Up {
                    Direction::Up
                } else {
                    Direction::Down
                };
                let index = next_active_index(self.state.active_index, direction, &self.results);
                self.set_active_index(index);
                KeyOutcome::PREVENT
            }
            Key::Escape => {
                self.hide_menu();
                KeyOutcome::PREVENT
            }
            Key::Tab => {
                if event.caret_at_end(&self.state.text) && self.accept_completion() {
                    KeyOutcome::PREVENT
                } else {
                    self.hide_menu();
                    KeyOutcome::PASS
                }
            }
            Key::Right => {
                if event.caret_at_end(&self.state.text) && self.accept_completion() {
                    KeyOutcome::PREVENT
                } else {
                    KeyOutcome::PASS
                }
            }
            Key::Return => {
                if self.accept_on_return() {
                    KeyOutcome::PREVENT
                } else {
                    KeyOutcome {
                        prevent_default: !self.config.submit_form_on_enter,
                    }
                }
            }
            _ => KeyOutcome::PASS,
        }
    }

    /// Accept the hinted or highlighted item. Returns whether anything was added.
    fn accept_completion(&mut self) -> bool {
        if !self.state.selected.is_empty() && !self.config.multiple {
            return false;
        }
        let candidate = if !self.hint_text().is_empty() {
            self.state.initial_item.clone()
        } else {
            self.state.active_item.clone()
        };
        match candidate {
            Some(item) if item.is_pagination() => {
                self.paginate();
                true
            }
            Some(item) => {
                self.add(item);
                true
            }
            None => false,
        }
    }

    fn accept_on_return(&mut self) -> bool {
        if !self.menu_visible {
            return false;
        }
        if let Some(active) = self.state.active_item.clone() {
            if active.is_pagination() {
                self.paginate();
            } else {
                self.add(active);
            }
            return true;
        }
        if self.is_only_result() {
            if let Some(only) = self.results.first().cloned() {
                self.add(only);
                return true;
            }
        }
        if self.config.select_hint_on_enter && !self.hint_text().is_empty() {
            if let Some(initial) = self.state.initial_item.clone() {
                self.add(initial);
                return true;
            }
        }
        false
    }
}
