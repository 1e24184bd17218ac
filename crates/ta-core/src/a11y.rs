// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Accessibility attributes and status messages

use crate::item::Item;

/// Id of the menu row at `position` for a menu with id `menu_id`.
pub fn menu_item_id(menu_id: &str, position: usize) -> String {
    format!("{menu_id}-item-{position}")
}

/// Combobox attributes for the text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAria {
    /// `combobox` in single-select mode, absent otherwise
    pub role: Option<&'static str>,
    pub autocomplete: &'static str,
    /// Reported in single-select mode only
    pub expanded: Option<bool>,
    pub haspopup: &'static str,
    pub owns: Option<String>,
    pub active_descendant: Option<String>,
}

impl InputAria {
    /// Present attributes as `(name, value)` pairs.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::with_capacity(6);
        if let Some(role) = self.role {
            attrs.push(("role", role.to_string()));
        }
        attrs.push(("aria-autocomplete", self.autocomplete.to_string()));
        if let Some(expanded) = self.expanded {
            attrs.push(("aria-expanded", expanded.to_string()));
        }
        attrs.push(("aria-haspopup", self.haspopup.to_string()));
        if let Some(owns) = &self.owns {
            attrs.push(("aria-owns", owns.clone()));
        }
        if let Some(active) = &self.active_descendant {
            attrs.push(("aria-activedescendant", active.clone()));
        }
        attrs
    }
}

pub(crate) fn input_aria(
    menu_id: Option<&str>,
    multiple: bool,
    menu_visible: bool,
    active_index: Option<usize>,
) -> InputAria {
    let owns = menu_id.filter(|_| menu_visible).map(str::to_string);
    let active_descendant = match (menu_id, active_index) {
        (Some(id), Some(index)) if menu_visible => Some(menu_item_id(id, index)),
        _ => None,
    };
    InputAria {
        role: (!multiple).then_some("combobox"),
        autocomplete: if multiple { "list" } else { "both" },
        expanded: (!multiple).then_some(menu_visible),
        haspopup: "listbox",
        owns,
        active_descendant,
    }
}

/// Screen-reader message builders.
pub struct A11yMessages {
    pub num_results: Box<dyn Fn(&[Item]) -> String + Send + Sync>,
    pub num_selected: Box<dyn Fn(&[Item]) -> String + Send + Sync>,
}

impl Default for A11yMessages {
    fn default() -> Self {
        Self {
            num_results: Box::new(|results| {
                format!(
                    "{}. Use up and down arrow keys to navigate.",
                    pluralize("result", results.len())
                )
            }),
            num_selected: Box::new(|selected| format!("{}.", pluralize("selection", selected.len()))),
        }
    }
}

fn pluralize(noun: &str, count: usize) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub(crate) fn accessibility_status(
    messages: &A11yMessages,
    menu_visible: bool,
    results: &[Item],
    selected: &[Item],
    empty_label: &str,
) -> String {
    if !menu_visible {
        return (messages.num_selected)(selected);
    }
    if results.is_empty() {
        return empty_label.to_string();
    }
    (messages.num_results)(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_select_input_is_a_combobox() {
        let aria = input_aria(Some("id"), false, false, None);
        assert_eq!(aria.role, Some("combobox"));
        assert_eq!(aria.autocomplete, "both");
        assert_eq!(aria.expanded, Some(false));
        assert_eq!(aria.owns, None);

        let aria = input_aria(Some("id"), false, true, Some(0));
        assert_eq!(aria.expanded, Some(true));
        assert_eq!(aria.owns.as_deref(), Some("id"));
        assert_eq!(aria.active_descendant.as_deref(), Some("id-item-0"));
    }

    #[test]
    fn multi_select_input_is_a_list() {
        let aria = input_aria(Some("id"), true, true, None);
        assert_eq!(aria.role, None);
        assert_eq!(aria.autocomplete, "list");
        assert_eq!(aria.expanded, None);
        assert!(!aria.attributes().iter().any(|(name, _)| *name == "role"));
    }

    #[test]
    fn status_depends_on_menu_and_results() {
        let messages = A11yMessages::default();
        let one = [Item::text("a")];
        assert_eq!(
            accessibility_status(&messages, false, &[], &one, "none"),
            "1 selection."
        );
        assert_eq!(accessibility_status(&messages, true, &[], &one, "none"), "none");
        assert_eq!(
            accessibility_status(&messages, true, &one, &[], "none"),
            "1 result. Use up and down arrow keys to navigate."
        );
    }
}
