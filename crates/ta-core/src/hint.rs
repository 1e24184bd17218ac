// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Ghost-text completion toward the first result

use crate::filter::match_bounds;
use crate::item::Item;
use crate::label::LabelKey;

/// Inputs the hint depends on.
#[derive(Debug, Clone, Copy)]
pub struct HintContext<'a> {
    pub text: &'a str,
    pub is_focused: bool,
    pub is_menu_shown: bool,
    pub initial_item: Option<&'a Item>,
    pub active_item: Option<&'a Item>,
    pub selected: &'a [Item],
    pub multiple: bool,
    pub label_key: &'a LabelKey,
}

/// The typed text completed with the rest of the initial item's label, or
/// an empty string when no hint applies.
///
/// Matching ignores case and diacritics, so the typed prefix is kept as
/// entered and only the remaining suffix comes from the label.
pub fn hint_text(ctx: &HintContext<'_>) -> String {
    let initial = match ctx.initial_item {
        Some(item) if !item.is_custom() => item,
        _ => return String::new(),
    };
    if ctx.text.is_empty()
        || !ctx.is_focused
        || !ctx.is_menu_shown
        || ctx.active_item.is_some()
        || (!ctx.selected.is_empty() && !ctx.multiple)
    {
        return String::new();
    }

    let label = ctx.label_key.label(initial);
    match match_bounds(&label, ctx.text) {
        Some(bounds) if bounds.start == 0 => {
            let suffix: String = label.chars().skip(bounds.end).collect();
            format!("{}{}", ctx.text, suffix)
        }
        _ => String::new(),
    }
}
