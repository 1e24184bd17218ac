// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Selection state machine
//!
//! [`Typeahead`] owns the input text, the selection, the highlighted entry
//! and menu visibility. Every mutation recomputes the result list so the
//! host can read [`Typeahead::results`] and [`Typeahead::menu_state`] at any
//! time. Events the host should observe are queued and drained with
//! [`Typeahead::take_events`].

use std::sync::Arc;

use tracing::debug;

use crate::a11y::{self, A11yMessages, InputAria};
use crate::config::TypeaheadConfig;
use crate::custom_option::{add_custom_option, AllowNew};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::filter::{filter_options, FilterBy, FilterFn, FilterRequest, MatchFlags};
use crate::hint::{hint_text, HintContext};
use crate::item::Item;
use crate::keyboard::KeyEvent;
use crate::label::{LabelFn, LabelKey};
use crate::pagination::{pagination_marker, should_paginate, truncate};

const FILTER_OVERRIDE_WARNING: &str =
    "Your `filterBy` function will override the `caseSensitive` and `ignoreDiacritics` props.";
const LABEL_KEY_WARNING: &str = "`labelKey` must be a string if creating new options is allowed.";
const ONLY_RESULT_WARNING: &str = "`highlightOnlyResult` will not work with `allowNew`.";
const SINGLE_SELECT_WARNING: &str = "You are passing multiple options to the `selected` prop of \
     a Typeahead in single-select mode. The selections will be truncated to a single selection.";
const DEFAULT_INPUT_WARNING: &str =
    "`defaultInputValue` will be overridden by the value from `selected`.";

/// Snapshot of the controller state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeaheadState {
    pub active_index: Option<usize>,
    pub active_item: Option<Item>,
    pub initial_item: Option<Item>,
    pub selected: Vec<Item>,
    pub show_menu: bool,
    pub shown_results: usize,
    pub text: String,
    pub is_focused: bool,
    pub is_loading: bool,
}

/// Notifications for the host, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeaheadEvent {
    /// The selection changed through user action.
    Change(Vec<Item>),
    /// The text changed through user input.
    InputChange(String),
    /// The pagination marker was activated.
    Paginate { shown_results: usize },
    /// The menu became visible or hidden.
    MenuToggle(bool),
    Focus,
    Blur,
    /// A key press, forwarded after internal handling.
    KeyDown(KeyEvent),
}

/// The host's focusable input element.
pub trait FocusTarget: Send {
    fn focus(&mut self) {}
    fn blur(&mut self) {}
}

/// Focus target for hosts without a focusable element.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFocus;

impl FocusTarget for NoopFocus {}

/// Everything a menu renderer needs, borrowed from the controller.
#[derive(Debug, Clone, Copy)]
pub struct MenuState<'a> {
    pub results: &'a [Item],
    pub active_index: Option<usize>,
    /// The sole result is rendered highlighted and Return selects it.
    pub is_only_result: bool,
    /// Shown instead of items when `results` is empty.
    pub empty_label: &'a str,
    pub menu_id: Option<&'a str>,
    label_key: &'a LabelKey,
}

/// One rendered menu row.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemView<'a> {
    pub position: usize,
    pub item: &'a Item,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
    pub id: Option<String>,
}

impl<'a> MenuState<'a> {
    pub fn is_item_active(&self, position: usize) -> bool {
        self.is_only_result || self.active_index == Some(position)
    }

    pub fn items(&self) -> impl Iterator<Item = MenuItemView<'a>> + 'a {
        let menu = *self;
        menu.results
            .iter()
            .enumerate()
            .map(move |(position, item)| MenuItemView {
                position,
                item,
                label: menu.label_key.label(item),
                active: menu.is_item_active(position),
                disabled: item.is_disabled(),
                id: menu.menu_id.map(|id| a11y::menu_item_id(id, position)),
            })
    }
}

/// Builder for [`Typeahead`], carrying the settings that cannot be data.
pub struct TypeaheadBuilder {
    config: TypeaheadConfig,
    options: Vec<Item>,
    label_key: Option<LabelKey>,
    filter_fn: Option<FilterFn>,
    allow_new: Option<AllowNew>,
    selected: Option<Vec<Item>>,
    default_selected: Vec<Item>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    focus_target: Option<Box<dyn FocusTarget>>,
}

impl TypeaheadBuilder {
    pub fn new(config: TypeaheadConfig) -> Self {
        Self {
            config,
            options: Vec::new(),
            label_key: None,
            filter_fn: None,
            allow_new: None,
            selected: None,
            default_selected: Vec::new(),
            diagnostics: None,
            focus_target: None,
        }
    }

    pub fn options(mut self, options: Vec<Item>) -> Self {
        self.options = options;
        self
    }

    /// Derive labels with a function instead of the configured field.
    pub fn label_accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&Item) -> String + Send + Sync + 'static,
    {
        let f: LabelFn = Arc::new(f);
        self.label_key = Some(LabelKey::Accessor(f));
        self
    }

    /// Replace the default filter with a predicate.
    pub fn filter_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Item, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_fn = Some(Arc::new(f));
        self
    }

    /// Override the boolean `allow-new` setting, e.g. with a policy.
    pub fn allow_new(mut self, allow_new: AllowNew) -> Self {
        self.allow_new = Some(allow_new);
        self
    }

    /// Controlled selection; kept in sync with [`Typeahead::set_selected`].
    pub fn selected(mut self, selected: Vec<Item>) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Initial selection for an uncontrolled typeahead.
    pub fn default_selected(mut self, selected: Vec<Item>) -> Self {
        self.default_selected = selected;
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn focus_target(mut self, target: Box<dyn FocusTarget>) -> Self {
        self.focus_target = Some(target);
        self
    }

    pub fn build(self) -> Typeahead {
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingDiagnostics::default()));
        let config = self.config;
        let label_key = self
            .label_key
            .unwrap_or_else(|| LabelKey::field(config.label_key.clone()));
        let allow_new = self
            .allow_new
            .unwrap_or_else(|| AllowNew::from(config.allow_new));

        let filter_by = match self.filter_fn {
            Some(f) => {
                if config.case_sensitive || !config.ignore_diacritics {
                    diagnostics.warn(FILTER_OVERRIDE_WARNING);
                }
                FilterBy::Custom(f)
            }
            None => FilterBy::Fields(config.filter_by.clone()),
        };
        if label_key.is_accessor() && !allow_new.is_disabled() {
            diagnostics.warn(LABEL_KEY_WARNING);
        }
        if config.highlight_only_result && !allow_new.is_disabled() {
            diagnostics.warn(ONLY_RESULT_WARNING);
        }

        let mut selected = self.selected.unwrap_or(self.default_selected);
        if !config.multiple && selected.len() > 1 {
            diagnostics.warn(SINGLE_SELECT_WARNING);
            selected.truncate(1);
        }

        let text = match selected.first() {
            Some(first) if !config.multiple => {
                if !config.default_input_value.is_empty() {
                    diagnostics.warn(DEFAULT_INPUT_WARNING);
                }
                label_key.label(first)
            }
            _ => config.default_input_value.clone(),
        };

        let state = TypeaheadState {
            selected,
            text,
            show_menu: config.default_open,
            shown_results: config.max_results,
            ..TypeaheadState::default()
        };

        let mut typeahead = Typeahead {
            config,
            label_key,
            filter_by,
            allow_new,
            options: self.options,
            state,
            results: Vec::new(),
            menu_visible: false,
            events: Vec::new(),
            diagnostics,
            focus_target: self.focus_target.unwrap_or_else(|| Box::new(NoopFocus)),
        };
        typeahead.refresh();
        // Visibility at construction is the starting point, not a toggle.
        typeahead.events.clear();
        typeahead
    }
}

/// Headless typeahead controller.
pub struct Typeahead {
    pub(crate) config: TypeaheadConfig,
    pub(crate) label_key: LabelKey,
    pub(crate) filter_by: FilterBy,
    pub(crate) allow_new: AllowNew,
    pub(crate) options: Vec<Item>,
    pub(crate) state: TypeaheadState,
    pub(crate) results: Vec<Item>,
    pub(crate) menu_visible: bool,
    pub(crate) events: Vec<TypeaheadEvent>,
    pub(crate) diagnostics: Arc<dyn Diagnostics>,
    focus_target: Box<dyn FocusTarget>,
}

impl Typeahead {
    pub fn builder(config: TypeaheadConfig) -> TypeaheadBuilder {
        TypeaheadBuilder::new(config)
    }

    pub fn state(&self) -> &TypeaheadState {
        &self.state
    }

    pub fn config(&self) -> &TypeaheadConfig {
        &self.config
    }

    pub fn label_key(&self) -> &LabelKey {
        &self.label_key
    }

    pub fn options(&self) -> &[Item] {
        &self.options
    }

    /// The result list: filtered, truncated, plus custom and pagination entries.
    pub fn results(&self) -> &[Item] {
        &self.results
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn selected(&self) -> &[Item] {
        &self.state.selected
    }

    pub fn is_menu_visible(&self) -> bool {
        self.menu_visible
    }

    pub fn diagnostics(&self) -> &Arc<dyn Diagnostics> {
        &self.diagnostics
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<TypeaheadEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn label(&self, item: &Item) -> String {
        self.label_key.label(item)
    }

    pub fn menu_state(&self) -> Option<MenuState<'_>> {
        if !self.menu_visible {
            return None;
        }
        Some(MenuState {
            results: &self.results,
            active_index: self.state.active_index,
            is_only_result: self.is_only_result(),
            empty_label: &self.config.empty_label,
            menu_id: self.config.id.as_deref(),
            label_key: &self.label_key,
        })
    }

    pub fn hint_text(&self) -> String {
        hint_text(&HintContext {
            text: &self.state.text,
            is_focused: self.state.is_focused,
            is_menu_shown: self.menu_visible,
            initial_item: self.state.initial_item.as_ref(),
            active_item: self.state.active_item.as_ref(),
            selected: &self.state.selected,
            multiple: self.config.multiple,
            label_key: &self.label_key,
        })
    }

    /// Whether the single result is treated as highlighted.
    pub fn is_only_result(&self) -> bool {
        if !self.config.highlight_only_result || !self.allow_new.is_disabled() {
            return false;
        }
        match self.results.as_slice() {
            [only] => !only.is_disabled() && !only.is_pagination(),
            _ => false,
        }
    }

    pub fn input_aria(&self) -> InputAria {
        a11y::input_aria(
            self.config.id.as_deref(),
            self.config.multiple,
            self.menu_visible,
            self.state.active_index,
        )
    }

    pub fn accessibility_status(&self, messages: &A11yMessages) -> String {
        a11y::accessibility_status(
            messages,
            self.menu_visible,
            &self.results,
            &self.state.selected,
            &self.config.empty_label,
        )
    }

    /// Add a selection. Single-select replaces it and shows its label;
    /// multi-select appends it and clears the text.
    pub fn add(&mut self, item: Item) {
        if self.config.multiple {
            self.state.selected.push(item.clone());
            self.state.text.clear();
        } else {
            self.state.text = self.label_key.label(&item);
            self.state.selected = vec![item.clone()];
        }
        self.reset_transient();
        self.state.initial_item = Some(item);
        self.events.push(TypeaheadEvent::Change(self.state.selected.clone()));
        self.refresh();
    }

    /// Remove the first selection equal to `item`; absent items are ignored.
    pub fn remove(&mut self, item: &Item) {
        let Some(position) = self.state.selected.iter().position(|s| s == item) else {
            return;
        };
        self.state.selected.remove(position);
        self.focus();
        self.reset_transient();
        self.events.push(TypeaheadEvent::Change(self.state.selected.clone()));
        self.refresh();
    }

    /// Empty the selection and text and reset the menu.
    pub fn clear(&mut self) {
        let had_selection = !self.state.selected.is_empty();
        self.state.active_index = None;
        self.state.active_item = None;
        self.state.initial_item = None;
        self.state.selected.clear();
        self.state.text.clear();
        self.state.show_menu = self.config.default_open;
        self.state.shown_results = self.config.max_results;
        if had_selection {
            self.events.push(TypeaheadEvent::Change(Vec::new()));
        }
        self.refresh();
    }

    /// Text typed by the user.
    pub fn update_input_text(&mut self, text: impl Into<String>) {
        self.state.text = text.into();
        self.state.active_index = None;
        self.state.active_item = None;
        self.state.shown_results = self.config.max_results;
        self.state.show_menu = true;
        self.events.push(TypeaheadEvent::InputChange(self.state.text.clone()));

        if !self.config.multiple && !self.state.selected.is_empty() {
            self.state.selected.clear();
            self.events.push(TypeaheadEvent::Change(Vec::new()));
        }
        self.refresh();
    }

    /// Focus the input element and open the menu.
    pub fn focus(&mut self) {
        self.focus_target.focus();
        self.on_focus();
    }

    /// Blur the input element and hide the menu.
    pub fn blur(&mut self) {
        self.focus_target.blur();
        self.on_blur();
        self.hide_menu();
    }

    /// The input gained focus.
    pub fn on_focus(&mut self) {
        if !self.state.is_focused {
            self.state.is_focused = true;
            self.events.push(TypeaheadEvent::Focus);
        }
        self.state.show_menu = true;
        self.refresh();
    }

    /// The input lost focus. The menu stays open so a click on one of its
    /// items can still complete.
    pub fn on_blur(&mut self) {
        if self.state.is_focused {
            self.state.is_focused = false;
            self.events.push(TypeaheadEvent::Blur);
        }
        self.refresh();
    }

    pub fn on_click_outside(&mut self) {
        if self.state.show_menu {
            self.hide_menu();
        }
    }

    /// A menu row was clicked.
    pub fn select_result(&mut self, position: usize) {
        let Some(item) = self.results.get(position).cloned() else {
            return;
        };
        if item.is_pagination() {
            self.paginate();
        } else if !item.is_disabled() {
            self.add(item);
        }
    }

    /// Show another page of results.
    pub fn paginate(&mut self) {
        self.state.shown_results += self.config.max_results;
        debug!(shown_results = self.state.shown_results, "Paginating typeahead results");
        self.events.push(TypeaheadEvent::Paginate {
            shown_results: self.state.shown_results,
        });
        self.refresh();
    }

    pub fn show_menu(&mut self) {
        self.state.show_menu = true;
        self.refresh();
    }

    /// Hide the menu and reset highlight and pagination.
    pub fn hide_menu(&mut self) {
        self.reset_transient();
        self.refresh();
    }

    pub fn toggle_menu(&mut self) {
        if self.state.show_menu {
            self.hide_menu();
        } else {
            self.show_menu();
        }
    }

    /// Adopt a selection pushed by the host. Emits no [`TypeaheadEvent::Change`].
    pub fn set_selected(&mut self, selected: Vec<Item>) {
        if selected == self.state.selected {
            return;
        }
        let mut selected = selected;
        if !self.config.multiple {
            if selected.len() > 1 {
                self.diagnostics.warn(SINGLE_SELECT_WARNING);
            }
            selected.truncate(1);
            self.state.text = selected
                .first()
                .map(|item| self.label_key.label(item))
                .unwrap_or_default();
        }
        self.state.selected = selected;
        self.refresh();
    }

    /// Switch between single- and multi-select.
    pub fn set_multiple(&mut self, multiple: bool) {
        if self.config.multiple == multiple {
            return;
        }
        if self.config.multiple && !self.state.selected.is_empty() {
            self.state.selected.truncate(1);
            self.state.text = self.label_key.label(&self.state.selected[0]);
        } else {
            self.state.text.clear();
        }
        self.config.multiple = multiple;
        self.refresh();
    }

    pub fn set_options(&mut self, options: Vec<Item>) {
        self.options = options;
        self.refresh();
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.state.is_loading = is_loading;
        self.refresh();
    }

    pub fn set_empty_label(&mut self, label: impl Into<String>) {
        self.config.empty_label = label.into();
        self.refresh();
    }

    pub(crate) fn set_active_index(&mut self, index: Option<usize>) {
        self.state.active_index = index;
        self.state.active_item = index.and_then(|i| self.results.get(i).cloned());
    }

    fn reset_transient(&mut self) {
        self.state.active_index = None;
        self.state.active_item = None;
        self.state.show_menu = false;
        self.state.shown_results = self.config.max_results;
    }

    /// Recompute the result list and everything derived from it.
    pub(crate) fn refresh(&mut self) {
        let multiple = self.config.multiple;
        let selected = &self.state.selected;
        let request = FilterRequest {
            text: &self.state.text,
            label_key: &self.label_key,
            filter_by: &self.filter_by,
            flags: MatchFlags {
                case_sensitive: self.config.case_sensitive,
                ignore_diacritics: self.config.ignore_diacritics,
            },
            min_length: self.config.min_length,
        };
        let filtered = filter_options(
            &self.options,
            &request,
            |item| multiple && selected.contains(item),
            self.diagnostics.as_ref(),
        );

        let allow_new = self.allow_new.evaluate(&filtered, &self.state);
        let paginate = should_paginate(&filtered, self.state.shown_results, self.config.paginate);
        let mut results = truncate(filtered, self.state.shown_results);
        if allow_new {
            results = add_custom_option(results, &self.state.text, &self.label_key);
        }
        if paginate {
            results.push(pagination_marker(&self.label_key, &self.config.pagination_text));
        }
        self.results = results;

        // Keep the highlight on a selectable entry of the new list.
        let active = self.state.active_index;
        match active {
            Some(i) if self.results.get(i).is_some_and(|item| !item.is_disabled()) => {
                self.state.active_item = self.results.get(i).cloned();
            }
            _ => {
                self.state.active_index = None;
                self.state.active_item = None;
            }
        }

        let visible = self.state.show_menu
            && self.state.text.chars().count() >= self.config.min_length
            && (!self.results.is_empty() || !self.config.empty_label.is_empty());
        if visible != self.menu_visible {
            self.menu_visible = visible;
            debug!(visible, "Typeahead menu toggled");
            self.events.push(TypeaheadEvent::MenuToggle(visible));
        }

        if visible {
            if let Some(first) = self.results.first().cloned() {
                self.update_initial_item(first);
            }
        }
        if self.results.is_empty() && self.allow_new.is_disabled() {
            self.state.initial_item = None;
        }
    }

    fn update_initial_item(&mut self, candidate: Item) {
        let unchanged = match &self.state.initial_item {
            Some(current) if *current == candidate => true,
            Some(current) if candidate.is_custom() => {
                let key = self.label_key.string_key();
                current.field(key) == candidate.field(key)
            }
            _ => false,
        };
        if !unchanged {
            self.state.initial_item = Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryDiagnostics;
    use serde_json::json;

    fn states() -> Vec<Item> {
        ["Alabama", "Alaska", "Arkansas", "California", "Colorado"]
            .into_iter()
            .map(|name| Item::from_value(json!({"name": name})).unwrap())
            .collect()
    }

    fn named(name: &str) -> Item {
        Item::from_value(json!({"name": name})).unwrap()
    }

    fn config() -> TypeaheadConfig {
        TypeaheadConfig {
            label_key: "name".into(),
            ..TypeaheadConfig::default()
        }
    }

    fn typeahead(config: TypeaheadConfig) -> Typeahead {
        Typeahead::builder(config).options(states()).build()
    }

    #[test]
    fn typing_filters_and_opens_menu() {
        let mut ta = typeahead(config());
        assert!(!ta.is_menu_visible());

        ta.update_input_text("Al");
        assert_eq!(ta.results(), &[named("Alabama"), named("Alaska")]);
        assert!(ta.is_menu_visible());
        assert_eq!(ta.state().initial_item, Some(named("Alabama")));
        assert_eq!(
            ta.take_events(),
            vec![
                TypeaheadEvent::InputChange("Al".into()),
                TypeaheadEvent::MenuToggle(true)
            ]
        );
    }

    #[test]
    fn add_in_single_mode_replaces_selection_and_sets_text() {
        let mut ta = typeahead(config());
        ta.update_input_text("Ala");
        ta.add(named("Alaska"));
        assert_eq!(ta.selected(), &[named("Alaska")]);
        assert_eq!(ta.text(), "Alaska");
        assert!(!ta.state().show_menu);

        ta.add(named("Alabama"));
        assert_eq!(ta.selected(), &[named("Alabama")]);
        assert_eq!(ta.text(), "Alabama");
    }

    #[test]
    fn editing_text_clears_single_selection() {
        let mut ta = typeahead(config());
        ta.add(named("Alaska"));
        ta.take_events();

        ta.update_input_text("Alask");
        assert!(ta.selected().is_empty());
        let events = ta.take_events();
        assert_eq!(events[0], TypeaheadEvent::InputChange("Alask".into()));
        assert_eq!(events[1], TypeaheadEvent::Change(Vec::new()));
    }

    #[test]
    fn multi_select_excludes_selected_options() {
        let mut ta = typeahead(TypeaheadConfig {
            multiple: true,
            ..config()
        });
        ta.add(named("Alabama"));
        assert_eq!(ta.text(), "");
        ta.update_input_text("Al");
        assert_eq!(ta.results(), &[named("Alaska")]);
    }

    #[test]
    fn remove_ignores_absent_items() {
        let mut ta = typeahead(TypeaheadConfig {
            multiple: true,
            ..config()
        });
        ta.add(named("Alabama"));
        ta.add(named("Alaska"));
        ta.take_events();

        ta.remove(&named("Texas"));
        assert!(ta.take_events().is_empty());

        ta.remove(&named("Alabama"));
        assert_eq!(ta.selected(), &[named("Alaska")]);
        assert!(ta.take_events().contains(&TypeaheadEvent::Change(vec![named("Alaska")])));
    }

    #[test]
    fn clear_resets_everything() {
        let mut ta = typeahead(config());
        ta.add(named("Alaska"));
        ta.take_events();
        ta.clear();
        assert!(ta.selected().is_empty());
        assert_eq!(ta.text(), "");
        assert_eq!(ta.state().initial_item, None);
        assert_eq!(ta.take_events(), vec![TypeaheadEvent::Change(Vec::new())]);

        ta.clear();
        assert!(ta.take_events().is_empty());
    }

    #[test]
    fn blur_event_keeps_menu_open() {
        let mut ta = typeahead(config());
        ta.on_focus();
        assert!(ta.is_menu_visible());
        ta.on_blur();
        assert!(ta.is_menu_visible());
        ta.on_click_outside();
        assert!(!ta.is_menu_visible());
    }

    #[test]
    fn imperative_blur_hides_menu() {
        let mut ta = typeahead(config());
        ta.focus();
        ta.blur();
        assert!(!ta.state().is_focused);
        assert!(!ta.is_menu_visible());
        let events = ta.take_events();
        assert_eq!(events.first(), Some(&TypeaheadEvent::Focus));
        assert!(events.contains(&TypeaheadEvent::Blur));
    }

    #[test]
    fn min_length_suppresses_menu_without_clearing_flag() {
        let mut ta = typeahead(TypeaheadConfig {
            min_length: 2,
            ..config()
        });
        ta.update_input_text("A");
        assert!(ta.state().show_menu);
        assert!(!ta.is_menu_visible());
        assert!(ta.results().is_empty());
    }

    #[test]
    fn empty_label_keeps_menu_visible_without_results() {
        let mut ta = typeahead(config());
        ta.update_input_text("zzz");
        assert!(ta.is_menu_visible());
        assert_eq!(ta.menu_state().map(|m| m.empty_label), Some("No matches found."));

        ta.set_empty_label("");
        assert!(!ta.is_menu_visible());
    }

    #[test]
    fn controlled_selection_is_adopted_silently() {
        let mut ta = typeahead(config());
        ta.set_selected(vec![named("Colorado"), named("Alaska")]);
        assert_eq!(ta.selected(), &[named("Colorado")]);
        assert_eq!(ta.text(), "Colorado");
        assert!(ta.take_events().is_empty());
    }

    #[test]
    fn switching_to_single_keeps_first_selection() {
        let mut ta = typeahead(TypeaheadConfig {
            multiple: true,
            ..config()
        });
        ta.add(named("Alabama"));
        ta.add(named("Alaska"));
        ta.set_multiple(false);
        assert_eq!(ta.selected(), &[named("Alabama")]);
        assert_eq!(ta.text(), "Alabama");

        ta.set_multiple(true);
        assert_eq!(ta.text(), "");
    }

    #[test]
    fn construction_reports_config_conflicts() {
        let sink = Arc::new(MemoryDiagnostics::new());
        let _ta = Typeahead::builder(TypeaheadConfig {
            case_sensitive: true,
            highlight_only_result: true,
            ..config()
        })
        .filter_fn(|_, _| true)
        .label_accessor(|_| String::new())
        .allow_new(AllowNew::Enabled)
        .diagnostics(sink.clone())
        .build();

        assert_eq!(
            sink.messages(),
            vec![
                FILTER_OVERRIDE_WARNING.to_string(),
                LABEL_KEY_WARNING.to_string(),
                ONLY_RESULT_WARNING.to_string(),
            ]
        );
    }

    #[test]
    fn selected_seeds_text_over_default_input_value() {
        let sink = Arc::new(MemoryDiagnostics::new());
        let ta = Typeahead::builder(TypeaheadConfig {
            default_input_value: "Ark".into(),
            ..config()
        })
        .default_selected(vec![named("Alaska")])
        .diagnostics(sink.clone())
        .build();
        assert_eq!(ta.text(), "Alaska");
        assert_eq!(sink.messages(), vec![DEFAULT_INPUT_WARNING.to_string()]);
    }

    #[test]
    fn clicking_rows_selects_or_paginates() {
        let mut ta = typeahead(TypeaheadConfig {
            max_results: 2,
            ..config()
        });
        ta.focus();
        assert_eq!(ta.results().len(), 3);
        assert!(ta.results()[2].is_pagination());

        ta.select_result(2);
        assert_eq!(ta.state().shown_results, 4);
        assert_eq!(ta.results().len(), 5);

        ta.select_result(1);
        assert_eq!(ta.selected(), &[named("Alaska")]);
        ta.select_result(99);
        assert_eq!(ta.selected(), &[named("Alaska")]);
    }

    #[test]
    fn policy_controls_custom_option() {
        let mut ta = Typeahead::builder(config())
            .options(states())
            .allow_new(AllowNew::policy(|results, _| results.is_empty()))
            .build();
        ta.update_input_text("Al");
        assert!(!ta.results().iter().any(Item::is_custom));
        ta.update_input_text("Zed");
        assert_eq!(ta.results().len(), 1);
        assert!(ta.results()[0].is_custom());
    }

    #[test]
    fn custom_initial_item_is_stable_across_refreshes() {
        let mut ta = Typeahead::builder(config())
            .options(states())
            .allow_new(AllowNew::Enabled)
            .build();
        ta.update_input_text("Zed");
        let first = ta.state().initial_item.clone();
        ta.show_menu();
        assert_eq!(ta.state().initial_item, first);
    }

    #[test]
    fn menu_items_expose_ids_and_labels() {
        let mut ta = typeahead(TypeaheadConfig {
            id: Some("states".into()),
            ..config()
        });
        ta.update_input_text("Ark");
        let menu = ta.menu_state().unwrap();
        let rows: Vec<_> = menu.items().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Arkansas");
        assert_eq!(rows[0].id.as_deref(), Some("states-item-0"));
        assert!(!rows[0].active);
    }
}
