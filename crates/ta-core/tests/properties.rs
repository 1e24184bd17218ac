// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use proptest::prelude::*;
use serde_json::json;
use ta_core::filter::{filter_options, FilterBy, FilterRequest, MatchFlags};
use ta_core::hint::{hint_text, HintContext};
use ta_core::pagination::truncate;
use ta_core::{Item, Key, LabelKey, MemoryDiagnostics, Typeahead, TypeaheadConfig};

const NAMES: [&str; 6] = ["Alabama", "Alaska", "Arizona", "Arkansas", "Colorado", "Oregon"];

fn options() -> Vec<Item> {
    NAMES.iter().map(|name| Item::text(*name)).collect()
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NAMES.len()).prop_map(Op::Add),
        (0..NAMES.len()).prop_map(Op::Remove),
    ]
}

#[derive(Debug, Clone)]
enum MenuOp {
    Type(String),
    Paginate,
    Hide,
    Focus,
}

fn menu_op() -> impl Strategy<Value = MenuOp> {
    prop_oneof![
        "[a-c]{0,2}".prop_map(MenuOp::Type),
        Just(MenuOp::Paginate),
        Just(MenuOp::Hide),
        Just(MenuOp::Focus),
    ]
}

proptest! {
    #[test]
    fn single_select_holds_at_most_one(adds in proptest::collection::vec(0..NAMES.len(), 0..12)) {
        let mut ta = Typeahead::builder(TypeaheadConfig::default()).options(options()).build();
        for index in adds {
            ta.add(Item::text(NAMES[index]));
            prop_assert!(ta.selected().len() <= 1);
            let expected = ta.selected().first().map(|item| ta.label(item)).unwrap_or_default();
            prop_assert_eq!(ta.text(), expected.as_str());
        }
    }

    #[test]
    fn multi_select_tracks_adds_minus_removes(ops in proptest::collection::vec(op(), 0..20)) {
        let mut ta = Typeahead::builder(TypeaheadConfig {
            multiple: true,
            ..TypeaheadConfig::default()
        })
        .options(options())
        .build();
        let mut model: Vec<Item> = Vec::new();

        for op in ops {
            match op {
                Op::Add(index) => {
                    let item = Item::text(NAMES[index]);
                    model.push(item.clone());
                    ta.add(item);
                }
                Op::Remove(index) => {
                    let item = Item::text(NAMES[index]);
                    if let Some(position) = model.iter().position(|m| *m == item) {
                        model.remove(position);
                    }
                    ta.remove(&item);
                }
            }
            prop_assert_eq!(ta.selected(), model.as_slice());
        }
    }

    #[test]
    fn filtering_is_pure(
        labels in proptest::collection::vec("[a-zA-Zé ]{0,8}", 0..10),
        query in "[a-zA-Z]{0,3}",
        case_sensitive in proptest::bool::ANY,
    ) {
        let options: Vec<Item> = labels.iter().map(|l| Item::text(l.clone())).collect();
        let before = options.clone();
        let label_key = LabelKey::default();
        let filter_by = FilterBy::default();
        let request = FilterRequest {
            text: &query,
            label_key: &label_key,
            filter_by: &filter_by,
            flags: MatchFlags { case_sensitive, ignore_diacritics: true },
            min_length: 0,
        };
        let sink = MemoryDiagnostics::new();

        let first = filter_options(&options, &request, |_| false, &sink);
        let second = filter_options(&options, &request, |_| false, &sink);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&options, &before);
        // Stable: results appear in input order.
        let positions: Vec<usize> = first
            .iter()
            .filter_map(|item| options.iter().position(|o| o == item))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn truncate_never_exceeds_limit(len in 0usize..50, limit in 0usize..50) {
        let items: Vec<Item> = (0..len).map(|i| Item::text(i.to_string())).collect();
        prop_assert!(truncate(items, limit).len() <= limit);
    }

    #[test]
    fn shown_results_only_shrink_on_text_change_or_hide(ops in proptest::collection::vec(menu_op(), 0..20)) {
        let options: Vec<Item> = (0..40).map(|i| Item::text(format!("abc {i}"))).collect();
        let mut ta = Typeahead::builder(TypeaheadConfig {
            max_results: 3,
            ..TypeaheadConfig::default()
        })
        .options(options)
        .build();

        for op in ops {
            let before = ta.state().shown_results;
            let may_shrink = matches!(op, MenuOp::Type(_) | MenuOp::Hide);
            match op {
                MenuOp::Type(text) => ta.update_input_text(text),
                MenuOp::Paginate => ta.paginate(),
                MenuOp::Hide => ta.hide_menu(),
                MenuOp::Focus => ta.focus(),
            }
            if !may_shrink {
                prop_assert!(ta.state().shown_results >= before);
            }
            prop_assert!(ta.state().shown_results >= 3);
        }
    }

    #[test]
    fn active_index_stays_in_bounds_and_enabled(
        disabled in proptest::collection::vec(proptest::bool::ANY, 0..8),
        keys in proptest::collection::vec(proptest::bool::ANY, 0..30),
    ) {
        let options: Vec<Item> = disabled
            .iter()
            .enumerate()
            .map(|(i, d)| Item::from_value(json!({"label": format!("item {i}"), "disabled": d})).unwrap())
            .collect();
        let mut ta = Typeahead::builder(TypeaheadConfig::default()).options(options).build();
        ta.focus();

        for down in keys {
            ta.handle_key_down(if down { Key::Down } else { Key::Up });
            let state = ta.state();
            prop_assert_eq!(state.active_index.is_none(), state.active_item.is_none());
            if let Some(index) = state.active_index {
                prop_assert!(index < ta.results().len());
                prop_assert!(!ta.results()[index].is_disabled());
            }
        }
    }

    #[test]
    fn hint_completes_only_matching_prefixes(label in "[a-zA-Z]{1,8}", text in "[a-zA-Z]{0,4}") {
        let key = LabelKey::default();
        let item = Item::text(label.clone());
        let hint = hint_text(&HintContext {
            text: &text,
            is_focused: true,
            is_menu_shown: true,
            initial_item: Some(&item),
            active_item: None,
            selected: &[],
            multiple: false,
            label_key: &key,
        });

        if !text.is_empty() && label.to_lowercase().starts_with(&text.to_lowercase()) {
            prop_assert_eq!(hint, format!("{}{}", text, &label[text.len()..]));
        } else {
            prop_assert_eq!(hint, "");
        }
    }
}
