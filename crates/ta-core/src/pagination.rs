// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Result paging

use serde_json::{Map, Value};

use crate::item::{Item, PAGINATION_OPTION_KEY};
use crate::label::LabelKey;

pub const DEFAULT_PAGINATION_TEXT: &str = "Display additional results...";

/// True when more results exist than are currently shown.
pub fn should_paginate(results: &[Item], shown: usize, paginate: bool) -> bool {
    paginate && results.len() > shown
}

/// Keep at most `shown` entries.
pub fn truncate(mut results: Vec<Item>, shown: usize) -> Vec<Item> {
    results.truncate(shown);
    results
}

/// The "display additional results" entry, labelled under the string label key.
pub fn pagination_marker(label_key: &LabelKey, text: &str) -> Item {
    let mut record = Map::new();
    record.insert(PAGINATION_OPTION_KEY.to_string(), Value::Bool(true));
    record.insert(label_key.string_key().to_string(), Value::String(text.to_string()));
    Item::Record(record)
}
