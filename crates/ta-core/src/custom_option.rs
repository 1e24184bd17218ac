// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! "Create new from current text" entries

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::controller::TypeaheadState;
use crate::item::{Item, CUSTOM_OPTION_KEY, ID_KEY};
use crate::label::LabelKey;

/// Policy deciding per refresh whether a custom entry may be offered.
pub type AllowNewFn = Arc<dyn Fn(&[Item], &TypeaheadState) -> bool + Send + Sync>;

/// Whether the user may create entries that are not among the options.
#[derive(Clone, Default)]
pub enum AllowNew {
    #[default]
    Disabled,
    /// Always allowed, except while results are loading.
    Enabled,
    Policy(AllowNewFn),
}

impl AllowNew {
    pub fn policy<F>(f: F) -> Self
    where
        F: Fn(&[Item], &TypeaheadState) -> bool + Send + Sync + 'static,
    {
        AllowNew::Policy(Arc::new(f))
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, AllowNew::Disabled)
    }

    /// Evaluate against the filtered results and current state.
    pub fn evaluate(&self, results: &[Item], state: &TypeaheadState) -> bool {
        match self {
            AllowNew::Disabled => false,
            AllowNew::Enabled => !state.is_loading,
            AllowNew::Policy(f) => f(results, state),
        }
    }
}

impl From<bool> for AllowNew {
    fn from(value: bool) -> Self {
        if value {
            AllowNew::Enabled
        } else {
            AllowNew::Disabled
        }
    }
}

impl fmt::Debug for AllowNew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowNew::Disabled => f.write_str("Disabled"),
            AllowNew::Enabled => f.write_str("Enabled"),
            AllowNew::Policy(_) => f.write_str("Policy(..)"),
        }
    }
}

/// Append a custom entry for `text` unless it is blank or already a result.
pub fn add_custom_option(mut results: Vec<Item>, text: &str, label_key: &LabelKey) -> Vec<Item> {
    if text.trim().is_empty() {
        return results;
    }
    if results.iter().any(|item| label_key.label(item) == text) {
        return results;
    }

    let mut record = Map::new();
    record.insert(CUSTOM_OPTION_KEY.to_string(), Value::Bool(true));
    record.insert(ID_KEY.to_string(), Value::String(format!("new-id-{}", Uuid::new_v4())));
    record.insert(label_key.string_key().to_string(), Value::String(text.to_string()));
    results.push(Item::Record(record));
    results
}
