// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Selectable items
//!
//! An [`Item`] is either a plain string or a JSON object of named fields.
//! Equality is deep value equality, so two records with the same fields are
//! the same item even when they were built independently.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field marking a synthesized "create new from current text" entry.
pub const CUSTOM_OPTION_KEY: &str = "customOption";
/// Field marking the "display additional results" entry.
pub const PAGINATION_OPTION_KEY: &str = "paginationOption";
/// Field marking an entry that can be filtered but never selected.
pub const DISABLED_KEY: &str = "disabled";
/// Field holding the generated identifier of a custom option.
pub const ID_KEY: &str = "id";

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Text(String),
    Record(Map<String, Value>),
}

impl Item {
    pub fn text(value: impl Into<String>) -> Self {
        Item::Text(value.into())
    }

    /// Build an item from a JSON value.
    ///
    /// Strings become [`Item::Text`], objects become [`Item::Record`]; any
    /// other value is not a valid option.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Item::Text(s)),
            Value::Object(map) => Some(Item::Record(map)),
            _ => None,
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Item::Text(_) => None,
            Item::Record(map) => map.get(key),
        }
    }

    fn flag(&self, key: &str) -> bool {
        matches!(self.field(key), Some(Value::Bool(true)))
    }

    pub fn is_custom(&self) -> bool {
        self.flag(CUSTOM_OPTION_KEY)
    }

    pub fn is_pagination(&self) -> bool {
        self.flag(PAGINATION_OPTION_KEY)
    }

    pub fn is_disabled(&self) -> bool {
        self.flag(DISABLED_KEY)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::Text(value.to_string())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::Text(value)
    }
}

impl From<Map<String, Value>> for Item {
    fn from(value: Map<String, Value>) -> Self {
        Item::Record(value)
    }
}
