// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Label access for items

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::item::Item;

pub const DEFAULT_LABEL_KEY: &str = "label";

/// Function deriving a display label from an item.
pub type LabelFn = Arc<dyn Fn(&Item) -> String + Send + Sync>;

/// How the display label of an item is derived.
#[derive(Clone)]
pub enum LabelKey {
    /// Read the label from a named field.
    Field(String),
    /// Compute the label with a function.
    Accessor(LabelFn),
}

impl LabelKey {
    pub fn field(name: impl Into<String>) -> Self {
        LabelKey::Field(name.into())
    }

    pub fn accessor<F>(f: F) -> Self
    where
        F: Fn(&Item) -> String + Send + Sync + 'static,
    {
        LabelKey::Accessor(Arc::new(f))
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self, LabelKey::Accessor(_))
    }

    /// Field name used when the label has to be stored on a synthesized item.
    pub fn string_key(&self) -> &str {
        match self {
            LabelKey::Field(name) => name,
            LabelKey::Accessor(_) => DEFAULT_LABEL_KEY,
        }
    }

    /// Display label of `item`. Missing fields yield an empty label.
    pub fn label(&self, item: &Item) -> String {
        let record = match item {
            Item::Text(text) => return text.clone(),
            Item::Record(_) => item,
        };

        // Synthesized entries always carry their label under the string key.
        if record.is_custom() || record.is_pagination() {
            return field_text(record.field(self.string_key()));
        }

        match self {
            LabelKey::Field(name) => field_text(record.field(name)),
            LabelKey::Accessor(f) => f(record),
        }
    }
}

impl Default for LabelKey {
    fn default() -> Self {
        LabelKey::Field(DEFAULT_LABEL_KEY.to_string())
    }
}

impl fmt::Debug for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKey::Field(name) => f.debug_tuple("Field").field(name).finish(),
            LabelKey::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

pub(crate) fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
