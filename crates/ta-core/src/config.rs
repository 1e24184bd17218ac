// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Static typeahead configuration
//!
//! Everything that can be expressed as data lives here and can be loaded from
//! TOML. Function-valued settings (label accessors, filter predicates and
//! allow-new policies) are supplied through [`crate::TypeaheadBuilder`].

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::label::DEFAULT_LABEL_KEY;
use crate::pagination::DEFAULT_PAGINATION_TEXT;

pub const DEFAULT_MAX_RESULTS: usize = 100;
pub const DEFAULT_EMPTY_LABEL: &str = "No matches found.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TypeaheadConfig {
    /// Base for menu and item ids in accessibility attributes
    pub id: Option<String>,
    /// Field holding each option's display label
    pub label_key: String,
    /// Extra fields searched by the default filter
    pub filter_by: Vec<String>,
    pub multiple: bool,
    pub allow_new: bool,
    pub case_sensitive: bool,
    pub ignore_diacritics: bool,
    /// Minimum number of characters before results are offered
    pub min_length: usize,
    /// Page size
    pub max_results: usize,
    pub paginate: bool,
    pub highlight_only_result: bool,
    pub select_hint_on_enter: bool,
    pub submit_form_on_enter: bool,
    pub default_open: bool,
    pub default_input_value: String,
    /// Shown when the menu is open but nothing matches; empty hides the menu instead
    pub empty_label: String,
    pub pagination_text: String,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            id: None,
            label_key: DEFAULT_LABEL_KEY.to_string(),
            filter_by: Vec::new(),
            multiple: false,
            allow_new: false,
            case_sensitive: false,
            ignore_diacritics: true,
            min_length: 0,
            max_results: DEFAULT_MAX_RESULTS,
            paginate: true,
            highlight_only_result: false,
            select_hint_on_enter: false,
            submit_form_on_enter: false,
            default_open: false,
            default_input_value: String::new(),
            empty_label: DEFAULT_EMPTY_LABEL.to_string(),
            pagination_text: DEFAULT_PAGINATION_TEXT.to_string(),
        }
    }
}

impl TypeaheadConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }
        if self.label_key.is_empty() {
            return Err(ConfigError::Validation("label-key must not be empty".into()));
        }
        Ok(())
    }
}
