// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Option filtering engine
//!
//! The default rule is a substring test against the label and any extra
//! fields, optionally case-sensitive and optionally diacritic-insensitive.
//! A custom predicate replaces the rule entirely.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::diagnostics::Diagnostics;
use crate::item::Item;
use crate::label::LabelKey;

pub(crate) const NON_STRING_FIELD_WARNING: &str = "Fields passed to `filterBy` should have string \
     values. Value will be converted to a string; results may be unexpected.";

/// Custom filter predicate, called with the candidate and the query text.
pub type FilterFn = Arc<dyn Fn(&Item, &str) -> bool + Send + Sync>;

/// Which filtering rule to apply.
#[derive(Clone)]
pub enum FilterBy {
    /// Default rule over the label plus the named fields.
    Fields(Vec<String>),
    /// Caller predicate; case and diacritic flags are ignored.
    Custom(FilterFn),
}

impl FilterBy {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Item, &str) -> bool + Send + Sync + 'static,
    {
        FilterBy::Custom(Arc::new(f))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, FilterBy::Custom(_))
    }
}

impl Default for FilterBy {
    fn default() -> Self {
        FilterBy::Fields(Vec::new())
    }
}

impl fmt::Debug for FilterBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterBy::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            FilterBy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Comparison flags for the default rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFlags {
    pub case_sensitive: bool,
    pub ignore_diacritics: bool,
}

impl Default for MatchFlags {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            ignore_diacritics: true,
        }
    }
}

/// Everything the engine needs besides the candidates themselves.
#[derive(Debug, Clone, Copy)]
pub struct FilterRequest<'a> {
    pub text: &'a str,
    pub label_key: &'a LabelKey,
    pub filter_by: &'a FilterBy,
    pub flags: MatchFlags,
    pub min_length: usize,
}

/// Filter `options` for the request, keeping their relative order.
///
/// Candidates for which `already_selected` returns true are dropped when the
/// default rule is used, so they cannot be added twice.
pub fn filter_options(
    options: &[Item],
    request: &FilterRequest<'_>,
    already_selected: impl Fn(&Item) -> bool,
    diagnostics: &dyn Diagnostics,
) -> Vec<Item> {
    if request.text.chars().count() < request.min_length {
        return Vec::new();
    }

    match request.filter_by {
        FilterBy::Custom(predicate) => options
            .iter()
            .filter(|item| predicate(item, request.text))
            .cloned()
            .collect(),
        FilterBy::Fields(fields) => options
            .iter()
            .filter(|item| {
                !already_selected(item)
                    && default_filter_by(
                        item,
                        request.text,
                        request.label_key,
                        fields,
                        request.flags,
                        diagnostics,
                    )
            })
            .cloned()
            .collect(),
    }
}

/// Default matching rule for a single candidate.
///
/// Records match when any searched field (the label field plus `filter-by`)
/// contains the text.
pub fn default_filter_by(
    item: &Item,
    text: &str,
    label_key: &LabelKey,
    fields: &[String],
    flags: MatchFlags,
    diagnostics: &dyn Diagnostics,
) -> bool {
    let record = match item {
        Item::Text(value) => return is_match(value, text, flags),
        Item::Record(_) => item,
    };

    if let LabelKey::Accessor(label) = label_key {
        if is_match(&label(record), text, flags) {
            return true;
        }
    }

    let mut searched: Vec<&str> = fields.iter().map(String::as_str).collect();
    if let LabelKey::Field(name) = label_key {
        if !searched.contains(&name.as_str()) {
            searched.insert(0, name);
        }
    }

    searched.into_iter().any(|field| match record.field(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(value)) => is_match(value, text, flags),
        Some(other) => {
            diagnostics.warn(NON_STRING_FIELD_WARNING);
            is_match(&other.to_string(), text, flags)
        }
    })
}

/// Substring test honouring the case and diacritic flags.
pub fn is_match(haystack: &str, needle: &str, flags: MatchFlags) -> bool {
    let (mut haystack, mut needle) = (haystack.to_string(), needle.to_string());
    if !flags.case_sensitive {
        haystack = haystack.to_lowercase();
        needle = needle.to_lowercase();
    }
    if flags.ignore_diacritics {
        haystack = strip_diacritics(&haystack);
        needle = strip_diacritics(&needle);
    }
    haystack.contains(&needle)
}

/// Remove combining marks: decompose, drop the marks, recompose.
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Char offsets of a match inside the original subject string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBounds {
    pub start: usize,
    pub end: usize,
}

/// Locate `query` in `subject`, ignoring case and diacritics.
///
/// Bounds are char offsets into `subject` as given, so combining marks that
/// belong to matched characters are counted inside the match.
pub fn match_bounds(subject: &str, query: &str) -> Option<MatchBounds> {
    let haystack = fold_with_origin(subject);
    let needle: Vec<char> = fold_with_origin(query).into_iter().map(|(c, _)| c).collect();

    if needle.is_empty() {
        return Some(MatchBounds { start: 0, end: 0 });
    }
    if needle.len() > haystack.len() {
        return None;
    }

    let at = (0..=haystack.len() - needle.len()).find(|&i| {
        haystack[i..i + needle.len()]
            .iter()
            .zip(&needle)
            .all(|((c, _), n)| c == n)
    })?;

    let start = haystack[at].1;
    let mut end = haystack[at + needle.len() - 1].1 + 1;

    // Trailing marks decorate the last matched character.
    let subject_chars: Vec<char> = subject.chars().collect();
    while end < subject_chars.len() && is_combining_mark(subject_chars[end]) {
        end += 1;
    }

    Some(MatchBounds { start, end })
}

/// Lowercased base characters paired with their char offset in `value`.
fn fold_with_origin(value: &str) -> Vec<(char, usize)> {
    let mut folded = Vec::with_capacity(value.len());
    for (origin, ch) in value.chars().enumerate() {
        for base in std::iter::once(ch).nfd() {
            if is_combining_mark(base) {
                continue;
            }
            folded.extend(base.to_lowercase().map(|lower| (lower, origin)));
        }
    }
    folded
}
