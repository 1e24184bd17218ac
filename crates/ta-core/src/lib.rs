// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Headless typeahead controller
//!
//! The controller owns the text, selection, highlight and menu state of an
//! autocomplete input and produces the filtered result list a renderer
//! paints. Rendering, focus handling and overlay placement belong to the
//! host, which feeds input events in and drains [`TypeaheadEvent`]s out.

pub mod a11y;
pub mod config;
pub mod controller;
pub mod custom_option;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod hint;
pub mod item;
pub mod keyboard;
pub mod label;
pub mod pagination;

#[cfg(feature = "crossterm")]
pub mod terminal;

pub use a11y::{A11yMessages, InputAria};
pub use config::TypeaheadConfig;
pub use controller::{
    FocusTarget, MenuItemView, MenuState, NoopFocus, Typeahead, TypeaheadBuilder, TypeaheadEvent,
    TypeaheadState,
};
pub use custom_option::{add_custom_option, AllowNew};
pub use diagnostics::{Dedup, Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use error::{ConfigError, Result};
pub use filter::{filter_options, match_bounds, FilterBy, MatchBounds, MatchFlags};
pub use item::Item;
pub use keyboard::{Key, KeyEvent, KeyOutcome, Modifiers};
pub use label::LabelKey;
