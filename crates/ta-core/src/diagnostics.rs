// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Developer-facing warnings
//!
//! Configuration conflicts and suspicious option data are reported through a
//! [`Diagnostics`] sink owned by each controller. Nothing here is global:
//! deduplication state lives in the sink instance the host injects.

use std::collections::HashSet;
use std::sync::Mutex;

/// Receiver of non-fatal warnings.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// Whether a sink repeats a warning it has already reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dedup {
    /// Report every occurrence.
    Never,
    /// Report each distinct message once until [`TracingDiagnostics::reset`].
    #[default]
    PerMessage,
}

/// Sink that forwards warnings to `tracing`.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    dedup: Dedup,
    seen: Mutex<HashSet<String>>,
}

impl TracingDiagnostics {
    pub fn new(dedup: Dedup) -> Self {
        Self {
            dedup,
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Forget previously reported messages.
    pub fn reset(&self) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.clear();
        }
    }

    fn should_report(&self, message: &str) -> bool {
        if self.dedup == Dedup::Never {
            return true;
        }
        match self.seen.lock() {
            Ok(mut seen) => seen.insert(message.to_string()),
            // A poisoned set only loses deduplication, never the warning.
            Err(_) => true,
        }
    }
}

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        if self.should_report(message) {
            tracing::warn!(target: "typeahead", "{message}");
        }
    }
}

/// Sink that records warnings in memory, for hosts that surface them in
/// their own UI and for tests.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_message_dedup_reports_once_until_reset() {
        let sink = TracingDiagnostics::new(Dedup::PerMessage);
        assert!(sink.should_report("a"));
        assert!(!sink.should_report("a"));
        assert!(sink.should_report("b"));
        sink.reset();
        assert!(sink.should_report("a"));
    }

    #[test]
    fn never_dedup_reports_every_time() {
        let sink = TracingDiagnostics::new(Dedup::Never);
        assert!(sink.should_report("a"));
        assert!(sink.should_report("a"));
    }

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemoryDiagnostics::new();
        sink.warn("first");
        sink.warn("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }
}
