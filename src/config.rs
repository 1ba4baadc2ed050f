//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by every assertion created from one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report failures at the internal `assert` call instead of the user's
    /// call site.
    pub include_stack: bool,
    /// Whether failures carry a diff of expected and actual values.
    pub show_diff: bool,
    /// Rendered length at which `obj_display` shortens containers and
    /// functions. Zero disables truncation.
    pub truncate_threshold: usize,
    /// Whether unknown members are rejected (with a suggestion) instead of
    /// silently yielding nothing.
    pub use_proxy: bool,
    /// Member names that never trigger the unknown-member error.
    pub proxy_excluded_keywords: Vec<String>,
    /// Nesting depth passed to `inspect` when rendering messages.
    pub inspect_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_stack: false,
            show_diff: true,
            truncate_threshold: 40,
            use_proxy: true,
            proxy_excluded_keywords: ["then", "catch", "inspect", "toJSON"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            inspect_depth: crate::inspect::DEFAULT_DEPTH,
        }
    }
}

impl Config {
    /// Returns a copy with the given truncation threshold.
    #[must_use]
    pub fn with_truncate_threshold(mut self, threshold: usize) -> Self {
        self.truncate_threshold = threshold;
        self
    }

    /// Returns true if `name` is exempt from unknown-member checks.
    #[must_use]
    pub fn is_excluded_keyword(&self, name: &str) -> bool {
        self.proxy_excluded_keywords.iter().any(|k| k == name)
    }
}
