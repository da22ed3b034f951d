//! Profile document — the nested record the conversation incrementally fills.
//!
//! The document is an arbitrarily deep JSON tree grouped under eight fixed
//! top-level categories. `catalog` holds the static field catalog and the
//! paths the archetype classifier reads its signals from; `merge` is the
//! path-addressed merge/completion/compaction engine.

pub mod catalog;
pub mod merge;

pub use catalog::{CATEGORIES, FIELD_CATALOG, HOUSEKEEPING_KEYS, signal_paths};
pub use merge::{compact, estimate_completion, merge};

use serde::{Deserialize, Serialize};

/// The profile document being built by the conversation.
///
/// A thin newtype over a JSON object. Field values, once written non-null,
/// are only replaced by an explicit new update for the same path; merges
/// never delete sibling fields. Absent leaves mean "not yet collected",
/// which is distinct from an explicit `false` or `0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDocument(pub serde_json::Value);

impl Default for ProfileDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileDocument {
    pub fn new() -> Self {
        Self(serde_json::json!({}))
    }

    /// Read the value at a dot-addressed path, if present.
    pub fn get(&self, path: &str) -> Option<&serde_json::Value> {
        let mut current = &self.0;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Whether a non-null value has been collected at `path`.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some_and(|v| !v.is_null())
    }

    /// Apply an ordered list of dot-addressed updates, returning the merged
    /// document. The original is untouched.
    pub fn merged(&self, updates: &[(String, serde_json::Value)]) -> Self {
        Self(merge(&self.0, updates))
    }

    /// Completion percentage (0..=100) across the fixed categories.
    pub fn completion(&self) -> u8 {
        estimate_completion(&self.0)
    }

    /// A pruned copy suitable for handing to the model boundary.
    pub fn compacted(&self) -> serde_json::Value {
        compact(&self.0)
    }
}
