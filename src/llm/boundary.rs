//! The `ModelBoundary` trait and its request/response types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BoundaryError;
use crate::friction::Strategy;
use crate::relevance::{Archetype, SkippedField};
use crate::widget::WidgetSpec;

/// One prior exchange handed to the model as context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// "asker" or "respondent".
    pub role: String,
    pub content: String,
}

/// Everything the boundary needs to produce the next turn.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub turn_number: u32,
    /// Compacted profile document (housekeeping stripped, empty branches
    /// pruned).
    pub profile: serde_json::Value,
    pub history: Vec<HistoryEntry>,
    /// The respondent's latest free-text answer, if any.
    pub answer_text: Option<String>,
    pub archetype: Archetype,
    /// Missing fields worth asking, required before optional.
    pub relevant_fields: Vec<String>,
    /// Fields the filter ruled out, with reasons, so the model doesn't
    /// wander into them.
    pub skipped_fields: Vec<SkippedField>,
    /// The mandated questioning strategy.
    pub strategy: Strategy,
    /// Whether the asker should pivot to an unrelated category.
    pub should_pivot: bool,
    /// Topics the respondent has declined entirely.
    pub deferred_topics: Vec<String>,
    pub completion: u8,
}

/// What the boundary returns for one turn.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelTurn {
    /// The next question to ask.
    pub question: String,
    /// Proposed input widget. Advisory-validated, never blocking.
    #[serde(default)]
    pub widget: Option<WidgetSpec>,
    /// Structured field updates the model extracted from the answer, as
    /// (dot path, value) pairs.
    #[serde(default, deserialize_with = "deserialize_updates")]
    pub field_updates: Vec<(String, serde_json::Value)>,
    /// Fields the model intends to cover next.
    #[serde(default)]
    pub next_priority_fields: Vec<String>,
    /// The model's own completion estimate, if it offered one.
    #[serde(default)]
    pub completion_estimate: Option<u8>,
    /// Free-form phase tag ("rapport", "deep_dive", etc.), logged only.
    #[serde(default)]
    pub phase: Option<String>,
    /// Set when the model judged the respondent declined a whole topic.
    #[serde(default)]
    pub topic_declined: Option<String>,
}

/// Accept `field_updates` as a JSON object of path → value.
pub(crate) fn deserialize_updates<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, serde_json::Value)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let map = serde_json::Map::deserialize(deserializer)?;
    Ok(map.into_iter().collect())
}

/// The external model boundary: one request/response operation per turn.
///
/// Treated as opaque and possibly failing. The orchestrator never retries a
/// failed call; it substitutes a fixed fallback turn instead.
#[async_trait]
pub trait ModelBoundary: Send + Sync {
    async fn next_turn(&self, request: &TurnRequest) -> Result<ModelTurn, BoundaryError>;

    /// Provider identifier for logs.
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_turn_deserializes_updates_map() {
        let turn: ModelTurn = serde_json::from_str(
            r#"{
                "question": "What does the pay look like?",
                "widget": {"type": "currency_range", "props": {"prompt": "Base range", "currency": "USD"}},
                "field_updates": {"position_basics.title": "Barista"},
                "next_priority_fields": ["financial_reality.compensation.base_min"],
                "completion_estimate": 12,
                "phase": "financials"
            }"#,
        )
        .unwrap();
        assert_eq!(turn.field_updates.len(), 1);
        assert_eq!(turn.field_updates[0].0, "position_basics.title");
        assert_eq!(turn.completion_estimate, Some(12));
        assert!(turn.topic_declined.is_none());
    }

    #[test]
    fn model_turn_minimal() {
        let turn: ModelTurn =
            serde_json::from_str(r#"{"question": "Tell me about the role?"}"#).unwrap();
        assert!(turn.widget.is_none());
        assert!(turn.field_updates.is_empty());
    }
}
