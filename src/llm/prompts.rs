//! System prompt construction and model reply parsing.
//!
//! The prompt carries everything the turn orchestrator has computed: the
//! compacted profile, the ask/skip partitions with reasons, the mandated
//! friction strategy, and the widget catalog contract. The reply must be a
//! single JSON object; fenced or prefixed replies are tolerated.

use std::sync::LazyLock;

use regex::Regex;

use super::boundary::{ModelTurn, TurnRequest};
use crate::error::BoundaryError;
use crate::friction::Strategy;
use crate::widget::WidgetType;

/// Build the per-turn system prompt for the model boundary.
pub fn system_prompt(request: &TurnRequest) -> String {
    let mut sections = vec![base_instructions()];

    sections.push(format!(
        "SUBJECT ARCHETYPE: {} ({})\nCOMPLETION: {}%  TURN: {}",
        request.archetype,
        request.archetype.label(),
        request.completion,
        request.turn_number,
    ));

    sections.push(format!(
        "PROFILE SO FAR (JSON):\n{}",
        serde_json::to_string_pretty(&request.profile).unwrap_or_else(|_| "{}".to_string())
    ));

    if !request.relevant_fields.is_empty() {
        sections.push(format!(
            "FIELDS STILL WORTH ASKING (in priority order):\n{}",
            request.relevant_fields.join("\n")
        ));
    }

    if !request.skipped_fields.is_empty() {
        let skips: Vec<String> = request
            .skipped_fields
            .iter()
            .map(|s| format!("- {} — {}", s.field, s.reason))
            .collect();
        sections.push(format!("DO NOT ASK ABOUT:\n{}", skips.join("\n")));
    }

    if !request.deferred_topics.is_empty() {
        sections.push(format!(
            "TOPICS THE RESPONDENT HAS DECLINED ENTIRELY (leave alone):\n{}",
            request.deferred_topics.join("\n")
        ));
    }

    sections.push(strategy_instructions(request.strategy, request.should_pivot));
    sections.push(widget_contract());
    sections.push(response_schema());

    sections.join("\n\n")
}

fn base_instructions() -> String {
    "\
You are conducting a structured intake interview about an open position.
Ask ONE question per turn, warm and conversational, 1-3 sentences.
Acknowledge what the respondent shared before asking the next question.
Extract any structured facts from their latest answer into field_updates,
using the exact dot-addressed paths listed below. Never invent values."
        .to_string()
}

fn strategy_instructions(strategy: Strategy, should_pivot: bool) -> String {
    let mandate = match strategy {
        Strategy::Standard => {
            if should_pivot {
                "STRATEGY: standard, but the respondent just skipped a question. \
                 Pivot to an unrelated category rather than pressing the same topic."
            } else {
                "STRATEGY: standard. Ask the highest-priority missing field directly."
            }
        }
        Strategy::LowDisclosure => {
            "STRATEGY: low_disclosure. The respondent is reluctant. Offer ranges \
             and binary choices instead of exact values — never ask for a precise \
             number. Prefer select/range widgets over free text."
        }
        Strategy::Education => {
            "STRATEGY: education. Stop collecting. Briefly explain why this data \
             helps the respondent get better outcomes, then offer a soft re-entry \
             question they can decline without friction."
        }
        Strategy::Defer => {
            "STRATEGY: defer. The respondent declined a topic entirely. Do not \
             revisit it. Move to a different category altogether."
        }
    };
    mandate.to_string()
}

fn widget_contract() -> String {
    let catalog: Vec<String> = WidgetType::ALL
        .iter()
        .map(|w| format!("- {} (required props: {})", w.name(), w.required_props().join(", ")))
        .collect();
    format!(
        "Choose one input widget per question from this catalog:\n{}",
        catalog.join("\n")
    )
}

fn response_schema() -> String {
    r#"Respond with ONLY a JSON object, no prose around it:
{
  "question": "the next question text",
  "widget": {"type": "<catalog name>", "props": {...}},
  "field_updates": {"<dot.path>": <value>, ...},
  "next_priority_fields": ["<dot.path>", ...],
  "completion_estimate": <0-100 or null>,
  "phase": "<short tag>",
  "topic_declined": "<two-segment category prefix, ONLY if the respondent refused a whole topic, else null>"
}"#
    .to_string()
}

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").expect("static regex")
});

/// Parse the model's reply into a `ModelTurn`.
///
/// Accepts a bare JSON object, a fenced ```json block, or an object embedded
/// in surrounding prose (first `{` to last `}`).
pub fn parse_model_reply(reply: &str) -> Result<ModelTurn, BoundaryError> {
    let trimmed = reply.trim();

    let candidate = if let Some(captures) = FENCED_JSON.captures(trimmed) {
        captures[1].to_string()
    } else if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        let start = trimmed.find('{');
        let end = trimmed.rfind('}');
        match (start, end) {
            (Some(s), Some(e)) if s < e => trimmed[s..=e].to_string(),
            _ => {
                return Err(BoundaryError::MalformedReply {
                    reason: "no JSON object in reply".to_string(),
                });
            }
        }
    };

    let turn: ModelTurn =
        serde_json::from_str(&candidate).map_err(|e| BoundaryError::MalformedReply {
            reason: format!("invalid turn JSON: {e}"),
        })?;

    if turn.question.trim().is_empty() {
        return Err(BoundaryError::MalformedReply {
            reason: "empty question".to_string(),
        });
    }

    Ok(turn)
}
