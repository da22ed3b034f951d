//! Session and turn data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::friction::{FrictionState, Strategy};
use crate::profile::ProfileDocument;
use crate::relevance::Archetype;
use crate::widget::WidgetSpec;

/// Session lifecycle status. `Active` transitions to `Completed` exactly
/// once; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Asker,
    Respondent,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asker => "asker",
            Self::Respondent => "respondent",
        }
    }
}

/// One entry in the conversation history. Append-only: never edited or
/// removed once written; index order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_payload: Option<serde_json::Value>,
}

impl Turn {
    pub fn asker(content: &str, widget: Option<WidgetSpec>) -> Self {
        Self {
            role: TurnRole::Asker,
            content: content.to_string(),
            timestamp: Utc::now(),
            widget,
            answer_payload: None,
        }
    }

    pub fn respondent(content: &str, payload: Option<serde_json::Value>) -> Self {
        Self {
            role: TurnRole::Respondent,
            content: content.to_string(),
            timestamp: Utc::now(),
            widget: None,
            answer_payload: payload,
        }
    }
}

/// A conversational intake session. Owned exclusively by the orchestrator
/// for the duration of one request; persisted between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub subject_id: String,
    pub status: SessionStatus,
    pub turn_count: u32,
    pub profile: ProfileDocument,
    pub history: Vec<Turn>,
    pub friction: FrictionState,
    /// Cached archetype. Recomputed from profile signals every turn; the
    /// cache is never authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<Archetype>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(subject_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject_id: subject_id.to_string(),
            status: SessionStatus::Active,
            turn_count: 0,
            profile: ProfileDocument::new(),
            history: Vec::new(),
            friction: FrictionState::new(),
            archetype: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The respondent's input for one turn.
///
/// A turn is classified as a skip when `declined` is set, or when no text,
/// widget response, or field updates were supplied at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnAnswer {
    /// Free-text answer, interpreted by the model boundary.
    #[serde(default)]
    pub text: Option<String>,
    /// Raw widget response payload, recorded on the turn.
    #[serde(default)]
    pub widget_response: Option<serde_json::Value>,
    /// Structured updates the client already resolved (widget-derived), as
    /// a path → value object.
    #[serde(default, deserialize_with = "crate::llm::boundary::deserialize_updates")]
    pub field_updates: Vec<(String, serde_json::Value)>,
    /// The field the answered question was about, if the client knows it.
    #[serde(default)]
    pub field: Option<String>,
    /// Explicit skip marker.
    #[serde(default)]
    pub declined: bool,
}

impl TurnAnswer {
    /// Whether this answer counts as a skip for friction tracking.
    pub fn is_skip(&self) -> bool {
        if self.declined {
            return true;
        }
        let text_blank = self.text.as_deref().is_none_or(|t| t.trim().is_empty());
        text_blank && self.widget_response.is_none() && self.field_updates.is_empty()
    }

    /// Text representation recorded in the conversation history.
    pub fn display_text(&self) -> String {
        if let Some(text) = &self.text
            && !text.trim().is_empty()
        {
            return text.clone();
        }
        if self.declined {
            return "(declined to answer)".to_string();
        }
        if let Some(payload) = &self.widget_response {
            return payload.to_string();
        }
        "(no answer)".to_string()
    }
}

/// The next question handed back to the caller after a turn.
#[derive(Debug, Clone, Serialize)]
pub struct NextQuestion {
    pub session_id: Uuid,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetSpec>,
    pub turn_number: u32,
    pub completion: u8,
    pub strategy: Strategy,
    pub archetype: Archetype,
    /// Set when the orchestrator considers the profile complete enough to
    /// finish the session.
    pub ready_to_complete: bool,
}

/// Final statistics returned by `complete_session`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub subject_id: String,
    pub profile: ProfileDocument,
    pub completion: u8,
    pub turn_count: u32,
    pub archetype: Archetype,
    pub total_skips: u32,
    pub recovery_attempts: u32,
    pub recovery_successes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_answer_is_a_skip() {
        assert!(TurnAnswer::default().is_skip());
        let blank = TurnAnswer {
            text: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.is_skip());
    }

    #[test]
    fn declined_is_a_skip_even_with_text() {
        let answer = TurnAnswer {
            text: Some("I'd rather not say".to_string()),
            declined: true,
            ..Default::default()
        };
        assert!(answer.is_skip());
    }

    #[test]
    fn text_or_updates_are_engaged() {
        let text = TurnAnswer {
            text: Some("We pay $22/hr".to_string()),
            ..Default::default()
        };
        assert!(!text.is_skip());

        let updates = TurnAnswer {
            field_updates: vec![("a.b".to_string(), json!(1))],
            ..Default::default()
        };
        assert!(!updates.is_skip());
    }

    #[test]
    fn answer_deserializes_updates_object() {
        let answer: TurnAnswer = serde_json::from_str(
            r#"{"field_updates": {"financial_reality.compensation.pay_type": "hourly"},
                "field": "financial_reality.compensation.pay_type"}"#,
        )
        .unwrap();
        assert_eq!(answer.field_updates.len(), 1);
        assert!(!answer.is_skip());
    }

    #[test]
    fn session_serde_roundtrip() {
        let mut session = Session::new("subject-1");
        session.history.push(Turn::asker("What's the role?", None));
        session.turn_count = 1;
        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, session.id);
        assert_eq!(parsed.status, SessionStatus::Active);
        assert_eq!(parsed.history.len(), 1);
    }
}
