//! TurnOrchestrator — owns the session lifecycle, sequences turns, and
//! coordinates the merge engine, friction tracking, relevance filtering,
//! and the model boundary.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::config::IntakeConfig;
use crate::error::{Error, SessionError};
use crate::llm::boundary::{HistoryEntry, ModelBoundary, ModelTurn, TurnRequest};
use crate::profile::FIELD_CATALOG;
use crate::relevance::{self, Archetype, ClassifierSignals, FieldPartition};
use crate::store::SessionStore;
use crate::widget::{self, WidgetSpec, WidgetType};

use super::model::{
    NextQuestion, Session, SessionStatus, SessionSummary, Turn, TurnAnswer,
};

/// How many history entries are handed to the model per turn.
const HISTORY_WINDOW: usize = 20;

/// Canned questions substituted when the model boundary fails. The
/// conversation continues; the failed turn is logged, never retried.
const FALLBACK_QUESTIONS: &[&str] = &[
    "Tell me more about this position — what would you want a candidate to know?",
    "What else should someone understand about this role before applying?",
    "Is there anything about the day-to-day of this job we haven't covered yet?",
];

/// Top-level coordinator for intake sessions.
pub struct TurnOrchestrator {
    store: Arc<dyn SessionStore>,
    model: Arc<dyn ModelBoundary>,
    config: IntakeConfig,
}

impl TurnOrchestrator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        model: Arc<dyn ModelBoundary>,
        config: IntakeConfig,
    ) -> Self {
        Self {
            store,
            model,
            config,
        }
    }

    /// Create a session and produce its first question.
    ///
    /// The profile is seeded with any known context before the model is
    /// asked to open the conversation. Fails with
    /// `SessionError::CreationFailed` if the new session cannot be
    /// persisted.
    pub async fn start_session(
        &self,
        subject_id: &str,
        seed_context: Option<Vec<(String, serde_json::Value)>>,
    ) -> Result<NextQuestion, Error> {
        let mut session = Session::new(subject_id);
        if let Some(seed) = seed_context {
            session.profile = session.profile.merged(&seed);
        }
        session.archetype = Some(self.classify(&session));

        self.store.create(&session).await.map_err(|e| {
            SessionError::CreationFailed {
                subject_id: subject_id.to_string(),
                reason: e.to_string(),
            }
        })?;

        let next = self.ask(&mut session, None).await;
        self.persist(&mut session).await;
        Ok(next)
    }

    /// Process one respondent turn and return the next question.
    ///
    /// Flow: append the respondent's turn, merge its structured updates,
    /// classify it as skip or engaged, recompute archetype and relevance,
    /// ask the model boundary for the next turn, advisory-validate its
    /// widget, append the asker's turn, persist.
    pub async fn process_turn(
        &self,
        session_id: uuid::Uuid,
        answer: TurnAnswer,
    ) -> Result<NextQuestion, Error> {
        let mut session = self.load_active(session_id).await?;

        session.history.push(Turn::respondent(
            &answer.display_text(),
            answer.widget_response.clone(),
        ));

        // Merge engine first: the answer's own structured updates.
        if !answer.field_updates.is_empty() {
            session.profile = session.profile.merged(&answer.field_updates);
        }

        // Friction next: classify the event.
        let turn_number = session.turn_count;
        if answer.is_skip() {
            let field = answer.field.as_deref().unwrap_or("unknown");
            let reason = if answer.declined {
                "declined by respondent"
            } else {
                "no answer provided"
            };
            session.friction.record_skip(field, reason, turn_number);
            tracing::debug!(
                session = %session.id,
                field,
                consecutive = session.friction.consecutive_skips,
                strategy = %session.friction.current_strategy,
                "Turn classified as skip"
            );
        } else {
            session.friction.record_engaged(turn_number);
        }

        let next = self.ask(&mut session, answer.text.as_deref()).await;
        self.persist(&mut session).await;
        Ok(next)
    }

    /// Complete a session: terminal, exactly once. A second call fails with
    /// `SessionError::InvalidState`.
    pub async fn complete_session(
        &self,
        session_id: uuid::Uuid,
    ) -> Result<SessionSummary, Error> {
        let mut session = self.load_active(session_id).await?;
        session.status = SessionStatus::Completed;
        self.persist(&mut session).await;

        let archetype = self.classify(&session);
        Ok(SessionSummary {
            session_id: session.id,
            subject_id: session.subject_id.clone(),
            completion: session.profile.completion(),
            turn_count: session.turn_count,
            archetype,
            total_skips: session.friction.total_skips,
            recovery_attempts: session.friction.recovery_attempts,
            recovery_successes: session.friction.recovery_successes,
            profile: session.profile,
        })
    }

    /// Current session state, for status endpoints.
    pub async fn get_session(&self, session_id: uuid::Uuid) -> Result<Session, Error> {
        self.store
            .get(session_id)
            .await
            .map_err(Error::Store)?
            .ok_or_else(|| SessionError::NotFound { id: session_id }.into())
    }

    async fn load_active(&self, session_id: uuid::Uuid) -> Result<Session, Error> {
        let session = self.get_session(session_id).await?;
        if session.status != SessionStatus::Active {
            return Err(SessionError::InvalidState {
                id: session_id,
                status: session.status,
            }
            .into());
        }
        Ok(session)
    }

    /// Recompute the archetype from current profile signals. Deterministic,
    /// so safe to call every turn.
    fn classify(&self, session: &Session) -> Archetype {
        relevance::classify(&ClassifierSignals::from_profile(&session.profile))
    }

    /// Partition the catalogued fields that are still missing.
    fn missing_fields(&self, session: &Session, archetype: Archetype) -> FieldPartition {
        let missing: Vec<&str> = FIELD_CATALOG
            .iter()
            .copied()
            .filter(|path| !session.profile.has(path))
            .collect();
        relevance::partition(&missing, archetype, self.config.include_optional_fields)
    }

    /// Ask the model boundary for the next turn, apply its extractions, and
    /// append the asker's turn. Boundary failures degrade to a fallback
    /// question; they never surface to the caller.
    async fn ask(&self, session: &mut Session, answer_text: Option<&str>) -> NextQuestion {
        let archetype = self.classify(session);
        session.archetype = Some(archetype);

        let partition = self.missing_fields(session, archetype);
        let strategy = partition
            .relevant
            .first()
            .map(|field| session.friction.posture_for(field))
            .unwrap_or(session.friction.current_strategy);

        session.friction.note_recovery_attempt();

        let request = TurnRequest {
            turn_number: session.turn_count,
            profile: session.profile.compacted(),
            history: session
                .history
                .iter()
                .rev()
                .take(HISTORY_WINDOW)
                .rev()
                .map(|turn| HistoryEntry {
                    role: turn.role.as_str().to_string(),
                    content: turn.content.clone(),
                })
                .collect(),
            answer_text: answer_text.map(String::from),
            archetype,
            relevant_fields: partition.relevant,
            skipped_fields: partition.skipped,
            strategy,
            should_pivot: session.friction.should_pivot(),
            deferred_topics: session.friction.deferred_topics.clone(),
            completion: session.profile.completion(),
        };

        let turn = match self.model.next_turn(&request).await {
            Ok(turn) => turn,
            Err(e) => {
                tracing::warn!(
                    session = %session.id,
                    provider = self.model.provider_name(),
                    error = %e,
                    "Model boundary failed, substituting fallback question"
                );
                fallback_turn()
            }
        };

        if let Some(topic) = &turn.topic_declined {
            session.friction.defer_topic(topic, session.turn_count);
        }

        // The model may have extracted structure from the latest answer.
        if !turn.field_updates.is_empty() {
            session.profile = session.profile.merged(&turn.field_updates);
        }

        if let Some(spec) = &turn.widget {
            let report = widget::validate(spec);
            if !report.valid {
                tracing::warn!(
                    session = %session.id,
                    widget = %spec.widget_type,
                    errors = ?report.errors,
                    "Widget contract violated, keeping widget anyway"
                );
            }
        }

        if let Some(phase) = &turn.phase {
            tracing::debug!(session = %session.id, phase = %phase, "Model phase tag");
        }

        session
            .history
            .push(Turn::asker(&turn.question, turn.widget.clone()));
        session.turn_count += 1;

        let completion = session.profile.completion();
        NextQuestion {
            session_id: session.id,
            question: turn.question,
            widget: turn.widget,
            turn_number: session.turn_count,
            completion,
            strategy,
            archetype,
            ready_to_complete: completion >= self.config.completion_target
                || session.turn_count >= self.config.max_turns,
        }
    }

    /// Write the session back. Last write wins; failures are logged, not
    /// surfaced, so the caller still gets their question.
    async fn persist(&self, session: &mut Session) {
        session.updated_at = chrono::Utc::now();
        if let Err(e) = self.store.save(session.id, session).await {
            tracing::warn!(session = %session.id, error = %e, "Failed to persist session");
        }
    }
}

/// The fixed fallback turn: a generic question with a plain text widget.
fn fallback_turn() -> ModelTurn {
    let question = FALLBACK_QUESTIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_QUESTIONS[0]);
    ModelTurn {
        question: question.to_string(),
        widget: Some(WidgetSpec::new(
            WidgetType::TextInput,
            serde_json::json!({"prompt": question}),
        )),
        ..Default::default()
    }
}
