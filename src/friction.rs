//! Friction state machine — tracks a respondent repeatedly declining to
//! answer and escalates the questioning strategy.
//!
//! The machine only computes the mandated strategy; enforcing it in the
//! generated question is the model boundary's job. The strategy value and
//! its transition rules live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category prefixes that always get the low-disclosure posture once any
/// skip has occurred on them, regardless of the consecutive count.
pub const SENSITIVE_PREFIXES: &[&str] = &[
    "financial_reality.compensation",
    "financial_reality.equity",
    "financial_reality.revenue",
    "role_reality.turnover",
];

/// The mandated questioning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Normal questioning.
    Standard,
    /// Stop asking; explain why the data matters and offer a soft re-entry.
    Education,
    /// Offer ranges and binary choices instead of exact values.
    LowDisclosure,
    /// The respondent declined a topic entirely; leave it alone.
    Defer,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Standard
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Education => "education",
            Self::LowDisclosure => "low_disclosure",
            Self::Defer => "defer",
        };
        write!(f, "{s}")
    }
}

/// One recorded skip event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipEvent {
    pub field: String,
    pub reason: String,
    pub turn_number: u32,
    pub timestamp: DateTime<Utc>,
}

/// Per-session friction state. Mutated only by this module; the history
/// list grows monotonically and is never edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrictionState {
    pub total_skips: u32,
    pub consecutive_skips: u32,
    pub skipped_fields: Vec<SkipEvent>,
    pub recovery_attempts: u32,
    pub recovery_successes: u32,
    pub current_strategy: Strategy,
    /// Turn number of the last strategy change.
    pub strategy_changed_at: u32,
    /// Topics the respondent has explicitly declined entirely.
    pub deferred_topics: Vec<String>,
}

impl FrictionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skip of `field` on turn `turn_number` and escalate the
    /// strategy as a function of the consecutive count:
    /// 1 stays `standard` (the asker is told to pivot), 2 mandates
    /// `low_disclosure`, 3 or more mandates `education`.
    pub fn record_skip(&mut self, field: &str, reason: &str, turn_number: u32) {
        self.total_skips += 1;
        self.consecutive_skips += 1;
        self.skipped_fields.push(SkipEvent {
            field: field.to_string(),
            reason: reason.to_string(),
            turn_number,
            timestamp: Utc::now(),
        });

        let escalated = match self.consecutive_skips {
            0 | 1 => Strategy::Standard,
            2 => Strategy::LowDisclosure,
            _ => Strategy::Education,
        };
        // Defer is explicit-only; escalation never overrides it.
        if self.current_strategy != Strategy::Defer && escalated != self.current_strategy {
            self.current_strategy = escalated;
            self.strategy_changed_at = turn_number;
        }
    }

    /// Record a real answer. Resets the consecutive count; if the machine
    /// was in a recovery strategy, count the success and revert to standard.
    pub fn record_engaged(&mut self, turn_number: u32) {
        self.consecutive_skips = 0;
        if self.current_strategy != Strategy::Standard {
            self.recovery_successes += 1;
            self.current_strategy = Strategy::Standard;
            self.strategy_changed_at = turn_number;
        }
    }

    /// Count one recovery attempt: a question issued while the mandated
    /// strategy is not standard.
    pub fn note_recovery_attempt(&mut self) {
        if self.current_strategy != Strategy::Standard {
            self.recovery_attempts += 1;
        }
    }

    /// Mark a topic as explicitly declined. Sets the strategy to `Defer`
    /// until the next engaged answer.
    pub fn defer_topic(&mut self, topic: &str, turn_number: u32) {
        if !self.deferred_topics.iter().any(|t| t == topic) {
            self.deferred_topics.push(topic.to_string());
        }
        if self.current_strategy != Strategy::Defer {
            self.current_strategy = Strategy::Defer;
            self.strategy_changed_at = turn_number;
        }
    }

    /// Whether the asker should pivot to an unrelated category: exactly one
    /// consecutive skip, strategy still standard.
    pub fn should_pivot(&self) -> bool {
        self.consecutive_skips == 1 && self.current_strategy == Strategy::Standard
    }

    /// The posture for a specific field. Sensitive categories are handled
    /// with low disclosure once any skip has landed on them, regardless of
    /// the consecutive count.
    pub fn posture_for(&self, field: &str) -> Strategy {
        let prefix = field.split('.').take(2).collect::<Vec<_>>().join(".");
        if SENSITIVE_PREFIXES.contains(&prefix.as_str())
            && self
                .skipped_fields
                .iter()
                .any(|e| e.field.starts_with(&prefix))
            && self.current_strategy == Strategy::Standard
        {
            return Strategy::LowDisclosure;
        }
        self.current_strategy
    }
}
