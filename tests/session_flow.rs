//! End-to-end session flow: a respondent skips the same sensitive category
//! three times, then engages normally.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use intake_agent::config::IntakeConfig;
use intake_agent::error::BoundaryError;
use intake_agent::friction::Strategy;
use intake_agent::llm::{ModelBoundary, ModelTurn, TurnRequest};
use intake_agent::session::{TurnAnswer, TurnOrchestrator, TurnRole};
use intake_agent::store::MemoryStore;

/// Boundary that replays canned turns and records every request it saw.
struct ScriptedBoundary {
    turns: Mutex<Vec<ModelTurn>>,
    requests: Mutex<Vec<TurnRequest>>,
}

impl ScriptedBoundary {
    fn new(turns: Vec<ModelTurn>) -> Self {
        Self {
            turns: Mutex::new(turns),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn question(text: &str) -> ModelTurn {
        serde_json::from_value(json!({"question": text})).unwrap()
    }
}

#[async_trait]
impl ModelBoundary for ScriptedBoundary {
    async fn next_turn(&self, request: &TurnRequest) -> Result<ModelTurn, BoundaryError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut turns = self.turns.lock().unwrap();
        if turns.is_empty() {
            Ok(Self::question("Anything else to add?"))
        } else {
            Ok(turns.remove(0))
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn sensitive_skips_escalate_then_recover() {
    let boundary = Arc::new(ScriptedBoundary::new(vec![
        ScriptedBoundary::question("What's the base pay for this role?"),
        ScriptedBoundary::question("Would a range be easier to share?"),
        ScriptedBoundary::question("Even a ballpark helps candidates self-select."),
        ScriptedBoundary::question("No problem — what does a typical day look like?"),
        serde_json::from_value(json!({
            "question": "What tools does the team use day to day?",
            "field_updates": {
                "role_reality.day_to_day.typical_day": "Opens the shop, handles the morning rush"
            }
        }))
        .unwrap(),
    ]));

    let orchestrator = TurnOrchestrator::new(
        Arc::new(MemoryStore::new()),
        boundary.clone(),
        IntakeConfig::default(),
    );

    let seed = vec![
        ("position_basics.title".to_string(), json!("Barista")),
        (
            "financial_reality.compensation.pay_type".to_string(),
            json!("hourly"),
        ),
    ];
    let started = orchestrator
        .start_session("coffee-shop-1", Some(seed))
        .await
        .unwrap();
    assert_eq!(started.question, "What's the base pay for this role?");

    // Three consecutive skips on the same sensitive category.
    let skip = |field: &str| TurnAnswer {
        declined: true,
        field: Some(field.to_string()),
        ..Default::default()
    };
    orchestrator
        .process_turn(
            started.session_id,
            skip("financial_reality.compensation.base_min"),
        )
        .await
        .unwrap();
    orchestrator
        .process_turn(
            started.session_id,
            skip("financial_reality.compensation.base_max"),
        )
        .await
        .unwrap();
    let after_third = orchestrator
        .process_turn(
            started.session_id,
            skip("financial_reality.compensation.bonus_structure"),
        )
        .await
        .unwrap();
    assert_eq!(after_third.strategy, Strategy::Education);

    // Fourth turn: a real answer.
    let engaged = TurnAnswer {
        text: Some("Mornings are busy, the rest of the day is prep".to_string()),
        ..Default::default()
    };
    orchestrator
        .process_turn(started.session_id, engaged)
        .await
        .unwrap();

    let session = orchestrator.get_session(started.session_id).await.unwrap();

    // Exactly 3 skip entries; counters recovered.
    assert_eq!(session.friction.skipped_fields.len(), 3);
    assert_eq!(session.friction.total_skips, 3);
    assert_eq!(session.friction.consecutive_skips, 0);
    assert_eq!(session.friction.recovery_successes, 1);
    assert_eq!(session.friction.current_strategy, Strategy::Standard);

    // The model's extraction landed in the profile without touching the seed.
    assert!(session.profile.has("role_reality.day_to_day.typical_day"));
    assert!(session.profile.has("position_basics.title"));

    // History is append-only and ordered: asker/respondent alternating.
    assert_eq!(session.history.len(), 9);
    assert_eq!(session.history[0].role, TurnRole::Asker);
    assert_eq!(session.history[1].role, TurnRole::Respondent);

    // Equity never reached the ask side for an hourly-service role.
    let requests = boundary.requests.lock().unwrap();
    for request in requests.iter() {
        assert!(
            !request
                .relevant_fields
                .iter()
                .any(|f| f.starts_with("financial_reality.equity")),
            "equity offered to the model for an hourly-service role"
        );
        assert!(
            request
                .skipped_fields
                .iter()
                .any(|s| s.field.starts_with("financial_reality.equity")),
            "equity skip reason missing from model context"
        );
    }

    // Completing the session is terminal and reports friction stats.
    let summary = orchestrator
        .complete_session(started.session_id)
        .await
        .unwrap();
    assert_eq!(summary.total_skips, 3);
    assert_eq!(summary.recovery_successes, 1);
    assert!(orchestrator
        .complete_session(started.session_id)
        .await
        .is_err());
}
