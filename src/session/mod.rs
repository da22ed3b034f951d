//! Session lifecycle — the model types and the turn orchestrator.

pub mod model;
pub mod orchestrator;

pub use model::{
    NextQuestion, Session, SessionStatus, SessionSummary, Turn, TurnAnswer, TurnRole,
};
pub use orchestrator::TurnOrchestrator;
