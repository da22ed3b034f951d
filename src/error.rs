//! Error types for the intake agent.

use uuid::Uuid;

use crate::session::SessionStatus;

/// Top-level error type for the intake agent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Model boundary error: {0}")]
    Boundary(#[from] BoundaryError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists for the given id. Surfaced to HTTP callers as 404.
    #[error("Session {id} not found")]
    NotFound { id: Uuid },

    /// The operation requires an active session but the session is in
    /// another state. Surfaced as a conflict (409).
    #[error("Session {id} is {status}, operation requires an active session")]
    InvalidState { id: Uuid, status: SessionStatus },

    /// Persisting a newly created session failed.
    #[error("Failed to create session for subject {subject_id}: {reason}")]
    CreationFailed { subject_id: String, reason: String },
}

/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// External model boundary errors.
///
/// These are recovered inside the orchestrator (a fixed fallback question is
/// substituted and the failure logged); they are never surfaced raw to the
/// end of the conversation.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("Request to {provider} failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Model reply was not parseable as a turn: {reason}")]
    MalformedReply { reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the intake agent.
pub type Result<T> = std::result::Result<T, Error>;
