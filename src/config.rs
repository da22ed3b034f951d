//! Configuration types.

/// Intake engine configuration.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Agent name for identification.
    pub name: String,
    /// Maximum number of turns before the orchestrator stops proposing new
    /// questions and suggests completion.
    pub max_turns: u32,
    /// Whether optional-relevance fields are offered to the model as
    /// candidates, or only required ones.
    pub include_optional_fields: bool,
    /// Completion percentage at which the orchestrator signals the session
    /// is ready to complete.
    pub completion_target: u8,
    /// Maximum tokens requested from the model boundary per turn.
    pub max_response_tokens: u32,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            name: "intake-agent".to_string(),
            max_turns: 40,
            include_optional_fields: true,
            completion_target: 85,
            max_response_tokens: 1024,
        }
    }
}
