use std::time::Duration;
use thiserror::Error;

/// Failures the engine recovers from locally.
///
/// None of these is returned as an `Err` from an engine operation; they are
/// logged, and model failures are reported back inside
/// [`crate::TurnOutcome::Recovered`].
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Unknown persona key: {0}")]
    UnknownPersonaKey(String),

    #[error("LLM provider error: {0}")]
    ModelInvocation(#[from] anyhow::Error),

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Empty response from LLM")]
    EmptyCompletion,
}
