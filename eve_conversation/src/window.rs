//! Bounded context window over the transcript.
//!
//! The window is the most recent slice of the conversation sent to the
//! model. When a turn starts from an empty transcript, the persona intro is
//! seeded in front so the model always sees how the conversation opened.

use eve_core::Message;

/// Default number of messages sent to the model.
pub const DEFAULT_WINDOW_SIZE: usize = 6;

/// Room for the opening message plus the turn being answered.
pub const MIN_WINDOW_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Maximum number of messages in the window
    pub max_messages: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl WindowConfig {
    #[must_use]
    pub const fn with_max_messages(mut self, max: usize) -> Self {
        self.max_messages = max;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContextWindow {
    config: WindowConfig,
}

impl ContextWindow {
    /// Sizes below [`MIN_WINDOW_SIZE`] are raised to it.
    #[must_use]
    pub const fn new(config: WindowConfig) -> Self {
        let max_messages = if config.max_messages < MIN_WINDOW_SIZE {
            MIN_WINDOW_SIZE
        } else {
            config.max_messages
        };
        Self {
            config: WindowConfig { max_messages },
        }
    }

    /// Select the most recent messages, oldest dropped first.
    ///
    /// `seed` is placed before the transcript and competes for space like
    /// any other message.
    #[must_use]
    pub fn select(&self, transcript: &[Message], seed: Option<&Message>) -> Vec<Message> {
        let mut combined: Vec<&Message> = Vec::with_capacity(transcript.len() + 1);
        combined.extend(seed);
        combined.extend(transcript);

        let start = combined.len().saturating_sub(self.config.max_messages);
        combined[start..].iter().map(|m| (*m).clone()).collect()
    }

    #[must_use]
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }
}
