//! In-memory state of the active conversation.
//!
//! One `ConversationSession` exists per engine. It mirrors the persisted
//! record and adds the in-flight marker, which is never persisted.

use eve_core::{Message, Persona, Role};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSession {
    /// Key of the selected persona, if any
    pub active_persona_key: Option<String>,
    /// Ordered message history
    pub transcript: Vec<Message>,
    /// First name inferred from user input, set at most once
    pub inferred_name: Option<String>,
    /// True while a model call is outstanding
    pub busy: bool,
    /// Bumped whenever the conversation is restarted or cleared
    pub epoch: u64,
}

impl ConversationSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over with `persona`, keeping the inferred name.
    ///
    /// A reply still pending belongs to the previous epoch and will be
    /// dropped, so the new conversation starts idle.
    pub fn restart_with(&mut self, persona: &Persona) {
        self.active_persona_key = Some(persona.key.clone());
        self.transcript = vec![Message::assistant(persona.intro_message.clone())];
        self.busy = false;
        self.epoch += 1;
    }

    /// Forget persona, transcript and name.
    pub fn clear(&mut self) {
        self.active_persona_key = None;
        self.transcript.clear();
        self.inferred_name = None;
        self.busy = false;
        self.epoch += 1;
    }

    pub fn push(&mut self, role: Role, content: String) {
        self.transcript.push(Message { role, content });
    }

    /// Record an inferred name unless one is already known.
    pub fn commit_name(&mut self, candidate: Option<String>) {
        if self.inferred_name.as_deref().is_some_and(|n| !n.is_empty()) {
            return;
        }
        if let Some(name) = candidate {
            self.inferred_name = Some(name);
        }
    }

    #[must_use]
    pub const fn message_count(&self) -> usize {
        self.transcript.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}
