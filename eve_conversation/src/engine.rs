//! Conversation engine.
//!
//! The `ConversationEngine` owns the session state, builds the outbound
//! prompt, calls the model and keeps the persisted record in step with the
//! in-memory session.

use crate::error::ConversationError;
use crate::session::ConversationSession;
use crate::window::{ContextWindow, WindowConfig};
use eve_core::{
    FALLBACK_TOPIC, LLMProvider, Message, Persona, PersonaRegistry, Role, infer_name,
    render_prompt, strip_name_echo,
};
use eve_session::{SessionBackend, SessionStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Assistant message appended when the model call fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response. Please try again.";

/// Prefix of the user message recorded for an attached file.
pub const ATTACHMENT_PREFIX: &str = "Uploaded file: ";

/// Configuration for the conversation engine.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// Context window sent with each prompt
    pub window: WindowConfig,
    /// Upper bound on a single model call; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            request_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl ConversationConfig {
    #[must_use]
    pub const fn with_window_size(mut self, size: usize) -> Self {
        self.window.max_messages = size;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Why a submission was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

/// Result of one `submit_user_message` call.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Nothing changed
    Ignored(IgnoreReason),
    /// The model replied; `reply` is what was appended
    Answered { reply: String },
    /// The model failed and the fallback reply was appended
    Recovered { error: ConversationError },
    /// The conversation was restarted while waiting; the reply was dropped
    Discarded,
}

impl TurnOutcome {
    /// The assistant text appended by this turn, if any.
    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Answered { reply } => Some(reply),
            Self::Recovered { .. } => Some(FALLBACK_REPLY),
            Self::Ignored(_) | Self::Discarded => None,
        }
    }
}

pub struct ConversationEngine<P = Arc<dyn LLMProvider>, B = Arc<dyn SessionBackend>>
where
    P: Send + Sync,
    B: Send + Sync,
{
    provider: P,
    store: SessionStore<B>,
    registry: PersonaRegistry,
    window: ContextWindow,
    config: ConversationConfig,
    state: Mutex<ConversationSession>,
}

impl<P, B> ConversationEngine<P, B>
where
    P: LLMProvider + Send + Sync,
    B: SessionBackend + Send + Sync,
{
    /// Create an engine, rehydrating the session from `store`.
    pub fn new(
        provider: P,
        store: SessionStore<B>,
        registry: PersonaRegistry,
        config: ConversationConfig,
    ) -> Self {
        let session = Self::rehydrate(&store, &registry);
        info!(
            "Conversation engine ready: persona={:?}, {} messages, model={}",
            session.active_persona_key,
            session.message_count(),
            provider.model()
        );

        Self {
            provider,
            store,
            window: ContextWindow::new(config.window),
            registry,
            config,
            state: Mutex::new(session),
        }
    }

    fn rehydrate(store: &SessionStore<B>, registry: &PersonaRegistry) -> ConversationSession {
        let active_persona_key = store.persona_key().filter(|key| {
            let known = registry.contains(key);
            if !known {
                warn!("Ignoring persisted persona key that no longer resolves: {key}");
            }
            known
        });

        ConversationSession {
            active_persona_key,
            transcript: store.transcript(),
            inferred_name: store.name(),
            ..ConversationSession::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConversationSession> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch to the persona `key` and restart the transcript with its intro.
    ///
    /// Unknown keys are ignored and return `false`.
    pub fn select_persona(&self, key: &str) -> bool {
        let Some(persona) = self.registry.lookup(key) else {
            debug!("{}", ConversationError::UnknownPersonaKey(key.to_string()));
            return false;
        };

        let mut session = self.lock();
        session.restart_with(persona);
        self.persist_persona(&session);
        self.persist_transcript(&session);
        self.persist_name(&session);

        info!("Selected persona: {}", persona.key);
        true
    }

    /// Process one user turn.
    ///
    /// Rejected when the trimmed text is empty or another turn is in flight.
    /// Model failures never escape: the fallback reply is appended instead.
    pub async fn submit_user_message(&self, text: &str) -> TurnOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TurnOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let (prompt, candidate, epoch) = {
            let mut session = self.lock();
            if session.busy {
                debug!("Rejecting message while a reply is pending");
                return TurnOutcome::Ignored(IgnoreReason::Busy);
            }

            let persona = session
                .active_persona_key
                .as_deref()
                .and_then(|key| self.registry.lookup(key));
            // With no persona the opening line is still sent, just empty.
            let seed = session.is_empty().then(|| {
                Message::assistant(persona.map_or_else(String::new, |p| p.intro_message.clone()))
            });

            session.push(Role::User, trimmed.to_string());
            session.busy = true;
            self.persist_transcript(&session);

            let candidate = infer_name(text, session.inferred_name.as_deref());
            let window = self.window.select(&session.transcript, seed.as_ref());
            let topic = persona.map_or(FALLBACK_TOPIC, |p| p.title.as_str());

            (render_prompt(topic, &window), candidate, session.epoch)
        };

        debug!(
            "Sending prompt ({} chars) to {}",
            prompt.len(),
            self.provider.model()
        );
        let result = self.call_model(&prompt).await;

        let mut session = self.lock();
        if session.epoch != epoch {
            info!("Conversation restarted while waiting; dropping reply");
            return TurnOutcome::Discarded;
        }

        let outcome = match result {
            Ok(completion) => {
                let known = candidate.as_deref().or(session.inferred_name.as_deref());
                let reply = strip_name_echo(&completion, known);
                session.push(Role::Assistant, reply.clone());
                session.commit_name(candidate);
                TurnOutcome::Answered { reply }
            }
            Err(error) => {
                warn!("Model call failed, using fallback reply: {error}");
                session.push(Role::Assistant, FALLBACK_REPLY.to_string());
                TurnOutcome::Recovered { error }
            }
        };

        session.busy = false;
        self.persist_transcript(&session);
        self.persist_name(&session);
        outcome
    }

    async fn call_model(&self, prompt: &str) -> Result<String, ConversationError> {
        let completion = match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.complete(prompt))
                .await
                .map_err(|_| ConversationError::Timeout(limit))??,
            None => self.provider.complete(prompt).await?,
        };

        let completion = completion.trim();
        if completion.is_empty() {
            return Err(ConversationError::EmptyCompletion);
        }
        Ok(completion.to_string())
    }

    /// Record an attachment reported by the file picker. Only the name is kept.
    pub fn attach_file(&self, file_name: &str) -> bool {
        let name = file_name.trim();
        if name.is_empty() {
            return false;
        }

        let mut session = self.lock();
        session.push(Role::User, format!("{ATTACHMENT_PREFIX}{name}"));
        self.persist_transcript(&session);
        true
    }

    /// Clear persona, transcript and name, in memory and in the store.
    pub fn reset(&self) {
        let mut session = self.lock();
        session.clear();

        for (field, result) in [
            ("transcript", self.store.clear_transcript()),
            ("persona key", self.store.clear_persona_key()),
            ("name", self.store.clear_name()),
        ] {
            if let Err(e) = result {
                warn!("Failed to clear persisted {field}: {e}");
            }
        }
        info!("Session reset");
    }

    fn persist_persona(&self, session: &ConversationSession) {
        let result = match session.active_persona_key.as_deref() {
            Some(key) => self.store.set_persona_key(key),
            None => self.store.clear_persona_key(),
        };
        if let Err(e) = result {
            warn!("Failed to persist persona key: {e}");
        }
    }

    fn persist_transcript(&self, session: &ConversationSession) {
        if let Err(e) = self.store.set_transcript(&session.transcript) {
            warn!("Failed to persist transcript: {e}");
        }
    }

    fn persist_name(&self, session: &ConversationSession) {
        let result = match session.inferred_name.as_deref() {
            Some(name) => self.store.set_name(name),
            None => self.store.clear_name(),
        };
        if let Err(e) = result {
            warn!("Failed to persist name: {e}");
        }
    }

    #[must_use]
    pub fn transcript(&self) -> Vec<Message> {
        self.lock().transcript.clone()
    }

    #[must_use]
    pub fn active_persona_key(&self) -> Option<String> {
        self.lock().active_persona_key.clone()
    }

    #[must_use]
    pub fn active_persona(&self) -> Option<Persona> {
        let key = self.active_persona_key()?;
        self.registry.lookup(&key).cloned()
    }

    #[must_use]
    pub fn inferred_name(&self) -> Option<String> {
        self.lock().inferred_name.clone()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    /// Copy of the full session state.
    #[must_use]
    pub fn snapshot(&self) -> ConversationSession {
        self.lock().clone()
    }

    #[must_use]
    pub const fn personas(&self) -> &PersonaRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore<B> {
        &self.store
    }
}
