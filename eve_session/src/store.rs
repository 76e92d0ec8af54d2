//! Typed accessors over a [`SessionBackend`].
//!
//! Reads never fail: an absent, empty, unreadable or malformed field reads
//! as its default. Writes report errors and leave recovery to the caller.

use eve_core::Message;
use tracing::warn;

use crate::backend::{Field, SessionBackend};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: SessionBackend> SessionStore<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    fn read_text(&self, field: Field) -> Option<String> {
        match self.backend.read(field) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!("Failed to read {}: {e}", field.as_str());
                None
            }
        }
    }

    pub fn persona_key(&self) -> Option<String> {
        self.read_text(Field::PersonaKey)
    }

    pub fn set_persona_key(&self, key: &str) -> Result<()> {
        self.backend.write(Field::PersonaKey, key)
    }

    pub fn clear_persona_key(&self) -> Result<()> {
        self.backend.remove(Field::PersonaKey)
    }

    /// Persisted transcript; malformed data reads as empty.
    pub fn transcript(&self) -> Vec<Message> {
        let Some(raw) = self.read_text(Field::Transcript) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding malformed persisted transcript: {e}");
            Vec::new()
        })
    }

    pub fn set_transcript(&self, transcript: &[Message]) -> Result<()> {
        let json = serde_json::to_string(transcript)?;
        self.backend.write(Field::Transcript, &json)
    }

    pub fn clear_transcript(&self) -> Result<()> {
        self.backend.remove(Field::Transcript)
    }

    pub fn name(&self) -> Option<String> {
        self.read_text(Field::UserName)
    }

    pub fn set_name(&self, name: &str) -> Result<()> {
        self.backend.write(Field::UserName, name)
    }

    pub fn clear_name(&self) -> Result<()> {
        self.backend.remove(Field::UserName)
    }
}
