//! Catalog of conversation topics.
//!
//! A persona is fixed at process start: it names the topic the assistant
//! steers back to and carries the intro line that opens every transcript.

use std::collections::HashSet;
use thiserror::Error;

/// A selectable conversation topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Unique lookup key
    pub key: String,
    /// Display title, also embedded in the prompt
    pub title: String,
    /// One-line description for pickers
    pub description: String,
    /// First assistant message after selection
    pub intro_message: String,
}

impl Persona {
    #[must_use]
    pub fn new(key: &str, title: &str, description: &str, intro_message: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            intro_message: intro_message.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate persona key: {0}")]
    DuplicateKey(String),

    #[error("Persona catalog is empty")]
    Empty,
}

/// Ordered, immutable persona catalog.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Build a registry from a custom catalog.
    ///
    /// Keys must be unique and the catalog must not be empty.
    pub fn new(personas: Vec<Persona>) -> Result<Self, RegistryError> {
        if personas.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if !seen.insert(persona.key.as_str()) {
                return Err(RegistryError::DuplicateKey(persona.key.clone()));
            }
        }

        Ok(Self { personas })
    }

    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            personas: vec![
                Persona::new(
                    "health",
                    "Health & Wellness",
                    "Physical and mental wellbeing support",
                    "You're in the Health & Wellness tab. Feel free to ask about periods, cycle tracking, body changes, or mental health.",
                ),
                Persona::new(
                    "support",
                    "Supportive Chat",
                    "Friendly conversations and emotional support",
                    "You're in Supportive Chat. Need to talk, vent, or share how you feel? I'm here for emotional support.",
                ),
                Persona::new(
                    "learning",
                    "Learning & Growth",
                    "Educational support and personal development",
                    "You're in Learning & Growth. Ask about personal development, study tips, or learning about your body and mind.",
                ),
            ],
        }
    }

    #[must_use]
    pub fn list(&self) -> &[Persona] {
        &self.personas
    }

    /// Find a persona by key. Unknown keys yield `None`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.key == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
