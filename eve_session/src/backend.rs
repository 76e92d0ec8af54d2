use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;

/// One independently addressable persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PersonaKey,
    Transcript,
    UserName,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::PersonaKey, Self::Transcript, Self::UserName];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersonaKey => "persona_key",
            Self::Transcript => "transcript",
            Self::UserName => "user_name",
        }
    }
}

/// Raw string storage for one session.
pub trait SessionBackend: Send + Sync {
    fn read(&self, field: Field) -> Result<Option<String>>;
    fn write(&self, field: Field, value: &str) -> Result<()>;
    fn remove(&self, field: Field) -> Result<()>;
}

impl<T: SessionBackend + ?Sized> SessionBackend for Arc<T> {
    fn read(&self, field: Field) -> Result<Option<String>> {
        (**self).read(field)
    }

    fn write(&self, field: Field, value: &str) -> Result<()> {
        (**self).write(field, value)
    }

    fn remove(&self, field: Field) -> Result<()> {
        (**self).remove(field)
    }
}

/// In-process backend; state lives as long as the value.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    fields: Mutex<HashMap<Field, String>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fields(&self) -> MutexGuard<'_, HashMap<Field, String>> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raw persisted value, bypassing typed decoding.
    #[must_use]
    pub fn raw(&self, field: Field) -> Option<String> {
        self.fields().get(&field).cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

impl SessionBackend for MemoryBackend {
    fn read(&self, field: Field) -> Result<Option<String>> {
        Ok(self.raw(field))
    }

    fn write(&self, field: Field, value: &str) -> Result<()> {
        self.fields().insert(field, value.to_string());
        Ok(())
    }

    fn remove(&self, field: Field) -> Result<()> {
        self.fields().remove(&field);
        Ok(())
    }
}
