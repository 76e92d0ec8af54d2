use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{Field, SessionBackend};
use crate::error::{Result, StoreError};

/// Directory-per-session backend with one file per field.
///
/// Layout: `<root>/<session id>/<field name>`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    id: Uuid,
    dir: PathBuf,
}

impl FileBackend {
    /// Open (or create) the session directory for `id` under `root`.
    pub fn open(root: &Path, id: Uuid) -> Result<Self> {
        let dir = root.join(id.to_string());
        fs::create_dir_all(&dir)?;
        info!("Opened session {id} at {}", dir.display());
        Ok(Self { id, dir })
    }

    /// Start a fresh session with a new time-ordered id.
    pub fn create(root: &Path) -> Result<Self> {
        Self::open(root, Uuid::now_v7())
    }

    /// Session ids stored under `root`, oldest first.
    pub fn list(root: &Path) -> Result<Vec<Uuid>> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| Uuid::parse_str(name).ok())
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Remove the whole session directory.
    pub fn destroy(self) -> Result<()> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!("Destroyed session {}", self.id);
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, field: Field) -> PathBuf {
        self.dir.join(field.as_str())
    }
}

impl SessionBackend for FileBackend {
    fn read(&self, field: Field) -> Result<Option<String>> {
        match fs::read_to_string(self.path(field)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, field: Field, value: &str) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(StoreError::Unavailable(self.dir.display().to_string()));
        }
        fs::write(self.path(field), value)?;
        debug!("Wrote {} for session {}", field.as_str(), self.id);
        Ok(())
    }

    fn remove(&self, field: Field) -> Result<()> {
        match fs::remove_file(self.path(field)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root() -> PathBuf {
        std::env::temp_dir().join(format!("eve-session-test-{}", Uuid::now_v7()))
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn fields_round_trip_through_files() {
        let root = scratch_root();
        let backend = FileBackend::create(&root).unwrap();

        assert_eq!(backend.read(Field::UserName).unwrap(), None);
        backend.write(Field::UserName, "Maya").unwrap();
        assert_eq!(backend.read(Field::UserName).unwrap().as_deref(), Some("Maya"));

        backend.remove(Field::UserName).unwrap();
        backend.remove(Field::UserName).unwrap();
        assert_eq!(backend.read(Field::UserName).unwrap(), None);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn reopening_sees_previous_writes() {
        let root = scratch_root();
        let first = FileBackend::create(&root).unwrap();
        first.write(Field::PersonaKey, "support").unwrap();

        let again = FileBackend::open(&root, first.id()).unwrap();
        assert_eq!(again.read(Field::PersonaKey).unwrap().as_deref(), Some("support"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn list_and_destroy() {
        let root = scratch_root();
        assert!(FileBackend::list(&root).unwrap().is_empty());

        let a = FileBackend::create(&root).unwrap();
        let b = FileBackend::create(&root).unwrap();
        fs::write(root.join("stray.txt"), "ignored").unwrap();

        assert_eq!(FileBackend::list(&root).unwrap(), vec![a.id(), b.id()]);

        let a_id = a.id();
        a.destroy().unwrap();
        let remaining = FileBackend::list(&root).unwrap();
        assert!(!remaining.contains(&a_id));
        assert_eq!(remaining, vec![b.id()]);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn write_after_destroy_is_unavailable() {
        let root = scratch_root();
        let backend = FileBackend::create(&root).unwrap();
        let handle = backend.clone();
        backend.destroy().unwrap();

        let err = handle.write(Field::Transcript, "[]").unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        let _ = fs::remove_dir_all(&root);
    }
}
