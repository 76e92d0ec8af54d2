use eve_config::Config;
use eve_session::SessionStore;
use uuid::Uuid;

use super::open_existing_session;

/// Input parameters for the Reset command strategy.
#[derive(Debug, Clone, Copy)]
pub struct ResetInput {
    pub session_id: Uuid,
    /// Remove the directory rather than clearing its fields
    pub delete: bool,
}

/// Strategy for clearing a stored session without starting the model.
#[derive(Debug, Clone, Copy)]
pub struct ResetStrategy;

impl super::CommandStrategy for ResetStrategy {
    type Input = ResetInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let root = Config::load()?.sessions_dir()?;

        let backend = open_existing_session(&root, input.session_id)?;
        if input.delete {
            backend.destroy()?;
            println!("Deleted session {}", input.session_id);
            return Ok(());
        }

        let store = SessionStore::new(backend);
        store.clear_persona_key()?;
        store.clear_transcript()?;
        store.clear_name()?;
        println!("Cleared session {}", input.session_id);
        Ok(())
    }
}
