use eve_config::Config;
use eve_session::{FileBackend, SessionStore};

/// Strategy for listing stored sessions with their persona and size.
#[derive(Debug, Clone, Copy)]
pub struct SessionsStrategy;

impl super::CommandStrategy for SessionsStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let root = Config::load()?.sessions_dir()?;
        let ids = FileBackend::list(&root)?;

        if ids.is_empty() {
            println!("No sessions in {}", root.display());
            return Ok(());
        }

        for id in ids {
            let store = SessionStore::new(FileBackend::open(&root, id)?);
            println!(
                "{id}  persona={:<9} messages={:<4} name={}",
                store.persona_key().unwrap_or_else(|| "-".to_string()),
                store.transcript().len(),
                store.name().unwrap_or_else(|| "-".to_string()),
            );
        }
        Ok(())
    }
}
