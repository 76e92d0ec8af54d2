//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use eve_config::{Config, ConversationSettings, ProviderConfig, ProviderKind};
use eve_conversation::ConversationConfig;
use eve_core::LLMProvider;
use eve_providers::{GeminiProvider, ZhipuProvider};
use eve_session::FileBackend;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

mod chat;
mod init;
mod personas;
mod reset;
mod sessions;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use init::InitStrategy;
pub use personas::PersonasStrategy;
pub use reset::{ResetInput, ResetStrategy};
pub use sessions::SessionsStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// adding a command only requires implementing this trait.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Components shared by commands that talk to the model.
pub struct CommonComponents {
    pub config: Config,
    pub provider: Arc<dyn LLMProvider>,
    pub sessions_dir: PathBuf,
}

/// Load config and build the configured provider.
pub fn init_common_components() -> anyhow::Result<CommonComponents> {
    let config = Config::load()?;
    info!("Loaded config from {}", Config::config_path()?.display());

    let provider = build_provider(&config.provider)?;
    let sessions_dir = config.sessions_dir()?;
    info!("Sessions directory: {}", sessions_dir.display());

    Ok(CommonComponents {
        config,
        provider,
        sessions_dir,
    })
}

fn build_provider(config: &ProviderConfig) -> anyhow::Result<Arc<dyn LLMProvider>> {
    let api_key = config.resolve_api_key()?;

    let provider: Arc<dyn LLMProvider> = match config.kind {
        ProviderKind::Gemini => {
            let mut provider = GeminiProvider::new(api_key);
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Arc::new(provider)
        }
        ProviderKind::Zhipu => {
            let mut provider = ZhipuProvider::new(api_key);
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Arc::new(provider)
        }
    };

    Ok(provider)
}

/// Resume the session `id`, or start a new one when no id is given.
pub fn open_session(root: &Path, id: Option<Uuid>) -> anyhow::Result<FileBackend> {
    match id {
        Some(id) => open_existing_session(root, id),
        None => Ok(FileBackend::create(root)?),
    }
}

/// Open a stored session without creating one for an unknown id.
pub fn open_existing_session(root: &Path, id: Uuid) -> anyhow::Result<FileBackend> {
    if !FileBackend::list(root)?.contains(&id) {
        anyhow::bail!(
            "No session {id} in {}. Run 'eve sessions' to list them.",
            root.display()
        );
    }
    Ok(FileBackend::open(root, id)?)
}

/// Map the persisted settings onto the engine configuration.
pub fn build_conversation_config(settings: &ConversationSettings) -> ConversationConfig {
    ConversationConfig::default()
        .with_window_size(settings.window_size)
        .with_request_timeout(settings.request_timeout_secs.map(Duration::from_secs))
}
