use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when `provider.api_key` is empty.
pub const API_KEY_ENV: &str = "EVE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub conversation: ConversationSettings,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Zhipu,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Configured key, or the `EVE_API_KEY` environment variable when blank.
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key_with(&self, env_key: Option<String>) -> anyhow::Result<String> {
        if !self.api_key.trim().is_empty() {
            return Ok(self.api_key.clone());
        }
        env_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("No API key configured: set provider.api_key or {API_KEY_ENV}")
            })
    }
}

/// Smallest window that still holds the opening message and the new turn.
pub const MIN_WINDOW_SIZE: usize = 2;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConversationSettings {
    #[serde(default = "ConversationSettings::default_window_size")]
    pub window_size: usize,
    /// `null` disables the timeout
    #[serde(default = "ConversationSettings::default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            window_size: Self::default_window_size(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl ConversationSettings {
    const fn default_window_size() -> usize {
        6
    }

    const fn default_request_timeout_secs() -> Option<u64> {
        Some(60)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_dir: Option<PathBuf>,
}

const CONFIG_TEMPLATE: &str = r#"{
  "provider": {
    "kind": "gemini",
    "api_key": "",
    "model": "gemini-1.5-flash"
  },
  "conversation": {
    "window_size": 6,
    "request_timeout_secs": 60
  },
  "storage": {}
}"#;

impl Config {
    /// `~/eve`
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("eve"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'eve init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.conversation.window_size < MIN_WINDOW_SIZE {
            anyhow::bail!(
                "conversation.window_size must be at least {MIN_WINDOW_SIZE}, got {}",
                self.conversation.window_size
            );
        }
        Ok(())
    }

    /// Where file-backed sessions live; defaults to `~/eve/sessions`.
    pub fn sessions_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.storage.sessions_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("sessions")),
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::write_template(&config_path)?;
        Ok(config_path)
    }

    /// Write the starter config, refusing to overwrite an existing file.
    pub fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(config_path, CONFIG_TEMPLATE)?;
        tracing::info!("Created config file at: {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn template_parses() {
        let config = Config::parse(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Gemini);
        assert_eq!(config.provider.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(config.conversation, ConversationSettings::default());
        assert!(config.storage.sessions_dir.is_none());
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn minimal_config_uses_defaults() {
        let config = Config::parse(r#"{ "provider": { "kind": "zhipu", "api_key": "k" } }"#).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Zhipu);
        assert_eq!(config.conversation.window_size, 6);
        assert_eq!(config.conversation.request_timeout_secs, Some(60));
        assert_eq!(config.provider.resolve_api_key().unwrap(), "k");
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn null_timeout_disables_it() {
        let config = Config::parse(
            r#"{ "provider": { "kind": "gemini" }, "conversation": { "request_timeout_secs": null } }"#,
        )
        .unwrap();
        assert_eq!(config.conversation.request_timeout_secs, None);
        assert_eq!(config.conversation.window_size, 6);
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn template_key_defers_to_environment() {
        let config = Config::parse(CONFIG_TEMPLATE).unwrap();
        assert!(config.provider.api_key.is_empty());

        let key = config
            .provider
            .resolve_api_key_with(Some("real-key-from-env".to_string()))
            .unwrap();
        assert_eq!(key, "real-key-from-env");
        assert!(config.provider.resolve_api_key_with(None).is_err());
        assert!(config.provider.resolve_api_key_with(Some("  ".to_string())).is_err());
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn configured_key_wins_over_environment() {
        let config = Config::parse(r#"{ "provider": { "kind": "gemini", "api_key": "file-key" } }"#)
            .unwrap();
        let key = config
            .provider
            .resolve_api_key_with(Some("env-key".to_string()))
            .unwrap();
        assert_eq!(key, "file-key");
    }

    #[test]
    fn window_too_small_to_hold_a_turn_is_rejected() {
        for size in [0, 1] {
            let content = format!(
                r#"{{ "provider": {{ "kind": "gemini" }}, "conversation": {{ "window_size": {size} }} }}"#
            );
            assert!(Config::parse(&content).is_err(), "window_size {size} accepted");
        }
        let content = r#"{ "provider": { "kind": "gemini" }, "conversation": { "window_size": 2 } }"#;
        assert!(Config::parse(content).is_ok());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Config::parse(r#"{ "provider": { "kind": "carrier-pigeon" } }"#).is_err());
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn explicit_sessions_dir_wins() {
        let config = Config::parse(
            r#"{ "provider": { "kind": "gemini" }, "storage": { "sessions_dir": "/tmp/eve-sessions" } }"#,
        )
        .unwrap();
        assert_eq!(config.sessions_dir().unwrap(), PathBuf::from("/tmp/eve-sessions"));
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn template_is_not_overwritten() {
        let dir = std::env::temp_dir().join(format!("eve-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        let _ = std::fs::remove_file(&path);

        Config::write_template(&path).unwrap();
        assert!(Config::write_template(&path).is_err());
        assert!(Config::load_from(&path).is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
