use eve_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates the starter configuration file at `~/eve/config.json`; an
/// existing file is left untouched.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::create_config()?;
        println!("Created config at {}", path.display());
        println!("Set provider.api_key (or EVE_API_KEY) before chatting.");
        Ok(())
    }
}
