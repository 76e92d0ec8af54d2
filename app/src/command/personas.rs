use eve_core::PersonaRegistry;

/// Strategy for listing the built-in personas.
#[derive(Debug, Clone, Copy)]
pub struct PersonasStrategy;

impl super::CommandStrategy for PersonasStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        for persona in PersonaRegistry::builtin().list() {
            println!("{:<10} {}", persona.key, persona.title);
            println!("{:<10} {}", "", persona.description);
        }
        Ok(())
    }
}
