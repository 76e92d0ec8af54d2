//! Persona-scoped conversation command with a persistent session.

use eve_conversation::{ConversationEngine, IgnoreReason, TurnOutcome};
use eve_core::{LLMProvider, PersonaRegistry, Role};
use eve_session::{FileBackend, SessionStore};
use std::io::Write;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::{build_conversation_config, init_common_components, open_session};

type Engine = ConversationEngine<Arc<dyn LLMProvider>, FileBackend>;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Session ID to resume (creates new if not provided)
    pub session_id: Option<Uuid>,
    /// Persona to select before the first message
    pub persona: Option<String>,
    /// Single message to send (non-interactive mode)
    pub message: Option<String>,
}

/// Strategy for executing the Chat command.
///
/// Opens or creates a file-backed session, optionally selects a persona,
/// then either sends one message or runs the interactive loop.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;

        let backend = open_session(&common.sessions_dir, input.session_id)?;
        let session_id = backend.id();
        eprintln!("Session: {session_id}");

        let engine = ConversationEngine::new(
            common.provider,
            SessionStore::new(backend),
            PersonaRegistry::builtin(),
            build_conversation_config(&common.config.conversation),
        );

        if let Some(key) = input.persona {
            if !engine.select_persona(&key) {
                anyhow::bail!("Unknown persona: {key}. Run 'eve personas' to list them.");
            }
        }

        if let Some(msg) = input.message {
            let outcome = engine.submit_user_message(&msg).await;
            report(&outcome);
            if let Some(reply) = outcome.reply() {
                println!("{reply}");
            }
        } else {
            run_interactive(&engine).await?;
            info!(
                "Conversation {session_id} ended: {} messages",
                engine.transcript().len()
            );
        }

        Ok(())
    }
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum ChatLine<'a> {
    Exit,
    Help,
    Personas,
    Persona(&'a str),
    Attach(&'a str),
    Reset,
    Say(&'a str),
    Unknown(&'a str),
}

impl<'a> ChatLine<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return Self::Say(line);
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, arg)| (name, arg.trim()));

        match (name, arg) {
            ("exit" | "quit", _) => Self::Exit,
            ("help", _) => Self::Help,
            ("personas", _) => Self::Personas,
            ("persona", key) if !key.is_empty() => Self::Persona(key),
            ("attach", file) if !file.is_empty() => Self::Attach(file),
            ("reset", _) => Self::Reset,
            _ => Self::Unknown(line),
        }
    }
}

const HELP: &str = "\
Commands:
  /personas        list personas
  /persona KEY     start a conversation with a persona
  /attach NAME     record an uploaded file
  /reset           clear the conversation
  /exit            end the session";

async fn run_interactive(engine: &Engine) -> anyhow::Result<()> {
    println!("=== Eve ===");
    match engine.active_persona() {
        Some(persona) => println!("Topic: {}", persona.title),
        None => println!("No persona selected. Type /personas to choose one."),
    }
    println!("Type /help for commands.\n");

    for message in engine.transcript() {
        print_message(message.role, &message.content);
    }

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match ChatLine::parse(&input) {
            ChatLine::Exit => break,
            ChatLine::Help => println!("{HELP}"),
            ChatLine::Personas => {
                for persona in engine.personas().list() {
                    println!("  {:<10} {}", persona.key, persona.title);
                }
            }
            ChatLine::Persona(key) => {
                if engine.select_persona(key) {
                    if let Some(intro) = engine.transcript().last() {
                        print_message(intro.role, &intro.content);
                    }
                } else {
                    eprintln!("Unknown persona: {key}");
                }
            }
            ChatLine::Attach(file) => {
                if engine.attach_file(file) {
                    println!("Attached {file}");
                }
            }
            ChatLine::Reset => {
                engine.reset();
                println!("Conversation cleared.");
            }
            ChatLine::Say(text) => {
                let outcome = engine.submit_user_message(text).await;
                report(&outcome);
                if let Some(reply) = outcome.reply() {
                    print_message(Role::Assistant, reply);
                }
            }
            ChatLine::Unknown(line) => eprintln!("Unknown command: {line} (try /help)"),
        }
    }

    Ok(())
}

fn print_message(role: Role, content: &str) {
    match role {
        Role::User => println!("You: {content}"),
        Role::Assistant => println!("\nEve: {content}\n"),
    }
}

fn report(outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::Recovered { error } => eprintln!("Error: {error}"),
        TurnOutcome::Ignored(IgnoreReason::Busy) => eprintln!("Still waiting for a reply."),
        TurnOutcome::Discarded => eprintln!("Reply dropped: the conversation was restarted."),
        TurnOutcome::Ignored(IgnoreReason::EmptyInput) | TurnOutcome::Answered { .. } => {}
    }
}
