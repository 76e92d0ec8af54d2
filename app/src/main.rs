#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CommandStrategy, InitStrategy, PersonasStrategy, ResetInput,
    ResetStrategy, SessionsStrategy, VersionStrategy,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "eve")]
#[command(about = "Eve, a persona-driven wellness companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with Eve, interactively or with a single message
    Chat {
        /// Session ID to resume (creates new if not provided)
        #[arg(short = 's', long)]
        session: Option<Uuid>,

        /// Persona to start (restarts the conversation)
        #[arg(short = 'p', long)]
        persona: Option<String>,

        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,
    },
    /// List available personas
    Personas,
    /// List stored sessions
    Sessions,
    /// Clear a stored session
    Reset {
        /// Session ID to clear
        #[arg(short = 's', long)]
        session: Uuid,

        /// Remove the session directory instead of emptying it
        #[arg(long)]
        delete: bool,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the conversation, so logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            session,
            persona,
            message,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    session_id: session,
                    persona,
                    message,
                })
                .await
        }
        Commands::Personas => PersonasStrategy.execute(()).await,
        Commands::Sessions => SessionsStrategy.execute(()).await,
        Commands::Reset { session, delete } => {
            ResetStrategy
                .execute(ResetInput {
                    session_id: session,
                    delete,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
