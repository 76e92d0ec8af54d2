#![warn(
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

//! Persona-scoped conversations with a text-completion model.
//!
//! # Key Features
//! - Persona selection restarting the transcript with the persona intro
//! - Bounded context window sent with every prompt
//! - Write-once first-name inference and name-echo stripping
//! - At most one model call in flight; failures become a fallback reply
//! - Every change mirrored into a [`eve_session::SessionStore`]

mod engine;
mod error;
mod session;
mod window;

pub use engine::{
    ATTACHMENT_PREFIX, ConversationConfig, ConversationEngine, FALLBACK_REPLY, IgnoreReason,
    TurnOutcome,
};
pub use error::ConversationError;
pub use session::ConversationSession;
pub use window::{ContextWindow, DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE, WindowConfig};
