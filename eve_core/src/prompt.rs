//! Outbound prompt rendering.

use crate::{Message, Role};

/// Name the assistant speaks as, both in the prompt and in transcript lines.
pub const ASSISTANT_NAME: &str = "Eve";

/// Title used when no persona is active.
pub const FALLBACK_TOPIC: &str = "General";

const PROMPT_HEADER: &str = "You are Eve, a warm, concise, and friendly AI assistant for the SheSync platform—a site for women and girls' health, wellness, and support.
You answer women's health, wellness, emotional support, personal development, periods, puberty, and related questions.
If the user asks about unrelated topics (like rocket science), politely decline and gently bring the conversation back to \"{topic}\".
If the user asks about their name, or says \"my name is...\", you can recognize, use, or recall their name, but don't overuse it. It's okay to answer what's my name.
Your answers should be friendly, supportive, concise, and not repetitive. Do not repeat the user's name in every reply. Never refuse basic conversational questions (like \"what's my name?\")—answer them like a good human friend would, but do not indulge in off-topic conversations.
Do not answer personal, technical, or political questions unrelated to women health and welfare—politely steer back to women's health.
Always stay positive and non-judgmental.

Recent conversation:
";

/// Render one window entry as a `User:` / `Eve:` line.
#[must_use]
pub fn render_line(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "User",
        Role::Assistant => ASSISTANT_NAME,
    };
    format!("{speaker}: {}", message.content)
}

/// Render the full prompt for a persona title and a context window.
#[must_use]
pub fn render_prompt(topic: &str, window: &[Message]) -> String {
    let lines = window.iter().map(render_line).collect::<Vec<_>>().join("\n");
    format!(
        "{}{lines}\n{ASSISTANT_NAME}:",
        PROMPT_HEADER.replace("{topic}", topic)
    )
}
