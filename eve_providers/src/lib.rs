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

mod gemini;
mod retry;
mod zhipu;

pub use gemini::{GEMINI_DEFAULT_MODEL, GeminiProvider};
pub use retry::{RetryPolicy, retry_with_backoff};
pub use zhipu::{ZHIPU_DEFAULT_MODEL, ZhipuProvider};
