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

//! Per-session key/value persistence.
//!
//! A session is persisted as three independent string fields: the selected
//! persona key, the JSON transcript and the inferred user name. Writes are
//! not transactional across fields.

mod backend;
mod error;
mod file;
mod store;

pub use backend::{Field, MemoryBackend, SessionBackend};
pub use error::StoreError;
pub use file::FileBackend;
pub use store::SessionStore;
