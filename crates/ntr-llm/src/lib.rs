//! Chat-completion client for the NTR analyzer
//!
//! Wraps an OpenAI-compatible `/chat/completions` endpoint in JSON mode.
//! The pipeline only ever needs one interaction shape — send a single user
//! prompt, get back a JSON object — so that is the whole `ChatClient`
//! contract. Alternate backends (and test doubles) implement the trait.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod error;

pub use client::{ChatClient, OpenAiChatClient, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use error::ChatError;
