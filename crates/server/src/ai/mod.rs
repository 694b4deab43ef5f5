//! Smart replies powered by an OpenAI-compatible chat-completion API

pub mod client;

pub use client::{CompletionClient, CompletionError};

/// Shown to the user whenever a smart reply cannot be produced
pub const SMART_REPLY_APOLOGY: &str =
    "Sorry, I'm having trouble accessing smart replies right now.";
