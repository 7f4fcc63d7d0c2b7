//! Streaming client for OpenAI-compatible chat completion APIs.

mod client;
mod sse_parser;

pub use client::ChatClient;
pub use sse_parser::sse_to_text_stream;

/// Model used when neither the command line nor the config file names one.
pub const DEFAULT_MODEL: &str = "gpt-4o";
