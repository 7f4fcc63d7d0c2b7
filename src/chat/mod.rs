//! Interactive consultation mode.
//!
//! Provides a REPL-style interface with slash commands for the learner
//! profile and voice settings.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;

/// Terminal output for chat mode and the one-shot ask.
pub mod ui;

pub use session::ChatSession;
pub use ui::ProviderInfo;
