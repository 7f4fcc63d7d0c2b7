//! # mentor - Personal AI Learning Mentor
//!
//! `mentor` answers a learner's study questions with advice tuned to their
//! school level and subjects, then speaks the answer out loud.
//!
//! ## Features
//!
//! - **Streaming answers**: See the mentor's reply as it arrives
//! - **Spoken replies**: Each answer is synthesized with a voice picked from
//!   the learner's language and gender settings
//! - **Transcripts and images**: Ask from a speech transcript, and attach a
//!   worksheet photo to any question
//! - **Interactive mode**: A consultation session with `mentor chat`
//!
//! ## Quick Start
//!
//! ```bash
//! # Ask one question
//! mentor ask "분수가 뭐예요?" --level elementary --subjects math
//!
//! # Ask from a transcript with a worksheet photo
//! mentor ask --transcript question.txt --image worksheet.png
//!
//! # Interactive consultation
//! mentor chat
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/mentor/config.toml`:
//!
//! ```toml
//! [mentor]
//! provider = "openai"
//! model = "gpt-4o"
//! level = "elementary"
//! subjects = ["math", "science"]
//!
//! [voice]
//! lang = "ko-KR"
//! gender = "female"
//! speed = 10
//!
//! [speech]
//! region = "koreacentral"
//! ```

/// Interactive chat mode for consultation sessions.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// The ask pipeline, conversation log and service ports.
pub mod consultation;

/// Error taxonomy and exit codes.
pub mod error;

/// File system utilities.
pub mod fs;

/// Transcript and image input.
pub mod input;

/// Streaming chat client for OpenAI-compatible APIs.
pub mod llm;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration and audio output.
pub mod paths;

/// Learner profile types.
pub mod profile;

/// Prompt composition.
pub mod prompt;

/// Speech synthesis client.
pub mod speech;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// Voice table and speech rate settings.
pub mod voice;
