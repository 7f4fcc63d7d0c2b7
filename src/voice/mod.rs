//! Speech output settings: which voice speaks, and how fast.

mod settings;
mod table;

pub use settings::{
    Gender, Language, MAX_SPEED, MIN_SPEED, SPEED_STEP, VoiceConfig, format_rate, parse_speed,
    validate_speed,
};
pub use table::{VOICES, VoiceEntry, VoiceId, print_voices, resolve_voice};
