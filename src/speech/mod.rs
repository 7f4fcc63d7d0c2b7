//! Speech synthesis through the Azure Speech REST API.

mod client;
mod ssml;

use sha2::{Digest, Sha256};

pub use client::{AzureSpeechClient, DEFAULT_OUTPUT_FORMAT, extension_for_format};
pub use ssml::build_ssml;

use crate::consultation::SpeechRequest;

/// Stable file name for a synthesized answer.
///
/// Identical text spoken with the same voice and rate maps to the same name.
pub fn audio_file_name(request: &SpeechRequest<'_>, extension: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.text.as_bytes());
    hasher.update([0]);
    hasher.update(request.voice.as_str().as_bytes());
    hasher.update([0]);
    hasher.update(request.rate.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("answer-{}.{extension}", &digest[..16])
}
