use reqwest::Client;
use std::path::{Path, PathBuf};

use super::ssml::build_ssml;
use crate::consultation::{ServiceFuture, SpeechRequest, SpeechService};
use crate::error::SessionError;
use crate::fs::atomic_write;

pub const DEFAULT_OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

const USER_AGENT: &str = concat!("mentor/", env!("CARGO_PKG_VERSION"));

/// File extension matching an Azure output format name.
pub fn extension_for_format(output_format: &str) -> &'static str {
    let format = output_format.to_ascii_lowercase();
    if format.contains("mp3") {
        "mp3"
    } else if format.starts_with("riff") {
        "wav"
    } else if format.starts_with("ogg") {
        "ogg"
    } else if format.starts_with("webm") {
        "webm"
    } else {
        "audio"
    }
}

/// Client for the Azure Speech text-to-speech REST endpoint.
pub struct AzureSpeechClient {
    client: Client,
    url: String,
    api_key: String,
    output_format: String,
}

impl AzureSpeechClient {
    pub fn new(url: String, api_key: String, output_format: String) -> Self {
        Self {
            client: Client::new(),
            url,
            api_key,
            output_format,
        }
    }

    /// Regional endpoint, e.g. `koreacentral`.
    pub fn endpoint_for_region(region: &str) -> String {
        format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1")
    }

    pub async fn synthesize_to_file(
        &self,
        request: &SpeechRequest<'_>,
        out_path: &Path,
    ) -> Result<PathBuf, SessionError> {
        tracing::debug!(
            url = %self.url,
            voice = %request.voice,
            rate = %request.rate,
            text_len = request.text.len(),
            "sending speech synthesis request"
        );

        let response = self
            .client
            .post(&self.url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .header("User-Agent", USER_AGENT)
            .body(build_ssml(request))
            .send()
            .await
            .map_err(|e| {
                SessionError::SpeechService(format!(
                    "Failed to connect to speech endpoint {}: {e}",
                    self.url
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SessionError::SpeechService(format!(
                "Speech request failed with status {status}: {body}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SessionError::SpeechService(format!("Failed to read audio: {e}")))?;

        if audio.is_empty() {
            return Err(SessionError::SpeechService(
                "Speech service returned no audio".to_string(),
            ));
        }

        atomic_write(out_path, &audio)
            .map_err(|e| SessionError::SpeechService(format!("{e:#}")))?;

        tracing::debug!(path = %out_path.display(), bytes = audio.len(), "audio saved");

        Ok(out_path.to_path_buf())
    }
}

impl SpeechService for AzureSpeechClient {
    fn synthesize<'a>(
        &'a self,
        request: &'a SpeechRequest<'a>,
        out_path: &'a Path,
    ) -> ServiceFuture<'a, Result<PathBuf, SessionError>> {
        Box::pin(self.synthesize_to_file(request, out_path))
    }

    fn audio_extension(&self) -> &'static str {
        extension_for_format(&self.output_format)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::voice::{Gender, Language, resolve_voice};
    use tempfile::TempDir;

    #[test]
    fn test_endpoint_for_region() {
        assert_eq!(
            AzureSpeechClient::endpoint_for_region("koreacentral"),
            "https://koreacentral.tts.speech.microsoft.com/cognitiveservices/v1"
        );
    }

    #[test]
    fn test_extension_for_format() {
        assert_eq!(extension_for_format(DEFAULT_OUTPUT_FORMAT), "mp3");
        assert_eq!(extension_for_format("riff-24khz-16bit-mono-pcm"), "wav");
        assert_eq!(extension_for_format("ogg-48khz-16bit-mono-opus"), "ogg");
        assert_eq!(extension_for_format("webm-24khz-16bit-mono-opus"), "webm");
        assert_eq!(extension_for_format("raw-24khz-16bit-mono-pcm"), "audio");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_speech_service_error() {
        let temp_dir = TempDir::new().unwrap();
        let out_path = temp_dir.path().join("answer.mp3");
        let client = AzureSpeechClient::new(
            "http://127.0.0.1:9/cognitiveservices/v1".to_string(),
            "key".to_string(),
            DEFAULT_OUTPUT_FORMAT.to_string(),
        );
        let request = SpeechRequest {
            text: "안녕",
            language: "ko-KR",
            voice: resolve_voice(Language::KoKr, Gender::Female).unwrap(),
            rate: "+0%".to_string(),
        };

        let result = client.synthesize_to_file(&request, &out_path).await;

        assert!(matches!(result, Err(SessionError::SpeechService(_))));
        assert!(!out_path.exists());
    }
}
