//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use crate::error::SessionError;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
}

/// One meaningful line of the event stream.
#[derive(Debug, PartialEq, Eq)]
enum SseEvent {
    Content(String),
    Error(String),
    Done,
}

/// Converts a raw SSE byte stream into a stream of reply text chunks.
///
/// Transport failures and in-band `error` events end the stream with a
/// [`SessionError::ChatService`].
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String, SessionError>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Raw bytes: a chunk may end inside a multi-byte character.
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(SessionError::ChatService(format!("Stream error: {e}")));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();

                match parse_sse_line(String::from_utf8_lossy(&line).trim()) {
                    Some(SseEvent::Content(content)) => yield Ok(content),
                    Some(SseEvent::Error(message)) => {
                        yield Err(SessionError::ChatService(message));
                        return;
                    }
                    Some(SseEvent::Done) => return,
                    None => {}
                }
            }
        }

        // A final event without a trailing newline.
        match parse_sse_line(String::from_utf8_lossy(&buffer).trim()) {
            Some(SseEvent::Content(content)) => yield Ok(content),
            Some(SseEvent::Error(message)) => yield Err(SessionError::ChatService(message)),
            Some(SseEvent::Done) | None => {}
        }
    }
}

/// Parses a single trimmed SSE line.
///
/// Returns `None` for comments, blank lines, unparseable data and deltas
/// without text.
fn parse_sse_line(line: &str) -> Option<SseEvent> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }

    let response = serde_json::from_str::<StreamResponse>(data).ok()?;

    if let Some(error) = response.error {
        return Some(SseEvent::Error(error.message));
    }

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .filter(|c| !c.is_empty())
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(SseEvent::Content(content))
    }
}
