use reqwest::Client;
use serde::Serialize;
use std::borrow::Cow;

use super::sse_parser::sse_to_text_stream;
use crate::consultation::{ChatService, ServiceFuture, TextStream};
use crate::error::SessionError;
use crate::prompt::{PromptMessages, UserMessage};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(Cow<'a, str>),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

fn build_request<'a>(model: &'a str, messages: &'a PromptMessages) -> ChatCompletionRequest<'a> {
    let user_content = match &messages.user {
        UserMessage::Text(text) => MessageContent::Text(Cow::Borrowed(text.as_str())),
        UserMessage::WithImage { text, image_url } => MessageContent::Parts(vec![
            ContentPart::Text {
                text: text.as_str(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image_url.as_str(),
                },
            },
        ]),
    };

    ChatCompletionRequest {
        model,
        messages: vec![
            Message {
                role: "system",
                content: MessageContent::Text(Cow::Borrowed(messages.system.as_str())),
            },
            Message {
                role: "user",
                content: user_content,
            },
        ],
        stream: true,
    }
}

/// Client for `POST {endpoint}/v1/chat/completions` with streamed replies.
pub struct ChatClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ChatClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    pub async fn complete_stream(
        &self,
        model: &str,
        messages: &PromptMessages,
    ) -> Result<TextStream, SessionError> {
        let url = self.url();
        let chat_request = build_request(model, messages);

        tracing::debug!(
            %url,
            model,
            has_image = matches!(messages.user, UserMessage::WithImage { .. }),
            "sending chat completion request"
        );

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request.send().await.map_err(|e| {
            SessionError::ChatService(format!("Failed to connect to API endpoint {url}: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, %body, "chat completion request rejected");
            return Err(SessionError::ChatService(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        Ok(Box::pin(sse_to_text_stream(response.bytes_stream())))
    }
}

impl ChatService for ChatClient {
    fn stream_reply<'a>(
        &'a self,
        model: &'a str,
        messages: &'a PromptMessages,
    ) -> ServiceFuture<'a, Result<TextStream, SessionError>> {
        Box::pin(self.complete_stream(model, messages))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_shape() {
        let messages = PromptMessages {
            system: "system text".to_string(),
            user: UserMessage::Text("분수가 뭐예요?".to_string()),
        };

        let value = serde_json::to_value(build_request("gpt-4o", &messages)).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "gpt-4o",
                "stream": true,
                "messages": [
                    {"role": "system", "content": "system text"},
                    {"role": "user", "content": "분수가 뭐예요?"}
                ]
            })
        );
    }

    #[test]
    fn test_image_request_uses_content_parts() {
        let messages = PromptMessages {
            system: "system text".to_string(),
            user: UserMessage::WithImage {
                text: "이 문제 알려줘".to_string(),
                image_url: "data:image/jpeg;base64,AAAA".to_string(),
            },
        };

        let value = serde_json::to_value(build_request("gpt-4o", &messages)).unwrap();

        assert_eq!(
            value["messages"][1]["content"],
            json!([
                {"type": "text", "text": "이 문제 알려줘"},
                {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,AAAA"}}
            ])
        );
        assert_eq!(value["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = ChatClient::new("https://api.openai.com/".to_string(), None);
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_chat_service_error() {
        let client = ChatClient::new("http://127.0.0.1:9".to_string(), None);
        let messages = PromptMessages {
            system: String::new(),
            user: UserMessage::Text("hi".to_string()),
        };

        let result = client.complete_stream("gpt-4o", &messages).await;
        assert!(matches!(result, Err(SessionError::ChatService(_))));
    }
}
