//! Builds the messages sent to the mentor model.

use crate::profile::LearnerProfile;

pub const SYSTEM_PROMPT_TEMPLATE: &str = "너는 {level} 학습자의 질문에 맞는 학습 전략과 조언을 제공하는 초개인화 AI 멘토야. \
     관심 과목은 {subjects}야.";

/// An image the learner attached, already base64-encoded by the caller.
///
/// The payload is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub base64_data: String,
}

impl ImageAttachment {
    pub fn new(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64_data: base64_data.into(),
        }
    }

    /// `data:` URL the chat API accepts as an image reference.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// The learner's turn: plain text, or text plus an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMessage {
    Text(String),
    WithImage { text: String, image_url: String },
}

impl UserMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::WithImage { text, .. } => text,
        }
    }
}

/// System instruction followed by the learner's question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessages {
    pub system: String,
    pub user: UserMessage,
}

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(profile: &LearnerProfile) -> String {
    // {level} and {subjects} are placeholders for string replacement, not format arguments
    let mut prompt = SYSTEM_PROMPT_TEMPLATE
        .replace("{level}", profile.level.label())
        .replace("{subjects}", &profile.subject_labels());

    let name = profile.name.trim();
    if name.is_empty() {
        prompt.push_str(&format!(" 학습자의 오늘 기분은 '{}'야.", profile.mood.label()));
    } else {
        prompt.push_str(&format!(
            " 학습자의 이름은 {name}이고, 오늘 기분은 '{}'야.",
            profile.mood.label()
        ));
    }

    prompt
}

pub fn compose_prompt(
    profile: &LearnerProfile,
    question: &str,
    image: Option<&ImageAttachment>,
) -> PromptMessages {
    let user = image.map_or_else(
        || UserMessage::Text(question.to_string()),
        |image| UserMessage::WithImage {
            text: question.to_string(),
            image_url: image.data_url(),
        },
    );

    PromptMessages {
        system: build_system_prompt(profile),
        user,
    }
}
