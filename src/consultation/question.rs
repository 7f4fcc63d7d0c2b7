use crate::error::SessionError;
use crate::prompt::ImageAttachment;

/// Which channel a question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Transcript,
    Text,
}

/// Everything the learner supplied for one ask.
///
/// A microphone transcript wins over typed text; an image rides along with
/// whichever text is used.
#[derive(Debug, Clone, Default)]
pub struct QuestionInput {
    pub transcript: Option<String>,
    pub text: Option<String>,
    pub image: Option<ImageAttachment>,
}

impl QuestionInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }

    /// Picks the question text, trimmed. Blank strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingInput`] when neither source has text.
    pub fn resolve(&self) -> Result<(QuestionSource, &str), SessionError> {
        non_blank(self.transcript.as_deref())
            .map(|q| (QuestionSource::Transcript, q))
            .or_else(|| non_blank(self.text.as_deref()).map(|q| (QuestionSource::Text, q)))
            .ok_or(SessionError::MissingInput)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_takes_priority() {
        let input = QuestionInput::text("anything").with_transcript("수학이 어려워요");
        assert_eq!(
            input.resolve().unwrap(),
            (QuestionSource::Transcript, "수학이 어려워요")
        );
    }

    #[test]
    fn test_text_used_without_transcript() {
        let input = QuestionInput::text("분수가 뭐예요?");
        assert_eq!(input.resolve().unwrap(), (QuestionSource::Text, "분수가 뭐예요?"));
    }

    #[test]
    fn test_blank_transcript_falls_back_to_text() {
        let input = QuestionInput::text("질문").with_transcript("   ");
        assert_eq!(input.resolve().unwrap(), (QuestionSource::Text, "질문"));
    }

    #[test]
    fn test_question_is_trimmed() {
        let input = QuestionInput::default().with_transcript("  수학이 어려워요\n");
        assert_eq!(
            input.resolve().unwrap(),
            (QuestionSource::Transcript, "수학이 어려워요")
        );
    }

    #[test]
    fn test_no_question_is_missing_input() {
        assert!(matches!(
            QuestionInput::default().resolve(),
            Err(SessionError::MissingInput)
        ));
        assert!(matches!(
            QuestionInput::text("\n\t").resolve(),
            Err(SessionError::MissingInput)
        ));
    }

    #[test]
    fn test_image_alone_is_missing_input() {
        let input =
            QuestionInput::default().with_image(ImageAttachment::new("image/png", "AAAA"));
        assert!(matches!(input.resolve(), Err(SessionError::MissingInput)));
    }
}
