use crate::profile::LearnerProfile;

/// One answered question, with the profile as it was when asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    question: String,
    answer: String,
    profile: LearnerProfile,
}

impl Exchange {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub const fn profile(&self) -> &LearnerProfile {
        &self.profile
    }
}

/// Append-only record of the session's exchanges, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<Exchange>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an exchange. Earlier entries are never touched.
    pub fn record(
        &mut self,
        profile: &LearnerProfile,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> &Self {
        self.entries.push(Exchange {
            question: question.into(),
            answer: answer.into(),
            profile: profile.clone(),
        });
        self
    }

    /// `(question, answer)` pairs in the order they were asked.
    ///
    /// The iterator is lazy and can be cloned to walk the log again.
    pub fn render(&self) -> impl Iterator<Item = (&str, &str)> + Clone + ExactSizeIterator + '_ {
        self.entries
            .iter()
            .map(|e| (e.question.as_str(), e.answer.as_str()))
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Exchange> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
