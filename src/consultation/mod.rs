//! The consultation session: question sources, the exchange log, and the ask pipeline.

mod history;
mod ports;
mod question;
mod session;

pub use history::{ConversationLog, Exchange};
pub use ports::{ChatService, ServiceFuture, SpeechRequest, SpeechService, TextStream};
pub use question::{QuestionInput, QuestionSource};
pub use session::{AskEvent, AskOutcome, ConsultationSession};
