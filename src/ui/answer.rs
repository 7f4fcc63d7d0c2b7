use crate::consultation::{
    AskEvent, AskOutcome, ChatService, ConsultationSession, QuestionInput, SpeechService,
};
use crate::error::SessionError;
use crate::output;

use super::Spinner;

/// Runs an ask, streaming the answer to stdout.
///
/// A spinner covers the wait for the first chunk and the speech call.
pub async fn ask_with_progress<C, S>(
    session: &mut ConsultationSession<C, S>,
    input: &QuestionInput,
) -> Result<AskOutcome, SessionError>
where
    C: ChatService,
    S: SpeechService,
{
    let mut spinner = Some(Spinner::new("Thinking..."));
    let mut mid_line = false;

    let result = session
        .ask(input, |event| match event {
            AskEvent::Chunk(chunk) => {
                spinner = None;
                print!("{chunk}");
                output::flush_stdout();
                mid_line = !chunk.ends_with('\n');
            }
            AskEvent::Speaking => {
                if mid_line {
                    println!();
                    mid_line = false;
                }
                spinner = Some(Spinner::new("Speaking..."));
            }
        })
        .await;

    drop(spinner);
    if mid_line {
        println!();
    }

    result
}
