use thiserror::Error;

use crate::connection::{Api, ApiError};
use crate::graphql::AnswerOutcome;
use crate::guess_state::{GuessState, SharedGuessState};
use crate::session::AuthSession;
use crate::storage::{GuessStore, StorageError};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("submitting the guess failed: {0}")]
    Answer(#[from] ApiError),
    // the server accepted the guess, so the correct state stands; only the
    // device record is missing
    #[error("the guess was accepted but could not be recorded: {0}")]
    Record(#[from] StorageError),
}

// Sends a guess for one post and moves its state to the server's verdict.
// The state and the store are only touched once a well-formed reply is in:
// a failed request leaves the post exactly as it was.
pub async fn submit_guess<A>(
    api: &A,
    session: &AuthSession,
    store: &dyn GuessStore,
    state: &SharedGuessState,
    post_id: &str,
    guess: &str,
) -> Result<GuessState, SubmitError>
where
    A: Api + ?Sized,
{
    let outcome = api.submit_answer(post_id, guess).await?;

    match outcome {
        AnswerOutcome::Rejected => {
            *state.borrow_mut() = GuessState::Incorrect;

            Ok(GuessState::Incorrect)
        }
        AnswerOutcome::Accepted => {
            *state.borrow_mut() = GuessState::Correct;

            // signed-in viewers are tracked by the server, everyone else
            // keeps the accepted guess on the device
            if !session.is_authenticated() {
                store.record_guess(post_id, guess)?;
            }

            Ok(GuessState::Correct)
        }
    }
}
