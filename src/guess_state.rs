use std::cell::RefCell;
use std::rc::Rc;

#[derive(Hash, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GuessState {
    Unanswered,
    Correct,
    Incorrect,
}

pub type SharedGuessState = Rc<RefCell<GuessState>>;

// A post starts out correct when the server already marks it solved, or when
// a guess for it was recorded on this device. Incorrect is never restored on
// load; it only appears after a rejected submission.
pub fn resolve_guess_state(server_solved: Option<bool>, has_local_record: bool) -> GuessState {
    if server_solved == Some(true) || has_local_record {
        GuessState::Correct
    } else {
        GuessState::Unanswered
    }
}

pub fn shared_guess_state(initial: GuessState) -> SharedGuessState {
    Rc::new(RefCell::new(initial))
}

pub fn card_class_name(state: GuessState) -> &'static str {
    match state {
        GuessState::Correct => "post-card-correct post-card",
        GuessState::Incorrect => "post-card-incorrect post-card",
        GuessState::Unanswered => "post-card",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_posts_start_correct() {
        assert_eq!(resolve_guess_state(Some(true), false), GuessState::Correct);
        assert_eq!(resolve_guess_state(Some(true), true), GuessState::Correct);
    }

    #[test]
    fn recorded_guess_wins_over_an_unsolved_flag() {
        // a device that guessed right while anonymous keeps the post correct
        // after a reload, even when the server does not know about it
        assert_eq!(resolve_guess_state(Some(false), true), GuessState::Correct);
        assert_eq!(resolve_guess_state(None, true), GuessState::Correct);
    }

    #[test]
    fn unsolved_posts_without_record_start_unanswered() {
        assert_eq!(resolve_guess_state(None, false), GuessState::Unanswered);
        assert_eq!(resolve_guess_state(Some(false), false), GuessState::Unanswered);
    }

    #[test]
    fn card_class_follows_state() {
        assert_eq!(card_class_name(GuessState::Unanswered), "post-card");
        assert_eq!(
            card_class_name(GuessState::Correct),
            "post-card-correct post-card"
        );
        assert_eq!(
            card_class_name(GuessState::Incorrect),
            "post-card-incorrect post-card"
        );
    }
}
