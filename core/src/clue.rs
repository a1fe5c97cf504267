use serde::{Deserialize, Serialize};

/// Valid transitions:
/// - Hidden -> Question
/// - Question -> Answer
///
/// `Answer` is terminal; further activations are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    /// Initial state, neither face is shown
    Hidden,
    /// The question face is shown
    Question,
    /// The answer face is shown
    Answer,
}

impl RevealState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Answer)
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Outcome of activating a clue cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    ShowedQuestion,
    ShowedAnswer,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the view
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            ShowedQuestion => true,
            ShowedAnswer => true,
        }
    }
}

/// A single question/answer pair together with its reveal progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    question: String,
    answer: String,
    reveal: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            reveal: Default::default(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    /// Advances the reveal state machine one step forward.
    ///
    /// The reveal state is the single source of truth for which face a cell
    /// shows; rendering derives from it, never the other way around.
    pub fn activate(&mut self) -> RevealOutcome {
        use RevealState::*;

        match self.reveal {
            Hidden => {
                self.reveal = Question;
                RevealOutcome::ShowedQuestion
            }
            Question => {
                self.reveal = Answer;
                RevealOutcome::ShowedAnswer
            }
            Answer => RevealOutcome::NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_clue_starts_hidden() {
        let clue = Clue::new("2+2", "4");

        assert!(clue.reveal_state().is_initial());
        assert_eq!(clue.question(), "2+2");
        assert_eq!(clue.answer(), "4");
    }

    #[test]
    fn activation_walks_hidden_question_answer() {
        let mut clue = Clue::new("Hamlet Author", "Shakespeare");

        assert_eq!(clue.activate(), RevealOutcome::ShowedQuestion);
        assert_eq!(clue.reveal_state(), RevealState::Question);

        assert_eq!(clue.activate(), RevealOutcome::ShowedAnswer);
        assert_eq!(clue.reveal_state(), RevealState::Answer);
        assert!(clue.reveal_state().is_terminal());
    }

    #[test]
    fn terminal_state_absorbs_further_activations() {
        let mut clue = Clue::new("1+1", "2");
        clue.activate();
        clue.activate();

        for _ in 0..3 {
            let outcome = clue.activate();
            assert_eq!(outcome, RevealOutcome::NoChange);
            assert!(!outcome.has_update());
            assert_eq!(clue.reveal_state(), RevealState::Answer);
        }
    }

    #[test]
    fn only_state_changes_report_an_update() {
        let mut clue = Clue::new("q", "a");

        assert!(clue.activate().has_update());
        assert!(clue.activate().has_update());
        assert!(!clue.activate().has_update());
    }
}
