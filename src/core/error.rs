//! Error types for rejected player actions.
//!
//! None of these are fatal: every error leaves the game exactly as it was.

use super::controller::Screen;
use thiserror::Error;

/// An answer that could not be scored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("Please enter an answer")]
    Empty,

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("There is no question waiting for an answer")]
    NoActiveQuestion,
}

/// A controller action that was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Stage {0} does not exist (stages are 1-9)")]
    StageOutOfRange(u32),

    #[error("Cannot {action} from the {screen:?} screen")]
    InvalidTransition { action: &'static str, screen: Screen },

    #[error("The saved hero has already won; start a new game to race the clock again")]
    AlreadyWon,

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

impl GameError {
    /// True for input problems the player should simply retry.
    pub fn is_retryable_input(&self) -> bool {
        matches!(
            self,
            GameError::Answer(AnswerError::Empty | AnswerError::NotANumber(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(AnswerError::Empty.to_string(), "Please enter an answer");
        assert_eq!(
            AnswerError::NotANumber("abc".into()).to_string(),
            "'abc' is not a whole number"
        );
        assert_eq!(
            GameError::StageOutOfRange(12).to_string(),
            "Stage 12 does not exist (stages are 1-9)"
        );
        let err = GameError::InvalidTransition {
            action: "retry the stage",
            screen: Screen::StageSelect,
        };
        assert_eq!(err.to_string(), "Cannot retry the stage from the StageSelect screen");
        assert!(GameError::AlreadyWon.to_string().starts_with("The saved hero has already won"));
    }

    #[test]
    fn test_answer_errors_convert_and_are_retryable() {
        let err: GameError = AnswerError::Empty.into();
        assert!(err.is_retryable_input());
        assert!(!GameError::StageOutOfRange(0).is_retryable_input());
        assert!(!GameError::AlreadyWon.is_retryable_input());
        assert!(!GameError::Answer(AnswerError::NoActiveQuestion).is_retryable_input());
    }
}
