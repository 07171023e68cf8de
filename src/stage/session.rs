//! One attempt at a stage: question generation, scoring and progress.

use crate::core::constants::{MAX_OPERAND, MIN_OPERAND};
use crate::core::error::AnswerError;
use rand::Rng;

/// A single multiplication question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub operand_a: u32,
    pub operand_b: u32,
    pub answer: u32,
}

impl Question {
    pub fn new(operand_a: u32, operand_b: u32) -> Self {
        Self {
            operand_a,
            operand_b,
            answer: operand_a * operand_b,
        }
    }

    /// Prompt text, e.g. "7 × 8 = ?".
    pub fn prompt(&self) -> String {
        format!("{} × {} = ?", self.operand_a, self.operand_b)
    }
}

/// Parses a typed answer. Surrounding whitespace is ignored.
pub fn parse_answer(raw: &str) -> Result<u32, AnswerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnswerError::Empty);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| AnswerError::NotANumber(trimmed.to_string()))
}

/// State for one stage attempt. A fresh session is created on every entry.
#[derive(Debug, Clone)]
pub struct StageSession {
    stage_number: u32,
    total_questions: u32,
    questions_asked: u32,
    correct_count: u32,
    current_question: Question,
}

impl StageSession {
    /// Creates the session and draws its first question.
    pub fn new<R: Rng>(stage_number: u32, total_questions: u32, rng: &mut R) -> Self {
        let mut session = Self {
            stage_number,
            total_questions,
            questions_asked: 0,
            correct_count: 0,
            current_question: Question::new(stage_number, MIN_OPERAND),
        };
        session.generate_next_question(rng);
        session
    }

    pub fn stage_number(&self) -> u32 {
        self.stage_number
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn current_question(&self) -> &Question {
        &self.current_question
    }

    /// Draws a new second operand uniformly from 1-9.
    pub fn generate_next_question<R: Rng>(&mut self, rng: &mut R) {
        let operand_b = rng.gen_range(MIN_OPERAND..=MAX_OPERAND);
        self.current_question = Question::new(self.stage_number, operand_b);
    }

    /// Scores an already-parsed answer against the current question.
    pub fn score(&mut self, answer: u32) -> bool {
        let correct = answer == self.current_question.answer;
        self.questions_asked += 1;
        if correct {
            self.correct_count += 1;
        }
        correct
    }

    /// Parses and scores `raw`. Invalid input leaves the session untouched.
    pub fn submit_answer(&mut self, raw: &str) -> Result<bool, AnswerError> {
        if self.is_complete() {
            return Err(AnswerError::NoActiveQuestion);
        }
        let answer = parse_answer(raw)?;
        Ok(self.score(answer))
    }

    pub fn is_complete(&self) -> bool {
        self.questions_asked >= self.total_questions
    }

    /// "asked/total", e.g. "3/10".
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.questions_asked, self.total_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(stage: u32) -> (StageSession, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        (StageSession::new(stage, 10, &mut rng), rng)
    }

    #[test]
    fn test_new_session_has_question_ready() {
        let (s, _) = session(4);
        assert_eq!(s.questions_asked(), 0);
        assert_eq!(s.current_question().operand_a, 4);
        assert!((1..=9).contains(&s.current_question().operand_b));
        assert_eq!(s.progress_label(), "0/10");
    }

    #[test]
    fn test_questions_always_use_stage_number() {
        let (mut s, mut rng) = session(6);
        for _ in 0..200 {
            s.generate_next_question(&mut rng);
            let q = s.current_question();
            assert_eq!(q.operand_a, 6);
            assert!((1..=9).contains(&q.operand_b));
            assert_eq!(q.answer, 6 * q.operand_b);
        }
    }

    #[test]
    fn test_correct_and_wrong_answers_are_counted() {
        let (mut s, mut rng) = session(3);
        let answer = s.current_question().answer;
        assert_eq!(s.submit_answer(&answer.to_string()), Ok(true));
        s.generate_next_question(&mut rng);
        let wrong = s.current_question().answer + 1;
        assert_eq!(s.submit_answer(&wrong.to_string()), Ok(false));

        assert_eq!(s.questions_asked(), 2);
        assert_eq!(s.correct_count(), 1);
        assert_eq!(s.progress_label(), "2/10");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let (mut s, _) = session(2);
        let answer = s.current_question().answer;
        assert_eq!(s.submit_answer(&format!("  {} \n", answer)), Ok(true));
    }

    #[test]
    fn test_invalid_input_does_not_count() {
        let (mut s, _) = session(5);
        assert_eq!(s.submit_answer(""), Err(AnswerError::Empty));
        assert_eq!(s.submit_answer("   "), Err(AnswerError::Empty));
        assert_eq!(
            s.submit_answer("ten"),
            Err(AnswerError::NotANumber("ten".to_string()))
        );
        assert_eq!(
            s.submit_answer("-5"),
            Err(AnswerError::NotANumber("-5".to_string()))
        );
        assert_eq!(s.questions_asked(), 0);
    }

    #[test]
    fn test_complete_exactly_at_tenth_answer() {
        let (mut s, mut rng) = session(9);
        for i in 0..10 {
            assert!(!s.is_complete(), "complete too early at {}", i);
            s.submit_answer("0").unwrap();
            if !s.is_complete() {
                s.generate_next_question(&mut rng);
            }
        }
        assert!(s.is_complete());
        assert_eq!(s.submit_answer("1"), Err(AnswerError::NoActiveQuestion));
        assert_eq!(s.questions_asked(), 10);
    }

    #[test]
    fn test_question_prompt() {
        assert_eq!(Question::new(7, 8).prompt(), "7 × 8 = ?");
        assert_eq!(Question::new(7, 8).answer, 56);
    }
}
