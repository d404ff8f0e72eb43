//! Arithmetic quiz
//!
//! Each correct answer earns one shuriken. Questions stay small: sums never
//! exceed `QUIZ_MAX_OPERAND` and differences are never negative.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::QUIZ_MAX_OPERAND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }
}

/// A single `lhs op rhs = ?` question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub lhs: u32,
    pub rhs: u32,
    pub op: Operator,
}

impl Question {
    /// Roll a question: addition or subtraction with equal odds
    pub fn random(rng: &mut impl Rng) -> Self {
        let lhs = rng.random_range(0..=QUIZ_MAX_OPERAND);
        if rng.random_bool(0.5) {
            Self {
                lhs,
                rhs: rng.random_range(0..=QUIZ_MAX_OPERAND - lhs),
                op: Operator::Add,
            }
        } else {
            Self {
                lhs,
                rhs: rng.random_range(0..=lhs),
                op: Operator::Subtract,
            }
        }
    }

    pub fn answer(&self) -> u32 {
        match self.op {
            Operator::Add => self.lhs + self.rhs,
            Operator::Subtract => self.lhs - self.rhs,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Parse the leading integer of a typed answer.
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is ignored, so `"7"`, `" +7"` and `"7abc"` all read as 7. Returns `None`
/// when there are no digits at all.
pub fn parse_answer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Digit runs past i64 read as i64::MAX
    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Result of submitting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Blank input, or the quiz is already over; nothing changed
    Ignored,
    Correct,
    Wrong { expected: u32 },
}

/// A fixed-length run of questions
#[derive(Debug, Clone)]
pub struct Quiz {
    rng: Pcg32,
    total: u32,
    asked: u32,
    correct: u32,
    current: Option<Question>,
}

impl Quiz {
    /// Create a quiz of `total` questions and roll the first one
    pub fn new(seed: u64, total: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let current = (total > 0).then(|| Question::random(&mut rng));
        Self {
            rng,
            total,
            asked: 0,
            correct: 0,
            current,
        }
    }

    /// Question waiting for an answer, `None` once finished
    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// 1-based number of the current question
    pub fn question_number(&self) -> u32 {
        (self.asked + 1).min(self.total)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Grade `input` against the current question and move on
    pub fn submit(&mut self, input: &str) -> AnswerOutcome {
        let Some(question) = self.current else {
            return AnswerOutcome::Ignored;
        };
        if input.trim().is_empty() {
            return AnswerOutcome::Ignored;
        }

        let expected = question.answer();
        let outcome = if parse_answer(input) == Some(i64::from(expected)) {
            self.correct += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Wrong { expected }
        };

        self.asked += 1;
        self.current = if self.asked < self.total {
            Some(Question::random(&mut self.rng))
        } else {
            log::debug!("Quiz finished: {}/{} correct", self.correct, self.total);
            None
        };

        outcome
    }
}
