//! "Certo ou Errado" quiz sampling and grading.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::HighlightSet;

/// Number of statements in a quiz unless asked otherwise.
pub const DEFAULT_QUIZ_SIZE: usize = 5;

/// An answer to a quiz statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Certo,
    Errado,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Certo => write!(f, "Certo"),
            Verdict::Errado => write!(f, "Errado"),
        }
    }
}

impl FromStr for Verdict {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "certo" => Ok(Verdict::Certo),
            "e" | "errado" => Ok(Verdict::Errado),
            other => Err(Error::Other(format!(
                "Invalid answer '{}': expected Certo (c) or Errado (e)",
                other
            ))),
        }
    }
}

/// One statement taken verbatim from the material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Position in the quiz, from 1
    pub number: usize,
    pub page: u32,
    pub statement: String,
    pub expected: Verdict,
}

impl QuizItem {
    pub fn is_correct(&self, answer: Verdict) -> bool {
        answer == self.expected
    }

    /// Feedback shown after answering.
    pub fn feedback(&self, answer: Verdict) -> &'static str {
        if self.is_correct(answer) {
            "Correto! Afirmação condizente com o material."
        } else {
            "Errado. De acordo com o material, a afirmação está correta."
        }
    }
}

/// A random selection of highlights presented as statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    items: Vec<QuizItem>,
}

impl Quiz {
    /// Sample up to `size` distinct highlights using the thread-local RNG.
    pub fn sample(set: &HighlightSet, size: usize) -> Self {
        Self::sample_with(set, size, &mut rand::thread_rng())
    }

    /// Sample up to `size` distinct highlights with the given RNG.
    pub fn sample_with<R: Rng + ?Sized>(set: &HighlightSet, size: usize, rng: &mut R) -> Self {
        let items = set
            .highlights
            .choose_multiple(rng, size.min(set.len()))
            .enumerate()
            .map(|(i, h)| QuizItem {
                number: i + 1,
                page: h.page,
                statement: h.text.clone(),
                // Every statement is quoted from the material
                expected: Verdict::Certo,
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Score a list of answers given in item order; missing answers count as wrong.
    pub fn grade(&self, answers: &[Verdict]) -> QuizScore {
        let correct = self
            .items
            .iter()
            .zip(answers)
            .filter(|(item, answer)| item.is_correct(**answer))
            .count();

        QuizScore {
            correct,
            total: self.items.len(),
        }
    }
}

/// Result of grading a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    /// Share of correct answers in percent (0 for an empty quiz).
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 * 100.0 / self.total as f32
        }
    }
}

impl fmt::Display for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.0}%)", self.correct, self.total, self.percent())
    }
}
