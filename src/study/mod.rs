//! Study material built from extracted highlights.
//!
//! [`QuestionBank`] pairs every highlight with a question (keyword rules with
//! a generic fallback), producing [`StudyCard`]s for the Q&A sheet and the
//! flashcards. [`Quiz`] samples highlights as "Certo ou Errado" statements.

mod questions;
mod quiz;

pub use questions::{QuestionBank, QuestionRule, StudyCard};
pub use quiz::{Quiz, QuizItem, QuizScore, Verdict, DEFAULT_QUIZ_SIZE};
