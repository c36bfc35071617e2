//! Keyword-driven question generation.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Highlight, HighlightSet};

/// Number of leading words used to name the topic in the fallback question.
const TOPIC_WORDS: usize = 6;

/// Placeholder replaced by the topic in a fallback template.
const TOPIC_PLACEHOLDER: &str = "{tema}";

const DEFAULT_FALLBACK: &str =
    "Explique o que o material aborda sobre '{tema}' e qual sua importância no contexto estudado.";

const DEFAULT_RULES: &[(&[&str], &str)] = &[
    (
        &["cpi"],
        "Como o material define a natureza da CPI e quais são os seus requisitos de criação?",
    ),
    (
        &["parlamentar", "diplomação"],
        "O que o texto explica sobre o início das garantias parlamentares e a imunidade?",
    ),
    (
        &["labelling", "etiquetamento"],
        "Quais são os pontos centrais da Teoria do Etiquetamento e as propostas dos '4 Ds' citadas?",
    ),
    (
        &["stf", "stj"],
        "Qual é o posicionamento atualizado dos Tribunais Superiores sobre este ponto do destaque?",
    ),
    (
        &["improbidade", "lia"],
        "Quais as principais características do ato de improbidade e a exigência de dolo mencionada?",
    ),
];

/// A question asked when any of its keywords occurs in a highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRule {
    pub keywords: Vec<String>,
    pub question: String,
}

impl QuestionRule {
    pub fn new<S: Into<String>>(keywords: impl IntoIterator<Item = S>, question: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            question: question.into(),
        }
    }
}

/// On-disk form of a question bank.
#[derive(Debug, Deserialize, Serialize)]
struct BankFile {
    rules: Vec<QuestionRule>,
    #[serde(default)]
    fallback: Option<String>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: QuestionRule,
    pattern: Regex,
}

/// Ordered keyword rules with a generic fallback question.
///
/// The first rule with a keyword occurring anywhere in the text (ignoring
/// case) supplies the question.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    rules: Vec<CompiledRule>,
    fallback: String,
}

impl QuestionBank {
    /// Build a bank from rules, using the default fallback template.
    pub fn new(rules: Vec<QuestionRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| compile(index, rule))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            fallback: DEFAULT_FALLBACK.to_string(),
        })
    }

    /// Set the fallback template; `{tema}` is replaced by the topic.
    pub fn with_fallback(mut self, template: impl Into<String>) -> Self {
        self.fallback = template.into();
        self
    }

    /// Load a bank from JSON: `{"rules": [{"keywords": [..], "question": ".."}], "fallback": ".."}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: BankFile =
            serde_json::from_str(json).map_err(|e| Error::QuestionBank(e.to_string()))?;
        let bank = Self::new(file.rules)?;
        Ok(match file.fallback {
            Some(fallback) => bank.with_fallback(fallback),
            None => bank,
        })
    }

    /// Load a bank from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the bank back to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let file = BankFile {
            rules: self.rules().cloned().collect(),
            fallback: Some(self.fallback.clone()),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn rules(&self) -> impl Iterator<Item = &QuestionRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Question for a passage of text.
    pub fn question_for(&self, text: &str) -> String {
        match self.rules.iter().find(|c| c.pattern.is_match(text)) {
            Some(compiled) => compiled.rule.question.clone(),
            None => self.fallback.replace(TOPIC_PLACEHOLDER, &topic(text)),
        }
    }

    /// One card per highlight, numbered from 1.
    pub fn cards(&self, set: &HighlightSet) -> Vec<StudyCard> {
        set.iter()
            .enumerate()
            .map(|(i, h)| StudyCard::new(i + 1, h, self.question_for(&h.text)))
            .collect()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .enumerate()
            .filter_map(|(index, (keywords, question))| {
                compile(index, QuestionRule::new(keywords.iter().copied(), *question)).ok()
            })
            .collect();

        Self {
            rules,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

fn compile(index: usize, rule: QuestionRule) -> Result<CompiledRule> {
    let keywords: Vec<String> = rule
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();

    if keywords.is_empty() {
        return Err(Error::QuestionBank(format!("rule {} has no keywords", index + 1)));
    }

    let pattern = Regex::new(&format!("(?i){}", keywords.join("|")))
        .map_err(|e| Error::QuestionBank(format!("rule {}: {}", index + 1, e)))?;

    Ok(CompiledRule { rule, pattern })
}

/// The first words of `text`, without surrounding punctuation.
fn topic(text: &str) -> String {
    text.split_whitespace()
        .take(TOPIC_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| ".,;:- ".contains(c))
        .to_string()
}

/// A highlight paired with the question it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyCard {
    /// Position in the set, from 1
    pub number: usize,
    /// Source page
    pub page: u32,
    pub question: String,
    /// The highlighted text
    pub answer: String,
}

impl StudyCard {
    pub fn new(number: usize, highlight: &Highlight, question: impl Into<String>) -> Self {
        Self {
            number,
            page: highlight.page,
            question: question.into(),
            answer: highlight.text.clone(),
        }
    }
}
