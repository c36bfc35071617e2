//! Highlight types.

use super::Metadata;
use serde::{Deserialize, Serialize};

/// A passage of text found under a highlight annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Page number (1-indexed)
    pub page: u32,

    /// Normalized text, never empty
    pub text: String,
}

impl Highlight {
    /// Create a new highlight.
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }

    /// Number of whitespace-separated words in the highlight.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// The ordered result of extracting highlights from one document.
///
/// Order is page order, then annotation order within a page. Duplicate
/// passages are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighlightSet {
    /// Information about the source document
    pub source: Metadata,

    /// Highlights in discovery order
    pub highlights: Vec<Highlight>,
}

impl HighlightSet {
    /// Create an empty set for the given source document.
    pub fn new(source: Metadata) -> Self {
        Self {
            source,
            highlights: Vec::new(),
        }
    }

    /// Build a set from already-extracted highlights.
    pub fn from_highlights(highlights: Vec<Highlight>) -> Self {
        Self {
            source: Metadata::default(),
            highlights,
        }
    }

    /// Append a highlight.
    pub fn push(&mut self, highlight: Highlight) {
        self.highlights.push(highlight);
    }

    /// Number of highlights.
    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    /// True when the document had nothing highlighted.
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// Iterate over highlights in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Highlight> {
        self.highlights.iter()
    }

    /// Distinct page numbers that carry highlights, in ascending order.
    pub fn pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = Vec::new();
        for h in &self.highlights {
            if pages.last() != Some(&h.page) {
                pages.push(h.page);
            }
        }
        pages
    }

    /// All highlighted text, one paragraph per highlight.
    pub fn plain_text(&self) -> String {
        self.highlights
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a Highlight;
    type IntoIter = std::slice::Iter<'a, Highlight>;

    fn into_iter(self) -> Self::IntoIter {
        self.highlights.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HighlightSet {
        HighlightSet::from_highlights(vec![
            Highlight::new(1, "Primeiro destaque"),
            Highlight::new(1, "Segundo destaque"),
            Highlight::new(4, "Terceiro"),
        ])
    }

    #[test]
    fn test_pages_are_distinct_and_ordered() {
        assert_eq!(sample().pages(), vec![1, 4]);
    }

    #[test]
    fn test_plain_text_joins_paragraphs() {
        assert_eq!(
            sample().plain_text(),
            "Primeiro destaque\n\nSegundo destaque\n\nTerceiro"
        );
    }

    #[test]
    fn test_empty_set() {
        let set = HighlightSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.pages().is_empty());
        assert_eq!(set.plain_text(), "");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(Highlight::new(2, "três palavras aqui").word_count(), 3);
    }

    #[test]
    fn test_serializes_page_and_text() {
        let json = serde_json::to_string(&Highlight::new(3, "texto")).unwrap();
        assert_eq!(json, r#"{"page":3,"text":"texto"}"#);
    }
}
