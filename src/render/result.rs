//! Statistics about an extraction result.

use serde::{Deserialize, Serialize};

use crate::model::HighlightSet;

/// Counts reported by `unmark info` and alongside JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the source document
    pub page_count: u32,

    /// Number of highlights kept after normalization
    pub highlight_count: u32,

    /// Distinct pages carrying at least one highlight
    pub highlighted_pages: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Collect statistics from a highlight set.
    pub fn from_set(set: &HighlightSet) -> Self {
        let mut stats = Self {
            page_count: set.source.page_count,
            highlight_count: set.len() as u32,
            highlighted_pages: set.pages().len() as u32,
            ..Self::default()
        };

        for highlight in set {
            stats.word_count += highlight.word_count() as u32;
            stats.char_count += highlight.text.chars().filter(|c| !c.is_whitespace()).count() as u32;
        }

        stats
    }

    /// Share of pages with highlights, in percent.
    pub fn coverage(&self) -> f32 {
        if self.page_count == 0 {
            0.0
        } else {
            self.highlighted_pages as f32 * 100.0 / self.page_count as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Highlight;

    #[test]
    fn test_stats_from_set() {
        let mut set = HighlightSet::from_highlights(vec![
            Highlight::new(1, "duas palavras"),
            Highlight::new(1, "mais uma"),
            Highlight::new(3, "fim"),
        ]);
        set.source.page_count = 4;

        let stats = ExtractionStats::from_set(&set);
        assert_eq!(stats.highlight_count, 3);
        assert_eq!(stats.highlighted_pages, 2);
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.char_count, 22);
        assert_eq!(stats.coverage(), 50.0);
    }

    #[test]
    fn test_empty_stats() {
        let stats = ExtractionStats::from_set(&HighlightSet::default());
        assert_eq!(stats, ExtractionStats::default());
        assert_eq!(stats.coverage(), 0.0);
    }
}
