//! Footnote marker heuristics.
//!
//! Text lifted from study material often carries footnote references glued
//! to the preceding word ("Federal5") or sentence ("exercício.6"). Telling a
//! reference apart from a real alphanumeric token ("Art5") is not possible
//! from the text alone, so the decision sits behind [`FootnotePolicy`].

use std::fmt;

/// Decides whether a numeral glued to a word is a footnote reference.
pub trait FootnotePolicy: fmt::Debug + Send + Sync {
    /// `word` is the run of letters (and combining marks) immediately before
    /// `digits`, both taken from text that has already been cleaned.
    fn is_attached_footnote(&self, word: &str, digits: &str) -> bool;
}

/// Treat digits glued to a word of at least `min_letters` letters as a footnote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GluedDigits {
    pub min_letters: usize,
}

impl Default for GluedDigits {
    fn default() -> Self {
        Self { min_letters: 3 }
    }
}

impl FootnotePolicy for GluedDigits {
    fn is_attached_footnote(&self, word: &str, digits: &str) -> bool {
        !digits.is_empty() && word.chars().filter(|c| is_word_letter(*c)).count() >= self.min_letters
    }
}

/// Never strip digits after a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeverFootnote;

impl FootnotePolicy for NeverFootnote {
    fn is_attached_footnote(&self, _word: &str, _digits: &str) -> bool {
        false
    }
}

/// What to do with a numeral that directly follows a period.
///
/// After an ellipsis only the numeral is removed, whatever the mode, so the
/// dots stay intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFootnote {
    /// Remove the period together with the numeral ("fim.6" -> "fim")
    #[default]
    DropMarker,
    /// Remove the numeral only ("fim.6" -> "fim.")
    KeepPeriod,
    /// Leave the text alone
    Ignore,
}

/// Letters that can form a word for footnote purposes.
pub(crate) fn is_word_letter(c: char) -> bool {
    c.is_alphabetic() && !is_combining_mark(c)
}

/// Combining marks (general category M): they continue a word but do not
/// count as letters.
pub(crate) fn is_combining_mark(c: char) -> bool {
    unicode_normalization::char::is_combining_mark(c)
}

fn trailing_word(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_letter(*c) || is_combining_mark(*c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[start..]
}

/// A trailing period that is not the decimal point of a number.
fn ends_with_sentence_period(text: &str) -> bool {
    match text.strip_suffix('.') {
        Some(head) => !head.ends_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

/// Remove footnote numerals in one left-to-right pass.
///
/// Decisions look at the text already emitted rather than the input, so the
/// output never contains a marker that a second pass would remove.
pub(crate) fn strip_footnotes(
    text: &str,
    policy: &dyn FootnotePolicy,
    period: PeriodFootnote,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut digits = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_digit() {
            out.push(c);
            continue;
        }

        digits.clear();
        digits.push(c);
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }

        if period != PeriodFootnote::Ignore && ends_with_sentence_period(&out) {
            if period == PeriodFootnote::DropMarker && !out.ends_with("..") {
                out.pop();
            }
            continue;
        }

        let word = trailing_word(&out);
        if !word.is_empty() && policy.is_attached_footnote(word, &digits) {
            continue;
        }
        out.push_str(&digits);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(text: &str) -> String {
        strip_footnotes(text, &GluedDigits::default(), PeriodFootnote::DropMarker)
    }

    #[test]
    fn test_glued_digits_policy() {
        let policy = GluedDigits::default();
        assert!(policy.is_attached_footnote("Federal", "5"));
        assert!(policy.is_attached_footnote("Art", "5"));
        assert!(!policy.is_attached_footnote("ab", "12"));
        assert!(!policy.is_attached_footnote("Federal", ""));
        // Combining marks do not count towards the letter minimum
        assert!(!policy.is_attached_footnote("e\u{0301}\u{0301}", "1"));
    }

    #[test]
    fn test_strip_word_footnotes() {
        assert_eq!(strip("Federal5 exercício"), "Federal exercício");
        assert_eq!(strip("Constituição12 e leis"), "Constituição e leis");
        assert_eq!(strip("ab12 cd"), "ab12 cd");
        assert_eq!(strip("em 1988 foi"), "em 1988 foi");
    }

    #[test]
    fn test_strip_period_footnotes() {
        assert_eq!(strip("exercício.6"), "exercício");
        assert_eq!(
            strip_footnotes("exercício.6", &GluedDigits::default(), PeriodFootnote::KeepPeriod),
            "exercício."
        );
        assert_eq!(
            strip_footnotes("exercício.6", &GluedDigits::default(), PeriodFootnote::Ignore),
            "exercício.6"
        );
    }

    #[test]
    fn test_ellipsis_keeps_its_dots() {
        assert_eq!(strip("e assim...3 por diante"), "e assim... por diante");
        assert_eq!(
            strip_footnotes("assim...3", &GluedDigits::default(), PeriodFootnote::KeepPeriod),
            "assim..."
        );
        assert_eq!(strip("fim.6"), "fim");
    }

    #[test]
    fn test_marks_from_any_script() {
        assert!(is_combining_mark('\u{0301}'));
        assert!(is_combining_mark('\u{05B4}'));
        assert!(is_combining_mark('\u{0903}'));
        assert!(!is_word_letter('\u{05B4}'));
        assert!(is_word_letter('\u{05D9}'));
        assert!(!GluedDigits::default().is_attached_footnote("\u{05D9}\u{05B4}\u{05D9}\u{05B4}", "5"));
    }

    #[test]
    fn test_decimal_numbers_survive() {
        assert_eq!(strip("taxa de 3.14 ao ano"), "taxa de 3.14 ao ano");
        assert_eq!(strip("fim1.5"), "fim");
    }

    #[test]
    fn test_decisions_follow_emitted_text() {
        // "c" joins "ab" once the marker between them is gone
        assert_eq!(strip("ab.5c1"), "abc");
        let once = strip("abc5de6");
        assert_eq!(once, "abcde");
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn test_decomposed_accents_continue_the_word() {
        assert_eq!(strip("exerci\u{0301}cio7"), "exerci\u{0301}cio");
    }

    #[test]
    fn test_never_footnote_keeps_words() {
        assert_eq!(
            strip_footnotes("Art5 da Lei", &NeverFootnote, PeriodFootnote::Ignore),
            "Art5 da Lei"
        );
    }
}
