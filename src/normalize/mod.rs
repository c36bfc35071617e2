//! Text normalization for highlighted passages.
//!
//! Raw text pulled from under an annotation carries footnote numerals,
//! typographic punctuation and the line breaks of the source column. The
//! normalizer turns it into a single line of prose that downstream writers
//! can justify:
//!
//! 1. the input is recomposed to Unicode NFC, so footnote decisions see the
//!    same characters on every pass;
//! 2. typographic punctuation, bullets and invisible characters are mapped
//!    through a [`CharMap`];
//! 3. footnote numerals are stripped according to a [`FootnotePolicy`];
//! 4. whitespace and control character runs collapse to one space, the ends
//!    are trimmed and a `?` left in front of a space (a bullet glyph lost in
//!    a previous encoding round trip) becomes `-`;
//! 5. the result is recomposed to NFC once more, since removals can leave a
//!    base letter next to a combining mark.
//!
//! The output is a fixed point: normalizing it again changes nothing.

mod charmap;
mod footnote;

pub use charmap::CharMap;
pub use footnote::{FootnotePolicy, GluedDigits, NeverFootnote, PeriodFootnote};

use std::sync::{Arc, OnceLock};
use unicode_normalization::UnicodeNormalization;

/// Options for text normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Strip footnote numerals glued to words and sentences
    pub strip_footnotes: bool,

    /// Treatment of numerals directly after a period
    pub period_footnotes: PeriodFootnote,

    /// Turn `? ` into `- `
    pub repair_question_bullets: bool,

    /// Recompose the output to Unicode NFC
    pub unicode_nfc: bool,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable footnote stripping.
    pub fn with_footnotes_stripped(mut self, strip: bool) -> Self {
        self.strip_footnotes = strip;
        self
    }

    /// Set how numerals after a period are handled.
    pub fn with_period_footnotes(mut self, mode: PeriodFootnote) -> Self {
        self.period_footnotes = mode;
        self
    }

    /// Enable or disable the `? ` repair.
    pub fn with_question_repair(mut self, repair: bool) -> Self {
        self.repair_question_bullets = repair;
        self
    }

    /// Enable or disable NFC recomposition.
    pub fn with_unicode_nfc(mut self, nfc: bool) -> Self {
        self.unicode_nfc = nfc;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip_footnotes: true,
            period_footnotes: PeriodFootnote::DropMarker,
            repair_question_bullets: true,
            unicode_nfc: true,
        }
    }
}

/// Text normalizer.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizeOptions,
    char_map: CharMap,
    policy: Arc<dyn FootnotePolicy>,
}

impl Normalizer {
    /// Create a normalizer with the default character map and footnote policy.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            char_map: CharMap::default(),
            policy: Arc::new(GluedDigits::default()),
        }
    }

    /// Replace the footnote policy.
    pub fn with_policy(mut self, policy: impl FootnotePolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Replace the character map.
    pub fn with_char_map(mut self, char_map: CharMap) -> Self {
        self.char_map = char_map;
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize one passage.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let composed: String = if self.options.unicode_nfc {
            text.nfc().collect()
        } else {
            text.to_owned()
        };

        let mapped = self.char_map.apply(&composed);

        let stripped = if self.options.strip_footnotes {
            footnote::strip_footnotes(&mapped, self.policy.as_ref(), self.options.period_footnotes)
        } else {
            mapped.into_owned()
        };

        let collapsed = collapse_whitespace(&stripped, self.options.repair_question_bullets);

        if self.options.unicode_nfc {
            collapsed.nfc().collect()
        } else {
            collapsed
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Normalize text with the default options.
///
/// # Example
///
/// ```
/// assert_eq!(unmark::normalize("Federal5 exercício.6"), "Federal exercício");
/// assert_eq!(unmark::normalize("   "), "");
/// ```
pub fn normalize(text: &str) -> String {
    static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
    DEFAULT.get_or_init(Normalizer::default).normalize(text)
}

/// Collapse whitespace and control characters to single spaces and trim.
fn collapse_whitespace(text: &str, repair_question: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() || c.is_control() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            if repair_question {
                repair_trailing_question(&mut out);
            }
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    if pending_space && repair_question {
        repair_trailing_question(&mut out);
    }
    out
}

fn repair_trailing_question(out: &mut String) {
    if out.ends_with('?') {
        out.pop();
        out.push('-');
    }
}
