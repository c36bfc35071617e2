//! Code point substitution table.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Default substitutions for text pulled out of PDF content streams.
const DEFAULT_ENTRIES: &[(char, &str)] = &[
    // Spacing and invisible characters
    ('\u{00A0}', " "), // no-break space
    ('\u{00AD}', ""),  // soft hyphen
    ('\u{200B}', ""),  // zero width space
    ('\u{FEFF}', ""),  // byte order mark
    // Dashes
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2012}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2015}', "-"),
    ('\u{2212}', "-"),
    // Quotes
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201A}', "'"),
    ('\u{201B}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{201E}', "\""),
    ('\u{201F}', "\""),
    // Bullets
    ('\u{2023}', "•"),
    ('\u{2043}', "•"),
    ('\u{2219}', "•"),
    ('\u{25AA}', "•"),
    ('\u{25CF}', "•"),
    ('\u{25E6}', "•"),
    // Symbol/Wingdings glyphs that land in the Private Use Area
    ('\u{F02D}', "-"),
    ('\u{F06C}', "•"),
    ('\u{F0A7}', "•"),
    ('\u{F0B7}', "•"),
    ('\u{F0D8}', ">"),
    // Ellipsis
    ('\u{2026}', "..."),
    // Ligatures
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// An immutable, ordered mapping from code point to replacement string.
///
/// Replacements are applied in a single left-to-right scan, so the output of
/// one entry is never fed back into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMap {
    entries: BTreeMap<char, Cow<'static, str>>,
}

impl CharMap {
    /// A map with no substitutions.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or override a substitution.
    pub fn with(mut self, from: char, to: impl Into<Cow<'static, str>>) -> Self {
        self.entries.insert(from, to.into());
        self
    }

    /// Remove a substitution.
    pub fn without(mut self, from: char) -> Self {
        self.entries.remove(&from);
        self
    }

    /// Replacement for a single code point, if any.
    pub fn get(&self, c: char) -> Option<&str> {
        self.entries.get(&c).map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in code point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.entries.iter().map(|(c, s)| (*c, s.as_ref()))
    }

    /// Apply the map to `text`. Borrows when nothing needs replacing.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let first = match text.char_indices().find(|(_, c)| self.entries.contains_key(c)) {
            Some((idx, _)) => idx,
            None => return Cow::Borrowed(text),
        };

        let mut out = String::with_capacity(text.len() + 8);
        out.push_str(&text[..first]);
        for c in text[first..].chars() {
            match self.entries.get(&c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        Cow::Owned(out)
    }
}

impl Default for CharMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(c, s)| (*c, Cow::Borrowed(*s)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_canonicalizes_punctuation() {
        let map = CharMap::default();
        assert_eq!(
            map.apply("\u{201C}a\u{201D} \u{2018}b\u{2019} c\u{2013}d\u{2014}e"),
            "\"a\" 'b' c-d-e"
        );
        assert_eq!(map.apply("fim\u{2026}"), "fim...");
        assert_eq!(map.apply("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_private_use_bullets() {
        let map = CharMap::default();
        assert_eq!(map.apply("\u{F0B7} item"), "• item");
        assert_eq!(map.apply("\u{F0D8} seta"), "> seta");
        assert_eq!(map.apply("\u{F02D} traço"), "- traço");
    }

    #[test]
    fn test_untouched_text_is_borrowed() {
        let map = CharMap::default();
        assert!(matches!(map.apply("plain ascii"), Cow::Borrowed(_)));
        assert!(matches!(map.apply("\u{2022} already canonical"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_single_scan_does_not_chain() {
        // '-' maps to '?' but the '-' produced by the en dash must not be rewritten
        let map = CharMap::default().with('-', "?");
        assert_eq!(map.apply("a\u{2013}b-c"), "a-b?c");
    }

    #[test]
    fn test_with_and_without() {
        let map = CharMap::empty().with('x', "y");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get('x'), Some("y"));
        let map = map.without('x');
        assert!(map.is_empty());
    }

    #[test]
    fn test_ligatures() {
        assert_eq!(CharMap::default().apply("\u{FB01}nding \u{FB02}owers"), "finding flowers");
    }
}
