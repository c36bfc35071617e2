//! Positioned glyphs and region-based text lookup.
//!
//! A page is reduced to a flat list of [`Glyph`]s in content stream order.
//! Looking up the text under an annotation selects the glyphs whose center
//! falls inside one of its regions, groups them into lines by baseline and
//! rebuilds each line left to right, inserting spaces where the horizontal
//! gap between two glyphs is wide enough to be a word break.

use std::cmp::Ordering;

use crate::model::Rect;

/// Gap (as a fraction of the font size) that counts as a word break.
const SPACE_GAP_RATIO: f32 = 0.15;

/// Baseline distance (as a fraction of the font size) within one line.
const SAME_LINE_RATIO: f32 = 0.4;

/// A single positioned glyph in default user space.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Decoded text (may be more than one character for ligatures)
    pub text: String,
    /// X of the glyph origin
    pub x: f32,
    /// Y of the baseline
    pub y: f32,
    /// Advance width
    pub width: f32,
    /// Effective font size
    pub size: f32,
    /// Visual center used for region tests
    pub center: (f32, f32),
}

impl Glyph {
    /// Create an upright glyph; its center sits at mid advance, 0.3 em above
    /// the baseline.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            size,
            center: (x + width / 2.0, y + size * 0.3),
        }
    }

    /// Right edge of the glyph.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// All glyphs of one page.
#[derive(Debug, Clone, Default)]
pub struct PageText {
    glyphs: Vec<Glyph>,
}

impl PageText {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Text of the glyphs whose center lies in any of `regions`.
    ///
    /// Lines are separated by `\n`; an empty string means nothing was found.
    pub fn text_in(&self, regions: &[Rect]) -> String {
        let Some(bounds) = regions.iter().copied().reduce(|a, b| a.union(&b)) else {
            return String::new();
        };

        let selected: Vec<&Glyph> = self
            .glyphs
            .iter()
            .filter(|g| {
                let (cx, cy) = g.center;
                bounds.contains_point(cx, cy) && regions.iter().any(|r| r.contains_point(cx, cy))
            })
            .collect();

        assemble_lines(&selected)
    }
}

struct Line<'a> {
    baseline: f32,
    size: f32,
    glyphs: Vec<&'a Glyph>,
}

impl Line<'_> {
    fn text(&self) -> String {
        let mut out = String::new();
        let mut prev: Option<&Glyph> = None;

        for glyph in &self.glyphs {
            if let Some(p) = prev {
                let gap = glyph.x - p.right();
                let threshold = SPACE_GAP_RATIO * glyph.size.max(p.size);
                let spaceless = ends_spaceless(&out) && starts_spaceless(&glyph.text);
                if gap > threshold
                    && !spaceless
                    && !p.is_blank()
                    && !glyph.is_blank()
                    && !out.ends_with(' ')
                {
                    out.push(' ');
                }
            }
            out.push_str(&glyph.text);
            prev = Some(glyph);
        }

        out
    }
}

/// Group glyphs into lines, top to bottom, and join them with `\n`.
fn assemble_lines(glyphs: &[&Glyph]) -> String {
    let mut lines: Vec<Line> = Vec::new();

    for glyph in glyphs {
        let found = lines.iter_mut().find(|line| {
            let tolerance = SAME_LINE_RATIO * line.size.max(glyph.size);
            (line.baseline - glyph.y).abs() <= tolerance
        });
        match found {
            Some(line) => line.glyphs.push(glyph),
            None => lines.push(Line {
                baseline: glyph.y,
                size: glyph.size,
                glyphs: vec![glyph],
            }),
        }
    }

    lines.sort_by(|a, b| b.baseline.partial_cmp(&a.baseline).unwrap_or(Ordering::Equal));
    for line in &mut lines {
        line.glyphs
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    }

    lines
        .iter()
        .map(Line::text)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn ends_spaceless(text: &str) -> bool {
    text.chars().last().is_some_and(is_spaceless_script_char)
}

fn starts_spaceless(text: &str) -> bool {
    text.chars().next().is_some_and(is_spaceless_script_char)
}

/// Scripts written without spaces between words (Chinese, Japanese kana).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}
