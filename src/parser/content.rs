//! Content stream interpretation.
//!
//! Walks the operators of a page content stream, tracking the parts of the
//! graphics and text state that affect where glyphs land, and emits one
//! [`Glyph`] per shown character code.

use std::collections::{BTreeMap, HashMap};

use lopdf::content::Operation;
use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::fonts::win_ansi_char;

use super::font::FontMetrics;
use super::layout::Glyph;

/// Affine transform `[a b c d e f]` as used throughout PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Matrix([f32; 6]);

impl Matrix {
    pub const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Matrix([a, b, c, d, e, f])
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other`: apply `self` first, then `other`.
    pub fn then(&self, other: &Matrix) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a * a2 + b * c2,
            a * b2 + b * d2,
            c * a2 + d * c2,
            c * b2 + d * d2,
            e * a2 + f * c2 + e2,
            e * b2 + f * d2 + f2,
        ])
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    /// Length of the transformed unit vertical vector.
    pub fn vertical_scale(&self) -> f32 {
        let [_, _, c, d, _, _] = self.0;
        (c * c + d * d).sqrt()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

/// Text state parameters (PDF 32000 §9.3).
#[derive(Debug, Clone)]
struct TextState {
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scale: f32,
    leading: f32,
    font: Vec<u8>,
    font_size: f32,
    rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
            font: Vec::new(),
            font_size: 0.0,
            rise: 0.0,
        }
    }
}

/// Interprets one page's content stream into positioned glyphs.
pub(crate) struct GlyphCollector<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    metrics: HashMap<Vec<u8>, FontMetrics>,
    ctm: Matrix,
    state: TextState,
    stack: Vec<(Matrix, TextState)>,
    tm: Matrix,
    tlm: Matrix,
    glyphs: Vec<Glyph>,
}

impl<'a> GlyphCollector<'a> {
    pub fn new(doc: &'a LopdfDocument, fonts: BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        let metrics = fonts
            .iter()
            .map(|(name, dict)| (name.clone(), FontMetrics::from_dict(doc, dict)))
            .collect();

        Self {
            doc,
            fonts,
            metrics,
            ctm: Matrix::IDENTITY,
            state: TextState::default(),
            stack: Vec::new(),
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            glyphs: Vec::new(),
        }
    }

    /// Run every operation and return the glyphs in stream order.
    pub fn collect(mut self, operations: &[Operation]) -> Vec<Glyph> {
        for op in operations {
            self.apply(op);
        }
        self.glyphs
    }

    fn apply(&mut self, op: &Operation) {
        let nums = || -> Vec<f32> { op.operands.iter().filter_map(operand_number).collect() };

        match op.operator.as_str() {
            "q" => self.stack.push((self.ctm, self.state.clone())),
            "Q" => {
                if let Some((ctm, state)) = self.stack.pop() {
                    self.ctm = ctm;
                    self.state = state;
                }
            }
            "cm" => {
                if let [a, b, c, d, e, f] = nums()[..] {
                    self.ctm = Matrix::new(a, b, c, d, e, f).then(&self.ctm);
                }
            }
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.tlm = Matrix::IDENTITY;
            }
            "ET" => {}
            "Tc" => {
                if let Some(v) = nums().first() {
                    self.state.char_spacing = *v;
                }
            }
            "Tw" => {
                if let Some(v) = nums().first() {
                    self.state.word_spacing = *v;
                }
            }
            "Tz" => {
                if let Some(v) = nums().first() {
                    self.state.horizontal_scale = *v / 100.0;
                }
            }
            "TL" => {
                if let Some(v) = nums().first() {
                    self.state.leading = *v;
                }
            }
            "Ts" => {
                if let Some(v) = nums().first() {
                    self.state.rise = *v;
                }
            }
            "Tf" => {
                if let Some(name) = op.operands.first().and_then(|o| o.as_name().ok()) {
                    self.state.font = name.to_vec();
                }
                if let Some(size) = op.operands.get(1).and_then(operand_number) {
                    self.state.font_size = size;
                }
            }
            "Td" => {
                if let [tx, ty] = nums()[..] {
                    self.next_line(tx, ty);
                }
            }
            "TD" => {
                if let [tx, ty] = nums()[..] {
                    self.state.leading = -ty;
                    self.next_line(tx, ty);
                }
            }
            "Tm" => {
                if let [a, b, c, d, e, f] = nums()[..] {
                    self.tm = Matrix::new(a, b, c, d, e, f);
                    self.tlm = self.tm;
                }
            }
            "T*" => self.next_line(0.0, -self.state.leading),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    self.show(bytes);
                }
            }
            "'" => {
                self.next_line(0.0, -self.state.leading);
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    self.show(bytes);
                }
            }
            "\"" => {
                if let [aw, ac] = nums()[..] {
                    self.state.word_spacing = aw;
                    self.state.char_spacing = ac;
                }
                self.next_line(0.0, -self.state.leading);
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    self.show(bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => self.show(bytes),
                            other => {
                                if let Some(adjust) = operand_number(other) {
                                    let tx = -adjust / 1000.0
                                        * self.state.font_size
                                        * self.state.horizontal_scale;
                                    self.tm = Matrix::translate(tx, 0.0).then(&self.tm);
                                }
                            }
                        }
                    }
                }
            }
            "Do" => {
                log::trace!("Skipping XObject {:?}", op.operands.first());
            }
            _ => {}
        }
    }

    fn next_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translate(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    /// Show a string with the current font, advancing the text matrix.
    fn show(&mut self, bytes: &[u8]) {
        let unknown = FontMetrics::unknown();
        let metrics = self.metrics.get(&self.state.font).unwrap_or(&unknown);
        let font: Option<&'a Dictionary> = self.fonts.get(&self.state.font).copied();
        let decoder = CodeDecoder::new(self.doc, font);

        let state = &self.state;
        let trm = self.tm.then(&self.ctm);
        let size = state.font_size * trm.vertical_scale();
        let step = metrics.code_len.max(1);

        let mut advance = 0.0_f32;
        let mut shown = Vec::with_capacity(bytes.len() / step);

        for code_bytes in bytes.chunks(step) {
            let code = code_bytes.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32);
            let glyph_width = metrics.width(code) / 1000.0 * state.font_size * state.horizontal_scale;

            let text = decoder.decode(code_bytes, code);
            if !text.is_empty() {
                let (x, y) = trm.apply(advance, state.rise);
                let (end_x, _) = trm.apply(advance + glyph_width, state.rise);
                let center = trm.apply(
                    advance + glyph_width / 2.0,
                    state.rise + 0.3 * state.font_size,
                );
                shown.push(Glyph {
                    text,
                    x: x.min(end_x),
                    y,
                    width: (end_x - x).abs(),
                    size,
                    center,
                });
            }

            let mut spacing = state.char_spacing;
            if step == 1 && code == 32 {
                spacing += state.word_spacing;
            }
            advance += glyph_width + spacing * state.horizontal_scale;
        }

        self.tm = Matrix::translate(advance, 0.0).then(&self.tm);
        self.glyphs.extend(shown);
    }
}

/// Decodes character codes of one font to Unicode.
struct CodeDecoder<'a> {
    doc: &'a LopdfDocument,
    font: Option<&'a Dictionary>,
    win_ansi: bool,
}

impl<'a> CodeDecoder<'a> {
    fn new(doc: &'a LopdfDocument, font: Option<&'a Dictionary>) -> Self {
        let win_ansi = font.is_some_and(|f| {
            !f.has(b"ToUnicode")
                && f.get(b"Encoding")
                    .ok()
                    .and_then(|e| e.as_name().ok())
                    .is_some_and(|name| name == b"WinAnsiEncoding")
        });
        Self { doc, font, win_ansi }
    }

    fn decode(&self, code_bytes: &[u8], code: u32) -> String {
        if self.win_ansi && code_bytes.len() == 1 {
            return win_ansi_char(code_bytes[0])
                .map(String::from)
                .unwrap_or_default();
        }

        if let Some(font) = self.font {
            if let Ok(encoding) = font.get_font_encoding(self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&encoding, code_bytes) {
                    return text;
                }
            }
        }

        match code_bytes.len() {
            1 => win_ansi_char(code_bytes[0]).map(String::from).unwrap_or_default(),
            _ => char::from_u32(code).map(String::from).unwrap_or_default(),
        }
    }
}

fn operand_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Content;
    use lopdf::{dictionary, StringFormat};

    fn helvetica() -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        }
    }

    fn run(doc: &LopdfDocument, font: &Dictionary, ops: Vec<Operation>) -> Vec<Glyph> {
        let mut fonts = BTreeMap::new();
        fonts.insert(b"F1".to_vec(), font);
        GlyphCollector::new(doc, fonts).collect(&ops)
    }

    fn text(bytes: &[u8]) -> Object {
        Object::String(bytes.to_vec(), StringFormat::Literal)
    }

    #[test]
    fn test_matrix_composition() {
        let m = Matrix::translate(10.0, 20.0).then(&Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
        assert_eq!(m.apply(1.0, 1.0), (22.0, 42.0));
        assert_eq!(m.vertical_scale(), 2.0);
    }

    #[test]
    fn test_positions_follow_widths() {
        let doc = LopdfDocument::with_version("1.5");
        let font = helvetica();
        let glyphs = run(
            &doc,
            &font,
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new("Tj", vec![text(b"Hi")]),
                Operation::new("ET", vec![]),
            ],
        );

        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].text, "H");
        assert_eq!(glyphs[0].x, 100.0);
        assert_eq!(glyphs[0].y, 700.0);
        assert!((glyphs[0].width - 7.22).abs() < 1e-3);
        assert!((glyphs[1].x - 107.22).abs() < 1e-3);
        assert_eq!(glyphs[1].size, 10.0);
    }

    #[test]
    fn test_leading_and_next_line() {
        let doc = LopdfDocument::with_version("1.5");
        let font = helvetica();
        let glyphs = run(
            &doc,
            &font,
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("TL", vec![14.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![text(b"a")]),
                Operation::new("T*", vec![]),
                Operation::new("Tj", vec![text(b"b")]),
                Operation::new("ET", vec![]),
            ],
        );
        assert_eq!(glyphs[1].x, 72.0);
        assert_eq!(glyphs[1].y, 686.0);
    }

    #[test]
    fn test_tj_adjustment_moves_glyphs() {
        let doc = LopdfDocument::with_version("1.5");
        let font = helvetica();
        let glyphs = run(
            &doc,
            &font,
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new(
                    "TJ",
                    vec![Object::Array(vec![text(b"a"), Object::Integer(-1000), text(b"b")])],
                ),
                Operation::new("ET", vec![]),
            ],
        );
        // 'a' is 556 units; the adjustment adds a full em
        assert!((glyphs[1].x - 15.56).abs() < 1e-3);
    }

    #[test]
    fn test_ctm_and_state_stack() {
        let doc = LopdfDocument::with_version("1.5");
        let font = helvetica();
        let glyphs = run(
            &doc,
            &font,
            vec![
                Operation::new("q", vec![]),
                Operation::new("cm", vec![2.into(), 0.into(), 0.into(), 2.into(), 50.into(), 50.into()]),
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Tj", vec![text(b"a")]),
                Operation::new("ET", vec![]),
                Operation::new("Q", vec![]),
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Tj", vec![text(b"b")]),
                Operation::new("ET", vec![]),
            ],
        );
        assert_eq!((glyphs[0].x, glyphs[0].y), (50.0, 50.0));
        assert_eq!(glyphs[0].size, 20.0);
        assert_eq!((glyphs[1].x, glyphs[1].y), (0.0, 0.0));
    }

    #[test]
    fn test_win_ansi_decoding() {
        let doc = LopdfDocument::with_version("1.5");
        let font = helvetica();
        let glyphs = run(
            &doc,
            &font,
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Tj", vec![text(b"O\x92\x93\xe7")]),
                Operation::new("ET", vec![]),
            ],
        );
        let decoded: String = glyphs.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(decoded, "O\u{2019}\u{201C}ç");
    }

    #[test]
    fn test_decoded_content_stream() {
        let doc = LopdfDocument::with_version("1.5");
        let font = helvetica();
        let content = Content::decode(b"BT /F1 12 Tf 1 0 0 1 72 720 Tm (ok) Tj ET").unwrap();
        let glyphs = run(&doc, &font, content.operations);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].y, 720.0);
    }
}
