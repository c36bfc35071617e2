//! Glyph widths for fonts referenced by a page.

use std::collections::HashMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::fonts::{helvetica_width, FontWeight};

/// Width used when a font gives no information at all.
const FALLBACK_WIDTH: f32 = 500.0;

/// Glyph advance widths of one font, in 1/1000 text space units.
#[derive(Debug, Clone)]
pub(crate) struct FontMetrics {
    /// Bytes per character code (2 for Type0 fonts)
    pub code_len: usize,
    first_char: u32,
    widths: Vec<f32>,
    cid_widths: HashMap<u32, f32>,
    default_width: f32,
    builtin: Option<FontWeight>,
}

impl FontMetrics {
    /// Metrics for a font whose dictionary could not be read.
    pub fn unknown() -> Self {
        Self {
            code_len: 1,
            first_char: 0,
            widths: Vec::new(),
            cid_widths: HashMap::new(),
            default_width: FALLBACK_WIDTH,
            builtin: None,
        }
    }

    /// Read metrics from a font dictionary.
    pub fn from_dict(doc: &LopdfDocument, font: &Dictionary) -> Self {
        let subtype = font
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .unwrap_or(b"");

        if subtype == b"Type0" {
            return Self::from_type0(doc, font);
        }

        let first_char = font
            .get(b"FirstChar")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0)
            .max(0) as u32;

        let widths = font
            .get(b"Widths")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_array().ok())
            .map(|arr| arr.iter().map(|w| number(doc, w).unwrap_or(0.0)).collect())
            .unwrap_or_default();

        let missing_width = font
            .get(b"FontDescriptor")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_dict().ok())
            .and_then(|d| d.get(b"MissingWidth").ok())
            .and_then(|o| number(doc, o));

        let base_font = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_lowercase())
            .unwrap_or_default();
        let builtin = if base_font.contains("helvetica") || base_font.contains("arial") {
            Some(if base_font.contains("bold") {
                FontWeight::Bold
            } else {
                FontWeight::Regular
            })
        } else {
            None
        };

        Self {
            code_len: 1,
            first_char,
            widths,
            cid_widths: HashMap::new(),
            default_width: missing_width.unwrap_or(FALLBACK_WIDTH),
            builtin,
        }
    }

    fn from_type0(doc: &LopdfDocument, font: &Dictionary) -> Self {
        let descendant = font
            .get(b"DescendantFonts")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_array().ok())
            .and_then(|arr| arr.first())
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_dict().ok());

        let mut metrics = Self {
            code_len: 2,
            default_width: 1000.0,
            ..Self::unknown()
        };

        if let Some(cid_font) = descendant {
            if let Some(dw) = cid_font.get(b"DW").ok().and_then(|o| number(doc, o)) {
                metrics.default_width = dw;
            }
            if let Some(w) = cid_font
                .get(b"W")
                .ok()
                .map(|o| resolve(doc, o))
                .and_then(|o| o.as_array().ok())
            {
                metrics.cid_widths = parse_cid_widths(doc, w);
            }
        }

        metrics
    }

    /// Advance width of a character code.
    pub fn width(&self, code: u32) -> f32 {
        if self.code_len == 2 {
            return self
                .cid_widths
                .get(&code)
                .copied()
                .unwrap_or(self.default_width);
        }

        if let Some(w) = code
            .checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize))
        {
            return *w;
        }

        match self.builtin {
            Some(weight) if code <= 0xFF => helvetica_width(code as u8, weight) as f32,
            _ => self.default_width,
        }
    }
}

/// Parse a CIDFont `/W` array: `c [w1 w2 ...]` and `c_first c_last w` entries.
fn parse_cid_widths(doc: &LopdfDocument, w: &[Object]) -> HashMap<u32, f32> {
    let mut widths = HashMap::new();
    let mut i = 0;

    while i < w.len() {
        let Some(start) = number(doc, &w[i]).map(|n| n as u32) else {
            break;
        };

        match w.get(i + 1).map(|o| resolve(doc, o)) {
            Some(Object::Array(list)) => {
                for (offset, item) in list.iter().enumerate() {
                    if let Some(width) = number(doc, item) {
                        widths.insert(start + offset as u32, width);
                    }
                }
                i += 2;
            }
            Some(end) => {
                let (Some(end), Some(width)) =
                    (number(doc, end), w.get(i + 2).and_then(|o| number(doc, o)))
                else {
                    break;
                };
                for cid in start..=(end as u32) {
                    widths.insert(cid, width);
                }
                i += 3;
            }
            None => break,
        }
    }

    widths
}

/// Follow an indirect reference, returning the object itself otherwise.
pub(crate) fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Read a number, following references.
pub(crate) fn number(doc: &LopdfDocument, obj: &Object) -> Option<f32> {
    match resolve(doc, obj) {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_simple_font_widths() {
        let doc = LopdfDocument::with_version("1.5");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "Georgia",
            "FirstChar" => 65,
            "Widths" => vec![Object::Integer(600), Object::Integer(700)],
        };
        let metrics = FontMetrics::from_dict(&doc, &font);
        assert_eq!(metrics.code_len, 1);
        assert_eq!(metrics.width(65), 600.0);
        assert_eq!(metrics.width(66), 700.0);
        assert_eq!(metrics.width(67), FALLBACK_WIDTH);
        assert_eq!(metrics.width(10), FALLBACK_WIDTH);
    }

    #[test]
    fn test_standard_helvetica_without_widths() {
        let doc = LopdfDocument::with_version("1.5");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        };
        let metrics = FontMetrics::from_dict(&doc, &font);
        assert_eq!(metrics.width(b'b' as u32), 611.0);
    }

    #[test]
    fn test_cid_width_array() {
        let doc = LopdfDocument::with_version("1.5");
        let w = vec![
            Object::Integer(1),
            Object::Array(vec![Object::Integer(250), Object::Integer(300)]),
            Object::Integer(10),
            Object::Integer(12),
            Object::Integer(900),
        ];
        let widths = parse_cid_widths(&doc, &w);
        assert_eq!(widths.get(&1), Some(&250.0));
        assert_eq!(widths.get(&2), Some(&300.0));
        assert_eq!(widths.get(&11), Some(&900.0));
        assert_eq!(widths.get(&13), None);
    }
}
