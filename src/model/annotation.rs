//! Annotation geometry and classification.

use serde::{Deserialize, Serialize};

/// Markup annotation kinds, from the `/Subtype` entry of an annotation dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Highlighter marker
    Highlight,
    /// Underline marker
    Underline,
    /// Strike-through marker
    StrikeOut,
    /// Wavy underline marker
    Squiggly,
    /// Sticky note
    Text,
    /// Free text box
    FreeText,
    /// Any other subtype (links, widgets, stamps, ...)
    Other(String),
}

impl AnnotationKind {
    /// Classify a `/Subtype` name.
    pub fn from_subtype(name: &[u8]) -> Self {
        match name {
            b"Highlight" => Self::Highlight,
            b"Underline" => Self::Underline,
            b"StrikeOut" => Self::StrikeOut,
            b"Squiggly" => Self::Squiggly,
            b"Text" => Self::Text,
            b"FreeText" => Self::FreeText,
            other => Self::Other(String::from_utf8_lossy(other).into_owned()),
        }
    }
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Highlight => write!(f, "highlight"),
            Self::Underline => write!(f, "underline"),
            Self::StrikeOut => write!(f, "strikeout"),
            Self::Squiggly => write!(f, "squiggly"),
            Self::Text => write!(f, "text"),
            Self::FreeText => write!(f, "freetext"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// An axis-aligned rectangle in default user space (points, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from two corners in any order.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Bounding box of one `/QuadPoints` quadrilateral (8 numbers).
    pub fn from_quad(quad: &[f32]) -> Option<Self> {
        if quad.len() != 8 {
            return None;
        }
        let xs = [quad[0], quad[2], quad[4], quad[6]];
        let ys = [quad[1], quad[3], quad[5], quad[7]];
        let min = |v: &[f32; 4]| v.iter().copied().fold(f32::INFINITY, f32::min);
        let max = |v: &[f32; 4]| v.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Some(Self::new(min(&xs), min(&ys), max(&xs), max(&ys)))
    }

    /// Split a flat `/QuadPoints` array into one rectangle per quad.
    pub fn from_quad_points(points: &[f32]) -> Vec<Self> {
        points.chunks_exact(8).filter_map(Self::from_quad).collect()
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// One annotation on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation subtype
    pub kind: AnnotationKind,

    /// The `/Rect` bounding box
    pub rect: Rect,

    /// Per-line quads from `/QuadPoints`; empty when absent
    pub quads: Vec<Rect>,
}

impl Annotation {
    /// Create an annotation with a bounding box only.
    pub fn new(kind: AnnotationKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            quads: Vec::new(),
        }
    }

    /// Attach per-line quads.
    pub fn with_quads(mut self, quads: Vec<Rect>) -> Self {
        self.quads = quads;
        self
    }

    /// Regions that select the marked text: the quads when present, else the bounding box.
    pub fn regions(&self) -> Vec<Rect> {
        if self.quads.is_empty() {
            vec![self.rect]
        } else {
            self.quads.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_subtype() {
        assert_eq!(AnnotationKind::from_subtype(b"Highlight"), AnnotationKind::Highlight);
        assert_eq!(AnnotationKind::from_subtype(b"StrikeOut"), AnnotationKind::StrikeOut);
        assert_eq!(
            AnnotationKind::from_subtype(b"Link"),
            AnnotationKind::Other("Link".to_string())
        );
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let r = Rect::new(200.0, 700.0, 100.0, 650.0);
        assert_eq!(r, Rect::new(100.0, 650.0, 200.0, 700.0));
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert!(r.contains_point(100.0, 650.0));
        assert!(r.contains_point(150.0, 675.0));
        assert!(!r.contains_point(201.0, 675.0));
    }

    #[test]
    fn test_rect_from_quad_points() {
        // Two lines, quads in the usual (x1 y1 x2 y2 x3 y3 x4 y4) reading order
        let points = [
            72.0, 712.0, 300.0, 712.0, 72.0, 698.0, 300.0, 698.0, //
            72.0, 698.0, 180.0, 698.0, 72.0, 684.0, 180.0, 684.0,
        ];
        let quads = Rect::from_quad_points(&points);
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0], Rect::new(72.0, 698.0, 300.0, 712.0));
        assert_eq!(quads[1], Rect::new(72.0, 684.0, 180.0, 698.0));
        assert_eq!(
            quads[0].union(&quads[1]),
            Rect::new(72.0, 684.0, 300.0, 712.0)
        );
    }

    #[test]
    fn test_annotation_regions_prefer_quads() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let plain = Annotation::new(AnnotationKind::Highlight, rect);
        assert_eq!(plain.regions(), vec![rect]);

        let quad = Rect::new(1.0, 1.0, 2.0, 2.0);
        let with_quads = plain.with_quads(vec![quad]);
        assert_eq!(with_quads.regions(), vec![quad]);
    }
}
