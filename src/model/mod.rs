//! Data model shared by extraction, study material generation and rendering.
//!
//! Highlights are created once during extraction and are immutable
//! afterwards; every output writer consumes the same ordered
//! [`HighlightSet`].

mod annotation;
mod highlight;
mod metadata;

pub use annotation::{Annotation, AnnotationKind, Rect};
pub use highlight::{Highlight, HighlightSet};
pub use metadata::{parse_pdf_date, Metadata};
