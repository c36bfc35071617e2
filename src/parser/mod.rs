//! PDF reading and highlight extraction.

mod backend;
mod content;
mod extractor;
mod font;
mod layout;
mod options;

pub use backend::{DocumentReader, LopdfBackend};
pub use extractor::HighlightExtractor;
pub use layout::{Glyph, PageText};
pub use options::{ErrorMode, ExtractOptions, PageSelection};
