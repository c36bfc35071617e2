//! Output writers for extracted highlights.
//!
//! PDF outputs are written with lopdf using the standard Helvetica fonts, so
//! characters outside WinAnsi come out as `?`. The Word summary keeps the
//! text as-is.

mod docx;
mod flashcards;
mod json;
mod options;
mod pdf_writer;
mod questions;
mod result;
mod summary;
mod text;

pub use docx::summary_docx;
pub use flashcards::flashcards_pdf;
pub use json::{to_json, JsonFormat};
pub use options::{Artifact, PageSize, RenderOptions, Rgb, TextAlign, DEFAULT_ACCENT, DEFAULT_TITLE};
pub use questions::questions_pdf;
pub use result::ExtractionStats;
pub use summary::summary_pdf;
pub use text::{preview, to_text, DEFAULT_PREVIEW_ITEMS};

use crate::error::Result;
use crate::model::HighlightSet;
use crate::study::QuestionBank;

/// Render one artifact to bytes.
pub fn render_artifact(
    artifact: Artifact,
    set: &HighlightSet,
    bank: &QuestionBank,
    label: &str,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    match artifact {
        Artifact::SummaryPdf => summary_pdf(set, label, options),
        Artifact::SummaryDocx => summary_docx(set, label, options),
        Artifact::Questions => questions_pdf(&bank.cards(set), options),
        Artifact::Flashcards => flashcards_pdf(set, options),
    }
}
