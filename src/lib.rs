//! # unmark
//!
//! Extract highlighted passages from PDF documents and turn them into study
//! material.
//!
//! Highlight annotations are located page by page, the text lying under each
//! one is recovered from the page content stream and cleaned up for
//! typesetting, and the resulting passages feed a summary (PDF and Word), a
//! question-and-answer sheet, flashcards and a quiz.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unmark::{extract_file, render};
//!
//! fn main() -> unmark::Result<()> {
//!     let highlights = extract_file("apostila.pdf")?;
//!
//!     for h in &highlights {
//!         println!("p.{}: {}", h.page, h.text);
//!     }
//!
//!     let pdf = render::summary_pdf(&highlights, "Revisão", &render::RenderOptions::default())?;
//!     std::fs::write("Resumo.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Text normalization
//!
//! ```
//! assert_eq!(
//!     unmark::normalize("“Lei Federal5”\n de 1990."),
//!     "\"Lei Federal\" de 1990."
//! );
//! ```

pub mod detect;
pub mod error;
pub mod fonts;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod study;

// Re-export commonly used types
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use model::{Annotation, AnnotationKind, Highlight, HighlightSet, Metadata, Rect};
pub use normalize::{normalize, NormalizeOptions, Normalizer, PeriodFootnote};
pub use parser::{
    DocumentReader, ErrorMode, ExtractOptions, HighlightExtractor, LopdfBackend, PageSelection,
};
pub use render::{Artifact, ExtractionStats, JsonFormat, RenderOptions, Rgb, TextAlign};
pub use study::{QuestionBank, Quiz, StudyCard, Verdict};

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Label used in titles and file names when none is given.
pub const DEFAULT_LABEL: &str = "Revisão Ponto 6";

/// Extract the highlights of a PDF file.
///
/// # Example
///
/// ```no_run
/// let set = unmark::extract_file("apostila.pdf").unwrap();
/// println!("{} highlights", set.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<HighlightSet> {
    HighlightExtractor::open(path)?.extract()
}

/// Extract from a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use unmark::{extract_file_with_options, ExtractOptions, PageSelection};
///
/// let options = ExtractOptions::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=10));
/// let set = extract_file_with_options("apostila.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<HighlightSet> {
    HighlightExtractor::open_with_options(path, options)?.extract()
}

/// Extract the highlights of a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<HighlightSet> {
    HighlightExtractor::from_bytes(data)?.extract()
}

/// Extract from bytes with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<HighlightSet> {
    HighlightExtractor::from_bytes_with_options(data, options)?.extract()
}

/// Extract the highlights of a PDF read from `reader`.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
///
/// let file = File::open("apostila.pdf").unwrap();
/// let set = unmark::extract_reader(file).unwrap();
/// ```
pub fn extract_reader<R: Read>(reader: R) -> Result<HighlightSet> {
    HighlightExtractor::from_reader(reader)?.extract()
}

/// Builder tying extraction and output settings together.
///
/// # Example
///
/// ```no_run
/// use unmark::Unmark;
///
/// let result = Unmark::new()
///     .with_label("Direito Constitucional")
///     .lenient()
///     .extract("apostila.pdf")?;
///
/// for path in result.write_all("saida")? {
///     println!("{}", path.display());
/// }
/// # Ok::<(), unmark::Error>(())
/// ```
pub struct Unmark {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
    bank: QuestionBank,
    label: String,
}

impl Unmark {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
            bank: QuestionBank::default(),
            label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Set the label used in titles and file names.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Restrict extraction to some pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Collect underlines, strike-outs and squiggles too.
    pub fn all_markup(mut self) -> Self {
        self.extract_options = self.extract_options.all_markup();
        self
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Use a custom question bank.
    pub fn with_question_bank(mut self, bank: QuestionBank) -> Self {
        self.bank = bank;
        self
    }

    /// Extract highlights from a PDF file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<UnmarkResult> {
        let highlights = HighlightExtractor::open_with_options(path, self.extract_options.clone())?
            .extract()?;
        Ok(self.into_result(highlights))
    }

    /// Extract highlights from bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<UnmarkResult> {
        let highlights =
            HighlightExtractor::from_bytes_with_options(data, self.extract_options.clone())?
                .extract()?;
        Ok(self.into_result(highlights))
    }

    /// Wrap highlights obtained elsewhere.
    pub fn from_highlights(self, highlights: HighlightSet) -> UnmarkResult {
        self.into_result(highlights)
    }

    fn into_result(self, highlights: HighlightSet) -> UnmarkResult {
        UnmarkResult {
            highlights,
            label: self.label,
            render_options: self.render_options,
            bank: self.bank,
        }
    }
}

impl Default for Unmark {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracted highlights together with the settings to render them.
pub struct UnmarkResult {
    /// The extracted highlights
    pub highlights: HighlightSet,
    label: String,
    render_options: RenderOptions,
    bank: QuestionBank,
}

impl UnmarkResult {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// One question card per highlight.
    pub fn cards(&self) -> Vec<StudyCard> {
        self.bank.cards(&self.highlights)
    }

    /// A random quiz of up to `size` statements.
    pub fn quiz(&self, size: usize) -> Quiz {
        Quiz::sample(&self.highlights, size)
    }

    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_set(&self.highlights)
    }

    /// Render one artifact to bytes.
    pub fn render(&self, artifact: Artifact) -> Result<Vec<u8>> {
        render::render_artifact(
            artifact,
            &self.highlights,
            &self.bank,
            &self.label,
            &self.render_options,
        )
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.highlights, format)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.highlights)
    }

    /// Short listing of the first highlights.
    pub fn preview(&self) -> String {
        render::preview(&self.highlights, render::DEFAULT_PREVIEW_ITEMS)
    }

    /// Write every artifact into `dir`, creating it if needed.
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(Artifact::ALL.len());
        for artifact in Artifact::ALL {
            let path = dir.join(artifact.file_name(&self.label));
            fs::write(&path, self.render(artifact)?)?;
            log::debug!("Wrote {} to {}", artifact.description(), path.display());
            written.push(path);
        }
        Ok(written)
    }
}
