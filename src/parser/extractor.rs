//! Highlight extraction.

use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::{Highlight, HighlightSet};
use crate::normalize::Normalizer;

use super::backend::{DocumentReader, LopdfBackend};
use super::options::{ErrorMode, ExtractOptions};

/// Collects the text under highlight annotations, page by page.
pub struct HighlightExtractor<R: DocumentReader> {
    reader: R,
    options: ExtractOptions,
    normalizer: Normalizer,
}

impl HighlightExtractor<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        Ok(Self::with_options(LopdfBackend::load_file(path)?, options))
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Open a PDF held in memory with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        Ok(Self::with_options(LopdfBackend::load_bytes(data)?, options))
    }

    /// Open a PDF from a reader.
    pub fn from_reader<Rd: Read>(reader: Rd) -> Result<Self> {
        Ok(Self::new(LopdfBackend::load_reader(reader)?))
    }
}

impl<R: DocumentReader> HighlightExtractor<R> {
    /// Wrap a document reader with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ExtractOptions::default())
    }

    /// Wrap a document reader with custom options.
    pub fn with_options(reader: R, options: ExtractOptions) -> Self {
        let normalizer = Normalizer::new(options.normalize.clone());
        Self {
            reader,
            options,
            normalizer,
        }
    }

    /// Replace the normalizer (e.g. to plug in another footnote policy).
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The underlying document reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every selected annotation, in page order then annotation order.
    ///
    /// Entries whose text normalizes to nothing are dropped. A document
    /// without highlights yields an empty set.
    pub fn extract(&self) -> Result<HighlightSet> {
        let mut set = HighlightSet::new(self.reader.metadata());

        for page in 1..=self.reader.page_count() {
            if !self.options.pages.includes(page) {
                continue;
            }

            match self.extract_page(page) {
                Ok(highlights) => {
                    for highlight in highlights {
                        set.push(highlight);
                    }
                }
                Err(e) => match self.options.error_mode {
                    ErrorMode::Strict => return Err(e),
                    ErrorMode::Lenient => {
                        log::warn!("Skipping page {}: {}", page, e);
                    }
                },
            }
        }

        log::debug!("Extracted {} highlights", set.len());
        Ok(set)
    }

    /// Extract the selected annotations of a single page.
    pub fn extract_page(&self, page: u32) -> Result<Vec<Highlight>> {
        let annotations: Vec<_> = self
            .reader
            .annotations(page)?
            .into_iter()
            .filter(|a| self.options.wants(&a.kind))
            .collect();

        if annotations.is_empty() {
            return Ok(Vec::new());
        }

        let mut highlights = Vec::with_capacity(annotations.len());

        for (index, annotation) in annotations.iter().enumerate() {
            let raw = self.reader.text_in(page, &annotation.regions())?;
            let cleaned = self.normalizer.normalize(&raw);

            if cleaned.is_empty() {
                log::debug!("Page {}: {} #{} has no text", page, annotation.kind, index + 1);
                continue;
            }
            log::debug!("Page {}: {} #{}: {:?}", page, annotation.kind, index + 1, cleaned);
            highlights.push(Highlight::new(page, cleaned));
        }

        Ok(highlights)
    }
}
