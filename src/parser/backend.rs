//! Document reader abstraction.
//!
//! The extractor only needs three things from a PDF: its pages, the
//! annotations on each page and the text lying under a set of regions. The
//! [`DocumentReader`] trait captures exactly that, keeping lopdf types out of
//! the extraction logic and letting tests drive it with in-memory fakes.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::detect;
use crate::error::{Error, Result};
use crate::model::{parse_pdf_date, Annotation, AnnotationKind, Metadata, Rect};

use super::content::GlyphCollector;
use super::font::{number, resolve};
use super::layout::PageText;

/// Read access to an annotated document.
pub trait DocumentReader {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Information about the document.
    fn metadata(&self) -> Metadata;

    /// Annotations of a page (1-indexed), in the page's `/Annots` order.
    fn annotations(&self, page: u32) -> Result<Vec<Annotation>>;

    /// Positioned text of a page (1-indexed).
    fn page_text(&self, page: u32) -> Result<PageText>;

    /// Text lying under `regions` on a page.
    ///
    /// Called once per annotation; implementations that parse pages lazily
    /// should keep the last page around.
    fn text_in(&self, page: u32, regions: &[Rect]) -> Result<String> {
        Ok(self.page_text(page)?.text_in(regions))
    }
}

/// Simple text decoding fallback when no encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// [`DocumentReader`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    last_page: Mutex<Option<(u32, Arc<PageText>)>>,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect::sniff_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect::sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    /// Load from a reader.
    pub fn load_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        log::debug!("Loaded PDF {} with {} pages", doc.version, pages.len());
        Ok(Self {
            doc,
            pages,
            last_page: Mutex::new(None),
        })
    }

    /// Positioned text of a page, reusing the previous result for the same page.
    fn cached_page_text(&self, page: u32) -> Result<Arc<PageText>> {
        if let Ok(cache) = self.last_page.lock() {
            if let Some((cached, text)) = cache.as_ref() {
                if *cached == page {
                    return Ok(Arc::clone(text));
                }
            }
        }

        let text = Arc::new(self.page_text(page)?);
        if let Ok(mut cache) = self.last_page.lock() {
            *cache = Some((page, Arc::clone(&text)));
        }
        Ok(text)
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let contents = match page_dict.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };

        let streams: Vec<&Object> = match resolve(&self.doc, contents) {
            Object::Array(arr) => arr.iter().map(|o| resolve(&self.doc, o)).collect(),
            other => vec![other],
        };

        let mut content = Vec::new();
        for obj in streams {
            match obj {
                Object::Stream(stream) => {
                    let data = stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone());
                    content.extend_from_slice(&data);
                    content.push(b'\n');
                }
                _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
            }
        }
        Ok(content)
    }

    fn read_annotation(&self, dict: &Dictionary) -> Option<Annotation> {
        let subtype = dict.get(b"Subtype").ok()?.as_name().ok()?;
        let kind = AnnotationKind::from_subtype(subtype);

        let rect = self.numbers(dict, b"Rect")?;
        let [x0, y0, x1, y1] = rect[..] else {
            return None;
        };

        let mut annotation = Annotation::new(kind, Rect::new(x0, y0, x1, y1));
        if let Some(points) = self.numbers(dict, b"QuadPoints") {
            annotation = annotation.with_quads(Rect::from_quad_points(&points));
        }
        Some(annotation)
    }

    fn numbers(&self, dict: &Dictionary, key: &[u8]) -> Option<Vec<f32>> {
        let arr = resolve(&self.doc, dict.get(key).ok()?).as_array().ok()?;
        arr.iter().map(|o| number(&self.doc, o)).collect()
    }
}

impl DocumentReader for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());
        metadata.page_count = self.page_count();
        metadata.encrypted = self.doc.is_encrypted();

        let info = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .map(|o| resolve(&self.doc, o))
            .and_then(|o| o.as_dict().ok());

        if let Some(info) = info {
            metadata.title = get_string_from_dict(info, b"Title");
            metadata.author = get_string_from_dict(info, b"Author");
            metadata.created =
                get_string_from_dict(info, b"CreationDate").and_then(|d| parse_pdf_date(&d));
        }

        metadata
    }

    fn annotations(&self, page: u32) -> Result<Vec<Annotation>> {
        let page_dict = self.doc.get_dictionary(self.page_id(page)?)?;

        let annots = match page_dict.get(b"Annots") {
            Ok(obj) => resolve(&self.doc, obj),
            Err(_) => return Ok(Vec::new()),
        };
        let annots = annots
            .as_array()
            .map_err(|_| Error::PdfParse(format!("Page {} has a malformed /Annots entry", page)))?;

        let mut result = Vec::with_capacity(annots.len());
        for entry in annots {
            let Ok(dict) = resolve(&self.doc, entry).as_dict() else {
                log::debug!("Page {}: skipping non-dictionary annotation", page);
                continue;
            };
            match self.read_annotation(dict) {
                Some(annotation) => result.push(annotation),
                None => log::debug!("Page {}: skipping annotation without /Subtype or /Rect", page),
            }
        }
        Ok(result)
    }

    fn page_text(&self, page: u32) -> Result<PageText> {
        let page_id = self.page_id(page)?;
        let data = self.page_content(page_id)?;
        if data.is_empty() {
            return Ok(PageText::default());
        }

        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| Error::TextExtract(format!("page {}: {}", page, e)))?;
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let glyphs = GlyphCollector::new(&self.doc, fonts).collect(&content.operations);
        log::debug!("Page {}: {} glyphs", page, glyphs.len());
        Ok(PageText::new(glyphs))
    }

    fn text_in(&self, page: u32, regions: &[Rect]) -> Result<String> {
        Ok(self.cached_page_text(page)?.text_in(regions))
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    };
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, StringFormat};

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_string_from_dict() {
        let dict = dictionary! {
            "Title" => Object::String(b"Direito".to_vec(), StringFormat::Literal),
            "Blank" => Object::String(b"  ".to_vec(), StringFormat::Literal),
        };
        assert_eq!(get_string_from_dict(&dict, b"Title").as_deref(), Some("Direito"));
        assert_eq!(get_string_from_dict(&dict, b"Blank"), None);
        assert_eq!(get_string_from_dict(&dict, b"Missing"), None);
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        assert!(matches!(
            LopdfBackend::load_bytes(b"PK\x03\x04 not a pdf"),
            Err(Error::UnknownFormat)
        ));
    }
}
