//! Synthetic annotated PDFs for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

pub const FONT_SIZE: f32 = 12.0;
pub const LEFT: f32 = 72.0;

/// A line of WinAnsi-encoded text at a baseline.
pub struct Line {
    pub y: f32,
    pub bytes: Vec<u8>,
}

impl Line {
    pub fn new(y: f32, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            y,
            bytes: bytes.into(),
        }
    }
}

/// An annotation dictionary to attach to a page.
pub struct Mark {
    pub subtype: &'static str,
    pub rect: [f32; 4],
    pub quads: Option<Vec<f32>>,
}

impl Mark {
    /// A mark of `subtype` covering the whole width of the line at `y`.
    pub fn over_line(subtype: &'static str, y: f32) -> Self {
        Self {
            subtype,
            rect: band(y),
            quads: None,
        }
    }

    pub fn highlight(y: f32) -> Self {
        Self::over_line("Highlight", y)
    }

    /// A highlight spanning several lines, described by one quad per line.
    pub fn multiline(lines: &[f32]) -> Self {
        let mut quads = Vec::new();
        let mut rect = band(lines[0]);
        for &y in lines {
            let [x0, y0, x1, y1] = band(y);
            quads.extend_from_slice(&[x0, y1, x1, y1, x0, y0, x1, y0]);
            rect = [rect[0].min(x0), rect[1].min(y0), rect[2].max(x1), rect[3].max(y1)];
        }
        Self {
            subtype: "Highlight",
            rect,
            quads: Some(quads),
        }
    }
}

/// Vertical band around one line of text.
fn band(y: f32) -> [f32; 4] {
    [LEFT - 4.0, y - 3.0, 560.0, y + FONT_SIZE - 2.0]
}

#[derive(Default)]
pub struct PageSpec {
    pub lines: Vec<Line>,
    pub marks: Vec<Mark>,
}

impl PageSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, y: f32, bytes: impl Into<Vec<u8>>) -> Self {
        self.lines.push(Line::new(y, bytes));
        self
    }

    pub fn mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }
}

fn numbers(values: &[f32]) -> Object {
    Object::Array(values.iter().map(|v| Object::Real(*v)).collect())
}

/// Build a PDF with Helvetica text and the given annotations.
pub fn build_pdf(pages: Vec<PageSpec>) -> Vec<u8> {
    save(build_document(pages))
}

/// Same as [`build_pdf`], with a standard security handler in the trailer.
pub fn build_encrypted_pdf(pages: Vec<PageSpec>) -> Vec<u8> {
    let mut doc = build_document(pages);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "O" => Object::String(vec![0u8; 32], StringFormat::Hexadecimal),
        "U" => Object::String(vec![0u8; 32], StringFormat::Hexadecimal),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    save(doc)
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn build_document(pages: Vec<PageSpec>) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for spec in pages {
        let mut operations = Vec::new();
        for line in &spec.lines {
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
                Operation::new("Td", vec![LEFT.into(), line.y.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(line.bytes.clone(), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ]);
        }
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let annots: Vec<Object> = spec
            .marks
            .iter()
            .map(|mark| {
                let mut dict = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => mark.subtype,
                    "Rect" => numbers(&mark.rect),
                };
                if let Some(ref quads) = mark.quads {
                    dict.set("QuadPoints", numbers(quads));
                }
                doc.add_object(dict).into()
            })
            .collect();

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => numbers(&[0.0, 0.0, 595.0, 842.0]),
            "Resources" => resources_id,
            "Contents" => content_id,
            "Annots" => annots,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Apostila de teste"),
        "Author" => Object::string_literal("unmark"),
        "CreationDate" => Object::string_literal("D:20240115103000Z"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc
}
