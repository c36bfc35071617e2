//! Flashcard sheet: one bordered card per highlight.

use crate::error::Result;
use crate::model::HighlightSet;

use super::options::{RenderOptions, Rgb, TextAlign};
use super::pdf_writer::{Border, PdfWriter, TextStyle, MM};

pub fn flashcards_pdf(set: &HighlightSet, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new(options.page_size);

    for (i, highlight) in set.iter().enumerate() {
        writer.ensure(25.0 * MM);
        writer.cell(
            &format!(" CARTÃO {:02} | PÁGINA {}", i + 1, highlight.page),
            TextStyle::bold(10.0, 8.0).color(Rgb::WHITE),
            TextAlign::Left,
            Some(options.accent),
            Border::Box(options.accent),
        );
        writer.paragraph(
            &highlight.text,
            TextStyle::regular(11.0, 8.0),
            options.alignment,
            Border::Box(options.accent),
        );
        writer.advance(8.0 * MM);
    }

    writer.finish("Flashcards")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Highlight;
    use lopdf::Document;

    #[test]
    fn test_flashcards_pdf_loads() {
        let set = HighlightSet::from_highlights(vec![Highlight::new(7, "Cartão único → com seta")]);
        let bytes = flashcards_pdf(&set, &RenderOptions::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
