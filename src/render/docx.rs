//! Word (.docx) summary.

use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts};

use crate::error::{Error, Result};
use crate::model::HighlightSet;

use super::options::{RenderOptions, TextAlign};

const BODY_FONT: &str = "Arial";

/// Body size in half-points (12pt).
const BODY_SIZE: usize = 24;

/// Render the summary as a Word document.
pub fn summary_docx(set: &HighlightSet, label: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    let accent = options.accent.hex();
    let alignment = match options.alignment {
        TextAlign::Justify => AlignmentType::Both,
        TextAlign::Left => AlignmentType::Left,
        TextAlign::Center => AlignmentType::Center,
    };

    let mut docx = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(&options.title).bold().size(36).color(&accent)),
        )
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(label).bold()),
        );

    for (i, highlight) in set.iter().enumerate() {
        let header = Run::new()
            .add_text(format!("ITEM {:02} | PÁGINA {}", i + 1, highlight.page))
            .bold()
            .color(&accent)
            .add_break(BreakType::TextWrapping);
        let body = Run::new()
            .add_text(&highlight.text)
            .size(BODY_SIZE)
            .fonts(RunFonts::new().ascii(BODY_FONT).hi_ansi(BODY_FONT));

        docx = docx.add_paragraph(Paragraph::new().align(alignment).add_run(header).add_run(body));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| Error::Render(format!("Word document error: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Highlight;

    #[test]
    fn test_summary_docx_is_zip() {
        let set = HighlightSet::from_highlights(vec![
            Highlight::new(1, "Primeiro destaque"),
            Highlight::new(2, "Segundo → com seta"),
        ]);
        let bytes = summary_docx(&set, "Revisão Ponto 6", &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_summary_docx_empty_set() {
        let bytes = summary_docx(&HighlightSet::default(), "Vazio", &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
