//! Question-and-answer sheet.

use crate::error::Result;
use crate::study::StudyCard;

use super::options::{RenderOptions, Rgb, TextAlign};
use super::pdf_writer::{Border, PdfWriter, TextStyle, MM};

const HEADER_FILL: Rgb = Rgb(248, 252, 248);
const HEADER_TEXT: Rgb = Rgb(60, 90, 60);
const ANSWER_TEXT: Rgb = Rgb(20, 20, 20);

/// Render one block per card: header, question, then the highlighted answer.
pub fn questions_pdf(cards: &[StudyCard], options: &RenderOptions) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new(options.page_size);

    for card in cards {
        writer.ensure(30.0 * MM);
        writer.cell(
            &format!("  QUESTÃO {:02} (Pág. {})", card.number, card.page),
            TextStyle::bold(10.0, 8.0).color(HEADER_TEXT),
            TextAlign::Left,
            Some(HEADER_FILL),
            Border::Bottom(options.accent),
        );
        writer.advance(2.0 * MM);
        writer.paragraph(
            &format!("PERGUNTA: {}", card.question),
            TextStyle::bold(10.0, 6.0),
            TextAlign::Left,
            Border::None,
        );
        writer.advance(2.0 * MM);
        writer.cell(
            "RESPOSTA DO MATERIAL:",
            TextStyle::bold(9.0, 6.0).color(options.accent),
            TextAlign::Left,
            None,
            Border::None,
        );
        writer.paragraph(
            &card.answer,
            TextStyle::regular(10.0, 6.0).color(ANSWER_TEXT),
            options.alignment,
            Border::Left(options.accent),
        );
        writer.advance(10.0 * MM);
    }

    writer.finish("Perguntas e respostas")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Highlight, HighlightSet};
    use crate::study::QuestionBank;
    use lopdf::Document;

    #[test]
    fn test_questions_pdf_loads() {
        let set = HighlightSet::from_highlights(vec![
            Highlight::new(2, "A CPI depende de requerimento de um terço dos membros."),
            Highlight::new(5, "Texto sem palavra-chave conhecida."),
        ]);
        let cards = QuestionBank::default().cards(&set);
        let bytes = questions_pdf(&cards, &RenderOptions::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
