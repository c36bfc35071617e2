//! Integration tests for study material outputs.

mod common;

use common::{build_pdf, Mark, PageSpec};
use lopdf::Document;
use unmark::render::{self, JsonFormat};
use unmark::{Artifact, Highlight, HighlightSet, QuestionBank, RenderOptions, Rgb, TextAlign, Unmark};

fn sample() -> HighlightSet {
    HighlightSet::from_highlights(vec![
        Highlight::new(1, "A CPI será criada a requerimento de um terço dos membros."),
        Highlight::new(2, "A imunidade material protege opiniões, palavras e votos."),
        Highlight::new(4, "Texto com seta → fora do WinAnsi."),
    ])
}

#[test]
fn test_every_artifact_reloads() {
    let set = sample();
    let bank = QuestionBank::default();
    let options = RenderOptions::default();

    for artifact in Artifact::ALL {
        let bytes = render::render_artifact(artifact, &set, &bank, "Ponto 6", &options).unwrap();
        match artifact {
            Artifact::SummaryDocx => assert!(bytes.starts_with(b"PK")),
            _ => {
                let doc = Document::load_mem(&bytes).unwrap();
                assert!(!doc.get_pages().is_empty());
            }
        }
    }
}

#[test]
fn test_custom_render_options() {
    let options = RenderOptions::new()
        .with_accent("#336699".parse::<Rgb>().unwrap())
        .with_title("RESUMO")
        .with_alignment(TextAlign::Left)
        .with_page_size(render::PageSize::LETTER);

    let bytes = render::summary_pdf(&sample(), "Ponto 6", &options).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    let media_box = doc
        .get_dictionary(page_id)
        .and_then(|page| page.get(b"Parent"))
        .and_then(|parent| parent.as_reference())
        .and_then(|id| doc.get_dictionary(id))
        .and_then(|pages| pages.get(b"MediaBox"))
        .and_then(|mb| mb.as_array())
        .unwrap();
    assert_eq!(media_box[2].as_float().unwrap(), 612.0);
}

#[test]
fn test_empty_set_still_renders() {
    let result = Unmark::new().from_highlights(HighlightSet::default());
    assert!(result.is_empty());
    for artifact in Artifact::ALL {
        assert!(!result.render(artifact).unwrap().is_empty());
    }
}

#[test]
fn test_json_and_text_outputs() {
    let set = sample();

    let json = render::to_json(&set, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["highlights"][1]["page"], 2);
    assert_eq!(value["highlights"].as_array().unwrap().len(), 3);

    let text = render::to_text(&set);
    assert!(text.starts_with("[Página 1]\nA CPI"));

    let preview = render::preview(&set, 2);
    assert!(preview.ends_with("...e mais 1 itens"));
}

#[test]
fn test_cards_and_quiz() {
    let result = Unmark::new().from_highlights(sample());

    let cards = result.cards();
    assert!(cards[0].question.contains("CPI"));
    assert!(cards[2].question.starts_with("Explique o que o material aborda sobre"));

    let quiz = result.quiz(10);
    assert_eq!(quiz.len(), 3);
    let answers = vec![unmark::Verdict::Certo; quiz.len()];
    assert_eq!(quiz.grade(&answers).correct, 3);
}

#[test]
fn test_end_to_end_build() {
    let pdf = build_pdf(vec![
        PageSpec::new()
            .line(700.0, "A CPI tem prazo certo.")
            .mark(Mark::highlight(700.0)),
        PageSpec::new()
            .line(700.0, "Improbidade exige dolo.")
            .mark(Mark::highlight(700.0)),
    ]);

    let dir = tempfile::tempdir().unwrap();
    let result = Unmark::new()
        .with_label("Ponto 6")
        .extract_bytes(&pdf)
        .unwrap();
    assert_eq!(result.highlights.len(), 2);

    let written = result.write_all(dir.path()).unwrap();
    assert_eq!(written.len(), 4);
    assert!(dir.path().join("Resumo_Ponto_6.pdf").exists());
    assert!(dir.path().join("Roteiro_PR_Ponto_6.pdf").exists());

    let summary = std::fs::read(dir.path().join("Resumo_Ponto_6.pdf")).unwrap();
    assert!(Document::load_mem(&summary).is_ok());
}
