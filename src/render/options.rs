//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default accent color of the study material.
pub const DEFAULT_ACCENT: Rgb = Rgb(166, 201, 138);

/// Default banner title.
pub const DEFAULT_TITLE: &str = "RESUMO INTELIGENTE";

/// Options for writing study material.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Accent color for banners, headers and borders
    pub accent: Rgb,

    /// Banner title of summaries
    pub title: String,

    /// Alignment of highlight bodies
    pub alignment: TextAlign,

    /// Page size of PDF outputs
    pub page_size: PageSize,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accent color.
    pub fn with_accent(mut self, accent: Rgb) -> Self {
        self.accent = accent;
        self
    }

    /// Set the banner title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set body alignment.
    pub fn with_alignment(mut self, alignment: TextAlign) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            accent: DEFAULT_ACCENT,
            title: DEFAULT_TITLE.to_string(),
            alignment: TextAlign::Justify,
            page_size: PageSize::A4,
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Components scaled to 0.0..=1.0 for PDF color operators.
    pub fn unit(&self) -> [f32; 3] {
        [self.0, self.1, self.2].map(|c| c as f32 / 255.0)
    }

    /// Hex digits without `#` (the form Word expects).
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parse `#RRGGBB` or `RRGGBB`.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || Error::Other(format!("Invalid color '{}': expected #RRGGBB", s));

        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Horizontal alignment of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Justify,
    Left,
    Center,
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::LETTER),
            other => Err(Error::Other(format!("Unknown page size '{}'", other))),
        }
    }
}

/// The files produced for a set of highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    SummaryPdf,
    SummaryDocx,
    Questions,
    Flashcards,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::SummaryPdf,
        Artifact::SummaryDocx,
        Artifact::Questions,
        Artifact::Flashcards,
    ];

    /// File name for this artifact; spaces in the label become `_`.
    pub fn file_name(&self, label: &str) -> String {
        let label = label.trim().replace(' ', "_");
        match self {
            Artifact::SummaryPdf => format!("Resumo_{}.pdf", label),
            Artifact::SummaryDocx => format!("Resumo_{}.docx", label),
            Artifact::Questions => format!("Roteiro_PR_{}.pdf", label),
            Artifact::Flashcards => format!("Flashcards_{}.pdf", label),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Artifact::SummaryPdf => "summary (PDF)",
            Artifact::SummaryDocx => "summary (Word)",
            Artifact::Questions => "questions and answers",
            Artifact::Flashcards => "flashcards",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.accent, Rgb(166, 201, 138));
        assert_eq!(options.title, "RESUMO INTELIGENTE");
        assert_eq!(options.alignment, TextAlign::Justify);
        assert_eq!(options.page_size, PageSize::A4);
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#A6C98A".parse::<Rgb>().unwrap(), DEFAULT_ACCENT);
        assert_eq!("ff0000".parse::<Rgb>().unwrap(), Rgb(255, 0, 0));
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
        assert_eq!(DEFAULT_ACCENT.to_string(), "#A6C98A");
        assert_eq!(Rgb::WHITE.unit(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_page_size_parsing() {
        assert_eq!("A4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!("letter".parse::<PageSize>().unwrap(), PageSize::LETTER);
        assert!("tabloid".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_file_names() {
        let label = "Revisão Ponto 6";
        assert_eq!(Artifact::SummaryPdf.file_name(label), "Resumo_Revisão_Ponto_6.pdf");
        assert_eq!(Artifact::SummaryDocx.file_name(label), "Resumo_Revisão_Ponto_6.docx");
        assert_eq!(Artifact::Questions.file_name(label), "Roteiro_PR_Revisão_Ponto_6.pdf");
        assert_eq!(Artifact::Flashcards.file_name(label), "Flashcards_Revisão_Ponto_6.pdf");
    }
}
