//! Minimal flowing-text PDF writer on top of lopdf.
//!
//! Text is set in the standard Helvetica fonts with WinAnsiEncoding, so no
//! font program is embedded. Characters outside WinAnsi are written as `?`.
//! Positions are tracked top-down with a cursor; a page break is inserted
//! whenever the next line would cross the bottom margin.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as LopdfDocument, Object, Stream, StringFormat};

use crate::error::Result;
use crate::fonts::{encode_win_ansi, lossy_win_ansi, text_width, FontWeight};

use super::options::{PageSize, Rgb, TextAlign};

/// Points per millimetre.
pub(crate) const MM: f32 = 72.0 / 25.4;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Font, size, color and line height of a run of text.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgb,
    pub leading: f32,
}

impl TextStyle {
    pub fn regular(size: f32, leading_mm: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color: Rgb::BLACK,
            leading: leading_mm * MM,
        }
    }

    pub fn bold(size: f32, leading_mm: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..Self::regular(size, leading_mm)
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

/// Decoration drawn around a block of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Border {
    None,
    /// Vertical rule along the left edge
    Left(Rgb),
    /// Rule along the bottom edge
    Bottom(Rgb),
    /// Full rectangle
    Box(Rgb),
}

/// Page-flowing PDF builder.
pub(crate) struct PdfWriter {
    size: PageSize,
    margin: f32,
    bottom_margin: f32,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl PdfWriter {
    pub fn new(size: PageSize) -> Self {
        let margin = 10.0 * MM;
        Self {
            size,
            margin,
            bottom_margin: 15.0 * MM,
            pages: Vec::new(),
            ops: Vec::new(),
            y: size.height - margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.size.width - 2.0 * self.margin
    }

    pub fn page_width(&self) -> f32 {
        self.size.width
    }

    /// Number of pages so far, including the one being written.
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    pub fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(ops);
        self.y = self.size.height - self.margin;
    }

    /// Break the page unless `height` more points fit.
    pub fn ensure(&mut self, height: f32) {
        if self.y - height < self.bottom_margin && self.y < self.size.height - self.margin {
            self.new_page();
        }
    }

    /// Move the cursor down.
    pub fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    /// Move the cursor to an absolute distance from the top edge.
    pub fn move_to_top_offset(&mut self, offset: f32) {
        self.y = self.size.height - offset;
    }

    /// Fill a rectangle given by its top-left corner in top-down coordinates.
    pub fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb) {
        let [r, g, b] = color.unit();
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.ops.push(Operation::new(
            "re",
            vec![x.into(), (top - height).into(), width.into(), height.into()],
        ));
        self.ops.push(Operation::new("f", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    fn stroke(&mut self, points: &[(f32, f32)], color: Rgb, closed: bool) {
        let Some(((x0, y0), rest)) = points.split_first() else {
            return;
        };
        let [r, g, b] = color.unit();
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        self.ops.push(Operation::new("w", vec![0.6f32.into()]));
        self.ops.push(Operation::new("m", vec![(*x0).into(), (*y0).into()]));
        for (x, y) in rest {
            self.ops.push(Operation::new("l", vec![(*x).into(), (*y).into()]));
        }
        self.ops.push(Operation::new(if closed { "s" } else { "S" }, vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    fn draw_border(&mut self, border: Border, top: f32, height: f32) {
        let (left, right, bottom) = (self.margin, self.margin + self.content_width(), top - height);
        match border {
            Border::None => {}
            Border::Left(color) => self.stroke(&[(left, top), (left, bottom)], color, false),
            Border::Bottom(color) => self.stroke(&[(left, bottom), (right, bottom)], color, false),
            Border::Box(color) => self.stroke(
                &[(left, top), (right, top), (right, bottom), (left, bottom)],
                color,
                true,
            ),
        }
    }

    fn show(&mut self, text: &str, x: f32, baseline: f32, style: &TextStyle, word_spacing: f32) {
        let [r, g, b] = style.color.unit();
        let font = match style.weight {
            FontWeight::Regular => REGULAR_FONT,
            FontWeight::Bold => BOLD_FONT,
        };
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Tf", vec![font.into(), style.size.into()]),
            Operation::new("Tw", vec![word_spacing.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Baseline of a line whose box starts at `top`.
    fn baseline(top: f32, style: &TextStyle) -> f32 {
        top - (style.leading + style.size * 0.7) / 2.0
    }

    /// A single-line cell spanning the content width.
    pub fn cell(
        &mut self,
        text: &str,
        style: TextStyle,
        align: TextAlign,
        fill: Option<Rgb>,
        border: Border,
    ) {
        self.ensure(style.leading);
        let top = self.y;
        let width = self.content_width();
        if let Some(color) = fill {
            self.fill_rect(self.margin, top, width, style.leading, color);
        }
        self.draw_border(border, top, style.leading);

        let padding = MM;
        let text = fit(&lossy_win_ansi(text), width - 2.0 * padding, &style);
        let x = match align {
            TextAlign::Center => {
                self.margin + (width - text_width(&text, style.size, style.weight)) / 2.0
            }
            _ => self.margin + padding,
        };
        self.show(&text, x, Self::baseline(top, &style), &style, 0.0);
        self.y -= style.leading;
    }

    /// Wrapped text across the content width, breaking pages as needed.
    pub fn paragraph(&mut self, text: &str, style: TextStyle, align: TextAlign, border: Border) {
        let padding = if border == Border::None { 0.0 } else { MM };
        let inner = self.content_width() - 2.0 * padding;
        let lines = wrap(text, inner, &style);
        let last = lines.len().saturating_sub(1);

        let mut index = 0;
        while index < lines.len() {
            self.ensure(style.leading);
            let room = ((self.y - self.bottom_margin) / style.leading).floor().max(1.0) as usize;
            let chunk_end = (index + room).min(lines.len());

            let top = self.y;
            self.draw_border(border, top, (chunk_end - index) as f32 * style.leading);

            for (i, line) in lines[index..chunk_end].iter().enumerate() {
                let line_top = top - i as f32 * style.leading;
                let width = text_width(line, style.size, style.weight);
                let x = match align {
                    TextAlign::Center => self.margin + (self.content_width() - width) / 2.0,
                    _ => self.margin + padding,
                };
                let spaces = line.matches(' ').count();
                let word_spacing = if align == TextAlign::Justify && index + i != last && spaces > 0 {
                    (inner - width) / spaces as f32
                } else {
                    0.0
                };
                self.show(line, x, Self::baseline(line_top, &style), &style, word_spacing);
            }

            self.y = top - (chunk_end - index) as f32 * style.leading;
            index = chunk_end;
            if index < lines.len() {
                self.new_page();
            }
        }
    }

    /// Assemble the document.
    pub fn finish(mut self, title: &str) -> Result<Vec<u8>> {
        log::debug!("Writing '{}' ({} pages)", title, self.page_count());
        self.new_page();

        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(self.size.width),
            Object::Real(self.size.height),
        ];
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => media_box,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::string_literal(concat!("unmark ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

/// Greedy word wrap; words wider than the line are split by character.
pub(crate) fn wrap(text: &str, width: f32, style: &TextStyle) -> Vec<String> {
    let measure = |s: &str| text_width(s, style.size, style.weight);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in lossy_win_ansi(text).split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) <= width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if measure(&current) > width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate to one line, marking the cut with "...".
fn fit(text: &str, width: f32, style: &TextStyle) -> String {
    if text_width(text, style.size, style.weight) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        if text_width(&format!("{}...", out), style.size, style.weight) > width {
            out.pop();
            break;
        }
    }
    out.push_str("...");
    out
}
