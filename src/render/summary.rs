//! Summary PDF: banner, label, then one numbered block per highlight.

use crate::error::Result;
use crate::model::HighlightSet;

use super::options::{RenderOptions, Rgb, TextAlign};
use super::pdf_writer::{Border, PdfWriter, TextStyle, MM};

const BANNER_HEIGHT_MM: f32 = 45.0;

/// Render the summary PDF.
pub fn summary_pdf(set: &HighlightSet, label: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new(options.page_size);

    let banner = BANNER_HEIGHT_MM * MM;
    writer.fill_rect(0.0, options.page_size.height, writer.page_width(), banner, options.accent);
    writer.move_to_top_offset(15.0 * MM);
    writer.cell(
        &options.title,
        TextStyle::bold(18.0, 10.0).color(Rgb::WHITE),
        TextAlign::Center,
        None,
        Border::None,
    );
    writer.cell(
        label,
        TextStyle::regular(11.0, 10.0).color(Rgb::WHITE),
        TextAlign::Center,
        None,
        Border::None,
    );
    writer.move_to_top_offset(banner + 10.0 * MM);

    for (i, highlight) in set.iter().enumerate() {
        let header = format!("ITEM {:02} | PÁG. {}", i + 1, highlight.page);
        writer.ensure(20.0 * MM);
        writer.cell(
            &header,
            TextStyle::bold(11.0, 8.0).color(options.accent),
            TextAlign::Left,
            None,
            Border::None,
        );
        writer.paragraph(
            &highlight.text,
            TextStyle::regular(12.0, 7.0),
            options.alignment,
            Border::None,
        );
        writer.advance(5.0 * MM);
    }

    writer.finish(&format!("{} - {}", options.title, label))
}
