//! Built-in Helvetica metrics and WinAnsi encoding.
//!
//! Used both when positioning glyphs of standard-14 fonts that ship without a
//! `/Widths` array and when laying out the study PDFs this crate writes.

/// Advance widths (1/1000 em) of Helvetica for WinAnsi codes 32..=255.
const HELVETICA: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 350, // 0x70
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350, // 0x80
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// Advance widths of Helvetica-Bold for ASCII codes 32..=126.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Characters of the WinAnsi 0x80..=0x9F block (0 marks an unused code).
const WIN_ANSI_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0, //
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// Byte written for characters WinAnsi cannot represent.
pub const PLACEHOLDER: u8 = b'?';

/// Which member of the Helvetica family to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Advance width of a WinAnsi code in 1/1000 em.
pub fn helvetica_width(code: u8, weight: FontWeight) -> u16 {
    if code < 32 {
        return 0;
    }
    let regular = HELVETICA[(code - 32) as usize];
    match weight {
        FontWeight::Regular => regular,
        FontWeight::Bold if code < 127 => HELVETICA_BOLD_ASCII[(code - 32) as usize],
        FontWeight::Bold => regular + regular / 20,
    }
}

/// WinAnsi code for a character, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&u| u != 0 && u as u32 == cp)
            .map(|i| 0x80 + i as u8),
    }
}

/// Character for a WinAnsi code, if the code is assigned.
pub fn win_ansi_char(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        0x80..=0x9F => match WIN_ANSI_HIGH[(code - 0x80) as usize] {
            0 => None,
            u => char::from_u32(u as u32),
        },
        _ => None,
    }
}

/// Encode text as WinAnsi, replacing unsupported characters with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(PLACEHOLDER))
        .collect()
}

/// Text as it will appear once written in WinAnsi: unsupported characters become `?`.
pub fn lossy_win_ansi(text: &str) -> String {
    text.chars()
        .map(|c| if win_ansi_byte(c).is_some() { c } else { PLACEHOLDER as char })
        .collect()
}

/// Width of a string in points.
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| helvetica_width(win_ansi_byte(c).unwrap_or(PLACEHOLDER), weight) as u32)
        .sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_widths() {
        assert_eq!(helvetica_width(b' ', FontWeight::Regular), 278);
        assert_eq!(helvetica_width(b'A', FontWeight::Regular), 667);
        assert_eq!(helvetica_width(b'i', FontWeight::Regular), 222);
        assert_eq!(helvetica_width(b'~', FontWeight::Regular), 584);
        assert_eq!(helvetica_width(b'b', FontWeight::Bold), 611);
        assert_eq!(helvetica_width(b'~', FontWeight::Bold), 584);
    }

    #[test]
    fn test_latin1_widths() {
        assert_eq!(helvetica_width(0xE7, FontWeight::Regular), 500); // ç
        assert_eq!(helvetica_width(0xC3, FontWeight::Regular), 667); // Ã
        assert_eq!(helvetica_width(0xFF, FontWeight::Regular), 500); // ÿ
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(win_ansi_byte('a'), Some(b'a'));
        assert_eq!(win_ansi_byte('ç'), Some(0xE7));
        assert_eq!(win_ansi_byte('•'), Some(0x95));
        assert_eq!(win_ansi_byte('\u{201C}'), Some(0x93));
        assert_eq!(win_ansi_byte('€'), Some(0x80));
        assert_eq!(win_ansi_byte('ł'), None);
        assert_eq!(win_ansi_char(0x92), Some('\u{2019}'));
        assert_eq!(win_ansi_char(0xE7), Some('ç'));
        assert_eq!(win_ansi_char(0x81), None);
        assert_eq!(encode_win_ansi("Ação → fim"), b"A\xe7\xe3o ? fim".to_vec());
    }

    #[test]
    fn test_lossy_text() {
        assert_eq!(lossy_win_ansi("PÁG. 3 ✓"), "PÁG. 3 ?");
    }

    #[test]
    fn test_text_width() {
        // "Hi" = 722 + 222 units at 10pt
        let w = text_width("Hi", 10.0, FontWeight::Regular);
        assert!((w - 9.44).abs() < 1e-4);
    }
}
