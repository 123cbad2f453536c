//! Helvetica glyph widths and WinAnsi encoding.
//!
//! Widths are in 1/1000 em, taken from the standard Helvetica AFM. Only the
//! glyphs reachable through `encode` need entries.

/// Widths for bytes 0x20..=0x7E.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space .. /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 .. 9
    278, 278, 584, 584, 584, 556, 1015, // : .. @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A .. M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N .. Z
    278, 278, 278, 469, 556, 333, // [ .. `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a .. m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n .. z
    334, 260, 334, 584, // { .. ~
];

const DEFAULT_WIDTH: u16 = 556;

/// Width of one WinAnsi-encoded byte.
#[must_use]
pub fn byte_width(b: u8) -> u16 {
    match b {
        0x20..=0x7E => ASCII_WIDTHS[usize::from(b - 0x20)],
        0x85 | 0x97 => 1000, // ellipsis, emdash
        0x91 | 0x92 => 222,  // single quotes
        0x93 | 0x94 => 333,  // double quotes
        0x95 => 350,         // bullet
        0x96 => 556,         // endash
        0xA0 => 278,         // nbsp
        _ => DEFAULT_WIDTH,
    }
}

/// Total width of an encoded run, in 1/1000 em.
#[must_use]
pub fn run_width(bytes: &[u8]) -> u32 {
    bytes.iter().map(|&b| u32::from(byte_width(b))).sum()
}

/// Map a char to its WinAnsi byte. Unmappable printable chars become `?`;
/// control chars are dropped.
#[must_use]
pub fn encode_char(c: char) -> Option<u8> {
    match c {
        ' '..='~' => u8::try_from(c).ok(),
        '\u{a0}'..='\u{ff}' => u8::try_from(u32::from(c)).ok(),
        '\u{2026}' => Some(0x85),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201c}' => Some(0x93),
        '\u{201d}' => Some(0x94),
        '\u{2022}' => Some(0x95),
        '\u{2013}' => Some(0x96),
        '\u{2014}' => Some(0x97),
        '\t' => Some(b' '),
        c if c.is_control() => None,
        _ => Some(b'?'),
    }
}

#[must_use]
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().filter_map(encode_char).collect()
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
