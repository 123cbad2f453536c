//! Minimal PDF writer for plain-text reports.
//!
//! DESIGN
//! ======
//! A4 portrait in millimetre units with a single built-in font (Helvetica,
//! WinAnsi encoding), so no font embedding is needed. Text is laid out as one
//! full-width multi-line cell: paragraphs split on newlines, lines wrap at
//! spaces (over-long words are broken by character), and a new page starts
//! whenever the next line would cross the bottom break margin.
//!
//! The output is uncompressed PDF 1.4 with a classic xref table.

pub mod metrics;

use std::fmt::Write as _;

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const MARGIN_MM: f64 = 10.0;
pub const BREAK_MARGIN_MM: f64 = 15.0;
pub const CELL_MARGIN_MM: f64 = 1.0;
pub const LINE_HEIGHT_MM: f64 = 8.0;
pub const FONT_SIZE_PT: f64 = 12.0;

/// Points per millimetre.
const K: f64 = 72.0 / 25.4;

/// A document under construction. Starts with one empty page.
pub struct PdfDocument {
    title: Option<String>,
    /// One content stream per page.
    pages: Vec<String>,
    /// Top of the next line on the current page, in mm.
    y: f64,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    #[must_use]
    pub fn new() -> Self {
        Self { title: None, pages: vec![String::new()], y: MARGIN_MM }
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Lay `text` out from the current position, breaking pages as needed.
    pub fn write_text(&mut self, text: &str) {
        for line in wrap_text(text, max_line_units()) {
            if self.y + LINE_HEIGHT_MM > PAGE_HEIGHT_MM - BREAK_MARGIN_MM {
                self.pages.push(String::new());
                self.y = MARGIN_MM;
            }
            if !line.is_empty() {
                self.emit_line(&line);
            }
            self.y += LINE_HEIGHT_MM;
        }
    }

    fn emit_line(&mut self, line: &[u8]) {
        let font_size_mm = FONT_SIZE_PT / K;
        let x = (MARGIN_MM + CELL_MARGIN_MM) * K;
        let baseline = self.y + 0.5 * LINE_HEIGHT_MM + 0.3 * font_size_mm;
        let y = (PAGE_HEIGHT_MM - baseline) * K;

        let Some(stream) = self.pages.last_mut() else {
            return;
        };
        let _ = writeln!(stream, "BT /F1 {FONT_SIZE_PT:.2} Tf {x:.2} {y:.2} Td ({}) Tj ET", escape(line));
    }

    /// Serialize the document.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = PdfWriter::new();

        let page_count = self.pages.len();
        // Object numbers: 1 catalog, 2 page tree, 3 font, then a (page,
        // content) pair per page, then the info dictionary.
        let page_ids: Vec<usize> = (0..page_count).map(|i| 4 + 2 * i).collect();
        let info_id = 4 + 2 * page_count;

        out.object(1, "<< /Type /Catalog /Pages 2 0 R >>");
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        out.object(2, &format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>"));
        out.object(3, "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>");

        let media_box = format!("[0 0 {:.2} {:.2}]", PAGE_WIDTH_MM * K, PAGE_HEIGHT_MM * K);
        for (page_id, stream) in page_ids.iter().zip(&self.pages) {
            let content_id = page_id + 1;
            out.object(
                *page_id,
                &format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox {media_box} /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
                ),
            );
            out.stream(content_id, stream);
        }

        let mut info = String::from("<< /Producer (guru-dashboard)");
        if let Some(title) = &self.title {
            let _ = write!(info, " /Title ({})", escape(&metrics::encode(title)));
        }
        info.push_str(" >>");
        out.object(info_id, &info);

        out.finish(info_id)
    }
}

/// Widest text run that fits in the cell, in 1/1000 em.
fn max_line_units() -> u32 {
    let font_size_mm = FONT_SIZE_PT / K;
    let width_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_MARGIN_MM;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let units = (width_mm * 1000.0 / font_size_mm).floor() as u32;
    units
}

/// Split `text` into encoded lines no wider than `max_units`. Empty
/// paragraphs produce empty lines.
pub(crate) fn wrap_text(text: &str, max_units: u32) -> Vec<Vec<u8>> {
    let space = u32::from(metrics::byte_width(b' '));
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let encoded = metrics::encode(paragraph);
        let mut line: Vec<u8> = Vec::new();
        let mut line_width = 0u32;

        for word in encoded.split(|&b| b == b' ').filter(|w| !w.is_empty()) {
            let word_width = metrics::run_width(word);
            if !line.is_empty() && line_width + space + word_width <= max_units {
                line.push(b' ');
                line.extend_from_slice(word);
                line_width += space + word_width;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            // Word starts a fresh line; break it by character if it cannot fit.
            line_width = 0;
            for &b in word {
                let w = u32::from(metrics::byte_width(b));
                if !line.is_empty() && line_width + w > max_units {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(b);
                line_width += w;
            }
        }
        lines.push(line);
    }
    lines
}

/// Escape a byte run for a PDF literal string; non-ASCII goes octal.
fn escape(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                s.push('\\');
                s.push(char::from(b));
            }
            0x20..=0x7E => s.push(char::from(b)),
            _ => {
                let _ = write!(s, "\\{b:03o}");
            }
        }
    }
    s
}

// =============================================================================
// WRITER
// =============================================================================

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = b"%PDF-1.4\n".to_vec();
        // Binary marker so transports treat the file as binary.
        buf.extend_from_slice(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);
        Self { buf, offsets: Vec::new() }
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.buf.len()));
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, id: usize, content: &str) {
        self.offsets.push((id, self.buf.len()));
        self.buf.extend_from_slice(
            format!("{id} 0 obj\n<< /Length {} >>\nstream\n{content}\nendstream\nendobj\n", content.len()).as_bytes(),
        );
    }

    fn finish(mut self, info_id: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_offset = self.buf.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = write!(xref, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root 1 0 R /Info {info_id} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
