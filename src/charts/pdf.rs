//! PDF Writer Module
//! Serializes a [`Figure`] as a single-page vector PDF.
//!
//! The document is generated directly (objects, content stream, xref table)
//! so bars and axes stay vector paths and text uses the built-in Helvetica
//! font, with nothing to embed.

use crate::charts::figure::{Figure, HAlign, Mark, Rgb, VAlign};
use std::fmt::Write;

/// Helvetica advance widths (1/1000 em) for WinAnsi codes 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
const HELVETICA_ASCENT: f64 = 0.718;
const HELVETICA_DESCENT: f64 = 0.207;

/// Width of `text` in points when set in Helvetica at `size`.
pub fn text_width(text: &str, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| match c {
            ' '..='~' => u32::from(HELVETICA_WIDTHS[c as usize - 32]),
            _ => u32::from(HELVETICA_WIDTHS['?' as usize - 32]),
        })
        .sum();
    f64::from(units) * size / 1000.0
}

/// PDF generator for the citations chart
pub struct PdfWriter;

impl PdfWriter {
    /// Build the complete PDF document in memory.
    pub fn write_document(figure: &Figure) -> Vec<u8> {
        let content = Self::content_stream(figure);

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>",
                num(figure.width_pt),
                num(figure.height_pt)
            ),
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!(
                "<< /Title ({}) /Producer (libmesh_citations) >>",
                escape(&figure.title)
            ),
        ];

        // fmt::Write into a String cannot fail; results below are discarded
        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (idx, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            let _ = write!(out, "{} 0 obj\n{}\nendobj\n", idx + 1, body);
        }

        let xref_offset = out.len();
        let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in &offsets {
            let _ = write!(out, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R /Info 6 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        );

        out.into_bytes()
    }

    /// Page content: figure marks with the y axis flipped to PDF space.
    fn content_stream(figure: &Figure) -> String {
        let height = figure.height_pt;
        // infallible String writes, as in write_document
        let mut ops = String::new();

        for mark in figure.marks() {
            match mark {
                Mark::Rect { x, y, w, h, fill } => {
                    let _ = writeln!(
                        ops,
                        "{} rg {} {} {} {} re f",
                        color(fill),
                        num(x),
                        num(height - y - h),
                        num(w),
                        num(h)
                    );
                }
                Mark::Line {
                    from,
                    to,
                    width,
                    color: stroke,
                } => {
                    let _ = writeln!(
                        ops,
                        "{} w {} RG {} {} m {} {} l S",
                        num(width),
                        color(stroke),
                        num(from.0),
                        num(height - from.1),
                        num(to.0),
                        num(height - to.1)
                    );
                }
                Mark::Text {
                    x,
                    y,
                    text,
                    size,
                    h_align,
                    v_align,
                } => {
                    let width = text_width(&text, size);
                    let left = match h_align {
                        HAlign::Center => x - width / 2.0,
                        HAlign::Right => x - width,
                    };
                    let baseline = match v_align {
                        VAlign::Top => y + HELVETICA_ASCENT * size,
                        VAlign::Middle => y + (HELVETICA_ASCENT - HELVETICA_DESCENT) * size / 2.0,
                    };
                    let _ = writeln!(
                        ops,
                        "0 g BT /F1 {} Tf {} {} Td ({}) Tj ET",
                        num(size),
                        num(left),
                        num(height - baseline),
                        escape(&text)
                    );
                }
            }
        }

        ops
    }
}

fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn color(c: Rgb) -> String {
    format!(
        "{} {} {}",
        num(f64::from(c.0) / 255.0),
        num(f64::from(c.1) / 255.0),
        num(f64::from(c.2) / 255.0)
    )
}

/// Escape a string literal; characters outside printable ASCII become '?'.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::render;
    use crate::data::{derive, Cell, YearCount};
    use Cell::{Count, Label};

    fn small_pdf() -> String {
        let cells = [Label("a"), Count(3), Label("b"), Count(5)];
        let fig = render(&derive(YearCount::new(&cells)).unwrap());
        String::from_utf8(PdfWriter::write_document(&fig)).unwrap()
    }

    #[test]
    fn document_has_header_and_trailer() {
        let pdf = small_pdf();
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("/MediaBox [0 0 460.8 345.6]"));
        assert!(pdf.contains("/BaseFont /Helvetica"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = small_pdf();
        let startxref = pdf.rfind("startxref\n").unwrap();
        let xref_offset: usize = pdf[startxref + 10..]
            .lines()
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert!(pdf[xref_offset..].starts_with("xref\n0 7\n"));

        let entries: Vec<usize> = pdf[xref_offset..]
            .lines()
            .skip(3)
            .take(6)
            .map(|line| line[..10].parse().unwrap())
            .collect();
        for (idx, offset) in entries.iter().enumerate() {
            assert!(pdf[*offset..].starts_with(&format!("{} 0 obj\n", idx + 1)));
        }
    }

    #[test]
    fn stream_length_matches_content() {
        let pdf = small_pdf();
        let start = pdf.find("<< /Length ").unwrap() + 11;
        let len: usize = pdf[start..].split(' ').next().unwrap().parse().unwrap();
        let body = pdf.find("stream\n").unwrap() + 7;
        assert!(pdf[body + len..].starts_with("endstream"));
    }

    #[test]
    fn draws_bars_and_escaped_title() {
        let pdf = small_pdf();
        assert_eq!(pdf.matches(" re f").count(), 2);
        assert!(pdf.contains("(Papers by People Using LibMesh, \\(8 Total\\)) Tj"));
        assert!(pdf.contains("(a) Tj"));
        assert!(!pdf.contains("(b) Tj"));
        // bar fill #4878cf
        assert!(pdf.contains("0.28 0.47 0.81 rg"));
    }

    #[test]
    fn escapes_pdf_specials() {
        assert_eq!(escape("a(b)\\c"), "a\\(b\\)\\\\c");
        assert_eq!(escape("'04"), "'04");
        assert_eq!(escape("é"), "?");
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(num(460.8), "460.8");
        assert_eq!(num(12.0), "12");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(0.5), "0.5");
    }

    #[test]
    fn measures_helvetica_text() {
        assert_eq!(text_width("0", 10.0), 5.56);
        assert!((text_width("'04", 10.0) - 13.03).abs() < 1e-9);
    }
}
