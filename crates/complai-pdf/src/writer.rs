// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal PDF 1.4 serializer for text-only documents.
//!
//! Object layout: 1 catalog, 2 page tree, 3 font, 4 info, then a page and a
//! content stream per page. The xref table records the byte offset of every
//! object.

use crate::layout::PageLayout;

const CATALOG: usize = 1;
const PAGES: usize = 2;
const FONT: usize = 3;
const INFO: usize = 4;
const FIRST_PAGE: usize = 5;

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::with_capacity(4096);
        buf.extend_from_slice(b"%PDF-1.4\n");
        // Binary comment so transfer tools treat the file as binary.
        buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        if self.offsets.len() < id {
            self.offsets.resize(id, 0);
        }
        self.offsets[id - 1] = self.buf.len();
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream_object(&mut self, id: usize, content: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(b"\nendstream");
        self.object(id, &body);
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root {CATALOG} 0 R /Info {INFO} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        ));
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

/// Serializes pre-wrapped pages of Latin-1 text.
pub fn write_document(pages: &[Vec<String>], layout: &PageLayout, title: &str) -> Vec<u8> {
    let page_count = pages.len();
    let page_id = |i: usize| FIRST_PAGE + 2 * i;
    let mut pdf = PdfWriter::new();

    pdf.object(
        CATALOG,
        format!("<< /Type /Catalog /Pages {PAGES} 0 R >>").as_bytes(),
    );

    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect::<Vec<_>>()
        .join(" ");
    pdf.object(
        PAGES,
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>").as_bytes(),
    );

    pdf.object(
        FONT,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );

    let mut info = b"<< /Producer (Complai) /Title (".to_vec();
    info.extend(escape_text(title));
    info.extend_from_slice(b") >>");
    pdf.object(INFO, &info);

    for (i, lines) in pages.iter().enumerate() {
        let id = page_id(i);
        pdf.object(
            id,
            format!(
                "<< /Type /Page /Parent {PAGES} 0 R /MediaBox [0 0 {w} {h}] \
                 /Resources << /Font << /F1 {FONT} 0 R >> >> /Contents {c} 0 R >>",
                w = layout.width,
                h = layout.height,
                c = id + 1,
            )
            .as_bytes(),
        );
        pdf.stream_object(id + 1, &content_stream(lines, layout));
    }

    pdf.finish()
}

fn content_stream(lines: &[String], layout: &PageLayout) -> Vec<u8> {
    let mut out = format!(
        "BT\n/F1 {} Tf\n{} TL\n{} {} Td\n",
        layout.font_size,
        layout.leading,
        layout.margin,
        layout.first_baseline()
    )
    .into_bytes();
    for line in lines {
        out.push(b'(');
        out.extend(escape_text(line));
        out.extend_from_slice(b") Tj T*\n");
    }
    out.extend_from_slice(b"ET");
    out
}

/// Encodes text as a WinAnsi literal string body, escaping `(`, `)` and `\`.
///
/// Callers sanitize first; any character above U+00FF still becomes `?`.
fn escape_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            c => out.push(u8::try_from(u32::from(c)).unwrap_or(b'?')),
        }
    }
    out
}
