// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of the leading JSON metadata header from an upstream reply.
//!
//! The model is asked to start its reply with a one-line JSON object such as
//! `{"format":"pdf"}` followed by the letter. Replies are untrusted: the header
//! may be missing, malformed, or followed by a body that itself contains
//! braces. Parsing never fails; anything unusable degrades to "no header".

use complai_core::OutputFormat;
use serde_json::{Map, Value};

/// Result of scanning a reply for a metadata header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    /// Format the model declared. `None` when no header was found, or when
    /// the header named a format we do not recognize.
    pub declared_format: Option<OutputFormat>,
    /// Text with the header removed. Equal to the input when no header was found.
    pub body: String,
    /// Whether a well-formed JSON object header was found.
    pub header_present: bool,
}

impl ParsedHeader {
    fn absent(text: &str) -> Self {
        Self {
            declared_format: None,
            body: text.to_string(),
            header_present: false,
        }
    }
}

/// Parses `text` for a leading JSON header.
///
/// ```
/// use complai_agent::header::parse_header;
/// use complai_core::OutputFormat;
///
/// let parsed = parse_header(Some("{\"format\":\"pdf\"}\n\nDear City Hall"));
/// assert_eq!(parsed.declared_format, Some(OutputFormat::Pdf));
/// assert_eq!(parsed.body, "Dear City Hall");
/// ```
pub fn parse_header(text: Option<&str>) -> ParsedHeader {
    let Some(text) = text else {
        return ParsedHeader::absent("");
    };

    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return ParsedHeader::absent(text);
    }

    let Some(end) = find_object_end(trimmed) else {
        return ParsedHeader::absent(text);
    };

    let fields = match serde_json::from_str::<Value>(&trimmed[..=end]) {
        Ok(Value::Object(fields)) => fields,
        _ => return ParsedHeader::absent(text),
    };

    let declared_format = match fields.get("format") {
        Some(Value::String(s)) => OutputFormat::from_str_opt(s),
        _ => Some(OutputFormat::Auto),
    };

    let body = inline_body(&fields)
        .unwrap_or_else(|| trimmed[end + 1..].trim())
        .to_string();

    ParsedHeader {
        declared_format,
        body,
        header_present: true,
    }
}

/// A non-blank `body` or `message` string carried inside the header itself.
fn inline_body(fields: &Map<String, Value>) -> Option<&str> {
    ["body", "message"].iter().find_map(|key| {
        fields
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    })
}

/// Byte index of the brace closing the object that opens at index 0.
///
/// Braces inside string literals do not count. Returns `None` if the object
/// is never closed.
fn find_object_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
