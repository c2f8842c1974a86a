// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text layout: character sanitizing, word wrap, and pagination.

/// Page geometry and typography, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub leading: f32,
    /// Wrap width in characters. Helvetica at 11 pt averages roughly 5.5 pt
    /// per glyph, so 90 characters fill the 495 pt text column.
    pub max_chars_per_line: usize,
}

impl Default for PageLayout {
    /// A4 portrait, 50 pt margins, Helvetica 11/14.
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 50.0,
            font_size: 11.0,
            leading: 14.0,
            max_chars_per_line: 90,
        }
    }
}

impl PageLayout {
    /// Number of text lines that fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.height - 2.0 * self.margin;
        ((usable / self.leading).floor() as usize).max(1)
    }

    /// Baseline of the first line on a page.
    pub fn first_baseline(&self) -> f32 {
        self.height - self.margin - self.font_size
    }
}

/// Replaces characters a WinAnsi-encoded base-14 font cannot show.
///
/// Tabs become four spaces, carriage returns are dropped, and anything
/// outside Latin-1 or in the control range becomes `?`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' => {}
            '\t' => out.push_str("    "),
            '\n' => out.push('\n'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            c if c.is_control() || u32::from(c) > 0xFF => out.push('?'),
            c => out.push(c),
        }
    }
    out
}

/// Greedy word wrap. Blank input lines are kept as paragraph breaks; words
/// longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        lines.push(current);
    }

    // Trailing blank lines only add empty pages.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Splits lines into pages. Always yields at least one (possibly empty) page.
pub fn paginate(lines: Vec<String>, per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines
        .chunks(per_page.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_fits_53_lines() {
        assert_eq!(PageLayout::default().lines_per_page(), 53);
        assert_eq!(PageLayout::default().first_baseline(), 781.0);
    }

    #[test]
    fn sanitize_replaces_unsupported_characters() {
        assert_eq!(sanitize("Plaça\tMajor\r\n"), "Plaça    Major\n");
        assert_eq!(sanitize("price: 5€ 日本"), "price: 5? ??");
        assert_eq!(sanitize("\u{201C}quoted\u{201D} \u{2014} ok"), "\"quoted\" - ok");
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_keeps_paragraph_breaks() {
        let lines = wrap("Dear City Hall,\n\nThe noise.", 80);
        assert_eq!(lines, vec!["Dear City Hall,", "", "The noise."]);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap("ab abcdefghij", 4);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_drops_trailing_blank_lines() {
        assert_eq!(wrap("text\n\n\n", 10), vec!["text"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn paginate_always_yields_a_page() {
        assert_eq!(paginate(Vec::new(), 10), vec![Vec::<String>::new()]);
        let lines: Vec<String> = (0..25).map(|i| i.to_string()).collect();
        let pages = paginate(lines, 10);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].len(), 5);
    }
}
