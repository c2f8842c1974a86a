// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic detection of scope refusals in upstream replies.
//!
//! Matching is a plain substring scan over normalized text against a phrase
//! table loaded from the `[refusal]` config section. Paraphrased refusals
//! ("I only handle El Prat matters") are caught by pairing a scope term with
//! an exclusivity qualifier. That pairing can flag ordinary letters, and the
//! `[refusal]` table is where such false positives are tuned.

use complai_config::model::RefusalConfig;

/// Phrase table driving [`RefusalTable::is_refusal`].
#[derive(Debug, Clone)]
pub struct RefusalTable {
    phrases: Vec<String>,
    scope_terms: Vec<String>,
    qualifiers: Vec<String>,
    canonical_error: String,
}

impl RefusalTable {
    /// Builds a table from config. Entries are normalized the same way
    /// replies are, so config may use any case or quote style.
    pub fn from_config(config: &RefusalConfig) -> Self {
        let normalize_all = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| normalize(s))
                .filter(|s| !s.is_empty())
                .collect()
        };
        Self {
            phrases: normalize_all(&config.phrases),
            scope_terms: normalize_all(&config.scope_terms),
            qualifiers: normalize_all(&config.exclusivity_qualifiers),
            canonical_error: config.canonical_error.clone(),
        }
    }

    /// Error string returned to callers for a refusal.
    pub fn canonical_error(&self) -> &str {
        &self.canonical_error
    }

    /// Whether `text` reads as the model declining the topic.
    pub fn is_refusal(&self, text: Option<&str>) -> bool {
        let Some(text) = text else {
            return false;
        };
        let text = normalize(text);
        if text.is_empty() {
            return false;
        }

        if self.phrases.iter().any(|p| text.contains(p.as_str())) {
            return true;
        }

        self.scope_terms.iter().any(|t| text.contains(t.as_str()))
            && words(&text).any(|w| self.qualifiers.iter().any(|q| q == w))
    }
}

impl Default for RefusalTable {
    fn default() -> Self {
        Self::from_config(&RefusalConfig::default())
    }
}

/// Lowercases, trims, and folds typographic quotes to ASCII.
fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}
