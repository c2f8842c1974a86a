// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document renderer trait.

use crate::error::ComplaiError;
use crate::traits::adapter::PluginAdapter;

/// Turns final plain text into a binary document.
///
/// Rendering is synchronous and CPU-bound; callers on an async runtime should
/// run it on a blocking thread.
pub trait DocumentRenderer: PluginAdapter {
    /// MIME type of the produced document (e.g. `application/pdf`).
    fn content_type(&self) -> &'static str;

    /// Renders `text` into document bytes. Output starts with the format's
    /// magic bytes.
    fn render(&self, text: &str) -> Result<Vec<u8>, ComplaiError>;
}
