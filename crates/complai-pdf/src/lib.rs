// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PDF document renderer for complaint letters.
//!
//! Produces a text-only PDF 1.4 file using the built-in Helvetica font, so no
//! font files are embedded. Long letters flow onto as many A4 pages as
//! needed.

pub mod layout;
pub mod writer;

use async_trait::async_trait;
use complai_core::{AdapterType, ComplaiError, DocumentRenderer, HealthStatus, PluginAdapter};
use tracing::debug;

use crate::layout::PageLayout;

/// MIME type of the rendered output.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Renders plain text into a paginated PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PageLayout,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: PageLayout) -> Result<Self, ComplaiError> {
        let usable_height = layout.height - 2.0 * layout.margin;
        if layout.leading <= 0.0 || layout.font_size <= 0.0 || usable_height < layout.leading {
            return Err(ComplaiError::render(format!(
                "page layout leaves no room for text: {layout:?}"
            )));
        }
        Ok(Self { layout })
    }
}

#[async_trait]
impl PluginAdapter for PdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Renderer
    }

    async fn health_check(&self) -> Result<HealthStatus, ComplaiError> {
        Ok(HealthStatus::Healthy)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }

    fn render(&self, text: &str) -> Result<Vec<u8>, ComplaiError> {
        let clean = layout::sanitize(text);
        let lines = layout::wrap(&clean, self.layout.max_chars_per_line);
        let pages = layout::paginate(lines, self.layout.lines_per_page());
        let bytes = writer::write_document(&pages, &self.layout, "Complaint letter");
        debug!(pages = pages.len(), bytes = bytes.len(), "pdf rendered");
        Ok(bytes)
    }
}
