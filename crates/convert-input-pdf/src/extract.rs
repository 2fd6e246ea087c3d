//! Text extraction with lopdf.

use std::path::Path;

use lopdf::Document;

use convert_core::error::{ConvertError, Result};

use crate::TextExtractor;

/// Extracts the text layer page by page, in page order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract_text(&self, pdf_path: &Path) -> Result<String> {
        let doc = Document::load(pdf_path).map_err(|e| {
            ConvertError::ConversionFailed(format!("Failed to load PDF {}: {}", pdf_path.display(), e))
        })?;

        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();
        log::info!("PDF has {} pages", page_numbers.len());

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_num in page_numbers {
            let raw = doc.extract_text(&[page_num]).map_err(|e| {
                ConvertError::ConversionFailed(format!(
                    "Failed to extract text from page {} of {}: {}",
                    page_num,
                    pdf_path.display(),
                    e
                ))
            })?;
            let text = normalize_page_text(&raw);
            if text.is_empty() {
                log::debug!("Page {} has no text layer", page_num);
                continue;
            }
            pages.push(text);
        }

        if pages.is_empty() {
            log::warn!("{}: no extractable text (scanned document?)", pdf_path.display());
            return Ok(String::new());
        }

        let mut markdown = pages.join("\n\n");
        markdown.push('\n');
        Ok(markdown)
    }
}

/// Unify line endings, strip trailing whitespace, drop leading and trailing
/// blank lines.
pub fn normalize_page_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = unified.lines().map(str::trim_end).collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
