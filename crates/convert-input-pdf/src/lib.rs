//! PDF input — extracts the text layer of PDF files into Markdown files.

mod extract;

use std::path::Path;

use convert_core::error::Result;
use convert_core::options::ConversionOptions;
use convert_core::plugin::{check_input, Converter};
use convert_utils::fs::ensure_parent_dir;

pub use extract::{normalize_page_text, LopdfExtractor};

/// Pulls plain text out of a PDF document.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, pdf_path: &Path) -> Result<String>;
}

/// PDF → Markdown converter.
pub struct PdfToMdConverter {
    extractor: Box<dyn TextExtractor>,
}

impl PdfToMdConverter {
    pub fn new() -> Self {
        Self::with_extractor(Box::new(LopdfExtractor))
    }

    pub fn with_extractor(extractor: Box<dyn TextExtractor>) -> Self {
        Self { extractor }
    }
}

impl Default for PdfToMdConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for PdfToMdConverter {
    fn name(&self) -> &str {
        "PDF → Markdown"
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &["pdf"]
    }

    fn output_extension(&self) -> &str {
        "md"
    }

    fn convert(&self, input_path: &Path, output_path: &Path, _options: &ConversionOptions) -> Result<()> {
        check_input(self, input_path)?;

        log::info!("Reading PDF: {}", input_path.display());
        let text = self.extractor.extract_text(input_path)?;

        ensure_parent_dir(output_path)?;
        std::fs::write(output_path, text)?;
        log::info!("Wrote {}", output_path.display());
        Ok(())
    }
}
