//! PDF output: turns Markdown files into PDF documents.
//!
//! The default engine composes the HTML document in-process and prints it
//! with a headless Chromium-family browser (see [`browser`]). The alternate
//! engine delegates the whole job to the external `md-to-pdf` tool (see
//! [`md_to_pdf`]).

pub mod browser;
pub mod md_to_pdf;

use std::path::Path;

use convert_core::error::Result;
use convert_core::options::{ConversionOptions, RenderEngine};
use convert_core::plugin::{check_input, Converter};
use convert_input_markdown::{MarkdownRenderer, RenderedDocument};
use convert_transforms::math::inject_typeset_script;
use convert_transforms::page_margin::apply_margin_overrides;
use convert_utils::fs::ensure_parent_dir;

pub use browser::ChromiumRenderer;

/// Prints a composed HTML document to a PDF file.
pub trait PdfRenderer: Send + Sync {
    fn name(&self) -> &str;

    fn render_pdf(&self, html: &str, output_path: &Path, options: &ConversionOptions) -> Result<()>;
}

/// Markdown → PDF converter.
pub struct MdToPdfConverter {
    renderer: Box<dyn PdfRenderer>,
}

impl MdToPdfConverter {
    pub fn new() -> Self {
        Self::with_renderer(Box::new(ChromiumRenderer))
    }

    pub fn with_renderer(renderer: Box<dyn PdfRenderer>) -> Self {
        Self { renderer }
    }
}

impl Default for MdToPdfConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for MdToPdfConverter {
    fn name(&self) -> &str {
        "Markdown → PDF"
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &["md", "markdown"]
    }

    fn output_extension(&self) -> &str {
        "pdf"
    }

    fn convert(&self, input_path: &Path, output_path: &Path, options: &ConversionOptions) -> Result<()> {
        check_input(self, input_path)?;
        options.margins.validate()?;
        ensure_parent_dir(output_path)?;

        match options.engine {
            RenderEngine::Chromium => {
                let document = prepare_document(input_path, options)?;
                log::info!(
                    "Printing {} with {}",
                    input_path.display(),
                    self.renderer.name()
                );
                self.renderer.render_pdf(&document.html, output_path, options)
            }
            RenderEngine::MdToPdf => md_to_pdf::convert_with_md_to_pdf(input_path, output_path, options),
        }
    }
}

/// Build the print-ready HTML for a Markdown file: rendered body, template,
/// stylesheet, margin overrides and the math typesetting bootstrap.
pub fn prepare_document(input_path: &Path, options: &ConversionOptions) -> Result<RenderedDocument> {
    let renderer = MarkdownRenderer::new(options.template.clone());
    let mut document = renderer.render_file(input_path, options.css.as_deref())?;

    document.html = apply_margin_overrides(&document.html, &options.margins)?;
    document.html = inject_typeset_script(&document.html, options.math_load_timeout_ms);

    if !document.warnings.is_empty() {
        log::debug!(
            "{}: {} image(s) could not be embedded",
            input_path.display(),
            document.warnings.len()
        );
    }
    Ok(document)
}
