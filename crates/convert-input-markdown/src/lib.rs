//! Markdown input. Renders Markdown into a self-contained HTML document.
//!
//! The body is produced with pulldown-cmark (CommonMark, tables, raw HTML
//! passthrough), local images are inlined as data URIs, and the result is
//! poured into the HTML template together with the stylesheet.

pub mod assets;
pub mod template;

use std::path::{Path, PathBuf};

use pulldown_cmark::{html, Event, Options, Parser};

use convert_core::error::Result;
use convert_transforms::data_url::embed_images;
use convert_utils::encoding::read_text;

/// A composed HTML document ready for printing.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html: String,
    /// Problems that did not stop rendering (e.g. images that could not be inlined).
    pub warnings: Vec<String>,
}

/// Markdown → HTML renderer with a fixed template.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    template_path: Option<PathBuf>,
}

impl MarkdownRenderer {
    /// `template_path` overrides the bundled template when set.
    pub fn new(template_path: Option<PathBuf>) -> Self {
        Self { template_path }
    }

    /// Render Markdown text. Relative image paths resolve against `source_dir`.
    pub fn render(
        &self,
        markdown: &str,
        source_dir: &Path,
        css_path: Option<&Path>,
    ) -> Result<RenderedDocument> {
        let body = markdown_to_html(markdown);
        let embedded = embed_images(&body, source_dir);

        let template = assets::load_template(self.template_path.as_deref())?;
        let css = assets::load_css(css_path)?;
        let html = template::compose(&template, &embedded.html, &css)?;

        Ok(RenderedDocument {
            html,
            warnings: embedded.warnings,
        })
    }

    /// Read and render a Markdown file, resolving images next to it.
    pub fn render_file(&self, input_path: &Path, css_path: Option<&Path>) -> Result<RenderedDocument> {
        log::info!("Reading Markdown: {}", input_path.display());
        let markdown = read_text(input_path)?;
        let source_dir = input_path.parent().unwrap_or_else(|| Path::new("."));
        self.render(&markdown, source_dir, css_path)
    }
}

/// Convert Markdown to an HTML fragment.
///
/// Soft line breaks become `<br />`, so line structure in the source is kept.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}
