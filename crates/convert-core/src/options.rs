//! Conversion options shared across converters and the CLI.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Accepted margin syntax: a non-negative number followed by a CSS length unit.
static MARGIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)?(mm|cm|in|px|pt)$").unwrap());

/// Every setting that influences a conversion run.
/// Loaded from TOML config files, then overridden by environment and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    // -- General --
    pub verbose: u8,
    pub app_name: String,

    // -- Paths --
    pub output_dir: PathBuf,
    pub recursive: bool,

    // -- Look & Feel --
    pub css: Option<PathBuf>,
    pub template: Option<PathBuf>,

    // -- PDF rendering --
    pub engine: RenderEngine,
    pub browser: Option<PathBuf>,
    pub browser_args: Vec<String>,
    /// How long to wait for the math typesetting library to appear.
    pub math_load_timeout_ms: u64,
    /// Extra time granted after typesetting before the page is printed.
    pub math_settle_ms: u64,
    pub md_to_pdf_config: Option<PathBuf>,

    // -- Page Setup --
    pub margins: PageMargins,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            app_name: "dcv".to_string(),
            output_dir: PathBuf::from("dcv_output"),
            recursive: true,
            css: None,
            template: None,
            engine: RenderEngine::default(),
            browser: None,
            browser_args: Vec::new(),
            math_load_timeout_ms: 10_000,
            math_settle_ms: 500,
            md_to_pdf_config: None,
            margins: PageMargins::default(),
        }
    }
}

/// Markdown → PDF backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderEngine {
    /// Compose HTML ourselves and print it with a headless Chromium-family browser.
    #[default]
    Chromium,
    /// Hand the Markdown file to the external `md-to-pdf` Node tool.
    MdToPdf,
}

impl RenderEngine {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chromium" | "chrome" | "browser" => Some(RenderEngine::Chromium),
            "md-to-pdf" | "mdtopdf" => Some(RenderEngine::MdToPdf),
            _ => None,
        }
    }
}

impl std::fmt::Display for RenderEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderEngine::Chromium => write!(f, "chromium"),
            RenderEngine::MdToPdf => write!(f, "md-to-pdf"),
        }
    }
}

/// Page margin overrides. `None` leaves the stylesheet's `@page` value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
}

impl PageMargins {
    pub fn is_empty(&self) -> bool {
        self.sides().next().is_none()
    }

    /// The sides that carry an override, in CSS order (top, right, bottom, left).
    pub fn sides(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("top", self.top.as_deref()),
            ("right", self.right.as_deref()),
            ("bottom", self.bottom.as_deref()),
            ("left", self.left.as_deref()),
        ]
        .into_iter()
        .filter_map(|(side, value)| value.map(|v| (side, v)))
    }

    /// Reject any override that is not `<number><unit>`.
    pub fn validate(&self) -> Result<()> {
        for (side, value) in self.sides() {
            if !is_valid_margin(value) {
                return Err(ConvertError::BadOptions(format!(
                    "Invalid margin format for {}: '{}'. \
                     Expected format: <number><unit> (e.g., '30mm', '1.5in', '20pt')",
                    side, value
                )));
            }
        }
        Ok(())
    }

    /// Overlay the sides set in `other` on top of `self`.
    pub fn merge(&mut self, other: &PageMargins) {
        if other.top.is_some() {
            self.top = other.top.clone();
        }
        if other.right.is_some() {
            self.right = other.right.clone();
        }
        if other.bottom.is_some() {
            self.bottom = other.bottom.clone();
        }
        if other.left.is_some() {
            self.left = other.left.clone();
        }
    }
}

pub fn is_valid_margin(value: &str) -> bool {
    MARGIN_RE.is_match(value)
}
