//! Bundled HTML template and stylesheet, with optional on-disk overrides.

use std::path::Path;

use convert_core::error::{ConvertError, Result};
use convert_utils::encoding::read_text;

/// Default HTML template with `{{ css_content }}` and `{{ body_content }}` slots.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/base.html");

/// Default print stylesheet.
pub const DEFAULT_CSS: &str = include_str!("../assets/pdf.css");

/// File names used when exporting the bundled assets.
pub const CSS_EXPORT_NAME: &str = "dcv_custom.css";
pub const TEMPLATE_EXPORT_NAME: &str = "dcv_custom_template.html";

pub fn load_template(path: Option<&Path>) -> Result<String> {
    load_or_default(path, DEFAULT_TEMPLATE, "template")
}

pub fn load_css(path: Option<&Path>) -> Result<String> {
    load_or_default(path, DEFAULT_CSS, "stylesheet")
}

fn load_or_default(path: Option<&Path>, bundled: &str, what: &str) -> Result<String> {
    let Some(path) = path else {
        return Ok(bundled.to_string());
    };
    if !path.is_file() {
        return Err(ConvertError::NotFound(path.to_path_buf()));
    }
    log::debug!("Using custom {} {}", what, path.display());
    Ok(read_text(path)?)
}
