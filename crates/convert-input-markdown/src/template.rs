//! HTML template slot filling.
//!
//! Templates carry two slots, `{{ body_content }}` and `{{ css_content }}`.
//! Values are substituted literally.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use convert_core::error::{ConvertError, Result};
use convert_utils::html::inject_head;

static BODY_SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{\s*body_content\s*\}\}").unwrap());
static CSS_SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{\s*css_content\s*\}\}").unwrap());

/// Fill the template's slots with the rendered body and stylesheet.
pub fn compose(template: &str, body: &str, css: &str) -> Result<String> {
    if !BODY_SLOT.is_match(template) {
        return Err(ConvertError::BadOptions(
            "HTML template has no {{ body_content }} slot".to_string(),
        ));
    }

    // CSS first, so a body that happens to contain "{{ css_content }}" stays intact.
    let with_css = if CSS_SLOT.is_match(template) {
        CSS_SLOT.replace_all(template, NoExpand(css)).into_owned()
    } else {
        log::warn!("HTML template has no {{{{ css_content }}}} slot; injecting CSS into <head>");
        inject_head(template, &format!("<style>\n{}\n</style>\n", css))
    };

    Ok(BODY_SLOT.replace_all(&with_css, NoExpand(body)).into_owned())
}
