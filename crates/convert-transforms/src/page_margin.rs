//! PageMargin — turns CLI margin overrides into an `@page` rule that wins over the stylesheet.

use convert_core::error::Result;
use convert_core::options::PageMargins;
use convert_utils::html::inject_head;

/// Build the `@page` override rule, or `None` when no side is overridden.
///
/// Only the given sides are emitted, so the stylesheet keeps control of the
/// page size and of every side left unset.
pub fn page_margin_css(margins: &PageMargins) -> Result<Option<String>> {
    margins.validate()?;
    if margins.is_empty() {
        return Ok(None);
    }

    let declarations: Vec<String> = margins
        .sides()
        .map(|(side, value)| format!("margin-{}: {} !important;", side, value))
        .collect();
    Ok(Some(format!("@page {{ {} }}", declarations.join(" "))))
}

/// Append the margin override rule to the document head, after the template CSS.
pub fn apply_margin_overrides(html: &str, margins: &PageMargins) -> Result<String> {
    match page_margin_css(margins)? {
        Some(css) => {
            log::debug!("Applying page margin overrides: {}", css);
            let style = format!("<style id=\"dcv-page-margins\">{}</style>\n", css);
            Ok(inject_head(html, &style))
        }
        None => Ok(html.to_string()),
    }
}
