//! DataURL embedder — inlines local images referenced from HTML as base64 data URIs.

use std::path::{Path, PathBuf};

use base64::Engine;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use convert_utils::html::{percent_decode, unescape_attribute};
use convert_utils::mime::image_mime_from_path;

static IMG_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").unwrap());

static SRC_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)(\ssrc\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// Result of embedding images into an HTML fragment.
#[derive(Debug, Default)]
pub struct EmbedOutcome {
    pub html: String,
    /// Number of `src` attributes replaced by data URIs.
    pub embedded: usize,
    /// One message per image that could not be inlined.
    pub warnings: Vec<String>,
}

/// Rewrite every `<img src>` that points at a local file into a data URI.
///
/// Remote (`http:`, `https:`, `//`), `file:` and existing `data:` sources are
/// left alone. Relative paths are resolved against `base_dir`. When an image
/// cannot be read its original reference stays in place and a warning is
/// recorded.
pub fn embed_images(html: &str, base_dir: &Path) -> EmbedOutcome {
    let mut embedded = 0usize;
    let mut warnings = Vec::new();

    let new_html = IMG_TAG_RE.replace_all(html, |tag: &Captures| {
        let tag = &tag[0];
        SRC_ATTR_RE
            .replace(tag, |attr: &Captures| {
                let (raw, self_closing) = match attr.get(4) {
                    // `src=a.png/>`: the slash closes the tag
                    Some(m) if m.as_str().ends_with('/') && tag[m.end()..].starts_with('>') => {
                        (&m.as_str()[..m.as_str().len() - 1], true)
                    }
                    Some(m) => (m.as_str(), false),
                    None => (
                        attr.get(2)
                            .or_else(|| attr.get(3))
                            .map(|m| m.as_str())
                            .unwrap_or(""),
                        false,
                    ),
                };

                if is_external(raw) {
                    return attr[0].to_string();
                }

                match to_data_url(raw, base_dir) {
                    Ok(data_url) => {
                        embedded += 1;
                        let slash = if self_closing { "/" } else { "" };
                        format!(r#"{}"{}"{}"#, &attr[1], data_url, slash)
                    }
                    Err(message) => {
                        log::warn!("{}", message);
                        warnings.push(message);
                        attr[0].to_string()
                    }
                }
            })
            .into_owned()
    });

    if embedded > 0 {
        log::info!("Embedded {} image(s) as data URIs", embedded);
    }

    EmbedOutcome {
        html: new_html.into_owned(),
        embedded,
        warnings,
    }
}

fn is_external(src: &str) -> bool {
    let lower = src.trim_start().to_ascii_lowercase();
    lower.is_empty()
        || lower.starts_with("data:")
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("file:")
        || lower.starts_with("//")
}

fn to_data_url(src: &str, base_dir: &Path) -> Result<String, String> {
    let image_path = resolve_image(src, base_dir)
        .ok_or_else(|| format!("Image not found: {}", base_dir.join(src).display()))?;

    let bytes = std::fs::read(&image_path)
        .map_err(|e| format!("Failed to embed image {}: {}", image_path.display(), e))?;

    let mime = image_mime_from_path(&image_path);
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    log::debug!("Embedded {} ({})", image_path.display(), mime);
    Ok(format!("data:{};base64,{}", mime, encoded))
}

/// Locate the file behind `src`, trying the literal reference first and then
/// its entity/percent-decoded forms. Query strings and fragments are dropped.
fn resolve_image(src: &str, base_dir: &Path) -> Option<PathBuf> {
    let src = src.split(['?', '#']).next().unwrap_or(src);

    let mut candidates = vec![src.to_string()];
    let unescaped = unescape_attribute(src);
    if let Some(decoded) = percent_decode(&unescaped) {
        candidates.push(decoded);
    }
    candidates.push(unescaped);

    candidates
        .into_iter()
        .map(|c| base_dir.join(c))
        .find(|p| p.is_file())
}
