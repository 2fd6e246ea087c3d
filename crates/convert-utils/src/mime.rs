//! MIME type detection for embedded resources.

use std::path::Path;

/// MIME type used when an image extension is unknown.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Fallback table for image extensions, consulted when `mime_guess` has no answer.
pub fn image_mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// MIME type for an image file, guessed from its extension.
pub fn image_mime_from_path(path: &Path) -> &'static str {
    if let Some(mime) = mime_guess::from_path(path).first_raw() {
        return mime;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(image_mime_from_extension)
        .unwrap_or(DEFAULT_IMAGE_MIME)
}
